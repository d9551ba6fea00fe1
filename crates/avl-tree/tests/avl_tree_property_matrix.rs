use avl_tree::AvlTree;
use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

#[derive(Clone, Debug)]
enum Op {
    Insert(i32),
    RemoveFirst(i32),
    RemoveMin,
    RemoveMax,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0i32..32).prop_map(Op::Insert),
        2 => (0i32..32).prop_map(Op::RemoveFirst),
        1 => Just(Op::RemoveMin),
        1 => Just(Op::RemoveMax),
    ]
}

fn small_ints() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(-64i32..64, 0..256)
}

/// Upper bound on the height of an AVL tree holding `n` elements.
fn avl_height_bound(n: usize) -> f64 {
    1.4405 * ((n + 2) as f64).log2()
}

proptest! {
    #[test]
    fn ops_match_sorted_vec_model(ops in prop::collection::vec(op(), 0..256)) {
        let mut tree = AvlTree::new();
        let mut model: Vec<i32> = Vec::new();

        for op in ops {
            match op {
                Op::Insert(v) => {
                    tree.insert(v).unwrap();
                    let at = model.partition_point(|x| *x <= v);
                    model.insert(at, v);
                }
                Op::RemoveFirst(v) => {
                    let got = tree.remove_first(&v).unwrap();
                    match model.iter().position(|x| *x == v) {
                        Some(i) => {
                            model.remove(i);
                            prop_assert_eq!(got, Some(v));
                        }
                        None => prop_assert_eq!(got, None),
                    }
                }
                Op::RemoveMin => {
                    let expected = if model.is_empty() { None } else { Some(model.remove(0)) };
                    prop_assert_eq!(tree.remove_min(), expected);
                }
                Op::RemoveMax => prop_assert_eq!(tree.remove_max(), model.pop()),
            }

            prop_assert_eq!(tree.assert_valid(), Ok(()));
            prop_assert_eq!(tree.size(), model.len());
            prop_assert_eq!(tree.values(), model.clone());
            prop_assert!(tree.height() as f64 <= avl_height_bound(tree.size()));
        }
    }

    #[test]
    fn insert_then_remove_restores_multiset(values in small_ints(), v in -64i32..64) {
        let mut tree = AvlTree::new();
        tree.insert_all(values).unwrap();
        let before = tree.values();
        let size = tree.size();

        tree.insert(v).unwrap();
        prop_assert_eq!(tree.remove_first(&v), Ok(Some(v)));
        prop_assert_eq!(tree.size(), size);
        prop_assert_eq!(tree.values(), before);
        prop_assert_eq!(tree.assert_valid(), Ok(()));
    }

    #[test]
    fn occurrences_track_inserts_minus_removals(
        inserts in small_ints(),
        removals in prop::collection::vec(-64i32..64, 0..128),
    ) {
        let mut tree = AvlTree::new();
        tree.insert_all(inserts.iter().copied()).unwrap();

        let mut removed = vec![0usize; 128];
        for v in &removals {
            if tree.remove_first(v).unwrap().is_some() {
                removed[(v + 64) as usize] += 1;
            }
        }

        for v in -64i32..64 {
            let inserted = inserts.iter().filter(|x| **x == v).count();
            prop_assert_eq!(tree.occurrences_of(&v), Ok(inserted - removed[(v + 64) as usize]));
        }
        prop_assert_eq!(tree.size(), tree.values().len());
    }

    #[test]
    fn min_max_contains_agree_with_values(values in small_ints(), probe in -64i32..64) {
        let mut tree = AvlTree::new();
        tree.insert_all(values.iter().copied()).unwrap();
        let sorted = tree.values();

        prop_assert_eq!(tree.min(), sorted.first());
        prop_assert_eq!(tree.max(), sorted.last());
        prop_assert_eq!(tree.contains(&probe), Ok(values.contains(&probe)));
        prop_assert_eq!(tree.iter().len(), values.len());
    }
}

#[test]
fn ladder_insert_delete_matrix() {
    let mut tree = AvlTree::new();

    for i in 0..300 {
        tree.insert(i).unwrap();
        tree.assert_valid().unwrap();
    }
    assert_eq!(tree.size(), 300);

    for i in (0..300).step_by(3) {
        assert_eq!(tree.remove_first(&i), Ok(Some(i)));
        tree.assert_valid().unwrap();
    }

    for i in 0..300 {
        assert_eq!(tree.contains(&i), Ok(i % 3 != 0));
    }
    assert_eq!(tree.size(), 200);
}

#[test]
fn seeded_random_workload_matrix() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut rng = Xoshiro256StarStar::seed_from_u64(0x5eed_a71);
    let mut tree = AvlTree::new();
    let mut model: Vec<u32> = Vec::new();

    for step in 0..5_000 {
        let v = rng.gen_range(0..100u32);
        match rng.gen_range(0..10) {
            0..=5 => {
                tree.insert(v).unwrap();
                let at = model.partition_point(|x| *x <= v);
                model.insert(at, v);
            }
            6..=7 => {
                let expected = model.iter().position(|x| *x == v).map(|i| model.remove(i));
                assert_eq!(tree.remove_first(&v), Ok(expected), "step {step}");
            }
            8 => {
                let expected = if model.is_empty() { None } else { Some(model.remove(0)) };
                assert_eq!(tree.remove_min(), expected, "step {step}");
            }
            _ => assert_eq!(tree.remove_max(), model.pop(), "step {step}"),
        }

        if step % 97 == 0 {
            tree.assert_valid().unwrap();
            assert_eq!(tree.values(), model);
        }
    }

    tree.assert_valid().unwrap();
    assert_eq!(tree.values(), model);
    assert!(tree.height() as f64 <= avl_height_bound(tree.size()));
}
