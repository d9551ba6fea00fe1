use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AvlError {
    /// The value cannot be placed in the tree's order, e.g. `f64::NAN`.
    #[error("value cannot be ordered by the tree comparator")]
    InvalidArgument,
    #[error("no more elements")]
    NoMoreElements,
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}
