use thiserror::Error;

/// Errors produced by value conversions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("expected {expected}, found {actual}")]
    UnexpectedType {
        expected: &'static str,
        actual: &'static str,
    },
}
