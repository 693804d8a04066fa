use thiserror::Error;

/// Error produced by the comparison core.
///
/// A single class on purpose: every violated precondition (empty point set,
/// paired-array length mismatch, non-finite coordinate) means the input
/// geometry is unusable, so the whole comparison aborts with no partial
/// result. File-level failures live in the I/O layer and use `anyhow`.
#[derive(Debug, Error)]
pub enum CompareError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl CompareError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        CompareError::InvalidInput(msg.into())
    }
}
