use thiserror::Error;

/// All errors generated in `depth-tui`.
#[derive(Debug, Error)]
pub enum DepthError {
    #[error("failed to read replay file: {0}")]
    Io(#[from] std::io::Error),

    #[error("replay line {line} is not a valid book snapshot: {reason}")]
    Replay { line: usize, reason: String },
}
