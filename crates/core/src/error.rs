use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("level numbers start at 1, got {0}")]
    InvalidLevel(u32),
    #[error("invalid generator settings: {0}")]
    Settings(String),
    #[error("failed to read generator settings")]
    Io(#[from] io::Error),
}
