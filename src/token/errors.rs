//! Tokenizer errors

use thiserror::Error;

use crate::errors::{CjError, CjErrorCode};

/// Result type for tokenizer operations
pub type LexResult<T> = Result<T, LexError>;

/// Tokenizer failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("Not enough tokens: output holds {capacity}")]
    NoMem { capacity: usize },

    #[error("Invalid input at byte {pos}")]
    Invalid { pos: usize },

    #[error("Incomplete input: more bytes expected after byte {pos}")]
    Incomplete { pos: usize },
}

impl LexError {
    /// Returns the codec error code for this failure
    pub fn code(&self) -> CjErrorCode {
        match self {
            LexError::NoMem { .. } => CjErrorCode::JsmnNoMem,
            LexError::Invalid { .. } => CjErrorCode::JsmnInval,
            LexError::Incomplete { .. } => CjErrorCode::JsmnPart,
        }
    }
}

impl From<LexError> for CjError {
    fn from(e: LexError) -> Self {
        CjError::new(e.code(), e.to_string())
    }
}
