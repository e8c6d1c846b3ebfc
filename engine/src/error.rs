//! Error types for the reconciliation engine.

use thiserror::Error;

/// All possible errors from the engine.
///
/// The engine is pure: everything it can reject is a shape problem in the
/// data handed to it. IO-level failures (missing files, store write
/// rejections) belong to the embedding.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("malformed backup data: {0}")]
    MalformedData(String),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
