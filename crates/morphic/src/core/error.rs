use std::{io, result::Result as StdResult};

use thiserror::Error;

/// Result type for morphic operations.
pub type Result<T> = StdResult<T, Error>;

/// Core error type.
#[derive(PartialEq, Eq, Error, Debug, Clone)]
pub enum Error {
    /// A node id does not refer to a live morph.
    #[error("node not found: {0}")]
    NodeNotFound(String),
    /// The requested reparenting would make a morph its own ancestor.
    #[error("would create a cycle: {0}")]
    Cycle(String),
    /// The world root can not be reparented, copied into a hand or destroyed.
    #[error("the world can not be {0}")]
    World(&'static str),
    /// A widget in the subtree does not support duplication.
    #[error("not copyable: {0}")]
    NotCopyable(String),
    /// A dropped payload could not be decoded.
    #[error("decode: {0}")]
    Decode(String),
    /// Preferences could not be parsed or failed validation.
    #[error("preferences: {0}")]
    Preferences(String),
    /// A widget reported a failure while handling a hook.
    #[error("{0}")]
    Widget(String),
    /// Invalid input error.
    #[error("invalid: {0}")]
    Invalid(String),
    /// Internal error.
    #[error("internal: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Preferences(e.to_string())
    }
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Self::Decode(e.to_string())
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Internal(e.to_string())
    }
}
