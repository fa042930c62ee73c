//! Error types for lazily constructed values.
//!
//! Failures inside user-supplied providers, reducers, getters and callbacks
//! are not represented here: they unwind straight to the call that triggered
//! them.

use thiserror::Error;

/// Errors raised by the library itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A lazy value was requested from inside its own creator.
    #[error("reentrant initialization of lazy value `{name}`")]
    ReentrantInit { name: &'static str },
}

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;
