//! Error types for playbridge
//!
//! Defines module-specific error types using thiserror for clear error propagation.
//!
//! Engine-reported playback failures are NOT errors at this level: they surface
//! as `PlayerState::Error` in the published snapshot, and retry policy belongs
//! to the caller.

use thiserror::Error;

/// Main error type for the playback state bridge
#[derive(Error, Debug)]
pub enum Error {
    /// `attach()` called while an engine is already attached
    #[error("bridge is already attached to an engine")]
    AlreadyAttached,

    /// Control method called while no engine is attached
    #[error("bridge is not attached to an engine")]
    Detached,

    /// Configuration loading or parse errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience Result type using the bridge Error
pub type Result<T> = std::result::Result<T, Error>;
