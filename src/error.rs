//! Error types for cache construction
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Config Error Enum ==
/// Rejection of a construction-time option.
///
/// The two variants keep "right kind of input, bad magnitude" apart from
/// "wrong kind of input altogether", so callers can react to each.
/// Construction is all-or-nothing: a cache is never created from a
/// configuration that produced either of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Option had the expected type but a non-positive magnitude
    #[error("Option `{option}` must be > 0")]
    NotPositive {
        /// Name of the rejected option
        option: &'static str,
    },

    /// Option could not be coerced into the expected type
    #[error("Option `{option}` expects {expected}, got `{given}`")]
    WrongType {
        /// Name of the rejected option
        option: &'static str,
        /// What the option accepts
        expected: &'static str,
        /// The offending input, rendered for the message
        given: String,
    },
}

// == Result Type Alias ==
/// Convenience Result type for cache construction.
pub type Result<T> = std::result::Result<T, ConfigError>;
