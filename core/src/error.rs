//! Configuration error taxonomy.
//!
//! Every failure mode of the parse → coerce → validate pipeline maps to one
//! variant here. Errors are collected into `Vec`s and reported together, so
//! a user sees every problem in one pass rather than fixing them one at a
//! time.

use thiserror::Error;

/// A single configuration-resolution failure.
///
/// The `option` payloads carry the long alias (e.g. `--output-files`) so a
/// diagnostic names the option the way the user would type it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Wrong number of value tokens after an option's alias.
    #[error("{option}: expected {expected} value(s), got {found}")]
    Arity {
        /// Long alias of the offending option.
        option: String,
        /// Expected token count, e.g. `exactly 1` or `1 to 2`.
        expected: String,
        /// Tokens actually available.
        found: usize,
    },
    /// A token could not be converted to the option's declared type.
    #[error("{option}: invalid {expected} value {value:?}")]
    Type {
        /// Long alias of the offending option.
        option: String,
        /// Declared type label, e.g. `integer` or `float`.
        expected: &'static str,
        /// The raw token that failed to parse.
        value: String,
    },
    /// An unrecognized flag, or a positional argument beyond the single
    /// accepted input path.
    #[error("unknown argument: {0}")]
    UnknownArgument(String),
    /// A value outside its declared enumerated set or numeric range.
    #[error("{option}: value {value:?} is not in {allowed}")]
    Domain {
        /// Long alias of the offending option.
        option: String,
        /// The offending value.
        value: String,
        /// Rendering of the allowed set or range.
        allowed: String,
    },
    /// An option supplied without another option it only makes sense with.
    #[error("{option} requires {requirement}")]
    Dependency {
        /// Long alias of the dependent option.
        option: String,
        /// What was missing.
        requirement: String,
    },
}
