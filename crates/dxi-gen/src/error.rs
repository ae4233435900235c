//! # Generation Errors
//!
//! Generation has no recoverable failures. Every variant here means the
//! inputs (schema, override table, combinator arguments, configuration)
//! are wrong, and the current generation attempt is abandoned.

use dxi_schema::{Name, SchemaError};
use thiserror::Error;

/// Fatal error while generating a value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenError {
    /// A `Reference` names a type its module does not define. The schema
    /// graph is ill-formed.
    #[error("unresolved reference '{name}': schema graph is ill-formed")]
    UnresolvedReference {
        /// The name that failed to resolve.
        name: Name,
    },

    /// References loop back on themselves without reaching a shape that
    /// can be generated, and no override on the loop breaks it.
    #[error("reference '{name}' loops without reaching a generatable shape")]
    IndirectionCycle {
        /// The reference at which the loop was detected.
        name: Name,
    },

    /// A choice combinator was given nothing to choose from.
    #[error("nothing to choose from: {0}")]
    EmptyChoice(String),

    /// A schema operation inside an override failed.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Invalid sampling configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable held an unparseable value.
    #[error("invalid {var}={value:?}: {reason}")]
    InvalidVar {
        /// Variable name.
        var: &'static str,
        /// The raw value.
        value: String,
        /// Parse failure.
        reason: String,
    },
}
