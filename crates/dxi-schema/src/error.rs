//! # Schema Errors
//!
//! Errors raised while building or querying the type graph. Shape
//! mismatches between values and types are not errors; the validator
//! reports those as `false`.

use thiserror::Error;

use crate::name::Name;

/// Error in schema construction or name resolution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A qualified name could not be parsed.
    #[error("invalid qualified name {input:?}: {reason}")]
    InvalidName {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A referenced name has no definition in the module.
    #[error("unresolved name '{0}'")]
    UnresolvedName(Name),

    /// The same name was defined twice in one module.
    #[error("duplicate definition of '{0}'")]
    DuplicateDefinition(Name),

    /// A symbol, case, or field name appears twice inside one definition.
    #[error("duplicate {kind} '{item}' in '{owner}'")]
    Duplicate {
        /// What was duplicated: "symbol", "case", or "field".
        kind: &'static str,
        /// The repeated item.
        item: String,
        /// The definition containing it.
        owner: Name,
    },

    /// An enum was declared without symbols.
    #[error("enum '{0}' has no symbols")]
    EmptyEnum(Name),

    /// A variant was declared without cases.
    #[error("variant '{0}' has no cases")]
    EmptyVariant(Name),
}
