//! # Qualified Names
//!
//! A [`Name`] identifies a named definition (enum, record, variant, newtype)
//! inside a [`Module`](crate::Module). Its textual form is
//! `namespace.Local`, split at the last dot, so `acme.billing.Invoice` has
//! namespace `acme.billing` and local part `Invoice`. A name with no dot
//! lives in the empty namespace.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// A qualified schema name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Name {
    namespace: String,
    local: String,
}

impl Name {
    /// Build a name from its parts.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidName`] if `local` is empty or contains a
    /// dot, or if `namespace` has an empty segment.
    pub fn new(namespace: impl Into<String>, local: impl Into<String>) -> Result<Self, SchemaError> {
        let namespace = namespace.into();
        let local = local.into();
        let display = if namespace.is_empty() {
            local.clone()
        } else {
            format!("{namespace}.{local}")
        };

        if local.is_empty() {
            return Err(invalid(&display, "local part is empty"));
        }
        if local.contains('.') {
            return Err(invalid(&display, "local part contains '.'"));
        }
        if !namespace.is_empty() && namespace.split('.').any(str::is_empty) {
            return Err(invalid(&display, "namespace has an empty segment"));
        }

        Ok(Self { namespace, local })
    }

    /// Parse a dotted name, splitting at the last `.`.
    pub fn parse(s: &str) -> Result<Self, SchemaError> {
        if s.is_empty() {
            return Err(invalid(s, "name is empty"));
        }
        match s.rsplit_once('.') {
            Some(("", _)) => Err(invalid(s, "namespace has an empty segment")),
            Some((namespace, local)) => Self::new(namespace, local),
            None => Self::new("", s),
        }
    }

    /// The namespace, possibly empty.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The unqualified local part.
    pub fn local(&self) -> &str {
        &self.local
    }
}

fn invalid(input: &str, reason: &str) -> SchemaError {
    SchemaError::InvalidName {
        input: input.to_string(),
        reason: reason.to_string(),
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            f.write_str(&self.local)
        } else {
            write!(f, "{}.{}", self.namespace, self.local)
        }
    }
}

impl FromStr for Name {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Name {
    type Error = SchemaError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Name> for String {
    fn from(name: Name) -> Self {
        name.to_string()
    }
}
