//! # Mismatch Diagnostics
//!
//! Where and why a value failed the structural check. The boolean validator
//! carries no detail; [`find_mismatch`](crate::find_mismatch) returns one of
//! these for the first failing location in declaration order.
//!
//! Paths render as `$` followed by one segment per step into the value:
//! `.field`, `[index]`, `{"key"}`, `?` (inside an optional), and `#Case`
//! (into a variant case). `Newtype` and `Reference` steps are transparent
//! and add no segment.

use std::fmt;

use dxi_schema::{Name, ShapeTag};

/// One step from a container value into a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Record field or case parameter, by declared name.
    Field(String),
    /// Array element.
    Index(usize),
    /// Map entry.
    Key(String),
    /// The payload of a present optional.
    Some,
    /// The selected variant case.
    Case(String),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => write!(f, ".{name}"),
            Self::Index(i) => write!(f, "[{i}]"),
            Self::Key(key) => write!(f, "{{{key:?}}}"),
            Self::Some => f.write_str("?"),
            Self::Case(case) => write!(f, "#{case}"),
        }
    }
}

/// The reason a value does not match its type at one location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MismatchKind {
    /// The payload's shape is not the one the type requires.
    ShapeMismatch { expected: ShapeTag, found: ShapeTag },
    /// An enum payload names a symbol the enum does not declare.
    UnknownSymbol { symbol: String },
    /// A variant payload names a case the variant does not declare.
    UnknownCase { case: String },
    /// A record or case payload has the wrong number of components.
    ArityMismatch { expected: usize, found: usize },
    /// A reference could not be resolved, so nothing can match it.
    UnresolvedReference { name: Name },
    /// References loop back on themselves without ever reaching a shape
    /// that could hold a payload.
    IndirectionCycle { name: Name },
}

impl fmt::Display for MismatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShapeMismatch { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
            Self::UnknownSymbol { symbol } => write!(f, "unknown enum symbol {symbol:?}"),
            Self::UnknownCase { case } => write!(f, "unknown variant case {case:?}"),
            Self::ArityMismatch { expected, found } => {
                write!(f, "expected {expected} components, found {found}")
            }
            Self::UnresolvedReference { name } => write!(f, "unresolved reference '{name}'"),
            Self::IndirectionCycle { name } => write!(f, "reference '{name}' loops without a payload"),
        }
    }
}

/// The first location at which a value fails its type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    /// Steps from the root value to the failing location.
    pub path: Vec<PathSegment>,
    pub kind: MismatchKind,
}

impl Mismatch {
    pub(crate) fn at_root(kind: MismatchKind) -> Self {
        Self {
            path: Vec::new(),
            kind,
        }
    }

    /// Prefix the path with `segment`. Called while unwinding, so segments
    /// arrive innermost first.
    pub(crate) fn within(mut self, segment: PathSegment) -> Self {
        self.path.insert(0, segment);
        self
    }

    /// The rendered path, e.g. `$.lines[2].amount`.
    pub fn path_string(&self) -> String {
        let mut out = String::from("$");
        for segment in &self.path {
            out.push_str(&segment.to_string());
        }
        out
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path_string(), self.kind)
    }
}
