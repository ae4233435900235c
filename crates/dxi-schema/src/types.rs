//! # Type Graph Nodes
//!
//! [`TypeExpr`] is the closed set of schema shapes. [`Type`] is the handle
//! the rest of the workspace passes around: a node plus the [`Module`] that
//! its `Reference` nodes resolve against.
//!
//! ## Structural Invariants
//!
//! - Enum symbols and variant cases are non-empty.
//! - Symbols, case names, and field names are unique within their owner.
//!
//! The checked constructors ([`TypeExpr::enumeration`], [`TypeExpr::record`],
//! [`TypeExpr::variant`]) enforce these at construction.
//! [`Module::check_well_formed`] re-checks them for graphs that arrived by
//! deserialization.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;
use crate::module::{lookup_name, Module};
use crate::name::Name;

// ─── Shape Classification ────────────────────────────────────────────

/// The shape of a type node, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeTag {
    Bool,
    Bytes,
    Int32,
    Int64,
    Float32,
    Float64,
    String,
    Date,
    Datetime,
    Array,
    Map,
    Optional,
    Enum,
    Record,
    Variant,
    Newtype,
    Reference,
}

impl ShapeTag {
    /// All primitive tags, in declaration order.
    pub const PRIMITIVES: [ShapeTag; 9] = [
        Self::Bool,
        Self::Bytes,
        Self::Int32,
        Self::Int64,
        Self::Float32,
        Self::Float64,
        Self::String,
        Self::Date,
        Self::Datetime,
    ];

    /// Whether this tag names a primitive shape.
    pub fn is_primitive(&self) -> bool {
        Self::PRIMITIVES.contains(self)
    }

    /// Whether nodes of this shape carry a [`Name`].
    pub fn is_named(&self) -> bool {
        matches!(
            self,
            Self::Enum | Self::Record | Self::Variant | Self::Newtype | Self::Reference
        )
    }

    /// Lowercase label used in diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Bytes => "bytes",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::String => "string",
            Self::Date => "date",
            Self::Datetime => "datetime",
            Self::Array => "array",
            Self::Map => "map",
            Self::Optional => "optional",
            Self::Enum => "enum",
            Self::Record => "record",
            Self::Variant => "variant",
            Self::Newtype => "newtype",
            Self::Reference => "reference",
        }
    }
}

impl fmt::Display for ShapeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Fields and Cases ────────────────────────────────────────────────

/// A named, typed slot in a record or a variant case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    name: String,
    #[serde(rename = "type")]
    ty: Arc<TypeExpr>,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: impl Into<Arc<TypeExpr>>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_type(&self) -> &Arc<TypeExpr> {
        &self.ty
    }
}

/// One alternative of a variant, with its positional parameter list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    name: String,
    #[serde(default)]
    parameters: Vec<Field>,
}

impl Case {
    pub fn new(name: impl Into<String>, parameters: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            parameters,
        }
    }

    /// A case with no parameters.
    pub fn unit(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }

    pub fn case_name(&self) -> &str {
        &self.name
    }

    pub fn case_parameters(&self) -> &[Field] {
        &self.parameters
    }
}

// ─── Type Expressions ────────────────────────────────────────────────

/// A node of the schema type graph.
///
/// Children are shared so that a [`Type`] handle for any sub-node can be
/// produced without copying the subtree. `Reference` nodes store only a
/// name; the target is looked up in a [`Module`] when needed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeExpr {
    Bool,
    Bytes,
    Int32,
    Int64,
    Float32,
    Float64,
    String,
    Date,
    Datetime,
    Array { item: Arc<TypeExpr> },
    Map { item: Arc<TypeExpr> },
    Optional { item: Arc<TypeExpr> },
    Enum { name: Name, symbols: Vec<String> },
    Record { name: Name, fields: Vec<Field> },
    Variant { name: Name, cases: Vec<Case> },
    Newtype { name: Name, underlying: Arc<TypeExpr> },
    Reference { name: Name },
}

impl TypeExpr {
    pub fn array(item: impl Into<Arc<TypeExpr>>) -> Self {
        Self::Array { item: item.into() }
    }

    /// A string-keyed map whose values have type `item`.
    pub fn map(item: impl Into<Arc<TypeExpr>>) -> Self {
        Self::Map { item: item.into() }
    }

    pub fn optional(item: impl Into<Arc<TypeExpr>>) -> Self {
        Self::Optional { item: item.into() }
    }

    /// An enum over `symbols`.
    ///
    /// # Errors
    ///
    /// [`SchemaError::EmptyEnum`] for an empty symbol list,
    /// [`SchemaError::Duplicate`] for a repeated symbol.
    pub fn enumeration<S: Into<String>>(
        name: Name,
        symbols: impl IntoIterator<Item = S>,
    ) -> Result<Self, SchemaError> {
        let expr = Self::Enum {
            name,
            symbols: symbols.into_iter().map(Into::into).collect(),
        };
        expr.check_local()?;
        Ok(expr)
    }

    /// A record with `fields` in declaration order.
    ///
    /// # Errors
    ///
    /// [`SchemaError::Duplicate`] for a repeated field name.
    pub fn record(name: Name, fields: Vec<Field>) -> Result<Self, SchemaError> {
        let expr = Self::Record { name, fields };
        expr.check_local()?;
        Ok(expr)
    }

    /// A tagged sum over `cases`.
    ///
    /// # Errors
    ///
    /// [`SchemaError::EmptyVariant`] for an empty case list,
    /// [`SchemaError::Duplicate`] for a repeated case or parameter name.
    pub fn variant(name: Name, cases: Vec<Case>) -> Result<Self, SchemaError> {
        let expr = Self::Variant { name, cases };
        expr.check_local()?;
        Ok(expr)
    }

    pub fn newtype(name: Name, underlying: impl Into<Arc<TypeExpr>>) -> Self {
        Self::Newtype {
            name,
            underlying: underlying.into(),
        }
    }

    pub fn reference(name: Name) -> Self {
        Self::Reference { name }
    }

    /// Classify this node.
    pub fn shape(&self) -> ShapeTag {
        match self {
            Self::Bool => ShapeTag::Bool,
            Self::Bytes => ShapeTag::Bytes,
            Self::Int32 => ShapeTag::Int32,
            Self::Int64 => ShapeTag::Int64,
            Self::Float32 => ShapeTag::Float32,
            Self::Float64 => ShapeTag::Float64,
            Self::String => ShapeTag::String,
            Self::Date => ShapeTag::Date,
            Self::Datetime => ShapeTag::Datetime,
            Self::Array { .. } => ShapeTag::Array,
            Self::Map { .. } => ShapeTag::Map,
            Self::Optional { .. } => ShapeTag::Optional,
            Self::Enum { .. } => ShapeTag::Enum,
            Self::Record { .. } => ShapeTag::Record,
            Self::Variant { .. } => ShapeTag::Variant,
            Self::Newtype { .. } => ShapeTag::Newtype,
            Self::Reference { .. } => ShapeTag::Reference,
        }
    }

    /// The name carried by named and reference nodes.
    pub fn name(&self) -> Option<&Name> {
        match self {
            Self::Enum { name, .. }
            | Self::Record { name, .. }
            | Self::Variant { name, .. }
            | Self::Newtype { name, .. }
            | Self::Reference { name } => Some(name),
            _ => None,
        }
    }

    /// The primitive node for a primitive tag, `None` for structured tags.
    pub fn primitive(tag: ShapeTag) -> Option<Self> {
        Some(match tag {
            ShapeTag::Bool => Self::Bool,
            ShapeTag::Bytes => Self::Bytes,
            ShapeTag::Int32 => Self::Int32,
            ShapeTag::Int64 => Self::Int64,
            ShapeTag::Float32 => Self::Float32,
            ShapeTag::Float64 => Self::Float64,
            ShapeTag::String => Self::String,
            ShapeTag::Date => Self::Date,
            ShapeTag::Datetime => Self::Datetime,
            _ => return None,
        })
    }

    /// Check the structural invariants of this node and every node below it.
    pub fn check_structure(&self) -> Result<(), SchemaError> {
        self.check_local()?;
        self.for_each_child(&mut |child| child.check_structure())
    }

    /// Invoke `f` on each direct child node, stopping at the first error.
    ///
    /// References are leaves: their targets are not visited.
    pub fn for_each_child<E>(
        &self,
        f: &mut impl FnMut(&TypeExpr) -> Result<(), E>,
    ) -> Result<(), E> {
        match self {
            Self::Array { item } | Self::Map { item } | Self::Optional { item } => f(&**item),
            Self::Newtype { underlying, .. } => f(&**underlying),
            Self::Record { fields, .. } => fields.iter().try_for_each(|fd| f(&*fd.ty)),
            Self::Variant { cases, .. } => cases
                .iter()
                .flat_map(|c| c.parameters.iter())
                .try_for_each(|fd| f(&*fd.ty)),
            _ => Ok(()),
        }
    }

    fn check_local(&self) -> Result<(), SchemaError> {
        match self {
            Self::Enum { name, symbols } => {
                if symbols.is_empty() {
                    return Err(SchemaError::EmptyEnum(name.clone()));
                }
                unique("symbol", name, symbols.iter().map(String::as_str))
            }
            Self::Record { name, fields } => {
                unique("field", name, fields.iter().map(Field::name))
            }
            Self::Variant { name, cases } => {
                if cases.is_empty() {
                    return Err(SchemaError::EmptyVariant(name.clone()));
                }
                unique("case", name, cases.iter().map(Case::case_name))?;
                cases.iter().try_for_each(|c| {
                    unique("field", name, c.parameters.iter().map(Field::name))
                })
            }
            _ => Ok(()),
        }
    }
}

fn unique<'a>(
    kind: &'static str,
    owner: &Name,
    items: impl Iterator<Item = &'a str>,
) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();
    for item in items {
        if !seen.insert(item) {
            return Err(SchemaError::Duplicate {
                kind,
                item: item.to_string(),
                owner: owner.clone(),
            });
        }
    }
    Ok(())
}

// ─── Type Handles ────────────────────────────────────────────────────

/// A type node together with the module its references resolve against.
///
/// Two handles are equal when they point at the same module instance and
/// their nodes are structurally equal.
#[derive(Clone)]
pub struct Type {
    module: Arc<Module>,
    expr: Arc<TypeExpr>,
}

impl Type {
    pub fn new(module: Arc<Module>, expr: impl Into<Arc<TypeExpr>>) -> Self {
        Self {
            module,
            expr: expr.into(),
        }
    }

    pub fn module(&self) -> &Arc<Module> {
        &self.module
    }

    pub fn expr(&self) -> &TypeExpr {
        &self.expr
    }

    /// A handle to `expr` in this handle's module.
    ///
    /// Used to descend into item, field, and case types.
    pub fn child(&self, expr: &Arc<TypeExpr>) -> Type {
        Type {
            module: Arc::clone(&self.module),
            expr: Arc::clone(expr),
        }
    }

    pub fn shape(&self) -> ShapeTag {
        self.expr.shape()
    }

    pub fn name(&self) -> Option<&Name> {
        self.expr.name()
    }

    /// Follow a `Reference` to its definition. Any other node resolves to
    /// itself.
    ///
    /// Only one hop is taken; a definition that is itself a reference is
    /// returned as such.
    pub fn resolve(&self) -> Result<Type, SchemaError> {
        match self.expr.as_ref() {
            TypeExpr::Reference { name } => lookup_name(name, &self.module),
            _ => Ok(self.clone()),
        }
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.module, &other.module) && self.expr == other.expr
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Type").field(&self.expr).finish()
    }
}

/// Classify a type handle.
pub fn base_type(ty: &Type) -> ShapeTag {
    ty.shape()
}
