//! # Value Representation
//!
//! [`BaseValue`] mirrors the schema shapes one-for-one, minus the indirection
//! shapes (`Newtype`, `Reference`), which have no payload of their own.
//! [`Value`] pairs a payload with the [`Type`] it claims to satisfy.
//!
//! Records and variant cases are positional: component `i` belongs to the
//! `i`-th declared field. Field names live only in the schema.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use dxi_schema::{ShapeTag, Type};

/// Untyped payload of a schema value.
#[derive(Debug, Clone, PartialEq)]
pub enum BaseValue {
    Boolean(bool),
    Bytes(Vec<u8>),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    String(String),
    Date(NaiveDate),
    Datetime(DateTime<Utc>),
    Array(Vec<Value>),
    /// String-keyed map. Keys are opaque to the schema.
    Map(BTreeMap<String, Value>),
    Optional(Option<Box<Value>>),
    /// The selected symbol, by name.
    Enum(String),
    /// One component per declared field, in declaration order.
    Record(Vec<Value>),
    /// The selected case and one component per case parameter.
    Variant { case: String, values: Vec<Value> },
}

impl BaseValue {
    /// The schema shape this payload directly inhabits.
    pub fn shape(&self) -> ShapeTag {
        match self {
            Self::Boolean(_) => ShapeTag::Bool,
            Self::Bytes(_) => ShapeTag::Bytes,
            Self::Int32(_) => ShapeTag::Int32,
            Self::Int64(_) => ShapeTag::Int64,
            Self::Float32(_) => ShapeTag::Float32,
            Self::Float64(_) => ShapeTag::Float64,
            Self::String(_) => ShapeTag::String,
            Self::Date(_) => ShapeTag::Date,
            Self::Datetime(_) => ShapeTag::Datetime,
            Self::Array(_) => ShapeTag::Array,
            Self::Map(_) => ShapeTag::Map,
            Self::Optional(_) => ShapeTag::Optional,
            Self::Enum(_) => ShapeTag::Enum,
            Self::Record(_) => ShapeTag::Record,
            Self::Variant { .. } => ShapeTag::Variant,
        }
    }

    pub fn is_primitive(&self) -> bool {
        self.shape().is_primitive()
    }
}

/// A payload together with the type it claims to satisfy.
///
/// The claim is only guaranteed for values built by the primitive
/// constructors or by a conforming producer. Use
/// [`check_value`](crate::check_value) for anything else.
#[derive(Debug, Clone, PartialEq)]
pub struct Value {
    pub ty: Type,
    pub value: BaseValue,
}

impl Value {
    pub fn new(ty: Type, value: BaseValue) -> Self {
        Self { ty, value }
    }

    /// Split into type and payload.
    pub fn into_parts(self) -> (Type, BaseValue) {
        (self.ty, self.value)
    }
}
