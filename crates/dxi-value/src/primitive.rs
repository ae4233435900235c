//! # Primitive Constructors
//!
//! Every primitive [`Type`] belongs to one process-wide base module that has
//! no definitions of its own. The constructors below pair a native value
//! with its canonical primitive type, so their output always passes
//! [`check_value`](crate::check_value).

use std::sync::{Arc, OnceLock};

use chrono::{DateTime, NaiveDate, Utc};
use dxi_schema::{Module, ShapeTag, Type, TypeExpr};

use crate::value::{BaseValue, Value};

/// The shared, schema-less module that primitive types belong to.
pub fn base_module() -> Arc<Module> {
    static BASE: OnceLock<Arc<Module>> = OnceLock::new();
    Arc::clone(BASE.get_or_init(|| Arc::new(Module::default())))
}

/// The canonical primitive type for `tag`. `None` for structured tags.
pub fn primitive_type(tag: ShapeTag) -> Option<Type> {
    TypeExpr::primitive(tag).map(|expr| Type::new(base_module(), expr))
}

fn primitive(expr: TypeExpr, value: BaseValue) -> Value {
    Value::new(Type::new(base_module(), expr), value)
}

pub fn boolean(b: bool) -> Value {
    primitive(TypeExpr::Bool, BaseValue::Boolean(b))
}

pub fn bytes(b: impl Into<Vec<u8>>) -> Value {
    primitive(TypeExpr::Bytes, BaseValue::Bytes(b.into()))
}

/// A 32-bit integer value.
pub fn int(i: i32) -> Value {
    primitive(TypeExpr::Int32, BaseValue::Int32(i))
}

/// A 64-bit integer value.
pub fn long(i: i64) -> Value {
    primitive(TypeExpr::Int64, BaseValue::Int64(i))
}

/// A 32-bit float value.
pub fn float(f: f32) -> Value {
    primitive(TypeExpr::Float32, BaseValue::Float32(f))
}

/// A 64-bit float value.
pub fn double(f: f64) -> Value {
    primitive(TypeExpr::Float64, BaseValue::Float64(f))
}

pub fn string(s: impl Into<String>) -> Value {
    primitive(TypeExpr::String, BaseValue::String(s.into()))
}

pub fn date(d: NaiveDate) -> Value {
    primitive(TypeExpr::Date, BaseValue::Date(d))
}

pub fn datetime(dt: DateTime<Utc>) -> Value {
    primitive(TypeExpr::Datetime, BaseValue::Datetime(dt))
}
