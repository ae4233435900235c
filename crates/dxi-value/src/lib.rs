//! # dxi-value — Typed Values and Structural Validation
//!
//! One in-memory representation for values that conform to a schema
//! [`Type`](dxi_schema::Type), independent of any wire format. Codecs decode
//! into it and encode out of it; property tests generate it.
//!
//! ## Layout
//!
//! - [`value`] — the [`BaseValue`] tagged union and the [`Value`] pair.
//! - [`primitive`] — the shared base module and the primitive constructors,
//!   the only producers whose output is correct by construction.
//! - [`check`] — [`check_value`] / [`check_base_value`], the recursive shape
//!   check, plus [`find_mismatch`] for callers that need to know where a
//!   value went wrong.
//!
//! ## Contract
//!
//! A `Value` that leaves a producer must satisfy `check_value(&v) == true`.
//! Composite values are assembled by callers and are not checked on
//! construction; run them through the validator.

pub mod check;
pub mod mismatch;
pub mod primitive;
pub mod value;

pub use check::{check_base_value, check_value, find_mismatch};
pub use mismatch::{Mismatch, MismatchKind, PathSegment};
pub use primitive::{
    base_module, boolean, bytes, date, datetime, double, float, int, long, primitive_type, string,
};
pub use value::{BaseValue, Value};
