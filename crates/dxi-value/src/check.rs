//! # Structural Validator
//!
//! Decides whether a [`BaseValue`] has the shape its [`Type`] requires,
//! recursively, looking through `Newtype` and `Reference` indirection.
//!
//! ## Rules
//!
//! - Primitives match only their own tag. No coercion, no widening.
//! - Arrays, maps, and optionals match when every contained payload matches
//!   the item type. The nested `ty` of contained values is ignored. Map keys
//!   are opaque strings and are not checked.
//! - Enums match by symbol membership.
//! - Records match when the component count equals the field count and each
//!   component matches its field, in order. Variants first select the case
//!   by name, then apply the same rule to its parameters.
//! - `Newtype` is transparent. `Reference` is resolved in the type's module;
//!   an unresolvable reference matches nothing.
//!
//! A mismatch is an answer, not an error: nothing here fails or panics.
//! [`check_base_value`] and [`find_mismatch`] share one walk, so
//! `find_mismatch(t, v).is_none() == check_base_value(t, v)` always.

use std::sync::Arc;

use dxi_schema::{Field, Module, Type, TypeExpr};

use crate::mismatch::{Mismatch, MismatchKind, PathSegment};
use crate::value::{BaseValue, Value};

/// Whether `v.value` satisfies `v.ty`.
pub fn check_value(v: &Value) -> bool {
    check_base_value(&v.ty, &v.value)
}

/// Whether `value` satisfies `ty`.
pub fn check_base_value(ty: &Type, value: &BaseValue) -> bool {
    Walker::new(ty.module()).walk(ty.expr(), value, 0).is_ok()
}

/// The first location at which `value` fails `ty`, or `None` if it matches.
pub fn find_mismatch(ty: &Type, value: &BaseValue) -> Option<Mismatch> {
    Walker::new(ty.module()).walk(ty.expr(), value, 0).err()
}

struct Walker<'m> {
    module: &'m Arc<Module>,
}

impl<'m> Walker<'m> {
    fn new(module: &'m Arc<Module>) -> Self {
        Self { module }
    }

    /// `hops` counts consecutive reference resolutions that have not yet
    /// consumed any part of the value. More hops than there are definitions
    /// means the references form a loop that can never reach a payload.
    fn walk(&self, expr: &TypeExpr, value: &BaseValue, hops: usize) -> Result<(), Mismatch> {
        match (expr, value) {
            (TypeExpr::Bool, BaseValue::Boolean(_))
            | (TypeExpr::Bytes, BaseValue::Bytes(_))
            | (TypeExpr::Int32, BaseValue::Int32(_))
            | (TypeExpr::Int64, BaseValue::Int64(_))
            | (TypeExpr::Float32, BaseValue::Float32(_))
            | (TypeExpr::Float64, BaseValue::Float64(_))
            | (TypeExpr::String, BaseValue::String(_))
            | (TypeExpr::Date, BaseValue::Date(_))
            | (TypeExpr::Datetime, BaseValue::Datetime(_)) => Ok(()),

            (TypeExpr::Array { item }, BaseValue::Array(elems)) => {
                elems.iter().enumerate().try_for_each(|(i, elem)| {
                    self.walk(item, &elem.value, 0)
                        .map_err(|m| m.within(PathSegment::Index(i)))
                })
            }

            (TypeExpr::Map { item }, BaseValue::Map(entries)) => {
                entries.iter().try_for_each(|(key, entry)| {
                    self.walk(item, &entry.value, 0)
                        .map_err(|m| m.within(PathSegment::Key(key.clone())))
                })
            }

            (TypeExpr::Optional { .. }, BaseValue::Optional(None)) => Ok(()),
            (TypeExpr::Optional { item }, BaseValue::Optional(Some(inner))) => self
                .walk(item, &inner.value, 0)
                .map_err(|m| m.within(PathSegment::Some)),

            (TypeExpr::Enum { symbols, .. }, BaseValue::Enum(symbol)) => {
                if symbols.iter().any(|s| s == symbol) {
                    Ok(())
                } else {
                    Err(Mismatch::at_root(MismatchKind::UnknownSymbol {
                        symbol: symbol.clone(),
                    }))
                }
            }

            (TypeExpr::Record { fields, .. }, BaseValue::Record(values)) => {
                self.check_fields(fields, values)
            }

            (TypeExpr::Variant { cases, .. }, BaseValue::Variant { case, values }) => {
                match cases.iter().find(|c| c.case_name() == case) {
                    Some(matched) => self
                        .check_fields(matched.case_parameters(), values)
                        .map_err(|m| m.within(PathSegment::Case(case.clone()))),
                    None => Err(Mismatch::at_root(MismatchKind::UnknownCase {
                        case: case.clone(),
                    })),
                }
            }

            (TypeExpr::Newtype { underlying, .. }, _) => self.walk(underlying, value, hops),

            (TypeExpr::Reference { name }, _) => match self.module.get(name) {
                Some(target) if hops <= self.module.len() => self.walk(target, value, hops + 1),
                Some(_) => {
                    tracing::debug!(%name, "reference loop never reaches a payload");
                    Err(Mismatch::at_root(MismatchKind::IndirectionCycle {
                        name: name.clone(),
                    }))
                }
                None => {
                    tracing::debug!(%name, "unresolved reference treated as mismatch");
                    Err(Mismatch::at_root(MismatchKind::UnresolvedReference {
                        name: name.clone(),
                    }))
                }
            },

            _ => Err(Mismatch::at_root(MismatchKind::ShapeMismatch {
                expected: expr.shape(),
                found: value.shape(),
            })),
        }
    }

    /// Same length, then pairwise in declared order.
    fn check_fields(&self, fields: &[Field], values: &[Value]) -> Result<(), Mismatch> {
        if fields.len() != values.len() {
            return Err(Mismatch::at_root(MismatchKind::ArityMismatch {
                expected: fields.len(),
                found: values.len(),
            }));
        }
        fields.iter().zip(values).try_for_each(|(field, v)| {
            self.walk(field.field_type(), &v.value, 0)
                .map_err(|m| m.within(PathSegment::Field(field.name().to_string())))
        })
    }
}
