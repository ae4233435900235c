//! # Value Generator
//!
//! Synthesizes a [`Value`] for a schema [`Type`] by walking the type:
//! primitives come from [`crate::primitive`], containers grow with the size
//! budget, named types first consult the override table in the context.
//!
//! ## Override Rule
//!
//! Enum, record, variant, newtype, and reference nodes look their name up
//! in the installed [`Overrides`]. A hit replaces the structural generator
//! for that node, run with the budget reduced by
//! [`OVERRIDE_SIZE_DECREMENT`] (floored at zero). References consult the
//! table before resolving, so an override can stand in for a name the
//! module never resolves.
//!
//! An override that wants "the normal value, one level down" calls
//! [`generate_structural`], which skips the table for the outermost name
//! only. Nested occurrences of the same name still reach the override,
//! which is where the shrunk budget ends the recursion.

use std::collections::BTreeSet;
use std::fmt;

use dxi_schema::{lookup_name, Field, Name, Type, TypeExpr};
use dxi_value::{BaseValue, Value};
use rand::seq::SliceRandom;

use crate::error::GenError;
use crate::generator::{from_fn, list_of, vector_of, weighted_index, GenContext, Generator};
use crate::overrides::Overrides;
use crate::primitive;

/// Budget taken off before an override runs.
pub const OVERRIDE_SIZE_DECREMENT: usize = 10;

/// Weight of `None` when generating an optional.
pub const OPTIONAL_NONE_WEIGHT: u32 = 1;

/// Weight of `Some` when generating an optional.
pub const OPTIONAL_SOME_WEIGHT: u32 = 19;

// ─── Public Surface ──────────────────────────────────────────────────

/// Generator of values for one type under one override table.
#[derive(Clone)]
pub struct ValueGen {
    overrides: Overrides,
    ty: Type,
}

impl ValueGen {
    pub fn new(overrides: Overrides, ty: Type) -> Self {
        Self { overrides, ty }
    }

    pub fn value_type(&self) -> &Type {
        &self.ty
    }

    pub fn overrides(&self) -> &Overrides {
        &self.overrides
    }
}

impl fmt::Debug for ValueGen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueGen")
            .field("ty", &self.ty)
            .field("overrides", &self.overrides)
            .finish()
    }
}

impl Generator<Value> for ValueGen {
    fn generate(&self, ctx: &mut GenContext<'_>) -> Result<Value, GenError> {
        generate_value(&mut ctx.with_overrides(&self.overrides), &self.ty)
    }
}

/// Values of `ty`, with `overrides` replacing the generators of the names
/// they cover.
pub fn gen_value(overrides: &Overrides, ty: &Type) -> ValueGen {
    ValueGen::new(overrides.clone(), ty.clone())
}

/// Values of `ty` with no overrides.
pub fn gen_value_plain(ty: &Type) -> ValueGen {
    ValueGen::new(Overrides::new(), ty.clone())
}

/// Draw a value of `ty` using the overrides already installed in `ctx`.
///
/// This is the entry point for override generators that need to produce a
/// value of some other type under the same table.
///
/// # Errors
///
/// [`GenError::UnresolvedReference`] if a reference reached without an
/// override does not resolve, [`GenError::IndirectionCycle`] if references
/// loop without reaching a payload.
pub fn generate_value(ctx: &mut GenContext<'_>, ty: &Type) -> Result<Value, GenError> {
    synth(ctx, ty, Step::default())
}

/// Draw a value of `ty` without consulting the override for `ty`'s own
/// name. Everything below the outermost name is generated normally.
///
/// # Errors
///
/// As [`generate_value`].
pub fn generate_structural(ctx: &mut GenContext<'_>, ty: &Type) -> Result<Value, GenError> {
    let step = Step {
        hops: 0,
        skip: ty.name(),
    };
    synth(ctx, ty, step)
}

// ─── Synthesis ───────────────────────────────────────────────────────

/// Bookkeeping carried across steps that consume no part of the value
/// (newtype unwraps and reference resolutions).
#[derive(Clone, Copy, Default)]
struct Step<'n> {
    /// References resolved since the last payload-bearing node.
    hops: usize,
    /// Name whose override is bypassed until a payload is produced.
    skip: Option<&'n Name>,
}

impl<'n> Step<'n> {
    fn skips(&self, name: &Name) -> bool {
        self.skip == Some(name)
    }
}

fn synth(ctx: &mut GenContext<'_>, ty: &Type, step: Step<'_>) -> Result<Value, GenError> {
    if let Some(value) = try_override(ctx, ty, step)? {
        return Ok(value);
    }

    let payload = match ty.expr() {
        TypeExpr::Bool => BaseValue::Boolean(primitive::gen_bool(ctx)),
        TypeExpr::Bytes => BaseValue::Bytes(primitive::gen_bytes(ctx)),
        TypeExpr::Int32 => BaseValue::Int32(primitive::gen_i32(ctx)),
        TypeExpr::Int64 => BaseValue::Int64(primitive::gen_i64(ctx)),
        TypeExpr::Float32 => BaseValue::Float32(primitive::gen_f32(ctx)),
        TypeExpr::Float64 => BaseValue::Float64(primitive::gen_f64(ctx)),
        TypeExpr::String => BaseValue::String(primitive::gen_string(ctx)),
        TypeExpr::Date => BaseValue::Date(primitive::gen_date(ctx)),
        TypeExpr::Datetime => BaseValue::Datetime(primitive::gen_datetime(ctx)),

        TypeExpr::Array { item } => {
            let item = ty.child(item);
            BaseValue::Array(list_of(from_fn(|ctx| generate_value(ctx, &item))).generate(ctx)?)
        }

        TypeExpr::Map { item } => {
            let item = ty.child(item);
            let mut keys = list_of(from_fn(|ctx| Ok(primitive::gen_string(ctx)))).generate(ctx)?;
            let mut seen = BTreeSet::new();
            keys.retain(|k| seen.insert(k.clone()));
            let values = vector_of(keys.len(), from_fn(|ctx| generate_value(ctx, &item)))
                .generate(ctx)?;
            BaseValue::Map(keys.into_iter().zip(values).collect())
        }

        TypeExpr::Optional { item } => {
            let pick = weighted_index(ctx, &[OPTIONAL_NONE_WEIGHT, OPTIONAL_SOME_WEIGHT])?;
            if pick == 0 {
                BaseValue::Optional(None)
            } else {
                let inner = generate_value(ctx, &ty.child(item))?;
                BaseValue::Optional(Some(Box::new(inner)))
            }
        }

        TypeExpr::Enum { name, symbols } => {
            let symbol = symbols
                .choose(ctx.rng())
                .ok_or_else(|| GenError::EmptyChoice(format!("enum '{name}'")))?;
            BaseValue::Enum(symbol.clone())
        }

        TypeExpr::Record { fields, .. } => BaseValue::Record(synth_fields(ctx, ty, fields)?),

        TypeExpr::Variant { name, cases } => {
            let case = cases
                .choose(ctx.rng())
                .ok_or_else(|| GenError::EmptyChoice(format!("variant '{name}'")))?;
            BaseValue::Variant {
                case: case.case_name().to_owned(),
                values: synth_fields(ctx, ty, case.case_parameters())?,
            }
        }

        TypeExpr::Newtype { underlying, .. } => {
            let inner = synth(ctx, &ty.child(underlying), step)?;
            inner.value
        }

        TypeExpr::Reference { name } => return follow_reference(ctx, ty, name, step),
    };

    Ok(Value::new(ty.clone(), payload))
}

/// Run the installed override for `ty`'s name, if there is one.
fn try_override(
    ctx: &mut GenContext<'_>,
    ty: &Type,
    step: Step<'_>,
) -> Result<Option<Value>, GenError> {
    let Some(name) = ty.name() else {
        return Ok(None);
    };
    if step.skips(name) {
        return Ok(None);
    }
    let Some(gen) = ctx.overrides().and_then(|ov| ov.get(name)) else {
        return Ok(None);
    };
    let size = ctx.size().saturating_sub(OVERRIDE_SIZE_DECREMENT);
    tracing::trace!(%name, size, "override replaces structural generator");
    gen.generate(&mut ctx.with_size(size)).map(Some)
}

fn follow_reference(
    ctx: &mut GenContext<'_>,
    ty: &Type,
    name: &Name,
    step: Step<'_>,
) -> Result<Value, GenError> {
    let target = lookup_name(name, ty.module()).map_err(|_| {
        tracing::error!(%name, "unresolved reference: schema graph is ill-formed");
        GenError::UnresolvedReference { name: name.clone() }
    })?;
    if step.hops > ty.module().len() {
        tracing::error!(%name, "reference loop never reaches a generatable shape");
        return Err(GenError::IndirectionCycle { name: name.clone() });
    }
    let next = Step {
        hops: step.hops + 1,
        skip: step.skip,
    };
    synth(ctx, &target, next)
}

/// One value per field, in declared order.
fn synth_fields(
    ctx: &mut GenContext<'_>,
    owner: &Type,
    fields: &[Field],
) -> Result<Vec<Value>, GenError> {
    fields
        .iter()
        .map(|field| generate_value(ctx, &owner.child(field.field_type())))
        .collect()
}
