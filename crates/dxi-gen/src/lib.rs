//! # dxi-gen — Randomized Value Generation
//!
//! Produces arbitrary well-typed [`Value`](dxi_value::Value)s for a schema
//! [`Type`](dxi_schema::Type), for property-based tests of codecs and
//! converters built on the value layer.
//!
//! ## Model
//!
//! A [`Generator`] draws from a [`GenContext`]: a random source plus a
//! non-negative size budget. Containers grow with the budget. Combinators
//! in [`generator`] cover the usual building blocks (`scale`, `frequency`,
//! `list_of`, ...).
//!
//! ## Recursive Schemas
//!
//! Structural generation follows the schema and never stops on its own for
//! a recursive type. Callers register an [`Overrides`] entry for each named
//! type on a cycle ([`Module::recursive_names`](dxi_schema::Module::recursive_names)
//! lists them). Before an override runs, the size budget drops by
//! [`OVERRIDE_SIZE_DECREMENT`]; the override is expected to return a base
//! case once the budget is small.
//!
//! ## Errors
//!
//! An unresolvable reference is a broken schema, not a bad draw:
//! generation stops with [`GenError::UnresolvedReference`] and is not
//! retried.

pub mod config;
pub mod error;
pub mod generator;
pub mod overrides;
pub mod primitive;
pub mod strategy;
pub mod value;

pub use config::GenConfig;
pub use error::{ConfigError, GenError};
pub use generator::{BoxGen, GenContext, Generator};
pub use overrides::Overrides;
pub use strategy::{value_strategy, ValueStrategy};
pub use value::{
    gen_value, gen_value_plain, generate_structural, generate_value, ValueGen,
    OPTIONAL_NONE_WEIGHT, OPTIONAL_SOME_WEIGHT, OVERRIDE_SIZE_DECREMENT,
};
