//! # dxi-schema — Schema Type Model
//!
//! The immutable type graph that every value in the interchange layer is
//! checked against and generated from. Schema compilers build it once; the
//! value, validation, and generation crates only read it.
//!
//! ## Key Design Principles
//!
//! 1. **Closed shape enum.** [`TypeExpr`] has exactly one variant per schema
//!    shape. Validators and generators match on it exhaustively, so adding a
//!    shape forces every consumer to handle it.
//!
//! 2. **Flat registry, named edges.** Named definitions live in a flat
//!    [`Module`] table keyed by [`Name`]. A [`TypeExpr::Reference`] holds only
//!    the name, never the target node, so recursive schemas need no
//!    self-owning structures.
//!
//! 3. **Handles carry their module.** A [`Type`] pairs a node with the module
//!    its references resolve against. Cloning a `Type` is two reference-count
//!    bumps.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `dxi-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod module;
pub mod name;
pub mod types;

pub use error::SchemaError;
pub use module::{lookup_name, Module, ModuleBuilder};
pub use name::Name;
pub use types::{base_type, Case, Field, ShapeTag, Type, TypeExpr};
