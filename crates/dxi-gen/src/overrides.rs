//! # Override Table
//!
//! Per-name replacement generators. When the value generator reaches a
//! named type (or a reference to one) that has an entry here, it runs the
//! entry instead of the structural generator, with the size budget reduced
//! by [`OVERRIDE_SIZE_DECREMENT`](crate::OVERRIDE_SIZE_DECREMENT).
//!
//! The table is an explicit value. It is cloned into each
//! [`ValueGen`](crate::ValueGen) and installed into the generation context
//! for the duration of a draw, never held in global state.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use dxi_schema::Name;
use dxi_value::Value;

use crate::generator::Generator;

/// A cheaply cloneable map from type name to replacement generator.
#[derive(Clone, Default)]
pub struct Overrides {
    table: Arc<HashMap<Name, Arc<dyn Generator<Value>>>>,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `gen` for `name`, replacing any previous entry.
    pub fn insert(&mut self, name: Name, gen: impl Generator<Value> + 'static) {
        Arc::make_mut(&mut self.table).insert(name, Arc::new(gen));
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, name: Name, gen: impl Generator<Value> + 'static) -> Self {
        self.insert(name, gen);
        self
    }

    pub fn get(&self, name: &Name) -> Option<&Arc<dyn Generator<Value>>> {
        self.table.get(name)
    }

    pub fn contains(&self, name: &Name) -> bool {
        self.table.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl fmt::Debug for Overrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<String> = self.table.keys().map(ToString::to_string).collect();
        names.sort();
        f.debug_struct("Overrides").field("names", &names).finish()
    }
}
