//! # Module Registry
//!
//! A [`Module`] is the flat table of named definitions that `Reference`
//! nodes resolve against. Recursive schemas are expressed as definitions
//! whose bodies reference their own name, directly or through other
//! definitions; the table itself never holds a cycle.
//!
//! ## Well-Formedness
//!
//! A module is well formed when every definition passes the structural
//! checks of [`TypeExpr::check_structure`] and every `Reference` reachable
//! from a definition names another definition in the same module.
//! [`ModuleBuilder::build`] enforces the structural half; the reference
//! half is checked on demand by [`Module::check_well_formed`] so that
//! modules can be assembled before all of their dependencies are known.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;
use crate::name::Name;
use crate::types::{Type, TypeExpr};

/// A registry of named type definitions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Module {
    definitions: BTreeMap<Name, Arc<TypeExpr>>,
}

impl Module {
    pub fn builder() -> ModuleBuilder {
        ModuleBuilder::default()
    }

    /// The definition registered under `name`, if any.
    pub fn get(&self, name: &Name) -> Option<&Arc<TypeExpr>> {
        self.definitions.get(name)
    }

    pub fn contains(&self, name: &Name) -> bool {
        self.definitions.contains_key(name)
    }

    /// Defined names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &Name> {
        self.definitions.keys()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Verify structure and reference closure of every definition.
    ///
    /// # Errors
    ///
    /// Returns the first structural error found, or
    /// [`SchemaError::UnresolvedName`] for the first reference (in name
    /// order) whose target is not defined here.
    pub fn check_well_formed(&self) -> Result<(), SchemaError> {
        for expr in self.definitions.values() {
            expr.check_structure()?;
        }
        for expr in self.definitions.values() {
            for target in references_in(expr) {
                if !self.contains(&target) {
                    return Err(SchemaError::UnresolvedName(target));
                }
            }
        }
        Ok(())
    }

    /// Names whose definitions can reach themselves through one or more
    /// `Reference` hops.
    ///
    /// Structural generation for these names does not terminate on its own;
    /// they need generator overrides. Dangling references are ignored.
    pub fn recursive_names(&self) -> BTreeSet<Name> {
        let edges: BTreeMap<&Name, BTreeSet<Name>> = self
            .definitions
            .iter()
            .map(|(name, expr)| {
                let targets = references_in(expr)
                    .into_iter()
                    .filter(|t| self.contains(t))
                    .collect();
                (name, targets)
            })
            .collect();

        edges
            .keys()
            .filter(|start| reaches(&edges, start, start))
            .map(|name| (*name).clone())
            .collect()
    }
}

/// Resolve `name` in `module`, producing a handle bound to the same module.
///
/// # Errors
///
/// [`SchemaError::UnresolvedName`] when the module has no such definition.
pub fn lookup_name(name: &Name, module: &Arc<Module>) -> Result<Type, SchemaError> {
    module
        .get(name)
        .map(|expr| Type::new(Arc::clone(module), Arc::clone(expr)))
        .ok_or_else(|| SchemaError::UnresolvedName(name.clone()))
}

/// Every name referenced from `expr` without following references.
fn references_in(expr: &TypeExpr) -> BTreeSet<Name> {
    fn walk(expr: &TypeExpr, out: &mut BTreeSet<Name>) -> Result<(), std::convert::Infallible> {
        if let TypeExpr::Reference { name } = expr {
            out.insert(name.clone());
        }
        expr.for_each_child(&mut |child| walk(child, out))
    }

    let mut out = BTreeSet::new();
    let _ = walk(expr, &mut out);
    out
}

/// Whether `target` is reachable from `start` in one or more steps.
fn reaches(edges: &BTreeMap<&Name, BTreeSet<Name>>, start: &Name, target: &Name) -> bool {
    let mut visited = BTreeSet::new();
    let mut stack: Vec<&Name> = edges
        .get(start)
        .map(|ts| ts.iter().collect())
        .unwrap_or_default();

    while let Some(current) = stack.pop() {
        if current == target {
            return true;
        }
        if !visited.insert(current) {
            continue;
        }
        if let Some(next) = edges.get(current) {
            stack.extend(next.iter());
        }
    }
    false
}

// ─── Builder ─────────────────────────────────────────────────────────

/// Incremental construction of a [`Module`].
#[derive(Debug, Default)]
pub struct ModuleBuilder {
    definitions: BTreeMap<Name, Arc<TypeExpr>>,
    error: Option<SchemaError>,
}

impl ModuleBuilder {
    /// Register `expr` under `name`. The first error is kept and reported by
    /// [`build`](Self::build).
    pub fn define(mut self, name: Name, expr: impl Into<Arc<TypeExpr>>) -> Self {
        if self.error.is_some() {
            return self;
        }
        let expr = expr.into();
        if let Err(e) = expr.check_structure() {
            self.error = Some(e);
        } else if self.definitions.contains_key(&name) {
            self.error = Some(SchemaError::DuplicateDefinition(name));
        } else {
            self.definitions.insert(name, expr);
        }
        self
    }

    /// Register a named node under its own name.
    ///
    /// Unnamed nodes are rejected with [`SchemaError::InvalidName`].
    pub fn define_named(self, expr: TypeExpr) -> Self {
        match expr.name().cloned() {
            Some(name) => self.define(name, expr),
            None => {
                let shape = expr.shape();
                self.fail(SchemaError::InvalidName {
                    input: String::new(),
                    reason: format!("{shape} node carries no name"),
                })
            }
        }
    }

    fn fail(mut self, error: SchemaError) -> Self {
        self.error.get_or_insert(error);
        self
    }

    /// Finish the module.
    ///
    /// # Errors
    ///
    /// The first structural or duplicate-definition error seen by
    /// [`define`](Self::define).
    pub fn build(self) -> Result<Arc<Module>, SchemaError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(Arc::new(Module {
                definitions: self.definitions,
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Case, Field};

    fn name(s: &str) -> Name {
        Name::parse(s).unwrap()
    }

    /// `List = Nil | Cons(head: Int32, tail: List)`
    fn int_list() -> TypeExpr {
        TypeExpr::variant(
            name("t.List"),
            vec![
                Case::unit("Nil"),
                Case::new(
                    "Cons",
                    vec![
                        Field::new("head", TypeExpr::Int32),
                        Field::new("tail", TypeExpr::reference(name("t.List"))),
                    ],
                ),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_lookup_resolves_definition() {
        let module = Module::builder().define_named(int_list()).build().unwrap();
        let ty = lookup_name(&name("t.List"), &module).unwrap();
        assert_eq!(ty.name(), Some(&name("t.List")));
        assert!(Arc::ptr_eq(ty.module(), &module));
    }

    #[test]
    fn test_lookup_missing_is_unresolved() {
        let module = Module::builder().build().unwrap();
        let err = lookup_name(&name("missing.Type"), &module).unwrap_err();
        assert_eq!(err, SchemaError::UnresolvedName(name("missing.Type")));
    }

    #[test]
    fn test_duplicate_definition_rejected() {
        let err = Module::builder()
            .define(name("a.X"), TypeExpr::Int32)
            .define(name("a.X"), TypeExpr::Bool)
            .build()
            .unwrap_err();
        assert_eq!(err, SchemaError::DuplicateDefinition(name("a.X")));
    }

    #[test]
    fn test_define_named_rejects_unnamed() {
        assert!(Module::builder().define_named(TypeExpr::Bool).build().is_err());
    }

    #[test]
    fn test_check_well_formed_reports_dangling_reference() {
        let module = Module::builder()
            .define(name("a.Wrapper"), TypeExpr::array(TypeExpr::reference(name("a.Gone"))))
            .build()
            .unwrap();
        assert_eq!(
            module.check_well_formed(),
            Err(SchemaError::UnresolvedName(name("a.Gone")))
        );
    }

    #[test]
    fn test_check_well_formed_accepts_closed_module() {
        let module = Module::builder().define_named(int_list()).build().unwrap();
        assert!(module.check_well_formed().is_ok());
    }

    #[test]
    fn test_recursive_names_direct_cycle() {
        let module = Module::builder().define_named(int_list()).build().unwrap();
        let rec = module.recursive_names();
        assert_eq!(rec.into_iter().collect::<Vec<_>>(), vec![name("t.List")]);
    }

    #[test]
    fn test_recursive_names_mutual_cycle() {
        // Tree = { children: [Forest] }, Forest = Newtype [Tree], Leaf = Int32
        let module = Module::builder()
            .define_named(
                TypeExpr::record(
                    name("t.Tree"),
                    vec![Field::new(
                        "children",
                        TypeExpr::reference(name("t.Forest")),
                    )],
                )
                .unwrap(),
            )
            .define_named(TypeExpr::newtype(
                name("t.Forest"),
                TypeExpr::array(TypeExpr::reference(name("t.Tree"))),
            ))
            .define_named(TypeExpr::newtype(name("t.Leaf"), TypeExpr::Int32))
            .define_named(TypeExpr::newtype(
                name("t.UsesTree"),
                TypeExpr::reference(name("t.Tree")),
            ))
            .build()
            .unwrap();

        let rec = module.recursive_names();
        assert!(rec.contains(&name("t.Tree")));
        assert!(rec.contains(&name("t.Forest")));
        assert!(!rec.contains(&name("t.Leaf")));
        // Reaches a cycle but is not on one.
        assert!(!rec.contains(&name("t.UsesTree")));
    }

    #[test]
    fn test_module_serde_roundtrip() {
        let module = Module::builder().define_named(int_list()).build().unwrap();
        let json = serde_json::to_string(module.as_ref()).unwrap();
        let back: Module = serde_json::from_str(&json).unwrap();
        assert_eq!(&back, module.as_ref());
    }
}
