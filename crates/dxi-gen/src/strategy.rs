//! # proptest Adapter
//!
//! Lets a schema type drive `proptest!` directly:
//!
//! ```ignore
//! proptest! {
//!     #[test]
//!     fn roundtrip(v in value_strategy(&overrides, &invoice_type)) {
//!         prop_assert_eq!(decode(&encode(&v)), v);
//!     }
//! }
//! ```
//!
//! Each case takes a `u64` from the runner's RNG and seeds a `StdRng` with
//! it, so a failing case replays under proptest's persisted seed. Values
//! do not shrink. A fatal generator error aborts the case with the error
//! text as the reason.

use proptest::arbitrary::any;
use proptest::strategy::{Just, NewTree, Strategy, ValueTree};
use proptest::test_runner::TestRunner;
use rand::rngs::StdRng;
use rand::SeedableRng;

use dxi_schema::Type;
use dxi_value::Value;

use crate::config::DEFAULT_SIZE;
use crate::generator::{GenContext, Generator};
use crate::overrides::Overrides;
use crate::value::{gen_value, ValueGen};

/// A proptest strategy producing values of one type.
#[derive(Debug, Clone)]
pub struct ValueStrategy {
    gen: ValueGen,
    size: usize,
}

impl ValueStrategy {
    /// Override the size budget (default 30).
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

/// Strategy for values of `ty` under `overrides`.
pub fn value_strategy(overrides: &Overrides, ty: &Type) -> ValueStrategy {
    ValueStrategy {
        gen: gen_value(overrides, ty),
        size: DEFAULT_SIZE,
    }
}

impl Strategy for ValueStrategy {
    type Tree = Just<Value>;
    type Value = Value;

    fn new_tree(&self, runner: &mut TestRunner) -> NewTree<Self> {
        let seed = any::<u64>().new_tree(runner)?.current();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut ctx = GenContext::new(&mut rng, self.size);
        self.gen
            .generate(&mut ctx)
            .map(Just)
            .map_err(|e| e.to_string().into())
    }
}
