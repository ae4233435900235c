//! # Sized Generators
//!
//! The generator abstraction the value generator is written against: a
//! [`Generator`] draws a `T` from a [`GenContext`], which carries the random
//! source, the size budget, and the override table in effect.
//!
//! The size budget is a plain number copied into each context. Changing it
//! (see [`scale`], [`resize`], [`GenContext::with_size`]) makes a child
//! context and leaves the parent untouched, so nothing needs restoring on
//! the way out.

use std::marker::PhantomData;
use std::sync::Arc;

use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use crate::error::GenError;
use crate::overrides::Overrides;

// ─── Context ─────────────────────────────────────────────────────────

/// Random source, size budget, and override table for one draw.
pub struct GenContext<'a> {
    rng: &'a mut dyn RngCore,
    size: usize,
    overrides: Option<&'a Overrides>,
}

impl<'a> GenContext<'a> {
    /// A context with no overrides installed.
    pub fn new(rng: &'a mut dyn RngCore, size: usize) -> Self {
        Self {
            rng,
            size,
            overrides: None,
        }
    }

    /// The current size budget.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn rng(&mut self) -> &mut (dyn RngCore + 'a) {
        &mut *self.rng
    }

    /// The override table installed by the innermost value generator.
    pub fn overrides(&self) -> Option<&'a Overrides> {
        self.overrides
    }

    /// A child context sharing the random source, with budget `size`.
    pub fn with_size(&mut self, size: usize) -> GenContext<'_> {
        GenContext {
            rng: &mut *self.rng,
            size,
            overrides: self.overrides,
        }
    }

    /// A child context sharing the random source and budget, with
    /// `overrides` in effect.
    pub fn with_overrides<'b>(&'b mut self, overrides: &'b Overrides) -> GenContext<'b> {
        GenContext {
            rng: &mut *self.rng,
            size: self.size,
            overrides: Some(overrides),
        }
    }

    /// Uniform length in `0..=size`.
    pub(crate) fn sized_len(&mut self) -> usize {
        let size = self.size;
        self.rng.gen_range(0..=size)
    }
}

// ─── Trait ───────────────────────────────────────────────────────────

/// A producer of pseudo-random `T`s.
pub trait Generator<T>: Send + Sync {
    fn generate(&self, ctx: &mut GenContext<'_>) -> Result<T, GenError>;

    fn boxed(self) -> BoxGen<T>
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }
}

pub type BoxGen<T> = Box<dyn Generator<T>>;

impl<T, G: Generator<T> + ?Sized> Generator<T> for Box<G> {
    fn generate(&self, ctx: &mut GenContext<'_>) -> Result<T, GenError> {
        (**self).generate(ctx)
    }
}

impl<T, G: Generator<T> + ?Sized> Generator<T> for Arc<G> {
    fn generate(&self, ctx: &mut GenContext<'_>) -> Result<T, GenError> {
        (**self).generate(ctx)
    }
}

impl<T, G: Generator<T> + ?Sized> Generator<T> for &G {
    fn generate(&self, ctx: &mut GenContext<'_>) -> Result<T, GenError> {
        (**self).generate(ctx)
    }
}

// ─── Combinators ─────────────────────────────────────────────────────

/// Generator backed by a closure.
pub struct FromFn<F>(F);

pub fn from_fn<T, F>(f: F) -> FromFn<F>
where
    F: Fn(&mut GenContext<'_>) -> Result<T, GenError> + Send + Sync,
{
    FromFn(f)
}

impl<T, F> Generator<T> for FromFn<F>
where
    F: Fn(&mut GenContext<'_>) -> Result<T, GenError> + Send + Sync,
{
    fn generate(&self, ctx: &mut GenContext<'_>) -> Result<T, GenError> {
        (self.0)(ctx)
    }
}

/// Always the same value.
pub struct Constant<T>(T);

pub fn constant<T: Clone + Send + Sync>(value: T) -> Constant<T> {
    Constant(value)
}

impl<T: Clone + Send + Sync> Generator<T> for Constant<T> {
    fn generate(&self, _ctx: &mut GenContext<'_>) -> Result<T, GenError> {
        Ok(self.0.clone())
    }
}

/// Build the generator from the current size budget.
pub struct SizedGen<F>(F);

pub fn sized<T, G, F>(f: F) -> SizedGen<F>
where
    F: Fn(usize) -> G + Send + Sync,
    G: Generator<T>,
{
    SizedGen(f)
}

impl<T, G, F> Generator<T> for SizedGen<F>
where
    F: Fn(usize) -> G + Send + Sync,
    G: Generator<T>,
{
    fn generate(&self, ctx: &mut GenContext<'_>) -> Result<T, GenError> {
        (self.0)(ctx.size()).generate(ctx)
    }
}

/// Run `gen` with the budget transformed by `f`.
pub struct Scale<F, G> {
    f: F,
    gen: G,
}

pub fn scale<T, F, G>(f: F, gen: G) -> Scale<F, G>
where
    F: Fn(usize) -> usize + Send + Sync,
    G: Generator<T>,
{
    Scale { f, gen }
}

/// Run `gen` with the budget fixed at `size`.
pub fn resize<T, G>(size: usize, gen: G) -> Scale<impl Fn(usize) -> usize + Send + Sync, G>
where
    G: Generator<T>,
{
    scale(move |_| size, gen)
}

impl<T, F, G> Generator<T> for Scale<F, G>
where
    F: Fn(usize) -> usize + Send + Sync,
    G: Generator<T>,
{
    fn generate(&self, ctx: &mut GenContext<'_>) -> Result<T, GenError> {
        let size = (self.f)(ctx.size());
        self.gen.generate(&mut ctx.with_size(size))
    }
}

/// Uniform choice among fixed values.
pub struct Elements<T>(Vec<T>);

pub fn elements<T: Clone + Send + Sync>(items: Vec<T>) -> Elements<T> {
    Elements(items)
}

impl<T: Clone + Send + Sync> Generator<T> for Elements<T> {
    fn generate(&self, ctx: &mut GenContext<'_>) -> Result<T, GenError> {
        self.0
            .choose(ctx.rng())
            .cloned()
            .ok_or_else(|| GenError::EmptyChoice("elements".into()))
    }
}

/// Uniform choice among generators.
pub struct OneOf<T>(Vec<BoxGen<T>>);

pub fn one_of<T>(gens: Vec<BoxGen<T>>) -> OneOf<T> {
    OneOf(gens)
}

impl<T> Generator<T> for OneOf<T> {
    fn generate(&self, ctx: &mut GenContext<'_>) -> Result<T, GenError> {
        let picked = self
            .0
            .choose(ctx.rng())
            .ok_or_else(|| GenError::EmptyChoice("one_of".into()))?;
        picked.generate(ctx)
    }
}

/// Weighted choice among generators.
pub struct Frequency<T>(Vec<(u32, BoxGen<T>)>);

pub fn frequency<T>(weighted: Vec<(u32, BoxGen<T>)>) -> Frequency<T> {
    Frequency(weighted)
}

impl<T> Generator<T> for Frequency<T> {
    fn generate(&self, ctx: &mut GenContext<'_>) -> Result<T, GenError> {
        let weights: Vec<u32> = self.0.iter().map(|(w, _)| *w).collect();
        let i = weighted_index(ctx, &weights)?;
        self.0[i].1.generate(ctx)
    }
}

/// Index `i` with probability `weights[i] / sum(weights)`.
pub fn weighted_index(ctx: &mut GenContext<'_>, weights: &[u32]) -> Result<usize, GenError> {
    let dist = WeightedIndex::<u32>::new(weights)
        .map_err(|e| GenError::EmptyChoice(format!("frequency: {e}")))?;
    Ok(dist.sample(ctx.rng()))
}

/// Variable-length list, length uniform in `0..=size`.
pub struct ListOf<G, T> {
    gen: G,
    _item: PhantomData<fn() -> T>,
}

pub fn list_of<T, G: Generator<T>>(gen: G) -> ListOf<G, T> {
    ListOf {
        gen,
        _item: PhantomData,
    }
}

impl<T, G: Generator<T>> Generator<Vec<T>> for ListOf<G, T> {
    fn generate(&self, ctx: &mut GenContext<'_>) -> Result<Vec<T>, GenError> {
        let len = ctx.sized_len();
        (0..len).map(|_| self.gen.generate(ctx)).collect()
    }
}

/// Exactly `len` draws.
pub struct VectorOf<G, T> {
    len: usize,
    gen: G,
    _item: PhantomData<fn() -> T>,
}

pub fn vector_of<T, G: Generator<T>>(len: usize, gen: G) -> VectorOf<G, T> {
    VectorOf {
        len,
        gen,
        _item: PhantomData,
    }
}

impl<T, G: Generator<T>> Generator<Vec<T>> for VectorOf<G, T> {
    fn generate(&self, ctx: &mut GenContext<'_>) -> Result<Vec<T>, GenError> {
        (0..self.len).map(|_| self.gen.generate(ctx)).collect()
    }
}
