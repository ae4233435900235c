//! # Sampling Configuration
//!
//! Size budget and seed for drawing sample values outside a property-test
//! runner: fixtures, corpus files, reproducing a failure by seed.
//!
//! ## Environment
//!
//! ```bash
//! export DXI_GEN_SIZE=50       # size budget, default 30
//! export DXI_GEN_SEED=1234     # fixed seed, default: fresh entropy
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, GenError};
use crate::generator::{GenContext, Generator};

/// Variable holding the size budget.
pub const SIZE_VAR: &str = "DXI_GEN_SIZE";

/// Variable holding the seed.
pub const SEED_VAR: &str = "DXI_GEN_SEED";

/// Default size budget.
pub const DEFAULT_SIZE: usize = 30;

/// How sample values are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenConfig {
    /// Size budget handed to the root generator.
    pub size: usize,
    /// Fixed seed. `None` draws a fresh seed per [`sample`](Self::sample).
    pub seed: Option<u64>,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            seed: None,
        }
    }
}

impl GenConfig {
    /// Read [`SIZE_VAR`] and [`SEED_VAR`] from the process environment.
    /// Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidVar`] when a variable is set but does not
    /// parse as a non-negative integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// As [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(raw) = lookup(SIZE_VAR) {
            config.size = parse_var(SIZE_VAR, &raw)?;
        }
        if let Some(raw) = lookup(SEED_VAR) {
            config.seed = Some(parse_var(SEED_VAR, &raw)?);
        }
        Ok(config)
    }

    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The random source for one sampling run, and the seed it was built
    /// from.
    pub fn rng(&self) -> (StdRng, u64) {
        let seed = self.seed.unwrap_or_else(|| rand::thread_rng().gen());
        (StdRng::seed_from_u64(seed), seed)
    }

    /// Draw `n` values from `gen`.
    ///
    /// # Errors
    ///
    /// The first fatal [`GenError`] from `gen`. Earlier draws are discarded.
    pub fn sample<T>(&self, gen: &impl Generator<T>, n: usize) -> Result<Vec<T>, GenError> {
        let (mut rng, seed) = self.rng();
        tracing::debug!(seed, size = self.size, n, "sampling");
        let mut ctx = GenContext::new(&mut rng, self.size);
        (0..n).map(|_| gen.generate(&mut ctx)).collect()
    }
}

fn parse_var<T>(var: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidVar {
        var,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::from_fn;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = GenConfig::from_lookup(env(&[])).unwrap();
        assert_eq!(config, GenConfig::default());
        assert_eq!(config.size, 30);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_reads_both_vars() {
        let config = GenConfig::from_lookup(env(&[(SIZE_VAR, "50"), (SEED_VAR, " 1234 ")])).unwrap();
        assert_eq!(config.size, 50);
        assert_eq!(config.seed, Some(1234));
    }

    #[test]
    fn test_malformed_var_is_error() {
        let err = GenConfig::from_lookup(env(&[(SIZE_VAR, "-3")])).unwrap_err();
        let ConfigError::InvalidVar { var, value, .. } = err;
        assert_eq!(var, SIZE_VAR);
        assert_eq!(value, "-3");
    }

    #[test]
    fn test_deserialize_partial_uses_defaults() {
        let config: GenConfig = serde_json::from_str(r#"{"seed": 9}"#).unwrap();
        assert_eq!(config, GenConfig::default().with_seed(9));
    }

    #[test]
    fn test_fixed_seed_is_reproducible() {
        let gen = from_fn(|ctx| Ok(ctx.rng().gen::<u64>()));
        let config = GenConfig::default().with_seed(42);
        assert_eq!(config.sample(&gen, 5).unwrap(), config.sample(&gen, 5).unwrap());
    }

    #[test]
    fn test_sample_passes_size() {
        let gen = from_fn(|ctx| Ok(ctx.size()));
        let config = GenConfig::default().with_size(7).with_seed(1);
        assert_eq!(config.sample(&gen, 3).unwrap(), vec![7, 7, 7]);
    }

    #[test]
    fn test_sample_stops_at_first_error() {
        let gen = from_fn(|_ctx| Err::<u8, _>(GenError::EmptyChoice("test".into())));
        assert!(GenConfig::default().sample(&gen, 3).is_err());
    }
}
