//! GA configuration.
//!
//! [`GaConfig`] holds the parameters that shape one generation of the
//! evolutionary loop. When to stop is not configuration: it is the
//! [`Termination`](super::Termination) passed to the runner.

use super::selection::Selection;
use super::types::Tendency;
use crate::error::{Error, Result};

/// Configuration for the Genetic Algorithm.
///
/// # Defaults
///
/// ```
/// use u_transit::ga::{GaConfig, Selection, Tendency};
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.selection, Selection::Tournament(3));
/// assert_eq!(config.tendency, Tendency::Minimize);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_transit::ga::{GaConfig, Selection, Tendency};
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_selection(Selection::Tournament(5))
///     .with_tendency(Tendency::Maximize)
///     .with_elite_ratio(0.1);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct GaConfig {
    /// Number of individuals in the population.
    ///
    /// Larger populations increase diversity but slow down each generation.
    pub population_size: usize,

    /// Selection strategy for choosing parents.
    pub selection: Selection,

    /// Fraction of the population preserved as elites (0.0–1.0).
    ///
    /// Elite individuals are copied unchanged to the next generation.
    /// Zero (the default) replaces the whole population every generation.
    pub elite_ratio: f64,

    /// Which end of the fitness scale is better.
    pub tendency: Tendency,

    /// Whether to evaluate individuals in parallel using rayon.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            selection: Selection::default(),
            elite_ratio: 0.0,
            tendency: Tendency::Minimize,
            parallel: true,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    /// Convenience builder for setting tournament size.
    ///
    /// Equivalent to `.with_selection(Selection::Tournament(k))`.
    pub fn with_tournament_size(self, k: usize) -> Self {
        self.with_selection(Selection::Tournament(k))
    }

    /// Sets the elite ratio.
    pub fn with_elite_ratio(mut self, ratio: f64) -> Self {
        self.elite_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    /// Sets the optimization direction.
    pub fn with_tendency(mut self, tendency: Tendency) -> Self {
        self.tendency = tendency;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of elites carried over each generation.
    pub fn elite_count(&self) -> usize {
        (self.population_size as f64 * self.elite_ratio) as usize
    }

    /// Validates the configuration.
    ///
    /// Returns [`Error::InvalidConfig`] describing the first bad parameter.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(Error::InvalidConfig(
                "population_size must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.elite_ratio) {
            return Err(Error::InvalidConfig(
                "elite_ratio must be in [0, 1]".into(),
            ));
        }
        if self.elite_count() >= self.population_size {
            return Err(Error::InvalidConfig(
                "elite_ratio too high: elites fill entire population".into(),
            ));
        }
        if self.selection == Selection::Tournament(0) {
            return Err(Error::InvalidConfig(
                "tournament size must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GaConfig::default();
        assert_eq!(config.population_size, 100);
        assert_eq!(config.selection, Selection::Tournament(3));
        assert!((config.elite_ratio - 0.0).abs() < 1e-15);
        assert_eq!(config.tendency, Tendency::Minimize);
        assert!(config.parallel);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GaConfig::default()
            .with_population_size(200)
            .with_selection(Selection::Rank)
            .with_elite_ratio(0.2)
            .with_tendency(Tendency::Maximize)
            .with_parallel(false)
            .with_seed(42);

        assert_eq!(config.population_size, 200);
        assert_eq!(config.selection, Selection::Rank);
        assert!((config.elite_ratio - 0.2).abs() < 1e-10);
        assert_eq!(config.elite_count(), 40);
        assert_eq!(config.tendency, Tendency::Maximize);
        assert!(!config.parallel);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_validate_ok() {
        assert!(GaConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_population() {
        let config = GaConfig::default().with_population_size(0);
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_elite_too_high() {
        let config = GaConfig::default()
            .with_population_size(10)
            .with_elite_ratio(1.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_tournament() {
        let config = GaConfig::default().with_tournament_size(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_clamp_elite_ratio() {
        let config = GaConfig::default().with_elite_ratio(1.5);
        assert!((config.elite_ratio - 1.0).abs() < 1e-10);
        let config = GaConfig::default().with_elite_ratio(-0.5);
        assert!((config.elite_ratio - 0.0).abs() < 1e-10);
    }
}
