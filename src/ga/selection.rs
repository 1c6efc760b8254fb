//! Selection strategies for the GA.
//!
//! Selection determines which individuals are chosen as parents for
//! crossover. Different strategies provide different selection pressure.
//! Every strategy samples with replacement and honors the run's
//! [`Tendency`].
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use rand::seq::index::sample;
use rand::Rng;

use super::types::{Fitness, Individual, Tendency};

/// Selection strategy for choosing parents.
///
/// # Examples
///
/// ```
/// use u_transit::ga::Selection;
///
/// // Tournament with size 3 (moderate selection pressure)
/// let sel = Selection::Tournament(3);
///
/// // Roulette wheel (fitness-proportionate)
/// let sel = Selection::Roulette;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Tournament selection: draw `k` distinct individuals uniformly,
    /// keep the best.
    ///
    /// Higher `k` = stronger selection pressure. Only the ordering of
    /// fitness values matters, so heavy-tailed fitness distributions do
    /// not distort it.
    ///
    /// # Complexity
    /// O(k) per selection
    Tournament(usize),

    /// Fitness-proportionate (roulette wheel) selection.
    ///
    /// Under [`Tendency::Maximize`] the weight is the fitness itself
    /// (negative values count as zero). Under [`Tendency::Minimize`] the
    /// weight is `max_fitness - fitness + ε`. Weights are scaled by their
    /// maximum before summing, so fitness near `f64::MAX` keeps its share.
    /// When the total weight is zero, selection falls back to uniform
    /// sampling.
    ///
    /// # Complexity
    /// O(n) per selection (linear scan)
    Roulette,

    /// Rank-based selection.
    ///
    /// Individuals are sorted best-first and the individual at rank `r`
    /// (0-based) gets weight `n - r`.
    ///
    /// Reference: Baker (1985), "Adaptive Selection Methods for Genetic
    /// Algorithms"
    ///
    /// # Complexity
    /// O(n log n) per selection (sort)
    Rank,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(3)
    }
}

impl Selection {
    /// Select a parent index from the population.
    ///
    /// # Panics
    /// Panics if `population` is empty.
    pub fn select<I: Individual, R: Rng>(
        &self,
        population: &[I],
        tendency: Tendency,
        rng: &mut R,
    ) -> usize {
        assert!(
            !population.is_empty(),
            "cannot select from empty population"
        );

        match self {
            Selection::Tournament(k) => tournament(population, *k, tendency, rng),
            Selection::Roulette => roulette(population, tendency, rng),
            Selection::Rank => rank(population, tendency, rng),
        }
    }
}

/// Tournament selection: pick k distinct individuals, return best.
fn tournament<I: Individual, R: Rng>(
    population: &[I],
    k: usize,
    tendency: Tendency,
    rng: &mut R,
) -> usize {
    let n = population.len();
    let k = k.clamp(1, n);

    let mut contenders = sample(rng, n, k).into_iter();
    let mut best_idx = contenders.next().unwrap_or(0);
    for idx in contenders {
        if tendency.is_better(population[idx].fitness(), population[best_idx].fitness()) {
            best_idx = idx;
        }
    }
    best_idx
}

/// Roulette wheel selection.
fn roulette<I: Individual, R: Rng>(population: &[I], tendency: Tendency, rng: &mut R) -> usize {
    let n = population.len();
    if n == 1 {
        return 0;
    }

    let fitnesses: Vec<f64> = population
        .iter()
        .map(|ind| ind.fitness().to_f64())
        .collect();

    let mut weights: Vec<f64> = match tendency {
        Tendency::Maximize => fitnesses.iter().map(|&f| f.max(0.0)).collect(),
        Tendency::Minimize => {
            let max_fitness = fitnesses.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let epsilon = 1e-10;
            // lower fitness -> higher weight
            fitnesses
                .iter()
                .map(|&f| (max_fitness - f + epsilon).max(epsilon))
                .collect()
        }
    };

    normalize(&mut weights);

    let total: f64 = weights.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return rng.random_range(0..n);
    }

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative > threshold {
            return i;
        }
    }

    n - 1 // floating-point fallback
}

/// Scales weights into `[0, 1]` so their sum cannot overflow.
///
/// Infinite weights share all of the mass. NaN weights count as zero.
fn normalize(weights: &mut [f64]) {
    let max = weights
        .iter()
        .copied()
        .filter(|w| !w.is_nan())
        .fold(0.0, f64::max);
    if max == f64::INFINITY {
        for w in weights.iter_mut() {
            *w = if *w == f64::INFINITY { 1.0 } else { 0.0 };
        }
    } else if max > 0.0 {
        for w in weights.iter_mut() {
            *w = if w.is_nan() { 0.0 } else { *w / max };
        }
    }
}

/// Rank-based selection using linear ranking.
fn rank<I: Individual, R: Rng>(population: &[I], tendency: Tendency, rng: &mut R) -> usize {
    let n = population.len();
    if n == 1 {
        return 0;
    }

    let mut indexed: Vec<(usize, f64)> = population
        .iter()
        .enumerate()
        .map(|(i, ind)| (i, ind.fitness().to_f64()))
        .collect();
    indexed.sort_by(|a, b| tendency.best_first(&a.1, &b.1));

    // rank 0 (best) gets weight n
    let total: f64 = (n * (n + 1)) as f64 / 2.0;
    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;

    for (rank, &(original_idx, _)) in indexed.iter().enumerate() {
        cumulative += (n - rank) as f64;
        if cumulative > threshold {
            return original_idx;
        }
    }

    indexed[n - 1].0 // floating-point fallback
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[derive(Clone)]
    struct TestInd {
        fit: f64,
    }

    impl Individual for TestInd {
        type Fitness = f64;
        fn fitness(&self) -> f64 {
            self.fit
        }
        fn set_fitness(&mut self, f: f64) {
            self.fit = f;
        }
    }

    fn make_population(fitnesses: &[f64]) -> Vec<TestInd> {
        fitnesses.iter().map(|&f| TestInd { fit: f }).collect()
    }

    fn counts(sel: Selection, pop: &[TestInd], tendency: Tendency) -> [u32; 4] {
        let mut rng = create_rng(42);
        let mut counts = [0u32; 4];
        for _ in 0..10_000 {
            counts[sel.select(pop, tendency, &mut rng)] += 1;
        }
        counts
    }

    #[test]
    fn test_full_tournament_always_picks_best() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0]);
        let c = counts(Selection::Tournament(4), &pop, Tendency::Minimize);
        assert_eq!(c[2], 10_000);
        let c = counts(Selection::Tournament(4), &pop, Tendency::Maximize);
        assert_eq!(c[0], 10_000);
    }

    #[test]
    fn test_tournament_size_1_is_random() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0]);
        let c = counts(Selection::Tournament(1), &pop, Tendency::Maximize);
        for &n in &c {
            assert!(n > 1500, "expected uniform, got counts: {c:?}");
        }
    }

    #[test]
    fn test_tournament_larger_than_population() {
        let pop = make_population(&[3.0, 9.0]);
        let mut rng = create_rng(1);
        assert_eq!(
            Selection::Tournament(10).select(&pop, Tendency::Maximize, &mut rng),
            1
        );
    }

    #[test]
    fn test_roulette_maximize_proportional() {
        let pop = make_population(&[0.0, 1.0, 3.0, 0.0]);
        let c = counts(Selection::Roulette, &pop, Tendency::Maximize);
        assert_eq!(c[0], 0);
        assert_eq!(c[3], 0);
        assert!(c[2] > 2 * c[1], "expected ~3:1, got {c:?}");
    }

    #[test]
    fn test_roulette_zero_total_is_uniform() {
        let pop = make_population(&[0.0, 0.0, 0.0, 0.0]);
        let c = counts(Selection::Roulette, &pop, Tendency::Maximize);
        for &n in &c {
            assert!(n > 1500, "expected uniform, got counts: {c:?}");
        }
    }

    #[test]
    fn test_roulette_keeps_pressure_at_max_fitness() {
        let pop = make_population(&[f64::MAX, f64::MAX, 1.0, 1.0]);
        let c = counts(Selection::Roulette, &pop, Tendency::Maximize);
        assert_eq!(c[0] + c[1], 10_000, "{c:?}");
        assert!(c[0] > 4000 && c[1] > 4000, "{c:?}");
    }

    #[test]
    fn test_roulette_infinite_fitness_takes_all() {
        let pop = make_population(&[2.0, f64::INFINITY, 5.0, 0.0]);
        let c = counts(Selection::Roulette, &pop, Tendency::Maximize);
        assert_eq!(c[1], 10_000, "{c:?}");
    }

    #[test]
    fn test_normalize() {
        let mut w = [f64::MAX, 0.0, f64::MAX / 2.0, f64::NAN];
        normalize(&mut w);
        assert_eq!(w, [1.0, 0.0, 0.5, 0.0]);
        let mut zeros = [0.0, 0.0];
        normalize(&mut zeros);
        assert_eq!(zeros, [0.0, 0.0]);
    }

    #[test]
    fn test_roulette_minimize_favors_lowest() {
        let pop = make_population(&[100.0, 50.0, 1.0, 80.0]);
        let c = counts(Selection::Roulette, &pop, Tendency::Minimize);
        assert!(c[2] > c[0], "best should be selected more often: {c:?}");
    }

    #[test]
    fn test_rank_follows_tendency() {
        let pop = make_population(&[100.0, 50.0, 1.0, 80.0]);
        let c = counts(Selection::Rank, &pop, Tendency::Minimize);
        assert!(c[2] > c[0], "{c:?}");
        let c = counts(Selection::Rank, &pop, Tendency::Maximize);
        assert!(c[0] > c[2], "{c:?}");
    }

    #[test]
    fn test_single_individual() {
        let pop = make_population(&[5.0]);
        let mut rng = create_rng(42);
        for t in [Tendency::Minimize, Tendency::Maximize] {
            assert_eq!(Selection::Tournament(3).select(&pop, t, &mut rng), 0);
            assert_eq!(Selection::Roulette.select(&pop, t, &mut rng), 0);
            assert_eq!(Selection::Rank.select(&pop, t, &mut rng), 0);
        }
    }

    #[test]
    #[should_panic(expected = "cannot select from empty population")]
    fn test_empty_population_panics() {
        let pop: Vec<TestInd> = vec![];
        let mut rng = create_rng(42);
        Selection::Tournament(3).select(&pop, Tendency::Minimize, &mut rng);
    }
}
