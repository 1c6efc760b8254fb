//! Core trait definitions for the GA framework.
//!
//! The two central traits — [`Individual`] and [`GaProblem`] — define the
//! contract between the generic GA engine and domain-specific problem
//! implementations. [`Tendency`] fixes which end of the fitness scale is
//! better, so the same engine serves cost-minimizing and score-maximizing
//! problems.

use std::cmp::Ordering;

use rand::Rng;

/// Optimization direction of a fitness value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tendency {
    /// Lower fitness is better.
    #[default]
    Minimize,
    /// Higher fitness is better.
    Maximize,
}

impl Tendency {
    /// Returns `true` if `a` is strictly better than `b`.
    pub fn is_better<F: PartialOrd>(self, a: F, b: F) -> bool {
        match self {
            Tendency::Minimize => a < b,
            Tendency::Maximize => a > b,
        }
    }

    /// Ordering that sorts the best fitness first.
    ///
    /// Incomparable values (NaN) compare equal.
    pub fn best_first<F: PartialOrd>(self, a: &F, b: &F) -> Ordering {
        let ord = a.partial_cmp(b).unwrap_or(Ordering::Equal);
        match self {
            Tendency::Minimize => ord,
            Tendency::Maximize => ord.reverse(),
        }
    }
}

/// Marker trait for fitness values.
///
/// Fitness must support comparison and be cheaply copyable.
/// Built-in implementations exist for `f64` and `f32`.
pub trait Fitness: PartialOrd + Copy + Send + Sync + std::fmt::Debug + 'static {
    /// Returns the worst possible fitness under `tendency`.
    ///
    /// Used for individuals that have not been evaluated yet.
    fn worst(tendency: Tendency) -> Self;

    /// Converts the fitness to `f64` for logging and statistics.
    fn to_f64(self) -> f64;
}

impl Fitness for f64 {
    fn worst(tendency: Tendency) -> Self {
        match tendency {
            Tendency::Minimize => f64::INFINITY,
            Tendency::Maximize => f64::NEG_INFINITY,
        }
    }

    fn to_f64(self) -> f64 {
        self
    }
}

impl Fitness for f32 {
    fn worst(tendency: Tendency) -> Self {
        match tendency {
            Tendency::Minimize => f32::INFINITY,
            Tendency::Maximize => f32::NEG_INFINITY,
        }
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

/// A candidate solution in the GA population.
///
/// Individuals carry their own fitness value. The engine calls
/// [`GaProblem::assign_fitness`] on every new individual and reads
/// [`fitness`](Individual::fitness) only after the whole generation has
/// been scored.
pub trait Individual: Clone + Send + Sync {
    /// The fitness type. Must implement [`Fitness`].
    type Fitness: Fitness;

    /// Returns the current fitness of this individual.
    fn fitness(&self) -> Self::Fitness;

    /// Sets the fitness of this individual.
    fn set_fitness(&mut self, fitness: Self::Fitness);
}

/// Defines a GA optimization problem.
///
/// This is the strategy boundary between the engine and a domain. It
/// covers:
///
/// 1. **Initialization**: How to create random individuals
/// 2. **Evaluation**: How to compute fitness
/// 3. **Crossover**: How to recombine two parents
/// 4. **Mutation**: How to perturb an individual
///
/// Operators decide for themselves how often they fire (crossover and
/// mutation probabilities belong to the problem, not the engine).
///
/// # Thread Safety
///
/// `GaProblem` must be `Send + Sync` because the GA runner may evaluate
/// individuals in parallel using rayon.
pub trait GaProblem: Send + Sync {
    /// The individual (solution) type for this problem.
    type Individual: Individual;

    /// Creates a random individual.
    fn create_individual<R: Rng>(&self, rng: &mut R) -> Self::Individual;

    /// Evaluates an individual and returns its fitness.
    ///
    /// Must be a pure function of the individual: the engine may call it
    /// concurrently across the population.
    fn evaluate(&self, individual: &Self::Individual) -> <Self::Individual as Individual>::Fitness;

    /// Evaluates an individual and stores the result on it.
    ///
    /// Override to attach evaluation details beyond the fitness value.
    fn assign_fitness(&self, individual: &mut Self::Individual) {
        let fitness = self.evaluate(individual);
        individual.set_fitness(fitness);
    }

    /// Produces one or two offspring by recombining two parents.
    ///
    /// The default implementation clones parent1 (no crossover).
    fn crossover<R: Rng>(
        &self,
        parent1: &Self::Individual,
        _parent2: &Self::Individual,
        _rng: &mut R,
    ) -> Vec<Self::Individual> {
        vec![parent1.clone()]
    }

    /// Mutates an individual in place.
    ///
    /// The default implementation is a no-op.
    fn mutate<R: Rng>(&self, _individual: &mut Self::Individual, _rng: &mut R) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tendency_is_better() {
        assert!(Tendency::Minimize.is_better(1.0, 2.0));
        assert!(!Tendency::Minimize.is_better(2.0, 2.0));
        assert!(Tendency::Maximize.is_better(3.0, 2.0));
    }

    #[test]
    fn test_best_first_sort() {
        let mut v = vec![3.0, 1.0, 2.0];
        v.sort_by(|a, b| Tendency::Maximize.best_first(a, b));
        assert_eq!(v, vec![3.0, 2.0, 1.0]);
        v.sort_by(|a, b| Tendency::Minimize.best_first(a, b));
        assert_eq!(v, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_worst() {
        assert_eq!(f64::worst(Tendency::Minimize), f64::INFINITY);
        assert_eq!(f64::worst(Tendency::Maximize), f64::NEG_INFINITY);
        assert!(Tendency::Maximize.is_better(0.0, f64::worst(Tendency::Maximize)));
    }
}
