//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the complete evolutionary process:
//! initialization → evaluation → selection → crossover → mutation → repeat,
//! until the caller's [`Termination`] says stop.

use rand::Rng;
use rayon::prelude::*;

use super::config::GaConfig;
use super::termination::Termination;
use super::types::{Fitness, GaProblem, Individual, Tendency};
use crate::error::Result;
use crate::random::{create_rng, entropy_rng};

/// Mutable state of one run, handed to the termination rule each
/// generation.
///
/// Holds the current population and the best individual seen in any
/// generation so far. Each run owns its own state; nothing is shared
/// between runs.
#[derive(Debug, Clone)]
pub struct RunState<I: Individual> {
    generation: usize,
    population: Vec<I>,
    generation_best: usize,
    best: I,
    best_generation: usize,
    tendency: Tendency,
    fitness_history: Vec<f64>,
}

impl<I: Individual> RunState<I> {
    fn new(population: Vec<I>, tendency: Tendency) -> Self {
        let generation_best = find_best(&population, tendency);
        let best = population[generation_best].clone();
        let fitness_history = vec![best.fitness().to_f64()];
        Self {
            generation: 0,
            population,
            generation_best,
            best,
            best_generation: 0,
            tendency,
            fitness_history,
        }
    }

    /// Replaces the population with a fully evaluated next generation.
    fn advance(&mut self, population: Vec<I>) {
        self.generation += 1;
        self.population = population;
        self.generation_best = find_best(&self.population, self.tendency);

        let candidate = &self.population[self.generation_best];
        if self
            .tendency
            .is_better(candidate.fitness(), self.best.fitness())
        {
            self.best = candidate.clone();
            self.best_generation = self.generation;
        }
        self.fitness_history.push(self.best.fitness().to_f64());
    }

    /// Index of the current generation; the initial population is 0.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// The current, fully evaluated population.
    pub fn population(&self) -> &[I] {
        &self.population
    }

    /// Best individual of the current generation.
    pub fn generation_best(&self) -> &I {
        &self.population[self.generation_best]
    }

    /// Best individual seen in any generation so far.
    pub fn best(&self) -> &I {
        &self.best
    }

    /// Generation in which [`best`](Self::best) was found.
    pub fn best_generation(&self) -> usize {
        self.best_generation
    }

    /// Generations bred since the all-time best last improved.
    pub fn generations_since_improvement(&self) -> usize {
        self.generation - self.best_generation
    }

    /// Optimization direction of the run.
    pub fn tendency(&self) -> Tendency {
        self.tendency
    }

    /// All-time best fitness after each generation, initial population first.
    pub fn fitness_history(&self) -> &[f64] {
        &self.fitness_history
    }
}

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
pub struct GaResult<I: Individual> {
    /// The best individual found during the entire run.
    pub best: I,

    /// Best fitness value (same as `best.fitness()`).
    pub best_fitness: I::Fitness,

    /// Total number of generations bred after the initial population.
    pub generations: usize,

    /// All-time best fitness at the end of each generation.
    pub fitness_history: Vec<f64>,

    /// The final population.
    pub population: Vec<I>,
}

impl<I: Individual> From<RunState<I>> for GaResult<I> {
    fn from(state: RunState<I>) -> Self {
        Self {
            best_fitness: state.best.fitness(),
            best: state.best,
            generations: state.generation,
            fitness_history: state.fitness_history,
            population: state.population,
        }
    }
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```ignore
/// let problem = MyProblem::new();
/// let config = GaConfig::default().with_seed(42);
/// let result = GaRunner::run(&problem, &config, MaxGenerations(100))?;
/// println!("Best fitness: {:?}", result.best_fitness);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA optimization.
    ///
    /// Each generation is bred, then scored in full (in parallel when
    /// [`GaConfig::parallel`] is set) before the all-time best is updated
    /// and `termination` is consulted again.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfig`](crate::Error::InvalidConfig) if the
    /// configuration does not validate; no individual is created in that
    /// case.
    pub fn run<P, T>(
        problem: &P,
        config: &GaConfig,
        mut termination: T,
    ) -> Result<GaResult<P::Individual>>
    where
        P: GaProblem,
        T: Termination<P::Individual>,
    {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => entropy_rng(),
        };

        // 1. Initialize and evaluate
        let mut population: Vec<P::Individual> = (0..config.population_size)
            .map(|_| problem.create_individual(&mut rng))
            .collect();
        evaluate_population(problem, &mut population, config.parallel);

        let mut state = RunState::new(population, config.tendency);
        log::info!(
            "GA started: population {}, initial best fitness {:?}",
            config.population_size,
            state.best().fitness()
        );

        // 2. Evolutionary loop
        while termination.should_continue(&state) {
            let elite_count = config.elite_count();
            let mut next_gen = breed(problem, config, state.population(), &mut rng);

            // Elites keep their fitness; score only the offspring
            evaluate_population(problem, &mut next_gen[elite_count..], config.parallel);

            state.advance(next_gen);
            log::debug!(
                "generation {}: generation best {:?}, all-time best {:?}",
                state.generation(),
                state.generation_best().fitness(),
                state.best().fitness()
            );
        }

        log::info!(
            "GA finished after {} generations, best fitness {:?} (generation {})",
            state.generation(),
            state.best().fitness(),
            state.best_generation()
        );
        Ok(state.into())
    }
}

/// Builds the next generation: elites first, then offspring.
fn breed<P: GaProblem, R: Rng>(
    problem: &P,
    config: &GaConfig,
    population: &[P::Individual],
    rng: &mut R,
) -> Vec<P::Individual> {
    let size = config.population_size;
    let tendency = config.tendency;
    let elite_count = config.elite_count();

    let mut next_gen: Vec<P::Individual> = Vec::with_capacity(size);
    if elite_count > 0 {
        let mut order: Vec<usize> = (0..population.len()).collect();
        order.sort_by(|&a, &b| {
            tendency.best_first(&population[a].fitness(), &population[b].fitness())
        });
        next_gen.extend(order[..elite_count].iter().map(|&i| population[i].clone()));
    }

    while next_gen.len() < size {
        let p1 = config.selection.select(population, tendency, rng);
        let p2 = config.selection.select(population, tendency, rng);

        let mut children = problem.crossover(&population[p1], &population[p2], rng);
        if children.is_empty() {
            children.push(population[p1].clone());
        }

        for mut child in children {
            if next_gen.len() >= size {
                break;
            }
            problem.mutate(&mut child, rng);
            next_gen.push(child);
        }
    }
    next_gen
}

/// Evaluate all individuals in the slice.
fn evaluate_population<P: GaProblem>(problem: &P, population: &mut [P::Individual], parallel: bool) {
    if parallel {
        population
            .par_iter_mut()
            .for_each(|ind| problem.assign_fitness(ind));
    } else {
        for ind in population.iter_mut() {
            problem.assign_fitness(ind);
        }
    }
}

/// Index of the best individual under `tendency`.
fn find_best<I: Individual>(population: &[I], tendency: Tendency) -> usize {
    let mut best = 0;
    for (i, ind) in population.iter().enumerate().skip(1) {
        if tendency.is_better(ind.fitness(), population[best].fitness()) {
            best = i;
        }
    }
    best
}

// ============================================================================
// Tests
// ============================================================================
