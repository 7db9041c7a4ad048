//! Simulated Annealing framework for optimization.
//!
//! The runner is problem-agnostic: a [`SaProblem`] supplies the initial
//! solution, the neighbourhood move and the objective. Each iteration draws
//! one neighbour from the *current* solution, applies the Metropolis rule
//! and then cools geometrically. All randomness flows through the RNG handed
//! to the runner, so a fixed seed reproduces a run exactly.

use rand::prelude::*;
use rand::rngs::StdRng;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for Simulated Annealing.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SaConfig {
    /// Initial temperature.
    pub initial_temp: f64,
    /// The run stops once the temperature drops below this value.
    pub min_temp: f64,
    /// Geometric cooling factor applied after every iteration.
    pub cooling_rate: f64,
    /// Maximum number of iterations.
    pub max_iterations: u64,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temp: 100.0,
            min_temp: 0.1,
            cooling_rate: 0.95,
            max_iterations: 1000,
        }
    }
}

impl SaConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial temperature.
    pub fn with_initial_temp(mut self, temp: f64) -> Self {
        self.initial_temp = temp;
        self
    }

    /// Sets the minimum temperature.
    pub fn with_min_temp(mut self, temp: f64) -> Self {
        self.min_temp = temp;
        self
    }

    /// Sets the cooling rate.
    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    /// Sets the maximum iterations.
    pub fn with_max_iterations(mut self, iterations: u64) -> Self {
        self.max_iterations = iterations;
        self
    }
}

/// Trait for solutions in Simulated Annealing.
pub trait SaSolution: Clone + Send + Sync {
    /// Returns the objective value (fitness) of this solution.
    /// Higher values are better (maximization).
    fn objective(&self) -> f64;

    /// Sets the objective value.
    fn set_objective(&mut self, value: f64);
}

/// Trait for problem-specific SA operations.
pub trait SaProblem: Send + Sync {
    /// The solution type for this problem.
    type Solution: SaSolution;

    /// Creates an initial solution.
    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Self::Solution;

    /// Generates a neighbour of `solution`. The input is left untouched.
    fn neighbor<R: Rng>(&self, solution: &Self::Solution, rng: &mut R) -> Self::Solution;

    /// Evaluates the objective of a solution.
    fn evaluate(&self, solution: &mut Self::Solution);

    /// Called after every iteration (for progress reporting).
    fn on_iteration(&self, _progress: &SaProgress) {}
}

/// Progress information during SA execution.
#[derive(Debug, Clone)]
pub struct SaProgress {
    /// Temperature the iteration ran at.
    pub temperature: f64,
    /// Iteration number (1-based).
    pub iteration: u64,
    /// Best fitness so far.
    pub best_fitness: f64,
    /// Current fitness after the acceptance decision.
    pub current_fitness: f64,
    /// Whether the candidate of this iteration was accepted.
    pub accepted: bool,
}

/// Result of a SA run.
#[derive(Debug, Clone)]
pub struct SaResult<S: SaSolution> {
    /// The best solution found.
    pub best: S,
    /// Temperature after the last cooling step.
    pub final_temperature: f64,
    /// Total iterations performed.
    pub iterations: u64,
    /// Number of accepted candidates.
    pub accepted: u64,
    /// Total elapsed time.
    pub elapsed: Duration,
    /// Whether the run was stopped through the cancel handle.
    pub cancelled: bool,
    /// Best fitness after the initial solution and after every iteration.
    pub history: Vec<f64>,
    /// Index of the chain that produced this result.
    pub chain: usize,
}

/// Metropolis acceptance rule.
///
/// Improvements and ties are always accepted without consuming randomness;
/// a worse candidate is accepted with probability `exp(delta / temperature)`.
pub fn metropolis_accept<R: Rng>(delta: f64, temperature: f64, rng: &mut R) -> bool {
    if delta >= 0.0 {
        return true;
    }
    let probability = (delta / temperature).exp();
    rng.gen::<f64>() < probability
}

/// Simulated Annealing runner.
pub struct SaRunner<P: SaProblem> {
    config: SaConfig,
    problem: P,
    cancelled: Arc<AtomicBool>,
}

impl<P: SaProblem> SaRunner<P> {
    /// Creates a new SA runner.
    pub fn new(config: SaConfig, problem: P) -> Self {
        Self {
            config,
            problem,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Uses an externally owned cancellation flag.
    pub fn with_cancel_handle(mut self, cancelled: Arc<AtomicBool>) -> Self {
        self.cancelled = cancelled;
        self
    }

    /// Returns a handle to cancel the algorithm.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        self.cancelled.clone()
    }

    /// Returns the problem being solved.
    pub fn problem(&self) -> &P {
        &self.problem
    }

    /// Runs the algorithm with an RNG seeded from `seed`.
    pub fn run_seeded(&self, seed: u64) -> SaResult<P::Solution> {
        self.run_with_rng(&mut StdRng::seed_from_u64(seed))
    }

    /// Runs the Simulated Annealing algorithm with a specific RNG.
    pub fn run_with_rng<R: Rng>(&self, rng: &mut R) -> SaResult<P::Solution> {
        let start = Instant::now();

        let mut current = self.problem.initial_solution(rng);
        self.problem.evaluate(&mut current);
        let mut best = current.clone();
        let mut best_fitness = best.objective();
        let mut history = vec![best_fitness];

        let mut temperature = self.config.initial_temp;
        let mut iteration = 0u64;
        let mut accepted_count = 0u64;
        let mut cancelled = false;

        while iteration < self.config.max_iterations {
            if self.cancelled.load(Ordering::Relaxed) {
                cancelled = true;
                break;
            }
            iteration += 1;

            let mut candidate = self.problem.neighbor(&current, rng);
            self.problem.evaluate(&mut candidate);

            let delta = candidate.objective() - current.objective();
            let accept = metropolis_accept(delta, temperature, rng);

            if accept {
                accepted_count += 1;
                current = candidate;

                if current.objective() > best_fitness {
                    best = current.clone();
                    best_fitness = best.objective();
                }
            }

            history.push(best_fitness);

            self.problem.on_iteration(&SaProgress {
                temperature,
                iteration,
                best_fitness,
                current_fitness: current.objective(),
                accepted: accept,
            });

            temperature *= self.config.cooling_rate;
            if temperature < self.config.min_temp {
                break;
            }
        }

        log::debug!(
            "SA finished after {} iterations: best={:.4}, accepted={}, temp={:.4}",
            iteration,
            best_fitness,
            accepted_count,
            temperature
        );

        SaResult {
            best,
            final_temperature: temperature,
            iterations: iteration,
            accepted: accepted_count,
            elapsed: start.elapsed(),
            cancelled,
            history,
            chain: 0,
        }
    }

    /// Runs `chains` independent SA instances in parallel and returns the best.
    ///
    /// Chain `i` is seeded with `seed + i`, so the outcome depends only on the
    /// seed. Ties are resolved in favour of the lowest chain index.
    pub fn run_parallel(&self, chains: usize, seed: u64) -> SaResult<P::Solution> {
        let chains = chains.max(1);
        let run_chain = |chain: usize| {
            let mut result = self.run_seeded(seed.wrapping_add(chain as u64));
            result.chain = chain;
            result
        };

        let (first, rest): (_, Vec<_>) = rayon::join(
            || run_chain(0),
            || (1..chains).into_par_iter().map(|c| run_chain(c)).collect(),
        );

        rest.into_iter().fold(first, |best, candidate| {
            if candidate.best.objective() > best.best.objective() {
                candidate
            } else {
                best
            }
        })
    }
}
