use super::crossover::crossover;
use super::mutation::{is_permutation, mutate, SlotClasses};
use crate::config::GeneticParams;
use crate::error::{KeyGraphError, KgResult};
use crate::scorer::Scorer;
use fastrand::Rng;
use tracing::{debug, info};

/// Added to every selection weight so the worst individual and all-equal
/// populations still get a non-zero share.
const SELECTION_EPSILON: f64 = 1e-8;

#[derive(Debug, Clone)]
pub struct OptimizationOptions {
    pub population_size: usize,
    pub generations: usize,
    pub elite_fraction: f64,
    pub mutate_fraction: f64,
    pub mutation_rate: f64,
    pub mutation_offset: usize,
    pub patience: usize,
    pub patience_threshold: f64,
}

impl From<&GeneticParams> for OptimizationOptions {
    fn from(p: &GeneticParams) -> Self {
        Self {
            population_size: p.population_size,
            generations: p.generations,
            elite_fraction: p.elite_fraction,
            mutate_fraction: p.mutate_fraction,
            mutation_rate: p.mutation_rate,
            mutation_offset: p.mutation_offset,
            patience: p.patience,
            patience_threshold: p.patience_threshold,
        }
    }
}

impl Default for OptimizationOptions {
    fn default() -> Self {
        Self::from(&GeneticParams::default())
    }
}

/// Index boundaries of the sorted population:
/// `[0, elite_end)` kept, `[elite_end, mutate_end)` mutated clones, the rest bred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bands {
    pub elite_end: usize,
    pub mutate_end: usize,
}

impl OptimizationOptions {
    pub fn bands(&self) -> Bands {
        let n = self.population_size;
        let cut = |fraction: f64| (fraction * n as f64 + 1e-9).floor() as usize;

        // Rank 0 always survives
        let elite_end = cut(self.elite_fraction).max(1).min(n);
        let mutate_end = cut(self.elite_fraction + self.mutate_fraction).clamp(elite_end, n);
        Bands {
            elite_end,
            mutate_end,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OptimizationResult {
    pub cost: f64,
    pub layout: Vec<usize>,
    /// Best cost at the start of each generation, then the final best
    pub history: Vec<f64>,
    pub generations_run: usize,
}

/// Receives the best individual at every generation boundary.
/// Return `false` to stop the run early.
pub trait ProgressCallback {
    fn on_generation(&self, generation: usize, best_cost: f64, best_layout: &[usize]) -> bool;
}

pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn on_generation(&self, _: usize, _: f64, _: &[usize]) -> bool {
        true
    }
}

pub struct GeneticOptimizer<'a> {
    scorer: &'a Scorer,
    classes: SlotClasses,
    options: OptimizationOptions,
}

impl<'a> GeneticOptimizer<'a> {
    pub fn new(scorer: &'a Scorer, classes: SlotClasses, options: OptimizationOptions) -> Self {
        Self {
            scorer,
            classes,
            options,
        }
    }

    pub fn options(&self) -> &OptimizationOptions {
        &self.options
    }

    /// Evolves a population seeded with copies of `initial`.
    pub fn run<CB: ProgressCallback>(
        &self,
        initial: &[usize],
        rng: &mut Rng,
        callback: &CB,
    ) -> KgResult<OptimizationResult> {
        let n = self.scorer.key_count;
        if initial.len() != n || !is_permutation(initial) {
            return Err(KeyGraphError::Validation(format!(
                "initial layout must be a permutation of {} symbols",
                n
            )));
        }
        if self.classes.key_count() != n {
            return Err(KeyGraphError::Validation(format!(
                "slot classes cover {} slots, layout has {}",
                self.classes.key_count(),
                n
            )));
        }
        let opts = &self.options;
        if opts.population_size < 2 {
            return Err(KeyGraphError::Config(
                "population_size must be at least 2".into(),
            ));
        }

        let bands = opts.bands();
        let mut population = vec![initial.to_vec(); opts.population_size];
        let mut history = Vec::with_capacity(opts.generations + 1);

        let mut best_seen = f64::INFINITY;
        let mut stale = 0;
        let mut generations_run = 0;

        for generation in 0..opts.generations {
            generations_run = generation + 1;

            // 1. Evaluate & rank
            let costs = self.sort_by_cost(&mut population);
            history.push(costs[0]);
            debug!("Gen {:4} | best {:.6}", generation, costs[0]);

            if !callback.on_generation(generation, costs[0], &population[0]) {
                info!("Search aborted by callback at generation {}", generation);
                break;
            }

            if costs[0] < best_seen - opts.patience_threshold {
                best_seen = costs[0];
                stale = 0;
            } else {
                stale += 1;
                if opts.patience > 0 && stale >= opts.patience {
                    info!("Converged at {:.6} after {} generations", costs[0], generations_run);
                    break;
                }
            }

            // 2. Mutate-only band: clone a better-ranked individual and swap once
            for i in bands.elite_end..bands.mutate_end {
                let src = i.saturating_sub(opts.mutation_offset);
                population[i] = population[src].clone();
                mutate(&mut population[i], &self.classes, rng);
            }

            // 3. Crossover band
            let weights = selection_weights(&costs);
            let mut i = bands.mutate_end;
            while i + 1 < opts.population_size {
                let a = roulette(&weights, rng);
                let b = roulette(&weights, rng);
                let (mut c0, mut c1) =
                    crossover(&population[a], &population[b], &self.classes, rng);
                if rng.f64() < opts.mutation_rate {
                    mutate(&mut c0, &self.classes, rng);
                }
                if rng.f64() < opts.mutation_rate {
                    mutate(&mut c1, &self.classes, rng);
                }
                population[i] = c0;
                population[i + 1] = c1;
                i += 2;
            }
        }

        let costs = self.sort_by_cost(&mut population);
        history.push(costs[0]);
        info!(
            "🏁 Genetic search finished: {} generations, best {:.6}",
            generations_run, costs[0]
        );

        Ok(OptimizationResult {
            cost: costs[0],
            layout: population.swap_remove(0),
            history,
            generations_run,
        })
    }

    /// Sorts ascending by cost (stable) and returns the sorted costs.
    fn sort_by_cost(&self, population: &mut Vec<Vec<usize>>) -> Vec<f64> {
        let mut scored: Vec<(f64, Vec<usize>)> = population
            .drain(..)
            .map(|p| (self.scorer.score(&p), p))
            .collect();
        scored.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut costs = Vec::with_capacity(scored.len());
        for (cost, p) in scored {
            costs.push(cost);
            population.push(p);
        }
        costs
    }
}

/// Normalized `worst - cost` weights over an ascending cost list.
pub fn selection_weights(costs: &[f64]) -> Vec<f64> {
    let worst = costs.last().copied().unwrap_or(0.0);
    let raw: Vec<f64> = costs
        .iter()
        .map(|c| (worst - c).max(0.0) + SELECTION_EPSILON)
        .collect();
    let total: f64 = raw.iter().sum();
    raw.into_iter().map(|w| w / total).collect()
}

/// Cumulative-probability draw over `weights`.
pub fn roulette(weights: &[f64], rng: &mut Rng) -> usize {
    let r = rng.f64();
    let mut acc = 0.0;
    for (i, w) in weights.iter().enumerate() {
        acc += w;
        if r < acc {
            return i;
        }
    }
    weights.len() - 1
}
