use crate::error::{KeyGraphError, KgResult};
use crate::graph::ranking::Metric;
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub model: ModelParams,
    #[command(flatten)]
    pub bisection: BisectionParams,
    #[command(flatten)]
    pub genetic: GeneticParams,
    #[command(flatten)]
    pub weights: FitnessWeights,

    /// Seed for every stochastic stage. Omit for an entropy-seeded run.
    #[arg(short = 'S', long)]
    pub seed: Option<u64>,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelParams {
    /// Max distance between the chosen eigenvalue and 1.0
    #[arg(long, default_value_t = 0.01)]
    pub eigen_tolerance: f64,

    /// Symbols kept by the text cleaner (whitespace is always dropped)
    #[arg(long, default_value = "abcdefghijklmnopqrstuvwxyz,.-:")]
    pub allowed_symbols: String,

    /// Node ranking used to seed the bisection and order greedy placement
    #[arg(long, default_value_t = Metric::Degree)]
    pub metric: Metric,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            eigen_tolerance: 0.01,
            allowed_symbols: "abcdefghijklmnopqrstuvwxyz,.-:".to_string(),
            metric: Metric::Degree,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BisectionParams {
    #[arg(long, default_value_t = 1000)]
    pub bisection_max_iterations: usize,
    #[arg(long, default_value_t = 1e-4)]
    pub bisection_threshold: f64,
}

impl Default for BisectionParams {
    fn default() -> Self {
        Self {
            bisection_max_iterations: 1000,
            bisection_threshold: 1e-4,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneticParams {
    #[arg(long, default_value_t = 100)]
    pub population_size: usize,
    #[arg(long, default_value_t = 100)]
    pub generations: usize,

    // Band fractions; crossover takes the remainder
    #[arg(long, default_value_t = 0.1)]
    pub elite_fraction: f64,
    #[arg(long, default_value_t = 0.5)]
    pub mutate_fraction: f64,

    /// Chance that a crossover child is also mutated
    #[arg(long, default_value_t = 0.5)]
    pub mutation_rate: f64,

    /// How many ranks better the cloned parent of a mutate-only slot sits
    #[arg(long, default_value_t = 10)]
    pub mutation_offset: usize,

    /// Generations without improvement before stopping (0 = run the full budget)
    #[arg(long, default_value_t = 0)]
    pub patience: usize,
    #[arg(long, default_value_t = 1e-6)]
    pub patience_threshold: f64,
}

impl Default for GeneticParams {
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 100,
            elite_fraction: 0.1,
            mutate_fraction: 0.5,
            mutation_rate: 0.5,
            mutation_offset: 10,
            patience: 0,
            patience_threshold: 1e-6,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FitnessWeights {
    #[arg(long, default_value_t = 0.6)]
    pub weight_same_finger: f64,
    #[arg(long, default_value_t = 0.3)]
    pub weight_distance: f64,
    #[arg(long, default_value_t = 1.0)]
    pub weight_preferred: f64,
}

impl Default for FitnessWeights {
    fn default() -> Self {
        Self {
            weight_same_finger: 0.6,
            weight_distance: 0.3,
            weight_preferred: 1.0,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> KgResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            KeyGraphError::Config(format!("failed to read '{}': {}", path.display(), e))
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Copies every value the user typed on the command line over the file-based values.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($section:ident . $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$section.$field = cli.$section.$field.clone();
                }
            };
        }

        update_if_present!(model.eigen_tolerance);
        update_if_present!(model.allowed_symbols);
        update_if_present!(model.metric);

        update_if_present!(bisection.bisection_max_iterations);
        update_if_present!(bisection.bisection_threshold);

        update_if_present!(genetic.population_size);
        update_if_present!(genetic.generations);
        update_if_present!(genetic.elite_fraction);
        update_if_present!(genetic.mutate_fraction);
        update_if_present!(genetic.mutation_rate);
        update_if_present!(genetic.mutation_offset);
        update_if_present!(genetic.patience);
        update_if_present!(genetic.patience_threshold);

        update_if_present!(weights.weight_same_finger);
        update_if_present!(weights.weight_distance);
        update_if_present!(weights.weight_preferred);

        if matches.value_source("seed") == Some(ValueSource::CommandLine) {
            self.seed = cli.seed;
        }
    }

    pub fn validate(&self) -> KgResult<()> {
        let fail = |msg: String| Err(KeyGraphError::Config(msg));

        if self.model.eigen_tolerance <= 0.0 || self.model.eigen_tolerance.is_nan() {
            return fail(format!(
                "eigen_tolerance must be positive, got {}",
                self.model.eigen_tolerance
            ));
        }
        if self.model.allowed_symbols.trim().is_empty() {
            return fail("allowed_symbols is empty".to_string());
        }
        if self.bisection.bisection_threshold < 0.0 {
            return fail("bisection_threshold must not be negative".to_string());
        }

        let g = &self.genetic;
        if g.population_size < 2 {
            return fail(format!(
                "population_size must be at least 2, got {}",
                g.population_size
            ));
        }
        for (name, value) in [
            ("elite_fraction", g.elite_fraction),
            ("mutate_fraction", g.mutate_fraction),
            ("mutation_rate", g.mutation_rate),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return fail(format!("{} must be within [0, 1], got {}", name, value));
            }
        }
        if g.elite_fraction + g.mutate_fraction > 1.0 {
            return fail(format!(
                "elite_fraction + mutate_fraction exceeds 1 ({} + {})",
                g.elite_fraction, g.mutate_fraction
            ));
        }

        let w = &self.weights;
        if ![w.weight_same_finger, w.weight_distance, w.weight_preferred]
            .iter()
            .all(|v| v.is_finite())
        {
            return fail("fitness weights must be finite".to_string());
        }

        Ok(())
    }
}
