pub mod crossover;
pub mod mutation;
pub mod runner;

pub use crossover::{crossover, pmx};
pub use mutation::{is_permutation, mutate, SlotClasses};
pub use runner::{
    GeneticOptimizer, NoProgress, OptimizationOptions, OptimizationResult, ProgressCallback,
};
