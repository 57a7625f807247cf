mod common;

use common::{chars, six_slot_geometry, six_symbol_text};
use fastrand::Rng;
use keygraph::config::FitnessWeights;
use keygraph::geometry::KeyboardGeometry;
use keygraph::model::TextModel;
use keygraph::optimizer::{
    crossover, is_permutation, mutate, pmx, GeneticOptimizer, NoProgress, OptimizationOptions,
    ProgressCallback, SlotClasses,
};
use keygraph::scorer::Scorer;
use std::cell::Cell;

fn six_symbol_scorer(weights: FitnessWeights) -> Scorer {
    let model = TextModel::from_symbols(&chars(&six_symbol_text()), 1e-2).unwrap();
    Scorer::new(&model, &six_slot_geometry(), weights).unwrap()
}

fn small_options() -> OptimizationOptions {
    OptimizationOptions {
        population_size: 10,
        generations: 5,
        ..Default::default()
    }
}

#[test]
fn test_mutation_stays_within_class() {
    let classes = SlotClasses::from_geometry(&KeyboardGeometry::standard());
    let mut rng = Rng::with_seed(7);
    let mut layout: Vec<usize> = (0..30).collect();

    let anchor_symbols = |l: &[usize]| {
        let mut s: Vec<usize> = classes.anchors().iter().map(|&a| l[a]).collect();
        s.sort_unstable();
        s
    };
    let before = anchor_symbols(&layout);

    for _ in 0..1000 {
        mutate(&mut layout, &classes, &mut rng);
        assert!(is_permutation(&layout));
    }
    assert_eq!(anchor_symbols(&layout), before);
    assert_ne!(layout, (0..30).collect::<Vec<_>>());
}

#[test]
fn test_pmx_empty_segment_copies_other_parent() {
    let p0 = vec![3, 1, 4, 0, 5, 2];
    let p1 = vec![0, 1, 2, 3, 4, 5];
    for k in 0..=6 {
        assert_eq!(pmx(&p0, &p1, k, k), p1, "cut at {}", k);
    }
}

#[test]
fn test_pmx_full_segment_copies_first_parent() {
    let p0 = vec![3, 1, 4, 0, 5, 2];
    let p1 = vec![0, 1, 2, 3, 4, 5];
    assert_eq!(pmx(&p0, &p1, 0, 6), p0);
}

#[test]
fn test_crossover_children_are_permutations() {
    let classes = SlotClasses::from_geometry(&KeyboardGeometry::standard());
    let mut rng = Rng::with_seed(21);
    let mut p0: Vec<usize> = (0..30).collect();
    let mut p1: Vec<usize> = (0..30).collect();

    for _ in 0..200 {
        rng.shuffle(&mut p0);
        rng.shuffle(&mut p1);
        let (c0, c1) = crossover(&p0, &p1, &classes, &mut rng);
        assert!(is_permutation(&c0), "child {:?}", c0);
        assert!(is_permutation(&c1), "child {:?}", c1);
    }
}

#[test]
fn test_seeded_runs_are_identical() {
    let scorer = six_symbol_scorer(FitnessWeights::default());
    let classes = SlotClasses::from_geometry(&six_slot_geometry());
    let initial = vec![5, 4, 3, 2, 1, 0];

    let run = || {
        let optimizer = GeneticOptimizer::new(&scorer, classes.clone(), small_options());
        let mut rng = Rng::with_seed(2024);
        optimizer.run(&initial, &mut rng, &NoProgress).unwrap()
    };

    let first = run();
    let second = run();
    assert_eq!(first.layout, second.layout);
    assert_eq!(first.history, second.history);
    assert_eq!(first.cost, second.cost);
    assert_eq!(first.history.len(), 6);
    assert_eq!(first.generations_run, 5);
}

#[test]
fn test_best_cost_never_increases() {
    let scorer = six_symbol_scorer(FitnessWeights::default());
    let classes = SlotClasses::from_geometry(&six_slot_geometry());
    let options = OptimizationOptions {
        population_size: 20,
        generations: 30,
        ..Default::default()
    };
    let optimizer = GeneticOptimizer::new(&scorer, classes, options);
    let mut rng = Rng::with_seed(5);
    let result = optimizer.run(&[0, 1, 2, 3, 4, 5], &mut rng, &NoProgress).unwrap();

    for w in result.history.windows(2) {
        assert!(w[1] <= w[0], "best cost rose from {} to {}", w[0], w[1]);
    }
    assert!(is_permutation(&result.layout));
    assert_eq!(scorer.score(&result.layout), result.cost);
    assert!(result.cost <= scorer.score(&[0, 1, 2, 3, 4, 5]));
}

struct StopAt {
    generation: usize,
    calls: Cell<usize>,
}

impl ProgressCallback for StopAt {
    fn on_generation(&self, generation: usize, _: f64, layout: &[usize]) -> bool {
        assert!(is_permutation(layout));
        self.calls.set(self.calls.get() + 1);
        generation < self.generation
    }
}

#[test]
fn test_callback_can_abort() {
    let scorer = six_symbol_scorer(FitnessWeights::default());
    let optimizer = GeneticOptimizer::new(
        &scorer,
        SlotClasses::from_geometry(&six_slot_geometry()),
        small_options(),
    );
    let cb = StopAt {
        generation: 2,
        calls: Cell::new(0),
    };
    let mut rng = Rng::with_seed(1);
    let result = optimizer.run(&[0, 1, 2, 3, 4, 5], &mut rng, &cb).unwrap();
    assert_eq!(cb.calls.get(), 3);
    assert_eq!(result.generations_run, 3);
    assert_eq!(result.history.len(), 4);
}

#[test]
fn test_patience_stops_flat_search() {
    let flat = FitnessWeights {
        weight_same_finger: 0.0,
        weight_distance: 0.0,
        weight_preferred: 0.0,
    };
    let scorer = six_symbol_scorer(flat);
    let options = OptimizationOptions {
        population_size: 10,
        generations: 50,
        patience: 3,
        ..Default::default()
    };
    let optimizer =
        GeneticOptimizer::new(&scorer, SlotClasses::from_geometry(&six_slot_geometry()), options);
    let mut rng = Rng::with_seed(1);
    let result = optimizer.run(&[0, 1, 2, 3, 4, 5], &mut rng, &NoProgress).unwrap();
    assert_eq!(result.generations_run, 4);
    assert_eq!(result.cost, 0.0);
}

#[test]
fn test_rejects_non_permutation_seed() {
    let scorer = six_symbol_scorer(FitnessWeights::default());
    let optimizer = GeneticOptimizer::new(
        &scorer,
        SlotClasses::from_geometry(&six_slot_geometry()),
        small_options(),
    );
    let mut rng = Rng::with_seed(1);
    assert!(optimizer.run(&[0, 0, 1, 2, 3, 4], &mut rng, &NoProgress).is_err());
    assert!(optimizer.run(&[0, 1, 2], &mut rng, &NoProgress).is_err());
}
