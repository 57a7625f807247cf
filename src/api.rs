use crate::config::Config;
use crate::error::{KeyGraphError, KgResult};
use crate::geometry::KeyboardGeometry;
use crate::graph::bisection::{bisect, Bisection, BisectionOptions};
use crate::graph::ranking::NodeRanking;
use crate::graph::WeightedGraph;
use crate::model::TextModel;
use crate::optimizer::{
    GeneticOptimizer, OptimizationOptions, OptimizationResult, ProgressCallback, SlotClasses,
};
use crate::placement::{assemble_layout, place_hand, HandGrid, PlacementPlan};
use crate::scorer::{ScoreDetails, Scorer};
use fastrand::Rng;
use tracing::info;

/// Output of the graph stages: the split and the greedy layout built from it.
#[derive(Debug, Clone)]
pub struct InitialLayout {
    pub bisection: Bisection,
    pub left: HandGrid,
    pub right: HandGrid,
    /// Row-major symbol ids over the keyboard
    pub layout: Vec<usize>,
}

#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub model: TextModel,
    pub initial: InitialLayout,
    pub initial_score: ScoreDetails,
    pub result: OptimizationResult,
    pub final_score: ScoreDetails,
}

impl PipelineReport {
    pub fn final_layout_string(&self) -> String {
        self.model.alphabet.decode(&self.result.layout)
    }

    pub fn initial_layout_string(&self) -> String {
        self.model.alphabet.decode(&self.initial.layout)
    }
}

pub fn rng_from_seed(seed: Option<u64>) -> Rng {
    match seed {
        Some(s) => Rng::with_seed(s),
        None => Rng::new(),
    }
}

/// Bisects the graph and fills both hands greedily.
pub fn build_initial_layout(
    graph: &WeightedGraph,
    geometry: &KeyboardGeometry,
    ranking: &dyn NodeRanking,
    options: &BisectionOptions,
    rng: &mut Rng,
) -> KgResult<InitialLayout> {
    let all: Vec<usize> = (0..graph.node_count()).collect();
    let ranked = ranking.rank(graph, &all);
    let bisection = bisect(graph, &ranked, options, rng)?;

    let rows = geometry.rows().len();
    let left_plan = PlacementPlan::for_grid(rows, geometry.hand_columns(0).len())?;
    let right_plan = PlacementPlan::for_grid(rows, geometry.hand_columns(1).len())?;

    let left = place_hand(graph, &ranking.rank(graph, &bisection.left), &left_plan);
    let right = place_hand(graph, &ranking.rank(graph, &bisection.right), &right_plan);
    let layout = assemble_layout(geometry, &left, &right)?;

    Ok(InitialLayout {
        bisection,
        left,
        right,
        layout,
    })
}

/// Runs every stage on a cleaned symbol stream.
pub fn run_pipeline<CB: ProgressCallback>(
    symbols: &[char],
    geometry: &KeyboardGeometry,
    config: &Config,
    ranking: &dyn NodeRanking,
    callback: &CB,
) -> KgResult<PipelineReport> {
    config.validate()?;

    // 1. Statistics
    let model = TextModel::from_symbols(symbols, config.model.eigen_tolerance)?;
    if model.size() != geometry.key_count() {
        return Err(KeyGraphError::Validation(format!(
            "text has {} distinct symbols but the keyboard has {} slots",
            model.size(),
            geometry.key_count()
        )));
    }

    // 2. Graph stages
    let mut rng = rng_from_seed(config.seed);
    let graph = WeightedGraph::from_model(&model);
    let initial = build_initial_layout(
        &graph,
        geometry,
        ranking,
        &BisectionOptions::from(&config.bisection),
        &mut rng,
    )?;

    // 3. Refinement
    let scorer = Scorer::new(&model, geometry, config.weights.clone())?;
    let initial_score = scorer.score_details(&initial.layout);
    info!("🌱 Greedy layout cost: {:.6}", initial_score.total);

    let optimizer = GeneticOptimizer::new(
        &scorer,
        SlotClasses::from_geometry(geometry),
        OptimizationOptions::from(&config.genetic),
    );
    let result = optimizer.run(&initial.layout, &mut rng, callback)?;
    let final_score = scorer.score_details(&result.layout);

    Ok(PipelineReport {
        model,
        initial,
        initial_score,
        result,
        final_score,
    })
}
