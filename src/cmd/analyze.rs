use crate::reports;
use clap::Args;
use keygraph::api::rng_from_seed;
use keygraph::config::Config;
use keygraph::error::KgResult;
use keygraph::graph::bisection::{bisect, BisectionOptions};
use keygraph::graph::ranking::NodeRanking;
use keygraph::graph::WeightedGraph;
use keygraph::model::TextModel;

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub config: Config,
}

pub fn run(config: &Config, symbols: &[char]) -> KgResult<()> {
    let model = TextModel::from_symbols(symbols, config.model.eigen_tolerance)?;
    let graph = WeightedGraph::from_model(&model);

    reports::print_stationary_report(&model);
    reports::print_ranking_report(&graph, &model.alphabet);

    let metric = config.model.metric;
    let all: Vec<usize> = (0..graph.node_count()).collect();
    let mut rng = rng_from_seed(config.seed);
    let split = bisect(
        &graph,
        &metric.rank(&graph, &all),
        &BisectionOptions::from(&config.bisection),
        &mut rng,
    )?;
    reports::print_balance_report(&split, &model.alphabet);
    Ok(())
}
