use crate::reports;
use clap::Args;
use keygraph::api::run_pipeline;
use keygraph::config::Config;
use keygraph::error::KgResult;
use keygraph::geometry::KeyboardGeometry;
use keygraph::optimizer::ProgressCallback;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    #[command(flatten)]
    pub config: Config,

    /// Log the best cost every N generations
    #[arg(long, default_value_t = 10)]
    pub report_every: usize,
}

struct LogProgress {
    every: usize,
}

impl ProgressCallback for LogProgress {
    fn on_generation(&self, generation: usize, best_cost: f64, _: &[usize]) -> bool {
        if self.every > 0 && generation % self.every == 0 {
            info!("Gen {:5} | Best: {:.6}", generation, best_cost);
        }
        true
    }
}

pub fn run(
    args: &SearchArgs,
    config: &Config,
    symbols: &[char],
    geometry: &KeyboardGeometry,
) -> KgResult<()> {
    let progress = LogProgress {
        every: args.report_every,
    };
    let metric = config.model.metric;
    info!("🧭 Ranking metric: {}", metric);

    let report = run_pipeline(symbols, geometry, config, &metric, &progress)?;
    let cols = geometry.hand_columns(0).len() + geometry.hand_columns(1).len();

    reports::print_balance_report(&report.initial.bisection, &report.model.alphabet);
    reports::print_layout_grid("GREEDY", &report.initial_layout_string(), cols);
    reports::print_layout_grid("OPTIMIZED", &report.final_layout_string(), cols);
    reports::print_cost_history(&report.result.history, args.report_every);
    reports::print_score_report(&[
        ("greedy".to_string(), report.initial_score),
        ("optimized".to_string(), report.final_score),
    ]);

    println!("\n=== 🏆 FINAL RESULT ===");
    println!("Cost: {:.6}", report.result.cost);
    println!("Layout: {}", report.final_layout_string());
    Ok(())
}
