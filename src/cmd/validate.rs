use crate::reports;
use clap::Args;
use keygraph::config::Config;
use keygraph::error::{KeyGraphError, KgResult};
use keygraph::geometry::KeyboardGeometry;
use keygraph::model::TextModel;
use keygraph::optimizer::is_permutation;
use keygraph::scorer::Scorer;

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub config: Config,

    /// Row-major layout, one symbol per slot
    #[arg(short, long)]
    pub layout: String,
}

pub fn run(
    args: &ValidateArgs,
    config: &Config,
    symbols: &[char],
    geometry: &KeyboardGeometry,
) -> KgResult<()> {
    let model = TextModel::from_symbols(symbols, config.model.eigen_tolerance)?;
    let scorer = Scorer::new(&model, geometry, config.weights.clone())?;

    let layout = model.alphabet.encode(&args.layout)?;
    if layout.len() != scorer.key_count || !is_permutation(&layout) {
        return Err(KeyGraphError::Validation(format!(
            "layout must use each of the {} symbols '{}' exactly once",
            model.size(),
            model.alphabet.symbols().iter().collect::<String>()
        )));
    }

    let cols = geometry.hand_columns(0).len() + geometry.hand_columns(1).len();
    reports::print_layout_grid("INPUT", &args.layout, cols);
    let details = scorer.score_details(&layout);
    reports::print_score_report(&[("input".to_string(), details)]);

    println!("Cost: {:.6}", details.total);
    Ok(())
}
