use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use keygraph::config::Config;
use keygraph::corpus;
use keygraph::error::KgResult;
use keygraph::geometry::KeyboardGeometry;
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Plain-text corpus the statistics are built from
    #[arg(global = true, short, long, default_value = "data/corpus.txt")]
    text: String,

    /// Keyboard geometry JSON (defaults to the built-in 3x10 split grid)
    #[arg(global = true, short = 'k', long)]
    keyboard: Option<String>,

    /// JSON config used as the base; explicit flags still win
    #[arg(global = true, long = "config")]
    config_path: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Search(cmd::search::SearchArgs),
    Analyze(cmd::analyze::AnalyzeArgs),
    Validate(cmd::validate::ValidateArgs),
}

fn main() {
    // 1. Parse Raw Matches (to distinguish user input from defaults)
    let matches = Cli::command().get_matches();

    // 2. Construct CLI struct (populated with defaults)
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = execute(&cli, &matches) {
        error!("❌ {}", e);
        process::exit(1);
    }
}

fn execute(cli: &Cli, matches: &ArgMatches) -> KgResult<()> {
    info!("🚀 Initializing KeyGraph...");

    // 3. Keyboard
    let geometry = match &cli.keyboard {
        Some(path) => {
            info!("📂 Loading Keyboard: {}", path);
            KeyboardGeometry::load_from_file(path)?
        }
        None => KeyboardGeometry::standard(),
    };

    // 4. Config: CLI values, optionally layered over a JSON file
    let cli_config = match &cli.command {
        Commands::Search(args) => &args.config,
        Commands::Analyze(args) => &args.config,
        Commands::Validate(args) => &args.config,
    };
    let config = match &cli.config_path {
        Some(path) => {
            info!("⚖️  Loading Config from: {}", path);
            let mut file_config = Config::load_from_file(path)?;
            if let Some((_, sub)) = matches.subcommand() {
                file_config.merge_from_cli(cli_config, sub);
            }
            file_config
        }
        None => cli_config.clone(),
    };
    config.validate()?;

    // 5. Text
    info!("📖 Reading text: {}", cli.text);
    let symbols = corpus::load_symbols(&cli.text, &config.model.allowed_symbols)?;

    // 6. Execute
    match &cli.command {
        Commands::Search(args) => cmd::search::run(args, &config, &symbols, &geometry),
        Commands::Analyze(_) => cmd::analyze::run(&config, &symbols),
        Commands::Validate(args) => cmd::validate::run(args, &config, &symbols, &geometry),
    }
}
