//! Showcase CLI: drive the animation page from the terminal
//!
//! ## Usage
//!
//! ```bash
//! showcase simulate --effect rainbow --duration 1000   # Trace one effect
//! showcase simulate --effect glow --repeat --json      # Machine-readable trace
//! showcase click animated-box                          # Random click effect
//! showcase counter --initial 5 --times 3               # 6 7 8
//! showcase palette --draws 10 --seed 7                 # Seeded color draws
//! showcase config --config showcase.yaml               # Effective settings
//! ```

use clap::Parser;
use showcase_cli::{
    handlers, Cli, CliConfig, CliError, CliResult, ColorChoice, Commands, Reporter, Verbosity,
};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(Verbosity::from_flags(cli.quiet, cli.verbose));

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbosity: Verbosity) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| verbosity.log_filter().into()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn run(cli: Cli) -> CliResult<()> {
    let config = build_config(&cli)?;
    let reporter = Reporter::new(config.color.should_color(), config.verbosity.is_quiet());

    match cli.command {
        Commands::Simulate(args) => handlers::execute_simulate(&config, &reporter, &args),
        Commands::Click(args) => handlers::execute_click(&config, &reporter, &args),
        Commands::Counter(args) => {
            handlers::execute_counter(&reporter, &args);
            Ok(())
        }
        Commands::Palette(args) => {
            handlers::execute_palette(&config, &reporter, &args);
            Ok(())
        }
        Commands::Config(args) => handlers::execute_config(&config, &reporter, &args),
    }
}

fn build_config(cli: &Cli) -> CliResult<CliConfig> {
    let color: ColorChoice = cli.color.clone().into();
    let config = CliConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose))
        .with_color(color);

    match &cli.config {
        Some(path) => config.load_settings(path).map_err(|e| match e {
            CliError::Config { .. } => e,
            other => CliError::config(format!("{}: {other}", path.display())),
        }),
        None => Ok(config),
    }
}
