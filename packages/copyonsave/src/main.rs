//! copyonsave writes an injected copy of a file every time it is saved.

use color_eyre::{Result, Section};
use tracing::{instrument, level_filters::LevelFilter};

mod cmd;

use clap::{Parser, Subcommand};
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Copy files with injected snippets whenever they are saved.
#[derive(Parser)]
#[command(author, version = env!("COPYONSAVE_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Handle a "document saved" event from an editor (JSON on stdin).
    Hook(cmd::hook::Config),

    /// Watch the workspace and handle saves as files change on disk.
    Watch(cmd::watch::Config),

    /// Create an example copyonsaveandedit.json in the workspace root.
    Init(cmd::init::Config),

    /// Validate a rule configuration file.
    Validate(cmd::validate::Config),

    /// Show what saving a file would copy, without writing anything.
    Preview(cmd::preview::Config),
}

#[instrument]
fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    // Editors run `copyonsave hook` as a subprocess and read its stdout, so
    // logs go to stderr and default to errors only. Use `COPYONSAVE_LOG` for
    // debugging, e.g. `COPYONSAVE_LOG=debug` or `COPYONSAVE_LOG=copyonsave=trace`.
    tracing_subscriber::registry()
        .with(ErrorLayer::default())
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_level(true)
                .with_file(true)
                .with_line_number(true)
                .with_target(true)
                .pretty(),
        )
        .with(
            EnvFilter::builder()
                .with_env_var("COPYONSAVE_LOG")
                .with_default_directive(LevelFilter::ERROR.into())
                .from_env_lossy(),
        )
        .init();

    match cli.command {
        Commands::Hook(config) => cmd::hook::main(config),
        Commands::Watch(config) => cmd::watch::main(config),
        Commands::Init(config) => cmd::init::main(config),
        Commands::Validate(config) => cmd::validate::main(config),
        Commands::Preview(config) => cmd::preview::main(config),
    }
    .suggestion("Run `copyonsave init` to create an example copyonsaveandedit.json.")
}
