mod cmd;
mod output;
mod render;
mod root;

use clap::{Parser, Subcommand};
use cmd::{config::ConfigSubcommand, draft::DraftSubcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "showdesign",
    about = "Show design portal: collect a creative brief for a band show, step by step",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .showdesign/)
    #[arg(long, global = true, env = "SHOWDESIGN_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the .showdesign/ directory and default config
    Init,

    /// Start an interactive session (sign in, dashboard, wizard)
    Shell,

    /// Inspect saved designs
    Draft {
        #[command(subcommand)]
        subcommand: DraftSubcommand,
    },

    /// Show or validate the configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so shell output and --json stay clean on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init => cmd::init::run(&root),
        Commands::Shell => cmd::shell::run(&root),
        Commands::Draft { subcommand } => cmd::draft::run(&root, subcommand, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
