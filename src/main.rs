mod cmd;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use cmd::PlanArgs;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "ptoplan", about = "plan PTO around weekends and holidays")]
struct Cli {
    /// Path to the data directory containing config and data files (default: ./config)
    #[arg(long, default_value = "./config")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write default config.yaml and holidays.yaml
    Init,
    /// List holidays
    Holidays {
        /// Include regional holidays for this region code
        #[arg(long)]
        region: Option<String>,
    },
    /// Suggest PTO days, optionally editing the selection afterwards
    Suggest {
        #[command(flatten)]
        plan: PlanArgs,
        /// Opt out of a suggested day, or drop a manual one (applied first)
        #[arg(long, value_parser = cmd::parse_day)]
        remove: Vec<NaiveDate>,
        /// Bring back a removed suggestion (applied second)
        #[arg(long, value_parser = cmd::parse_day)]
        restore: Vec<NaiveDate>,
        /// Add a day of your own (applied last)
        #[arg(long, value_parser = cmd::parse_day)]
        select: Vec<NaiveDate>,
    },
    /// Show substitutes for a suggested block
    Alternatives {
        /// Block id as printed by `suggest`, e.g. 2025-07-03..2025-07-03
        block_id: String,
        #[command(flatten)]
        plan: PlanArgs,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ptoplan=info,pto_planner=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let data_dir = if cli.data_dir.is_absolute() {
        cli.data_dir.clone()
    } else {
        std::env::current_dir()?.join(&cli.data_dir)
    };

    // Auto-init when the data directory is missing or empty and the user did not
    // explicitly invoke the `init` subcommand.
    let is_init_command = matches!(cli.command, Commands::Init);
    if !is_init_command && dir_needs_init(&data_dir) {
        tracing::info!(dir = %data_dir.display(), "data directory is missing or empty, running init");
        cmd::init::run(&data_dir)?;
    }

    match cli.command {
        Commands::Init => cmd::init::run(&data_dir),
        Commands::Holidays { region } => cmd::holidays::run(&data_dir, region.as_deref()),
        Commands::Suggest {
            plan,
            remove,
            restore,
            select,
        } => {
            let toggles = cmd::suggest::Toggles {
                remove,
                restore,
                select,
            };
            cmd::suggest::run(&data_dir, &plan, &toggles)
        }
        Commands::Alternatives { block_id, plan } => {
            cmd::alternatives::run(&data_dir, &plan, &block_id)
        }
    }
}

/// Returns true when `dir` does not exist or exists but contains no files.
fn dir_needs_init(dir: &std::path::Path) -> bool {
    if !dir.exists() {
        return true;
    }
    dir.read_dir()
        .map(|mut entries| entries.next().is_none())
        .unwrap_or(false)
}
