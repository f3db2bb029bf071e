// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Aislenav CLI - in-store wayfinding

use aislenav::commands::{self, route::RouteArgs, EdgeEvents, Output};
use aislenav::modifiers::EdgeKey;
use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "aislenav")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Configuration file path
    #[arg(short, long, env = "AISLENAV_CONFIG", global = true)]
    config: Option<std::path::PathBuf>,

    /// Floor-plan file (JSON or TOML); overrides the configuration
    #[arg(long, env = "AISLENAV_FLOOR_PLAN", global = true)]
    floor_plan: Option<std::path::PathBuf>,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR", global = true)]
    no_color: bool,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Edge events shared by the searching commands
#[derive(clap::Args)]
struct EventArgs {
    /// Mark an edge as congested (FROM:TO), repeatable
    #[arg(long, value_name = "FROM:TO")]
    congest: Vec<EdgeKey>,

    /// Mark an edge as blocked (FROM:TO), repeatable
    #[arg(long, value_name = "FROM:TO")]
    block: Vec<EdgeKey>,
}

impl From<EventArgs> for EdgeEvents {
    fn from(args: EventArgs) -> Self {
        Self {
            congest: args.congest,
            block: args.block,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Find the least-cost path between two locations
    Path {
        /// Start node id or aisle name
        from: String,

        /// Goal node id or aisle name
        to: String,

        #[command(flatten)]
        events: EventArgs,
    },

    /// Plan an optimized route through several stops
    Route {
        /// Stops as node ids or aisle names
        #[arg(required = true)]
        stops: Vec<String>,

        /// Start location (defaults to the configured entrance)
        #[arg(long)]
        start: Option<String>,

        /// End location (defaults to the configured checkout)
        #[arg(long)]
        end: Option<String>,

        #[command(flatten)]
        events: EventArgs,
    },

    /// List the modifiers that a set of edge events produces
    Modifiers {
        #[command(flatten)]
        events: EventArgs,

        /// Remove modifiers on an edge again (FROM:TO), repeatable
        #[arg(long, value_name = "FROM:TO")]
        clear: Vec<EdgeKey>,
    },

    /// Export the floor plan
    Export {
        /// Output format (dot, json, toml)
        #[arg(short, long, default_value = "dot")]
        format: String,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,

        /// Highlight the optimized route through these stops (dot only)
        #[arg(long, value_delimiter = ',')]
        highlight: Vec<String>,

        #[command(flatten)]
        events: EventArgs,
    },

    /// Show the effective configuration
    Config {
        /// Configuration key (omit to show everything)
        key: Option<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: clap_complete::Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = aislenav::config::load(cli.config.as_deref())?;
    if let Some(path) = cli.floor_plan {
        config.floor_plan = Some(path);
    }

    // Initialize logging; RUST_LOG wins over the flags
    let log_level = match cli.verbose {
        0 if cli.quiet => "error",
        0 => config.log_level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let output = Output {
        json: cli.json,
        color: config.color && !cli.no_color,
    };

    // Execute command
    match cli.command {
        Commands::Path { from, to, events } => {
            commands::path::run(&config, &from, &to, &events.into(), output)
        }
        Commands::Route { stops, start, end, events } => {
            let args = RouteArgs { stops, start, end };
            commands::route::run(&config, &args, &events.into(), output)
        }
        Commands::Modifiers { events, clear } => {
            commands::modifiers::run(&events.into(), &clear, output)
        }
        Commands::Export { format, output: path, highlight, events } => {
            commands::export::run(&config, &format, path, &highlight, &events.into())
        }
        Commands::Config { key } => {
            commands::config::run(&config, key.as_deref())
        }
        Commands::Completions { shell } => {
            commands::completions::run(shell, &mut Cli::command())
        }
    }
}
