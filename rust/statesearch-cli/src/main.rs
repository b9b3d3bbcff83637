use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use statesearch_cli::config::resolve_options;
use statesearch_cli::grid::CharGrid;
use statesearch_cli::harvest::{self, Field};
use statesearch_cli::maze::{self, Maze};
use statesearch_cli::report::Report;

#[derive(Parser, Debug)]
#[command(name = "statesearch", version, about = "Solve grid puzzles with the statesearch engines")]
struct Args {
    /// Log search progress
    #[arg(long, global = true)]
    verbose: bool,

    /// Expansions between progress lines
    #[arg(long, value_name = "N", global = true)]
    lap: Option<u32>,

    /// Print the result as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Emit logs as JSON lines
    #[arg(long = "json-logs", global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Shortest route from S to E
    Maze {
        #[arg(long, value_name = "PATH")]
        input: PathBuf,

        /// Report every shortest route instead of one
        #[arg(long)]
        all: bool,
    },
    /// Richest walk of a fixed number of steps
    Harvest {
        #[arg(long, value_name = "PATH")]
        input: PathBuf,

        #[arg(long, value_name = "STEPS")]
        budget: i64,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if args.json_logs {
        fmt().with_env_filter(filter).json().with_writer(std::io::stderr).init();
    } else {
        fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
    }

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            error!("{e:#}");
            ExitCode::from(2)
        }
    }
}

fn run(args: Args) -> Result<bool> {
    let options = resolve_options(args.verbose, args.lap)?;
    info!(core_version = %statesearch_core::version(), verbose = options.verbose, lap = options.lap, "starting search");

    let (report, grid) = match args.command {
        Command::Maze { input, all } => {
            let grid = CharGrid::load(&input).with_context(|| format!("loading maze {}", input.display()))?;
            let m = Arc::new(Maze::from_grid(grid.clone()).context("parsing maze")?);
            let report = if all {
                Report::from_co_optimal("maze", &maze::solve_all(&m, options), |s| s.pos)
            } else {
                Report::from_outcome("maze", &maze::solve(&m, options), |s| s.pos)
            };
            (report, grid)
        }
        Command::Harvest { input, budget } => {
            let grid = CharGrid::load(&input).with_context(|| format!("loading field {}", input.display()))?;
            let field = Arc::new(Field::from_grid(grid.clone(), budget).context("parsing field")?);
            let report = Report::from_outcome("harvest", &harvest::solve(&field, options), |s| s.pos);
            (report, grid)
        }
    };

    if args.json {
        println!("{}", report.to_json()?);
    } else {
        println!("{}", report.render_text(&grid));
    }
    Ok(report.solved)
}
