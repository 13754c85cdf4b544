//! eigenkit command-line interface.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};

mod commands;
mod output;

#[derive(Parser)]
#[command(name = "eigenkit")]
#[command(about = "Dense eigenvalue and linear system solvers")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// QR-decompose a matrix by modified Gram-Schmidt
    Qr {
        /// JSON problem file
        file: PathBuf,

        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compute eigenvalues by shifted QR iteration
    Eigen {
        /// JSON problem file
        file: PathBuf,

        /// Maximum number of QR iterations
        #[arg(long, default_value_t = 200, allow_negative_numbers = true)]
        max_iterations: i64,

        /// Stop once consecutive diagonals differ by less than this
        #[arg(long, default_value_t = 1e-20)]
        tolerance: f64,

        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Solve Ax = f by Gaussian elimination with partial pivoting
    Gauss {
        /// JSON problem file (needs `rhs`)
        file: PathBuf,

        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Solve Ax = f by steepest descent (A symmetric positive definite)
    Descent {
        /// JSON problem file (needs `rhs`)
        file: PathBuf,

        /// Maximum number of iterations
        #[arg(long, default_value_t = 100)]
        max_iterations: usize,

        /// Relative residual tolerance
        #[arg(long, default_value_t = 1e-12)]
        tolerance: f64,

        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the built-in validation suite against reference routines
    Validate {
        /// Only run cases whose name contains this pattern
        #[arg(long)]
        filter: Option<String>,

        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Qr { file, json } => commands::run_qr(&file, json).map(|_| true),
        Commands::Eigen {
            file,
            max_iterations,
            tolerance,
            json,
        } => commands::run_eigen(&file, max_iterations, tolerance, json).map(|_| true),
        Commands::Gauss { file, json } => commands::run_gauss(&file, json).map(|_| true),
        Commands::Descent {
            file,
            max_iterations,
            tolerance,
            json,
        } => commands::run_descent(&file, max_iterations, tolerance, json).map(|_| true),
        Commands::Validate { filter, json } => commands::run_validate(filter.as_deref(), json),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
