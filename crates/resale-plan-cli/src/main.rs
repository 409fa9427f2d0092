mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::business_plan::{BusinessPlanArgs, IrrArgs, PeriodsArgs};
use commands::property::CoefficientArgs;

/// Buy-renovate-resell business plans
#[derive(Parser)]
#[command(
    name = "rsp",
    version,
    about = "Buy-renovate-resell business plans",
    long_about = "Computes the business plan of a property bought, renovated and resold: \
                  cost breakdown, quarterly financing waterfall across primary credit, \
                  equity and secondary credit, margins and IRR. Inputs are JSON files \
                  or piped JSON."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log the per-period simulation to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the full business plan of a project
    BusinessPlan(BusinessPlanArgs),
    /// List the quarterly periods of a holding interval
    Periods(PeriodsArgs),
    /// Solve the IRR of a cash-flow series by bisection
    Irr(IrrArgs),
    /// Pricing coefficient from qualitative property characteristics
    Coefficient(CoefficientArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("resale_plan_core=debug,resale_plan_cli=debug"))
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("resale_plan_core=warn,resale_plan_cli=warn"))
    };

    // stdout carries the result; logs go to stderr
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::BusinessPlan(args) => commands::business_plan::run_business_plan(args),
        Commands::Periods(args) => commands::business_plan::run_periods(args),
        Commands::Irr(args) => commands::business_plan::run_irr(args),
        Commands::Coefficient(args) => commands::property::run_coefficient(args),
        Commands::Version => {
            println!("rsp {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
