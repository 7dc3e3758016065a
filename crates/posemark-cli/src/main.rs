mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "posemark", about = "Pose landmark annotation tool")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show image metadata and available pose results
    Info(commands::info::InfoArgs),
    /// Detect pose landmarks for an image
    Detect(commands::detect::DetectArgs),
    /// Render the skeletal overlay to an image file
    Export(commands::export::ExportArgs),
    /// Convert scores to letter grades
    Grade(commands::grade::GradeArgs),
    /// Print or save a default editor config
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Detect(args) => commands::detect::run(args),
        Commands::Export(args) => commands::export::run(args),
        Commands::Grade(args) => commands::grade::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
