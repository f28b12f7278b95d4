//! Sartor CLI — fitting runs, validation, and inspection.

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "sartor")]
#[command(version, about = "Sartor — accessory fitting and deformation-transfer engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a fitting pass from an input file.
    Fit {
        /// Path to the fitting input (JSON).
        #[arg(short, long)]
        input: String,

        /// Output report file path (JSON). Prints to stdout if omitted.
        #[arg(short, long)]
        output: Option<String>,

        /// Directory for per-garment result snapshots (binary).
        #[arg(short, long)]
        snapshots: Option<String>,
    },

    /// Validate a fitting input or parameter file.
    Validate {
        /// Path to input (.json) or parameters (.toml).
        path: String,
    },

    /// Inspect a result snapshot file.
    Inspect {
        /// Path to snapshot file.
        path: String,
    },

    /// Run a procedural demo scenario through the full pipeline.
    Demo {
        /// Which scenario to run (unit_square, sphere_shell).
        #[arg(short, long, default_value = "sphere_shell")]
        scenario: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Fit {
            input,
            output,
            snapshots,
        } => commands::fit(&input, output.as_deref(), snapshots.as_deref()),
        Commands::Validate { path } => commands::validate(&path),
        Commands::Inspect { path } => commands::inspect(&path),
        Commands::Demo { scenario } => commands::demo(&scenario),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
