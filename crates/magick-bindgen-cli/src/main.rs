//! magick-bindgen command-line tool
//!
//! Runs the binding generator outside of a build script: generate from a bindgen.toml,
//! inspect the descriptors of a declaration file, or expand it to Rust source.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use magick_bindgen::{QuantumSelection, TargetMode};
use magick_bindgen_cli::commands::{expand, generate, inspect};

#[derive(Parser)]
#[command(name = "magick-bindgen")]
#[command(about = "Binding generator for the native image library", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate every source listed in a configuration file
    Generate {
        /// Configuration file
        #[arg(short, long, default_value = "bindgen.toml")]
        config: PathBuf,
        /// Output directory
        #[arg(short, long)]
        out_dir: PathBuf,
        /// Override the configured target (full, minimal, conditional)
        #[arg(long)]
        target: Option<TargetMode>,
        /// Override the configured quantum selection (q8, q16, q16-hdri, all)
        #[arg(long)]
        quantum: Option<QuantumSelection>,
    },

    /// Print the descriptors of a declaration file as JSON
    Inspect {
        /// Declaration file
        file: PathBuf,
    },

    /// Print the code generated for a declaration file
    Expand {
        /// Declaration file
        file: PathBuf,
        /// Runtime crate path used in generated code
        #[arg(long)]
        runtime: Option<String>,
        /// Target (full, minimal, conditional)
        #[arg(long)]
        target: Option<TargetMode>,
        /// Quantum selection (q8, q16, q16-hdri, all)
        #[arg(long)]
        quantum: Option<QuantumSelection>,
        /// Also emit the linked extern "C" backend
        #[arg(long)]
        link_native: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    match cli.command {
        Commands::Generate {
            config,
            out_dir,
            target,
            quantum,
        } => {
            let written = generate::execute(
                &config,
                &out_dir,
                generate::GenerateOptions { target, quantum },
            )?;
            for path in written {
                println!("{}", path.display());
            }
        }

        Commands::Inspect { file } => {
            println!("{}", inspect::execute(&file)?);
        }

        Commands::Expand {
            file,
            runtime,
            target,
            quantum,
            link_native,
        } => {
            let options = expand::ExpandOptions {
                runtime,
                target,
                quantum,
                link_native,
            };
            print!("{}", expand::execute(&file, options)?);
        }
    }

    Ok(())
}
