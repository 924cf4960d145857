//! wiregen CLI
//!
//! # Usage
//!
//! ```bash
//! # Emit the selective builder
//! wiregen structures -i algorithm.ts -o ds_pipeline.js
//!
//! # Emit the string generator table
//! wiregen generators -i generator.ts -o generator_pipeline.js
//!
//! # Inspect the function table, order and flags as JSON
//! wiregen inspect -i algorithm.ts
//!
//! # What gets constructed when only `lcp_array` is requested
//! wiregen plan -i algorithm.ts --request lcp_array
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use wiregen::pipeline::{read_source, write_artifact};
use wiregen::{GenerationPipeline, GeneratorConfig};

#[derive(Parser)]
#[command(name = "wiregen")]
#[command(
    about = "Generate dependency-ordered builder code from annotated functions",
    long_about = None
)]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Emit the structure flags and builder routine
    Structures {
        /// Input source file
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Emit the string generator table
    Generators {
        /// Input source file
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print function table, order, flags and diagnostics as JSON
    Inspect {
        /// Input source file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Print the construction sequence for requested structures
    Plan {
        /// Input source file
        #[arg(short, long)]
        input: PathBuf,

        /// Requested output key (repeatable; all structures when omitted)
        #[arg(short, long = "request")]
        request: Vec<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "wiregen=warn",
        1 => "wiregen=debug",
        _ => "wiregen=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => GeneratorConfig::from_yaml(path)?,
        None => GeneratorConfig::default(),
    };
    let pipeline = GenerationPipeline::new(config)?;

    match cli.command {
        Commands::Structures { input, output } => {
            let source = read_source(&input)?;
            let generated = pipeline.run(&source)?;
            for diagnostic in &generated.diagnostics {
                eprintln!("{}", diagnostic);
            }
            emit(output, &generated.artifact)?;
        }
        Commands::Generators { input, output } => {
            let source = read_source(&input)?;
            emit(output, &pipeline.generators(&source))?;
        }
        Commands::Inspect { input } => {
            let source = read_source(&input)?;
            let generated = pipeline.run(&source)?;
            println!("{}", generated.report().to_json()?);
        }
        Commands::Plan { input, request } => {
            let source = read_source(&input)?;
            let generated = pipeline.run(&source)?;
            for slot in generated.sequence_for(&request)? {
                let external = generated.external_params(slot);
                if external.is_empty() {
                    println!("{:>3}  {:<32} {}", slot.bit, slot.key, slot.function);
                } else {
                    println!(
                        "{:>3}  {:<32} {} (external: {})",
                        slot.bit,
                        slot.key,
                        slot.function,
                        external.join(", ")
                    );
                }
            }
        }
    }

    Ok(())
}

fn emit(output: Option<PathBuf>, artifact: &str) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        Some(path) => write_artifact(path, artifact)?,
        None => print!("{}", artifact),
    }
    Ok(())
}
