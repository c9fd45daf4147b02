//! QATG Command-Line Interface
//!
//! Generates activation test templates for the faults described in a YAML
//! run file.
//!
//! ```text
//! qatg generate --config run.yaml --output templates.json
//! qatg synthesize --basis ibm --theta 0.5 --phi -1.0 --lambda 2.0
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{generate, synthesize, version};

/// QATG - activation test template generation for quantum gate faults
#[derive(Parser)]
#[command(name = "qatg")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate test templates for every fault in a run file
    Generate {
        /// Run file (YAML)
        #[arg(short, long, env = "QATG_CONFIG")]
        config: String,

        /// Output file for the JSON report (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Hide the progress bar
        #[arg(long)]
        quiet: bool,
    },

    /// Synthesize U(theta, phi, lambda) into a basis gate set
    Synthesize {
        /// Basis preset (ibm, u3, zyz) or comma-separated gate list
        #[arg(short, long, default_value = "ibm")]
        basis: String,

        /// Rotation angle theta
        #[arg(long, allow_hyphen_values = true)]
        theta: f64,

        /// Rotation angle phi
        #[arg(long, allow_hyphen_values = true)]
        phi: f64,

        /// Rotation angle lambda
        #[arg(long, allow_hyphen_values = true)]
        lambda: f64,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Generate {
            config,
            output,
            quiet,
        } => generate::execute(&config, output.as_deref(), quiet),

        Commands::Synthesize {
            basis,
            theta,
            phi,
            lambda,
        } => synthesize::execute(&basis, [theta, phi, lambda]),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
