//! Triad Inspect
//!
//! Prints the schema of a PLY file and, when it holds a triangle mesh, a
//! summary of the decoded mesh.

mod report;

use clap::Parser;
use report::Report;
use std::error::Error;
use std::path::PathBuf;
use tracing::debug;
use triad_data::PlyReader;

/// Inspect a PLY mesh file
#[derive(Parser, Debug)]
#[command(name = "triad-inspect")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to PLY file to inspect
    file: PathBuf,

    /// Only parse the header, don't decode the body
    #[arg(long)]
    header_only: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    debug!(file = %args.file.display(), header_only = args.header_only, "inspecting");
    let reader = PlyReader::open(&args.file)?;
    let report = Report::new(&reader, !args.header_only)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }
    Ok(())
}
