//! CLI tool for converting HTML slide decks to PPTX.

use anyhow::{Context, Result};
use clap::Parser;
use deck_pptx::Converter;
use std::path::PathBuf;
use std::process::ExitCode;

/// Convert HTML slide decks to PowerPoint (PPTX) format.
#[derive(Parser, Debug)]
#[command(name = "html2pptx")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input HTML file
    input: PathBuf,

    /// Output PPTX file path (default: input name with .pptx extension)
    output: Option<PathBuf>,

    /// Force native package construction (staged directory + direct zip)
    #[arg(long)]
    native: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    match run(&args) {
        Ok(path) => {
            println!("Created {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Run one conversion, returning the resolved output path.
fn run(args: &Args) -> Result<PathBuf> {
    log::debug!("converting {}", args.input.display());

    let converter = Converter::new().native(args.native);
    let path = converter
        .convert_file(&args.input, args.output.as_deref())
        .with_context(|| format!("failed to convert {}", args.input.display()))?;

    Ok(path)
}
