//! duck-decode - recover files hidden in carrier images

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::Level;

use duck_decode::{DecodeCarrierUseCase, DecodeOptions};

#[derive(Parser, Debug)]
#[command(name = "duck-decode")]
#[command(author, version, about = "Decode hidden media from a carrier image", long_about = None)]
struct Args {
    /// Carrier image (PNG/JPG)
    image: PathBuf,

    /// Password for decryption (if required)
    #[arg(short, long)]
    password: Option<String>,

    /// Output file path or directory (default: auto-generate)
    #[arg(short = 'o', long = "out")]
    output: Option<PathBuf>,

    /// Output directory (alternative to --out)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Print the decode report as JSON
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Suppress progress output
    #[arg(short, long, default_value_t = false)]
    quiet: bool,

    /// Log every depth attempt
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn init_tracing(args: &Args) {
    let level = if args.quiet {
        Level::WARN
    } else if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args);

    let mut options = DecodeOptions::new(&args.image);
    if let Some(password) = &args.password {
        options = options.with_password(password);
    }
    if let Some(output) = &args.output {
        options = options.with_output(output);
    } else if let Some(dir) = &args.output_dir {
        options = options.with_output_dir(dir);
    }

    let report = DecodeCarrierUseCase::local().execute_to_report(&options);

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{}", json);
    } else if report.success && !args.quiet {
        println!("Successfully decoded carrier image!");
        println!("{}", report.summary());
    } else if !report.success {
        eprintln!("{}", report.summary());
    }

    if !report.success {
        std::process::exit(1);
    }

    Ok(())
}
