//! # Scrollstage CLI
//!
//! Runs pages headlessly and prints what the browser would show.
//!
//! ## Commands
//! - `simulate`: mount a page, apply scroll/tick/resize steps, print a JSON
//!   snapshot per step
//! - `schema`: print the JSON schema of the page request
//! - `sample`: print a ready-made request (`gallery` or `landing`)

mod simulate;
mod step;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use scrollstage::app::{demo_request, landing_request};
use scrollstage::schema::StageRequest;
use std::path::{Path, PathBuf};
use step::Step;

#[derive(Parser)]
#[command(name = "scrollstage")]
#[command(about = "Headless scroll-driven animation runner")]
#[command(version)]
struct Cli {
    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mount a page and print a snapshot after every step
    Simulate {
        /// Page request (.json); the demo gallery page when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// scroll=N, by=N, tick=S, run=S, end, resize=WxH, unmount=NAME
        #[arg(short, long = "step")]
        steps: Vec<Step>,

        /// Only print elements with this class
        #[arg(long)]
        select: Option<String>,
    },

    /// Print the JSON schema of the page request
    Schema {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print a sample page request
    Sample {
        #[arg(value_enum, default_value = "gallery")]
        which: SampleKind,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SampleKind {
    Gallery,
    Landing,
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("scrollstage=info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    match cli.command {
        Commands::Simulate {
            config,
            steps,
            select,
        } => cmd_simulate(config.as_deref(), &steps, select.as_deref()),
        Commands::Schema { output } => {
            let schema = schemars::schema_for!(StageRequest);
            emit(&serde_json::to_string_pretty(&schema)?, output.as_deref())
        }
        Commands::Sample { which, output } => {
            let request = match which {
                SampleKind::Gallery => demo_request(),
                SampleKind::Landing => landing_request(),
            };
            emit(&serde_json::to_string_pretty(&request)?, output.as_deref())
        }
    }
}

fn cmd_simulate(config: Option<&Path>, steps: &[Step], select: Option<&str>) -> Result<()> {
    let request = match config {
        Some(path) => simulate::load_request(path)?,
        None => demo_request(),
    };
    let mut frames = simulate::simulate(&request, steps)?;
    if let Some(class) = select {
        for frame in &mut frames {
            frame.retain_class(class);
        }
    }
    for frame in &frames {
        println!("{}", serde_json::to_string(frame)?);
    }
    Ok(())
}

fn emit(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, text)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            println!("{text}");
            Ok(())
        }
    }
}
