// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! scadgraph CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use scadgraph::cli::{discover_csg_files, Reporter, Runner};
use scadgraph::{io, CompilerConfig, Kernel};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "scadgraph")]
#[command(about = "Compiles OpenSCAD CSG trees into geometry node graphs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a .csg file or JSON call stream into a scene document
    Compile {
        /// Input .csg or .json file
        input: PathBuf,

        /// Output JSON file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file (defaults to ./scadgraph.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the lowered call stream of a .csg file
    Calls {
        /// Input .csg file
        input: PathBuf,

        /// Output JSON file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Compile every .csg file found under the given paths
    Batch {
        /// Files or directories
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Directory receiving one scene JSON per input
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let outcome = match &cli.command {
        Commands::Compile {
            input,
            output,
            config,
        } => compile_command(input, output.as_deref(), config.as_deref(), cli.verbose),
        Commands::Calls {
            input,
            output,
            config,
        } => calls_command(input, output.as_deref(), config.as_deref()),
        Commands::Batch { paths, out, config } => {
            batch_command(paths, out.as_deref(), config.as_deref(), cli.verbose)
        }
        Commands::Version => {
            println!("scadgraph v{}", env!("CARGO_PKG_VERSION"));
            Ok(true)
        }
    };

    match outcome {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            Reporter::report_error(&format!("{:#}", e));
            std::process::exit(1);
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<CompilerConfig> {
    match path {
        Some(path) => Ok(CompilerConfig::from_file(path)?.with_env_overrides()),
        None => CompilerConfig::load(),
    }
}

fn compile_command(
    input: &Path,
    output: Option<&Path>,
    config: Option<&Path>,
    verbose: bool,
) -> Result<bool> {
    let kernel = Kernel::new(load_config(config)?);

    let start = Instant::now();
    let scene = kernel.compile_file(input)?;
    let duration = start.elapsed();

    if verbose {
        Reporter::report_scene(&input.display().to_string(), &scene, duration);
    } else {
        for warning in &scene.warnings {
            Reporter::report_warning(&warning.to_string());
        }
    }

    match output {
        Some(path) => {
            io::export_json(&scene, path)?;
            if verbose {
                Reporter::success(&format!("{} -> {}", input.display(), path.display()));
            }
        }
        None => println!("{}", io::to_json(&scene)?),
    }
    Ok(true)
}

fn calls_command(input: &Path, output: Option<&Path>, config: Option<&Path>) -> Result<bool> {
    let kernel = Kernel::new(load_config(config)?);
    let stream = kernel
        .load_stream(input)
        .with_context(|| format!("Failed to lower {}", input.display()))?;

    match output {
        Some(path) => io::export_stream(&stream, path)?,
        None => println!("{}", io::to_json(&stream)?),
    }
    Ok(true)
}

fn batch_command(
    paths: &[PathBuf],
    out: Option<&Path>,
    config: Option<&Path>,
    verbose: bool,
) -> Result<bool> {
    let files = discover_csg_files(paths);
    if files.is_empty() {
        Reporter::report_error("No .csg files found");
        return Ok(false);
    }
    if verbose {
        Reporter::report_info(&format!("Compiling {} files", files.len()));
    }

    let runner = Runner::new(Kernel::new(load_config(config)?));
    let reports = runner.run_batch(&files, out, verbose)?;
    let failed = Reporter::report_batch(&reports);
    Ok(failed == 0)
}
