//! sasgauge CLI - command-line interface for SAS complexity analysis

#![deny(warnings)]

// Global invariants enforced:
// - Deterministic output ordering
// - Identical input yields byte-for-byte identical output

use anyhow::Context;
use clap::{Parser, Subcommand};
use sasgauge_core::config::{self, ResolvedConfig};
use sasgauge_core::{analyze, render_json, render_markdown, render_text, AnalysisOptions};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "sasgauge")]
#[command(about = "Static complexity analysis for SAS sources")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze SAS files
    Analyze {
        /// Path to a SAS file or directory
        path: PathBuf,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Write the rendering to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Show only top N results
        #[arg(long)]
        top: Option<usize>,

        /// Minimum cyclomatic complexity to report
        #[arg(long)]
        min_complexity: Option<usize>,

        /// Explicit config file path (default: .sasgaugerc.json /
        /// sasgauge.config.json next to the input)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Markdown,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            path,
            format,
            output,
            top,
            min_complexity,
            config,
        } => {
            // Normalize path to absolute
            let normalized_path = if path.is_relative() {
                std::env::current_dir()?.join(&path)
            } else {
                path
            };

            // Validate path exists
            if !normalized_path.exists() {
                anyhow::bail!("Path does not exist: {}", normalized_path.display());
            }

            let resolved_config = resolve_config(&normalized_path, config.as_deref())?;

            let options = AnalysisOptions {
                min_complexity,
                top_n: top,
            };

            // Analyze
            let reports = analyze(&normalized_path, options, &resolved_config)?;

            // Render output
            let rendered = match format {
                OutputFormat::Text => render_text(&reports),
                OutputFormat::Json => {
                    let mut json = render_json(&reports)?;
                    json.push('\n');
                    json
                }
                OutputFormat::Markdown => render_markdown(&reports),
            };

            match output {
                Some(out_path) => {
                    std::fs::write(&out_path, rendered).with_context(|| {
                        format!("Failed to write report: {}", out_path.display())
                    })?;
                }
                None => {
                    print!("{}", rendered);
                }
            }
        }
    }

    Ok(())
}

/// Resolve configuration: explicit --config path wins, otherwise
/// discover a config file next to the input, otherwise defaults.
fn resolve_config(input: &Path, explicit: Option<&Path>) -> anyhow::Result<ResolvedConfig> {
    if let Some(config_path) = explicit {
        let loaded = config::load_config_file(config_path)?;
        return loaded.resolve();
    }

    let project_root = if input.is_file() {
        input
            .parent()
            .ok_or_else(|| anyhow::anyhow!("invalid file path"))?
    } else {
        input
    };

    match config::discover_config(project_root)? {
        Some((loaded, config_path)) => loaded
            .resolve()
            .with_context(|| format!("invalid config in: {}", config_path.display())),
        None => ResolvedConfig::defaults(),
    }
}
