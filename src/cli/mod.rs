//! # CLI Module
//!
//! Command-line interface for the duplicate image finder.
//!
//! ## Usage
//! ```bash
//! # Scan a directory for near-duplicates
//! imgdup scan ~/Pictures
//!
//! # Recurse, use the DCT hash, and move duplicates aside
//! imgdup scan ~/Pictures --recursive --algorithm perceptual --move-to ~/dups
//!
//! # Accuracy preset instead of a raw bit threshold
//! imgdup scan ~/Pictures --accuracy 0
//!
//! # JSON output for scripting
//! imgdup scan ~/Pictures --output json
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use console::{style, Term};
use imgdup::core::hasher::AlgorithmKind;
use imgdup::core::pipeline::{Pipeline, PipelineResult};
use imgdup::error::{ImgdupError, Result};
use imgdup::events::{Event, EventChannel, HashEvent, IndexEvent, PipelineEvent, ScanEvent};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::thread;

/// imgdup - find near-duplicate images by perceptual hash
#[derive(Parser, Debug)]
#[command(name = "imgdup")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan directories for near-duplicate images
    Scan {
        /// Directories to scan
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Maximum differing bits for a duplicate (exclusive, 0-64)
        #[arg(short, long, default_value = "5", conflicts_with = "accuracy")]
        threshold: u32,

        /// Accuracy preset: 0 strictest .. 3 loosest (threshold = 2 + 3*accuracy)
        #[arg(short = 'A', long, value_parser = clap::value_parser!(u32).range(0..=3))]
        accuracy: Option<u32>,

        /// Hash algorithm to use
        #[arg(short, long, default_value = "difference")]
        algorithm: Algorithm,

        /// Move duplicates into this directory (must exist)
        #[arg(short, long, value_name = "DIR")]
        move_to: Option<PathBuf>,

        /// Descend into subdirectories
        #[arg(short, long)]
        recursive: bool,

        /// Include hidden files
        #[arg(long)]
        include_hidden: bool,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Algorithm {
    /// Average hash - fast, good for exact duplicates
    Average,
    /// Difference hash - good balance (default)
    Difference,
    /// Perceptual hash - DCT-based, most robust to edits
    Perceptual,
}

impl From<Algorithm> for AlgorithmKind {
    fn from(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Average => AlgorithmKind::Average,
            Algorithm::Difference => AlgorithmKind::Difference,
            Algorithm::Perceptual => AlgorithmKind::Perceptual,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
    /// Minimal output (duplicate paths only)
    Minimal,
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            paths,
            threshold,
            accuracy,
            algorithm,
            move_to,
            recursive,
            include_hidden,
            output,
            verbose,
        } => {
            let threshold = match accuracy {
                Some(accuracy) => 2 + accuracy * 3,
                None => threshold,
            };
            run_scan(
                paths,
                threshold,
                algorithm.into(),
                move_to,
                recursive,
                include_hidden,
                output,
                verbose,
            )
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn run_scan(
    paths: Vec<PathBuf>,
    threshold: u32,
    algorithm: AlgorithmKind,
    move_to: Option<PathBuf>,
    recursive: bool,
    include_hidden: bool,
    output: OutputFormat,
    verbose: bool,
) -> Result<()> {
    let term = Term::stderr();

    if let Some(ref destination) = move_to {
        if !destination.is_dir() {
            return Err(ImgdupError::Config(format!(
                "directory '{}' does not exist",
                destination.display()
            )));
        }
    }

    if matches!(output, OutputFormat::Pretty) {
        term.write_line(&format!(
            "{} {}",
            style("imgdup").bold().cyan(),
            style(format!("({algorithm}, distance < {threshold})")).dim()
        ))
        .ok();
        if let Some(ref destination) = move_to {
            term.write_line(&format!(
                "Moving duplicates to {}",
                style(destination.display()).yellow()
            ))
            .ok();
        }
        term.write_line("").ok();
    }

    let pipeline = Pipeline::builder()
        .paths(paths)
        .algorithm(algorithm)
        .threshold(threshold)
        .recursive(recursive)
        .include_hidden(include_hidden)
        .move_to(move_to)
        .build();

    let (sender, receiver) = EventChannel::new();

    let progress = if matches!(output, OutputFormat::Pretty) {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("█▓░"),
        );
        Some(pb)
    } else {
        None
    };

    let progress_clone = progress.clone();
    let event_thread = thread::spawn(move || {
        for event in receiver.iter() {
            match event {
                Event::Pipeline(PipelineEvent::PhaseChanged { phase }) => {
                    if let Some(ref pb) = progress_clone {
                        pb.set_message(phase.to_string());
                    }
                }
                Event::Scan(ScanEvent::Completed { total_images }) => {
                    if let Some(ref pb) = progress_clone {
                        pb.set_length(total_images as u64);
                    }
                }
                Event::Hash(HashEvent::Progress(p)) => {
                    if let Some(ref pb) = progress_clone {
                        pb.set_position(p.completed as u64);
                        if verbose {
                            pb.set_message(
                                p.current_path
                                    .file_name()
                                    .unwrap_or_default()
                                    .to_string_lossy()
                                    .into_owned(),
                            );
                        }
                    }
                }
                Event::Index(IndexEvent::DuplicateFound {
                    path,
                    representative,
                    distance,
                }) if verbose => {
                    if let Some(ref pb) = progress_clone {
                        pb.println(format!(
                            "duplicate: {} ~ {} (distance {})",
                            path.display(),
                            representative.display(),
                            distance
                        ));
                    }
                }
                Event::Pipeline(PipelineEvent::Completed { .. }) => {
                    if let Some(ref pb) = progress_clone {
                        pb.finish_and_clear();
                    }
                }
                _ => {}
            }
        }
    });

    let result = pipeline.run_with_events(&sender);

    // Drop the sender so the event thread sees the end of the stream
    drop(sender);
    event_thread.join().ok();

    // An aborted run never emits Completed; clear the bar before reporting
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    let result = result?;

    match output {
        OutputFormat::Pretty => print_pretty_results(&term, &result, verbose),
        OutputFormat::Json => print_json_results(&result),
        OutputFormat::Minimal => print_minimal_results(&result),
    }

    Ok(())
}

fn print_pretty_results(term: &Term, result: &PipelineResult, verbose: bool) {
    term.write_line(&format!("{} Scan complete", style("✓").green().bold()))
        .ok();
    term.write_line("").ok();

    term.write_line(&format!(
        "  {} images hashed in {:.1}s",
        style(result.total_images).cyan(),
        result.duration_ms as f64 / 1000.0
    ))
    .ok();

    let duplicate_groups = result.duplicate_groups().count();
    term.write_line(&format!(
        "  {} duplicate groups, {} duplicates",
        style(duplicate_groups).cyan(),
        style(result.duplicate_count()).cyan()
    ))
    .ok();

    if !result.relocated.is_empty() {
        term.write_line(&format!(
            "  {} files moved",
            style(result.relocated.len()).yellow()
        ))
        .ok();
    }

    if !result.errors.is_empty() {
        term.write_line(&format!(
            "  {} files skipped or failed",
            style(result.errors.len()).red()
        ))
        .ok();
        if verbose {
            for error in &result.errors {
                term.write_line(&format!("    {}", style(error).dim())).ok();
            }
        }
    }

    term.write_line("").ok();

    if duplicate_groups == 0 {
        term.write_line("  No duplicates found.").ok();
        return;
    }

    term.write_line(&format!("{}", style("Duplicate groups:").bold().underlined()))
        .ok();
    term.write_line("").ok();

    for (i, group) in result.duplicate_groups().enumerate() {
        term.write_line(&format!(
            "  {} ({} duplicates)",
            style(format!("Group {}:", i + 1)).bold(),
            group.duplicate_count()
        ))
        .ok();

        let fingerprint = if verbose {
            format!("  [{}]", group.representative.fingerprint)
        } else {
            String::new()
        };
        term.write_line(&format!(
            "    {} {}{}",
            style("★").green(),
            group.representative.path.display(),
            style(fingerprint).dim()
        ))
        .ok();

        for member in &group.members {
            let fingerprint = if verbose {
                format!("  [{}]", member.fingerprint)
            } else {
                String::new()
            };
            term.write_line(&format!(
                "    {} {}{}",
                style(">").dim(),
                member.path.display(),
                style(fingerprint).dim()
            ))
            .ok();
        }

        term.write_line("").ok();
    }
}

fn print_json_results(result: &PipelineResult) {
    let output = serde_json::json!({
        "total_images": result.total_images,
        "duplicate_groups": result.duplicate_groups().count(),
        "duplicate_count": result.duplicate_count(),
        "relocated": result.relocated,
        "errors": result.errors,
        "duration_ms": result.duration_ms,
        "groups": result.duplicate_groups().map(|g| {
            serde_json::json!({
                "representative": g.representative,
                "members": g.members,
            })
        }).collect::<Vec<_>>(),
    });

    match serde_json::to_string_pretty(&output) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("failed to serialize results: {e}"),
    }
}

fn print_minimal_results(result: &PipelineResult) {
    for group in result.duplicate_groups() {
        for member in &group.members {
            println!("{}", member.path.display());
        }
    }
}
