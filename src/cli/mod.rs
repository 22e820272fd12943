//! # CLI Module
//!
//! Command-line interface for the photo organizer.
//!
//! ## Usage
//! ```bash
//! # Organize photos into a date hierarchy (moves by default)
//! photo-organize organize --source ~/Camera --destination ~/Photos
//!
//! # Copy instead of moving
//! photo-organize organize --source ~/Camera --destination ~/Photos --copy
//!
//! # Delete reported duplicates after confirmation
//! photo-organize dedupe --report ~/Photos/duplicates.csv
//!
//! # Skip the confirmation prompt
//! photo-organize dedupe --report ~/Photos/duplicates.csv --yes
//! ```

use clap::{Parser, Subcommand};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use photo_organizer::core::{
    DedupeOutcome, DedupePipeline, OrganizeConfig, OrganizeOutcome, OrganizePipeline, TransferMode,
};
use photo_organizer::error::Result;
use std::path::PathBuf;

/// Photo Organizer - date-based organizing and safe duplicate removal
#[derive(Parser, Debug)]
#[command(name = "photo-organize")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Organize photos from source directories into a destination
    Organize {
        /// Source directories to scan for photos (repeatable)
        #[arg(long = "source", required = true)]
        sources: Vec<PathBuf>,

        /// Destination directory for the YYYY/MM/DD hierarchy
        #[arg(long)]
        destination: PathBuf,

        /// Copy files instead of moving them
        #[arg(long)]
        copy: bool,

        /// Where to write the duplicate report
        /// (default: <destination>/duplicates.csv)
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Delete duplicates listed in a report, after re-verification
    Dedupe {
        /// The duplicates.csv report to process
        #[arg(long)]
        report: PathBuf,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Organize {
            sources,
            destination,
            copy,
            report,
        } => run_organize(sources, destination, copy, report),
        Commands::Dedupe { report, yes } => run_dedupe(report, yes),
    }
}

fn run_organize(
    sources: Vec<PathBuf>,
    destination: PathBuf,
    copy: bool,
    report: Option<PathBuf>,
) -> Result<()> {
    let term = Term::stderr();

    let mode = if copy {
        TransferMode::Copy
    } else {
        TransferMode::Move
    };

    let mut config = OrganizeConfig::new(sources, destination, mode);
    if let Some(report_path) = report {
        config.report_path = report_path;
    }
    let report_path = config.report_path.clone();

    // Setup validation happens here; failures abort before any file work
    let pipeline = OrganizePipeline::new(config)?;

    let progress = ProgressBar::new(0);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("█▓░"),
    );

    let outcome = pipeline.run(|done, total, path| {
        if progress.length() != Some(total as u64) {
            progress.set_length(total as u64);
        }
        progress.set_position(done as u64);
        if let Some(name) = path.file_name() {
            progress.set_message(name.to_string_lossy().into_owned());
        }
    })?;

    progress.finish_and_clear();
    print_organize_summary(&term, &outcome, &report_path);

    Ok(())
}

fn run_dedupe(report: PathBuf, yes: bool) -> Result<()> {
    let term = Term::stderr();

    let pipeline = DedupePipeline::new(&report)?;

    let prompt_term = term.clone();
    let outcome = pipeline.run(|count| {
        if yes {
            return true;
        }
        confirm_deletion(&prompt_term, count)
    })?;

    print_dedupe_summary(&term, &outcome);
    Ok(())
}

/// Ask once whether the whole verified batch may be deleted
fn confirm_deletion(term: &Term, count: usize) -> bool {
    term.write_line(&format!(
        "{} verified duplicate file(s) will be {}.",
        style(count).cyan(),
        style("permanently deleted").red().bold()
    ))
    .ok();
    term.write_str("Proceed? [y/N] ").ok();

    match term.read_line() {
        Ok(answer) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}

fn print_organize_summary(term: &Term, outcome: &OrganizeOutcome, report_path: &std::path::Path) {
    term.write_line("").ok();
    term.write_line(&format!("{} Organize Complete", style("✓").green().bold()))
        .ok();
    term.write_line("").ok();

    term.write_line(&format!(
        "  {} photos organized",
        style(outcome.organized).cyan()
    ))
    .ok();
    term.write_line(&format!(
        "  {} duplicates recorded",
        style(outcome.duplicates).cyan()
    ))
    .ok();

    if outcome.fallback_dates > 0 {
        term.write_line(&format!(
            "  {} files dated by modification time (no EXIF)",
            style(outcome.fallback_dates).yellow()
        ))
        .ok();
    }

    if outcome.errors > 0 {
        term.write_line(&format!(
            "  {} files could not be processed (see log)",
            style(outcome.errors).red()
        ))
        .ok();
    }

    if outcome.duplicates > 0 {
        term.write_line("").ok();
        term.write_line(&format!(
            "  Review {} and run {} to remove duplicates.",
            style(report_path.display()).bold(),
            style("photo-organize dedupe").bold()
        ))
        .ok();
    }
}

fn print_dedupe_summary(term: &Term, outcome: &DedupeOutcome) {
    term.write_line("").ok();
    term.write_line(&format!("{} Dedupe Complete", style("✓").green().bold()))
        .ok();
    term.write_line("").ok();

    term.write_line(&format!(
        "  {} duplicates deleted",
        style(outcome.deleted).cyan()
    ))
    .ok();
    term.write_line(&format!(
        "  {} records skipped",
        style(outcome.skipped).cyan()
    ))
    .ok();

    if outcome.skipped > 0 {
        term.write_line("").ok();
        term.write_line(
            &style("Skipped records were not verified safe to delete. Nothing was removed for them.")
                .dim()
                .to_string(),
        )
        .ok();
    }
}
