//! Batch recovery over a file or a directory tree.
//!
//! Every file is processed independently: a missing or undecodable map, or a
//! failure inside one file, never aborts its siblings. The batch joins on
//! all files before reporting.

use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::logging::{self, LogLevel};
use crate::recover::engine;
use crate::recover::inventory::Mode;
use crate::recover::RecoverOptions;
use crate::ui::formatter::Formatter;
use crate::RecoverError;

/// Outcome of one input file in a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileStatus {
    /// At least the recovery ran; outputs may still have failed individually.
    Recovered,
    /// Missing or undecodable map.
    Skipped,
    /// The file itself could not be processed.
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchEntry {
    pub input: PathBuf,
    pub status: FileStatus,
    pub mode: Option<Mode>,
    pub outputs_written: usize,
    pub outputs_failed: usize,
    pub detail: Option<String>,
}

/// Summary of a batch run.
#[derive(Debug, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub recovered: usize,
    pub skipped: usize,
    pub failed: usize,
    pub outputs_written: usize,
}

/// Recover a single file, or every minified file under a directory.
pub fn recover_path(input: &Path, options: &RecoverOptions) -> crate::Result<BatchSummary> {
    if !input.exists() {
        return Err(RecoverError::FileError(format!(
            "input path does not exist: {}",
            input.display()
        ))
        .into());
    }

    let targets = if input.is_dir() {
        collect_targets(input)
    } else {
        vec![input.to_path_buf()]
    };

    if targets.is_empty() {
        eprintln!(
            "{}",
            Formatter::warning(format!("No .js files found under {}", input.display()))
        );
    }

    logging::log_batch_start(targets.len());

    let entries: Vec<BatchEntry> = targets
        .par_iter()
        .map(|path| process_one(path, options))
        .collect();

    let summary = summarize(&entries);
    logging::log_batch_complete(summary.recovered, summary.skipped, summary.failed);
    if entries.len() > 1 {
        display_summary(&summary);
    }

    Ok(summary)
}

/// Minified candidates under `dir`: every `.js` file. A `.map` sibling is
/// input to its `.js` file, never a target itself.
fn collect_targets(dir: &Path) -> Vec<PathBuf> {
    let mut targets: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|path| path.extension().is_some_and(|ext| ext == "js"))
        .collect();
    targets.sort();
    targets
}

fn process_one(path: &Path, options: &RecoverOptions) -> BatchEntry {
    logging::log_processing_file(&path.to_string_lossy());

    match engine::recover_file(path, options) {
        Ok(report) => {
            for written in &report.written {
                println!(
                    "{}",
                    Formatter::success(format!("Source code recovered to {}", written.display()))
                );
            }
            BatchEntry {
                input: path.to_path_buf(),
                status: FileStatus::Recovered,
                mode: Some(report.mode),
                outputs_written: report.written.len(),
                outputs_failed: report.failed,
                detail: None,
            }
        }
        Err(err @ (RecoverError::MissingMap(_) | RecoverError::MalformedMap { .. })) => {
            eprintln!("{}", Formatter::warning(err.to_string()));
            logging::log_file_skipped(&path.to_string_lossy(), &err.to_string());
            BatchEntry {
                input: path.to_path_buf(),
                status: FileStatus::Skipped,
                mode: None,
                outputs_written: 0,
                outputs_failed: 0,
                detail: Some(err.to_string()),
            }
        }
        Err(err) => {
            eprintln!(
                "{}",
                Formatter::error(format!("Error: {}: {}", path.display(), err))
            );
            BatchEntry {
                input: path.to_path_buf(),
                status: FileStatus::Failed,
                mode: None,
                outputs_written: 0,
                outputs_failed: 0,
                detail: Some(err.to_string()),
            }
        }
    }
}

fn summarize(entries: &[BatchEntry]) -> BatchSummary {
    BatchSummary {
        total: entries.len(),
        recovered: entries
            .iter()
            .filter(|e| e.status == FileStatus::Recovered)
            .count(),
        skipped: entries
            .iter()
            .filter(|e| e.status == FileStatus::Skipped)
            .count(),
        failed: entries
            .iter()
            .filter(|e| e.status == FileStatus::Failed)
            .count(),
        outputs_written: entries.iter().map(|e| e.outputs_written).sum(),
    }
}

/// Display the batch summary in a formatted way
fn display_summary(summary: &BatchSummary) {
    logging::log_display("", LogLevel::Info);
    logging::log_display("=".repeat(60), LogLevel::Info);
    logging::log_display("  Batch Recovery Summary", LogLevel::Info);
    logging::log_display("=".repeat(60), LogLevel::Info);
    logging::log_display(format!("  Files:     {}", summary.total), LogLevel::Info);
    logging::log_display(
        format!(
            "  {}",
            Formatter::success(format!("Recovered: {}", summary.recovered))
        ),
        LogLevel::Info,
    );

    if summary.skipped > 0 {
        logging::log_display(
            format!(
                "  {}",
                Formatter::warning(format!("Skipped:   {}", summary.skipped))
            ),
            LogLevel::Warn,
        );
    }

    if summary.failed > 0 {
        logging::log_display(
            format!(
                "  {}",
                Formatter::error(format!("Failed:    {}", summary.failed))
            ),
            LogLevel::Error,
        );
    }

    logging::log_display(
        format!("  Outputs:   {}", summary.outputs_written),
        LogLevel::Info,
    );
    logging::log_display("=".repeat(60), LogLevel::Info);
}
