//! Structured logging utilities for the recovery tool.
//!
//! This module provides helper functions for consistent, structured logging
//! across the application using the `tracing` crate.

use std::fmt;

/// Helper function to format and log multi-line output without structured
/// fields. Used for formatted displays like tables and summaries.
pub fn log_display<D: fmt::Display>(message: D, level: LogLevel) {
    let msg = message.to_string();
    match level {
        LogLevel::Info => tracing::info!("{}", msg),
        LogLevel::Warn => tracing::warn!("{}", msg),
        LogLevel::Error => tracing::error!("{}", msg),
        LogLevel::Debug => tracing::debug!("{}", msg),
    }
}

/// Log levels matching tracing crate levels.
#[derive(Debug, Clone, Copy)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
    Debug,
}

/// Log the start of processing for one minified file.
pub fn log_processing_file(path: &str) {
    tracing::info!(file = path, "Processing minified file");
}

/// Log a decoded source map.
pub fn log_map_loaded(path: &str, bytes: usize) {
    tracing::info!(map = path, bytes, "Source map loaded");
}

/// Log that the map embeds original text.
pub fn log_verbatim_mode(sources: usize) {
    tracing::info!(sources, "Map embeds original text, extracting verbatim");
}

/// Log fallback to positional reconstruction.
pub fn log_reconstruction_mode() {
    tracing::info!("No embedded text, reconstructing from mappings");
}

/// Log one recovered file hitting disk.
pub fn log_output_written(path: &str) {
    tracing::info!(output = path, "Recovered file written");
}

/// Log a per-output write failure. Sibling outputs continue.
pub fn log_write_failure(path: &str, error: &str) {
    tracing::warn!(output = path, error, "Failed to write recovered file");
}

/// Log a file skipped over a missing or undecodable map.
pub fn log_file_skipped(path: &str, reason: &str) {
    tracing::warn!(file = path, reason, "Skipping file");
}

/// Log the formatter falling back to unformatted text.
pub fn log_format_fallback(error: &str) {
    tracing::warn!(error, "Formatter failed, keeping unformatted output");
}

/// Log the start of a batch run.
pub fn log_batch_start(targets: usize) {
    tracing::info!(targets, "Starting batch recovery");
}

/// Log batch completion.
pub fn log_batch_complete(recovered: usize, skipped: usize, failed: usize) {
    tracing::info!(recovered, skipped, failed, "Batch recovery complete");
}
