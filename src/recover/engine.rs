//! Per-file orchestration: load the input pair, classify, run the selected
//! extractor, and persist the outputs.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::consumer::MapConsumer;
use crate::logging;
use crate::RecoverError;

use super::inventory::{Mode, SourceInventory};
use super::reconstruct::{self, ReconstructionBuffer};
use super::verbatim::{self, PlannedOutput};
use super::{source_stem, NameBy, RecoverOptions};

/// What happened to one input file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub input: PathBuf,
    pub mode: Mode,
    /// Outputs written, in emission order.
    pub written: Vec<PathBuf>,
    /// Outputs that failed to write. Failures are isolated per output.
    pub failed: usize,
}

/// Recover original sources for one minified file.
///
/// The map is expected next to the input as `<input>.map`. Verbatim content
/// embedded in the map wins over reconstruction for the whole file; the two
/// paths never mix. A missing or undecodable map is the caller's signal to
/// skip this file and move on.
pub fn recover_file(input: &Path, options: &RecoverOptions) -> Result<FileReport, RecoverError> {
    let map_path = map_path_for(input);
    if !map_path.exists() {
        return Err(RecoverError::MissingMap(map_path));
    }

    let minified = fs::read_to_string(input).map_err(|e| {
        RecoverError::FileError(format!("failed to read {}: {}", input.display(), e))
    })?;
    let raw_map = fs::read(&map_path).map_err(|e| {
        RecoverError::FileError(format!("failed to read {}: {}", map_path.display(), e))
    })?;

    let consumer = MapConsumer::from_slice(&raw_map, &map_path)?;
    logging::log_map_loaded(&map_path.to_string_lossy(), raw_map.len());

    let inventory = SourceInventory::from_consumer(&consumer);
    let out_dir = input
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let mode = inventory.classify();
    let outputs = match mode {
        Mode::Verbatim => {
            logging::log_verbatim_mode(inventory.len());
            verbatim::extract(&inventory, &out_dir)
        }
        Mode::Reconstructed => {
            logging::log_reconstruction_mode();
            let buffers = reconstruct::reconstruct(&minified, &consumer, options.group_by);
            plan_reconstructed(buffers, input, &out_dir, options)
        }
    };

    let mut written = Vec::new();
    let mut failed = 0;
    for output in outputs {
        match write_output(&output) {
            Ok(()) => {
                logging::log_output_written(&output.path.to_string_lossy());
                written.push(output.path);
            }
            Err(err) => {
                failed += 1;
                logging::log_write_failure(&output.path.to_string_lossy(), &err.to_string());
            }
        }
    }

    Ok(FileReport {
        input: input.to_path_buf(),
        mode,
        written,
        failed,
    })
}

/// The map sits next to the input as `<name>.map`.
fn map_path_for(input: &Path) -> PathBuf {
    let mut name = input
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".map");
    input.with_file_name(name)
}

/// Turn reconstruction buffers into planned outputs, applying the naming
/// policy and the formatting pass. Buffers are emitted in sorted source-id
/// order, which keeps `minified-file` naming deterministic.
fn plan_reconstructed(
    buffers: BTreeMap<String, ReconstructionBuffer>,
    input: &Path,
    out_dir: &Path,
    options: &RecoverOptions,
) -> Vec<PlannedOutput> {
    let input_stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "recovered".to_string());

    buffers
        .into_iter()
        .enumerate()
        .map(|(n, (source, buffer))| {
            let file_name = match options.name_by {
                NameBy::OriginalId => format!("{}-recovered.js", source_stem(&source)),
                NameBy::MinifiedFile if n == 0 => format!("{}-recovered.js", input_stem),
                NameBy::MinifiedFile => format!("{}-recovered.{}.js", input_stem, n),
            };

            let mut content = buffer.render();
            if let Some(formatter) = &options.formatter {
                content = formatter.format(&content);
            }

            PlannedOutput {
                path: out_dir.join(file_name),
                content,
            }
        })
        .collect()
}

fn write_output(output: &PlannedOutput) -> Result<(), RecoverError> {
    if let Some(parent) = output.path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| RecoverError::WriteError {
                path: output.path.clone(),
                reason: e.to_string(),
            })?;
        }
    }
    fs::write(&output.path, &output.content).map_err(|e| RecoverError::WriteError {
        path: output.path.clone(),
        reason: e.to_string(),
    })
}
