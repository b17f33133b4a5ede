//! The source reconstruction engine: inventory classification, verbatim
//! extraction, and positional reconstruction.

pub mod engine;
pub mod inventory;
pub mod reconstruct;
pub mod verbatim;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::format::CodeFormatter;

/// Which line number keys a reconstructed contribution.
///
/// Both policies occur in the wild; neither is more correct than the other,
/// so the choice is exposed instead of hard-wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroupBy {
    /// Accumulate into the original line a position maps back to.
    OriginalLine,
    /// Accumulate into the generated line the contribution came from.
    GeneratedLine,
}

/// How reconstructed output files are named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NameBy {
    /// One file per original identifier, named after that identifier.
    OriginalId,
    /// Files named after the minified input itself.
    MinifiedFile,
}

/// Resolved per-run options for the recovery engine.
#[derive(Debug, Clone)]
pub struct RecoverOptions {
    pub group_by: GroupBy,
    pub name_by: NameBy,
    /// Formatting pass for reconstructed output; `None` skips it.
    pub formatter: Option<CodeFormatter>,
}

impl Default for RecoverOptions {
    fn default() -> Self {
        Self {
            group_by: GroupBy::OriginalLine,
            name_by: NameBy::OriginalId,
            formatter: None,
        }
    }
}

/// Basename of a source identifier with the minifier's `.js` naming
/// convention stripped. A naming convention, not path parsing: any other
/// extension stays.
pub(crate) fn source_stem(id: &str) -> String {
    let base = Path::new(id)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| id.to_string());
    match base.strip_suffix(".js") {
        Some(stripped) => stripped.to_string(),
        None => base,
    }
}
