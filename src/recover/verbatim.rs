//! Verbatim extraction: copy original text embedded in the map straight to
//! per-source output files. Exact, and preferred whenever available.

use std::path::{Path, PathBuf};

use super::inventory::SourceInventory;
use super::source_stem;

/// One output the extractor wants written: where, and exactly what.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedOutput {
    pub path: PathBuf,
    pub content: String,
}

/// Pair each embedded original text with its output location under
/// `out_dir`. Entries without embedded text are skipped silently; mixed
/// inventories are valid.
pub fn extract(inventory: &SourceInventory, out_dir: &Path) -> Vec<PlannedOutput> {
    inventory
        .entries()
        .iter()
        .filter_map(|entry| {
            let content = entry.content.clone()?;
            Some(PlannedOutput {
                path: out_dir.join(source_stem(&entry.id)),
                content,
            })
        })
        .collect()
}
