use serde::Serialize;

use crate::consumer::MapConsumer;

/// One declared original file: its identifier and, when the map embeds it,
/// its verbatim text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    pub id: String,
    pub content: Option<String>,
}

/// Recovery mode for one input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// The map embeds original text; copy it out exactly.
    Verbatim,
    /// No embedded text; approximate from positional mappings.
    Reconstructed,
}

/// The ordered list of original files a map declares. Duplicate identifiers
/// are permitted and treated as the same logical file.
#[derive(Debug, Default)]
pub struct SourceInventory {
    entries: Vec<SourceEntry>,
}

impl SourceInventory {
    pub fn from_consumer(consumer: &MapConsumer) -> Self {
        let mut entries = Vec::with_capacity(consumer.source_count() as usize);
        for idx in 0..consumer.source_count() {
            let Some(id) = consumer.source(idx) else {
                continue;
            };
            entries.push(SourceEntry {
                id: id.to_string(),
                content: consumer.source_content(idx).map(str::to_string),
            });
        }
        Self { entries }
    }

    pub fn from_entries(entries: Vec<SourceEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[SourceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Decide how this file is recovered.
    ///
    /// Embedded text, even partial, is authoritative: a single non-null
    /// entry puts the whole file in verbatim mode and disables
    /// reconstruction entirely.
    pub fn classify(&self) -> Mode {
        if self.entries.iter().any(|e| e.content.is_some()) {
            Mode::Verbatim
        } else {
            Mode::Reconstructed
        }
    }
}
