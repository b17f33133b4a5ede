//! Adapter over the `sourcemap` crate's decoded mapping index.
//!
//! The rest of the crate never touches `sourcemap` types directly: the
//! reconstruction walk queries through [`OriginalLookup`] and the inventory
//! reads sources through [`MapConsumer`] accessors.

use std::path::Path;

use sourcemap::SourceMap;

use crate::RecoverError;

/// A single original-position answer from the mapping index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginalPosition {
    /// Original file identifier as declared by the map.
    pub source: String,
    /// 1-based original line.
    pub line: u32,
    /// 0-based original column.
    pub column: u32,
    /// Symbol name recorded for this mapping, reported only at the
    /// mapping's anchor column.
    pub name: Option<String>,
}

/// Point lookup over a decoded mapping index.
///
/// Generated positions use a 1-based line and a 0-based column. An unmapped
/// position answers `None`; a lookup never fails.
pub trait OriginalLookup {
    fn original_position_for(&self, line: u32, column: u32) -> Option<OriginalPosition>;
}

/// Owns one decoded source map for the duration of a single file's
/// processing.
pub struct MapConsumer {
    map: SourceMap,
}

impl std::fmt::Debug for MapConsumer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapConsumer")
            .field("source_count", &self.map.get_source_count())
            .finish()
    }
}

impl MapConsumer {
    /// Decode a raw `.map` document. Any JSON or VLQ decoding failure is a
    /// malformed map, reported against `path`.
    pub fn from_slice(bytes: &[u8], path: &Path) -> Result<Self, RecoverError> {
        let map = SourceMap::from_slice(bytes).map_err(|e| RecoverError::MalformedMap {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(Self { map })
    }

    /// Number of original files the map declares.
    pub fn source_count(&self) -> u32 {
        self.map.get_source_count()
    }

    /// Original file identifier at index `idx`.
    pub fn source(&self, idx: u32) -> Option<&str> {
        self.map.get_source(idx)
    }

    /// Embedded original text for source `idx`, when the map carries it.
    pub fn source_content(&self, idx: u32) -> Option<&str> {
        self.map.get_source_contents(idx)
    }
}

impl OriginalLookup for MapConsumer {
    fn original_position_for(&self, line: u32, column: u32) -> Option<OriginalPosition> {
        let token = self.map.lookup_token(line.checked_sub(1)?, column)?;

        // lookup_token answers with the nearest preceding mapping; a match
        // from an earlier generated line does not cover this position.
        if token.get_dst_line() + 1 != line {
            return None;
        }

        let source = token.get_source()?.to_string();

        // A name anchors at its mapping's start column. Columns covered by
        // the same mapping carry position only, so the name contributes
        // once, not once per covered character.
        let name = if token.get_dst_col() == column {
            token.get_name().map(str::to_string)
        } else {
            None
        };

        Some(OriginalPosition {
            source,
            line: token.get_src_line() + 1,
            column: token.get_src_col(),
            name,
        })
    }
}
