//! Positional reconstruction: approximate original files by asking the
//! mapping index about every character of the minified text.

use std::collections::BTreeMap;

use crate::consumer::{OriginalLookup, OriginalPosition};

use super::GroupBy;

/// Per-original-file accumulation of reconstructed text: a sparse map from
/// line number to a growing line buffer. Contributions append at the tail
/// in generated-text iteration order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReconstructionBuffer {
    lines: BTreeMap<u32, String>,
}

impl ReconstructionBuffer {
    fn push_str(&mut self, line: u32, fragment: &str) {
        self.lines.entry(line).or_default().push_str(fragment);
    }

    fn push_char(&mut self, line: u32, ch: char) {
        self.lines.entry(line).or_default().push(ch);
    }

    pub fn line(&self, line: u32) -> Option<&str> {
        self.lines.get(&line).map(String::as_str)
    }

    /// Render as text. Lines run from 1 to the highest line seen; lines
    /// nothing mapped to stay empty.
    pub fn render(&self) -> String {
        let Some((&last, _)) = self.lines.iter().next_back() else {
            return String::new();
        };
        let mut out = String::new();
        for n in 1..=last {
            if n > 1 {
                out.push('\n');
            }
            if let Some(text) = self.lines.get(&n) {
                out.push_str(text);
            }
        }
        out
    }
}

/// Walk every character position of the minified text and re-assemble
/// per-source buffers from the mapping answers.
///
/// Unmapped columns contribute nothing: they are minifier artifacts with no
/// original location. A mapping that carries a name contributes the name;
/// any other mapped column contributes the minified character itself. The
/// result holds a buffer for exactly the sources the walk touched.
pub fn reconstruct<L: OriginalLookup>(
    minified: &str,
    lookup: &L,
    group_by: GroupBy,
) -> BTreeMap<String, ReconstructionBuffer> {
    let mut buffers: BTreeMap<String, ReconstructionBuffer> = BTreeMap::new();

    for (idx, line) in minified.lines().enumerate() {
        let generated_line = idx as u32 + 1;
        for (column, ch) in line.chars().enumerate() {
            let Some(position) = lookup.original_position_for(generated_line, column as u32)
            else {
                continue;
            };

            let OriginalPosition {
                source,
                line: original_line,
                name,
                ..
            } = position;
            let key = match group_by {
                GroupBy::OriginalLine => original_line,
                GroupBy::GeneratedLine => generated_line,
            };

            let buffer = buffers.entry(source).or_default();
            match name {
                Some(name) => buffer.push_str(key, &name),
                None => buffer.push_char(key, ch),
            }
        }
    }

    buffers
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Table-backed lookup for exercising the walk without a real map.
    struct TableLookup {
        table: HashMap<(u32, u32), OriginalPosition>,
    }

    impl TableLookup {
        fn new(entries: Vec<((u32, u32), OriginalPosition)>) -> Self {
            Self {
                table: entries.into_iter().collect(),
            }
        }
    }

    impl OriginalLookup for TableLookup {
        fn original_position_for(&self, line: u32, column: u32) -> Option<OriginalPosition> {
            self.table.get(&(line, column)).cloned()
        }
    }

    fn pos(source: &str, line: u32, column: u32, name: Option<&str>) -> OriginalPosition {
        OriginalPosition {
            source: source.to_string(),
            line,
            column,
            name: name.map(str::to_string),
        }
    }

    #[test]
    fn test_unmapped_columns_contribute_nothing() {
        let lookup = TableLookup::new(vec![((1, 1), pos("a.ts", 1, 0, None))]);
        let buffers = reconstruct("xyz", &lookup, GroupBy::OriginalLine);

        assert_eq!(buffers.len(), 1);
        assert_eq!(buffers["a.ts"].line(1), Some("y"));
        assert_eq!(buffers["a.ts"].render(), "y");
    }

    #[test]
    fn test_name_substitution_beats_literal_character() {
        // Column 1 maps with a name that happens to differ from the
        // minified character; the name must win.
        let lookup = TableLookup::new(vec![
            ((1, 0), pos("a.ts", 1, 0, None)),
            ((1, 1), pos("a.ts", 1, 1, Some("total"))),
            ((1, 2), pos("a.ts", 1, 6, None)),
        ]);
        let buffers = reconstruct("t=1", &lookup, GroupBy::OriginalLine);

        assert_eq!(buffers["a.ts"].render(), "ttotal1");
    }

    #[test]
    fn test_buffers_exist_only_for_touched_sources() {
        let lookup = TableLookup::new(vec![((1, 0), pos("only.ts", 1, 0, None))]);
        let buffers = reconstruct("ab", &lookup, GroupBy::OriginalLine);

        assert!(buffers.contains_key("only.ts"));
        assert_eq!(buffers.len(), 1);
    }

    #[test]
    fn test_contributions_fan_out_per_source() {
        let lookup = TableLookup::new(vec![
            ((1, 0), pos("a.ts", 1, 0, None)),
            ((1, 1), pos("b.ts", 1, 0, None)),
            ((1, 2), pos("a.ts", 1, 1, None)),
        ]);
        let buffers = reconstruct("xyz", &lookup, GroupBy::OriginalLine);

        assert_eq!(buffers["a.ts"].render(), "xz");
        assert_eq!(buffers["b.ts"].render(), "y");
    }

    #[test]
    fn test_group_by_original_line_redistributes() {
        // One generated line whose halves map to original lines 2 and 4.
        let lookup = TableLookup::new(vec![
            ((1, 0), pos("a.ts", 2, 0, None)),
            ((1, 1), pos("a.ts", 2, 1, None)),
            ((1, 2), pos("a.ts", 4, 0, None)),
        ]);
        let buffers = reconstruct("abc", &lookup, GroupBy::OriginalLine);
        let rendered = buffers["a.ts"].render();

        assert_eq!(rendered, "\nab\n\nc");
    }

    #[test]
    fn test_group_by_generated_line_keeps_walk_order() {
        let lookup = TableLookup::new(vec![
            ((1, 0), pos("a.ts", 2, 0, None)),
            ((1, 1), pos("a.ts", 2, 1, None)),
            ((1, 2), pos("a.ts", 4, 0, None)),
        ]);
        let buffers = reconstruct("abc", &lookup, GroupBy::GeneratedLine);

        assert_eq!(buffers["a.ts"].render(), "abc");
    }

    #[test]
    fn test_second_generated_line_opens_new_buffer_line() {
        let lookup = TableLookup::new(vec![
            ((1, 0), pos("a.ts", 1, 0, None)),
            ((2, 0), pos("a.ts", 2, 0, None)),
        ]);
        let buffers = reconstruct("x\ny", &lookup, GroupBy::GeneratedLine);

        assert_eq!(buffers["a.ts"].render(), "x\ny");
    }

    #[test]
    fn test_empty_input_produces_no_buffers() {
        let lookup = TableLookup::new(vec![]);
        let buffers = reconstruct("", &lookup, GroupBy::OriginalLine);
        assert!(buffers.is_empty());
    }
}
