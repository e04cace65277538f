use chrono::DateTime;
use std::collections::HashMap;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::{UnicodeWidthStr, UnicodeWidthChar};

use crate::git_backend::CommitDetails;
use crate::visible::CommitGraphView;

/// Display-width helpers for terminal output.
pub struct TextMeasure;

impl TextMeasure {
    /// Terminal display width of a string.
    pub fn width(text: &str) -> usize {
        UnicodeWidthStr::width(text)
    }

    /// Truncate to fit a display width, preserving grapheme boundaries.
    pub fn truncate(text: &str, max_width: usize) -> String {
        if Self::width(text) <= max_width {
            return text.to_string();
        }

        let ellipsis_width = UnicodeWidthChar::width('…').unwrap_or(1);
        let mut result = String::new();
        let mut current = 0;

        for grapheme in text.graphemes(true) {
            let grapheme_width = UnicodeWidthStr::width(grapheme);
            if current + grapheme_width + ellipsis_width > max_width {
                break;
            }
            result.push_str(grapheme);
            current += grapheme_width;
        }

        result.push('…');
        result
    }

    /// Pad on the right to an exact display width.
    pub fn pad(text: &str, target_width: usize) -> String {
        let width = Self::width(text);
        if width >= target_width {
            return Self::truncate(text, target_width);
        }
        format!("{}{}", text, " ".repeat(target_width - width))
    }
}

/// Renders the visible commit graph as plain text, one row per node.
///
/// Columns are the layout lanes present among the visible nodes, ranked
/// left to right; a node's row carries `●` on its lane, and a lane shows
/// `│` on every row strictly between its first and last visible node.
pub struct GraphRenderer {
    summary_width: usize,
}

impl GraphRenderer {
    pub fn new() -> Self {
        Self { summary_width: 50 }
    }

    pub fn with_summary_width(summary_width: usize) -> Self {
        Self { summary_width }
    }

    pub fn render(&self, view: &CommitGraphView<'_, String>, details: &[CommitDetails]) -> String {
        let lanes: Vec<u32> = (0..view.visible_count())
            .map(|v| view.layout_index_of(v))
            .collect();

        // rank the lanes present among visible nodes
        let mut distinct = lanes.clone();
        distinct.sort_unstable();
        distinct.dedup();
        let column: HashMap<u32, usize> = distinct
            .iter()
            .enumerate()
            .map(|(col, &lane)| (lane, col))
            .collect();

        // rows between which each column is alive
        let mut first_row = vec![usize::MAX; distinct.len()];
        let mut last_row = vec![0; distinct.len()];
        for (row, lane) in lanes.iter().enumerate() {
            let col = column[lane];
            if first_row[col] == usize::MAX {
                first_row[col] = row;
            }
            last_row[col] = row;
        }

        let mut out = String::new();
        for (row, lane) in lanes.iter().enumerate() {
            let node_col = column[lane];
            for col in 0..distinct.len() {
                if col == node_col {
                    out.push('●');
                } else if first_row[col] < row && row < last_row[col] {
                    out.push('│');
                } else {
                    out.push(' ');
                }
                out.push(' ');
            }

            let id = view.commit_id_of(row);
            let short_id = &id[..id.len().min(8)];
            let node = view.permanent_index_of(row);
            out.push_str(&format!(
                "{} {} {}\n",
                short_id,
                format_date(view.timestamp_of(row)),
                TextMeasure::truncate(&details[node as usize].summary, self.summary_width),
            ));
        }

        out
    }
}

impl Default for GraphRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn format_date(timestamp_ms: i64) -> String {
    DateTime::from_timestamp(timestamp_ms / 1000, 0)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
