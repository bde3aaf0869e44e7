//! Choosing among several tables on the anchor's page.

use tracing::trace;

use super::Table;
use super::similarity::ratio;

/// Flatten a table for scoring: cells joined by spaces, rows by newlines.
///
/// Absent cells count as empty strings; rows without cells are skipped.
pub fn flatten_table(table: &Table) -> String {
    table
        .rows()
        .iter()
        .filter(|row| !row.is_empty())
        .map(|row| {
            row.iter()
                .map(|cell| cell.as_deref().unwrap_or(""))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Text following the first occurrence of `label` on the page, limited to `max_lines` lines.
///
/// The label is matched exactly first and case-insensitively second, so a
/// page found by the case-insensitive anchor search always yields context.
/// Returns `None` if the label does not occur at all.
pub fn context_text(page_text: &str, label: &str, max_lines: usize) -> Option<String> {
    let end = match page_text.find(label) {
        Some(start) => start + label.len(),
        None => find_ignore_case(page_text, label)?,
    };

    let context = page_text[end..]
        .trim()
        .split('\n')
        .take(max_lines)
        .collect::<Vec<_>>()
        .join("\n");
    Some(context)
}

/// Candidate whose flattened text is most similar to `context`.
///
/// Only a strictly greater score replaces the current best, so ties keep the
/// first candidate. Returns `None` when no candidate scores above zero.
pub fn best_match<'a>(candidates: &'a [Table], context: &str) -> Option<&'a Table> {
    let mut best_score = 0.0;
    let mut best = None;

    for (index, table) in candidates.iter().enumerate() {
        let score = ratio(context, &flatten_table(table));
        trace!("Candidate table {} scored {:.4}", index + 1, score);
        if score > best_score {
            best_score = score;
            best = Some(table);
        }
    }

    best
}

/// Byte offset just past the first case-insensitive occurrence of `needle`.
fn find_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }

    for (start, _) in haystack.char_indices() {
        let mut rest = haystack[start..].char_indices();
        let mut end = start;
        let mut matched = true;

        for n in needle.chars() {
            match rest.next() {
                Some((offset, h)) if h.to_lowercase().eq(n.to_lowercase()) => {
                    end = start + offset + h.len_utf8();
                }
                _ => {
                    matched = false;
                    break;
                }
            }
        }

        if matched {
            return Some(end);
        }
    }
    None
}
