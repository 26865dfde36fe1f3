//! Section segmenter: detects section boundaries from heading blocks and
//! builds the hierarchical section index.
//!
//! A heading at level L closes all open sections at level >= L; its parent
//! is the most recently opened section exactly one level up. Document
//! order always wins over numeric order — "3." followed by "2." is a
//! sibling, never a reorder. Non-numeric headings still open sections,
//! keyed by a synthetic ordinal scoped to this invocation.

use docchunk_core::{Block, Section, SectionIndex};
use tracing::debug;

/// Title given to the implicit section that catches blocks appearing
/// before any heading (or all blocks, when the document has none).
pub const UNSECTIONED_TITLE: &str = "Final Content Section";

/// Hierarchy path of the implicit unsectioned section.
pub const UNSECTIONED_PATH: &str = "0";

/// Parse a heading's leading numbering into its dot-separated components,
/// e.g. "3.1 Scope" -> ["3", "1"]. Trailing dots are tolerated ("2.").
/// Returns `None` for non-numeric headings.
pub fn heading_numbering(text: &str) -> Option<Vec<String>> {
    let trimmed = text.trim_start();
    let end = trimmed
        .find(char::is_whitespace)
        .unwrap_or(trimmed.len());
    let token = trimmed[..end].trim_end_matches('.');
    if token.is_empty() {
        return None;
    }
    let parts: Vec<&str> = token.split('.').collect();
    if parts
        .iter()
        .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
    {
        Some(parts.iter().map(|p| p.to_string()).collect())
    } else {
        None
    }
}

/// Build the section index from the normalized block stream.
///
/// Every content block lands in exactly one section: the one whose heading
/// most recently preceded it, or the implicit unsectioned fallback when no
/// heading has occurred yet. Page furniture is never assigned.
pub fn segment(blocks: &[Block]) -> SectionIndex {
    let mut index = SectionIndex::new();

    let heading_positions: Vec<usize> = blocks
        .iter()
        .enumerate()
        .filter(|(_, b)| b.is_heading())
        .map(|(i, _)| i)
        .collect();

    // Preamble (or the whole document when no headings exist) goes to the
    // unsectioned fallback rather than being discarded.
    let preamble_end = heading_positions.first().copied().unwrap_or(blocks.len());
    let preamble_has_content = blocks[..preamble_end]
        .iter()
        .any(|b| !b.is_page_furniture());
    if preamble_has_content || heading_positions.is_empty() {
        index.push(Section {
            title: UNSECTIONED_TITLE.to_string(),
            hierarchy: vec![UNSECTIONED_PATH.to_string()],
            level: 0,
            parent: None,
            block_range: 0..preamble_end,
            page_number: blocks.first().map(|b| b.page_number).unwrap_or(1),
        });
        debug!(blocks = preamble_end, "opened unsectioned fallback section");
    }

    // Stack of (level, slot) for currently open sections.
    let mut open: Vec<(usize, usize)> = Vec::new();
    let mut synthetic_ordinal = 0usize;

    for (k, &pos) in heading_positions.iter().enumerate() {
        let heading = &blocks[pos];
        let content_end = heading_positions
            .get(k + 1)
            .copied()
            .unwrap_or(blocks.len());

        let (hierarchy, level) = match heading_numbering(&heading.text) {
            Some(parts) => {
                let level = parts.len();
                (parts, level)
            }
            None => {
                // Malformed numbering: recovered with a synthetic ordinal,
                // never surfaced as an error.
                synthetic_ordinal += 1;
                (vec![synthetic_ordinal.to_string()], 0)
            }
        };

        while open.last().is_some_and(|&(l, _)| l >= level) {
            open.pop();
        }
        let parent = open
            .iter()
            .rev()
            .find(|&&(l, _)| l + 1 == level)
            .and_then(|&(_, slot)| index.get(slot))
            .map(|s| s.hierarchy.clone());

        let slot = index.push(Section {
            title: heading.text.trim().to_string(),
            hierarchy,
            level,
            parent,
            block_range: pos + 1..content_end,
            page_number: heading.page_number,
        });
        open.push((level, slot));
    }

    index
}
