//! Layout normalizer: turns the upstream extractor's heterogeneous
//! element stream into a single ordered stream of typed blocks.
//!
//! Untagged lines are reclassified by heuristic (page furniture, heading
//! numbering, body text), and inline `[TABLE]:` / `[FIGURE]:` markers are
//! lifted out of body text into their own blocks so later stages never
//! split them. Purely functional — no state survives the call.

use std::collections::{HashMap, HashSet};

use docchunk_core::{Block, BlockRole, ChunkError, RawElement};

use crate::segmenter::heading_numbering;

const TABLE_MARKER: &str = "[TABLE]:";
const FIGURE_MARKER: &str = "[FIGURE]:";

/// Lines repeated verbatim on at least this many distinct pages are
/// treated as running headers/footers.
const FURNITURE_PAGE_THRESHOLD: usize = 3;

/// Normalize the raw element stream into typed blocks.
///
/// Fails with [`ChunkError::MalformedInput`] when nothing normalizes into
/// a block (empty document) — the only fatal condition in the pipeline.
pub fn normalize(elements: &[RawElement]) -> Result<Vec<Block>, ChunkError> {
    if elements.is_empty() {
        return Err(ChunkError::MalformedInput(
            "empty element stream".to_string(),
        ));
    }

    let furniture = detect_running_furniture(elements);
    let mut blocks: Vec<Block> = Vec::with_capacity(elements.len());

    let push = |blocks: &mut Vec<Block>, role: BlockRole, text: String, page: u32| {
        let sequence_index = blocks.len();
        blocks.push(Block {
            role,
            text,
            page_number: page,
            sequence_index,
        });
    };

    for element in elements {
        let role = match element.role {
            Some(role) if role != BlockRole::Unknown => role,
            _ => classify_untagged(&element.text, &furniture),
        };

        match role {
            BlockRole::BodyText => {
                for (part_role, part_text) in split_inline_markers(&element.text) {
                    push(&mut blocks, part_role, part_text, element.page_number);
                }
            }
            // Pure structural markers are kept even with an empty caption.
            BlockRole::Table | BlockRole::Figure => {
                push(
                    &mut blocks,
                    role,
                    element.text.trim().to_string(),
                    element.page_number,
                );
            }
            _ => {
                let text = element.text.trim();
                if !text.is_empty() {
                    push(&mut blocks, role, text.to_string(), element.page_number);
                }
            }
        }
    }

    if blocks.is_empty() {
        return Err(ChunkError::MalformedInput(
            "no blocks could be normalized from input".to_string(),
        ));
    }

    Ok(blocks)
}

/// Collect untagged line texts that repeat verbatim across enough pages
/// to count as running headers/footers.
fn detect_running_furniture(elements: &[RawElement]) -> HashSet<String> {
    let mut pages_by_text: HashMap<&str, HashSet<u32>> = HashMap::new();
    for element in elements {
        if element.role.is_some() {
            continue;
        }
        let text = element.text.trim();
        if text.is_empty() {
            continue;
        }
        pages_by_text
            .entry(text)
            .or_default()
            .insert(element.page_number);
    }
    pages_by_text
        .into_iter()
        .filter(|(_, pages)| pages.len() >= FURNITURE_PAGE_THRESHOLD)
        .map(|(text, _)| text.to_string())
        .collect()
}

/// Heuristic role for a line the extractor did not tag.
fn classify_untagged(text: &str, furniture: &HashSet<String>) -> BlockRole {
    let trimmed = text.trim();
    if trimmed.parse::<u64>().is_ok() {
        return BlockRole::PageNumber;
    }
    if furniture.contains(trimmed) {
        return BlockRole::PageHeader;
    }
    // Numbering followed by title text, e.g. "3.1 Scope of Work".
    if trimmed.split_whitespace().nth(1).is_some() && heading_numbering(trimmed).is_some() {
        return BlockRole::Heading;
    }
    BlockRole::BodyText
}

fn next_marker(text: &str) -> Option<(usize, BlockRole, usize)> {
    let table = text.find(TABLE_MARKER).map(|p| (p, BlockRole::Table, TABLE_MARKER.len()));
    let figure = text
        .find(FIGURE_MARKER)
        .map(|p| (p, BlockRole::Figure, FIGURE_MARKER.len()));
    match (table, figure) {
        (Some(t), Some(f)) => Some(if t.0 <= f.0 { t } else { f }),
        (Some(t), None) => Some(t),
        (None, Some(f)) => Some(f),
        (None, None) => None,
    }
}

/// Split body text around embedded table/figure markers.
///
/// Each marker becomes its own block carrying the caption text up to the
/// end of its line; the remaining suffix is re-scanned, preserving source
/// order. Text without markers passes through as a single body part.
fn split_inline_markers(text: &str) -> Vec<(BlockRole, String)> {
    let mut parts = Vec::new();
    let mut rest = text;

    while let Some((pos, role, marker_len)) = next_marker(rest) {
        let prefix = rest[..pos].trim();
        if !prefix.is_empty() {
            parts.push((BlockRole::BodyText, prefix.to_string()));
        }
        let after = &rest[pos + marker_len..];
        let (caption, tail) = match after.find('\n') {
            Some(nl) => (&after[..nl], &after[nl + 1..]),
            None => (after, ""),
        };
        parts.push((role, caption.trim().to_string()));
        rest = tail;
    }

    let tail = rest.trim();
    if !tail.is_empty() {
        parts.push((BlockRole::BodyText, tail.to_string()));
    }
    parts
}
