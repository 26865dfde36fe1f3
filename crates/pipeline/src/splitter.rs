//! Content-aware splitter: breaks each section's block run into bounded
//! chunk spans, then balances span sizes.
//!
//! A span closes once the next block would push it over the token budget,
//! except table/figure markers: those are never divided and may push a
//! span over budget instead. A balancing pass then merges undersized
//! spans with a neighbor in the same section, provided the merged span
//! stays under a hard cap of one and a half budgets. Every section
//! yields at least one span, so even an empty section produces a chunk
//! carrying its structural metadata. Ordinals are assigned only after a
//! section fully resolves.

use docchunk_core::{Block, ChunkingConfig, SectionIndex};
use tracing::debug;

use crate::metrics::{count_tokens, render_block};

/// One bounded sub-run of a section's blocks, tagged with its position
/// among the section's spans.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkSpan {
    /// Slot of the owning section in the section index.
    pub section_slot: usize,
    /// Arena indices of the content blocks in this span, in source order.
    /// Empty for the mandatory span of an empty section.
    pub block_indices: Vec<usize>,
    /// 1-based ordinal within the section.
    pub ordinal: usize,
    /// Total spans emitted for the section.
    pub total: usize,
}

/// Split every section in index order, returning all spans in document
/// order.
pub fn split_all(
    blocks: &[Block],
    sections: &SectionIndex,
    config: &ChunkingConfig,
) -> Vec<ChunkSpan> {
    let mut spans = Vec::new();
    for (slot, section) in sections.iter().enumerate() {
        let runs = split_section(blocks, section.block_range.clone(), config.max_chunk_tokens);
        let runs = balance_runs(blocks, runs, config.min_chunk_tokens, config.max_chunk_tokens);
        let total = runs.len();
        for (i, block_indices) in runs.into_iter().enumerate() {
            spans.push(ChunkSpan {
                section_slot: slot,
                block_indices,
                ordinal: i + 1,
                total,
            });
        }
    }
    spans
}

/// Split one section's contiguous block range into bounded runs.
fn split_section(
    blocks: &[Block],
    range: std::ops::Range<usize>,
    max_tokens: usize,
) -> Vec<Vec<usize>> {
    let content: Vec<usize> = range
        .filter(|&i| !blocks[i].is_page_furniture())
        .collect();

    let mut runs: Vec<Vec<usize>> = Vec::new();
    let mut current: Vec<usize> = Vec::new();
    let mut current_tokens = 0usize;

    for &i in &content {
        let block = &blocks[i];
        let tokens = count_tokens(&render_block(block));

        // Markers are atomic: always appended, even over budget.
        if !current.is_empty() && !block.is_marker() && current_tokens + tokens > max_tokens {
            runs.push(std::mem::take(&mut current));
            current_tokens = 0;
        }
        current.push(i);
        current_tokens += tokens;
    }
    if !current.is_empty() {
        runs.push(current);
    }

    // Minimum one span per section, even with no content blocks.
    if runs.is_empty() {
        runs.push(Vec::new());
    }
    runs
}

fn run_tokens(blocks: &[Block], run: &[usize]) -> usize {
    run.iter()
        .map(|&i| count_tokens(&render_block(&blocks[i])))
        .sum()
}

/// Merge undersized adjacent runs within one section.
///
/// A run below `min_tokens` joins its neighbor when the merged run stays
/// within one and a half times `max_tokens`; the merged run is never
/// re-merged. Run order is preserved, so chunk content still reads in
/// source order.
fn balance_runs(
    blocks: &[Block],
    runs: Vec<Vec<usize>>,
    min_tokens: usize,
    max_tokens: usize,
) -> Vec<Vec<usize>> {
    if runs.len() <= 1 {
        return runs;
    }
    let merge_limit = max_tokens + max_tokens / 2;

    let mut balanced: Vec<Vec<usize>> = Vec::new();
    for run in runs {
        if let Some(prev) = balanced.last_mut() {
            let prev_tokens = run_tokens(blocks, prev);
            let tokens = run_tokens(blocks, &run);
            if (prev_tokens < min_tokens || tokens < min_tokens)
                && prev_tokens + tokens <= merge_limit
            {
                debug!(
                    merged_tokens = prev_tokens + tokens,
                    "merged undersized chunk span"
                );
                prev.extend(run);
                continue;
            }
        }
        balanced.push(run);
    }
    balanced
}
