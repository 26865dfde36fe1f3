//! Structure-aware document chunking pipeline.
//!
//! Converts an ordered stream of extracted document elements into
//! metadata-enriched chunks in five pure stages: layout normalization,
//! section segmentation, content-aware splitting with size balancing,
//! classification with size metrics, and chunk emission. Each stage transforms its input
//! into the next stage's input; documents can be processed in parallel
//! with no coordination since nothing escapes the per-document state.

pub mod emitter;
pub mod metrics;
pub mod normalizer;
pub mod segmenter;
pub mod splitter;

use docchunk_core::{ChunkError, ChunkedDocument, ChunkingConfig, DocumentMeta, RawElement};
use docchunk_rules::RuleSet;
use tracing::{debug, info};

/// Run the full pipeline over one document.
///
/// The only fatal error is malformed input (nothing normalizes into a
/// block); every other irregularity degrades to a documented default so
/// output is total for any non-empty input.
pub fn chunk_document(
    elements: &[RawElement],
    meta: &DocumentMeta,
    rules: &RuleSet,
    config: &ChunkingConfig,
) -> Result<ChunkedDocument, ChunkError> {
    let blocks = normalizer::normalize(elements)?;
    debug!(blocks = blocks.len(), "normalized layout");

    let sections = segmenter::segment(&blocks);
    debug!(sections = sections.len(), "segmented sections");

    let spans = splitter::split_all(&blocks, &sections, config);
    debug!(spans = spans.len(), "resolved chunk spans");

    let result = emitter::emit(&blocks, &sections, &spans, meta, rules, config);
    info!(
        document_id = %meta.document_id,
        sections = sections.len(),
        chunks = result.total_chunks,
        "chunking complete"
    );
    Ok(result)
}
