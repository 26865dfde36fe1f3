//! Chunk emitter: assembles final chunk records in document order and
//! assigns deterministic, collision-free chunk ids.

use std::collections::HashSet;

use docchunk_core::{
    Block, ChunkRecord, ChunkStatistics, ChunkedDocument, ChunkingConfig, DocumentFields,
    DocumentMeta, SectionIndex, SectionMetadata,
};
use docchunk_rules::RuleSet;
use tracing::debug;

use crate::metrics;
use crate::splitter::ChunkSpan;

/// Normalize a section title into an id slug: lowercase, alphanumerics
/// and underscores only, capped at 30 characters.
fn slugify(title: &str) -> String {
    let mut slug = String::new();
    for c in title.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
        } else if (c.is_whitespace() || c == '-' || c == '_') && !slug.ends_with('_') {
            slug.push('_');
        }
    }
    let slug = slug.trim_matches('_');
    slug.chars().take(30).collect()
}

/// Sanitize a document id for embedding in chunk ids.
fn sanitize_id(id: &str) -> String {
    id.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Deterministic chunk id with local collision disambiguation: first the
/// dash-joined hierarchy path is appended, then the section slot — the
/// id is never silently overwritten.
fn assign_chunk_id(
    used: &mut HashSet<String>,
    document_id: &str,
    section_title: &str,
    hierarchy: &[String],
    section_slot: usize,
    ordinal: usize,
) -> String {
    let base = format!(
        "{}_{}_chunk_{:02}",
        sanitize_id(document_id),
        slugify(section_title),
        ordinal
    );
    let mut id = base.clone();
    if used.contains(&id) {
        id = format!("{}_{}", base, hierarchy.join("-"));
    }
    if used.contains(&id) {
        id = format!("{}_s{}", base, section_slot);
        debug!(chunk_id = %id, "chunk id disambiguated by section slot");
    }
    used.insert(id.clone());
    id
}

/// Page number for a span: the first content block's page, falling back
/// to the section's opening page for empty spans.
fn span_page(blocks: &[Block], span: &ChunkSpan, section_page: u32) -> u32 {
    span.block_indices
        .first()
        .map(|&i| blocks[i].page_number)
        .unwrap_or(section_page)
}

/// Assemble the final ordered chunk sequence and document summary.
///
/// Spans arrive already in document order (section order, then ordinal);
/// emission preserves it.
pub fn emit(
    blocks: &[Block],
    sections: &SectionIndex,
    spans: &[ChunkSpan],
    meta: &DocumentMeta,
    rules: &RuleSet,
    config: &ChunkingConfig,
) -> ChunkedDocument {
    let document_fields = DocumentFields::from(meta);
    let mut used_ids = HashSet::new();
    let mut chunks = Vec::with_capacity(spans.len());
    let mut stats = ChunkStatistics {
        total_sections_processed: sections.len(),
        ..ChunkStatistics::default()
    };

    for span in spans {
        let section = sections
            .get(span.section_slot)
            .expect("span references a section emitted by the segmenter");

        let analysis = metrics::analyze(blocks, span, &section.title, rules);
        let chunk_id = assign_chunk_id(
            &mut used_ids,
            &meta.document_id,
            &section.title,
            &section.hierarchy,
            span.section_slot,
            span.ordinal,
        );

        stats.total_tokens += analysis.metrics.token_count;
        stats.total_characters += analysis.metrics.char_count;
        if analysis.flags.has_table_content {
            stats.chunks_with_tables += 1;
        }
        if analysis.flags.has_image_content {
            stats.chunks_with_images += 1;
        }

        chunks.push(ChunkRecord {
            chunk_id,
            content: analysis.content,
            section: SectionMetadata {
                section_title: section.title.clone(),
                section_hierarchy: section.hierarchy_path(),
                section_type: analysis.section_type,
            },
            flags: analysis.flags,
            metrics: analysis.metrics,
            classification: analysis.classification,
            page_number: span_page(blocks, span, section.page_number),
            chunk_number: span.ordinal,
            total_chunks_in_section: span.total,
            document: document_fields.clone(),
        });
    }

    ChunkedDocument {
        document_id: meta.document_id.clone(),
        total_chunks: chunks.len(),
        processing_method: config.processing_method.clone(),
        chunks,
        statistics: stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_normalizes_titles() {
        assert_eq!(slugify("1. Introduction"), "1_introduction");
        assert_eq!(slugify("3.1 Scope of Work"), "3_1_scope_of_work");
        assert_eq!(slugify("  Pricing & Payment  "), "pricing_payment");
    }

    #[test]
    fn slugify_caps_length() {
        let long = "a very long section title that keeps going well past the cap";
        assert!(slugify(long).chars().count() <= 30);
    }

    #[test]
    fn sanitize_id_replaces_punctuation() {
        assert_eq!(sanitize_id("rfp 2026/007"), "rfp_2026_007");
        assert_eq!(sanitize_id("doc-1"), "doc-1");
    }

    #[test]
    fn collision_gets_hierarchy_suffix_then_slot() {
        let mut used = HashSet::new();
        let h1 = vec!["2".to_string()];
        let h2 = vec!["5".to_string()];

        let a = assign_chunk_id(&mut used, "doc", "Scope", &h1, 0, 1);
        let b = assign_chunk_id(&mut used, "doc", "Scope", &h2, 1, 1);
        assert_eq!(a, "doc_scope_chunk_01");
        assert_eq!(b, "doc_scope_chunk_01_5");

        // Identical path as well: falls through to the slot suffix.
        let c = assign_chunk_id(&mut used, "doc", "Scope", &h2, 2, 1);
        assert_eq!(c, "doc_scope_chunk_01_s2");
        assert_eq!(used.len(), 3);
    }
}
