//! Classifier & metrics engine: derives content type, size metrics,
//! marker counts, and rule-table classification for each chunk span.
//!
//! Pure functions of (span, rule table) — no state, fully reproducible.

use docchunk_core::{
    Block, BlockRole, Classification, ContentFlags, SizeMetrics,
};
use docchunk_rules::RuleSet;

use crate::splitter::ChunkSpan;

/// Tokenization rule for the whole pipeline: tokens are maximal runs of
/// non-whitespace characters. Documented, deterministic, and cheap.
pub fn count_tokens(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Render a block for chunk content. Table/figure blocks become inline
/// markers carrying their caption text.
pub fn render_block(block: &Block) -> String {
    match block.role {
        BlockRole::Table => {
            if block.text.is_empty() {
                "[TABLE]".to_string()
            } else {
                format!("[TABLE]: {}", block.text)
            }
        }
        BlockRole::Figure => {
            if block.text.is_empty() {
                "[FIGURE]".to_string()
            } else {
                format!("[FIGURE]: {}", block.text)
            }
        }
        _ => block.text.clone(),
    }
}

/// Concatenate a span's blocks into chunk content, blank-line separated.
pub fn span_content(blocks: &[Block], span: &ChunkSpan) -> String {
    span.block_indices
        .iter()
        .map(|&i| render_block(&blocks[i]))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Everything the metrics engine derives for one span.
#[derive(Debug, Clone)]
pub struct SpanAnalysis {
    pub content: String,
    pub flags: ContentFlags,
    pub metrics: SizeMetrics,
    pub classification: Classification,
    /// Section type resolved by the rule table.
    pub section_type: String,
}

/// Analyze one span against the rule table and the section title.
pub fn analyze(
    blocks: &[Block],
    span: &ChunkSpan,
    section_title: &str,
    rules: &RuleSet,
) -> SpanAnalysis {
    let content = span_content(blocks, span);

    let table_count = span
        .block_indices
        .iter()
        .filter(|&&i| blocks[i].role == BlockRole::Table)
        .count();
    let image_count = span
        .block_indices
        .iter()
        .filter(|&&i| blocks[i].role == BlockRole::Figure)
        .count();

    let flags = ContentFlags {
        has_table_content: table_count > 0,
        has_image_content: image_count > 0,
        table_count,
        image_count,
    };

    let content_type = match (flags.has_table_content, flags.has_image_content) {
        (true, true) => "text_with_table_and_image",
        (true, false) => "text_with_table",
        (false, true) => "text_with_image",
        (false, false) => "text",
    };

    let metrics = SizeMetrics {
        token_count: count_tokens(&content),
        char_count: content.chars().count(),
    };

    let signal = rules.classify(section_title, &content);

    SpanAnalysis {
        content,
        flags,
        metrics,
        classification: Classification {
            domain_category: signal.labels.domain_category,
            service_category: signal.labels.service_category,
            content_type: content_type.to_string(),
            classification_confidence: signal.confidence,
        },
        section_type: signal.labels.section_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docchunk_core::ConfidenceLevel;

    fn block(role: BlockRole, text: &str, index: usize) -> Block {
        Block {
            role,
            text: text.to_string(),
            page_number: 1,
            sequence_index: index,
        }
    }

    fn span(indices: Vec<usize>) -> ChunkSpan {
        ChunkSpan {
            section_slot: 0,
            block_indices: indices,
            ordinal: 1,
            total: 1,
        }
    }

    #[test]
    fn token_rule_is_whitespace_delimited() {
        assert_eq!(count_tokens("hello world"), 2);
        assert_eq!(count_tokens("  spaced   out  "), 2);
        assert_eq!(count_tokens(""), 0);
    }

    #[test]
    fn markers_render_with_captions() {
        let table = block(BlockRole::Table, "Bid summary", 0);
        assert_eq!(render_block(&table), "[TABLE]: Bid summary");
        let bare = block(BlockRole::Figure, "", 0);
        assert_eq!(render_block(&bare), "[FIGURE]");
    }

    #[test]
    fn content_type_reflects_markers() {
        let blocks = vec![
            block(BlockRole::BodyText, "Costs are listed below.", 0),
            block(BlockRole::Table, "Cost table", 1),
            block(BlockRole::Figure, "Site photo", 2),
        ];
        let rules = RuleSet::builtin();

        let a = analyze(&blocks, &span(vec![0]), "Misc", &rules);
        assert_eq!(a.classification.content_type, "text");

        let a = analyze(&blocks, &span(vec![0, 1]), "Misc", &rules);
        assert_eq!(a.classification.content_type, "text_with_table");
        assert_eq!(a.flags.table_count, 1);

        let a = analyze(&blocks, &span(vec![0, 1, 2]), "Misc", &rules);
        assert_eq!(a.classification.content_type, "text_with_table_and_image");
        assert!(a.flags.has_image_content);
    }

    #[test]
    fn char_count_includes_marker_captions() {
        let blocks = vec![block(BlockRole::Table, "abc", 0)];
        let a = analyze(&blocks, &span(vec![0]), "x", &RuleSet::builtin());
        assert_eq!(a.content, "[TABLE]: abc");
        assert_eq!(a.metrics.char_count, 12);
    }

    #[test]
    fn strong_title_keyword_classifies_high() {
        let blocks = vec![block(BlockRole::BodyText, "We invite proposals.", 0)];
        let a = analyze(
            &blocks,
            &span(vec![0]),
            "1. Introduction",
            &RuleSet::builtin(),
        );
        assert_eq!(a.section_type, "introduction");
        assert_eq!(
            a.classification.classification_confidence,
            ConfidenceLevel::High
        );
    }

    #[test]
    fn empty_span_analyzes_cleanly() {
        let blocks: Vec<Block> = Vec::new();
        let a = analyze(&blocks, &span(vec![]), "9. Exclusions", &RuleSet::builtin());
        assert_eq!(a.content, "");
        assert_eq!(a.metrics.token_count, 0);
        assert_eq!(a.section_type, "exclusions");
    }
}
