use std::fmt;

use serde::{Deserialize, Serialize};

use crate::document::DocumentMeta;

/// Deterministic tier indicating the strength of the rule match behind a
/// classification decision. Not a probability — reproducible given the
/// same input and rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConfidenceLevel::Low => "low",
            ConfidenceLevel::Medium => "medium",
            ConfidenceLevel::High => "high",
        };
        write!(f, "{}", s)
    }
}

/// Structural metadata copied from the enclosing section. A copy, not a
/// live reference — chunks stay self-contained if the document is dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionMetadata {
    pub section_title: String,
    /// Dot-joined hierarchy path, e.g. "3.1".
    pub section_hierarchy: String,
    pub section_type: String,
}

/// Presence and counts of embedded non-text content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentFlags {
    pub has_table_content: bool,
    pub has_image_content: bool,
    pub table_count: usize,
    pub image_count: usize,
}

/// Size metrics over the chunk's concatenated content, inline marker
/// captions included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeMetrics {
    /// Whitespace-delimited token count.
    pub token_count: usize,
    /// Unicode scalar count.
    pub char_count: usize,
}

/// Rule-table classification results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub domain_category: String,
    pub service_category: String,
    pub content_type: String,
    pub classification_confidence: ConfidenceLevel,
}

/// Document-level fields repeated on every chunk record.
///
/// Absent optional metadata is emitted as empty string / 0 rather than
/// omitted, so downstream consumer schemas stay stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentFields {
    pub document_id: String,
    pub document_title: String,
    pub client_name: String,
    pub vendor_name: String,
    pub project_site: String,
    /// ISO date string, empty when unknown.
    pub submission_date: String,
    pub project_value: f64,
}

impl From<&DocumentMeta> for DocumentFields {
    fn from(meta: &DocumentMeta) -> Self {
        Self {
            document_id: meta.document_id.clone(),
            document_title: meta.title.clone().unwrap_or_default(),
            client_name: meta.client_name.clone().unwrap_or_default(),
            vendor_name: meta.vendor_name.clone().unwrap_or_default(),
            project_site: meta.project_site.clone().unwrap_or_default(),
            submission_date: meta
                .submission_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            project_value: meta.project_value.unwrap_or_default(),
        }
    }
}

/// Final emitted unit: content plus structural and classification metadata.
///
/// Field groups are flattened on serialization so the output artifact keeps
/// the flat field names downstream consumers index on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkRecord {
    pub chunk_id: String,
    pub content: String,
    #[serde(flatten)]
    pub section: SectionMetadata,
    #[serde(flatten)]
    pub flags: ContentFlags,
    #[serde(flatten)]
    pub metrics: SizeMetrics,
    #[serde(flatten)]
    pub classification: Classification,
    pub page_number: u32,
    /// 1-based ordinal within the section.
    pub chunk_number: usize,
    pub total_chunks_in_section: usize,
    #[serde(flatten)]
    pub document: DocumentFields,
}

/// Document-level summary counters over the emitted chunks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkStatistics {
    pub total_sections_processed: usize,
    pub total_tokens: usize,
    pub total_characters: usize,
    pub chunks_with_tables: usize,
    pub chunks_with_images: usize,
}

/// The serializable output artifact: ordered chunk records plus the
/// document-level summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkedDocument {
    pub document_id: String,
    pub total_chunks: usize,
    /// Opaque identifier for the configuration/version used.
    pub processing_method: String,
    pub chunks: Vec<ChunkRecord>,
    pub statistics: ChunkStatistics,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_tiers_order() {
        assert!(ConfidenceLevel::Low < ConfidenceLevel::Medium);
        assert!(ConfidenceLevel::Medium < ConfidenceLevel::High);
        assert_eq!(
            serde_json::to_string(&ConfidenceLevel::High).unwrap(),
            "\"high\""
        );
    }

    #[test]
    fn absent_document_fields_serialize_as_empty() {
        let meta = DocumentMeta::new("doc-1");
        let fields = DocumentFields::from(&meta);
        let value = serde_json::to_value(&fields).unwrap();
        assert_eq!(value["document_id"], "doc-1");
        assert_eq!(value["client_name"], "");
        assert_eq!(value["submission_date"], "");
        assert_eq!(value["project_value"], 0.0);
    }

    #[test]
    fn chunk_record_serializes_flat() {
        let record = ChunkRecord {
            chunk_id: "doc-1_introduction_chunk_01".to_string(),
            content: "We invite proposals.".to_string(),
            section: SectionMetadata {
                section_title: "1. Introduction".to_string(),
                section_hierarchy: "1".to_string(),
                section_type: "introduction".to_string(),
            },
            flags: ContentFlags::default(),
            metrics: SizeMetrics {
                token_count: 3,
                char_count: 20,
            },
            classification: Classification {
                domain_category: "general".to_string(),
                service_category: "administrative".to_string(),
                content_type: "text".to_string(),
                classification_confidence: ConfidenceLevel::High,
            },
            page_number: 1,
            chunk_number: 1,
            total_chunks_in_section: 1,
            document: DocumentFields::from(&DocumentMeta::new("doc-1")),
        };

        let value = serde_json::to_value(&record).unwrap();
        // Grouped fields flatten to the stable top-level names.
        assert_eq!(value["section_hierarchy"], "1");
        assert_eq!(value["token_count"], 3);
        assert_eq!(value["has_table_content"], false);
        assert_eq!(value["classification_confidence"], "high");
        assert!(value.get("section").is_none());
    }
}
