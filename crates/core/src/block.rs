use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Structural role of a block, as tagged by the upstream extractor or
/// inferred by the layout normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockRole {
    Heading,
    BodyText,
    Table,
    Figure,
    PageHeader,
    PageFooter,
    PageNumber,
    Unknown,
}

impl fmt::Display for BlockRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BlockRole::Heading => "heading",
            BlockRole::BodyText => "body-text",
            BlockRole::Table => "table",
            BlockRole::Figure => "figure",
            BlockRole::PageHeader => "page-header",
            BlockRole::PageFooter => "page-footer",
            BlockRole::PageNumber => "page-number",
            BlockRole::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for BlockRole {
    type Err = std::convert::Infallible;

    /// Parse an upstream role tag. Unrecognized tags map to `Unknown`
    /// rather than failing — the normalizer re-classifies those.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "heading" | "title" | "sectionHeading" => BlockRole::Heading,
            "body-text" | "paragraph" | "text" => BlockRole::BodyText,
            "table" => BlockRole::Table,
            "figure" | "image" => BlockRole::Figure,
            "page-header" | "pageHeader" => BlockRole::PageHeader,
            "page-footer" | "pageFooter" => BlockRole::PageFooter,
            "page-number" | "pageNumber" => BlockRole::PageNumber,
            _ => BlockRole::Unknown,
        })
    }
}

/// One element from the upstream extraction collaborator: a paragraph or
/// line of text, optionally carrying a role tag and a page number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawElement {
    /// Role tag from the extractor, if it provided one.
    pub role: Option<BlockRole>,
    /// Raw text content (may be empty for pure structural markers).
    pub text: String,
    /// 1-based source page number.
    pub page_number: u32,
}

impl RawElement {
    /// Element with an explicit role tag.
    pub fn tagged(role: BlockRole, text: impl Into<String>, page_number: u32) -> Self {
        Self {
            role: Some(role),
            text: text.into(),
            page_number,
        }
    }

    /// Plain line without a role tag — the normalizer classifies it.
    pub fn untagged(text: impl Into<String>, page_number: u32) -> Self {
        Self {
            role: None,
            text: text.into(),
            page_number,
        }
    }
}

/// Atomic unit of normalized input. Immutable once created; owned by the
/// document-level block arena and referenced by index everywhere else.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub role: BlockRole,
    pub text: String,
    pub page_number: u32,
    /// Position in normalized source order.
    pub sequence_index: usize,
}

impl Block {
    pub fn is_heading(&self) -> bool {
        self.role == BlockRole::Heading
    }

    /// True for embedded table/figure markers, which are never split
    /// across chunk spans.
    pub fn is_marker(&self) -> bool {
        matches!(self.role, BlockRole::Table | BlockRole::Figure)
    }

    /// True for running headers/footers and page numbers, which carry no
    /// section content.
    pub fn is_page_furniture(&self) -> bool {
        matches!(
            self.role,
            BlockRole::PageHeader | BlockRole::PageFooter | BlockRole::PageNumber
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_display() {
        for role in [
            BlockRole::Heading,
            BlockRole::BodyText,
            BlockRole::Table,
            BlockRole::Figure,
            BlockRole::PageHeader,
            BlockRole::PageFooter,
            BlockRole::PageNumber,
        ] {
            let parsed: BlockRole = role.to_string().parse().unwrap();
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn unrecognized_tag_maps_to_unknown() {
        let role: BlockRole = "watermark".parse().unwrap();
        assert_eq!(role, BlockRole::Unknown);
    }

    #[test]
    fn furniture_predicate() {
        let block = Block {
            role: BlockRole::PageNumber,
            text: "14".to_string(),
            page_number: 14,
            sequence_index: 0,
        };
        assert!(block.is_page_furniture());
        assert!(!block.is_marker());
    }
}
