use std::collections::HashMap;
use std::ops::Range;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Document-level identifying metadata supplied by the caller.
///
/// Optional fields default to absent rather than zero/empty sentinels;
/// the emitter converts them to empty string / 0 only at serialization
/// time, to keep the downstream consumer schema stable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentMeta {
    pub document_id: String,
    pub title: Option<String>,
    pub client_name: Option<String>,
    pub vendor_name: Option<String>,
    pub project_site: Option<String>,
    pub submission_date: Option<NaiveDate>,
    pub project_value: Option<f64>,
}

impl DocumentMeta {
    pub fn new(document_id: impl Into<String>) -> Self {
        Self {
            document_id: document_id.into(),
            ..Self::default()
        }
    }
}

/// A node in the section hierarchy.
///
/// Blocks are referenced by a contiguous index range into the document-owned
/// block arena; the parent relation is a path key resolved through
/// [`SectionIndex`], never an owning pointer.
#[derive(Debug, Clone)]
pub struct Section {
    pub title: String,
    /// Ordered numbering tokens, e.g. `["3", "1"]` for "3.1".
    pub hierarchy: Vec<String>,
    /// Depth implied by the numbering (0 for synthetic sections).
    pub level: usize,
    /// Hierarchy path of the enclosing section, if any.
    pub parent: Option<Vec<String>>,
    /// Contiguous range of content block indices assigned to this section.
    pub block_range: Range<usize>,
    /// Page the section opens on.
    pub page_number: u32,
}

impl Section {
    /// Dot-joined hierarchy path, e.g. "3.1".
    pub fn hierarchy_path(&self) -> String {
        self.hierarchy.join(".")
    }
}

/// Document-owned section table: ordered sections plus a path-key lookup.
///
/// Sections are stored in document order (the order their headings were
/// encountered); `parent` references resolve through `by_path` so the
/// hierarchy carries no reference cycles.
#[derive(Debug, Default)]
pub struct SectionIndex {
    sections: Vec<Section>,
    by_path: HashMap<String, usize>,
}

impl SectionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a section, returning its slot. Later sections with a
    /// duplicate path do not displace earlier ones in the lookup.
    pub fn push(&mut self, section: Section) -> usize {
        let slot = self.sections.len();
        self.by_path
            .entry(section.hierarchy_path())
            .or_insert(slot);
        self.sections.push(section);
        slot
    }

    pub fn get(&self, slot: usize) -> Option<&Section> {
        self.sections.get(slot)
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut Section> {
        self.sections.get_mut(slot)
    }

    /// Look up a section by its dot-joined hierarchy path.
    pub fn by_path(&self, path: &str) -> Option<&Section> {
        self.by_path.get(path).map(|&i| &self.sections[i])
    }

    /// Resolve a section's parent through the path table.
    pub fn parent_of(&self, section: &Section) -> Option<&Section> {
        section
            .parent
            .as_ref()
            .and_then(|p| self.by_path(&p.join(".")))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(path: &[&str], level: usize, parent: Option<&[&str]>) -> Section {
        Section {
            title: path.join("."),
            hierarchy: path.iter().map(|s| s.to_string()).collect(),
            level,
            parent: parent.map(|p| p.iter().map(|s| s.to_string()).collect()),
            block_range: 0..0,
            page_number: 1,
        }
    }

    #[test]
    fn path_lookup_and_parent_resolution() {
        let mut index = SectionIndex::new();
        index.push(section(&["3"], 1, None));
        index.push(section(&["3", "1"], 2, Some(&["3"])));

        let child = index.by_path("3.1").unwrap();
        let parent = index.parent_of(child).unwrap();
        assert_eq!(parent.hierarchy_path(), "3");
    }

    #[test]
    fn duplicate_path_keeps_first_slot() {
        let mut index = SectionIndex::new();
        index.push(section(&["2"], 1, None));
        let mut dup = section(&["2"], 1, None);
        dup.title = "later".to_string();
        index.push(dup);

        // Document order is preserved; lookup resolves to the first.
        assert_eq!(index.len(), 2);
        assert_ne!(index.by_path("2").unwrap().title, "later");
    }

    #[test]
    fn orphan_has_no_parent() {
        let mut index = SectionIndex::new();
        index.push(section(&["0"], 1, None));
        let s = index.by_path("0").unwrap();
        assert!(index.parent_of(s).is_none());
    }
}
