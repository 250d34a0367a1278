//! Search
//!
//! A flat, in-memory product index with OR-of-substrings matching. There is no ranking:
//! results keep index order and are capped at [`MAX_RESULTS`].

use serde::{Deserialize, Serialize};

/// Maximum number of results returned by a search.
pub const MAX_RESULTS: usize = 8;

/// A denormalised, searchable product record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchEntry {
    /// Record id
    pub id: String,

    /// Product code (SKU)
    pub code: String,

    /// Product name
    pub name: String,

    /// Category label
    pub category: String,

    /// Thickness label, e.g. `6mm`
    pub thickness: String,

    /// Colour label
    pub color: String,

    /// Price in CLP, tax included
    pub price: u64,

    /// Groups variants of the same product
    pub group_id: String,

    /// Image URL
    pub image: Option<String>,
}

impl SearchEntry {
    /// The lowercased text terms are matched against.
    pub fn searchable_text(&self) -> String {
        [&self.name, &self.category, &self.thickness, &self.color]
            .map(|field| field.to_lowercase())
            .join(" ")
    }
}

/// Search index
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    entries: Vec<SearchEntry>,
    haystacks: Vec<String>,
}

impl SearchIndex {
    /// Build an index; entry order is preserved.
    pub fn new(entries: Vec<SearchEntry>) -> Self {
        let haystacks = entries.iter().map(SearchEntry::searchable_text).collect();

        Self { entries, haystacks }
    }

    /// Entries matching any term of `query`, at most [`MAX_RESULTS`].
    pub fn search(&self, query: &str) -> Vec<&SearchEntry> {
        let terms = terms(query);

        if terms.is_empty() {
            return Vec::new();
        }

        self.entries
            .iter()
            .zip(&self.haystacks)
            .filter(|(_, haystack)| matches_any(haystack, &terms))
            .map(|(entry, _)| entry)
            .take(MAX_RESULTS)
            .collect()
    }

    /// The first entry whose id or product code is `key`.
    pub fn find(&self, key: &str) -> Option<&SearchEntry> {
        let key = key.trim();

        if key.is_empty() {
            return None;
        }

        self.entries
            .iter()
            .find(|entry| entry.id == key || entry.code == key)
    }

    /// All entries, in index order.
    pub fn entries(&self) -> &[SearchEntry] {
        &self.entries
    }

    /// Number of indexed entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<SearchEntry> for SearchIndex {
    fn from_iter<I: IntoIterator<Item = SearchEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Search a plain slice of entries without building an index.
pub fn search<'a>(query: &str, entries: &'a [SearchEntry]) -> Vec<&'a SearchEntry> {
    let terms = terms(query);

    if terms.is_empty() {
        return Vec::new();
    }

    entries
        .iter()
        .filter(|entry| matches_any(&entry.searchable_text(), &terms))
        .take(MAX_RESULTS)
        .collect()
}

/// Lowercased, whitespace-separated query terms.
pub fn terms(query: &str) -> Vec<String> {
    query.split_whitespace().map(str::to_lowercase).collect()
}

fn matches_any(haystack: &str, terms: &[String]) -> bool {
    terms.iter().any(|term| haystack.contains(term.as_str()))
}
