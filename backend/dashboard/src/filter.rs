use std::collections::HashSet;

use crate::record::Record;

pub const ALL_CATEGORIES: &str = "ALL";
pub const PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Criteria {
    pub category: String,
    pub search_term: String,
}

impl Default for Criteria {
    fn default() -> Self {
        Self {
            category: ALL_CATEGORIES.to_string(),
            search_term: String::new(),
        }
    }
}

impl Criteria {
    pub fn matches(&self, record: &Record) -> bool {
        let matches_category = self.category == ALL_CATEGORIES || record.cta == self.category;
        let matches_search = self.search_term.is_empty()
            || record
                .description
                .to_lowercase()
                .contains(&self.search_term.to_lowercase());

        matches_category && matches_search
    }
}

/// Keeps source order.
pub fn filter_records(source: &[Record], criteria: &Criteria) -> Vec<Record> {
    source
        .iter()
        .filter(|record| criteria.matches(record))
        .cloned()
        .collect()
}

/// `ALL` followed by every distinct CTA, in first-seen order.
pub fn category_options(source: &[Record]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut options = vec![ALL_CATEGORIES.to_string()];

    for record in source {
        if seen.insert(record.cta.as_str()) {
            options.push(record.cta.clone());
        }
    }

    options
}

pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size).max(1)
}

/// Records for a 1-based page. Out of range pages are empty.
pub fn page_slice(records: &[Record], page: usize, page_size: usize) -> &[Record] {
    let start = page.saturating_sub(1).saturating_mul(page_size);
    let end = start.saturating_add(page_size).min(records.len());

    records.get(start..end).unwrap_or(&[])
}
