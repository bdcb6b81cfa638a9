//! crates/schemes_connect_core/src/directory.rs
//!
//! The in-memory scheme list and its search/category projection.

use std::collections::HashSet;
use std::fmt;

use tracing::warn;

use crate::domain::Scheme;

/// The selector value that matches every category.
pub const ALL_CATEGORIES: &str = "All Categories";

/// Categories offered by the scheme browser, in display order.
pub const SCHEME_CATEGORIES: [&str; 7] = [
    "Healthcare",
    "Education",
    "Agriculture",
    "Financial Inclusion",
    "Housing",
    "Employment",
    "Social Welfare",
];

/// A category selector: either everything, or one exact category string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Reads a selector label. Blank, `all` and the "All Categories"
    /// sentinel all select everything; anything else is matched verbatim.
    pub fn parse(label: &str) -> Self {
        let trimmed = label.trim();
        if trimmed.is_empty()
            || trimmed == ALL_CATEGORIES
            || trimmed.eq_ignore_ascii_case("all")
        {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(trimmed.to_string())
        }
    }

    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(ALL_CATEGORIES),
            CategoryFilter::Only(category) => f.write_str(category),
        }
    }
}

/// Case-insensitive substring match of `term` against any of `fields`.
/// The empty term matches everything.
pub fn matches_search(fields: &[&str], term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    fields
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Keeps schemes whose title or description contains `search` and whose
/// category passes `category`. Source order is preserved.
pub fn filter_schemes<'a>(
    schemes: &'a [Scheme],
    search: &str,
    category: &CategoryFilter,
) -> Vec<&'a Scheme> {
    schemes
        .iter()
        .filter(|scheme| {
            matches_search(&[scheme.title.as_str(), scheme.description.as_str()], search)
        })
        .filter(|scheme| category.matches(&scheme.category))
        .collect()
}

/// Holds the current result set. It is only ever replaced wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemeDirectory {
    schemes: Vec<Scheme>,
}

impl SchemeDirectory {
    pub fn new(schemes: Vec<Scheme>) -> Self {
        let mut directory = Self::default();
        directory.replace(schemes);
        directory
    }

    /// Swaps in a new result set. Ids are unique within a set: the first
    /// record for an id wins and later ones are dropped.
    pub fn replace(&mut self, schemes: Vec<Scheme>) {
        let mut seen = HashSet::with_capacity(schemes.len());
        self.schemes = schemes
            .into_iter()
            .filter(|scheme| {
                let fresh = seen.insert(scheme.id);
                if !fresh {
                    warn!(id = scheme.id, title = %scheme.title, "Dropping scheme with duplicate id");
                }
                fresh
            })
            .collect();
    }

    pub fn schemes(&self) -> &[Scheme] {
        &self.schemes
    }

    pub fn len(&self) -> usize {
        self.schemes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemes.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&Scheme> {
        self.schemes.iter().find(|scheme| scheme.id == id)
    }

    pub fn filter(&self, search: &str, category: &CategoryFilter) -> Vec<&Scheme> {
        filter_schemes(&self.schemes, search, category)
    }

    /// "Showing N of M schemes".
    pub fn summary(&self, shown: usize) -> String {
        format!("Showing {} of {} schemes", shown, self.schemes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    fn directory() -> SchemeDirectory {
        SchemeDirectory::new(catalog::schemes())
    }

    #[test]
    fn empty_search_and_all_categories_is_identity() {
        let dir = directory();
        let filtered: Vec<Scheme> = dir
            .filter("", &CategoryFilter::All)
            .into_iter()
            .cloned()
            .collect();
        assert_eq!(filtered, dir.schemes());
    }

    #[test]
    fn search_matches_title_or_description_case_insensitively() {
        let dir = directory();
        let term = "HOUSING";
        let hits = dir.filter(term, &CategoryFilter::All);
        assert!(!hits.is_empty());
        for scheme in &hits {
            let title = scheme.title.to_lowercase();
            let description = scheme.description.to_lowercase();
            assert!(title.contains("housing") || description.contains("housing"));
        }
        // Every scheme that mentions it must be kept.
        let expected = dir
            .schemes()
            .iter()
            .filter(|s| {
                s.title.to_lowercase().contains("housing")
                    || s.description.to_lowercase().contains("housing")
            })
            .count();
        assert_eq!(hits.len(), expected);
    }

    #[test]
    fn category_filter_is_exact_and_a_subset() {
        let dir = directory();
        let all_ids: HashSet<u32> = dir.schemes().iter().map(|s| s.id).collect();
        for category in SCHEME_CATEGORIES {
            let hits = dir.filter("", &CategoryFilter::parse(category));
            assert!(!hits.is_empty(), "{category} should have catalog entries");
            for scheme in hits {
                assert_eq!(scheme.category, category);
                assert!(all_ids.contains(&scheme.id));
            }
        }
        assert!(dir
            .filter("", &CategoryFilter::Only("healthcare".to_string()))
            .is_empty());
    }

    #[test]
    fn search_and_category_combine() {
        let dir = directory();
        let hits = dir.filter("pradhan mantri", &CategoryFilter::parse("Housing"));
        let ids: Vec<u32> = hits.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![501, 502]);
    }

    #[test]
    fn filtering_is_idempotent_and_leaves_source_untouched() {
        let dir = directory();
        let before = dir.clone();
        let first: Vec<u32> = dir
            .filter("card", &CategoryFilter::All)
            .iter()
            .map(|s| s.id)
            .collect();
        let second: Vec<u32> = dir
            .filter("card", &CategoryFilter::All)
            .iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(first, second);
        assert_eq!(dir, before);
    }

    #[test]
    fn sentinel_labels_parse_to_all() {
        assert_eq!(CategoryFilter::parse(ALL_CATEGORIES), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse("all"), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse("  "), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::parse("Housing"),
            CategoryFilter::Only("Housing".to_string())
        );
    }

    #[test]
    fn replace_swaps_wholesale_and_summary_counts() {
        let mut dir = directory();
        dir.replace(Vec::new());
        assert!(dir.is_empty());
        assert_eq!(dir.summary(0), "Showing 0 of 0 schemes");
        assert!(dir.get(101).is_none());
    }

    #[test]
    fn duplicate_ids_keep_the_first_record() {
        let first = catalog::find(101).unwrap();
        let mut impostor = catalog::find(102).unwrap();
        impostor.id = 101;

        let mut dir = SchemeDirectory::default();
        dir.replace(vec![first.clone(), impostor, catalog::find(103).unwrap()]);

        let ids: Vec<u32> = dir.schemes().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![101, 103]);
        assert_eq!(dir.get(101), Some(&first));
    }
}
