//! # Category Index
//!
//! Derives the distinct categories of a quote sequence and applies the
//! category filter. Everything here is a pure function of its inputs and is
//! recomputed in full after every store mutation.

use serde::{Deserialize, Serialize};

use crate::core::quote::Quote;

/// Sentinel string for "no filter".
pub const ALL_CATEGORIES: &str = "all";

/// The current category selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl From<String> for CategoryFilter {
    fn from(value: String) -> Self {
        if value == ALL_CATEGORIES || value.trim().is_empty() {
            CategoryFilter::All
        } else {
            CategoryFilter::Category(value)
        }
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        match filter {
            CategoryFilter::All => ALL_CATEGORIES.to_string(),
            CategoryFilter::Category(name) => name,
        }
    }
}

impl CategoryFilter {
    pub fn parse(value: &str) -> Self {
        Self::from(value.to_string())
    }

    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => "All Categories",
            CategoryFilter::Category(name) => name,
        }
    }

    pub fn matches(&self, quote: &Quote) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(name) => quote.category == *name,
        }
    }

    /// Falls back to `All` when the selected category no longer exists.
    pub fn resolve(self, categories: &[String]) -> Self {
        match &self {
            CategoryFilter::Category(name) if !categories.contains(name) => CategoryFilter::All,
            _ => self,
        }
    }

    /// Steps through `[All, categories...]`, wrapping at both ends.
    pub fn cycle(&self, categories: &[String], forward: bool) -> Self {
        let total = categories.len() + 1;
        let current = match self {
            CategoryFilter::All => 0,
            CategoryFilter::Category(name) => categories
                .iter()
                .position(|c| c == name)
                .map(|i| i + 1)
                .unwrap_or(0),
        };
        let next = if forward {
            (current + 1) % total
        } else {
            (current + total - 1) % total
        };
        match next {
            0 => CategoryFilter::All,
            i => CategoryFilter::Category(categories[i - 1].clone()),
        }
    }
}

/// Distinct categories in order of first appearance.
pub fn categories_of(quotes: &[Quote]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for quote in quotes {
        if !categories.contains(&quote.category) {
            categories.push(quote.category.clone());
        }
    }
    categories
}

pub fn apply_filter<'a>(quotes: &'a [Quote], filter: &CategoryFilter) -> Vec<&'a Quote> {
    quotes.iter().filter(|q| filter.matches(q)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(text: &str, category: &str) -> Quote {
        Quote::new(text, category).unwrap()
    }

    fn sample() -> Vec<Quote> {
        vec![
            q("Keep going.", "Motivation"),
            q("Life is short.", "Life"),
            q("Start now.", "Motivation"),
        ]
    }

    #[test]
    fn test_categories_first_appearance_order_no_duplicates() {
        assert_eq!(categories_of(&sample()), vec!["Motivation", "Life"]);
    }

    #[test]
    fn test_categories_of_empty() {
        assert!(categories_of(&[]).is_empty());
    }

    #[test]
    fn test_filter_all_returns_everything() {
        let quotes = sample();
        let filtered = apply_filter(&quotes, &CategoryFilter::All);
        assert_eq!(filtered.len(), quotes.len());
        assert!(filtered.iter().zip(quotes.iter()).all(|(a, b)| *a == b));
    }

    #[test]
    fn test_filter_by_category() {
        let quotes = sample();
        let filtered = apply_filter(&quotes, &CategoryFilter::parse("Motivation"));
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|q| q.category == "Motivation"));
    }

    #[test]
    fn test_scenario_add_to_existing_category() {
        let mut quotes = vec![q("Keep going.", "Motivation"), q("Life is short.", "Life")];
        quotes.push(q("Live well.", "Life"));
        assert_eq!(categories_of(&quotes), vec!["Motivation", "Life"]);
        assert_eq!(apply_filter(&quotes, &CategoryFilter::parse("Life")).len(), 2);
    }

    #[test]
    fn test_parse_sentinel() {
        assert_eq!(CategoryFilter::parse("all"), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse(""), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::parse("Life"),
            CategoryFilter::Category("Life".to_string())
        );
    }

    #[test]
    fn test_serde_uses_string_form() {
        let json = serde_json::to_string(&CategoryFilter::All).unwrap();
        assert_eq!(json, "\"all\"");
        let filter: CategoryFilter = serde_json::from_str("\"Life\"").unwrap();
        assert_eq!(filter, CategoryFilter::Category("Life".to_string()));
    }

    #[test]
    fn test_resolve_stale_selection() {
        let categories = vec!["Life".to_string()];
        assert_eq!(
            CategoryFilter::parse("Gone").resolve(&categories),
            CategoryFilter::All
        );
        assert_eq!(
            CategoryFilter::parse("Life").resolve(&categories),
            CategoryFilter::parse("Life")
        );
    }

    #[test]
    fn test_cycle_wraps() {
        let categories = vec!["A".to_string(), "B".to_string()];
        let next = CategoryFilter::All.cycle(&categories, true);
        assert_eq!(next, CategoryFilter::parse("A"));
        let next = next.cycle(&categories, true).cycle(&categories, true);
        assert_eq!(next, CategoryFilter::All);
        assert_eq!(
            CategoryFilter::All.cycle(&categories, false),
            CategoryFilter::parse("B")
        );
    }

    #[test]
    fn test_cycle_with_no_categories_stays_all() {
        assert_eq!(CategoryFilter::All.cycle(&[], true), CategoryFilter::All);
    }
}
