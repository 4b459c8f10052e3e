//! Client-side search and category filtering over a loaded collection.
//!
//! Filtering never touches the network and is recomputed on every keystroke.
//! The category vocabulary is derived from whatever is loaded, so there is no
//! fixed list of categories.

use std::collections::BTreeSet;

use store::Link;

/// Label of the "every category" choice.
pub const ALL_CATEGORIES: &str = "all";

/// Category selection: everything, or one exact category.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    /// Parse a `<select>` value; empty and `"all"` select everything.
    pub fn from_label(label: &str) -> Self {
        if label.is_empty() || label == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Named(label.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES,
            CategoryFilter::Named(name) => name,
        }
    }

    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Named(name) => name == category,
        }
    }
}

/// Search term plus category selection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkFilter {
    term: String,
    category: CategoryFilter,
}

impl LinkFilter {
    pub fn search(&mut self, term: &str) {
        self.term = term.to_string();
    }

    pub fn filter_by_category(&mut self, category: CategoryFilter) {
        self.category = category;
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn category(&self) -> &CategoryFilter {
        &self.category
    }

    pub fn matches(&self, link: &Link) -> bool {
        self.category.matches(&link.category) && link.mentions(&self.term.to_lowercase())
    }

    /// The visible subset of `links`, in their original order.
    pub fn apply<'a>(&self, links: &'a [Link]) -> Vec<&'a Link> {
        let needle = self.term.to_lowercase();
        links
            .iter()
            .filter(|link| self.category.matches(&link.category) && link.mentions(&needle))
            .collect()
    }
}

/// `All` followed by the distinct, non-empty categories of `links`, sorted.
pub fn category_vocabulary(links: &[Link]) -> Vec<CategoryFilter> {
    let names: BTreeSet<&str> = links
        .iter()
        .map(|link| link.category.as_str())
        .filter(|category| !category.is_empty())
        .collect();

    std::iter::once(CategoryFilter::All)
        .chain(names.into_iter().map(|name| CategoryFilter::Named(name.to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use store::LinkId;

    fn link(id: i64, title: &str, description: &str, category: &str) -> Link {
        Link {
            id: LinkId::from(id),
            title: title.to_string(),
            url: format!("https://example.com/{id}"),
            description: description.to_string(),
            category: category.to_string(),
            is_public: false,
            upvotes: 0,
            user_upvoted: false,
        }
    }

    fn sample() -> Vec<Link> {
        vec![
            link(1, "Rust Book", "The official guide", "rust"),
            link(2, "Tokio tutorial", "Async runtime for RUST", "async"),
            link(3, "Python docs", "Reference", "python"),
        ]
    }

    #[test]
    fn test_search_title_or_description_case_insensitive() {
        let links = sample();
        let mut filter = LinkFilter::default();

        filter.search("rust");
        let ids: Vec<_> = filter.apply(&links).iter().map(|l| l.id.clone()).collect();
        assert_eq!(ids, vec![LinkId::from(1), LinkId::from(2)]);

        filter.search("REFERENCE");
        assert_eq!(filter.apply(&links).len(), 1);
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let links = sample();
        assert_eq!(LinkFilter::default().apply(&links).len(), links.len());
    }

    #[test]
    fn test_category_is_exact_and_combines_with_search() {
        let links = sample();
        let mut filter = LinkFilter::default();

        filter.filter_by_category(CategoryFilter::from_label("rust"));
        assert_eq!(filter.apply(&links).len(), 1);

        filter.filter_by_category(CategoryFilter::from_label("Rust"));
        assert!(filter.apply(&links).is_empty());

        filter.filter_by_category(CategoryFilter::from_label("async"));
        filter.search("python");
        assert!(filter.apply(&links).is_empty());

        filter.filter_by_category(CategoryFilter::from_label(ALL_CATEGORIES));
        assert_eq!(filter.apply(&links).len(), 1);
    }

    #[test]
    fn test_vocabulary_is_derived_from_data() {
        let mut links = sample();
        links.push(link(4, "Serde", "", "rust"));
        links.push(link(5, "Untitled", "", ""));

        let labels: Vec<String> = category_vocabulary(&links)
            .iter()
            .map(|c| c.label().to_string())
            .collect();
        assert_eq!(labels, vec!["all", "async", "python", "rust"]);

        assert_eq!(category_vocabulary(&[]), vec![CategoryFilter::All]);
    }

    proptest! {
        #[test]
        fn prop_search_result_is_matching_subset(
            rows in prop::collection::vec(("[a-zA-Z ]{0,12}", "[a-zA-Z ]{0,12}", "[a-c]{0,1}"), 0..12),
            term in "[a-zA-Z]{0,3}",
        ) {
            let links: Vec<Link> = rows
                .iter()
                .enumerate()
                .map(|(i, (title, description, category))| link(i as i64, title, description, category))
                .collect();
            let mut filter = LinkFilter::default();
            filter.search(&term);

            let result = filter.apply(&links);
            let needle = term.to_lowercase();
            prop_assert!(result.len() <= links.len());
            for found in result {
                prop_assert!(links.contains(found));
                prop_assert!(
                    found.title.to_lowercase().contains(&needle)
                        || found.description.to_lowercase().contains(&needle)
                );
            }
        }
    }
}
