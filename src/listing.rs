//! Client-side filtering and pagination over the fetched list.
//!
//! Everything here is pure: the view derives what it shows from `items`,
//! the search term and the current page on every render.

use crate::types::ListItem;

/// Items whose name contains the lowercased search term, in original order.
///
/// Only the term is lowercased. Catalog names are lowercase, so this is a
/// case-insensitive match in practice.
pub fn filter<'a>(items: &'a [ListItem], search_term: &str) -> Vec<&'a ListItem> {
    let query = search_term.to_lowercase();
    items.iter().filter(|item| item.name.contains(&query)).collect()
}

/// `ceil(count / page_size)`; zero for an empty result or a zero page size.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size)
}

/// The `page_size` slice of the filtered items for a 1-based `page`.
/// Out-of-range pages yield an empty vec.
pub fn filter_and_paginate<'a>(
    items: &'a [ListItem],
    search_term: &str,
    page: usize,
    page_size: usize,
) -> Vec<&'a ListItem> {
    paginate(filter(items, search_term), page, page_size)
}

fn paginate<T>(filtered: Vec<T>, page: usize, page_size: usize) -> Vec<T> {
    if page == 0 || page_size == 0 {
        return Vec::new();
    }
    let start = (page - 1).saturating_mul(page_size);
    filtered.into_iter().skip(start).take(page_size).collect()
}

/// One rendered page plus the counts the pager needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a> {
    pub items: Vec<&'a ListItem>,
    pub page: usize,
    pub total_pages: usize,
    pub filtered_count: usize,
}

impl<'a> Page<'a> {
    pub fn build(items: &'a [ListItem], search_term: &str, page: usize, page_size: usize) -> Self {
        let filtered_count = filter(items, search_term).len();
        Self {
            items: filter_and_paginate(items, search_term, page, page_size),
            page,
            total_pages: total_pages(filtered_count, page_size),
            filtered_count,
        }
    }

    /// Whether the pager should be shown at all
    pub fn has_multiple_pages(&self) -> bool {
        self.total_pages > 1
    }
}
