use std::collections::HashSet;

use wg_core::WordLists;

/// Summary of a loaded list resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListStats {
    pub blacklist: usize,
    pub whitelist: usize,
    pub blacklist_duplicates: usize,
    pub whitelist_duplicates: usize,
    /// Empty fragments. In pattern syntax an empty term matches every text.
    pub empty_fragments: usize,
}

impl ListStats {
    pub fn from_lists(lists: &WordLists) -> Self {
        let (blacklist_duplicates, black_empty) = scan(&lists.blacklist);
        let (whitelist_duplicates, white_empty) = scan(&lists.whitelist);
        Self {
            blacklist: lists.blacklist.len(),
            whitelist: lists.whitelist.len(),
            blacklist_duplicates,
            whitelist_duplicates,
            empty_fragments: black_empty + white_empty,
        }
    }
}

fn scan(fragments: &[String]) -> (usize, usize) {
    let mut seen: HashSet<String> = HashSet::new();
    let mut duplicates = 0usize;
    let mut empty = 0usize;
    for fragment in fragments {
        if fragment.is_empty() {
            empty += 1;
        }
        if !seen.insert(fragment.to_lowercase()) {
            duplicates += 1;
        }
    }
    (duplicates, empty)
}
