//! WordGuard List Loader
//!
//! This crate turns a list resource (a JSON `{ blacklist, whitelist }`
//! record) into [`WordLists`] and applies it to a [`Validator`]. With the
//! `fetch` feature it can also read the resource from disk or over HTTP.

pub mod error;
pub mod parser;
pub mod stats;
#[cfg(feature = "fetch")]
pub mod source;

pub use error::LoadError;
pub use parser::parse_word_lists;
pub use stats::ListStats;
#[cfg(feature = "fetch")]
pub use source::{fetch_word_lists, load_into, ListSource};

use wg_core::{UpdateMode, Validator, WordLists};

/// Apply already-parsed lists and log what was loaded.
pub fn apply_lists(validator: &Validator, lists: WordLists, mode: UpdateMode) -> ListStats {
    let stats = ListStats::from_lists(&lists);
    if stats.empty_fragments > 0 {
        log::warn!("lists.empty_fragments count={}", stats.empty_fragments);
    }
    let snapshot = validator.apply(lists, mode);
    log::info!(
        "lists.loaded blacklist={} whitelist={} duplicates={} generation={}",
        stats.blacklist,
        stats.whitelist,
        stats.blacklist_duplicates + stats.whitelist_duplicates,
        snapshot.generation()
    );
    stats
}

/// Parse `body` and apply it. A parse failure is logged and leaves the
/// validator untouched.
pub fn apply_json(validator: &Validator, body: &str, mode: UpdateMode) -> Result<ListStats, LoadError> {
    match parse_word_lists(body) {
        Ok(lists) => Ok(apply_lists(validator, lists, mode)),
        Err(e) => {
            log::warn!("lists.load_failed source=<inline> err={}", e);
            Err(e)
        }
    }
}
