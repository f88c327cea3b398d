//! Word lists and the list store
//!
//! The store publishes an immutable [`ListSnapshot`] (both word lists, both
//! compiled patterns, and the verdict cache that belongs to them) behind one
//! atomically swapped pointer. Readers load the pointer once per check and so
//! always see a matching blacklist/whitelist pair. Writers build a complete
//! new snapshot off to the side and swap it in.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use serde::{Deserialize, Deserializer, Serialize};

use crate::cache::ResultCache;
use crate::pattern::{CompiledPattern, PatternCompiler};

/// The `{ blacklist, whitelist }` record produced by a list loader.
///
/// A missing or `null` field deserializes as an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordLists {
    #[serde(deserialize_with = "null_as_empty")]
    pub blacklist: Vec<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub whitelist: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl WordLists {
    pub fn new(blacklist: Vec<String>, whitelist: Vec<String>) -> Self {
        Self { blacklist, whitelist }
    }

    pub fn is_empty(&self) -> bool {
        self.blacklist.is_empty() && self.whitelist.is_empty()
    }

    /// Append `other` to both lists, keeping order and duplicates.
    pub fn extend(&mut self, other: WordLists) {
        self.blacklist.extend(other.blacklist);
        self.whitelist.extend(other.whitelist);
    }
}

/// How an incoming [`WordLists`] is combined with the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateMode {
    /// Incoming lists overwrite the current ones.
    #[default]
    Replace,
    /// Incoming fragments are appended to the current lists.
    Merge,
}

/// One consistent generation of lists, patterns and cached verdicts.
#[derive(Debug)]
pub struct ListSnapshot {
    generation: u64,
    lists: WordLists,
    blacklist: CompiledPattern,
    whitelist: CompiledPattern,
    cache: Mutex<ResultCache>,
}

impl ListSnapshot {
    fn build(
        generation: u64,
        lists: WordLists,
        compiler: &PatternCompiler,
        cache_capacity: Option<usize>,
    ) -> Self {
        let blacklist = compiler.compile(&lists.blacklist);
        let whitelist = compiler.compile(&lists.whitelist);
        Self {
            generation,
            lists,
            blacklist,
            whitelist,
            cache: Mutex::new(ResultCache::with_capacity(cache_capacity)),
        }
    }

    /// Monotonic update counter; the initial empty snapshot is generation 0.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn lists(&self) -> &WordLists {
        &self.lists
    }

    pub fn blacklist_pattern(&self) -> &CompiledPattern {
        &self.blacklist
    }

    pub fn whitelist_pattern(&self) -> &CompiledPattern {
        &self.whitelist
    }

    pub fn cache(&self) -> &Mutex<ResultCache> {
        &self.cache
    }
}

/// Holds the current [`ListSnapshot`] and swaps in new ones on update.
#[derive(Debug)]
pub struct ListStore {
    compiler: PatternCompiler,
    cache_capacity: Option<usize>,
    current: ArcSwap<ListSnapshot>,
    next_generation: AtomicU64,
    writer: Mutex<()>,
}

impl ListStore {
    /// Empty store: nothing is blacklisted until the first update.
    pub fn new(compiler: PatternCompiler, cache_capacity: Option<usize>) -> Self {
        let empty = ListSnapshot::build(0, WordLists::default(), &compiler, cache_capacity);
        Self {
            compiler,
            cache_capacity,
            current: ArcSwap::from_pointee(empty),
            next_generation: AtomicU64::new(1),
            writer: Mutex::new(()),
        }
    }

    /// The current snapshot. Hold on to it for the duration of one check.
    #[inline]
    pub fn snapshot(&self) -> Arc<ListSnapshot> {
        self.current.load_full()
    }

    pub fn blacklist_pattern(&self) -> CompiledPattern {
        self.current.load().blacklist.clone()
    }

    pub fn whitelist_pattern(&self) -> CompiledPattern {
        self.current.load().whitelist.clone()
    }

    pub fn generation(&self) -> u64 {
        self.current.load().generation
    }

    /// Overwrite both lists.
    pub fn replace(&self, lists: WordLists) -> Arc<ListSnapshot> {
        self.apply(lists, UpdateMode::Replace)
    }

    /// Append to both lists.
    pub fn merge(&self, lists: WordLists) -> Arc<ListSnapshot> {
        self.apply(lists, UpdateMode::Merge)
    }

    /// Combine `lists` with the current ones according to `mode`, recompile,
    /// and publish the result with a fresh, empty cache.
    pub fn apply(&self, lists: WordLists, mode: UpdateMode) -> Arc<ListSnapshot> {
        let _guard = self.writer.lock();

        let previous = self.current.load_full();
        let combined = match mode {
            UpdateMode::Replace => lists,
            UpdateMode::Merge => {
                let mut combined = previous.lists.clone();
                combined.extend(lists);
                combined
            }
        };

        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let next = Arc::new(ListSnapshot::build(
            generation,
            combined,
            &self.compiler,
            self.cache_capacity,
        ));
        self.current.store(Arc::clone(&next));

        // Checks still holding the old snapshot may refill this; it is
        // unreachable for new checks either way.
        previous.cache.lock().clear();

        log::info!(
            "lists.updated mode={:?} generation={} blacklist={} whitelist={}",
            mode,
            generation,
            next.lists.blacklist.len(),
            next.lists.whitelist.len()
        );

        next
    }
}

impl Default for ListStore {
    fn default() -> Self {
        Self::new(PatternCompiler::default(), None)
    }
}
