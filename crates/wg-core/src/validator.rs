//! Validator
//!
//! This is the hot path: every keystroke in a bound form field and every
//! render of it ends up in [`Validator::check`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::config::ValidatorConfig;
use crate::hash::TextHash;
use crate::lists::{ListSnapshot, ListStore, UpdateMode, WordLists};
use crate::pattern::PatternCompiler;
use crate::types::{CheckOutcome, CheckStats, Classification};

/// Checks free text against a blacklist with whitelist overrides.
///
/// All state lives in the instance; independent validators never share lists
/// or cached verdicts.
#[derive(Debug)]
pub struct Validator {
    config: ValidatorConfig,
    store: ListStore,
    stats: Counters,
}

#[derive(Debug, Default)]
struct Counters {
    checks: AtomicU64,
    short_circuits: AtomicU64,
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
}

impl Validator {
    /// Validator with empty lists and default configuration.
    pub fn new() -> Self {
        Self::with_config(ValidatorConfig::default())
    }

    pub fn with_config(config: ValidatorConfig) -> Self {
        let compiler = PatternCompiler::new(config.fragment_syntax);
        Self {
            config,
            store: ListStore::new(compiler, config.cache_capacity),
            stats: Counters::default(),
        }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn store(&self) -> &ListStore {
        &self.store
    }

    /// Is `text` acceptable?
    ///
    /// Absent or empty text is always valid, as is any text while the
    /// blacklist is empty (including before the first load completes).
    #[inline]
    pub fn check(&self, text: Option<&str>) -> bool {
        self.evaluate(text).valid
    }

    /// [`Self::check`], also reporting the classification when the verdict
    /// was computed rather than read from the cache.
    pub fn evaluate(&self, text: Option<&str>) -> CheckOutcome {
        self.stats.checks.fetch_add(1, Ordering::Relaxed);

        let snapshot = self.store.snapshot();
        let text = match text {
            Some(t) if !t.is_empty() && !snapshot.blacklist_pattern().is_empty() => t,
            _ => {
                self.stats.short_circuits.fetch_add(1, Ordering::Relaxed);
                return CheckOutcome::fresh(Classification::Clean);
            }
        };

        let key = TextHash::of(text);
        if let Some(verdict) = snapshot.cache().lock().get(key) {
            self.stats.cache_hits.fetch_add(1, Ordering::Relaxed);
            log::debug!("check.cache_hit hash={} verdict={}", key.get(), verdict);
            return CheckOutcome::cached(verdict);
        }
        self.stats.cache_misses.fetch_add(1, Ordering::Relaxed);

        let classification = classify_with(&snapshot, text);
        log::debug!(
            "check.classified hash={} class={} generation={}",
            key.get(),
            classification,
            snapshot.generation()
        );

        snapshot.cache().lock().put(key, classification.is_valid());
        CheckOutcome::fresh(classification)
    }

    /// [`Self::check`] for a present text.
    #[inline]
    pub fn is_valid(&self, text: &str) -> bool {
        self.check(Some(text))
    }

    /// Classify `text` against the current lists without touching the cache.
    pub fn classify(&self, text: &str) -> Classification {
        classify_with(&self.store.snapshot(), text)
    }

    /// Overwrite the lists.
    pub fn replace(&self, lists: WordLists) -> Arc<ListSnapshot> {
        self.store.replace(lists)
    }

    /// Append to the lists.
    pub fn merge(&self, lists: WordLists) -> Arc<ListSnapshot> {
        self.store.merge(lists)
    }

    pub fn apply(&self, lists: WordLists, mode: UpdateMode) -> Arc<ListSnapshot> {
        self.store.apply(lists, mode)
    }

    /// Apply `lists` with the configured [`UpdateMode`].
    pub fn load(&self, lists: WordLists) -> Arc<ListSnapshot> {
        self.store.apply(lists, self.config.update_mode)
    }

    pub fn stats(&self) -> CheckStats {
        CheckStats {
            checks: self.stats.checks.load(Ordering::Relaxed),
            short_circuits: self.stats.short_circuits.load(Ordering::Relaxed),
            cache_hits: self.stats.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.stats.cache_misses.load(Ordering::Relaxed),
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

fn classify_with(snapshot: &ListSnapshot, text: &str) -> Classification {
    if !snapshot.blacklist_pattern().is_match(text) {
        Classification::Clean
    } else if snapshot.whitelist_pattern().is_match(text) {
        Classification::Whitelisted
    } else {
        Classification::Blacklisted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::FragmentSyntax;

    fn lists(black: &[&str], white: &[&str]) -> WordLists {
        WordLists::new(
            black.iter().map(|s| s.to_string()).collect(),
            white.iter().map(|s| s.to_string()).collect(),
        )
    }

    fn validator(black: &[&str], white: &[&str]) -> Validator {
        let v = Validator::new();
        v.replace(lists(black, white));
        v
    }

    #[test]
    fn test_empty_blacklist_accepts_everything() {
        let v = Validator::new();
        assert!(v.is_valid("badword"));
        assert!(v.is_valid("anything"));

        // A whitelist alone changes nothing.
        let v = validator(&[], &["ok"]);
        assert!(v.is_valid("badword"));
        assert_eq!(v.stats().short_circuits, 1);
        assert_eq!(v.stats().cache_misses, 0);
    }

    #[test]
    fn test_absent_or_empty_text_is_valid() {
        let v = validator(&["bad"], &[]);
        assert!(v.check(None));
        assert!(v.check(Some("")));
        assert!(v.store().snapshot().cache().lock().is_empty());
    }

    #[test]
    fn test_blacklisted_text_rejected() {
        let v = validator(&["badword"], &[]);
        assert!(!v.is_valid("this is a badword here"));
        assert!(v.is_valid("clean text"));
    }

    #[test]
    fn test_whitelist_overrides() {
        let v = validator(&["bad"], &["badass"]);
        assert!(v.is_valid("he is a badass"));
        assert!(!v.is_valid("that is bad"));
        assert_eq!(v.classify("he is a badass"), Classification::Whitelisted);
        assert_eq!(v.classify("that is bad"), Classification::Blacklisted);
        assert_eq!(v.classify("fine"), Classification::Clean);
    }

    #[test]
    fn test_whitelist_anywhere_in_text_overrides() {
        // The whitelist match need not overlap the blacklist match.
        let v = validator(&["bad"], &["badass"]);
        assert!(v.is_valid("bad words from a badass"));
    }

    #[test]
    fn test_case_insensitive() {
        let v = validator(&["badword"], &[]);
        assert_eq!(v.is_valid("BADWORD"), v.is_valid("badword"));
        assert!(!v.is_valid("BADWORD"));
        let v = validator(&["bad"], &["BADASS"]);
        assert!(v.is_valid("BadAss"));
    }

    #[test]
    fn test_second_check_served_from_cache() {
        let v = validator(&["bad"], &[]);
        let first = v.is_valid("bad news");
        let second = v.is_valid("bad news");
        assert_eq!(first, second);

        let stats = v.stats();
        assert_eq!(stats.checks, 2);
        assert_eq!(stats.cache_misses, 1);
        assert_eq!(stats.cache_hits, 1);
    }

    #[test]
    fn test_replace_invalidates_cache() {
        let v = validator(&["bad"], &[]);
        assert!(!v.is_valid("bad news"));

        v.replace(lists(&["worse"], &[]));
        assert!(v.is_valid("bad news"));

        v.replace(lists(&["bad"], &["news"]));
        assert!(v.is_valid("bad news"));
        assert_eq!(v.stats().cache_hits, 0);
    }

    #[test]
    fn test_merge_accumulates() {
        let v = Validator::new();
        v.merge(lists(&["bad"], &[]));
        v.merge(lists(&["worse"], &[]));
        assert!(!v.is_valid("bad"));
        assert!(!v.is_valid("worse"));
    }

    #[test]
    fn test_load_uses_configured_mode() {
        let v = Validator::with_config(ValidatorConfig {
            update_mode: UpdateMode::Merge,
            ..ValidatorConfig::default()
        });
        v.load(lists(&["bad"], &[]));
        v.load(lists(&["worse"], &[]));
        assert_eq!(v.store().snapshot().lists().blacklist.len(), 2);

        let v = Validator::new();
        v.load(lists(&["bad"], &[]));
        v.load(lists(&["worse"], &[]));
        assert_eq!(v.store().snapshot().lists().blacklist, vec!["worse"]);
    }

    #[test]
    fn test_literal_syntax_config() {
        let v = Validator::with_config(ValidatorConfig {
            fragment_syntax: FragmentSyntax::Literal,
            ..ValidatorConfig::default()
        });
        v.replace(lists(&["b.d"], &[]));
        assert!(v.is_valid("bad"));
        assert!(!v.is_valid("b.d"));
    }

    #[test]
    fn test_bounded_cache() {
        let v = Validator::with_config(ValidatorConfig {
            cache_capacity: Some(1),
            ..ValidatorConfig::default()
        });
        v.replace(lists(&["bad"], &[]));
        v.is_valid("one");
        v.is_valid("two");
        v.is_valid("one");
        assert_eq!(v.store().snapshot().cache().lock().len(), 1);
        assert_eq!(v.stats().cache_hits, 0);
    }

    #[test]
    fn test_validators_are_independent() {
        let a = validator(&["bad"], &[]);
        let b = Validator::new();
        assert!(!a.is_valid("bad"));
        assert!(b.is_valid("bad"));
    }

    #[test]
    fn test_concurrent_checks_during_updates() {
        use std::sync::atomic::AtomicBool;

        // Each generation accepts "a shiny badge" on its own. Pairing the
        // first blacklist with the second (empty) whitelist would reject it.
        let first = || lists(&["bad"], &["badge"]);
        let second = || lists(&["worse"], &[]);

        let v = Arc::new(Validator::new());
        v.replace(first());
        let done = Arc::new(AtomicBool::new(false));

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let v = Arc::clone(&v);
                let done = Arc::clone(&done);
                std::thread::spawn(move || {
                    let mut rounds = 0u64;
                    while !done.load(Ordering::Acquire) || rounds < 100 {
                        assert!(v.is_valid("a shiny badge"));
                        assert_ne!(v.classify("a shiny badge"), Classification::Blacklisted);
                        rounds += 1;
                    }
                })
            })
            .collect();

        for i in 0..500 {
            v.replace(if i % 2 == 0 { second() } else { first() });
        }
        done.store(true, Ordering::Release);

        for r in readers {
            r.join().unwrap();
        }
        assert_eq!(v.store().generation(), 501);
    }

    #[test]
    fn test_evaluate_reports_fresh_and_cached() {
        let v = validator(&["bad"], &["badass"]);

        let first = v.evaluate(Some("a badass"));
        assert!(first.valid);
        assert_eq!(first.classification, Some(Classification::Whitelisted));
        assert!(!first.is_cached());

        let second = v.evaluate(Some("a badass"));
        assert!(second.valid);
        assert!(second.is_cached());

        let rejected = v.evaluate(Some("so bad"));
        assert_eq!(rejected.classification, Some(Classification::Blacklisted));
        assert!(!rejected.valid);

        let empty = v.evaluate(None);
        assert!(empty.valid);
        assert_eq!(empty.classification, Some(Classification::Clean));
    }

    #[test]
    fn test_lookahead_fragment_in_blacklist() {
        let v = validator(&["bad(?!ass)"], &[]);
        assert!(!v.is_valid("so bad"));
        assert!(v.is_valid("a badass"));
    }
}
