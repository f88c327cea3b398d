//! WordGuard Core Library
//!
//! This crate provides the word-list validator used to screen free-text input
//! against a blacklist, with a whitelist that overrides blacklist hits.
//!
//! # Architecture
//!
//! Both lists are compiled into one case-insensitive alternation each. The
//! compiled pair and a verdict cache are published together as an immutable
//! snapshot; a list update builds a new snapshot and swaps it in atomically,
//! which also discards every cached verdict.
//!
//! # Modules
//!
//! - `hash`: rolling text hash used as the cache key
//! - `pattern`: word list to alternation compiler
//! - `lists`: word lists and the atomically swapped list store
//! - `cache`: verdict cache with optional LRU bound
//! - `validator`: the `check(text) -> bool` entry point
//! - `config`: validator configuration
//! - `types`: shared result types

pub mod cache;
pub mod config;
pub mod hash;
pub mod lists;
pub mod pattern;
pub mod types;
pub mod validator;

// Re-export commonly used types
pub use cache::ResultCache;
pub use config::ValidatorConfig;
pub use hash::{text_hash, TextHash};
pub use lists::{ListSnapshot, ListStore, UpdateMode, WordLists};
pub use pattern::{CompiledPattern, FragmentSyntax, PatternCompiler};
pub use types::{CheckOutcome, CheckStats, Classification};
pub use validator::Validator;
