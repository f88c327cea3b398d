//! List resource parser
//!
//! The list resource is a JSON object with optional `blacklist` and
//! `whitelist` arrays of strings:
//!
//! ```json
//! { "blacklist": ["badword", "worse"], "whitelist": ["badwordsmith"] }
//! ```
//!
//! A missing or `null` field is an empty list. Unknown fields are ignored.

use wg_core::WordLists;

use crate::error::LoadError;

/// Parse a list resource body.
pub fn parse_word_lists(text: &str) -> Result<WordLists, LoadError> {
    Ok(serde_json::from_str(text)?)
}
