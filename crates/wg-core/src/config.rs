//! Validator configuration

use serde::{Deserialize, Serialize};

use crate::lists::UpdateMode;
use crate::pattern::FragmentSyntax;

/// Knobs for a [`crate::Validator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// How fragments are turned into pattern terms.
    pub fragment_syntax: FragmentSyntax,
    /// Combination rule used by [`crate::Validator::load`].
    pub update_mode: UpdateMode,
    /// Upper bound on cached verdicts per list generation. `None` is unbounded.
    pub cache_capacity: Option<usize>,
}
