//! Shared result types

use serde::Serialize;

/// Why a text was accepted or rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    /// No blacklist fragment occurs in the text.
    Clean,
    /// A blacklist fragment occurs and no whitelist fragment does.
    Blacklisted,
    /// A blacklist fragment occurs but a whitelist fragment overrides it.
    Whitelisted,
}

impl Classification {
    /// The verdict: `true` means acceptable.
    #[inline]
    pub const fn is_valid(self) -> bool {
        !matches!(self, Self::Blacklisted)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clean => "clean",
            Self::Blacklisted => "blacklisted",
            Self::Whitelisted => "whitelisted",
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A verdict together with how it was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CheckOutcome {
    /// `true` means acceptable.
    pub valid: bool,
    /// Classification behind `valid`; `None` when the verdict came from the
    /// cache, which stores verdicts only.
    pub classification: Option<Classification>,
}

impl CheckOutcome {
    pub(crate) const fn fresh(classification: Classification) -> Self {
        Self {
            valid: classification.is_valid(),
            classification: Some(classification),
        }
    }

    pub(crate) const fn cached(valid: bool) -> Self {
        Self {
            valid,
            classification: None,
        }
    }

    pub const fn is_cached(&self) -> bool {
        self.classification.is_none()
    }
}

/// Counters describing how checks were answered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CheckStats {
    /// Total `check` calls.
    pub checks: u64,
    /// Answered without hashing: empty text or empty blacklist.
    pub short_circuits: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
}
