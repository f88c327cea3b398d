//! Pattern compiler
//!
//! Turns a word list into one case-insensitive alternation that reports
//! whether any fragment occurs anywhere in a text.
//!
//! # Fragment syntax
//!
//! By default fragments are spliced into the alternation verbatim, so list
//! authors may use regex syntax (`bad(ass)?`, `f[o0]o`). With
//! [`FragmentSyntax::Literal`] every fragment is escaped first and matched as
//! plain text.
//!
//! Lookaround and backreferences are honoured: a list that needs them is
//! compiled with the backtracking engine instead of the linear one.
//!
//! Compilation never fails. A fragment that is not valid pattern syntax in
//! either engine is escaped and matched literally, and a warning is logged.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

/// How fragments are interpreted when building the alternation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FragmentSyntax {
    /// Fragments are raw alternation terms.
    #[default]
    Pattern,
    /// Fragments are escaped and matched as literal substrings.
    Literal,
}

/// Matching engine behind a compiled pattern.
///
/// Lists are served by the linear-time `regex` engine whenever possible.
/// Fragments using lookaround or backreferences need the backtracking
/// engine.
#[derive(Debug, Clone)]
enum Engine {
    Linear(Regex),
    Backtracking(fancy_regex::Regex),
}

/// A compiled, read-only matcher for one word list.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    engine: Option<Engine>,
    source: String,
    fragment_count: usize,
    escaped: Vec<String>,
}

impl CompiledPattern {
    /// A pattern that matches nothing.
    pub fn never() -> Self {
        Self {
            engine: None,
            source: String::new(),
            fragment_count: 0,
            escaped: Vec::new(),
        }
    }

    /// Does any fragment occur in `text`?
    ///
    /// A backtracking match that exceeds its step limit counts as no match.
    #[inline]
    pub fn is_match(&self, text: &str) -> bool {
        match &self.engine {
            Some(Engine::Linear(re)) => re.is_match(text),
            Some(Engine::Backtracking(re)) => re.is_match(text).unwrap_or_else(|e| {
                log::warn!("pattern.match_aborted err={}", e);
                false
            }),
            None => false,
        }
    }

    /// First matching span, if any.
    pub fn find<'t>(&self, text: &'t str) -> Option<&'t str> {
        match self.engine.as_ref()? {
            Engine::Linear(re) => re.find(text).map(|m| m.as_str()),
            Engine::Backtracking(re) => re.find(text).ok().flatten().map(|m| m.as_str()),
        }
    }

    /// The alternation source, `None` for the never pattern.
    pub fn source(&self) -> Option<&str> {
        self.engine.as_ref().map(|_| self.source.as_str())
    }

    pub fn fragment_count(&self) -> usize {
        self.fragment_count
    }

    /// True when this pattern can never match.
    pub fn is_empty(&self) -> bool {
        self.engine.is_none()
    }

    /// True when the list needed the backtracking engine.
    pub fn is_backtracking(&self) -> bool {
        matches!(self.engine, Some(Engine::Backtracking(_)))
    }

    /// Fragments that were not valid syntax and got escaped.
    pub fn escaped_fragments(&self) -> &[String] {
        &self.escaped
    }
}

impl Default for CompiledPattern {
    fn default() -> Self {
        Self::never()
    }
}

/// Builds [`CompiledPattern`]s from word lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternCompiler {
    syntax: FragmentSyntax,
}

impl PatternCompiler {
    pub fn new(syntax: FragmentSyntax) -> Self {
        Self { syntax }
    }

    pub fn syntax(&self) -> FragmentSyntax {
        self.syntax
    }

    /// Compile `fragments` into a single case-insensitive alternation.
    ///
    /// An empty list compiles to [`CompiledPattern::never`]. Joining zero
    /// terms would otherwise produce the empty pattern, which matches every
    /// string.
    pub fn compile(&self, fragments: &[String]) -> CompiledPattern {
        if fragments.is_empty() {
            return CompiledPattern::never();
        }

        let fragment_count = fragments.len();

        if self.syntax == FragmentSyntax::Literal {
            let terms: Vec<String> = fragments.iter().map(|f| regex::escape(f)).collect();
            return assemble(terms.join("|"), fragment_count, Vec::new());
        }

        let verbatim = fragments.join("|");
        match build_engine(&verbatim) {
            Ok(engine) => {
                return CompiledPattern {
                    engine: Some(engine),
                    source: verbatim,
                    fragment_count,
                    escaped: Vec::new(),
                }
            }
            Err(e) => {
                log::debug!("pattern.verbatim_failed err={}", e);
            }
        }

        // Some fragment is broken in both engines. Escape only the offenders
        // so the rest keep their pattern meaning.
        let mut escaped = Vec::new();
        let terms: Vec<String> = fragments
            .iter()
            .map(|f| {
                if build_linear(f).is_ok() || build_backtracking(f).is_ok() {
                    f.clone()
                } else {
                    log::warn!("pattern.fragment_escaped fragment={:?}", f);
                    escaped.push(f.clone());
                    regex::escape(f)
                }
            })
            .collect();

        assemble(terms.join("|"), fragment_count, escaped)
    }
}

fn assemble(source: String, fragment_count: usize, escaped: Vec<String>) -> CompiledPattern {
    match build_engine(&source) {
        Ok(engine) => CompiledPattern {
            engine: Some(engine),
            source,
            fragment_count,
            escaped,
        },
        Err(e) => {
            // Only reachable when the automaton exceeds the size limit.
            log::warn!("pattern.compile_failed fragments={} err={}", fragment_count, e);
            CompiledPattern::never()
        }
    }
}

/// Pick the cheapest engine that accepts `source`.
fn build_engine(source: &str) -> Result<Engine, fancy_regex::Error> {
    match build_linear(source) {
        Ok(re) => Ok(Engine::Linear(re)),
        Err(linear_err) => {
            let re = build_backtracking(source)?;
            log::debug!("pattern.backtracking reason={}", linear_err);
            Ok(Engine::Backtracking(re))
        }
    }
}

fn build_linear(source: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(source).case_insensitive(true).build()
}

fn build_backtracking(source: &str) -> Result<fancy_regex::Regex, fancy_regex::Error> {
    fancy_regex::Regex::new(&format!("(?i:{})", source))
}
