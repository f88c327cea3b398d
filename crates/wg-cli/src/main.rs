//! WordGuard CLI
//!
//! CLI tool for checking texts against word lists and inspecting lists.

use std::io::{self, BufRead};

use clap::{Args, Parser, Subcommand};
use log::LevelFilter;

use wg_core::{CheckOutcome, FragmentSyntax, UpdateMode, Validator, ValidatorConfig};
use wg_loader::{load_into, ListSource, ListStats};

mod bench;

#[derive(Parser)]
#[command(name = "wg-cli")]
#[command(about = "WordGuard word-list validator and tools")]
struct Cli {
    /// Verbose logging (cache hits and classifications)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ListArgs {
    /// List resource (file path or http(s) URL)
    #[arg(short, long)]
    lists: String,

    /// Additional list resources appended to the first one
    #[arg(short, long)]
    merge_with: Vec<String>,

    /// Match fragments literally instead of as pattern terms
    #[arg(long)]
    literal: bool,

    /// Maximum cached verdicts (unbounded when omitted)
    #[arg(long)]
    cache_capacity: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check texts (arguments, or one per stdin line)
    Check {
        #[command(flatten)]
        lists: ListArgs,

        /// Print results as JSON lines
        #[arg(long)]
        json: bool,

        /// Texts to check
        texts: Vec<String>,
    },

    /// Show list statistics and compiled patterns
    Info {
        #[command(flatten)]
        lists: ListArgs,
    },

    /// Measure check latency
    Bench {
        #[command(flatten)]
        lists: ListArgs,

        /// Checks per measurement
        #[arg(short, long, default_value_t = 2000)]
        iterations: usize,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Check { lists, json, texts } => cmd_check(&lists, json, texts).await,
        Commands::Info { lists } => cmd_info(&lists).await,
        Commands::Bench { lists, iterations } => {
            let (validator, _) = build_validator(&lists).await;
            bench::run_bench(&validator, iterations)
        }
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    pretty_env_logger::formatted_builder()
        .filter_level(level)
        .parse_default_env()
        .init();
}

/// Build a validator and load every requested list resource into it.
///
/// Load failures are reported but not fatal: the validator keeps whatever
/// loaded before the failure, which may be nothing at all.
async fn build_validator(args: &ListArgs) -> (Validator, Vec<ListStats>) {
    let config = ValidatorConfig {
        fragment_syntax: if args.literal { FragmentSyntax::Literal } else { FragmentSyntax::Pattern },
        update_mode: UpdateMode::Replace,
        cache_capacity: args.cache_capacity,
    };
    let validator = Validator::with_config(config);

    let sources = std::iter::once((&args.lists, UpdateMode::Replace))
        .chain(args.merge_with.iter().map(|loc| (loc, UpdateMode::Merge)));

    let mut stats = Vec::new();
    for (location, mode) in sources {
        let source = ListSource::parse(location);
        match load_into(&validator, &source, mode).await {
            Ok(s) => stats.push(s),
            Err(e) => eprintln!("Warning: {e} (continuing with previously loaded lists)"),
        }
    }

    (validator, stats)
}

async fn cmd_check(args: &ListArgs, json: bool, texts: Vec<String>) -> Result<bool, String> {
    let (validator, _) = build_validator(args).await;

    let texts = if texts.is_empty() {
        io::stdin()
            .lock()
            .lines()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| format!("Failed to read stdin: {}", e))?
    } else {
        texts
    };

    let mut all_valid = true;
    for text in &texts {
        let outcome = validator.evaluate(Some(text));
        all_valid &= outcome.valid;
        println!("{}", render_outcome(text, &outcome, json));
    }

    Ok(all_valid)
}

/// One output line. Cached verdicts carry no classification and print
/// `cached` in its place.
fn render_outcome(text: &str, outcome: &CheckOutcome, json: bool) -> String {
    if json {
        serde_json::json!({
            "text": text,
            "valid": outcome.valid,
            "classification": outcome.classification,
        })
        .to_string()
    } else {
        let class = outcome.classification.map_or("cached", |c| c.as_str());
        let verdict = if outcome.valid { "VALID" } else { "INVALID" };
        format!("{}\t{}\t{}", verdict, class, text)
    }
}

async fn cmd_info(args: &ListArgs) -> Result<bool, String> {
    let (validator, stats) = build_validator(args).await;
    if stats.is_empty() {
        return Err("No list resource could be loaded".to_string());
    }

    let snapshot = validator.store().snapshot();
    let lists = snapshot.lists();
    // Counted on the combined lists so duplicates across resources show up.
    let totals = ListStats::from_lists(lists);

    println!("Lists loaded: {} resource(s), generation {}", stats.len(), snapshot.generation());
    println!("  Syntax:      {:?}", validator.config().fragment_syntax);
    println!();
    println!("Blacklist:");
    println!("  Fragments:   {}", lists.blacklist.len());
    println!("  Duplicates:  {}", totals.blacklist_duplicates);
    print_pattern(snapshot.blacklist_pattern());
    println!();
    println!("Whitelist:");
    println!("  Fragments:   {}", lists.whitelist.len());
    println!("  Duplicates:  {}", totals.whitelist_duplicates);
    print_pattern(snapshot.whitelist_pattern());

    if totals.empty_fragments > 0 {
        println!();
        println!(
            "Warning: {} empty fragment(s); in pattern syntax these match every text",
            totals.empty_fragments
        );
    }

    Ok(true)
}

fn print_pattern(pattern: &wg_core::CompiledPattern) {
    match pattern.source() {
        Some(source) => println!("  Pattern:     (?i){}", source),
        None => println!("  Pattern:     <never matches>"),
    }
    for fragment in pattern.escaped_fragments() {
        println!("  Escaped:     {:?}", fragment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wg_core::WordLists;

    fn validator(black: &[&str], white: &[&str]) -> Validator {
        let v = Validator::new();
        v.replace(WordLists::new(
            black.iter().map(|s| s.to_string()).collect(),
            white.iter().map(|s| s.to_string()).collect(),
        ));
        v
    }

    #[test]
    fn test_render_fresh_outcome() {
        let v = validator(&["bad"], &["badass"]);
        let outcome = v.evaluate(Some("that is bad"));
        assert_eq!(render_outcome("that is bad", &outcome, false), "INVALID\tblacklisted\tthat is bad");

        let outcome = v.evaluate(Some("a badass"));
        let line: serde_json::Value = serde_json::from_str(&render_outcome("a badass", &outcome, true)).unwrap();
        assert_eq!(line["valid"], true);
        assert_eq!(line["classification"], "whitelisted");
    }

    #[test]
    fn test_render_cached_outcome_has_no_class() {
        let v = validator(&["bad"], &[]);
        v.evaluate(Some("so bad"));
        let outcome = v.evaluate(Some("so bad"));
        assert_eq!(render_outcome("so bad", &outcome, false), "INVALID\tcached\tso bad");

        let line: serde_json::Value = serde_json::from_str(&render_outcome("so bad", &outcome, true)).unwrap();
        assert_eq!(line["valid"], false);
        assert!(line["classification"].is_null());
    }

    #[test]
    fn test_merged_lists_count_cross_resource_duplicates() {
        let v = validator(&["bad"], &[]);
        v.merge(WordLists::new(vec!["bad".into(), "worse".into()], Vec::new()));
        let totals = ListStats::from_lists(v.store().snapshot().lists());
        assert_eq!(totals.blacklist, 3);
        assert_eq!(totals.blacklist_duplicates, 1);
    }
}
