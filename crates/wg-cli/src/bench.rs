use std::time::Instant;

use wg_core::Validator;

const SAMPLE_TEXTS: &[&str] = &[
    "a perfectly ordinary sentence",
    "Hello there, how are you doing today?",
    "Please update my shipping address to the one on file",
    "lorem ipsum dolor sit amet, consectetur adipiscing elit",
    "",
];

pub fn run_bench(validator: &Validator, iterations: usize) -> Result<bool, String> {
    if iterations == 0 {
        return Err("Iterations must be greater than zero".to_string());
    }

    let snapshot = validator.store().snapshot();
    println!("Check Latency");
    println!("==================================================");
    println!(
        "Lists: {} blacklist / {} whitelist fragments",
        snapshot.lists().blacklist.len(),
        snapshot.lists().whitelist.len()
    );

    // Unique texts so every check misses the cache.
    let cold_texts: Vec<String> = (0..iterations)
        .map(|i| format!("{} #{}", SAMPLE_TEXTS[i % SAMPLE_TEXTS.len()], i))
        .collect();
    let cold = measure(cold_texts.iter().map(String::as_str), validator);

    let warm_texts = (0..iterations).map(|i| SAMPLE_TEXTS[i % SAMPLE_TEXTS.len()]);
    let warm = measure(warm_texts, validator);

    println!();
    report("Uncached", &cold);
    report("Cached", &warm);

    let stats = validator.stats();
    println!();
    println!(
        "Checks: {} (hits {}, misses {}, short-circuits {})",
        stats.checks, stats.cache_hits, stats.cache_misses, stats.short_circuits
    );

    Ok(true)
}

fn measure<'a>(texts: impl Iterator<Item = &'a str>, validator: &Validator) -> Vec<f64> {
    let mut latencies: Vec<f64> = texts
        .map(|text| {
            let start = Instant::now();
            let _ = validator.is_valid(text);
            start.elapsed().as_secs_f64() * 1_000_000.0
        })
        .collect();
    latencies.sort_by(|a, b| a.total_cmp(b));
    latencies
}

fn report(label: &str, sorted: &[f64]) {
    println!(
        "  {:<10} p50 {:>8.2}μs   p99 {:>8.2}μs   max {:>8.2}μs",
        label,
        percentile(sorted, 0.50),
        percentile(sorted, 0.99),
        sorted.last().copied().unwrap_or(0.0)
    );
}

fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let idx = ((sorted.len() as f64) * p).ceil() as usize;
    let idx = idx.saturating_sub(1).min(sorted.len() - 1);
    sorted[idx]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(percentile(&sorted, 0.5), 2.0);
        assert_eq!(percentile(&sorted, 0.99), 4.0);
        assert_eq!(percentile(&[], 0.5), 0.0);
    }

    #[test]
    fn test_measure_sorted() {
        let validator = Validator::new();
        let latencies = measure(SAMPLE_TEXTS.iter().copied(), &validator);
        assert_eq!(latencies.len(), SAMPLE_TEXTS.len());
        assert!(latencies.windows(2).all(|w| w[0] <= w[1]));
    }
}
