//! Demonstration driver for the substring searcher
//!
//! Reproduces the printed searches the algorithm was originally published
//! with. The driver is an external caller of the library: it supplies the
//! haystack/needle pairs and consumes a single index result per search.

use strfind::{get_cpu_features, SubstringSearcher};

fn report(searcher: &SubstringSearcher, haystack: &str, needle: &str) {
    match searcher.find(haystack.as_bytes(), needle.as_bytes()) {
        Some(idx) => println!("   `{}` in `{}`: {}", needle, haystack, idx),
        None => println!("   `{}` in `{}`: not found", needle, haystack),
    }
}

fn main() {
    env_logger::init();
    strfind::init();

    let features = get_cpu_features();
    println!("=== strfind demo ===");
    println!("CPU: {} {}", features.vendor, features.model);
    println!("Search variant: {}\n", features.optimal_search_variant());

    let searcher = SubstringSearcher::new();
    println!("1. Basic searches:");
    report(&searcher, "a_cat_tries", "cat");
    report(&searcher, "a_dog_tries_cat_dog_tries_a_cat_tries", "tries");

    println!("\n2. Long haystack:");
    let lower = "abcdefghijklmnopqrstuvwxyz";
    let upper = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    let haystack = format!("{}{}{}{}", lower.repeat(7), upper, lower.repeat(2), "a");
    report(&searcher, &haystack, upper);

    println!("\n3. Matches at the buffer edges:");
    report(&searcher, &format!("prefix{}", lower.repeat(2)), "prefix");
    report(&searcher, &format!("{}suffix", lower.repeat(2)), "suffix");

    println!("\n4. Not-found cases:");
    report(&searcher, "a_dog_tries", "cat");
    report(&searcher, "", "cat");
    report(&searcher, "a_dog_tries", "");
}
