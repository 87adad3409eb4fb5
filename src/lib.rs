//! # strfind: SIMD-Accelerated Substring Search
//!
//! This crate implements a single primitive: locating the first occurrence of a
//! short byte pattern (the *needle*) inside a larger byte buffer (the *haystack*),
//! using a vectorized first/last-byte candidate filter to skip non-matching
//! positions in wide strides before falling back to an exact comparison.
//!
//! ## Key Features
//!
//! - **First/last-byte filter**: Per block of `W` bytes, every lane is compared
//!   against the needle's first byte and the lane `needle_len - 1` bytes ahead
//!   against its last byte; only lanes where both agree are verified exactly
//! - **Tiered SIMD dispatch**: AVX2 (32-byte blocks) and SSE2 (16-byte blocks)
//!   on x86_64, NEON (16-byte blocks) on aarch64, with a behaviorally identical
//!   scalar fallback everywhere
//! - **Boundary-safe loads**: Vector loops clamp to full blocks of candidate
//!   positions and finish the tail with the scalar path, so no load ever reads
//!   past the end of the haystack
//! - **No false negatives**: The filter is a necessary condition for a match;
//!   candidates it admits are checked byte-for-byte before being reported
//! - **Memory safety**: All unsafe operations are isolated to SIMD intrinsics
//!   behind runtime feature detection; the public API is completely safe
//!
//! ## Quick Start
//!
//! ```rust
//! use strfind::{find_substring, SubstringSearcher};
//!
//! // One-shot search through the global searcher
//! assert_eq!(find_substring(b"a_cat_tries", b"cat"), Some(2));
//! assert_eq!(find_substring(b"a_dog_tries", b"cat"), None);
//!
//! // Reusable searcher
//! let searcher = SubstringSearcher::new();
//! assert_eq!(searcher.find(b"hello world", b"world"), Some(6));
//! ```
//!
//! ## Semantics
//!
//! `find` returns the lowest offset `i` such that
//! `haystack[i..i + needle.len()]` equals the needle exactly, or `None` when no
//! such offset exists. An empty needle never matches, and a needle longer than
//! the haystack never matches; neither is an error.

#![warn(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod config;
pub mod error;
pub mod search;
pub mod system;

// Re-export core types
pub use config::SearchConfig;
pub use error::{Result, StrfindError};
pub use search::{find_substring, SearchTier, SubstringSearcher};
pub use system::{get_cpu_features, has_cpu_feature, CpuFeature, CpuFeatureSet};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Check if any SIMD search tier is available on this CPU
pub fn has_simd_support() -> bool {
    get_cpu_features().simd_tier() > 0
}

/// Initialize the library (logs the detected search tier)
pub fn init() {
    let features = get_cpu_features();
    log::debug!(
        "Initializing strfind v{}: search variant {}",
        VERSION,
        features.optimal_search_variant()
    );
}
