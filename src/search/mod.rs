//! Vectorized substring search
//!
//! Implements first-occurrence substring search with a lane-parallel
//! first/last-byte candidate filter and exact verification. See
//! [`SubstringSearcher`] for the algorithm description.

mod substring;

pub use substring::{find_substring, get_global_searcher, SearchTier, SubstringSearcher};
