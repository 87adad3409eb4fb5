//! First/last-byte filtered substring search
//!
//! The scanner walks the haystack in blocks of `W` bytes. For a block starting
//! at offset `i` it loads two independently positioned windows: `W` bytes at
//! `i` (compared lane-by-lane against the needle's first byte) and `W` bytes at
//! `i + needle_len - 1` (compared against its last byte). ANDing the two
//! predicates yields a candidate mask; a set lane `k` means the haystack agrees
//! with the needle at both ends of a potential match starting at `i + k`, which
//! is necessary but not sufficient. Each candidate is then verified with an
//! exact comparison of the interior bytes.
//!
//! Searching for `cat` in `a_cat_tries` with 16-byte blocks:
//!
//! ```text
//! F        = [ c | c | c | c | c | c | c | c | c | c | c | ... ]
//! L        = [ t | t | t | t | t | t | t | t | t | t | t | ... ]
//! block @i = [ a | _ | c | a | t | _ | t | r | i | e | s | ... ]
//! block @i+2 = [ c | a | t | _ | t | r | i | e | s | ...       ]
//! eq_first = [ 0 | 0 | 1 | 0 | 0 | 0 | 0 | 0 | 0 | 0 | 0 | ... ]
//! eq_last  = [ 0 | 0 | 1 | 0 | 1 | 0 | 0 | 0 | 0 | 0 | 0 | ... ]
//! mask     = [ 0 | 0 | 1 | 0 | 0 | 0 | 0 | 0 | 0 | 0 | 0 | ... ]
//! ```
//!
//! Lane 2 survives the filter; the interior comparison confirms the match and
//! the search reports offset 2.
//!
//! ## Boundary safety
//!
//! The original formulation of this algorithm tolerates reading up to `W - 1`
//! bytes past the end of the haystack on the final block. This implementation
//! instead clamps the vector loop to blocks whose candidate lanes all lie
//! within the valid start range `0..haystack_len - needle_len + 1`, and
//! finishes the remaining candidates with the scalar path. Every load stays
//! inside the haystack, results are bit-identical, and callers need no
//! over-allocation.

use crate::config::SearchConfig;
use crate::error::Result;
use crate::system::cpu_features::{get_cpu_features, CpuFeature, CpuFeatureSet};
use std::sync::OnceLock;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

/// SIMD implementation tiers for substring search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchTier {
    /// Scalar fallback (no SIMD, one candidate position per step)
    Scalar,
    /// SSE2 with 16-byte blocks
    Sse2,
    /// AVX2 with 32-byte blocks
    Avx2,
    /// ARM NEON with 16-byte blocks
    Neon,
}

/// First-occurrence substring searcher with tiered SIMD dispatch
///
/// The searcher is a pure function of its two input slices: it never mutates
/// either buffer, allocates nothing, and keeps no state across calls beyond
/// the tier selected at construction. Concurrent searches on disjoint buffers
/// are independently safe.
pub struct SubstringSearcher {
    /// Selected implementation tier based on available features
    tier: SearchTier,
}

impl SubstringSearcher {
    /// Creates a searcher using the best tier the CPU supports
    pub fn new() -> Self {
        let features = get_cpu_features();
        let tier = Self::select_optimal_tier(features, &SearchConfig::default());
        log::debug!("substring searcher selected tier {:?}", tier);
        Self { tier }
    }

    /// Creates a searcher honoring the tier restrictions in `config`
    pub fn with_config(config: &SearchConfig) -> Result<Self> {
        config.validate()?;
        let features = get_cpu_features();
        Ok(Self {
            tier: Self::select_optimal_tier(features, config),
        })
    }

    /// Selects the widest block width allowed by both hardware and config
    fn select_optimal_tier(features: &CpuFeatureSet, config: &SearchConfig) -> SearchTier {
        if !config.enable_simd {
            return SearchTier::Scalar;
        }

        if config.enable_avx2 && features.has_feature(CpuFeature::AVX2) {
            return SearchTier::Avx2;
        }

        if features.has_feature(CpuFeature::SSE2) {
            return SearchTier::Sse2;
        }

        if features.has_feature(CpuFeature::NEON) {
            return SearchTier::Neon;
        }

        SearchTier::Scalar
    }

    /// Returns the currently selected search tier
    pub fn tier(&self) -> SearchTier {
        self.tier
    }

    /// Finds the first occurrence of `needle` in `haystack`
    ///
    /// Returns the lowest offset `i` with `haystack[i..i + needle.len()] ==
    /// needle`, or `None` if no such offset exists. An empty needle never
    /// matches, and a needle longer than the haystack never matches.
    ///
    /// # Arguments
    /// * `haystack` - Byte slice to search in
    /// * `needle` - Byte pattern to search for
    ///
    /// # Returns
    /// Offset of the first occurrence, or None if not found
    pub fn find(&self, haystack: &[u8], needle: &[u8]) -> Option<usize> {
        if haystack.is_empty() || needle.is_empty() || needle.len() > haystack.len() {
            return None;
        }

        match self.tier {
            #[cfg(target_arch = "x86_64")]
            SearchTier::Avx2 => unsafe { self.find_avx2(haystack, needle) },
            #[cfg(target_arch = "x86_64")]
            SearchTier::Sse2 => unsafe { self.find_sse2(haystack, needle) },
            #[cfg(target_arch = "aarch64")]
            SearchTier::Neon => self.find_neon(haystack, needle),
            _ => self.find_scalar(haystack, needle),
        }
    }

    // =========================================================================
    // X86_64 IMPLEMENTATIONS
    // =========================================================================

    /// AVX2 search with 32-byte blocks
    #[cfg(target_arch = "x86_64")]
    #[target_feature(enable = "avx2")]
    unsafe fn find_avx2(&self, haystack: &[u8], needle: &[u8]) -> Option<usize> {
        let n = needle.len();
        // Number of valid match start positions
        let end = haystack.len() - n + 1;

        let first = _mm256_set1_epi8(needle[0] as i8);
        let last = _mm256_set1_epi8(needle[n - 1] as i8);
        let ptr = haystack.as_ptr();

        let mut i = 0;
        while i + 32 <= end {
            // Both windows stay in bounds: the farthest byte touched is
            // i + 31 + n - 1 < end + n - 1 = haystack.len()
            let block_first = unsafe { _mm256_loadu_si256(ptr.add(i) as *const __m256i) };
            let block_last = unsafe { _mm256_loadu_si256(ptr.add(i + n - 1) as *const __m256i) };

            let eq_first = _mm256_cmpeq_epi8(first, block_first);
            let eq_last = _mm256_cmpeq_epi8(last, block_last);
            let mut mask = _mm256_movemask_epi8(_mm256_and_si256(eq_first, eq_last)) as u32;

            while mask != 0 {
                let k = mask.trailing_zeros() as usize;
                if interior_matches(haystack, i + k, needle) {
                    return Some(i + k);
                }
                mask &= mask - 1;
            }

            i += 32;
        }

        // Fewer than 32 candidate positions left
        self.find_scalar(&haystack[i..], needle).map(|pos| i + pos)
    }

    /// SSE2 search with 16-byte blocks
    #[cfg(target_arch = "x86_64")]
    #[target_feature(enable = "sse2")]
    unsafe fn find_sse2(&self, haystack: &[u8], needle: &[u8]) -> Option<usize> {
        let n = needle.len();
        let end = haystack.len() - n + 1;

        let first = _mm_set1_epi8(needle[0] as i8);
        let last = _mm_set1_epi8(needle[n - 1] as i8);
        let ptr = haystack.as_ptr();

        let mut i = 0;
        while i + 16 <= end {
            let block_first = unsafe { _mm_loadu_si128(ptr.add(i) as *const __m128i) };
            let block_last = unsafe { _mm_loadu_si128(ptr.add(i + n - 1) as *const __m128i) };

            let eq_first = _mm_cmpeq_epi8(first, block_first);
            let eq_last = _mm_cmpeq_epi8(last, block_last);
            let mut mask = _mm_movemask_epi8(_mm_and_si128(eq_first, eq_last)) as u32;

            while mask != 0 {
                let k = mask.trailing_zeros() as usize;
                if interior_matches(haystack, i + k, needle) {
                    return Some(i + k);
                }
                mask &= mask - 1;
            }

            i += 16;
        }

        self.find_scalar(&haystack[i..], needle).map(|pos| i + pos)
    }

    // =========================================================================
    // AARCH64 IMPLEMENTATION
    // =========================================================================

    /// NEON search with 16-byte blocks
    ///
    /// NEON has no movemask equivalent, so the candidate predicate is stored
    /// to a fixed 16-byte stack buffer and walked lane by lane in ascending
    /// order, preserving the lowest-index guarantee.
    #[cfg(target_arch = "aarch64")]
    fn find_neon(&self, haystack: &[u8], needle: &[u8]) -> Option<usize> {
        use std::arch::aarch64::*;

        let n = needle.len();
        let end = haystack.len() - n + 1;

        let first = vdupq_n_u8(needle[0]);
        let last = vdupq_n_u8(needle[n - 1]);
        let ptr = haystack.as_ptr();
        let mut mask = [0u8; 16];

        let mut i = 0;
        while i + 16 <= end {
            // NEON is mandatory on aarch64; the loads stay in bounds by the
            // same argument as the x86_64 paths
            let block_first = unsafe { vld1q_u8(ptr.add(i)) };
            let block_last = unsafe { vld1q_u8(ptr.add(i + n - 1)) };

            let eq_first = vceqq_u8(first, block_first);
            let eq_last = vceqq_u8(last, block_last);
            let pred = vandq_u8(eq_first, eq_last);

            if vmaxvq_u8(pred) != 0 {
                unsafe { vst1q_u8(mask.as_mut_ptr(), pred) };
                for (k, &lane) in mask.iter().enumerate() {
                    if lane != 0 && interior_matches(haystack, i + k, needle) {
                        return Some(i + k);
                    }
                }
            }

            i += 16;
        }

        self.find_scalar(&haystack[i..], needle).map(|pos| i + pos)
    }

    // =========================================================================
    // SCALAR FALLBACK IMPLEMENTATION
    // =========================================================================

    /// Scalar search applying the same first/last filter one position at a
    /// time; also finishes the tail candidates for the vector tiers
    fn find_scalar(&self, haystack: &[u8], needle: &[u8]) -> Option<usize> {
        let n = needle.len();
        if n == 0 || n > haystack.len() {
            return None;
        }

        let first = needle[0];
        let last = needle[n - 1];

        for i in 0..=haystack.len() - n {
            if haystack[i] == first
                && haystack[i + n - 1] == last
                && interior_matches(haystack, i, needle)
            {
                return Some(i);
            }
        }

        None
    }
}

impl Default for SubstringSearcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Verifies the interior bytes of a candidate match at `pos`
///
/// The filter already established the first and last bytes, so only
/// `needle[1..n-1]` needs checking; vacuously true for needles of length 1
/// or 2.
#[inline]
fn interior_matches(haystack: &[u8], pos: usize, needle: &[u8]) -> bool {
    let n = needle.len();
    n <= 2 || haystack[pos + 1..pos + n - 1] == needle[1..n - 1]
}

/// Global searcher instance for reuse
static GLOBAL_SEARCHER: OnceLock<SubstringSearcher> = OnceLock::new();

/// Gets the global substring searcher (constructed on first use)
pub fn get_global_searcher() -> &'static SubstringSearcher {
    GLOBAL_SEARCHER.get_or_init(SubstringSearcher::new)
}

/// Convenience function for substring search using the global searcher
pub fn find_substring(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    get_global_searcher().find(haystack, needle)
}
