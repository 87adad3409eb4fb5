//! # CPU Feature Detection
//!
//! Runtime CPU feature detection with adaptive search tier selection. Features
//! are detected once per process and cached; the search module consults the
//! cached set to pick the widest block width the hardware supports.

use std::collections::HashMap;
use std::sync::OnceLock;

/// CPU feature flags for runtime detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CpuFeature {
    /// SSE2 (128-bit integer vectors, baseline on x86_64)
    SSE2,
    /// SSE4.1
    SSE4_1,
    /// SSE4.2
    SSE4_2,
    /// AVX
    AVX,
    /// AVX2 (256-bit integer vectors)
    AVX2,
    /// POPCNT
    POPCNT,
    /// ARM NEON (128-bit vectors, mandatory on aarch64)
    NEON,
    /// Efficient unaligned memory access
    UnalignedAccess,
}

/// Detected CPU feature set with identification metadata
#[derive(Debug, Clone)]
pub struct CpuFeatureSet {
    /// Available CPU features
    pub features: HashMap<CpuFeature, bool>,
    /// CPU vendor (Intel, AMD, ARM, etc.)
    pub vendor: String,
    /// CPU model name
    pub model: String,
    /// Number of logical cores
    pub logical_cores: usize,
    /// Cache line size (typically 64 bytes)
    pub cache_line_size: usize,
}

impl CpuFeatureSet {
    /// Check if a specific feature is available
    pub fn has_feature(&self, feature: CpuFeature) -> bool {
        self.features.get(&feature).copied().unwrap_or(false)
    }

    /// Get the optimal substring search variant for this CPU
    pub fn optimal_search_variant(&self) -> &'static str {
        if self.has_feature(CpuFeature::AVX2) {
            "avx2"
        } else if self.has_feature(CpuFeature::SSE2) {
            "sse2"
        } else if self.has_feature(CpuFeature::NEON) {
            "neon"
        } else {
            "scalar"
        }
    }

    /// SIMD tier: 0 = scalar, 1 = 128-bit vectors, 2 = 256-bit vectors
    pub fn simd_tier(&self) -> u8 {
        if self.has_feature(CpuFeature::AVX2) {
            2
        } else if self.has_feature(CpuFeature::SSE2) || self.has_feature(CpuFeature::NEON) {
            1
        } else {
            0
        }
    }

    /// Block width in bytes processed per search step on this CPU
    pub fn search_block_width(&self) -> usize {
        match self.simd_tier() {
            2 => 32,
            1 => 16,
            _ => 1,
        }
    }

    /// Get recommended buffer alignment for SIMD operations
    pub fn recommended_alignment(&self) -> usize {
        if self.has_feature(CpuFeature::AVX2) {
            32
        } else if self.has_feature(CpuFeature::SSE2) || self.has_feature(CpuFeature::NEON) {
            16
        } else {
            8
        }
    }
}

/// Runtime CPU feature detection interface
pub struct RuntimeCpuFeatures;

impl RuntimeCpuFeatures {
    /// Create a new runtime feature detector
    pub fn new() -> Self {
        Self
    }

    /// Detect all available CPU features
    pub fn detect_features(&self) -> CpuFeatureSet {
        let mut features = HashMap::new();

        #[cfg(target_arch = "x86_64")]
        {
            self.detect_x86_features(&mut features);
        }

        #[cfg(target_arch = "aarch64")]
        {
            self.detect_arm_features(&mut features);
        }

        #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
        {
            features.insert(CpuFeature::UnalignedAccess, false);
        }

        let (vendor, model) = self.get_cpu_info();
        let logical_cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);

        CpuFeatureSet {
            features,
            vendor,
            model,
            logical_cores,
            cache_line_size: self.get_cache_line_size(),
        }
    }

    /// Detect x86_64 specific features using cpuid
    #[cfg(target_arch = "x86_64")]
    fn detect_x86_features(&self, features: &mut HashMap<CpuFeature, bool>) {
        let cpuid = raw_cpuid::CpuId::new();

        if let Some(feature_info) = cpuid.get_feature_info() {
            features.insert(CpuFeature::SSE2, feature_info.has_sse2());
            features.insert(CpuFeature::SSE4_1, feature_info.has_sse41());
            features.insert(CpuFeature::SSE4_2, feature_info.has_sse42());
            features.insert(CpuFeature::AVX, feature_info.has_avx());
            features.insert(CpuFeature::POPCNT, feature_info.has_popcnt());
        }

        if let Some(extended_features) = cpuid.get_extended_feature_info() {
            features.insert(CpuFeature::AVX2, extended_features.has_avx2());
        }

        // Always available on x86_64
        features.insert(CpuFeature::UnalignedAccess, true);
    }

    /// Detect ARM specific features
    #[cfg(target_arch = "aarch64")]
    fn detect_arm_features(&self, features: &mut HashMap<CpuFeature, bool>) {
        // NEON and unaligned access are mandatory on AArch64
        features.insert(CpuFeature::NEON, true);
        features.insert(CpuFeature::UnalignedAccess, true);
    }

    /// Get CPU vendor and model information
    fn get_cpu_info(&self) -> (String, String) {
        #[cfg(target_arch = "x86_64")]
        {
            let cpuid = raw_cpuid::CpuId::new();
            let vendor = cpuid
                .get_vendor_info()
                .map(|v| v.as_str().to_string())
                .unwrap_or_else(|| "Unknown".to_string());
            let model = cpuid
                .get_processor_brand_string()
                .map(|b| b.as_str().to_string())
                .unwrap_or_else(|| "Unknown".to_string());
            (vendor, model)
        }

        #[cfg(target_arch = "aarch64")]
        {
            // /proc/cpuinfo is the best userspace source on Linux; elsewhere
            // fall back to a generic identification
            if let Ok(cpuinfo) = std::fs::read_to_string("/proc/cpuinfo") {
                let mut vendor = "ARM".to_string();
                let mut model = "Unknown".to_string();

                for line in cpuinfo.lines() {
                    if line.starts_with("CPU implementer") {
                        if line.contains("0x41") {
                            vendor = "ARM".to_string();
                        } else if line.contains("0x51") {
                            vendor = "Qualcomm".to_string();
                        }
                    } else if line.starts_with("model name") {
                        if let Some(name) = line.split(':').nth(1) {
                            model = name.trim().to_string();
                        }
                    }
                }
                return (vendor, model);
            }
            ("ARM".to_string(), "Unknown".to_string())
        }

        #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
        {
            ("Unknown".to_string(), "Unknown".to_string())
        }
    }

    /// Get the cache line size in bytes
    fn get_cache_line_size(&self) -> usize {
        #[cfg(target_arch = "x86_64")]
        {
            let cpuid = raw_cpuid::CpuId::new();
            if let Some(cache_params) = cpuid.get_cache_parameters() {
                for cache in cache_params {
                    return cache.coherency_line_size();
                }
            }
        }

        // 64 bytes on virtually all modern hardware
        64
    }
}

impl Default for RuntimeCpuFeatures {
    fn default() -> Self {
        Self::new()
    }
}

// Global CPU feature detection
static CPU_FEATURES: OnceLock<CpuFeatureSet> = OnceLock::new();

/// Get the global CPU feature set (detected once on first call)
pub fn get_cpu_features() -> &'static CpuFeatureSet {
    CPU_FEATURES.get_or_init(|| RuntimeCpuFeatures::new().detect_features())
}

/// Check if a specific CPU feature is available
pub fn has_cpu_feature(feature: CpuFeature) -> bool {
    get_cpu_features().has_feature(feature)
}
