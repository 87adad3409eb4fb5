//! # System Integration Utilities
//!
//! Runtime CPU feature detection used to select the substring search tier.
//! Detection runs once per process and is cached in a global feature set.

pub mod cpu_features;

// Re-export core functionality
pub use cpu_features::{
    get_cpu_features, has_cpu_feature, CpuFeature, CpuFeatureSet, RuntimeCpuFeatures,
};
