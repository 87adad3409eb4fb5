//! Search configuration
//!
//! Controls which SIMD tiers the searcher is allowed to select. Configuration
//! can be constructed directly, loaded from environment variables with the
//! `STRFIND_` prefix, or persisted as JSON.

use crate::error::{Result, StrfindError};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Configuration for substring search tier selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Enable SIMD acceleration (when false, the scalar tier is always used)
    pub enable_simd: bool,
    /// Enable the AVX2 tier on CPUs that support it
    pub enable_avx2: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            enable_simd: true,
            enable_avx2: true,
        }
    }
}

impl SearchConfig {
    /// Validate the configuration for consistency.
    pub fn validate(&self) -> Result<()> {
        if self.enable_avx2 && !self.enable_simd {
            return Err(StrfindError::configuration(
                "enable_avx2 requires enable_simd",
            ));
        }
        Ok(())
    }

    /// Initialize configuration from environment variables with the
    /// `STRFIND_` prefix (`STRFIND_SIMD_ENABLE`, `STRFIND_SIMD_AVX2`).
    pub fn from_env() -> Result<Self> {
        Self::from_env_with_prefix("STRFIND_")
    }

    /// Initialize configuration from environment variables with a custom prefix.
    pub fn from_env_with_prefix(prefix: &str) -> Result<Self> {
        let mut config = Self::default();
        config.enable_simd = parse_env_bool(&format!("{}SIMD_ENABLE", prefix), config.enable_simd);
        config.enable_avx2 = parse_env_bool(&format!("{}SIMD_AVX2", prefix), config.enable_avx2);
        if !config.enable_simd {
            config.enable_avx2 = false;
        }
        config.validate()?;
        Ok(config)
    }

    /// High-performance preset: every supported tier enabled.
    pub fn performance_preset() -> Self {
        Self {
            enable_simd: true,
            enable_avx2: true,
        }
    }

    /// Compatibility preset: scalar only, no SIMD dispatch.
    pub fn compat_preset() -> Self {
        Self {
            enable_simd: false,
            enable_avx2: false,
        }
    }

    /// Save the configuration to a JSON file.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let serialized = serde_json::to_string_pretty(self).map_err(|e| {
            StrfindError::configuration(format!("Failed to serialize search config: {}", e))
        })?;
        std::fs::write(path, serialized)?;
        Ok(())
    }

    /// Load a configuration from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            StrfindError::configuration(format!("Failed to parse search config file: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }
}

/// Parse a boolean environment variable, accepting `true/1/yes/on`.
fn parse_env_bool(var_name: &str, default: bool) -> bool {
    env::var(var_name)
        .ok()
        .map(|s| {
            let s = s.to_lowercase();
            matches!(s.as_str(), "true" | "1" | "yes" | "on")
        })
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert!(config.enable_simd);
        assert!(config.enable_avx2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets() {
        assert!(SearchConfig::performance_preset().validate().is_ok());

        let compat = SearchConfig::compat_preset();
        assert!(compat.validate().is_ok());
        assert!(!compat.enable_simd);
    }

    #[test]
    fn test_invalid_combination() {
        let config = SearchConfig {
            enable_simd: false,
            enable_avx2: true,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_env_bool() {
        assert!(parse_env_bool("STRFIND_TEST_UNSET_VARIABLE", true));
        assert!(!parse_env_bool("STRFIND_TEST_UNSET_VARIABLE", false));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("search.json");

        let config = SearchConfig::compat_preset();
        config.save_to_file(&path).unwrap();

        let loaded = SearchConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(SearchConfig::load_from_file(&path).is_err());
    }
}
