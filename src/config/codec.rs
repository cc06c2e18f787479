//! Codec configuration: alphabet size and frequency counting strategy.

use super::{parse_env_bool, parse_env_var, Config};
use crate::error::{HuffmanError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Number of code points in 7-bit ASCII
pub const ASCII_ALPHABET_SIZE: u16 = 128;

/// Number of code points in a full byte alphabet
pub const BYTE_ALPHABET_SIZE: u16 = 256;

/// Configuration shared by frequency analysis, tree building and the file helpers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Size of the symbol code space. Symbols must be below this value, and the
    /// single-symbol companion wraps modulo this size.
    pub alphabet_size: u16,
    /// Minimum input length before frequency counting is sharded across threads
    /// (only with the `parallel` feature)
    pub parallel_threshold: usize,
    /// Allow sharded frequency counting (only with the `parallel` feature)
    pub parallel_counting: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            alphabet_size: ASCII_ALPHABET_SIZE,
            parallel_threshold: 1024 * 1024,
            parallel_counting: true,
        }
    }
}

impl CodecConfig {
    /// 7-bit ASCII text input
    pub fn ascii_preset() -> Self {
        Self::default()
    }

    /// Arbitrary binary input, every byte value is a symbol
    pub fn byte_preset() -> Self {
        Self {
            alphabet_size: BYTE_ALPHABET_SIZE,
            ..Self::default()
        }
    }

    /// Set the alphabet size
    pub fn with_alphabet_size(mut self, alphabet_size: u16) -> Self {
        self.alphabet_size = alphabet_size;
        self
    }

    /// Check whether a symbol is inside the configured code space
    #[inline]
    pub fn contains_symbol(&self, symbol: u8) -> bool {
        u16::from(symbol) < self.alphabet_size
    }
}

impl Config for CodecConfig {
    fn validate(&self) -> Result<()> {
        if self.alphabet_size < 2 || self.alphabet_size > BYTE_ALPHABET_SIZE {
            return Err(HuffmanError::configuration(format!(
                "alphabet_size must be between 2 and {}, got {}",
                BYTE_ALPHABET_SIZE, self.alphabet_size
            )));
        }
        if self.parallel_threshold == 0 {
            return Err(HuffmanError::configuration(
                "parallel_threshold must be greater than 0",
            ));
        }
        Ok(())
    }

    fn from_env_with_prefix(prefix: &str) -> Result<Self> {
        let mut config = Self::default();
        config.alphabet_size = parse_env_var(&format!("{}ALPHABET_SIZE", prefix), config.alphabet_size);
        config.parallel_threshold = parse_env_var(
            &format!("{}PARALLEL_THRESHOLD", prefix),
            config.parallel_threshold,
        );
        config.parallel_counting = parse_env_bool(
            &format!("{}PARALLEL_COUNTING", prefix),
            config.parallel_counting,
        );
        config.validate()?;
        Ok(config)
    }

    fn performance_preset() -> Self {
        Self {
            alphabet_size: BYTE_ALPHABET_SIZE,
            parallel_threshold: 256 * 1024,
            parallel_counting: true,
        }
    }

    /// Same as [`CodecConfig::ascii_preset`] but counting stays on the calling
    /// thread, so no rayon pool or per-shard count arrays are allocated.
    fn memory_preset() -> Self {
        Self {
            parallel_threshold: usize::MAX,
            parallel_counting: false,
            ..Self::ascii_preset()
        }
    }

    /// Same as [`CodecConfig::byte_preset`] but counting stays on the calling
    /// thread, so latency does not depend on the rayon pool.
    fn realtime_preset() -> Self {
        Self {
            parallel_threshold: usize::MAX,
            parallel_counting: false,
            ..Self::byte_preset()
        }
    }

    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let serialized = serde_json::to_string_pretty(self).map_err(|e| {
            HuffmanError::configuration(format!("Failed to serialize codec config: {}", e))
        })?;
        std::fs::write(path, serialized)?;
        Ok(())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            HuffmanError::configuration(format!("Failed to parse codec config file: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_is_ascii() {
        let config = CodecConfig::default();
        assert_eq!(config.alphabet_size, 128);
        assert!(config.validate().is_ok());
        assert!(config.contains_symbol(127));
        assert!(!config.contains_symbol(128));
    }

    #[test]
    fn test_all_presets_valid() {
        assert!(CodecConfig::ascii_preset().validate().is_ok());
        assert!(CodecConfig::byte_preset().validate().is_ok());
        assert!(CodecConfig::performance_preset().validate().is_ok());
        assert!(CodecConfig::memory_preset().validate().is_ok());
        assert!(CodecConfig::realtime_preset().validate().is_ok());
        assert!(CodecConfig::balanced_preset().validate().is_ok());

        assert!(CodecConfig::byte_preset().contains_symbol(255));
    }

    #[test]
    fn test_sequential_presets_keep_alphabet() {
        let memory = CodecConfig::memory_preset();
        assert_eq!(memory.alphabet_size, CodecConfig::ascii_preset().alphabet_size);
        assert!(!memory.parallel_counting);

        let realtime = CodecConfig::realtime_preset();
        assert_eq!(realtime.alphabet_size, CodecConfig::byte_preset().alphabet_size);
        assert!(!realtime.parallel_counting);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let config = CodecConfig::default().with_alphabet_size(1);
        assert!(matches!(
            config.validate(),
            Err(HuffmanError::Configuration { .. })
        ));

        let config = CodecConfig::default().with_alphabet_size(257);
        assert!(config.validate().is_err());

        let config = CodecConfig {
            parallel_threshold: 0,
            ..CodecConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_env_with_prefix() {
        std::env::set_var("HCTEST_CODEC_ALPHABET_SIZE", "256");
        std::env::set_var("HCTEST_CODEC_PARALLEL_COUNTING", "off");

        let config = CodecConfig::from_env_with_prefix("HCTEST_CODEC_").unwrap();
        assert_eq!(config.alphabet_size, 256);
        assert!(!config.parallel_counting);
        assert_eq!(config.parallel_threshold, CodecConfig::default().parallel_threshold);

        std::env::set_var("HCTEST_CODEC_ALPHABET_SIZE", "1");
        assert!(CodecConfig::from_env_with_prefix("HCTEST_CODEC_").is_err());

        std::env::remove_var("HCTEST_CODEC_ALPHABET_SIZE");
        std::env::remove_var("HCTEST_CODEC_PARALLEL_COUNTING");
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("codec.json");

        let config = CodecConfig::byte_preset();
        config.save_to_file(&path).unwrap();
        let loaded = CodecConfig::load_from_file(&path).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");

        std::fs::write(&path, r#"{"alphabet_size": 1, "parallel_threshold": 8, "parallel_counting": false}"#)
            .unwrap();
        assert!(CodecConfig::load_from_file(&path).is_err());

        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            CodecConfig::load_from_file(&path),
            Err(HuffmanError::Configuration { .. })
        ));
    }
}
