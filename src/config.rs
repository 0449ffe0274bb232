//! # Configuration Management
//!
//! Centralized configuration for the packet codec.
//!
//! This module provides protocol constants, decode limits for untrusted
//! length fields, the redirect signing key, and logging settings.
//!
//! ## Configuration Sources
//! - TOML files via `from_file()`
//! - Direct instantiation with defaults
//!
//! ## Security Considerations
//! - Every count or length field decoded from the wire is clamped against
//!   [`DecodeLimits`] before it sizes a loop or an allocation.
//! - The redirect signing key is an explicitly constructed value handed to
//!   the one message constructor that needs it; there is no process-global
//!   key material.

use crate::error::{ProtocolError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::Level;

/// Client build this protocol revision targets. The session layer compares
/// the build reported in the auth session message against this value.
pub const CLIENT_BUILD: u32 = 15595;

/// Upper bound on a single decoded message payload (64 KiB). Decode limits
/// default to fractions of this value.
pub const MAX_MESSAGE_SIZE: usize = 64 * 1024;

/// Bounds applied to untrusted count and length fields during decode.
///
/// The wire format carries explicit counts ahead of lists, strings, and raw
/// spans. A hostile peer controls those values, so every one of them is
/// checked against these limits before it drives a loop or an allocation.
/// Violations surface as [`ProtocolError::OversizedCount`].
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub struct DecodeLimits {
    /// Maximum byte length of a single string field
    pub max_string_bytes: usize,

    /// Maximum element count of a single list field
    pub max_list_len: usize,

    /// Maximum byte length of a single raw byte span
    pub max_blob_bytes: usize,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_string_bytes: 8 * 1024,
            max_list_len: 4096,
            max_blob_bytes: MAX_MESSAGE_SIZE,
        }
    }
}

impl DecodeLimits {
    /// Check a decoded string length against the limit
    pub fn check_string(&self, len: usize) -> Result<()> {
        if len > self.max_string_bytes {
            return Err(ProtocolError::OversizedCount {
                what: "string",
                count: len,
                limit: self.max_string_bytes,
            });
        }
        Ok(())
    }

    /// Check a decoded list count against the limit
    pub fn check_list(&self, what: &'static str, len: usize) -> Result<()> {
        if len > self.max_list_len {
            return Err(ProtocolError::OversizedCount {
                what,
                count: len,
                limit: self.max_list_len,
            });
        }
        Ok(())
    }

    /// Check a decoded raw span length against the limit
    pub fn check_blob(&self, len: usize) -> Result<()> {
        if len > self.max_blob_bytes {
            return Err(ProtocolError::OversizedCount {
                what: "byte span",
                count: len,
                limit: self.max_blob_bytes,
            });
        }
        Ok(())
    }

    /// Validate the limits for common misconfigurations
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.max_string_bytes == 0 {
            errors.push("max_string_bytes cannot be 0".to_string());
        } else if self.max_string_bytes > MAX_MESSAGE_SIZE {
            errors.push(format!(
                "max_string_bytes too large: {} (a string cannot exceed the message size {})",
                self.max_string_bytes, MAX_MESSAGE_SIZE
            ));
        }

        if self.max_list_len == 0 {
            errors.push("max_list_len cannot be 0".to_string());
        } else if self.max_list_len > 1_000_000 {
            errors.push(format!(
                "max_list_len too large: {} (max recommended: 1,000,000)",
                self.max_list_len
            ));
        }

        if self.max_blob_bytes == 0 {
            errors.push("max_blob_bytes cannot be 0".to_string());
        } else if self.max_blob_bytes > MAX_MESSAGE_SIZE {
            errors.push(format!(
                "max_blob_bytes too large: {} (a span cannot exceed the message size {})",
                self.max_blob_bytes, MAX_MESSAGE_SIZE
            ));
        }

        errors
    }
}

/// Key material for signing connection-redirect messages.
///
/// Constructed explicitly by the embedder and passed to
/// [`crate::protocol::messages::auth::ConnectTo::new`]; never stored in
/// module-level state.
#[derive(Clone, PartialEq, Eq)]
pub struct RedirectKey {
    key: [u8; 32],
}

impl RedirectKey {
    /// Wrap raw key bytes
    pub fn new(key: [u8; 32]) -> Self {
        Self { key }
    }

    /// Borrow the raw key bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.key
    }
}

impl std::fmt::Debug for RedirectKey {
    // Key material stays out of logs.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("RedirectKey(..)")
    }
}

/// Main configuration structure for embedders of the codec
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ProtocolConfig {
    /// Decode limits for untrusted length fields
    #[serde(default)]
    pub limits: DecodeLimits,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ProtocolConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ProtocolError::ConfigError(format!("Failed to read config file: {e}")))?;

        Self::from_toml(&contents)
    }

    /// Load configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str::<Self>(content)
            .map_err(|e| ProtocolError::ConfigError(format!("Failed to parse TOML: {e}")))
    }

    /// Generate example configuration file content
    pub fn example_config() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|_| String::from("# Failed to generate example config"))
    }

    /// Validate the configuration for common issues and misconfigurations
    ///
    /// Returns a list of validation errors. Empty list means configuration is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        errors.extend(self.limits.validate());
        errors.extend(self.logging.validate());

        errors
    }

    /// Validate and return Result - convenience method
    pub fn validate_strict(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ProtocolError::ConfigError(format!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            )))
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Application name for logs
    pub app_name: String,

    /// Log level
    #[serde(with = "log_level_serde")]
    pub log_level: Level,

    /// Whether to log to console
    pub log_to_console: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            app_name: String::from("realm-protocol"),
            log_level: Level::INFO,
            log_to_console: true,
        }
    }
}

impl LoggingConfig {
    /// Validate logging configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.app_name.is_empty() {
            errors.push("Application name cannot be empty".to_string());
        } else if self.app_name.len() > 64 {
            errors.push(format!(
                "Application name too long: {} characters (maximum: 64)",
                self.app_name.len()
            ));
        }

        errors
    }
}

/// Helper module for tracing::Level serialization/deserialization
mod log_level_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;
    use tracing::Level;

    pub fn serialize<S>(level: &Level, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let level_str = match *level {
            Level::TRACE => "trace",
            Level::DEBUG => "debug",
            Level::INFO => "info",
            Level::WARN => "warn",
            Level::ERROR => "error",
        };
        level_str.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Level, D::Error>
    where
        D: Deserializer<'de>,
    {
        let level_str = String::deserialize(deserializer)?;
        Level::from_str(&level_str)
            .map_err(|_| serde::de::Error::custom(format!("Invalid log level: {level_str}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits_are_valid() {
        assert!(DecodeLimits::default().validate().is_empty());
    }

    #[test]
    fn limit_checks_reject_oversize() {
        let limits = DecodeLimits::default();
        assert!(limits.check_string(limits.max_string_bytes).is_ok());
        assert!(limits.check_string(limits.max_string_bytes + 1).is_err());
        assert!(limits.check_list("items", limits.max_list_len + 1).is_err());
        assert!(limits.check_blob(limits.max_blob_bytes + 1).is_err());
    }

    #[test]
    fn config_roundtrips_through_toml() {
        let config = ProtocolConfig::default();
        let toml = ProtocolConfig::example_config();
        let parsed = ProtocolConfig::from_toml(&toml).expect("example config parses");
        assert_eq!(parsed.limits, config.limits);
        assert_eq!(parsed.logging.app_name, config.logging.app_name);
    }

    #[test]
    fn zero_limit_fails_validation() {
        let mut config = ProtocolConfig::default();
        config.limits.max_list_len = 0;
        assert!(config.validate_strict().is_err());
    }

    #[test]
    fn redirect_key_debug_hides_material() {
        let key = RedirectKey::new([0xAB; 32]);
        assert_eq!(format!("{key:?}"), "RedirectKey(..)");
    }
}
