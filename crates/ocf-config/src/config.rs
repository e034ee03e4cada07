//! Codec configuration and loading.
//!
//! The main entry point is [`OcfConfig`], the contents of
//! `.ocf/config.yaml`. [`load_config`] layers built-in defaults, the YAML
//! file and `OCF_`-prefixed environment variables (`__` separates nested
//! keys, e.g. `OCF_CODEC__PRETTY=true`).

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Provider;
use ocf_core::bean::CURRENT_PROPERTIES_VERSION;
use ocf_core::codec::{self, DecodeOptions, HeaderPolicy, ValidationMode};
use ocf_core::validation::Validate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::ocf_dir::{find_ocf_dir, OCF_DIR_NAME};

/// Prefix of environment variables that override configuration keys.
pub const ENV_PREFIX: &str = "OCF_";

/// File name of the configuration inside the `.ocf/` directory.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read or written.
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// The configuration could not be serialized to YAML.
    #[error("failed to write config file: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// A layer held a value of the wrong shape.
    #[error("invalid configuration: {0}")]
    Extract(#[from] Box<figment::Error>),
}

/// A specialized `Result` type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Encoding and decoding settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Highest header version decoded without applying `newer-header`.
    #[serde(default = "default_max_header_version", rename = "max-header-version")]
    pub max_header_version: i64,

    /// What to do with documents whose header version is newer.
    #[serde(default, rename = "newer-header")]
    pub newer_header: HeaderPolicy,

    /// Write indented JSON.
    #[serde(default)]
    pub pretty: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_header_version: default_max_header_version(),
            newer_header: HeaderPolicy::default(),
            pretty: false,
        }
    }
}

fn default_max_header_version() -> i64 {
    CURRENT_PROPERTIES_VERSION
}

/// Validation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Validation run on every decoded bean. Values: `none` | `warn` | `error`.
    #[serde(default, rename = "on-decode")]
    pub on_decode: ValidationMode,
}

// ---------------------------------------------------------------------------
// Main config struct
// ---------------------------------------------------------------------------

/// The full configuration, corresponding to `.ocf/config.yaml`.
///
/// Every field has a default, so a partial file fills in the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcfConfig {
    #[serde(default)]
    pub codec: CodecConfig,

    #[serde(default)]
    pub validation: ValidationConfig,
}

impl OcfConfig {
    /// Decode options matching this configuration.
    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            max_header_version: self.codec.max_header_version,
            newer_header: self.codec.newer_header,
            validation: self.validation.on_decode,
        }
    }

    /// Encodes a bean, indented when `codec.pretty` is set.
    pub fn encode<T: Serialize + ?Sized>(&self, bean: &T) -> codec::Result<String> {
        codec::encode(bean, self.codec.pretty)
    }

    /// Decodes a bean with this configuration's header policy and
    /// validation mode.
    pub fn decode<T: DeserializeOwned + Validate>(&self, text: &str) -> codec::Result<T> {
        codec::decode_with(&self.decode_options(), text)
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Load configuration from `config.yaml` inside the given `.ocf/` directory,
/// with environment overrides.
///
/// A missing or empty file yields the defaults.
pub fn load_config(ocf_dir: &Path) -> Result<OcfConfig> {
    extract(layered(ocf_dir)?)
}

/// Like [`load_config`], with a final layer that overrides everything else.
pub fn load_config_with<P: Provider>(ocf_dir: &Path, overrides: P) -> Result<OcfConfig> {
    extract(layered(ocf_dir)?.merge(overrides))
}

fn layered(ocf_dir: &Path) -> Result<Figment> {
    let mut figment = Figment::from(Serialized::defaults(OcfConfig::default()));

    let config_path = ocf_dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        let content = std::fs::read_to_string(&config_path)?;
        // An empty file is valid and yields default config.
        if !content.trim().is_empty() {
            figment = figment.merge(Yaml::string(&content));
        }
    } else {
        tracing::debug!(path = %config_path.display(), "no config file, using defaults");
    }

    // OCF_CODEC__MAX_HEADER_VERSION -> codec.max-header-version
    let env = Env::prefixed(ENV_PREFIX)
        .map(|key| key.as_str().replace("__", ".").replace('_', "-").into());
    Ok(figment.merge(env))
}

fn extract(figment: Figment) -> Result<OcfConfig> {
    let config = figment.extract().map_err(Box::new)?;
    Ok(config)
}

/// Finds the `.ocf/` directory above `start` and loads its configuration,
/// or the defaults (plus environment overrides) if there is none.
pub fn discover_config(start: &Path) -> Result<OcfConfig> {
    match find_ocf_dir(start) {
        Some(dir) => load_config(&dir),
        None => load_config(&start.join(OCF_DIR_NAME)),
    }
}

/// Save configuration to `config.yaml` inside the given `.ocf/` directory.
///
/// The directory is created if it does not exist.
pub fn save_config(ocf_dir: &Path, config: &OcfConfig) -> Result<()> {
    std::fs::create_dir_all(ocf_dir)?;

    let config_path = ocf_dir.join(CONFIG_FILE_NAME);
    let yaml = serde_yaml::to_string(config)?;
    std::fs::write(config_path, yaml)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use ocf_core::asset::{Asset, AssetBuilder};
    use ocf_core::codec::CodecError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let cfg = OcfConfig::default();
        assert_eq!(cfg.codec.max_header_version, 1);
        assert_eq!(cfg.codec.newer_header, HeaderPolicy::Warn);
        assert!(!cfg.codec.pretty);
        assert_eq!(cfg.validation.on_decode, ValidationMode::None);
        assert_eq!(cfg.decode_options(), DecodeOptions::default());
    }

    #[test]
    fn test_load_missing_config_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config(&dir.path().join(".ocf")).unwrap();
        assert_eq!(cfg, OcfConfig::default());
    }

    #[test]
    fn test_empty_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "\n  \n").unwrap();
        let cfg = load_config(dir.path()).unwrap();
        assert_eq!(cfg, OcfConfig::default());
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "codec:\n  newer-header: reject\nvalidation:\n  on-decode: error\n",
        )
        .unwrap();

        let cfg = load_config_with(dir.path(), Serialized::default("codec.pretty", true)).unwrap();
        assert_eq!(cfg.codec.newer_header, HeaderPolicy::Reject);
        assert_eq!(cfg.codec.max_header_version, 1);
        assert!(cfg.codec.pretty);
        assert_eq!(cfg.validation.on_decode, ValidationMode::Error);
    }

    #[test]
    fn test_invalid_value_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "codec:\n  newer-header: sometimes\n")
            .unwrap();
        let err = load_config(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Extract(_)));
    }

    #[test]
    fn test_roundtrip_config() {
        let dir = tempfile::tempdir().unwrap();
        let ocf_dir = dir.path().join(".ocf");

        let mut cfg = OcfConfig::default();
        cfg.codec.max_header_version = 2;
        cfg.codec.newer_header = HeaderPolicy::Accept;
        cfg.validation.on_decode = ValidationMode::Warn;

        save_config(&ocf_dir, &cfg).unwrap();
        let yaml = std::fs::read_to_string(ocf_dir.join(CONFIG_FILE_NAME)).unwrap();
        assert!(yaml.contains("max-header-version: 2"));
        assert!(yaml.contains("on-decode: warn"));

        let loaded = load_config(&ocf_dir).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn test_config_drives_codec() {
        let mut cfg = OcfConfig::default();
        cfg.codec.pretty = true;
        cfg.codec.newer_header = HeaderPolicy::Reject;

        let asset = AssetBuilder::new("Asset:cfg").build();
        let text = cfg.encode(&asset).unwrap();
        assert!(text.contains('\n'));
        assert_eq!(cfg.decode::<Asset>(&text).unwrap(), asset);

        let future = r#"{"headerVersion":9}"#;
        assert!(matches!(
            cfg.decode::<Asset>(future),
            Err(CodecError::HeaderTooNew { found: 9, supported: 1 })
        ));
    }

    #[test]
    fn test_discover_config_from_subdirectory() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = OcfConfig::default();
        cfg.codec.pretty = true;
        save_config(&dir.path().join(OCF_DIR_NAME), &cfg).unwrap();

        let child = dir.path().join("models").join("sales");
        std::fs::create_dir_all(&child).unwrap();

        if std::env::var("OCF_DIR").is_err() {
            assert!(discover_config(&child).unwrap().codec.pretty);
        }
    }
}
