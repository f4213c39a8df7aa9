//! Layered configuration for the discovery tunables.
//!
//! Values are merged in this order, later layers overriding earlier ones:
//!
//! 1. Built-in defaults ([`Config::default()`]).
//! 2. An optional YAML, TOML or JSON file, picked by extension.
//! 3. Environment variables prefixed with `SHELF_`, using `__` to separate
//!    nested keys (e.g. `SHELF_DISCOVERY__DEFAULT_LIMIT=5`).
//!
//! The merged result is validated before being handed out.

pub mod error;

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};
use shelf_discovery::PopularityWeights;
use shelf_discovery::tags::{DEFAULT_POPULAR_LIMIT, MAX_TAG_NAME_LENGTH};
use std::path::{Path, PathBuf};
use tracing::instrument;

/// Prefix of the environment variables read by [`Config::load()`].
pub const ENV_PREFIX: &str = "SHELF_";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub discovery: DiscoveryConfig,
    pub tags: TagConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Number of recommendations returned when the caller gives no limit.
    pub default_limit: usize,
    pub popularity: PopularityWeights,
}
impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            default_limit: shelf_discovery::DEFAULT_LIMIT,
            popularity: PopularityWeights::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagConfig {
    /// Number of popular tags returned when the caller gives no limit.
    pub popular_limit: usize,
    /// Longest accepted custom tag name, in characters.
    pub max_name_length: usize,
}
impl Default for TagConfig {
    fn default() -> Self {
        Self {
            popular_limit: DEFAULT_POPULAR_LIMIT,
            max_name_length: MAX_TAG_NAME_LENGTH,
        }
    }
}

impl Config {
    /// Per-user configuration file, e.g. `~/.config/shelf/config.toml` on Linux.
    ///
    /// Returns `None` when no home directory can be determined.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "shelf").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Build the provider stack without extracting it.
    ///
    /// Fails if `path` is given but does not exist or has an unknown extension.
    pub fn figment(path: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = path {
            if !path.is_file() {
                exn::bail!(ErrorKind::NotFound(path.to_path_buf()));
            }
            let extension = path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
            figment = match extension.as_deref() {
                Some("toml") => figment.merge(Toml::file(path)),
                Some("yaml" | "yml") => figment.merge(Yaml::file(path)),
                Some("json") => figment.merge(Json::file(path)),
                _ => exn::bail!(ErrorKind::UnsupportedFormat(path.to_path_buf())),
            };
        }
        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// Extract and validate a configuration from an existing provider stack.
    pub fn from_figment(figment: &Figment) -> Result<Self> {
        let config: Self = figment.extract().or_raise(|| ErrorKind::Load)?;
        config.validate()?;
        Ok(config)
    }

    /// Load defaults, then `path` (if any), then the environment.
    #[instrument(level = "debug")]
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = Self::from_figment(&Self::figment(path)?)?;
        tracing::debug!(?config, "loaded configuration");
        Ok(config)
    }

    /// Like [`load()`](Self::load) with [`default_path()`](Self::default_path),
    /// skipping the file layer when that file does not exist.
    pub fn load_default() -> Result<Self> {
        let path = Self::default_path().filter(|p| p.is_file());
        Self::load(path.as_deref())
    }

    /// Reject values that would make every request fail.
    pub fn validate(&self) -> Result<()> {
        if self.discovery.default_limit == 0 {
            exn::bail!(ErrorKind::Invalid {
                field: "discovery.default_limit",
                reason: "must be greater than zero",
            });
        }
        let weights = &self.discovery.popularity;
        if weights.download_weight == 0 && weights.view_weight == 0 {
            exn::bail!(ErrorKind::Invalid {
                field: "discovery.popularity",
                reason: "at least one weight must be greater than zero",
            });
        }
        if self.tags.popular_limit == 0 {
            exn::bail!(ErrorKind::Invalid {
                field: "tags.popular_limit",
                reason: "must be greater than zero",
            });
        }
        if self.tags.max_name_length == 0 {
            exn::bail!(ErrorKind::Invalid {
                field: "tags.max_name_length",
                reason: "must be greater than zero",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use rstest::rstest;
    use std::io::Write;

    fn load_in(jail: &Jail, file: &str) -> std::result::Result<Config, figment::Error> {
        Config::load(Some(&jail.directory().join(file))).map_err(|e| figment::Error::from(e.to_string()))
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.discovery.default_limit, 10);
        assert_eq!(config.discovery.popularity, PopularityWeights::new(2, 1));
        assert_eq!(config.tags.popular_limit, 20);
        assert_eq!(config.tags.max_name_length, 50);
        assert!(config.validate().is_ok());
    }

    #[rstest]
    #[case("shelf.toml", "[discovery]\ndefault_limit = 5\n[discovery.popularity]\nview_weight = 3\n")]
    #[case("shelf.yaml", "discovery:\n  default_limit: 5\n  popularity:\n    view_weight: 3\n")]
    #[case("shelf.yml", "discovery:\n  default_limit: 5\n  popularity:\n    view_weight: 3\n")]
    #[case("shelf.json", r#"{"discovery": {"default_limit": 5, "popularity": {"view_weight": 3}}}"#)]
    fn test_load_file(#[case] file: &str, #[case] contents: &str) {
        Jail::expect_with(|jail| {
            jail.create_file(file, contents)?;
            let config = load_in(jail, file)?;
            assert_eq!(config.discovery.default_limit, 5);
            // Unset keys keep their defaults, including siblings of set keys.
            assert_eq!(config.discovery.popularity, PopularityWeights::new(2, 3));
            assert_eq!(config.tags, TagConfig::default());
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("shelf.toml", "[tags]\npopular_limit = 7\nmax_name_length = 30\n")?;
            jail.set_env("SHELF_TAGS__POPULAR_LIMIT", "3");
            jail.set_env("SHELF_DISCOVERY__POPULARITY__DOWNLOAD_WEIGHT", "5");
            let config = load_in(jail, "shelf.toml")?;
            assert_eq!(config.tags.popular_limit, 3);
            assert_eq!(config.tags.max_name_length, 30);
            assert_eq!(config.discovery.popularity.download_weight, 5);
            Ok(())
        });
    }

    #[test]
    fn test_invalid_values_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("shelf.toml", "[discovery]\ndefault_limit = 0\n")?;
            let err = Config::load(Some(&jail.directory().join("shelf.toml"))).unwrap_err();
            assert!(matches!(&*err, ErrorKind::Invalid { field: "discovery.default_limit", .. }));
            Ok(())
        });
    }

    #[test]
    fn test_wrong_shape_is_load_error() {
        Jail::expect_with(|jail| {
            jail.create_file("shelf.toml", "[discovery]\ndefault_limit = \"many\"\n")?;
            let err = Config::load(Some(&jail.directory().join("shelf.toml"))).unwrap_err();
            assert_eq!(*err, ErrorKind::Load);
            Ok(())
        });
    }

    #[rstest]
    #[case(PopularityWeights::new(0, 0), Some("discovery.popularity"))]
    #[case(PopularityWeights::new(0, 1), None)]
    #[case(PopularityWeights::new(1, 0), None)]
    fn test_validate_weights(#[case] popularity: PopularityWeights, #[case] field: Option<&str>) {
        let mut config = Config::default();
        config.discovery.popularity = popularity;
        match (config.validate(), field) {
            (Ok(()), None) => {},
            (Err(err), Some(expected)) => {
                assert!(matches!(&*err, ErrorKind::Invalid { field, .. } if *field == expected));
            },
            (result, expected) => panic!("unexpected validation result {result:?} for {expected:?}"),
        }
    }

    #[test]
    fn test_validate_tags() {
        let mut config = Config::default();
        config.tags.max_name_length = 0;
        let err = config.validate().unwrap_err();
        assert!(matches!(&*err, ErrorKind::Invalid { field: "tags.max_name_length", .. }));
    }

    #[rstest]
    #[case("shelf.ini")]
    #[case("shelf")]
    fn test_unsupported_format(#[case] file: &str) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(file);
        std::fs::File::create(&path).unwrap().write_all(b"default_limit = 5").unwrap();
        let err = Config::figment(Some(&path)).unwrap_err();
        assert_eq!(*err, ErrorKind::UnsupportedFormat(path));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let err = Config::figment(Some(&path)).unwrap_err();
        assert_eq!(*err, ErrorKind::NotFound(path));
    }

    #[test]
    fn test_default_path() {
        if let Some(path) = Config::default_path() {
            assert!(path.ends_with("config.toml"));
        }
    }
}
