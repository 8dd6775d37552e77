//! TOML-based configuration.
//!
//! Holds the geometry and interaction constants the layout pass and item
//! controllers work with:
//! - Lane height, base pixel density and ruler spacing
//! - Minimum item and canvas widths
//! - Resize-handle width and keyboard nudge size
//!
//! Configuration is stored at `~/.config/laneline/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Upper bound on `layout.padding_days`.
pub const MAX_PADDING_DAYS: i64 = 3_650;

/// Upper bound on `interaction.nudge_days`.
pub const MAX_NUDGE_DAYS: i64 = 3_650;

/// Geometry used by the layout pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_lane_height")]
    pub lane_height: f64,
    /// Pixels per day at zoom 1.0.
    #[serde(default = "default_base_pixels_per_day")]
    pub base_pixels_per_day: f64,
    #[serde(default = "default_ruler_height")]
    pub ruler_height: f64,
    /// Empty days drawn before the first item and after the last.
    #[serde(default = "default_padding_days")]
    pub padding_days: i64,
    #[serde(default = "default_min_item_width")]
    pub min_item_width: f64,
    #[serde(default = "default_min_canvas_width")]
    pub min_canvas_width: f64,
}

/// Pointer and keyboard behavior of item controllers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionConfig {
    /// Width of the resize margin at each item edge, in pixels.
    #[serde(default = "default_handle_width")]
    pub handle_width: f64,
    /// Days moved per arrow-key press.
    #[serde(default = "default_nudge_days")]
    pub nudge_days: i64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/laneline/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub interaction: InteractionConfig,
}

fn default_lane_height() -> f64 {
    36.0
}
fn default_base_pixels_per_day() -> f64 {
    22.0
}
fn default_ruler_height() -> f64 {
    32.0
}
fn default_padding_days() -> i64 {
    2
}
fn default_min_item_width() -> f64 {
    14.0
}
fn default_min_canvas_width() -> f64 {
    720.0
}
fn default_handle_width() -> f64 {
    6.0
}
fn default_nudge_days() -> i64 {
    1
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            lane_height: default_lane_height(),
            base_pixels_per_day: default_base_pixels_per_day(),
            ruler_height: default_ruler_height(),
            padding_days: default_padding_days(),
            min_item_width: default_min_item_width(),
            min_canvas_width: default_min_canvas_width(),
        }
    }
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            handle_width: default_handle_width(),
            nudge_days: default_nudge_days(),
        }
    }
}

/// Returns `~/.config/laneline[-dev]/` based on LANELINE_ENV.
///
/// Set LANELINE_ENV=dev to use a separate development directory.
pub fn config_dir() -> PathBuf {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    match std::env::var("LANELINE_ENV").as_deref() {
        Ok("dev") => base_dir.join("laneline-dev"),
        _ => base_dir.join("laneline"),
    }
}

impl Config {
    /// Walk a dotted key down to a leaf value. Empty segments and keys that
    /// stop at a section resolve to nothing.
    fn lookup<'a>(root: &'a serde_json::Value, key: &str) -> Option<&'a serde_json::Value> {
        let leaf = key
            .split('.')
            .try_fold(root, |node, part| match part {
                "" => None,
                part => node.get(part),
            })?;
        (!leaf.is_object()).then_some(leaf)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let (parents, leaf) = match key.rsplit_once('.') {
            Some((parents, leaf)) => (Some(parents), leaf),
            None => (None, key),
        };
        if leaf.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        for part in parents.into_iter().flat_map(|p| p.split('.')) {
            current = current.get_mut(part).ok_or_else(unknown)?;
        }
        let slot = current
            .as_object_mut()
            .and_then(|obj| obj.get_mut(leaf))
            .ok_or_else(unknown)?;

        let new_value = match &*slot {
            serde_json::Value::Bool(_) => serde_json::Value::Bool(
                value
                    .parse::<bool>()
                    .map_err(|e| invalid(e.to_string()))?,
            ),
            serde_json::Value::Number(n) if n.is_i64() || n.is_u64() => {
                let parsed: i64 = value
                    .parse()
                    .map_err(|_| invalid(format!("cannot parse '{value}' as integer")))?;
                serde_json::Value::Number(parsed.into())
            }
            serde_json::Value::Number(_) => {
                let parsed: f64 = value
                    .parse()
                    .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                serde_json::Number::from_f64(parsed)
                    .map(serde_json::Value::Number)
                    .ok_or_else(|| invalid(format!("'{value}' is not a finite number")))?
            }
            serde_json::Value::Object(_) => return Err(invalid("key names a section".into())),
            _ => serde_json::Value::String(value.into()),
        };
        *slot = new_value;
        Ok(())
    }

    /// Path of the user configuration file.
    pub fn path() -> PathBuf {
        config_dir().join("config.toml")
    }

    /// Load from the user configuration file, or defaults when it is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path())
    }

    /// Load from an explicit path; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let config: Self = toml::from_str(&content)?;
                config.validate()?;
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the user configuration file.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path())
    }

    /// Persist to an explicit path, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| save_failed(e.to_string()))?;
        }
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Read one setting, e.g. `layout.lane_height`. Strings come back
    /// unquoted, numbers in their JSON form.
    pub fn get(&self, key: &str) -> Option<String> {
        let tree = serde_json::to_value(self).ok()?;
        Self::lookup(&tree, key).map(|value| match value {
            serde_json::Value::String(text) => text.clone(),
            other => other.to_string(),
        })
    }

    /// Set a config value by dot-separated key. Does not persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value does not match the
    /// field's type, or the result fails [`Config::validate`]. The config is
    /// unchanged on error.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self)
            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Check the bounds the layout pass and item controllers rely on.
    ///
    /// # Errors
    ///
    /// `InvalidValue` naming the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let layout = &self.layout;
        let interaction = &self.interaction;

        check(
            "layout.base_pixels_per_day",
            layout.base_pixels_per_day.is_finite() && layout.base_pixels_per_day > 0.0,
            "must be a finite number above 0",
        )?;
        for (key, value) in [
            ("layout.lane_height", layout.lane_height),
            ("layout.ruler_height", layout.ruler_height),
            ("layout.min_item_width", layout.min_item_width),
            ("layout.min_canvas_width", layout.min_canvas_width),
            ("interaction.handle_width", interaction.handle_width),
        ] {
            check(key, value.is_finite() && value >= 0.0, "must be a finite number of at least 0")?;
        }
        check(
            "layout.padding_days",
            (0..=MAX_PADDING_DAYS).contains(&layout.padding_days),
            &format!("must be between 0 and {MAX_PADDING_DAYS}"),
        )?;
        check(
            "interaction.nudge_days",
            (1..=MAX_NUDGE_DAYS).contains(&interaction.nudge_days),
            &format!("must be between 1 and {MAX_NUDGE_DAYS}"),
        )
    }
}

fn check(key: &str, ok: bool, message: &str) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: message.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config = toml::from_str("[layout]\nlane_height = 40.0\n").unwrap();
        assert_eq!(parsed.layout.lane_height, 40.0);
        assert_eq!(parsed.layout.base_pixels_per_day, 22.0);
        assert_eq!(parsed.interaction.handle_width, 6.0);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("layout.padding_days").as_deref(), Some("2"));
        assert_eq!(cfg.get("interaction.nudge_days").as_deref(), Some("1"));
        assert_eq!(cfg.get("layout.lane_height").as_deref(), Some("36.0"));
        assert!(cfg.get("layout.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_nested_numbers() {
        let mut cfg = Config::default();
        cfg.set("interaction.nudge_days", "7").unwrap();
        cfg.set("layout.base_pixels_per_day", "30.5").unwrap();
        assert_eq!(cfg.interaction.nudge_days, 7);
        assert_eq!(cfg.layout.base_pixels_per_day, 30.5);
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("layout.nonexistent", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(
            cfg.set("nowhere.lane_height", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
    }

    #[test]
    fn set_rejects_invalid_type() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("interaction.nudge_days", "one"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            cfg.set("layout", "1"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn get_skips_sections() {
        let cfg = Config::default();
        assert!(cfg.get("layout").is_none());
        assert!(cfg.get("layout..lane_height").is_none());
    }

    #[test]
    fn set_rejects_out_of_bounds_values() {
        let mut cfg = Config::default();
        for (key, value) in [
            ("interaction.nudge_days", "-1"),
            ("interaction.nudge_days", "0"),
            ("interaction.nudge_days", "-9223372036854775808"),
            ("interaction.handle_width", "-50"),
            ("layout.base_pixels_per_day", "0"),
            ("layout.base_pixels_per_day", "-22"),
            ("layout.padding_days", "-1"),
            ("layout.padding_days", "9223372036854775807"),
            ("layout.lane_height", "-1"),
        ] {
            match cfg.set(key, value) {
                Err(ConfigError::InvalidValue { key: reported, .. }) => assert_eq!(reported, key),
                other => panic!("{key} = {value} gave {other:?}"),
            }
        }
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn set_accepts_boundary_values() {
        let mut cfg = Config::default();
        cfg.set("interaction.nudge_days", "1").unwrap();
        cfg.set("interaction.handle_width", "0").unwrap();
        cfg.set("layout.padding_days", "0").unwrap();
        cfg.set("layout.padding_days", &MAX_PADDING_DAYS.to_string()).unwrap();
        assert_eq!(cfg.layout.padding_days, MAX_PADDING_DAYS);
    }

    #[test]
    fn load_rejects_out_of_bounds_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[interaction]\nnudge_days = -1\n").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::InvalidValue { .. })
        ));

        std::fs::write(&path, "[layout]\nbase_pixels_per_day = 0.0\n").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn save_and_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        assert_eq!(Config::load_from(&path).unwrap(), Config::default());

        let mut cfg = Config::default();
        cfg.set("layout.lane_height", "48").unwrap();
        cfg.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().layout.lane_height, 48.0);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "layout = [").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::ParseFailed(_))
        ));
    }
}
