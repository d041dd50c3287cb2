use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub query: QueryConfig,
    pub launcher: LauncherConfig,
    pub notifications: NotificationConfig,
    pub palette: Palette,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct QueryConfig {
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LauncherConfig {
    pub terminal: String,
    pub window_class: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub enabled: bool,
    pub app_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Palette {
    pub excellent: String,
    pub good: String,
    pub fair: String,
    pub poor: String,
    pub disconnected: String,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self { timeout_ms: 2000 }
    }
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            terminal: "wezterm".to_string(),
            window_class: "wifi-tui".to_string(),
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            app_name: "netglyph".to_string(),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            excellent: "#9ccfd8".to_string(),
            good: "#c4a7e7".to_string(),
            fair: "#f6c177".to_string(),
            poor: "#eb6f92".to_string(),
            disconnected: "#6e6a86".to_string(),
        }
    }
}

impl QueryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Palette {
    /// Replace every entry that is not `#rrggbb` with its default.
    fn sanitize(&mut self) {
        let defaults = Palette::default();
        let entries = [
            ("excellent", &mut self.excellent, defaults.excellent),
            ("good", &mut self.good, defaults.good),
            ("fair", &mut self.fair, defaults.fair),
            ("poor", &mut self.poor, defaults.poor),
            ("disconnected", &mut self.disconnected, defaults.disconnected),
        ];
        for (name, value, default) in entries {
            if !is_hex_color(value) {
                warn!("palette.{} = {:?} is not #rrggbb, using {}", name, value, default);
                *value = default;
            }
        }
    }
}

pub fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

impl Config {
    /// `$XDG_CONFIG_HOME/netglyph/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("netglyph").join("config.toml"))
    }

    /// Load from `path`, or the default location. A missing file yields the
    /// defaults; the file is never created.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(path) => path,
            None => return Ok(Self::default()),
        };

        match fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content).map_err(|source| Error::ConfigParse {
                path: path.clone(),
                source,
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(Error::ConfigRead { path, source }),
        }
    }

    fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(content)?;
        config.palette.sanitize();
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = Config::parse(
            r#"
            [launcher]
            terminal = "foot"
            "#,
        )
        .unwrap();
        assert_eq!(config.launcher.terminal, "foot");
        assert_eq!(config.launcher.window_class, "wifi-tui");
        assert_eq!(config.query.timeout(), Duration::from_millis(2000));
        assert_eq!(config.palette, Palette::default());
    }

    #[test]
    fn test_invalid_palette_entry_falls_back() {
        let config = Config::parse(
            r##"
            [palette]
            good = "green"
            poor = "#FF0000"
            "##,
        )
        .unwrap();
        assert_eq!(config.palette.good, "#c4a7e7");
        assert_eq!(config.palette.poor, "#FF0000");
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert!(config.notifications.enabled);
        assert!(!dir.path().join("absent.toml").exists());
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[query\ntimeout_ms = ").unwrap();
        assert!(matches!(
            Config::load(Some(&path)),
            Err(Error::ConfigParse { .. })
        ));
    }

    #[test]
    fn test_hex_color() {
        assert!(is_hex_color("#6e6a86"));
        assert!(is_hex_color("#ABCDEF"));
        assert!(!is_hex_color("6e6a86"));
        assert!(!is_hex_color("#6e6a8"));
        assert!(!is_hex_color("#6e6a8g"));
    }
}
