//! Configuration schema and loading.
//!
//! The config covers everything the kiosk reads at startup: window
//! geometry, theme accent, the nav/reveal/dashboard breakpoints, and the
//! notice timeout. The theme *mode* is deliberately not here: it is a
//! visitor preference and lives in the state file (see `prefs`).
//!
//! Loading is strict. A file that exists but fails to parse or validate is
//! an error, never a silent fallback; only total absence uses the embedded
//! defaults. User files are deep-merged over the defaults, so a two-line
//! config is enough to change one value.

use std::env;
use std::path::{Path, PathBuf};

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use toml::Table;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// The commented default config, compiled into the binary.
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../../config.toml");

/// What `find_and_load` resolved.
#[derive(Debug)]
pub struct ConfigLoadResult {
    pub config: Config,
    /// The file the values came from; `None` on the embedded defaults.
    pub source: Option<PathBuf>,
    pub used_defaults: bool,
}

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Window geometry and title.
    pub window: WindowConfig,

    /// Theme accent and typography.
    pub theme: ThemeConfig,

    /// Navigation breakpoints and thresholds.
    pub nav: NavConfig,

    /// Reveal-on-scroll threshold.
    pub reveal: RevealConfig,

    /// Toast notice timing.
    pub notices: NoticesConfig,

    /// Dashboard panel behavior.
    pub dashboard: DashboardConfig,

    /// Opening hours shown on the home page and dashboard.
    pub hours: HoursConfig,
}

impl Config {
    /// Parse the embedded default TOML.
    pub fn from_default_toml() -> Result<Self> {
        Ok(toml::from_str(DEFAULT_CONFIG_TOML)?)
    }

    /// Load a config file, deep-merged over the embedded defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }
        Self::merge_user_toml(&std::fs::read_to_string(path)?)
    }

    /// Merge user TOML over the defaults and deserialize the result.
    ///
    /// Both sides are parsed as plain tables first so a partial user file
    /// keeps every unmentioned default.
    fn merge_user_toml(user_toml: &str) -> Result<Self> {
        let mut merged: Table = toml::from_str(DEFAULT_CONFIG_TOML)
            .expect("the embedded default config always parses");
        let user: Table = toml::from_str(user_toml)?;
        merge_tables(&mut merged, user);
        Ok(merged.try_into()?)
    }

    /// Resolve and load the configuration.
    ///
    /// An explicit path is used as-is and must exist. Otherwise the first
    /// existing file along the XDG chain decides: it either loads or its
    /// error propagates (no skipping over a broken file). When the chain is
    /// empty the embedded defaults apply.
    pub fn find_and_load(explicit_path: Option<&Path>) -> Result<ConfigLoadResult> {
        if let Some(path) = explicit_path {
            return Ok(ConfigLoadResult {
                config: Self::load(path)?,
                source: Some(path.to_path_buf()),
                used_defaults: false,
            });
        }

        let candidates = Self::config_search_paths();
        match candidates.iter().find(|path| path.exists()) {
            Some(path) => Ok(ConfigLoadResult {
                config: Self::load(path)?,
                source: Some(path.clone()),
                used_defaults: false,
            }),
            None => {
                info!("No config file found, using the built-in defaults");
                debug!(
                    "Searched: {}",
                    candidates
                        .iter()
                        .map(|path| path.display().to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                );
                Ok(ConfigLoadResult {
                    config: Self::from_default_toml()?,
                    source: None,
                    used_defaults: true,
                })
            }
        }
    }

    /// Candidate config locations, most specific first.
    pub fn config_search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
            paths.push(PathBuf::from(xdg_config).join("cragkiosk/config.toml"));
        }
        if let Ok(home) = env::var("HOME") {
            paths.push(PathBuf::from(home).join(".config/cragkiosk/config.toml"));
        }
        paths.push(PathBuf::from("config.toml"));
        paths
    }

    /// Strict validation; every invalid value is reported, not just the
    /// first one found.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if self.window.width == 0 {
            errors.push("window.width: must be greater than 0".to_string());
        }
        if self.window.height == 0 {
            errors.push("window.height: must be greater than 0".to_string());
        }

        let accent = self.theme.accent.as_str();
        if accent != "none" && !is_hex_color(accent) {
            errors.push(format!(
                "theme.accent: invalid value '{accent}', expected 'none' or a hex color like '#e0643c'"
            ));
        }

        if self.nav.mobile_breakpoint == 0 {
            errors.push("nav.mobile_breakpoint: must be greater than 0".to_string());
        }
        if self.nav.home_page.is_empty() {
            errors.push("nav.home_page: must not be empty".to_string());
        }
        if self.nav.shadow_threshold < 0.0 {
            errors.push(format!(
                "nav.shadow_threshold: invalid value '{}', must not be negative",
                self.nav.shadow_threshold
            ));
        }

        if self.reveal.offset < 0.0 {
            errors.push(format!(
                "reveal.offset: invalid value '{}', must not be negative",
                self.reveal.offset
            ));
        }

        if self.notices.timeout_ms == 0 {
            errors.push("notices.timeout_ms: must be greater than 0".to_string());
        }

        if self.dashboard.collapse_breakpoint == 0 {
            errors.push("dashboard.collapse_breakpoint: must be greater than 0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::ConfigValidation(errors))
        }
    }

    /// Human-readable dump of the effective values.
    pub fn summary(&self) -> String {
        let mut lines = Vec::new();

        lines.push("Window:".to_string());
        lines.push(format!("  title: {}", self.window.title));
        lines.push(format!(
            "  size: {}x{}",
            self.window.width, self.window.height
        ));

        lines.push("\nTheme:".to_string());
        lines.push(format!("  accent: {}", self.theme.accent));
        if !self.theme.font_family.is_empty() {
            lines.push(format!("  font_family: {}", self.theme.font_family));
        }

        lines.push("\nNavigation:".to_string());
        lines.push(format!(
            "  mobile_breakpoint: {}px",
            self.nav.mobile_breakpoint
        ));
        lines.push(format!(
            "  shadow_threshold: {}px",
            self.nav.shadow_threshold
        ));
        lines.push(format!("  home_page: {}", self.nav.home_page));

        lines.push("\nReveal:".to_string());
        lines.push(format!("  offset: {}px", self.reveal.offset));

        lines.push("\nNotices:".to_string());
        lines.push(format!("  timeout: {}ms", self.notices.timeout_ms));

        lines.push("\nDashboard:".to_string());
        lines.push(format!(
            "  collapse_breakpoint: {}px",
            self.dashboard.collapse_breakpoint
        ));

        lines.push("\nHours:".to_string());
        lines.push(format!("  weekday: {}", self.hours.weekday));
        lines.push(format!("  weekend: {}", self.hours.weekend));

        lines.join("\n")
    }
}

fn is_hex_color(value: &str) -> bool {
    let Some(hex) = value.strip_prefix('#') else {
        return false;
    };
    (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
}

/// Recursively overlay `user` onto `base`. Tables merge key by key; any
/// other value (including arrays) replaces the base wholesale.
fn merge_tables(base: &mut Table, user: Table) {
    for (key, value) in user {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(base_table)), toml::Value::Table(user_table)) => {
                merge_tables(base_table, user_table);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

/// Window geometry and title.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowConfig {
    /// Window title shown by the compositor / kiosk chrome.
    pub title: String,

    /// Initial window width in logical pixels.
    pub width: u32,

    /// Initial window height in logical pixels.
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Cragside Climbing".to_string(),
            width: 1280,
            height: 800,
        }
    }
}

/// Theme accent and typography. The light/dark mode is a visitor
/// preference and lives in the state file, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Accent color: a hex color like "#e0643c", or "none" for monochrome.
    pub accent: String,

    /// Font family for kiosk text. Empty uses the system font.
    pub font_family: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            accent: "#e0643c".to_string(),
            font_family: String::new(),
        }
    }
}

/// Navigation breakpoints and thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavConfig {
    /// At or below this window width the menu collapses behind the
    /// hamburger button and dropdowns open on click instead of hover.
    pub mobile_breakpoint: u32,

    /// Scroll offset (px) past which the nav bar casts its elevated shadow.
    pub shadow_threshold: f64,

    /// Page matched as active when the location has no final segment.
    pub home_page: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            mobile_breakpoint: 1024,
            shadow_threshold: 50.0,
            home_page: "index".to_string(),
        }
    }
}

/// Reveal-on-scroll threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealConfig {
    /// Sections reveal once their top edge rises this many pixels above
    /// the bottom of the viewport.
    pub offset: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self { offset: 150.0 }
    }
}

/// Toast notice timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NoticesConfig {
    /// How long success/info toasts stay on screen before fading out.
    pub timeout_ms: u32,
}

impl Default for NoticesConfig {
    fn default() -> Self {
        Self { timeout_ms: 3000 }
    }
}

/// Dashboard panel behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// At or below this window width the sidebar and filter panel close
    /// when a click lands outside them.
    pub collapse_breakpoint: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            collapse_breakpoint: 768,
        }
    }
}

/// Opening hours shown on the home page and dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HoursConfig {
    pub weekday: String,
    pub weekend: String,
}

impl Default for HoursConfig {
    fn default() -> Self {
        Self {
            weekday: "06:30 - 23:00".to_string(),
            weekend: "08:00 - 21:00".to_string(),
        }
    }
}

impl HoursConfig {
    /// The hours that apply today.
    pub fn today(&self) -> &str {
        self.for_weekday(chrono::Local::now().weekday())
    }

    /// The hours that apply on the given weekday.
    pub fn for_weekday(&self, weekday: chrono::Weekday) -> &str {
        use chrono::Weekday;
        match weekday {
            Weekday::Sat | Weekday::Sun => &self.weekend,
            _ => &self.weekday,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_toml_parses_and_validates() {
        let config = Config::from_default_toml().expect("embedded config should parse");
        config
            .validate()
            .expect("embedded config should pass validation");
    }

    #[test]
    fn test_embedded_defaults_match_typed_defaults() {
        let embedded = Config::from_default_toml().unwrap();
        let typed = Config::default();

        assert_eq!(embedded.window.width, typed.window.width);
        assert_eq!(embedded.theme.accent, typed.theme.accent);
        assert_eq!(embedded.nav.mobile_breakpoint, typed.nav.mobile_breakpoint);
        assert_eq!(embedded.reveal.offset, typed.reveal.offset);
        assert_eq!(embedded.notices.timeout_ms, typed.notices.timeout_ms);
        assert_eq!(
            embedded.dashboard.collapse_breakpoint,
            typed.dashboard.collapse_breakpoint
        );
    }

    #[test]
    fn test_user_values_merge_over_defaults() {
        let user = r#"
            [nav]
            mobile_breakpoint = 900
        "#;

        let config = Config::merge_user_toml(user).unwrap();
        assert_eq!(config.nav.mobile_breakpoint, 900);
        // Untouched sections keep their defaults.
        assert_eq!(config.notices.timeout_ms, 3000);
        assert_eq!(config.nav.home_page, "index");
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let user = r#"
            [nav]
            mobile_breakpont = 900
        "#;

        assert!(Config::merge_user_toml(user).is_err());
    }

    #[test]
    fn test_validation_rejects_invalid_accent() {
        let mut config = Config::default();
        config.theme.accent = "tomato".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("theme.accent"));
    }

    #[test]
    fn test_validation_accepts_none_accent() {
        let mut config = Config::default();
        config.theme.accent = "none".to_string();
        config.validate().unwrap();
    }

    #[test]
    fn test_validation_collects_multiple_errors() {
        let mut config = Config::default();
        config.window.width = 0;
        config.notices.timeout_ms = 0;
        config.nav.home_page = String::new();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("window.width"));
        assert!(err.contains("notices.timeout_ms"));
        assert!(err.contains("nav.home_page"));
    }

    #[test]
    fn test_summary_contains_key_sections() {
        let config = Config::default();
        let summary = config.summary();

        assert!(summary.contains("Window:"));
        assert!(summary.contains("Theme:"));
        assert!(summary.contains("Navigation:"));
        assert!(summary.contains("Dashboard:"));
        assert!(summary.contains("Hours:"));
    }

    #[test]
    fn test_hours_for_weekday() {
        use chrono::Weekday;
        let hours = HoursConfig::default();
        assert_eq!(hours.for_weekday(Weekday::Wed), hours.weekday);
        assert_eq!(hours.for_weekday(Weekday::Sat), hours.weekend);
        assert_eq!(hours.for_weekday(Weekday::Sun), hours.weekend);
    }
}
