//! Persisted visitor preferences.
//!
//! The kiosk remembers exactly one thing across restarts: the theme mode.
//! It lives in a small TOML file under the XDG state directory and is
//! written back immediately on every mutation.
//!
//! Unlike configuration loading, this store is deliberately forgiving: a
//! missing or unreadable file yields the defaults, and a failed save is
//! logged and otherwise ignored. Losing the preference is a cosmetic
//! problem, not a startup failure.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::theme::ThemeMode;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Preferences {
    /// Current theme mode. Defaults to light on first run.
    pub theme: ThemeMode,

    /// Path the preferences were loaded from and save back to.
    #[serde(skip)]
    path: Option<PathBuf>,
}

impl Preferences {
    /// Resolve the preferences file path.
    ///
    /// `$XDG_STATE_HOME/cragkiosk/prefs.toml`, falling back to
    /// `~/.local/state/cragkiosk/prefs.toml`. `None` when neither variable
    /// is set (preferences then live only for the session).
    pub fn state_file_path() -> Option<PathBuf> {
        if let Ok(state_home) = env::var("XDG_STATE_HOME")
            && !state_home.is_empty()
        {
            return Some(PathBuf::from(state_home).join("cragkiosk/prefs.toml"));
        }

        if let Ok(home) = env::var("HOME")
            && !home.is_empty()
        {
            return Some(PathBuf::from(home).join(".local/state/cragkiosk/prefs.toml"));
        }

        None
    }

    /// Load preferences from the default state file.
    pub fn load() -> Self {
        match Self::state_file_path() {
            Some(path) => Self::load_from(&path),
            None => {
                warn!("No state directory available; preferences will not persist");
                Self::default()
            }
        }
    }

    /// Load preferences from a specific file.
    ///
    /// A missing file is the normal first-run case and yields defaults; a
    /// file that exists but cannot be read or parsed also yields defaults,
    /// with a warning, because a broken preference must never block startup.
    pub fn load_from(path: &Path) -> Self {
        let mut prefs = match fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<Preferences>(&content) {
                Ok(prefs) => prefs,
                Err(e) => {
                    warn!("Ignoring unparseable preferences {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No preferences file at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                warn!("Could not read preferences {}: {}", path.display(), e);
                Self::default()
            }
        };
        prefs.path = Some(path.to_path_buf());
        prefs
    }

    /// Set the theme mode and persist it immediately.
    pub fn set_theme(&mut self, mode: ThemeMode) {
        self.theme = mode;
        self.save();
    }

    fn save(&self) {
        let Some(ref path) = self.path else {
            return;
        };

        let result = (|| -> crate::Result<()> {
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir)?;
            }
            let content = toml::to_string_pretty(self)?;
            fs::write(path, content)?;
            Ok(())
        })();

        match result {
            Ok(()) => debug!("Preferences saved to {}", path.display()),
            Err(e) => warn!("Could not save preferences to {}: {}", path.display(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_prefs_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("cragkiosk_prefs_tests");
        std::fs::create_dir_all(&dir).unwrap();
        dir.join(name)
    }

    #[test]
    fn test_missing_file_yields_default_light() {
        let path = temp_prefs_path("does_not_exist.toml");
        let _ = std::fs::remove_file(&path);

        let prefs = Preferences::load_from(&path);
        assert_eq!(prefs.theme, ThemeMode::Light);
    }

    #[test]
    fn test_set_theme_persists_immediately() {
        let path = temp_prefs_path("roundtrip.toml");
        let _ = std::fs::remove_file(&path);

        let mut prefs = Preferences::load_from(&path);
        prefs.set_theme(ThemeMode::Dark);

        let reloaded = Preferences::load_from(&path);
        assert_eq!(reloaded.theme, ThemeMode::Dark);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_unparseable_file_yields_default() {
        let path = temp_prefs_path("broken.toml");
        std::fs::write(&path, "theme = [not toml").unwrap();

        let prefs = Preferences::load_from(&path);
        assert_eq!(prefs.theme, ThemeMode::Light);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_unknown_theme_value_yields_default() {
        let path = temp_prefs_path("unknown_value.toml");
        std::fs::write(&path, "theme = \"sepia\"\n").unwrap();

        let prefs = Preferences::load_from(&path);
        assert_eq!(prefs.theme, ThemeMode::Light);

        std::fs::remove_file(&path).unwrap();
    }
}
