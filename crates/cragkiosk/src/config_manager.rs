//! Holds the active configuration and reloads it when the file changes.
//!
//! A watcher thread debounces filesystem events for the config file and a
//! sibling `style.css`. Parsing and validation happen on that thread; only
//! a config that passed both is forwarded to the GTK main loop and applied
//! there. Accent and font changes restyle the running window immediately;
//! values the state objects captured at construction (geometry,
//! breakpoints, timeouts) are logged as needing a restart instead.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use gtk4::glib;
use notify_debouncer_mini::{DebounceEventResult, new_debouncer, notify::RecursiveMode};
use tracing::{debug, error, info, warn};

use cragkiosk_core::{Config, Preferences};

use crate::kiosk;

/// Editors fire several filesystem events per save; changes within this
/// window collapse into one reload.
const DEBOUNCE: Duration = Duration::from_millis(300);

/// What the watcher thread hands to the main loop.
#[derive(Debug)]
enum ReloadEvent {
    /// A config that parsed and validated.
    Config(Box<Config>),
    /// The file changed but could not be loaded; the old config stays.
    Failed(String),
    /// The sibling style.css changed.
    UserCss,
}

fn post_to_main(event: ReloadEvent) {
    glib::idle_add_once(move || {
        ConfigManager::global().apply_event(event);
    });
}

/// Singleton owning the current config and the watcher lifecycle.
pub struct ConfigManager {
    config: RefCell<Config>,
    watched_path: RefCell<Option<PathBuf>>,
    shutdown: Arc<AtomicBool>,
}

thread_local! {
    static INSTANCE: RefCell<Option<Rc<ConfigManager>>> = const { RefCell::new(None) };
}

impl ConfigManager {
    /// Install the singleton. Call once at startup, before `global()`.
    pub fn init_global(config: Config, watched_path: Option<PathBuf>) {
        INSTANCE.with(|cell| {
            let mut slot = cell.borrow_mut();
            if slot.is_some() {
                warn!("ConfigManager is already initialized");
                return;
            }
            *slot = Some(Rc::new(Self {
                config: RefCell::new(config),
                watched_path: RefCell::new(watched_path),
                shutdown: Arc::new(AtomicBool::new(false)),
            }));
        });
    }

    /// The installed singleton. Panics when `init_global` has not run.
    pub fn global() -> Rc<Self> {
        INSTANCE.with(|cell| {
            cell.borrow()
                .as_ref()
                .expect("ConfigManager::init_global must run first")
                .clone()
        })
    }

    /// Spawn the watcher thread. Without a config file (running on the
    /// embedded defaults) there is nothing to watch.
    pub fn start_watching(self: &Rc<Self>) {
        let Some(path) = self.watched_path.borrow().clone() else {
            info!("Running on built-in defaults; live reload disabled");
            return;
        };
        if !path.exists() {
            warn!("Config file vanished, not watching: {}", path.display());
            return;
        }

        info!("Watching {} for changes", path.display());
        let shutdown = self.shutdown.clone();
        thread::spawn(move || watch_loop(path, shutdown));
    }

    /// Signal the watcher thread to exit.
    pub fn stop_watching(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
        debug!("Config watcher stopped");
    }

    fn apply_event(&self, event: ReloadEvent) {
        match event {
            ReloadEvent::Config(new_config) => self.apply(*new_config),
            ReloadEvent::Failed(message) => {
                error!("Keeping previous configuration: {message}");
            }
            ReloadEvent::UserCss => {
                info!("User style.css changed, reloading");
                kiosk::reload_user_css();
            }
        }
    }

    fn apply(&self, new_config: Config) {
        let old_config = self.config.replace(new_config.clone());
        let restyle = theme_only_change(&old_config, &new_config);
        let structural = needs_restart(&old_config, &new_config);

        if restyle {
            // The stylesheet is generated per mode, and the mode is the
            // visitor's persisted choice.
            let mode = Preferences::load().theme;
            kiosk::load_css(&new_config, mode);
            info!("Theme configuration applied");
        }
        if structural {
            warn!("Window/breakpoint configuration changed; restart the kiosk to apply it");
        }
        if !restyle && !structural {
            debug!("Configuration unchanged in any observable way");
        }
    }
}

fn watch_loop(path: PathBuf, shutdown: Arc<AtomicBool>) {
    let canonical = match path.canonicalize() {
        Ok(path) => path,
        Err(e) => {
            error!("Cannot canonicalize {}: {}", path.display(), e);
            return;
        }
    };
    let watch_dir = canonical
        .parent()
        .unwrap_or(&canonical)
        .to_path_buf();
    let style_path = canonical.with_file_name("style.css");
    let config_path = canonical;

    let handler = move |result: DebounceEventResult| match result {
        Ok(events) => {
            if events.iter().any(|event| event.path == config_path) {
                debug!("Config file changed on disk");
                reload(&config_path);
            }
            if events.iter().any(|event| event.path == style_path) {
                post_to_main(ReloadEvent::UserCss);
            }
        }
        Err(err) => error!("File watcher error: {err}"),
    };

    let mut debouncer = match new_debouncer(DEBOUNCE, handler) {
        Ok(debouncer) => debouncer,
        Err(e) => {
            error!("Could not create the file watcher: {e}");
            return;
        }
    };

    // Watching the directory survives editors that replace the file.
    if let Err(e) = debouncer
        .watcher()
        .watch(&watch_dir, RecursiveMode::NonRecursive)
    {
        error!("Could not watch {}: {}", watch_dir.display(), e);
        return;
    }

    while !shutdown.load(Ordering::Relaxed) {
        thread::sleep(Duration::from_millis(500));
    }
    debug!("Config watcher thread exiting");
}

/// Parse and validate off the main thread; forward the outcome.
fn reload(path: &Path) {
    let loaded = Config::load(path).and_then(|config| {
        config.validate()?;
        Ok(config)
    });
    match loaded {
        Ok(config) => {
            info!("Reloaded configuration from {}", path.display());
            post_to_main(ReloadEvent::Config(Box::new(config)));
        }
        Err(e) => {
            warn!("Reload failed: {e}");
            post_to_main(ReloadEvent::Failed(e.to_string()));
        }
    }
}

/// Values the stylesheet consumes; applied live.
fn theme_only_change(old: &Config, new: &Config) -> bool {
    old.theme.accent != new.theme.accent || old.theme.font_family != new.theme.font_family
}

/// Values captured by the window and the state objects at construction.
fn needs_restart(old: &Config, new: &Config) -> bool {
    old.window.width != new.window.width
        || old.window.height != new.window.height
        || old.window.title != new.window.title
        || old.nav.mobile_breakpoint != new.nav.mobile_breakpoint
        || old.nav.shadow_threshold != new.nav.shadow_threshold
        || old.nav.home_page != new.nav.home_page
        || old.reveal.offset != new.reveal.offset
        || old.notices.timeout_ms != new.notices.timeout_ms
        || old.dashboard.collapse_breakpoint != new.dashboard.collapse_breakpoint
        || old.hours.weekday != new.hours.weekday
        || old.hours.weekend != new.hours.weekend
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accent_change_is_theme_only() {
        let old = Config::default();
        let mut new = Config::default();
        new.theme.accent = "#3584e4".to_string();

        assert!(theme_only_change(&old, &new));
        assert!(!needs_restart(&old, &new));
    }

    #[test]
    fn test_font_change_is_theme_only() {
        let old = Config::default();
        let mut new = Config::default();
        new.theme.font_family = "Cantarell".to_string();

        assert!(theme_only_change(&old, &new));
    }

    #[test]
    fn test_breakpoint_change_needs_restart() {
        let old = Config::default();
        let mut new = Config::default();
        new.nav.mobile_breakpoint = 900;

        assert!(needs_restart(&old, &new));
        assert!(!theme_only_change(&old, &new));
    }

    #[test]
    fn test_identical_configs_change_nothing() {
        let old = Config::default();
        let new = Config::default();

        assert!(!theme_only_change(&old, &new));
        assert!(!needs_restart(&old, &new));
    }
}
