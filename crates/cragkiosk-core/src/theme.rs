//! Theme mode, persisted toggle, and the derived color palette.
//!
//! `ThemeMode` is the single persisted visitor preference. `ThemeManager`
//! owns the current mode and applies it to the surface; `ThemePalette` is
//! the single source of truth for all derived color values and generates
//! the CSS variable block the shell's stylesheet consumes.

use std::cell::Cell;
use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ThemeConfig;
use crate::prefs::Preferences;
use crate::surface::{ViewSurface, target};

// Hover overlays: white on dark needs less opacity than black on light.
const OVERLAY_OPACITY_DARK: f64 = 0.08;
const OVERLAY_OPACITY_LIGHT: f64 = 0.12;

// Text hierarchy opacity factor.
const TEXT_MUTED_OPACITY: f64 = 0.7;

// Border opacities (subtle separators that don't compete with content).
const BORDER_OPACITY_DARK: f64 = 0.10;
const BORDER_OPACITY_LIGHT: f64 = 0.12;

// Shadow opacities for the two nav-bar elevation states.
const SHADOW_OPACITY_DARK: f64 = 0.40;
const SHADOW_OPACITY_LIGHT: f64 = 0.22;

// Modal backdrop dim.
const BACKDROP_OPACITY_DARK: f64 = 0.60;
const BACKDROP_OPACITY_LIGHT: f64 = 0.45;

// Default surface colors per mode.
const DEFAULT_BACKGROUND_DARK: &str = "#15161b";
const DEFAULT_BACKGROUND_LIGHT: &str = "#f7f6f3";
const DEFAULT_SURFACE_DARK: &str = "#1e2027";
const DEFAULT_SURFACE_LIGHT: &str = "#ffffff";

// State colors per mode.
const DEFAULT_ERROR_DARK: &str = "#ff6b6b";
const DEFAULT_ERROR_LIGHT: &str = "#d64545";
const DEFAULT_SUCCESS_DARK: &str = "#50b06c";
const DEFAULT_SUCCESS_LIGHT: &str = "#2f8a4c";

/// The two theme modes the kiosk can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    /// The other mode.
    pub fn flipped(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    /// Class mirrored onto the window root for stylesheet consumption.
    pub fn root_class(self) -> &'static str {
        match self {
            ThemeMode::Light => "theme-light",
            ThemeMode::Dark => "theme-dark",
        }
    }

    /// Icon shown on the theme toggle button.
    ///
    /// The glyph advertises the mode the button switches *to*: a moon in
    /// light mode, a sun in dark mode.
    pub fn toggle_icon(self) -> &'static str {
        match self {
            ThemeMode::Light => "weather-clear-night-symbolic",
            ThemeMode::Dark => "weather-clear-symbolic",
        }
    }
}

/// Owns the current theme mode and keeps surface and preferences in sync.
pub struct ThemeManager {
    mode: Cell<ThemeMode>,
    prefs: RefCell<Preferences>,
    surface: Rc<dyn ViewSurface>,
}

impl ThemeManager {
    /// Create the manager from loaded preferences and apply the stored mode
    /// before the window is first shown.
    pub fn new(surface: Rc<dyn ViewSurface>, prefs: Preferences) -> Rc<Self> {
        let manager = Rc::new(Self {
            mode: Cell::new(prefs.theme),
            prefs: RefCell::new(prefs),
            surface,
        });
        manager.apply();
        manager
    }

    pub fn current(&self) -> ThemeMode {
        self.mode.get()
    }

    /// Flip the mode, persist it immediately, and re-apply to the surface.
    pub fn toggle(&self) -> ThemeMode {
        let next = self.mode.get().flipped();
        self.mode.set(next);
        self.prefs.borrow_mut().set_theme(next);
        self.apply();
        debug!("Theme toggled to {}", next.as_str());
        next
    }

    fn apply(&self) {
        let mode = self.mode.get();
        self.surface.set_root_theme(mode);
        self.surface.set_glyph(target::THEME_ICON, mode.toggle_icon());
    }
}

/// Parse a hex color (`#rgb` or `#rrggbb`, hash optional) into RGB.
pub fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.trim().trim_start_matches('#');

    let expanded;
    let hex = match hex.len() {
        // Shorthand doubles each digit.
        3 => {
            expanded = hex.chars().flat_map(|c| [c, c]).collect::<String>();
            expanded.as_str()
        }
        6 => hex,
        _ => return None,
    };

    let channel = |range| u8::from_str_radix(hex.get(range)?, 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Relative luminance per the WCAG formula (0.0 = black, 1.0 = white).
pub fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    fn linearize(channel: u8) -> f64 {
        let srgb = channel as f64 / 255.0;
        if srgb <= 0.03928 {
            srgb / 12.92
        } else {
            ((srgb + 0.055) / 1.055).powf(2.4)
        }
    }

    0.2126 * linearize(r) + 0.7152 * linearize(g) + 0.0722 * linearize(b)
}

/// Whether the color reads as dark. Unparseable input counts as dark.
pub fn is_dark_color(color: &str) -> bool {
    match parse_hex_color(color) {
        Some((r, g, b)) => relative_luminance(r, g, b) < 0.179,
        None => true,
    }
}

/// Mix two hex colors; `weight` is the share of `first` (0.0 to 1.0).
pub fn blend_colors(first: &str, second: &str, weight: f64) -> Option<(u8, u8, u8)> {
    let (fr, fg, fb) = parse_hex_color(first)?;
    let (sr, sg, sb) = parse_hex_color(second)?;
    let mix = |f: u8, s: u8| (f as f64 * weight + s as f64 * (1.0 - weight)) as u8;
    Some((mix(fr, sr), mix(fg, sg), mix(fb, sb)))
}

/// RGB back to `#rrggbb`.
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// CSS `rgba()` string.
pub fn rgba_str(r: u8, g: u8, b: u8, a: f64) -> String {
    format!("rgba({r}, {g}, {b}, {a:.2})")
}

/// Single source of truth for all derived theme values.
///
/// Constructed via `ThemePalette::from_config(&config.theme, mode)`.
#[derive(Debug, Clone)]
pub struct ThemePalette {
    pub is_dark_mode: bool,

    // Background colors
    pub background: String,
    pub surface_color: String,

    // Foreground colors
    pub text_primary: String,
    pub text_muted: String,

    // Accent
    pub accent: String,
    pub on_accent: String,
    pub accent_hover: String,

    // State colors
    pub error: String,
    pub success: String,

    // Separators, overlays and shadows
    pub border_subtle: String,
    pub overlay_hover: String,
    pub backdrop: String,
    pub shadow_resting: String,
    pub shadow_elevated: String,

    // Typography
    pub font_family: String,
}

impl ThemePalette {
    /// Build the palette for a theme mode from the theme configuration.
    pub fn from_config(theme: &ThemeConfig, mode: ThemeMode) -> Self {
        let is_dark = mode == ThemeMode::Dark;

        let (background, surface_color) = if is_dark {
            (DEFAULT_BACKGROUND_DARK, DEFAULT_SURFACE_DARK)
        } else {
            (DEFAULT_BACKGROUND_LIGHT, DEFAULT_SURFACE_LIGHT)
        };

        let (text_primary, text_muted) = if is_dark {
            (
                "#ffffff".to_string(),
                format!("rgba(255, 255, 255, {:.2})", TEXT_MUTED_OPACITY),
            )
        } else {
            (
                "#1a1a1a".to_string(),
                format!("rgba(0, 0, 0, {:.2})", TEXT_MUTED_OPACITY),
            )
        };

        // "none" means monochrome: the accent becomes a translucent overlay
        // matching the mode's text direction.
        let (accent, on_accent, accent_hover) = if theme.accent == "none" {
            if is_dark {
                (
                    "rgba(255, 255, 255, 0.25)".to_string(),
                    text_primary.clone(),
                    "rgba(255, 255, 255, 0.35)".to_string(),
                )
            } else {
                (
                    "rgba(0, 0, 0, 0.20)".to_string(),
                    text_primary.clone(),
                    "rgba(0, 0, 0, 0.30)".to_string(),
                )
            }
        } else {
            // Pick the on-accent text by the accent's own luminance, and a
            // hover shade by blending the accent toward the page background.
            let on_accent = if is_dark_color(&theme.accent) {
                "#ffffff".to_string()
            } else {
                "#000000".to_string()
            };
            let hover = match blend_colors(&theme.accent, background, 0.8) {
                Some((r, g, b)) => rgb_to_hex(r, g, b),
                None => theme.accent.clone(),
            };
            (theme.accent.clone(), on_accent, hover)
        };

        let (error, success) = if is_dark {
            (DEFAULT_ERROR_DARK, DEFAULT_SUCCESS_DARK)
        } else {
            (DEFAULT_ERROR_LIGHT, DEFAULT_SUCCESS_LIGHT)
        };

        let border_subtle = if is_dark {
            format!("rgba(255, 255, 255, {:.2})", BORDER_OPACITY_DARK)
        } else {
            format!("rgba(0, 0, 0, {:.2})", BORDER_OPACITY_LIGHT)
        };

        let overlay_hover = if is_dark {
            rgba_str(255, 255, 255, OVERLAY_OPACITY_DARK)
        } else {
            rgba_str(50, 50, 50, OVERLAY_OPACITY_LIGHT)
        };

        let backdrop = if is_dark {
            rgba_str(0, 0, 0, BACKDROP_OPACITY_DARK)
        } else {
            rgba_str(0, 0, 0, BACKDROP_OPACITY_LIGHT)
        };

        let shadow_opacity = if is_dark {
            SHADOW_OPACITY_DARK
        } else {
            SHADOW_OPACITY_LIGHT
        };
        let shadow_resting = format!("0 1px 2px rgba(0, 0, 0, {:.2})", shadow_opacity * 0.5);
        let shadow_elevated = format!(
            "0 1px 2px rgba(0, 0, 0, {:.2}), 0 4px 12px rgba(0, 0, 0, {:.2})",
            shadow_opacity * 0.5,
            shadow_opacity
        );

        let font_family = if theme.font_family.is_empty() {
            "inherit".to_string()
        } else {
            theme.font_family.clone()
        };

        Self {
            is_dark_mode: is_dark,
            background: background.to_string(),
            surface_color: surface_color.to_string(),
            text_primary,
            text_muted,
            accent,
            on_accent,
            accent_hover,
            error: error.to_string(),
            success: success.to_string(),
            border_subtle,
            overlay_hover,
            backdrop,
            shadow_resting,
            shadow_elevated,
            font_family,
        }
    }

    /// Generate the `:root` CSS variable block.
    pub fn css_vars_block(&self) -> String {
        format!(
            r#"
:root {{
    /* ===== Surfaces ===== */
    --color-background: {background};
    --color-surface: {surface};

    /* ===== Foreground ===== */
    --color-text-primary: {text_primary};
    --color-text-muted: {text_muted};

    /* ===== Accent ===== */
    --color-accent: {accent};
    --color-on-accent: {on_accent};
    --color-accent-hover: {accent_hover};

    /* ===== States ===== */
    --color-error: {error};
    --color-success: {success};

    /* ===== Separators & Overlays ===== */
    --color-border: {border};
    --color-overlay-hover: {overlay_hover};
    --color-backdrop: {backdrop};

    /* ===== Shadows ===== */
    --shadow-resting: {shadow_resting};
    --shadow-elevated: {shadow_elevated};

    /* ===== Typography ===== */
    --font-family: {font_family};
}}
"#,
            background = self.background,
            surface = self.surface_color,
            text_primary = self.text_primary,
            text_muted = self.text_muted,
            accent = self.accent,
            on_accent = self.on_accent,
            accent_hover = self.accent_hover,
            error = self.error,
            success = self.success,
            border = self.border_subtle,
            overlay_hover = self.overlay_hover,
            backdrop = self.backdrop,
            shadow_resting = self.shadow_resting,
            shadow_elevated = self.shadow_elevated,
            font_family = self.font_family,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::testing::RecordingSurface;

    #[test]
    fn test_parse_hex_color_long_short_and_bare() {
        assert_eq!(parse_hex_color("#e0643c"), Some((0xe0, 0x64, 0x3c)));
        assert_eq!(parse_hex_color("15161b"), Some((0x15, 0x16, 0x1b)));
        assert_eq!(parse_hex_color("#fa0"), Some((0xff, 0xaa, 0x00)));
    }

    #[test]
    fn test_parse_hex_color_rejects_garbage() {
        for bad in ["", "#12", "#gggggg", "tomato", "#12345"] {
            assert_eq!(parse_hex_color(bad), None, "{bad:?} should not parse");
        }
    }

    #[test]
    fn test_luminance_spans_black_to_white() {
        assert!(relative_luminance(0, 0, 0) < 0.001);
        assert!(relative_luminance(255, 255, 255) > 0.999);
    }

    #[test]
    fn test_is_dark_color() {
        assert!(is_dark_color("#000000"));
        assert!(is_dark_color(DEFAULT_BACKGROUND_DARK));
        assert!(!is_dark_color("#ffffff"));
        assert!(!is_dark_color(DEFAULT_BACKGROUND_LIGHT));
    }

    #[test]
    fn test_blend_midpoint_lands_between() {
        let (r, g, b) = blend_colors("#000000", "#ffffff", 0.5).unwrap();
        for channel in [r, g, b] {
            assert!((120..135).contains(&channel));
        }
    }

    #[test]
    fn test_rgba_str_formats_two_decimals() {
        assert_eq!(rgba_str(224, 100, 60, 0.5), "rgba(224, 100, 60, 0.50)");
    }

    #[test]
    fn test_mode_flipped() {
        assert_eq!(ThemeMode::Light.flipped(), ThemeMode::Dark);
        assert_eq!(ThemeMode::Dark.flipped(), ThemeMode::Light);
    }

    #[test]
    fn test_toggle_icon_advertises_other_mode() {
        assert_eq!(
            ThemeMode::Light.toggle_icon(),
            "weather-clear-night-symbolic"
        );
        assert_eq!(ThemeMode::Dark.toggle_icon(), "weather-clear-symbolic");
    }

    #[test]
    fn test_manager_applies_stored_mode_at_construction() {
        let surface = RecordingSurface::new();
        let mut prefs = Preferences::default();
        prefs.theme = ThemeMode::Dark;

        let manager = ThemeManager::new(surface.clone(), prefs);

        assert_eq!(manager.current(), ThemeMode::Dark);
        assert_eq!(surface.root_theme.get(), Some(ThemeMode::Dark));
        assert_eq!(
            surface.glyphs.borrow().get("theme-icon").map(String::as_str),
            Some("weather-clear-symbolic")
        );
    }

    #[test]
    fn test_double_toggle_restores_original_mode() {
        let surface = RecordingSurface::new();
        let manager = ThemeManager::new(surface.clone(), Preferences::default());

        let original = manager.current();
        manager.toggle();
        assert_eq!(manager.current(), original.flipped());
        manager.toggle();
        assert_eq!(manager.current(), original);
        assert_eq!(surface.root_theme.get(), Some(original));
    }

    #[test]
    fn test_palette_light_mode_foreground() {
        let theme = ThemeConfig::default();
        let palette = ThemePalette::from_config(&theme, ThemeMode::Light);
        assert!(!palette.is_dark_mode);
        assert_eq!(palette.text_primary, "#1a1a1a");
    }

    #[test]
    fn test_palette_dark_mode_foreground() {
        let theme = ThemeConfig::default();
        let palette = ThemePalette::from_config(&theme, ThemeMode::Dark);
        assert!(palette.is_dark_mode);
        assert_eq!(palette.text_primary, "#ffffff");
    }

    #[test]
    fn test_palette_on_accent_follows_accent_luminance() {
        let mut theme = ThemeConfig::default();
        theme.accent = "#101010".to_string();
        let palette = ThemePalette::from_config(&theme, ThemeMode::Light);
        assert_eq!(palette.on_accent, "#ffffff");

        theme.accent = "#f0f0f0".to_string();
        let palette = ThemePalette::from_config(&theme, ThemeMode::Light);
        assert_eq!(palette.on_accent, "#000000");
    }

    #[test]
    fn test_palette_accent_none_is_monochrome() {
        let mut theme = ThemeConfig::default();
        theme.accent = "none".to_string();
        let palette = ThemePalette::from_config(&theme, ThemeMode::Dark);
        assert!(palette.accent.contains("rgba(255, 255, 255"));
    }

    #[test]
    fn test_css_vars_contains_expected_vars() {
        let theme = ThemeConfig::default();
        let palette = ThemePalette::from_config(&theme, ThemeMode::Light);
        let css = palette.css_vars_block();

        assert!(css.contains("--color-background:"));
        assert!(css.contains("--color-surface:"));
        assert!(css.contains("--color-accent:"));
        assert!(css.contains("--shadow-resting:"));
        assert!(css.contains("--shadow-elevated:"));
        assert!(css.contains("--font-family:"));
    }

    #[test]
    fn test_elevated_shadow_is_layered() {
        let theme = ThemeConfig::default();
        let palette = ThemePalette::from_config(&theme, ThemeMode::Light);
        // Resting is a single layer, elevated adds the diffuse second layer.
        assert_eq!(palette.shadow_resting.matches("rgba").count(), 1);
        assert_eq!(palette.shadow_elevated.matches("rgba").count(), 2);
    }
}
