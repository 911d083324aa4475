//! CSS for the kiosk window, pages, and overlays.
//!
//! All color and shadow values come from the `:root` variable block the
//! core palette generates; this module only contains structure. State
//! classes (`open`, `active`, `revealed`, `elevated`) are toggled by the
//! core through the surface.

/// Return shared utility CSS.
pub fn utility_css() -> String {
    r#"
/* ===== SHARED UTILITY CSS ===== */

window.kiosk-window {
    background-color: var(--color-background);
    color: var(--color-text-primary);
    font-family: var(--font-family);
}

.text-muted { color: var(--color-text-muted); }

.page-title {
    font-size: 28px;
    font-weight: 800;
}

.section-title {
    font-size: 20px;
    font-weight: 700;
}

/* Accent-filled call-to-action */
.btn-primary {
    background-image: none;
    background-color: var(--color-accent);
    color: var(--color-on-accent);
    border: none;
    border-radius: 8px;
    padding: 10px 18px;
    font-weight: 700;
    box-shadow: none;
}
.btn-primary:hover {
    background-color: var(--color-accent-hover);
}
.btn-primary:active {
    opacity: 0.8;
}

/* Transparent button with a hover overlay */
.btn-ghost {
    background-image: none;
    background-color: transparent;
    border: none;
    box-shadow: none;
    border-radius: 8px;
    padding: 8px 12px;
    color: var(--color-text-primary);
}
.btn-ghost:hover {
    background-color: var(--color-overlay-hover);
}
"#
    .to_string()
}

/// Return kiosk-specific CSS: nav bar, pages, forms, modals, toasts.
pub fn kiosk_css() -> String {
    r#"
/* ===== NAV BAR ===== */

.navbar {
    background-color: var(--color-surface);
    box-shadow: var(--shadow-resting);
    padding: 10px 18px;
    transition: box-shadow 200ms ease-out;
}
.navbar.elevated {
    box-shadow: var(--shadow-elevated);
}

.nav-brand {
    font-size: 18px;
    font-weight: 800;
    color: var(--color-accent);
}

.nav-link {
    background-image: none;
    background-color: transparent;
    border: none;
    box-shadow: none;
    border-radius: 6px;
    padding: 6px 10px;
    color: var(--color-text-primary);
}
.nav-link:hover {
    background-color: var(--color-overlay-hover);
}
.nav-link.active {
    color: var(--color-accent);
    font-weight: 700;
}

/* Hamburger panel (narrow widths) */
.nav-menu {
    background-color: var(--color-surface);
    border-bottom: 1px solid var(--color-border);
    box-shadow: var(--shadow-elevated);
    padding: 8px 18px 14px 18px;
}

.nav-dropdown {
    margin-left: 16px;
    border-left: 2px solid var(--color-border);
    padding-left: 8px;
}

/* ===== PAGES ===== */

.page {
    padding: 24px 32px 48px 32px;
}

.hero {
    padding: 48px 24px;
    border-radius: 16px;
    background-color: var(--color-surface);
    box-shadow: var(--shadow-resting);
}

.section {
    margin-top: 28px;
}

/* Reveal-on-scroll: sections start transparent and fade in once the
   `revealed` class appears. */
.reveal {
    opacity: 0;
    transition: opacity 500ms ease-out;
}
.reveal.revealed {
    opacity: 1;
}

.card {
    background-color: var(--color-surface);
    border: 1px solid var(--color-border);
    border-radius: 12px;
    box-shadow: var(--shadow-resting);
    padding: 16px;
}

.card-row {
    padding: 6px 2px;
    border-bottom: 1px solid var(--color-border);
}

/* ===== FORMS ===== */

.field-row {
    margin-top: 10px;
}

.field-label {
    color: var(--color-text-muted);
    font-size: 13px;
}

entry, textview {
    border-radius: 8px;
}

entry.error, textview.error {
    border: 1px solid var(--color-error);
}

.field-error {
    color: var(--color-error);
    font-size: 12px;
    margin-top: 2px;
}

/* ===== MODALS ===== */

.modal {
    background-color: var(--color-backdrop);
}

.modal-card {
    background-color: var(--color-surface);
    border-radius: 14px;
    box-shadow: var(--shadow-elevated);
    padding: 20px 24px;
}

.modal-close {
    background-image: none;
    background-color: transparent;
    border: none;
    box-shadow: none;
    border-radius: 50%;
    min-width: 28px;
    min-height: 28px;
    padding: 2px;
}
.modal-close:hover {
    background-color: var(--color-overlay-hover);
}

/* ===== DASHBOARD ===== */

.sidebar {
    background-color: var(--color-surface);
    border-right: 1px solid var(--color-border);
    padding: 16px 10px;
    min-width: 180px;
}

.sidebar-link {
    background-image: none;
    background-color: transparent;
    border: none;
    box-shadow: none;
    border-radius: 6px;
    padding: 8px 10px;
    color: var(--color-text-primary);
}
.sidebar-link:hover {
    background-color: var(--color-overlay-hover);
}
.sidebar-link.active {
    background-color: var(--color-overlay-hover);
    color: var(--color-accent);
    font-weight: 700;
}

.filter-panel {
    background-color: var(--color-surface);
    border: 1px solid var(--color-border);
    border-radius: 12px;
    box-shadow: var(--shadow-elevated);
    padding: 12px;
}

.filter-chip {
    background-image: none;
    background-color: transparent;
    border: 1px solid var(--color-border);
    border-radius: 999px;
    padding: 4px 12px;
    box-shadow: none;
    color: var(--color-text-primary);
}
.filter-chip:hover {
    background-color: var(--color-overlay-hover);
}
.filter-chip.active {
    background-color: var(--color-accent);
    color: var(--color-on-accent);
    border-color: transparent;
}

/* ===== NOTICES ===== */

.notice-toast {
    border-radius: 10px;
    padding: 12px 18px;
    margin: 8px;
    box-shadow: var(--shadow-elevated);
    background-color: var(--color-surface);
    border-left: 4px solid var(--color-accent);
    opacity: 1;
    transition: opacity 250ms ease-out;
}
.notice-toast.notice-success {
    border-left-color: var(--color-success);
}
.notice-toast.fade-out {
    opacity: 0;
}
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utility_css_styles_window_root() {
        let css = utility_css();
        assert!(css.contains("window.kiosk-window"));
        assert!(css.contains("--color-background"));
    }

    #[test]
    fn test_kiosk_css_covers_state_classes() {
        let css = kiosk_css();
        assert!(css.contains(".navbar.elevated"));
        assert!(css.contains(".reveal.revealed"));
        assert!(css.contains(".nav-link.active"));
        assert!(css.contains(".notice-toast.fade-out"));
    }

    #[test]
    fn test_kiosk_css_styles_field_errors() {
        let css = kiosk_css();
        assert!(css.contains("entry.error"));
        assert!(css.contains(".field-error"));
    }
}
