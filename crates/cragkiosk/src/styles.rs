//! Shared CSS class constants for cragkiosk.
//!
//! This module centralizes the CSS class names used across the shell,
//! making them discoverable and avoiding typos. State classes that the
//! core toggles through the surface live in
//! `cragkiosk_core::surface::state`.

/// Core structural/layout CSS classes.
pub mod class {
    /// Kiosk window root (`.kiosk-window`).
    pub const KIOSK_WINDOW: &str = "kiosk-window";

    /// Top navigation bar (`.navbar`).
    pub const NAVBAR: &str = "navbar";

    /// Gym name / brand label in the nav bar (`.nav-brand`).
    pub const NAV_BRAND: &str = "nav-brand";

    /// Inline links row shown at desktop widths (`.nav-links`).
    pub const NAV_LINKS: &str = "nav-links";

    /// Hamburger menu panel shown at narrow widths (`.nav-menu`).
    pub const NAV_MENU: &str = "nav-menu";

    /// A navigation link (`.nav-link`).
    pub const NAV_LINK: &str = "nav-link";

    /// Dropdown panel under a parent link (`.nav-dropdown`).
    pub const NAV_DROPDOWN: &str = "nav-dropdown";

    /// Hamburger toggle button (`.nav-toggle`).
    pub const NAV_TOGGLE: &str = "nav-toggle";

    /// Theme toggle button (`.theme-toggle`).
    pub const THEME_TOGGLE: &str = "theme-toggle";

    /// A page inside the content stack (`.page`).
    pub const PAGE: &str = "page";

    /// Home page hero block (`.hero`).
    pub const HERO: &str = "hero";

    /// Generic content section (`.section`).
    pub const SECTION: &str = "section";

    /// A section that reveals on scroll (`.reveal`).
    pub const REVEAL: &str = "reveal";

    /// Card container (`.card`).
    pub const CARD: &str = "card";

    /// A row inside a card (`.card-row`).
    pub const CARD_ROW: &str = "card-row";

    /// Modal overlay root, the backdrop (`.modal`).
    pub const MODAL: &str = "modal";

    /// Dialog card inside a modal (`.modal-card`).
    pub const MODAL_CARD: &str = "modal-card";

    /// Close button inside a modal card (`.modal-close`).
    pub const MODAL_CLOSE: &str = "modal-close";

    /// Dashboard sidebar panel (`.sidebar`).
    pub const SIDEBAR: &str = "sidebar";

    /// A link inside the sidebar (`.sidebar-link`).
    pub const SIDEBAR_LINK: &str = "sidebar-link";

    /// Dashboard filter panel (`.filter-panel`).
    pub const FILTER_PANEL: &str = "filter-panel";

    /// Wall filter chip inside the filter panel (`.filter-chip`).
    pub const FILTER_CHIP: &str = "filter-chip";

    /// Host box for notice toasts (`.notice-area`).
    pub const NOTICE_AREA: &str = "notice-area";

    /// A single notice toast (`.notice-toast`).
    pub const NOTICE: &str = "notice-toast";

    /// Success-flavored notice (`.notice-success`).
    pub const NOTICE_SUCCESS: &str = "notice-success";

    /// Info-flavored notice (`.notice-info`).
    pub const NOTICE_INFO: &str = "notice-info";

    /// Fading notice about to be removed (`.fade-out`).
    pub const FADE_OUT: &str = "fade-out";
}

/// Button style classes.
pub mod button {
    /// Accent-filled call-to-action button (`.btn-primary`).
    pub const PRIMARY: &str = "btn-primary";

    /// Transparent button with a hover overlay (`.btn-ghost`).
    pub const GHOST: &str = "btn-ghost";
}

/// Form field classes.
pub mod field {
    /// Row wrapping a label and its control (`.field-row`).
    pub const ROW: &str = "field-row";

    /// Field caption label (`.field-label`).
    pub const LABEL: &str = "field-label";

    /// Error visual state on a control (`.error`).
    pub const ERROR: &str = "error";

    /// Error message label under a control (`.field-error`).
    pub const ERROR_LABEL: &str = "field-error";
}

/// Text color/typography classes.
pub mod color {
    /// Muted secondary text (`.text-muted`).
    pub const MUTED: &str = "text-muted";

    /// Page heading (`.page-title`).
    pub const PAGE_TITLE: &str = "page-title";

    /// Section heading (`.section-title`).
    pub const SECTION_TITLE: &str = "section-title";
}
