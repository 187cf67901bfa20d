//! Shared string constants for the page widgets.

// ── Dialog defaults ─────────────────────────────────────────────

/// Dialog container holding the event details.
pub const DIALOG_SELECTOR: &str = ".event-details";

/// Control that dismisses the dialog.
pub const CLOSE_SELECTOR: &str = "button.close";

/// Clickable schedule entries.
pub const ACTIVATOR_SELECTOR: &str = ".event";

/// Row wrapper grouping a label with its display field.
pub const ROW_SELECTOR: &str = "tr";

/// Display field for the event name.
pub const HEADER_SELECTOR: &str = "h3";

/// Attribute that tags the remaining display fields with their key.
pub const FIELD_KEY_ATTRIBUTE: &str = "data-name";

// ── Tab defaults ────────────────────────────────────────────────

pub const TABLIST_SELECTOR: &str = ".tabbed ul";
pub const TAB_ITEM_SELECTOR: &str = "li";
pub const TAB_CONTROL_SELECTOR: &str = "a";
pub const PANEL_SELECTOR: &str = ".tabbed section";

/// Attribute on a tab control naming its panel (`#id`).
pub const REFERENCE_ATTRIBUTE: &str = "href";

// ── ARIA ────────────────────────────────────────────────────────

pub const ROLE: &str = "role";
pub const ROLE_TABLIST: &str = "tablist";
pub const ROLE_TAB: &str = "tab";
pub const ROLE_PRESENTATION: &str = "presentation";
pub const ROLE_TABPANEL: &str = "tabpanel";
pub const ARIA_SELECTED: &str = "aria-selected";
pub const TABINDEX: &str = "tabindex";

// ── Logging ─────────────────────────────────────────────────────

pub const DEFAULT_LOG_LEVEL: &str = "info";
