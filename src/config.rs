//! Page configuration: which nodes the widgets bind to and how they behave.
//!
//! Every field has a default matching the schedule page markup, so an empty
//! JSON object (or no config at all) mounts the standard page. Overrides are
//! partial: unspecified fields keep their defaults.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::consts::{
    ACTIVATOR_SELECTOR, CLOSE_SELECTOR, DEFAULT_LOG_LEVEL, DIALOG_SELECTOR, FIELD_KEY_ATTRIBUTE, HEADER_SELECTOR,
    PANEL_SELECTOR, REFERENCE_ATTRIBUTE, ROW_SELECTOR, TAB_CONTROL_SELECTOR, TAB_ITEM_SELECTOR, TABLIST_SELECTOR,
};
use crate::error::ConfigError;
use crate::event::FieldKey;

/// How the dialog treats empty optional fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogVariant {
    /// Write every field, even when empty.
    Plain,
    /// Hide the row of every empty optional field.
    #[default]
    RowHiding,
}

/// Binds one event field to its display node inside the dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldBinding {
    pub key: FieldKey,
    /// Selector scoped to the dialog; defaults per key when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
}

impl FieldBinding {
    #[must_use]
    pub fn new(key: FieldKey) -> Self {
        Self { key, selector: None }
    }

    /// Effective selector: `h3` for the name, `[data-name="<key>"]` otherwise.
    #[must_use]
    pub fn selector(&self) -> String {
        match (&self.selector, self.key) {
            (Some(selector), _) => selector.clone(),
            (None, FieldKey::Name) => HEADER_SELECTOR.to_string(),
            (None, key) => format!("[{FIELD_KEY_ATTRIBUTE}=\"{}\"]", key.as_str()),
        }
    }
}

/// Detail dialog bindings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogConfig {
    pub container: String,
    pub close_control: String,
    pub activators: String,
    pub row_selector: String,
    pub variant: DialogVariant,
    pub fields: Vec<FieldBinding>,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            container: DIALOG_SELECTOR.to_string(),
            close_control: CLOSE_SELECTOR.to_string(),
            activators: ACTIVATOR_SELECTOR.to_string(),
            row_selector: ROW_SELECTOR.to_string(),
            variant: DialogVariant::RowHiding,
            fields: FieldKey::ALL.into_iter().map(FieldBinding::new).collect(),
        }
    }
}

impl DialogConfig {
    /// Name, dates, place, teachers and people; no time field, no row hiding.
    #[must_use]
    pub fn plain() -> Self {
        let fields = [FieldKey::Name, FieldKey::Dates, FieldKey::Place, FieldKey::Teachers, FieldKey::People];
        Self {
            variant: DialogVariant::Plain,
            fields: fields.into_iter().map(FieldBinding::new).collect(),
            ..Self::default()
        }
    }
}

/// Tab strip bindings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabsConfig {
    pub tablist: String,
    /// List-item wrapper, scoped to the tab list.
    pub item: String,
    /// Tab control, scoped to its wrapper.
    pub control: String,
    pub panels: String,
    /// Attribute on the control that names its panel, e.g. `href="#october"`.
    pub reference_attribute: String,
}

impl Default for TabsConfig {
    fn default() -> Self {
        Self {
            tablist: TABLIST_SELECTOR.to_string(),
            item: TAB_ITEM_SELECTOR.to_string(),
            control: TAB_CONTROL_SELECTOR.to_string(),
            panels: PANEL_SELECTOR.to_string(),
            reference_attribute: REFERENCE_ATTRIBUTE.to_string(),
        }
    }
}

/// Top-level configuration for one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// `off`, `error`, `warn`, `info`, `debug` or `trace` (case-insensitive).
    pub log_level: String,
    pub dialog: DialogConfig,
    pub tabs: TabsConfig,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self { log_level: DEFAULT_LOG_LEVEL.to_string(), dialog: DialogConfig::default(), tabs: TabsConfig::default() }
    }
}

impl PageConfig {
    /// Parse a JSON config. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed JSON or wrongly typed
    /// fields, and [`ConfigError::LogLevel`] for an unknown log level.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.level_filter()?;
        Ok(config)
    }

    /// Parsed `log_level`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::LogLevel`] when the name is not a log level.
    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        self.log_level
            .trim()
            .parse::<LevelFilter>()
            .map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }
}
