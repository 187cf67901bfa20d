//! Error types for mounting widgets and loading configuration.
//!
//! Activations never fail; only setup does.

/// A widget could not be mounted on the page.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WidgetError {
    #[error("required node not found: {selector}")]
    MissingNode { selector: String },
    #[error("tab list `{selector}` contains no tabs")]
    NoTabs { selector: String },
}

/// The page configuration could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid page config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown log level: {0}")]
    LogLevel(String),
}
