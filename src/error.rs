//! Simulator errors.

use crate::config::ConfigError;

/// Errors raised while building or driving a simulated page.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A step named a dropdown that is not on the page
    #[error("Unknown dropdown: {0}")]
    UnknownDropdown(String),

    /// A step named an element that is not on the page
    #[error("Unknown element: {0}")]
    UnknownElement(String),

    /// The final report could not be serialized
    #[error("Failed to write report: {0}")]
    Report(#[from] serde_json::Error),
}
