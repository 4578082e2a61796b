//! Adapter configuration.
//!
//! [`AdapterConfig`] can be built in code or deserialized from TOML:
//!
//! ```
//! use segmented_list::AdapterConfig;
//!
//! let config = AdapterConfig::from_toml_str(
//!     r#"
//!     notify_on_change = false
//!     initial_capacity = 64
//!     "#,
//! )
//! .unwrap();
//!
//! assert!(!config.notify_on_change);
//! assert!(!config.notify_on_slot_added);
//! assert_eq!(config.initial_capacity, 64);
//! ```

use serde::{Deserialize, Serialize};

use segmented_list_core::{AdapterError, Result};

/// Construction-time settings for a [`SegmentedAdapter`](crate::SegmentedAdapter).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdapterConfig {
    /// Whether content mutations emit a full refresh. Defaults to `true`.
    pub notify_on_change: bool,
    /// Whether adding a header or footer emits a full refresh. Defaults to
    /// `false`; slots are normally added before the first render.
    pub notify_on_slot_added: bool,
    /// Capacity reserved for the content sequence up front.
    pub initial_capacity: usize,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            notify_on_change: true,
            notify_on_slot_added: false,
            initial_capacity: 0,
        }
    }
}

impl AdapterConfig {
    /// Parses a configuration from a TOML document.
    ///
    /// Missing keys take their default values; unknown keys are rejected.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| AdapterError::config(e.to_string()))
    }

    /// Serializes the configuration to a TOML document.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| AdapterError::config(e.to_string()))
    }

    /// Sets whether content mutations emit a full refresh.
    pub fn with_notify_on_change(mut self, notify: bool) -> Self {
        self.notify_on_change = notify;
        self
    }

    /// Sets whether adding a header or footer emits a full refresh.
    pub fn with_notify_on_slot_added(mut self, notify: bool) -> Self {
        self.notify_on_slot_added = notify;
        self
    }

    /// Sets the capacity reserved for the content sequence.
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AdapterConfig::default();
        assert!(config.notify_on_change);
        assert!(!config.notify_on_slot_added);
        assert_eq!(config.initial_capacity, 0);
        assert_eq!(AdapterConfig::from_toml_str("").unwrap(), config);
    }

    #[test]
    fn test_round_trip_through_toml() {
        let config = AdapterConfig::default()
            .with_notify_on_change(false)
            .with_notify_on_slot_added(true);
        let text = config.to_toml_string().unwrap();
        assert_eq!(AdapterConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_unknown_key_is_config_error() {
        let err = AdapterConfig::from_toml_str("notify = true").unwrap_err();
        assert!(matches!(err, AdapterError::Config(_)));
    }

    #[test]
    fn test_wrong_type_is_config_error() {
        let err = AdapterConfig::from_toml_str("initial_capacity = \"lots\"").unwrap_err();
        assert!(matches!(err, AdapterError::Config(_)));
    }
}
