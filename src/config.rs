//! Configuration loading and management
//!
//! The only setting is the modifier key. A bad value never stops startup;
//! it is reported and the default is used.

use tracing::warn;

use crate::hotkey::ModifierKey;

const MODIFIER_VAR: &str = "ALT_LANG_SWITCH_MODIFIER";

/// Runtime configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Modifier whose standalone tap switches the language
    pub modifier: ModifierKey,
}

impl Config {
    /// Load configuration from environment and defaults
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(value) = lookup(MODIFIER_VAR) {
            match value.parse() {
                Ok(modifier) => config.modifier = modifier,
                Err(e) => {
                    warn!(error = %e, default = %config.modifier, "ignoring {MODIFIER_VAR}");
                }
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[]));
        assert_eq!(config, Config::default());
        assert_eq!(config.modifier, ModifierKey::Alt);
    }

    #[test]
    fn test_modifier_override() {
        let config = Config::from_lookup(lookup(&[(MODIFIER_VAR, "ctrl")]));
        assert_eq!(config.modifier, ModifierKey::Control);
    }

    #[test]
    fn test_invalid_modifier_falls_back_to_alt() {
        let config = Config::from_lookup(lookup(&[(MODIFIER_VAR, "hyper")]));
        assert_eq!(config.modifier, ModifierKey::Alt);
    }

    #[test]
    fn test_unrelated_variables_ignored() {
        let config = Config::from_lookup(lookup(&[("ALT_LANG_SWITCH_STATUS_INTERVAL_MS", "abc")]));
        assert_eq!(config, Config::default());
    }
}
