//! Locale configuration fixed at application assembly time.

use serde::{Deserialize, Serialize};

use crate::I18nError;

fn default_locale() -> String {
    "en".to_string()
}

fn default_supported() -> Vec<String> {
    vec!["en".to_string(), "fr".to_string(), "es".to_string()]
}

/// Default locale, supported locale set, and catalog checking policy.
///
/// ```toml
/// default_locale = "en"
/// supported_locales = ["en", "fr", "es"]
/// strict_catalogs = false
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct I18nConfig {
    #[serde(default = "default_locale")]
    pub default_locale: String,
    #[serde(default = "default_supported")]
    pub supported_locales: Vec<String>,
    /// Fail bootstrap when a locale's key set differs from the default
    /// locale's (keys missing or keys the default lacks), instead of
    /// logging and falling back per key.
    #[serde(default)]
    pub strict_catalogs: bool,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_locale: default_locale(),
            supported_locales: default_supported(),
            strict_catalogs: false,
        }
    }
}

impl I18nConfig {
    pub fn from_toml_str(src: &str) -> Result<Self, I18nError> {
        let config: I18nConfig = toml::from_str(src)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), I18nError> {
        if self.supported_locales.is_empty() {
            return Err(I18nError::EmptySupportedSet);
        }
        if !self.is_supported(&self.default_locale) {
            return Err(I18nError::UnsupportedDefault(self.default_locale.clone()));
        }
        Ok(())
    }

    pub fn is_supported(&self, locale: &str) -> bool {
        self.supported_locales.iter().any(|l| l == locale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults() {
        let config = I18nConfig::from_toml_str("").unwrap();
        assert_eq!(config, I18nConfig::default());
        assert_eq!(config.default_locale, "en");
        assert_eq!(config.supported_locales, vec!["en", "fr", "es"]);
        assert!(!config.strict_catalogs);
    }

    #[test]
    fn parse_overrides() {
        let config = I18nConfig::from_toml_str(
            r#"
default_locale = "fr"
supported_locales = ["fr", "en"]
strict_catalogs = true
"#,
        )
        .unwrap();
        assert_eq!(config.default_locale, "fr");
        assert!(config.is_supported("en"));
        assert!(!config.is_supported("es"));
        assert!(config.strict_catalogs);
    }

    #[test]
    fn default_must_be_supported() {
        let err = I18nConfig::from_toml_str(
            r#"
default_locale = "de"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, I18nError::UnsupportedDefault(l) if l == "de"));
    }

    #[test]
    fn rejects_empty_set_and_unknown_fields() {
        let err = I18nConfig::from_toml_str("supported_locales = []").unwrap_err();
        assert!(matches!(err, I18nError::EmptySupportedSet));

        let err = I18nConfig::from_toml_str("fallback = \"en\"").unwrap_err();
        assert!(matches!(err, I18nError::Config(_)));
    }
}
