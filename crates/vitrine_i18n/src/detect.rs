//! Host language detection.
//!
//! The detector only reports what the environment prefers. Matching that
//! preference against the locales an application supports is left to the
//! caller (see [`negotiate_locale`](crate::negotiate_locale)).

use tracing::debug;

use crate::locale::primary_subtag;

/// Where the host's preferred language tag comes from.
pub trait LanguageSource {
    /// The raw language tag (`en-US`, `fr_CA`), or `None` when the host
    /// exposes no preference.
    fn language_tag(&self) -> Option<String>;
}

/// Reads the POSIX locale variables, most specific first.
#[derive(Clone, Debug)]
pub struct EnvLanguageSource {
    keys: &'static [&'static str],
}

impl EnvLanguageSource {
    pub const DEFAULT_KEYS: &'static [&'static str] = &["LC_ALL", "LC_MESSAGES", "LANG"];

    pub fn new() -> Self {
        Self {
            keys: Self::DEFAULT_KEYS,
        }
    }

    pub fn with_keys(keys: &'static [&'static str]) -> Self {
        Self { keys }
    }
}

impl Default for EnvLanguageSource {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageSource for EnvLanguageSource {
    fn language_tag(&self) -> Option<String> {
        self.keys
            .iter()
            .find_map(|key| std::env::var(key).ok().and_then(|v| parse_env_locale(&v)))
    }
}

/// A source with a fixed answer, for embedding hosts and tests.
#[derive(Clone, Debug, Default)]
pub struct FixedLanguageSource(Option<String>);

impl FixedLanguageSource {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(Some(tag.into()))
    }

    pub fn unavailable() -> Self {
        Self(None)
    }
}

impl LanguageSource for FixedLanguageSource {
    fn language_tag(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Parse a POSIX locale value into a language tag.
///
/// Examples: `"en_US.UTF-8"` -> `en-US`, `"fr_CA@euro"` -> `fr-CA`,
/// `"C"` -> `None`.
pub fn parse_env_locale(raw: &str) -> Option<String> {
    let s = raw.trim();
    let s = s.split_once('.').map_or(s, |(part, _)| part);
    let s = s.split_once('@').map_or(s, |(part, _)| part);
    let s = s.trim();
    if s.is_empty() || s == "C" || s == "POSIX" {
        return None;
    }
    Some(s.replace('_', "-"))
}

pub struct LocaleDetector<S = EnvLanguageSource> {
    source: S,
}

impl LocaleDetector<EnvLanguageSource> {
    pub fn from_env() -> Self {
        Self::new(EnvLanguageSource::new())
    }
}

impl<S: LanguageSource> LocaleDetector<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// The primary subtag of the host's preferred language.
    ///
    /// `None` means the host gave no usable signal; callers fall back to
    /// their default locale.
    pub fn detect_preferred(&self) -> Option<String> {
        let tag = self.source.language_tag();
        let preferred = tag.as_deref().and_then(primary_subtag);
        debug!(
            "LocaleDetector::detect_preferred: {:?} -> {:?}",
            tag, preferred
        );
        preferred
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn env_values() {
        assert_eq!(parse_env_locale("en_US.UTF-8").as_deref(), Some("en-US"));
        assert_eq!(parse_env_locale("fr_CA@euro").as_deref(), Some("fr-CA"));
        assert_eq!(parse_env_locale("es").as_deref(), Some("es"));
        assert_eq!(parse_env_locale("C"), None);
        assert_eq!(parse_env_locale("POSIX"), None);
        assert_eq!(parse_env_locale("C.UTF-8"), None);
        assert_eq!(parse_env_locale(""), None);
    }

    #[test]
    fn detects_primary_subtag() {
        let detector = LocaleDetector::new(FixedLanguageSource::new("fr-CA"));
        assert_eq!(detector.detect_preferred().as_deref(), Some("fr"));
    }

    #[test]
    fn unavailable_source() {
        let detector = LocaleDetector::new(FixedLanguageSource::unavailable());
        assert_eq!(detector.detect_preferred(), None);

        let detector = LocaleDetector::new(FixedLanguageSource::new(""));
        assert_eq!(detector.detect_preferred(), None);
    }

    #[test]
    fn env_source_with_unset_keys() {
        let source = EnvLanguageSource::with_keys(&["VITRINE_TEST_UNSET_LOCALE_VAR"]);
        assert_eq!(source.language_tag(), None);
    }

    #[test]
    fn env_source_prefers_earlier_keys_and_skips_unusable_values() {
        const KEYS: &[&str] = &[
            "VITRINE_TEST_LC_ALL",
            "VITRINE_TEST_LC_MESSAGES",
            "VITRINE_TEST_LANG",
        ];
        std::env::set_var("VITRINE_TEST_LC_ALL", "C");
        std::env::set_var("VITRINE_TEST_LC_MESSAGES", "");
        std::env::set_var("VITRINE_TEST_LANG", "es_MX.UTF-8");
        let detector = LocaleDetector::new(EnvLanguageSource::with_keys(KEYS));
        assert_eq!(detector.detect_preferred().as_deref(), Some("es"));

        std::env::set_var("VITRINE_TEST_LC_MESSAGES", "de_DE");
        assert_eq!(detector.detect_preferred().as_deref(), Some("de"));

        std::env::set_var("VITRINE_TEST_LC_ALL", "fr_CA@euro");
        assert_eq!(detector.detect_preferred().as_deref(), Some("fr"));

        for key in KEYS {
            std::env::remove_var(key);
        }
        assert_eq!(detector.detect_preferred(), None);
    }
}
