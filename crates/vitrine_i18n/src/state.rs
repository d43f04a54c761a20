use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use tracing::{debug, warn};

use crate::dictionary::Dictionary;
use crate::label::Label;
use crate::notify::{LocaleNotifier, LocaleObserver, SubscriptionId};
use crate::I18nError;

/// Runtime i18n state: the loaded dictionaries and the active locale.
///
/// Built once at application startup through [`I18nState::builder`] and
/// shared (usually as `Arc<I18nState>`) with every component that renders
/// text. Dictionaries are immutable once built; only the active locale and
/// the subscriber list change afterwards.
pub struct I18nState {
    locale: RwLock<String>,
    dictionaries: HashMap<String, Dictionary>,
    notifier: LocaleNotifier,
}

impl fmt::Debug for I18nState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("I18nState")
            .field("locale", &*self.locale_guard())
            .field("loaded_locales", &self.loaded_locales())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

pub struct I18nStateBuilder {
    default_locale: String,
    dictionaries: HashMap<String, Dictionary>,
}

impl Default for I18nStateBuilder {
    fn default() -> Self {
        Self {
            default_locale: "en".to_string(),
            dictionaries: HashMap::new(),
        }
    }
}

impl I18nStateBuilder {
    /// Locale active when the state is built. Not checked against the
    /// loaded dictionaries.
    pub fn default_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale = locale.into();
        self
    }

    /// Add (or replace) the dictionary for `locale`.
    pub fn dictionary(mut self, locale: impl Into<String>, dictionary: Dictionary) -> Self {
        self.dictionaries.insert(locale.into(), dictionary);
        self
    }

    /// Parse and add a YAML catalog for `locale`.
    pub fn dictionary_str(self, locale: impl Into<String>, src: &str) -> Result<Self, I18nError> {
        let dictionary = Dictionary::parse(src)?;
        Ok(self.dictionary(locale, dictionary))
    }

    pub fn build(self) -> I18nState {
        I18nState {
            locale: RwLock::new(self.default_locale),
            dictionaries: self.dictionaries,
            notifier: LocaleNotifier::new(),
        }
    }
}

impl I18nState {
    pub fn builder() -> I18nStateBuilder {
        I18nStateBuilder::default()
    }

    fn locale_guard(&self) -> RwLockReadGuard<'_, String> {
        self.locale.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the active locale, returning the previous one.
    ///
    /// Empty identifiers are ignored so the active locale is never blank.
    fn store_locale(&self, locale: &str) -> Option<String> {
        if locale.trim().is_empty() {
            debug!("I18nState: ignoring empty locale");
            return None;
        }
        if !self.dictionaries.contains_key(locale) {
            warn!(
                "I18nState: activating locale `{}` with no loaded dictionary; keys will render raw",
                locale
            );
        }

        let mut cur = self.locale.write().unwrap_or_else(PoisonError::into_inner);
        Some(std::mem::replace(&mut *cur, locale.to_string()))
    }

    pub fn current_locale(&self) -> String {
        self.locale_guard().clone()
    }

    /// Set the active locale without notifying subscribers.
    ///
    /// Meant for bootstrap, before any observer exists.
    pub fn set_default_locale(&self, locale: impl AsRef<str>) {
        let locale = locale.as_ref();
        if let Some(prev) = self.store_locale(locale) {
            debug!("I18nState::set_default_locale: {} -> {}", prev, locale);
        }
    }

    /// Activate `locale` and notify every subscriber before returning.
    ///
    /// Any non-empty identifier is accepted, supported or not, and
    /// subscribers are notified even when the locale does not change.
    /// Empty or blank identifiers are dropped: nothing changes and nobody
    /// is notified.
    pub fn use_locale(&self, locale: impl AsRef<str>) {
        let locale = locale.as_ref();
        let Some(prev) = self.store_locale(locale) else {
            return;
        };
        debug!("I18nState::use_locale: {} -> {}", prev, locale);

        self.notifier.dispatch(locale);
    }

    /// Resolve `key_path` against the dictionary of `locale`, or of the
    /// active locale when `locale` is `None` or empty.
    ///
    /// Anything unresolvable renders as the key path itself. There is no
    /// fallback to another locale's dictionary.
    pub fn resolve(&self, key_path: &str, locale: Option<&str>) -> String {
        let active;
        let effective = match locale {
            Some(l) if !l.is_empty() => l,
            _ => {
                active = self.locale_guard();
                active.as_str()
            }
        };

        match self
            .dictionaries
            .get(effective)
            .and_then(|dict| dict.lookup(key_path))
        {
            Some(s) => s.to_string(),
            None => {
                debug!(
                    "Missing translation key `{}` for locale `{}`; rendering the key",
                    key_path, effective
                );
                key_path.to_string()
            }
        }
    }

    /// Resolve against the active locale.
    pub fn t(&self, key_path: &str) -> String {
        self.resolve(key_path, None)
    }

    pub fn resolve_label(&self, label: &Label) -> String {
        match label {
            Label::Raw(s) => s.clone(),
            Label::Key(k) => self.t(k),
        }
    }

    /// Register `observer` for locale changes.
    ///
    /// The observer is called once right away with the active locale, then
    /// on every later [`use_locale`](Self::use_locale).
    pub fn subscribe<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        let observer: LocaleObserver = Arc::new(observer);
        let id = self.notifier.subscribe(Arc::clone(&observer));

        let current = self.current_locale();
        observer(&current);
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.notifier.len()
    }

    pub fn dictionary(&self, locale: &str) -> Option<&Dictionary> {
        self.dictionaries.get(locale)
    }

    pub fn has_dictionary(&self, locale: &str) -> bool {
        self.dictionaries.contains_key(locale)
    }

    /// Locales with a loaded dictionary, sorted.
    pub fn loaded_locales(&self) -> Vec<String> {
        let mut locales: Vec<String> = self.dictionaries.keys().cloned().collect();
        locales.sort_unstable();
        locales
    }

    /// Check that every supported locale has a dictionary.
    pub fn ensure_supported_loaded(&self, supported: &[String]) -> Result<(), I18nError> {
        match supported.iter().find(|l| !self.has_dictionary(l)) {
            Some(missing) => Err(I18nError::MissingDictionary(missing.clone())),
            None => Ok(()),
        }
    }

    /// Compare every loaded dictionary with the one for `reference`, in
    /// both directions.
    ///
    /// If `reference` has no dictionary, nothing is reported.
    pub fn consistency_report(&self, reference: &str) -> ConsistencyReport {
        let mut report = ConsistencyReport {
            reference: reference.to_string(),
            ..ConsistencyReport::default()
        };
        let Some(reference_dict) = self.dictionaries.get(reference) else {
            return report;
        };
        let expected = reference_dict.leaf_paths();

        for (locale, dict) in &self.dictionaries {
            if locale == reference {
                continue;
            }
            let missing: Vec<String> = expected
                .iter()
                .filter(|path| dict.lookup(path).is_none())
                .cloned()
                .collect();
            if !missing.is_empty() {
                report.missing.insert(locale.clone(), missing);
            }

            let extra: Vec<String> = dict
                .leaf_paths()
                .into_iter()
                .filter(|path| reference_dict.lookup(path).is_none())
                .collect();
            if !extra.is_empty() {
                report.extra.insert(locale.clone(), extra);
            }
        }
        report
    }
}

/// Key paths on which other locales disagree with a reference locale.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConsistencyReport {
    pub reference: String,
    /// Locale -> key paths that resolve in the reference but not there.
    pub missing: BTreeMap<String, Vec<String>>,
    /// Locale -> key paths that resolve there but not in the reference.
    pub extra: BTreeMap<String, Vec<String>>,
}

impl ConsistencyReport {
    pub fn is_consistent(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty()
    }

    pub fn missing_count(&self) -> usize {
        self.missing.values().map(Vec::len).sum()
    }

    pub fn extra_count(&self) -> usize {
        self.extra.values().map(Vec::len).sum()
    }

    pub fn into_result(self) -> Result<(), I18nError> {
        if self.is_consistent() {
            return Ok(());
        }
        Err(I18nError::InconsistentCatalogs {
            missing: self.missing_count(),
            extra: self.extra_count(),
            reference: self.reference,
        })
    }
}
