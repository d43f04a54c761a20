//! Presentation-side consumers of the i18n state.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::warn;
use vitrine_i18n::{I18nState, Label, SubscriptionId};

/// A piece of text that follows the active locale.
///
/// Renders as soon as it is created (the subscription replays the current
/// locale) and re-renders on every locale change until dropped.
pub struct BoundText {
    state: Arc<I18nState>,
    label: Label,
    rendered: Arc<RwLock<String>>,
    subscription: SubscriptionId,
}

impl BoundText {
    pub fn new(state: &Arc<I18nState>, label: impl Into<Label>) -> Self {
        let label = label.into();
        let rendered = Arc::new(RwLock::new(label.fallback_text().to_string()));

        // Weak: the state owns this observer.
        let weak = Arc::downgrade(state);
        let observed = label.clone();
        let sink = Arc::clone(&rendered);
        let subscription = state.subscribe(move |locale| {
            let Some(st) = weak.upgrade() else {
                return;
            };
            let text = match &observed {
                Label::Raw(s) => s.clone(),
                Label::Key(k) => st.resolve(k, Some(locale)),
            };
            *sink.write().unwrap_or_else(PoisonError::into_inner) = text;
        });

        Self {
            state: Arc::clone(state),
            label,
            rendered,
            subscription,
        }
    }

    pub fn text(&self) -> String {
        self.rendered
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn label(&self) -> &Label {
        &self.label
    }
}

impl Drop for BoundText {
    fn drop(&mut self) {
        self.state.unsubscribe(self.subscription);
    }
}

/// One entry of the language switcher.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LanguageOption {
    pub locale: String,
    /// The language's name in its own dictionary (`LANGUAGE.NAME`).
    pub name: String,
}

/// The header's language switching control.
///
/// Unlike the state itself, the switcher only offers supported locales.
pub struct LanguageSwitcher {
    state: Arc<I18nState>,
    supported: Vec<String>,
}

impl LanguageSwitcher {
    pub const NAME_KEY: &'static str = "LANGUAGE.NAME";

    pub fn new(state: &Arc<I18nState>, supported: &[String]) -> Self {
        Self {
            state: Arc::clone(state),
            supported: supported.to_vec(),
        }
    }

    pub fn options(&self) -> Vec<LanguageOption> {
        self.supported
            .iter()
            .map(|locale| LanguageOption {
                locale: locale.clone(),
                name: self.state.resolve(Self::NAME_KEY, Some(locale)),
            })
            .collect()
    }

    pub fn current(&self) -> String {
        self.state.current_locale()
    }

    /// Switch to `locale`. Returns `false` (and changes nothing) if the
    /// locale is not offered.
    pub fn select(&self, locale: &str) -> bool {
        if !self.supported.iter().any(|l| l == locale) {
            warn!("LanguageSwitcher: `{}` is not a supported locale", locale);
            return false;
        }
        self.state.use_locale(locale);
        true
    }

    /// Switch to the supported locale after the current one, wrapping around.
    pub fn next(&self) -> String {
        let current = self.current();
        let Some(first) = self.supported.first() else {
            return current;
        };
        let next = match self.supported.iter().position(|l| *l == current) {
            Some(i) => &self.supported[(i + 1) % self.supported.len()],
            None => first,
        };
        self.state.use_locale(next);
        next.clone()
    }
}
