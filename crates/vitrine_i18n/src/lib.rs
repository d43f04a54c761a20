//! Vitrine internationalization (i18n)
//!
//! - Nested YAML dictionaries, one per locale, addressed by key paths
//!   such as `HEADER.HOME`
//! - An explicitly constructed [`I18nState`] holding the dictionaries and
//!   the active locale, shared with whatever renders text
//! - Locale change notification with replay-on-subscribe
//! - Host language detection kept separate from the supported locale set
//!
//! Unresolvable keys render as the key itself, so missing translations
//! stay visible on the page.

mod config;
mod detect;
mod dictionary;
mod error;
mod label;
mod locale;
mod notify;
mod state;

pub use config::I18nConfig;
pub use detect::{
    parse_env_locale, EnvLanguageSource, FixedLanguageSource, LanguageSource, LocaleDetector,
};
pub use dictionary::{CatalogParseError, Dictionary, Node, KEY_DELIMITER};
pub use error::I18nError;
pub use label::Label;
pub use locale::{negotiate_locale, normalize_locale, primary_subtag};
pub use notify::{LocaleNotifier, LocaleObserver, SubscriptionId};
pub use state::{ConsistencyReport, I18nState, I18nStateBuilder};

/// Build a translatable [`Label`] from a key path literal.
///
/// `t!("HEADER.HOME")`
#[macro_export]
macro_rules! t {
    ($key:literal) => {
        $crate::Label::key($key)
    };
}
