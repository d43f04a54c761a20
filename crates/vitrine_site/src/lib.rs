//! Vitrine site
//!
//! Wires the bundled translations into an [`I18nState`](vitrine_i18n::I18nState)
//! at startup and provides the text bindings the pages render through.

pub mod bootstrap;
pub mod catalogs;
pub mod view;

pub use bootstrap::bootstrap;
pub use catalogs::{bundled_builder, BUNDLED_CATALOGS};
pub use view::{BoundText, LanguageOption, LanguageSwitcher};
