use std::sync::Arc;

use tracing::{info, warn};
use vitrine_i18n::{
    negotiate_locale, I18nConfig, I18nError, I18nState, I18nStateBuilder, LanguageSource,
    LocaleDetector,
};

/// Build the application's i18n state and activate the starting locale.
///
/// The default locale is set first (silently), then the host preference is
/// detected and matched against `config.supported_locales`. The result is
/// activated with `use_locale`, falling back to the default when detection
/// is unavailable or unsupported.
pub fn bootstrap<S: LanguageSource>(
    config: &I18nConfig,
    builder: I18nStateBuilder,
    detector: &LocaleDetector<S>,
) -> Result<Arc<I18nState>, I18nError> {
    config.validate()?;

    let state = builder.build();
    state.set_default_locale(&config.default_locale);
    state.ensure_supported_loaded(&config.supported_locales)?;

    let report = state.consistency_report(&config.default_locale);
    for (locale, keys) in &report.missing {
        warn!(
            "locale `{}` lacks {} key(s) present in `{}`: {}",
            locale,
            keys.len(),
            report.reference,
            keys.join(", ")
        );
    }
    for (locale, keys) in &report.extra {
        warn!(
            "locale `{}` has {} key(s) absent from `{}`: {}",
            locale,
            keys.len(),
            report.reference,
            keys.join(", ")
        );
    }
    if config.strict_catalogs {
        report.into_result()?;
    }

    let preferred = detector.detect_preferred();
    let locale = negotiate_locale(
        preferred.as_deref(),
        &config.supported_locales,
        &config.default_locale,
    );
    info!(
        "i18n bootstrap: detected {:?}, activating `{}`",
        preferred, locale
    );
    state.use_locale(&locale);

    Ok(Arc::new(state))
}
