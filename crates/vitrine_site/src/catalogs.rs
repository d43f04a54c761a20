//! Translations shipped with the site.

use vitrine_i18n::{I18nError, I18nState, I18nStateBuilder};

/// `(locale, YAML source)` for every bundled locale.
pub const BUNDLED_CATALOGS: [(&str, &str); 3] = [
    ("en", include_str!("../../../resource/i18n/site.en.yaml")),
    ("fr", include_str!("../../../resource/i18n/site.fr.yaml")),
    ("es", include_str!("../../../resource/i18n/site.es.yaml")),
];

/// A state builder with every bundled catalog parsed and loaded.
pub fn bundled_builder() -> Result<I18nStateBuilder, I18nError> {
    BUNDLED_CATALOGS
        .iter()
        .try_fold(I18nState::builder(), |builder, (locale, src)| {
            builder.dictionary_str(*locale, src)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn bundled_catalogs_parse_and_agree() {
        let st = bundled_builder().unwrap().build();
        assert_eq!(st.loaded_locales(), vec!["en", "es", "fr"]);
        assert!(st.consistency_report("en").is_consistent());

        let en_keys = st.dictionary("en").unwrap().leaf_paths();
        for locale in ["fr", "es"] {
            assert_eq!(st.dictionary(locale).unwrap().leaf_paths(), en_keys);
        }
    }

    #[test]
    fn language_names() {
        let st = bundled_builder().unwrap().build();
        assert_eq!(st.resolve("LANGUAGE.NAME", Some("en")), "English");
        assert_eq!(st.resolve("LANGUAGE.NAME", Some("fr")), "Français");
        assert_eq!(st.resolve("LANGUAGE.NAME", Some("es")), "Español");
    }
}
