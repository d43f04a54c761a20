use thiserror::Error;

use crate::dictionary::CatalogParseError;

#[derive(Debug, Error)]
pub enum I18nError {
    #[error(transparent)]
    CatalogParse(#[from] CatalogParseError),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("supported locale `{0}` has no loaded dictionary")]
    MissingDictionary(String),

    #[error("default locale `{0}` is not in the supported locale set")]
    UnsupportedDefault(String),

    #[error("the supported locale set is empty")]
    EmptySupportedSet,

    #[error(
        "catalogs are inconsistent with `{reference}`: {missing} key(s) missing, {extra} key(s) not in `{reference}`"
    )]
    InconsistentCatalogs {
        reference: String,
        missing: usize,
        extra: usize,
    },
}
