/// Normalize locale identifiers to a canonical-ish form for lookup.
///
/// - Converts `_` to `-` (POSIX environments report `fr_CA`).
/// - Trims whitespace.
pub fn normalize_locale(s: &str) -> String {
    s.trim().replace('_', "-")
}

/// Primary language subtag of a tag: its first two characters.
///
/// `fr-CA` -> `fr`, `en_US` -> `en`. Returns `None` for an empty tag.
pub fn primary_subtag(tag: &str) -> Option<String> {
    let tag = normalize_locale(tag);
    if tag.is_empty() {
        return None;
    }
    Some(tag.chars().take(2).collect())
}

/// Pick the locale to activate from a detected preference.
///
/// The preference wins only if it is a member of `supported`; otherwise
/// (including when detection was unavailable) `default` is returned.
pub fn negotiate_locale(preferred: Option<&str>, supported: &[String], default: &str) -> String {
    match preferred {
        Some(p) if supported.iter().any(|s| s == p) => p.to_string(),
        _ => default.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn supported() -> Vec<String> {
        ["en", "fr", "es"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn normalize() {
        assert_eq!(normalize_locale(" fr_CA "), "fr-CA");
        assert_eq!(normalize_locale("en-US"), "en-US");
    }

    #[test]
    fn primary_subtag_truncates() {
        assert_eq!(primary_subtag("fr-CA").as_deref(), Some("fr"));
        assert_eq!(primary_subtag("es_MX").as_deref(), Some("es"));
        assert_eq!(primary_subtag("en").as_deref(), Some("en"));
        assert_eq!(primary_subtag("x").as_deref(), Some("x"));
        assert_eq!(primary_subtag("  "), None);
    }

    #[test]
    fn negotiate_prefers_supported_detection() {
        assert_eq!(negotiate_locale(Some("fr"), &supported(), "en"), "fr");
        assert_eq!(negotiate_locale(Some("de"), &supported(), "en"), "en");
        assert_eq!(negotiate_locale(None, &supported(), "en"), "en");
    }
}
