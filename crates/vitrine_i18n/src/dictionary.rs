use indexmap::IndexMap;
use thiserror::Error;

/// Separator between segments of a key path (`HEADER.HOME`).
pub const KEY_DELIMITER: char = '.';

const MAX_CATALOG_LEAVES: usize = 10_000;
const MAX_DEPTH: usize = 16;
const MAX_KEY_BYTES: usize = 128;
const MAX_VALUE_BYTES: usize = 16 * 1024;

fn is_valid_segment(key: &str) -> bool {
    let mut it = key.chars();
    match it.next() {
        Some(c) if c.is_ascii_alphanumeric() => {}
        _ => return false,
    }
    it.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn join_path(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{prefix}{KEY_DELIMITER}{segment}")
    }
}

/// One node of a dictionary tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Leaf(String),
    Branch(IndexMap<String, Node>),
}

impl Node {
    fn branch_mut(&mut self) -> &mut IndexMap<String, Node> {
        match self {
            Node::Branch(children) => children,
            leaf @ Node::Leaf(_) => {
                *leaf = Node::Branch(IndexMap::new());
                leaf.branch_mut()
            }
        }
    }
}

/// Translations for a single locale, addressed by dot-separated key paths.
///
/// Catalogs are nested YAML mappings:
///
/// ```yaml
/// HEADER:
///   HOME: "Home"
///   CONTACT: "Contact"
/// ```
///
/// Branch order follows the source document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dictionary {
    entries: IndexMap<String, Node>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Insert a leaf at `key_path`, creating intermediate branches.
    ///
    /// A leaf standing where a branch is needed is replaced. Segments follow
    /// the same rules as parsed catalogs.
    pub fn insert(
        &mut self,
        key_path: &str,
        value: impl Into<String>,
    ) -> Result<(), CatalogParseError> {
        let mut segments: Vec<&str> = key_path.split(KEY_DELIMITER).collect();
        for segment in &segments {
            check_segment(segment, key_path)?;
        }
        let Some(last) = segments.pop() else {
            return Ok(());
        };

        let mut children = &mut self.entries;
        for segment in segments {
            children = children
                .entry(segment.to_string())
                .or_insert_with(|| Node::Branch(IndexMap::new()))
                .branch_mut();
        }
        children.insert(last.to_string(), Node::Leaf(value.into()));
        Ok(())
    }

    /// Walk `key_path` one segment at a time.
    ///
    /// Returns `None` when a segment is missing, when the walk has to descend
    /// through a leaf, when the path ends on a branch, or when the leaf is empty.
    pub fn lookup(&self, key_path: &str) -> Option<&str> {
        if key_path.is_empty() {
            return None;
        }
        let mut segments = key_path.split(KEY_DELIMITER);
        let mut node = self.entries.get(segments.next()?)?;
        for segment in segments {
            node = match node {
                Node::Branch(children) => children.get(segment)?,
                Node::Leaf(_) => return None,
            };
        }
        match node {
            Node::Leaf(s) if !s.is_empty() => Some(s.as_str()),
            _ => None,
        }
    }

    /// Every leaf key path, in document order.
    pub fn leaf_paths(&self) -> Vec<String> {
        fn collect(children: &IndexMap<String, Node>, prefix: &str, out: &mut Vec<String>) {
            for (key, node) in children {
                let path = join_path(prefix, key);
                match node {
                    Node::Leaf(_) => out.push(path),
                    Node::Branch(nested) => collect(nested, &path, out),
                }
            }
        }

        let mut out = Vec::new();
        collect(&self.entries, "", &mut out);
        out
    }

    /// Number of leaves.
    pub fn len(&self) -> usize {
        fn count(children: &IndexMap<String, Node>) -> usize {
            children
                .values()
                .map(|node| match node {
                    Node::Leaf(_) => 1,
                    Node::Branch(nested) => count(nested),
                })
                .sum()
        }
        count(&self.entries)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Parse a nested YAML mapping into a dictionary.
    pub fn parse(src: &str) -> Result<Self, CatalogParseError> {
        if src.trim().is_empty() {
            return Ok(Self::new());
        }

        match serde_yaml::from_str::<serde_yaml::Value>(src) {
            Ok(serde_yaml::Value::Null) => Ok(Self::new()),
            Ok(serde_yaml::Value::Mapping(raw)) => {
                let mut leaves = 0;
                let entries = convert_mapping(raw, "", 1, &mut leaves)?;
                Ok(Self { entries })
            }
            Ok(_) => Err(CatalogParseError::Yaml(
                "catalog root must be a mapping".to_string(),
            )),
            Err(e) => Err(CatalogParseError::Yaml(format!("yaml parse error: {e}"))),
        }
    }
}

fn check_segment(segment: &str, path: &str) -> Result<(), CatalogParseError> {
    if !is_valid_segment(segment) {
        return Err(CatalogParseError::structure(
            path,
            "invalid key (allowed: [A-Za-z0-9][A-Za-z0-9_-]*)",
        ));
    }
    if segment.len() > MAX_KEY_BYTES {
        return Err(CatalogParseError::structure(
            path,
            format!("key is too long (max {MAX_KEY_BYTES} bytes)"),
        ));
    }
    Ok(())
}

fn convert_mapping(
    raw: serde_yaml::Mapping,
    prefix: &str,
    depth: usize,
    leaves: &mut usize,
) -> Result<IndexMap<String, Node>, CatalogParseError> {
    let mut out = IndexMap::with_capacity(raw.len());
    for (k, v) in raw {
        let Some(key) = k.as_str() else {
            return Err(CatalogParseError::structure(prefix, "keys must be strings"));
        };
        let path = join_path(prefix, key);
        check_segment(key, &path)?;

        let node = match v {
            serde_yaml::Value::String(s) => {
                if s.len() > MAX_VALUE_BYTES {
                    return Err(CatalogParseError::structure(
                        &path,
                        format!("value is too long (max {MAX_VALUE_BYTES} bytes)"),
                    ));
                }
                *leaves += 1;
                if *leaves > MAX_CATALOG_LEAVES {
                    return Err(CatalogParseError::structure(
                        &path,
                        format!("too many entries (max {MAX_CATALOG_LEAVES})"),
                    ));
                }
                Node::Leaf(s)
            }
            serde_yaml::Value::Mapping(nested) => {
                if depth >= MAX_DEPTH {
                    return Err(CatalogParseError::structure(
                        &path,
                        format!("nesting is too deep (max {MAX_DEPTH} levels)"),
                    ));
                }
                Node::Branch(convert_mapping(nested, &path, depth + 1, leaves)?)
            }
            _ => {
                return Err(CatalogParseError::structure(
                    &path,
                    "value must be a string or a mapping",
                ));
            }
        };
        out.insert(key.to_string(), node);
    }
    Ok(out)
}

#[derive(Debug, Error)]
pub enum CatalogParseError {
    #[error("yaml catalog error: {0}")]
    Yaml(String),

    #[error("catalog error at `{path}`: {msg}")]
    Structure { path: String, msg: String },
}

impl CatalogParseError {
    fn structure(path: &str, msg: impl Into<String>) -> Self {
        Self::Structure {
            path: if path.is_empty() {
                "<root>".to_string()
            } else {
                path.to_string()
            },
            msg: msg.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const HEADER_EN: &str = r#"
HEADER:
  TITLE: "Service Business"
  HOME: "Home"
FOOTER:
  LOCATION: "Montreal, QC, Canada"
"#;

    #[test]
    fn parse_nested_and_lookup() {
        let dict = Dictionary::parse(HEADER_EN).unwrap();
        assert_eq!(dict.lookup("HEADER.HOME"), Some("Home"));
        assert_eq!(dict.lookup("FOOTER.LOCATION"), Some("Montreal, QC, Canada"));
        assert_eq!(dict.len(), 3);
    }

    #[test]
    fn lookup_misses() {
        let dict = Dictionary::parse(HEADER_EN).unwrap();
        assert_eq!(dict.lookup("HEADER.NOPE"), None);
        assert_eq!(dict.lookup("NOPE.HOME"), None);
        // Ends on a branch.
        assert_eq!(dict.lookup("HEADER"), None);
        // Descends through a leaf.
        assert_eq!(dict.lookup("HEADER.HOME.EXTRA"), None);
        assert_eq!(dict.lookup(""), None);
        assert_eq!(dict.lookup("HEADER."), None);
    }

    #[test]
    fn empty_leaf_is_a_miss() {
        let mut dict = Dictionary::new();
        dict.insert("HOME.TITLE", "").unwrap();
        assert_eq!(dict.lookup("HOME.TITLE"), None);
    }

    #[test]
    fn leaf_paths_follow_document_order() {
        let dict = Dictionary::parse(HEADER_EN).unwrap();
        assert_eq!(
            dict.leaf_paths(),
            vec!["HEADER.TITLE", "HEADER.HOME", "FOOTER.LOCATION"]
        );
    }

    #[test]
    fn insert_builds_branches() {
        let mut dict = Dictionary::new();
        dict.insert("HEADER.HOME", "Accueil").unwrap();
        dict.insert("HEADER.CONTACT", "Contact").unwrap();
        dict.insert("LANGUAGE", "Français").unwrap();
        assert_eq!(dict.lookup("HEADER.HOME"), Some("Accueil"));
        assert_eq!(dict.lookup("LANGUAGE"), Some("Français"));

        // A leaf in the way is replaced by a branch.
        dict.insert("LANGUAGE.NAME", "Français").unwrap();
        assert_eq!(dict.lookup("LANGUAGE"), None);
        assert_eq!(dict.lookup("LANGUAGE.NAME"), Some("Français"));
    }

    #[test]
    fn insert_rejects_invalid_segments() {
        let mut dict = Dictionary::new();
        for bad in ["", "HEADER..HOME", "HEADER.", ".HOME", "bad key"] {
            let err = dict.insert(bad, "x").unwrap_err();
            assert!(matches!(err, CatalogParseError::Structure { .. }), "{bad:?}");
        }
        assert!(dict.is_empty());
        assert_eq!(dict.lookup(""), None);
        assert_eq!(dict.lookup("HEADER..HOME"), None);
    }

    #[test]
    fn empty_source_is_empty_dictionary() {
        assert!(Dictionary::parse("").unwrap().is_empty());
        assert!(Dictionary::parse("   \n").unwrap().is_empty());
    }

    #[test]
    fn root_must_be_mapping() {
        let err = Dictionary::parse("- a\n- b\n").unwrap_err();
        assert!(matches!(err, CatalogParseError::Yaml(_)));
    }

    #[test]
    fn values_must_be_strings_or_mappings() {
        let err = Dictionary::parse("HOME:\n  COUNT: 3\n").unwrap_err();
        match err {
            CatalogParseError::Structure { path, .. } => assert_eq!(path, "HOME.COUNT"),
            other => panic!("unexpected error: {other:?}"),
        }

        let err = Dictionary::parse("HOME:\n  - one\n").unwrap_err();
        assert!(matches!(err, CatalogParseError::Structure { .. }));
    }

    #[test]
    fn key_validation() {
        let err = Dictionary::parse("\"bad key\": \"nope\"\n").unwrap_err();
        assert!(matches!(err, CatalogParseError::Structure { .. }));

        // The delimiter cannot appear inside a segment.
        let err = Dictionary::parse("\"HEADER.HOME\": \"Home\"\n").unwrap_err();
        assert!(matches!(err, CatalogParseError::Structure { .. }));
    }

    #[test]
    fn nesting_is_limited() {
        let mut src = String::new();
        for depth in 0..=MAX_DEPTH {
            src.push_str(&"  ".repeat(depth));
            src.push_str("K:\n");
        }
        src.push_str(&"  ".repeat(MAX_DEPTH + 1));
        src.push_str("LEAF: \"x\"\n");

        let err = Dictionary::parse(&src).unwrap_err();
        assert!(matches!(err, CatalogParseError::Structure { .. }));
    }

    #[test]
    fn values_are_length_limited() {
        let src = format!("BIG: \"{}\"\n", "a".repeat(MAX_VALUE_BYTES + 1));
        let err = Dictionary::parse(&src).unwrap_err();
        assert!(matches!(err, CatalogParseError::Structure { .. }));
    }
}
