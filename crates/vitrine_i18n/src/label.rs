use std::borrow::Cow;
use std::fmt;

/// A UI label: either raw text or a translatable key path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Label {
    Raw(String),
    Key(Cow<'static, str>),
}

impl Label {
    pub fn raw(s: impl Into<String>) -> Self {
        Self::Raw(s.into())
    }

    pub fn key(key_path: impl Into<Cow<'static, str>>) -> Self {
        Self::Key(key_path.into())
    }

    /// What to show when no translation applies: the raw text or the key path.
    pub fn fallback_text(&self) -> &str {
        match self {
            Label::Raw(s) => s.as_str(),
            Label::Key(k) => k.as_ref(),
        }
    }
}

impl From<String> for Label {
    fn from(s: String) -> Self {
        Self::Raw(s)
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Self::Raw(s.to_string())
    }
}

impl From<&String> for Label {
    fn from(s: &String) -> Self {
        Self::Raw(s.clone())
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.fallback_text())
    }
}
