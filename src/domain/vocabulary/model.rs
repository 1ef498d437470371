use super::error::VocabularyError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

/// Language tag sent to the synthesis provider (`ja`, `en`, `zh-CN`, ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageCode(String);

impl LanguageCode {
    pub fn japanese() -> Self {
        Self("ja".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LanguageCode {
    fn default() -> Self {
        Self::japanese()
    }
}

impl FromStr for LanguageCode {
    type Err = VocabularyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let valid = !s.is_empty()
            && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
        if !valid {
            return Err(VocabularyError::InvalidLanguage(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for LanguageCode {
    type Error = VocabularyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LanguageCode> for String {
    fn from(code: LanguageCode) -> Self {
        code.0
    }
}

impl std::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Speaking rate requested from the provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speed {
    #[default]
    Normal,
    Slow,
}

impl Speed {
    pub fn as_str(&self) -> &'static str {
        match self {
            Speed::Normal => "normal",
            Speed::Slow => "slow",
        }
    }
}

impl FromStr for Speed {
    type Err = VocabularyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "normal" => Ok(Speed::Normal),
            "slow" => Ok(Speed::Slow),
            other => Err(VocabularyError::InvalidSpeed(other.to_string())),
        }
    }
}

impl std::fmt::Display for Speed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One clip to generate. `id` is used verbatim as the file stem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyItem {
    pub id: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<LanguageCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<Speed>,
}

impl VocabularyItem {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            language: None,
            speed: None,
        }
    }

    pub fn with_speed(mut self, speed: Speed) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn with_language(mut self, language: LanguageCode) -> Self {
        self.language = Some(language);
        self
    }
}

/// A named, ordered vocabulary list and the directory its clips land in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularySet {
    pub name: String,
    /// Relative to the configured output root
    pub directory: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<LanguageCode>,
    pub items: Vec<VocabularyItem>,
    /// Batch file the set was loaded from; `None` for built-in sets
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl VocabularySet {
    /// Load a set from a JSON batch file
    pub fn from_json_file(path: &Path) -> Result<Self, VocabularyError> {
        let raw = std::fs::read_to_string(path).map_err(|source| VocabularyError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut set: VocabularySet =
            serde_json::from_str(&raw).map_err(|source| VocabularyError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let escapes_root = set
            .directory
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes_root {
            return Err(VocabularyError::UnsafeDirectory(set.directory));
        }
        set.source = Some(path.to_path_buf());

        tracing::debug!(
            path = %path.display(),
            set = %set.name,
            items = set.items.len(),
            "Vocabulary set loaded from file"
        );

        Ok(set)
    }

    /// Items with the set-level language applied where the item leaves it unset
    pub fn resolved_items(&self) -> Vec<VocabularyItem> {
        self.items
            .iter()
            .cloned()
            .map(|mut item| {
                if item.language.is_none() {
                    item.language = self.language.clone();
                }
                item
            })
            .collect()
    }

    /// Keep only the named identifiers, in set order.
    ///
    /// Returns the requested identifiers that are not part of this set, each
    /// once, in request order.
    pub fn retain_only(&mut self, ids: &[String]) -> Vec<String> {
        let wanted: HashSet<&str> = ids.iter().map(String::as_str).collect();
        let present: HashSet<String> = self.items.iter().map(|i| i.id.clone()).collect();

        self.items.retain(|item| wanted.contains(item.id.as_str()));

        let mut reported: HashSet<&String> = HashSet::new();
        ids.iter()
            .filter(|id| !present.contains(id.as_str()))
            .filter(|id| reported.insert(*id))
            .cloned()
            .collect()
    }
}
