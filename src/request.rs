//! Search requests, lexicon versions and language filters.

use crate::errors::{QueryError, QueryResult};
use crate::CnfQuery;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A published SynSemClass lexicon version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Version {
    #[serde(rename = "synsemclass5.1")]
    V5_1,
    #[serde(rename = "synsemclass5.0")]
    V5_0,
    #[serde(rename = "synsemclass4.0")]
    V4_0,
}

impl Version {
    pub const ALL: [Version; 3] = [Version::V5_1, Version::V5_0, Version::V4_0];

    pub fn as_str(self) -> &'static str {
        match self {
            Version::V5_1 => "synsemclass5.1",
            Version::V5_0 => "synsemclass5.0",
            Version::V4_0 => "synsemclass4.0",
        }
    }

    /// Whether members in `language` exist in this version.
    ///
    /// Spanish was introduced after 4.0.
    pub fn supports(self, language: Language) -> bool {
        !(self == Version::V4_0 && language == Language::Spa)
    }

    /// Languages offered as filters for this version.
    pub fn languages(self) -> Vec<Language> {
        Language::ALL
            .iter()
            .copied()
            .filter(|language| self.supports(*language))
            .collect()
    }
}

impl Default for Version {
    fn default() -> Self {
        Version::V5_1
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Version {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::ALL
            .iter()
            .copied()
            .find(|version| version.as_str() == s.trim())
            .ok_or_else(|| QueryError::UnknownVersion(s.to_string()))
    }
}

/// Language of a class member, identified on the wire by a short code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Eng,
    Cz,
    Deu,
    Spa,
}

impl Language {
    pub const ALL: [Language; 4] = [Language::Eng, Language::Cz, Language::Deu, Language::Spa];

    pub fn code(self) -> &'static str {
        match self {
            Language::Eng => "eng",
            Language::Cz => "cz",
            Language::Deu => "deu",
            Language::Spa => "spa",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Language::Eng => "English",
            Language::Cz => "Czech",
            Language::Deu => "German",
            Language::Spa => "Spanish",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .iter()
            .copied()
            .find(|language| language.code() == s.trim())
            .ok_or_else(|| QueryError::UnknownLanguage(s.to_string()))
    }
}

/// One search submission.
///
/// A request is an immutable value: every `with_*` method returns a new
/// request. Changing the version drops language filters the new version
/// does not support, so an unsupported filter can never reach the wire.
///
/// ```
/// use synsem_query::{Language, SearchRequest, Version};
///
/// let request = SearchRequest::new()
///     .with_language(Language::Spa, true)
///     .with_version(Version::V4_0);
/// assert!(request.languages().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRequest {
    lemma: String,
    id_ref: String,
    class_id: String,
    cm_note: String,
    restrict: String,
    version: Version,
    languages: BTreeSet<Language>,
    diacritics_sensitive: bool,
    restrict_roles: bool,
    roles: CnfQuery,
    all_results: bool,
}

impl SearchRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request listing every member of one class.
    ///
    /// All other fields are left at their defaults.
    pub fn for_class(version: Version, class_id: impl Into<String>) -> Self {
        Self::new().with_version(version).with_class_id(class_id)
    }

    pub fn lemma(&self) -> &str {
        &self.lemma
    }

    pub fn id_ref(&self) -> &str {
        &self.id_ref
    }

    pub fn class_id(&self) -> &str {
        &self.class_id
    }

    pub fn cm_note(&self) -> &str {
        &self.cm_note
    }

    pub fn restrict(&self) -> &str {
        &self.restrict
    }

    pub fn version(&self) -> Version {
        self.version
    }

    /// Active language filters in wire order.
    pub fn languages(&self) -> &BTreeSet<Language> {
        &self.languages
    }

    pub fn diacritics_sensitive(&self) -> bool {
        self.diacritics_sensitive
    }

    pub fn restrict_roles(&self) -> bool {
        self.restrict_roles
    }

    pub fn roles(&self) -> &CnfQuery {
        &self.roles
    }

    pub fn all_results(&self) -> bool {
        self.all_results
    }

    pub fn with_lemma(self, lemma: impl Into<String>) -> Self {
        Self {
            lemma: lemma.into(),
            ..self
        }
    }

    pub fn with_id_ref(self, id_ref: impl Into<String>) -> Self {
        Self {
            id_ref: id_ref.into(),
            ..self
        }
    }

    pub fn with_class_id(self, class_id: impl Into<String>) -> Self {
        Self {
            class_id: class_id.into(),
            ..self
        }
    }

    pub fn with_cm_note(self, cm_note: impl Into<String>) -> Self {
        Self {
            cm_note: cm_note.into(),
            ..self
        }
    }

    pub fn with_restrict(self, restrict: impl Into<String>) -> Self {
        Self {
            restrict: restrict.into(),
            ..self
        }
    }

    /// Switch version, dropping filters the new version does not support.
    pub fn with_version(self, version: Version) -> Self {
        let languages = self
            .languages
            .iter()
            .copied()
            .filter(|language| version.supports(*language))
            .collect();
        Self {
            version,
            languages,
            ..self
        }
    }

    /// Toggle a language filter. Enabling an unsupported language is ignored.
    pub fn with_language(self, language: Language, enabled: bool) -> Self {
        let mut languages = self.languages.clone();
        if enabled && self.version.supports(language) {
            languages.insert(language);
        } else if !enabled {
            languages.remove(&language);
        }
        Self { languages, ..self }
    }

    pub fn with_languages<I>(self, languages: I) -> Self
    where
        I: IntoIterator<Item = Language>,
    {
        let version = self.version;
        let languages = languages
            .into_iter()
            .filter(|language| version.supports(*language))
            .collect();
        Self { languages, ..self }
    }

    pub fn with_diacritics_sensitive(self, diacritics_sensitive: bool) -> Self {
        Self {
            diacritics_sensitive,
            ..self
        }
    }

    pub fn with_restrict_roles(self, restrict_roles: bool) -> Self {
        Self {
            restrict_roles,
            ..self
        }
    }

    pub fn with_roles(self, roles: CnfQuery) -> Self {
        Self { roles, ..self }
    }

    pub fn with_all_results(self, all_results: bool) -> Self {
        Self {
            all_results,
            ..self
        }
    }

    /// Clear the five free-text fields, keeping version, flags and roles.
    pub fn without_text_fields(self) -> Self {
        Self {
            lemma: String::new(),
            id_ref: String::new(),
            class_id: String::new(),
            cm_note: String::new(),
            restrict: String::new(),
            ..self
        }
    }

    /// True when no free-text field is filled in and the role query is empty.
    pub fn is_empty(&self) -> bool {
        [
            &self.lemma,
            &self.id_ref,
            &self.class_id,
            &self.cm_note,
            &self.restrict,
        ]
        .iter()
        .all(|field| field.trim().is_empty())
            && self.roles.is_empty()
    }

    /// Check the request before submission.
    pub fn validate(&self) -> QueryResult<()> {
        if self.is_empty() {
            return Err(QueryError::EmptyQuery);
        }
        Ok(())
    }
}
