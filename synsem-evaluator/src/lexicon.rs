//! In-memory lexicon data.
//!
//! Storage and indexing belong to the deployment; the evaluator only needs
//! something that can list the class members of a version. [`MemberSource`]
//! is that seam and [`Lexicon`] is the in-memory implementation used for
//! embedding and tests.

use crate::errors::{EvaluatorError, EvaluatorResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use synsem_query::{ClassMember, Version};

/// Anything that can list the class members of a lexicon version.
pub trait MemberSource: Send + Sync {
    /// Members of `version` in storage order.
    fn members(&self, version: Version) -> &[ClassMember];
}

/// Class members of every loaded version.
///
/// The JSON form maps version identifiers to member lists:
///
/// ```json
/// { "synsemclass5.1": [ { "id": "...", "lemma": "bring", "lang": "eng",
///                         "classId": "vec00107", "roles": ["Actor"] } ] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Lexicon {
    versions: BTreeMap<Version, Vec<ClassMember>>,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the members of `version`.
    pub fn with_members(mut self, version: Version, members: Vec<ClassMember>) -> Self {
        self.versions.insert(version, members);
        self
    }

    pub fn push(&mut self, version: Version, member: ClassMember) {
        self.versions.entry(version).or_default().push(member);
    }

    pub fn from_json_str(input: &str) -> EvaluatorResult<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Load a lexicon from a JSON file.
    pub fn load(path: &Path) -> EvaluatorResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| EvaluatorError::Load {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&content)
    }

    pub fn versions(&self) -> impl Iterator<Item = Version> + '_ {
        self.versions.keys().copied()
    }
}

impl MemberSource for Lexicon {
    fn members(&self, version: Version) -> &[ClassMember] {
        self.versions
            .get(&version)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use synsem_query::Language;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"{
        "synsemclass5.1": [
            {"id": "ev-w1", "lemma": "bring", "lang": "eng", "classId": "vec00107",
             "roles": ["Theme", "Actor"]},
            {"id": "pdt-1", "lemma": "přinést", "lang": "cz", "classId": "vec00107",
             "roles": ["Actor", "Goal"], "cmnote": "idiom"}
        ],
        "synsemclass4.0": []
    }"#;

    #[test]
    fn test_from_json() {
        let lexicon = Lexicon::from_json_str(SAMPLE).unwrap();
        let members = lexicon.members(Version::V5_1);
        assert_eq!(members.len(), 2);
        assert_eq!(members[1].lang, Language::Cz);
        assert_eq!(members[1].cmnote.as_deref(), Some("idiom"));
        assert!(lexicon.members(Version::V4_0).is_empty());
        assert!(lexicon.members(Version::V5_0).is_empty());
        assert_eq!(
            lexicon.versions().collect::<Vec<_>>(),
            vec![Version::V5_1, Version::V4_0]
        );
    }

    #[test]
    fn test_invalid_json() {
        let err = Lexicon::from_json_str(r#"{"synsemclass5.1": [{"id": 1}]}"#).unwrap_err();
        assert!(matches!(err, EvaluatorError::Lexicon(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", SAMPLE).unwrap();
        let lexicon = Lexicon::load(file.path()).unwrap();
        assert_eq!(lexicon.members(Version::V5_1).len(), 2);

        let missing = Lexicon::load(Path::new("/nonexistent/lexicon.json")).unwrap_err();
        assert!(matches!(missing, EvaluatorError::Load { .. }));
    }
}
