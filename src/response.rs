//! Search results as returned by the search endpoint.

use crate::{Language, Role};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One sense belonging to a lexicon class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassMember {
    /// Sense identifier, e.g. `EngVallex-ID-ev-w122f2`.
    pub id: String,
    pub lemma: String,
    pub lang: Language,
    /// Common class identifier shared across languages, e.g. `vec00107`.
    pub class_id: String,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub cmnote: Option<String>,
    #[serde(default)]
    pub restrict: Option<String>,
}

/// Matching members of one common class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassGroup {
    pub common_id: String,
    pub members: Vec<ClassMember>,
}

/// Per-language totals over the whole result set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LangCount {
    pub class_members: usize,
    pub common_classes: usize,
}

/// The response body of a search.
///
/// `pages` is already paginated: each page is a list of class groups. The
/// counts always describe the full result set, not the pages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub pages: Vec<Vec<ClassGroup>>,
    pub unique_common_id_count: usize,
    pub total_class_members: usize,
    pub lang_counts: BTreeMap<Language, LangCount>,
}

impl SearchResponse {
    pub fn is_empty(&self) -> bool {
        self.pages.iter().all(Vec::is_empty)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn page(&self, index: usize) -> Option<&[ClassGroup]> {
        self.pages.get(index).map(Vec::as_slice)
    }

    /// Every class group across all pages, in order.
    pub fn groups(&self) -> impl Iterator<Item = &ClassGroup> {
        self.pages.iter().flatten()
    }

    /// Every member across all pages, in order.
    pub fn members(&self) -> impl Iterator<Item = &ClassMember> {
        self.groups().flat_map(|group| group.members.iter())
    }

    /// One line per language, e.g. `3 English class member(s) in 2 class(es)`.
    pub fn summary_lines(&self) -> Vec<String> {
        self.lang_counts
            .iter()
            .map(|(language, count)| {
                format!(
                    "{} {} class member(s) in {} class(es)",
                    count.class_members,
                    language.name(),
                    count.common_classes
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: &str, lang: Language, class_id: &str) -> ClassMember {
        ClassMember {
            id: id.into(),
            lemma: "bring".into(),
            lang,
            class_id: class_id.into(),
            roles: crate::roles(&["Actor"]),
            cmnote: None,
            restrict: None,
        }
    }

    #[test]
    fn test_response_json_shape() {
        let mut lang_counts = BTreeMap::new();
        lang_counts.insert(
            Language::Eng,
            LangCount {
                class_members: 1,
                common_classes: 1,
            },
        );
        let response = SearchResponse {
            pages: vec![vec![ClassGroup {
                common_id: "vec00107".into(),
                members: vec![member("ev-w1", Language::Eng, "vec00107")],
            }]],
            unique_common_id_count: 1,
            total_class_members: 1,
            lang_counts,
        };

        let json = serde_json::to_string(&response).unwrap();
        insta::assert_snapshot!(json, @r###"{"pages":[[{"commonId":"vec00107","members":[{"id":"ev-w1","lemma":"bring","lang":"eng","classId":"vec00107","roles":["Actor"],"cmnote":null,"restrict":null}]}]],"uniqueCommonIdCount":1,"totalClassMembers":1,"langCounts":{"eng":{"classMembers":1,"commonClasses":1}}}"###);

        let back: SearchResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(back, response);
        assert_eq!(back.summary_lines(), vec!["1 English class member(s) in 1 class(es)"]);
    }

    #[test]
    fn test_empty_response() {
        let response = SearchResponse::default();
        assert!(response.is_empty());
        assert_eq!(response.page_count(), 0);
        assert!(response.page(0).is_none());
        assert_eq!(response.members().count(), 0);
    }
}
