//! Scenario fixture files.
//!
//! A fixture is a TOML file with a small lexicon and a list of search cases:
//!
//! ```toml
//! title = "Lemma and role query"
//! page_size = 5
//!
//! [[members]]
//! id = "ev-w1"
//! lemma = "bring"
//! lang = "eng"
//! classId = "vec00107"
//! roles = ["Actor", "Theme"]
//!
//! [[cases]]
//! name = "actor and theme"
//! query = 'lemma=bring&roles_cnf=[["Actor"],["Theme"]]'
//! expect_members = ["ev-w1"]
//! ```
//!
//! A case gives its parameters either as a raw `query` string or as a
//! `[cases.params]` table keyed by wire names. Members default to the
//! `synsemclass5.1` version.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use synsem_evaluator::{Evaluator, EvaluatorConfig, Lexicon};
use synsem_query::{ClassMember, SearchParams, Version};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFixture {
    #[serde(default)]
    pub title: Option<String>,
    /// Overrides the evaluator page size.
    #[serde(default)]
    pub page_size: Option<usize>,
    #[serde(default)]
    pub members: Vec<FixtureMember>,
    #[serde(default)]
    pub cases: Vec<SearchCase>,
}

/// A lexicon entry together with the version it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureMember {
    #[serde(default)]
    pub version: Version,
    #[serde(flatten)]
    pub member: ClassMember,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchCase {
    pub name: String,
    /// Raw query string; takes precedence over `params`.
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub params: SearchParams,
    /// Member ids in result order.
    #[serde(default)]
    pub expect_members: Option<Vec<String>>,
    /// Common class ids in result order.
    #[serde(default)]
    pub expect_classes: Option<Vec<String>>,
    /// Number of groups on each page.
    #[serde(default)]
    pub expect_pages: Option<Vec<usize>>,
    /// Matching members per language code, e.g. `{ eng = 2, cz = 1 }`.
    #[serde(default)]
    pub expect_lang_members: Option<BTreeMap<String, usize>>,
}

impl SearchCase {
    pub fn search_params(&self) -> SearchParams {
        match &self.query {
            Some(query) => SearchParams::from_query_string(query),
            None => self.params.clone(),
        }
    }
}

impl SearchFixture {
    pub fn lexicon(&self) -> Lexicon {
        let mut lexicon = Lexicon::new();
        for entry in &self.members {
            lexicon.push(entry.version, entry.member.clone());
        }
        lexicon
    }

    pub fn evaluator(&self) -> Evaluator {
        let config = self
            .page_size
            .map(EvaluatorConfig::with_page_size)
            .unwrap_or_default();
        Evaluator::with_config(self.lexicon(), config)
    }

    pub fn case(&self, name: &str) -> Option<&SearchCase> {
        self.cases.iter().find(|case| case.name == name)
    }
}
