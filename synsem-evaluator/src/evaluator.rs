//! The search evaluator.
//!
//! Given raw [`SearchParams`], the evaluator decodes them leniently,
//! compiles a [`MemberFilter`], keeps every member that passes, groups the
//! survivors by common class identifier and paginates the groups.
//!
//! ## Usage
//!
//! ```
//! use synsem_evaluator::{Evaluator, Lexicon};
//! use synsem_query::{ClassMember, Language, SearchParams, Version};
//!
//! let lexicon = Lexicon::new().with_members(
//!     Version::V5_1,
//!     vec![ClassMember {
//!         id: "ev-w1".into(),
//!         lemma: "bring".into(),
//!         lang: Language::Eng,
//!         class_id: "vec00107".into(),
//!         roles: synsem_query::roles(&["Actor", "Theme"]),
//!         cmnote: None,
//!         restrict: None,
//!     }],
//! );
//! let evaluator = Evaluator::new(lexicon);
//!
//! let params = SearchParams::from_query_string("lemma=bring&roles_cnf=[[\"Actor\"]]");
//! let response = evaluator.search(&params);
//! assert_eq!(response.total_class_members, 1);
//! assert_eq!(response.unique_common_id_count, 1);
//! ```

use crate::config::EvaluatorConfig;
use crate::filters::MemberFilter;
use crate::lexicon::{Lexicon, MemberSource};
use std::collections::{BTreeMap, HashMap, HashSet};
use synsem_query::{
    ClassGroup, ClassMember, LangCount, Language, Role, SearchParams, SearchRequest,
    SearchResponse, Version,
};

/// Evaluates searches against a [`MemberSource`].
#[derive(Debug, Clone)]
pub struct Evaluator<S = Lexicon> {
    source: S,
    config: EvaluatorConfig,
}

impl<S: MemberSource> Evaluator<S> {
    pub fn new(source: S) -> Self {
        Self::with_config(source, EvaluatorConfig::default())
    }

    pub fn with_config(source: S, config: EvaluatorConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Evaluate raw wire parameters. Never fails.
    pub fn search(&self, params: &SearchParams) -> SearchResponse {
        self.search_request(&params.to_request())
    }

    /// Evaluate a decoded request.
    pub fn search_request(&self, request: &SearchRequest) -> SearchResponse {
        let filter = MemberFilter::from_request(request);
        let members = self.source.members(request.version());

        let matched: Vec<&ClassMember> = members
            .iter()
            .filter(|member| filter.matches(member))
            .collect();

        let groups = group_by_class(&matched);
        let response = SearchResponse {
            unique_common_id_count: groups.len(),
            total_class_members: matched.len(),
            lang_counts: lang_counts(&matched),
            pages: self.paginate(groups, request.all_results()),
        };

        tracing::debug!(
            version = %request.version(),
            scanned = members.len(),
            matched = response.total_class_members,
            classes = response.unique_common_id_count,
            pages = response.pages.len(),
            "search evaluated"
        );

        response
    }

    /// Role labels offered for `version`.
    pub fn shortlabels(&self, version: Version) -> Vec<Role> {
        let mut labels: Vec<Role> = self
            .source
            .members(version)
            .iter()
            .flat_map(|member| member.roles.iter().cloned())
            .collect();
        labels.sort();
        labels.dedup();
        labels
    }

    fn paginate(&self, groups: Vec<ClassGroup>, all_results: bool) -> Vec<Vec<ClassGroup>> {
        if groups.is_empty() {
            return Vec::new();
        }
        if all_results {
            return vec![groups];
        }
        let page_size = self.config.effective_page_size();
        let mut pages = Vec::with_capacity(groups.len().div_ceil(page_size));
        let mut iter = groups.into_iter().peekable();
        while iter.peek().is_some() {
            pages.push(iter.by_ref().take(page_size).collect());
        }
        pages
    }
}

/// Group members by common class identifier, in order of first appearance.
///
/// Only matched members are passed in, so a class without any match never
/// forms a group.
fn group_by_class(matched: &[&ClassMember]) -> Vec<ClassGroup> {
    let mut groups: Vec<ClassGroup> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for member in matched {
        match index.get(member.class_id.as_str()) {
            Some(&idx) => groups[idx].members.push((*member).clone()),
            None => {
                index.insert(member.class_id.as_str(), groups.len());
                groups.push(ClassGroup {
                    common_id: member.class_id.clone(),
                    members: vec![(*member).clone()],
                });
            }
        }
    }

    groups
}

fn lang_counts(matched: &[&ClassMember]) -> BTreeMap<Language, LangCount> {
    let mut classes: BTreeMap<Language, HashSet<&str>> = BTreeMap::new();
    let mut counts: BTreeMap<Language, LangCount> = BTreeMap::new();

    for member in matched {
        counts.entry(member.lang).or_default().class_members += 1;
        classes
            .entry(member.lang)
            .or_default()
            .insert(member.class_id.as_str());
    }
    for (language, class_ids) in classes {
        if let Some(count) = counts.get_mut(&language) {
            count.common_classes = class_ids.len();
        }
    }

    counts
}
