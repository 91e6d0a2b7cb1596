//! Per-member filtering.
//!
//! A [`MemberFilter`] is compiled once per request and then applied to every
//! class member. Text fields are case-insensitive, unanchored regular
//! expressions; a pattern that fails to compile is searched for literally.
//! All filters combine with AND.

use crate::diacritics::expand_diacritics;
use regex::{Regex, RegexBuilder};
use std::collections::BTreeSet;
use synsem_query::{ClassMember, CnfQuery, Language, SearchRequest};
use unicode_normalization::UnicodeNormalization;

/// A compiled text filter.
#[derive(Debug, Clone)]
pub struct TextPattern {
    source: String,
    matcher: Matcher,
}

#[derive(Debug, Clone)]
enum Matcher {
    Regex(Regex),
    /// Lowercased needle for patterns that are not valid regexes.
    Literal(String),
}

impl TextPattern {
    /// Compile `pattern`. Blank patterns impose no constraint and yield
    /// `None`.
    pub fn compile(pattern: &str) -> Option<Self> {
        let source = pattern.trim();
        if source.is_empty() {
            return None;
        }
        let matcher = match RegexBuilder::new(source).case_insensitive(true).build() {
            Ok(regex) => Matcher::Regex(regex),
            Err(err) => {
                tracing::warn!(pattern = source, %err, "invalid pattern, searching literally");
                Matcher::Literal(source.to_lowercase())
            }
        };
        Some(Self {
            source: source.to_string(),
            matcher,
        })
    }

    /// Compile a lemma pattern, folding diacritics unless `sensitive`.
    /// The pattern is NFC-composed either way, matching how lemmas are stored.
    pub fn compile_lemma(pattern: &str, sensitive: bool) -> Option<Self> {
        if pattern.trim().is_empty() {
            None
        } else if sensitive {
            Self::compile(&pattern.nfc().collect::<String>())
        } else {
            Self::compile(&expand_diacritics(pattern.trim()))
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, text: &str) -> bool {
        match &self.matcher {
            Matcher::Regex(regex) => regex.is_match(text),
            Matcher::Literal(needle) => text.to_lowercase().contains(needle.as_str()),
        }
    }
}

/// Every constraint of one request, ready to test members against.
#[derive(Debug, Clone)]
pub struct MemberFilter {
    lemma: Option<TextPattern>,
    id_ref: Option<TextPattern>,
    class_id: Option<TextPattern>,
    cm_note: Option<TextPattern>,
    restrict: Option<TextPattern>,
    languages: BTreeSet<Language>,
    roles: CnfQuery,
    exact_roles: bool,
}

impl MemberFilter {
    pub fn from_request(request: &SearchRequest) -> Self {
        let version = request.version();
        Self {
            lemma: TextPattern::compile_lemma(request.lemma(), request.diacritics_sensitive()),
            id_ref: TextPattern::compile(request.id_ref()),
            class_id: TextPattern::compile(request.class_id()),
            cm_note: TextPattern::compile(request.cm_note()),
            restrict: TextPattern::compile(request.restrict()),
            languages: request
                .languages()
                .iter()
                .copied()
                .filter(|language| version.supports(*language))
                .collect(),
            roles: request.roles().clone(),
            exact_roles: request.restrict_roles(),
        }
    }

    /// Whether the role constraint alone accepts `member`.
    pub fn matches_roles(&self, member: &ClassMember) -> bool {
        self.roles.matches(&member.roles, self.exact_roles)
    }

    pub fn matches_language(&self, member: &ClassMember) -> bool {
        self.languages.is_empty() || self.languages.contains(&member.lang)
    }

    pub fn matches_text(&self, member: &ClassMember) -> bool {
        text_matches(&self.lemma, &member.lemma)
            && text_matches(&self.id_ref, &member.id)
            && text_matches(&self.class_id, &member.class_id)
            && text_matches(&self.cm_note, member.cmnote.as_deref().unwrap_or(""))
            && text_matches(&self.restrict, member.restrict.as_deref().unwrap_or(""))
    }

    pub fn matches(&self, member: &ClassMember) -> bool {
        self.matches_language(member) && self.matches_text(member) && self.matches_roles(member)
    }
}

fn text_matches(pattern: &Option<TextPattern>, text: &str) -> bool {
    pattern.as_ref().map_or(true, |pattern| pattern.is_match(text))
}
