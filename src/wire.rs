//! Wire form of a search request.
//!
//! [`SearchParams`] mirrors the query-string parameters of the search
//! endpoint one-to-one. Every value is a string: flags are the literals
//! `"true"`/`"false"`, language filters are comma-joined codes and the role
//! query is JSON.
//!
//! Decoding back into a [`SearchRequest`] is lenient. A missing, null or
//! malformed `roles_cnf` payload means "no role constraint", an unknown
//! version falls back to the default, and unknown language codes are
//! dropped. None of these abort a request.

use crate::{CnfQuery, Language, SearchRequest, Version};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Parameter names in the order they are emitted.
pub const PARAM_ORDER: [&str; 11] = [
    "lemma",
    "idRef",
    "classID",
    "cmnote",
    "restrict",
    "filters",
    "roles_cnf",
    "version",
    "restrictRolesSearch",
    "diacriticsSensitive",
    "allResults",
];

/// Raw search parameters as sent over the network.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    pub lemma: String,
    #[serde(rename = "idRef")]
    pub id_ref: String,
    #[serde(rename = "classID")]
    pub class_id: String,
    pub cmnote: String,
    pub restrict: String,
    pub filters: String,
    pub roles_cnf: String,
    pub version: String,
    #[serde(rename = "restrictRolesSearch")]
    pub restrict_roles_search: String,
    #[serde(rename = "diacriticsSensitive")]
    pub diacritics_sensitive: String,
    #[serde(rename = "allResults")]
    pub all_results: String,
}

/// Encode a flag the way the wire expects it.
pub fn format_flag(value: bool) -> String {
    let literal = if value { "true" } else { "false" };
    literal.to_string()
}

/// Only the literal `"true"` is true.
pub fn parse_flag(value: &str) -> bool {
    value.trim() == "true"
}

impl SearchParams {
    /// Look up a parameter by its wire name.
    pub fn get(&self, key: &str) -> Option<&str> {
        let value = match key {
            "lemma" => &self.lemma,
            "idRef" => &self.id_ref,
            "classID" => &self.class_id,
            "cmnote" => &self.cmnote,
            "restrict" => &self.restrict,
            "filters" => &self.filters,
            "roles_cnf" => &self.roles_cnf,
            "version" => &self.version,
            "restrictRolesSearch" => &self.restrict_roles_search,
            "diacriticsSensitive" => &self.diacritics_sensitive,
            "allResults" => &self.all_results,
            _ => return None,
        };
        Some(value.as_str())
    }

    fn slot_mut(&mut self, key: &str) -> Option<&mut String> {
        let slot = match key {
            "lemma" => &mut self.lemma,
            "idRef" => &mut self.id_ref,
            "classID" => &mut self.class_id,
            "cmnote" => &mut self.cmnote,
            "restrict" => &mut self.restrict,
            "filters" => &mut self.filters,
            "roles_cnf" => &mut self.roles_cnf,
            "version" => &mut self.version,
            "restrictRolesSearch" => &mut self.restrict_roles_search,
            "diacriticsSensitive" => &mut self.diacritics_sensitive,
            "allResults" => &mut self.all_results,
            _ => return None,
        };
        Some(slot)
    }

    /// Parameters in [`PARAM_ORDER`]. `allResults` is only emitted when set.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, &str)> {
        PARAM_ORDER
            .iter()
            .filter_map(|key| self.get(key).map(|value| (*key, value)))
            .filter(|(key, value)| *key != "allResults" || !value.is_empty())
            .collect()
    }

    /// Percent-encoded query string, suitable for a shareable URL.
    pub fn to_query_string(&self) -> String {
        self.to_query_pairs()
            .into_iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Build parameters from decoded key/value pairs. Unknown keys are
    /// ignored and a repeated key keeps its last value.
    pub fn from_query_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            match params.slot_mut(key.as_ref()) {
                Some(slot) => *slot = value.into(),
                None => tracing::debug!(key = key.as_ref(), "ignoring unknown search parameter"),
            }
        }
        params
    }

    /// Parse a raw query string (with or without a leading `?`).
    pub fn from_query_string(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                (decode_component(key), decode_component(value))
            });
        Self::from_query_pairs(pairs)
    }

    /// Whether any parameter that drives a search is present.
    ///
    /// Filters, version and flags alone do not trigger a search.
    pub fn has_main_field(&self) -> bool {
        [
            &self.lemma,
            &self.id_ref,
            &self.class_id,
            &self.cmnote,
            &self.restrict,
        ]
        .iter()
        .any(|field| !field.trim().is_empty())
            || !parse_roles_lenient(&self.roles_cnf).is_empty()
    }

    /// Decode into a request without failing.
    pub fn to_request(&self) -> SearchRequest {
        let version = if self.version.trim().is_empty() {
            Version::default()
        } else {
            self.version.parse::<Version>().unwrap_or_else(|err| {
                tracing::warn!(%err, "falling back to the default lexicon version");
                Version::default()
            })
        };

        SearchRequest::new()
            .with_version(version)
            .with_lemma(self.lemma.clone())
            .with_id_ref(self.id_ref.clone())
            .with_class_id(self.class_id.clone())
            .with_cm_note(self.cmnote.clone())
            .with_restrict(self.restrict.clone())
            .with_languages(parse_filters(&self.filters))
            .with_roles(parse_roles_lenient(&self.roles_cnf))
            .with_restrict_roles(parse_flag(&self.restrict_roles_search))
            .with_diacritics_sensitive(parse_flag(&self.diacritics_sensitive))
            .with_all_results(parse_flag(&self.all_results))
    }
}

impl From<&SearchRequest> for SearchParams {
    fn from(request: &SearchRequest) -> Self {
        Self {
            lemma: request.lemma().to_string(),
            id_ref: request.id_ref().to_string(),
            class_id: request.class_id().to_string(),
            cmnote: request.cm_note().to_string(),
            restrict: request.restrict().to_string(),
            filters: request
                .languages()
                .iter()
                .filter(|language| request.version().supports(**language))
                .map(|language| language.code())
                .collect::<Vec<_>>()
                .join(","),
            roles_cnf: request.roles().to_json(),
            version: request.version().as_str().to_string(),
            restrict_roles_search: format_flag(request.restrict_roles()),
            diacritics_sensitive: format_flag(request.diacritics_sensitive()),
            all_results: if request.all_results() {
                format_flag(true)
            } else {
                String::new()
            },
        }
    }
}

impl From<SearchRequest> for SearchParams {
    fn from(request: SearchRequest) -> Self {
        Self::from(&request)
    }
}

/// Parse comma-joined language codes, dropping unknown ones.
pub fn parse_filters(filters: &str) -> Vec<Language> {
    filters
        .split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .filter_map(|code| match code.parse::<Language>() {
            Ok(language) => Some(language),
            Err(err) => {
                tracing::warn!(%err, "dropping language filter");
                None
            }
        })
        .collect()
}

/// Parse a `roles_cnf` payload, treating anything unusable as unconstrained.
pub fn parse_roles_lenient(payload: &str) -> CnfQuery {
    match CnfQuery::from_json(payload) {
        Ok(cnf) => cnf,
        Err(err) => {
            tracing::warn!(%err, "ignoring roles_cnf payload");
            CnfQuery::empty()
        }
    }
}

fn decode_component(raw: &str) -> String {
    let spaced: Cow<'_, str> = if raw.contains('+') {
        Cow::Owned(raw.replace('+', " "))
    } else {
        Cow::Borrowed(raw)
    };
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced.into_owned(),
    }
}
