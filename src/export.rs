//! Downloadable JSON export of a full result set.

use crate::errors::QueryResult;
use crate::wire::{parse_roles_lenient, SearchParams, PARAM_ORDER};
use crate::SearchResponse;

/// A JSON document ready to be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    pub file_name: String,
    pub body: String,
}

impl ExportDocument {
    /// Serialize `response` and name it after `params`.
    pub fn new(params: &SearchParams, response: &SearchResponse) -> QueryResult<Self> {
        Ok(Self {
            file_name: export_file_name(params),
            body: serde_json::to_string(response)?,
        })
    }
}

/// Deterministic file name built from the active parameters.
///
/// Starts from `results`, appends `&key=value` for every non-empty
/// parameter in wire order and then turns the first `&` into `_`. The role
/// query is written as raw JSON, other values are percent-encoded. False
/// flags and `allResults` are left out.
///
/// ```
/// use synsem_query::{export_file_name, SearchParams, SearchRequest};
///
/// let params = SearchParams::from(&SearchRequest::new().with_lemma("bring"));
/// assert_eq!(
///     export_file_name(&params),
///     "results_lemma=bring&version=synsemclass5.1.json"
/// );
/// ```
pub fn export_file_name(params: &SearchParams) -> String {
    let mut name = String::from("results");
    for key in PARAM_ORDER.iter().filter(|key| **key != "allResults") {
        let value = params.get(key).unwrap_or_default();
        if value.is_empty() || value == "false" {
            continue;
        }
        if *key == "roles_cnf" {
            let cnf = parse_roles_lenient(value);
            if !cnf.is_empty() {
                name.push_str(&format!("&{}={}", key, cnf.to_json()));
            }
            continue;
        }
        name.push_str(&format!("&{}={}", key, encode_component(value)));
    }
    name.replacen('&', "_", 1) + ".json"
}

/// Percent-encode a value, leaving `! ' ( ) *` readable as browsers do for
/// URI components.
fn encode_component(value: &str) -> String {
    let mut encoded = urlencoding::encode(value).into_owned();
    for (escape, c) in [("%21", "!"), ("%27", "'"), ("%28", "("), ("%29", ")"), ("%2A", "*")] {
        encoded = encoded.replace(escape, c);
    }
    encoded
}
