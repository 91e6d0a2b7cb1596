//! End-to-end searches driven through wire parameters.

use crate::{Evaluator, EvaluatorConfig, Lexicon};
use synsem_query::{roles, ClassMember, Language, SearchParams, Version};

fn member(id: &str, lemma: &str, lang: Language, class_id: &str, labels: &[&str]) -> ClassMember {
    ClassMember {
        id: id.into(),
        lemma: lemma.into(),
        lang,
        class_id: class_id.into(),
        roles: roles(labels),
        cmnote: None,
        restrict: None,
    }
}

fn bring_lexicon() -> Lexicon {
    Lexicon::new().with_members(
        Version::V5_1,
        vec![
            member("ev-w1", "bring", Language::Eng, "vec00107", &["Actor", "Theme", "Goal"]),
            member("ev-w2", "bring up", Language::Eng, "vec00205", &["Actor", "Patient"]),
            member("pdt-1", "přinést", Language::Cz, "vec00107", &["Actor", "Theme"]),
            member("ev-w3", "bring", Language::Eng, "vec00310", &["Actor"]),
            member("gv-1", "bringen", Language::Deu, "vec00107", &["Actor", "Theme"]),
            member("pdt-2", "bring", Language::Cz, "vec00205", &["Patient"]),
        ],
    )
}

fn ids(evaluator: &Evaluator, query: &str) -> Vec<String> {
    evaluator
        .search(&SearchParams::from_query_string(query))
        .members()
        .map(|m| m.id.clone())
        .collect()
}

#[test]
fn test_lemma_languages_and_roles() {
    let evaluator = Evaluator::new(bring_lexicon());
    let params = SearchParams::from_query_string(
        "lemma=bring&filters=eng,cz&roles_cnf=%5B%5B%22Actor%22%5D%2C%5B%22Patient%22%2C%22Theme%22%5D%5D",
    );
    let response = evaluator.search(&params);

    let found: Vec<&str> = response.members().map(|m| m.id.as_str()).collect();
    assert_eq!(found, vec!["ev-w1", "ev-w2"]);
    assert_eq!(response.unique_common_id_count, 2);
    assert_eq!(
        response
            .groups()
            .map(|g| g.common_id.as_str())
            .collect::<Vec<_>>(),
        vec!["vec00107", "vec00205"]
    );
    assert!(!response.lang_counts.contains_key(&Language::Deu));
}

#[test]
fn test_exact_roles_require_subset_of_query_roles() {
    let lexicon = Lexicon::new().with_members(
        Version::V5_1,
        vec![
            member("m1", "go", Language::Eng, "vec1", &["A", "C"]),
            member("m2", "go", Language::Eng, "vec2", &["B", "C"]),
            member("m3", "go", Language::Eng, "vec3", &["A", "B", "C"]),
            member("m4", "go", Language::Eng, "vec4", &["A", "C", "D"]),
        ],
    );
    let evaluator = Evaluator::new(lexicon);
    let cnf = "roles_cnf=[[\"A\",\"B\"],[\"C\"]]";

    assert_eq!(ids(&evaluator, cnf), vec!["m1", "m2", "m3", "m4"]);
    assert_eq!(
        ids(&evaluator, &format!("{}&restrictRolesSearch=true", cnf)),
        vec!["m1", "m2", "m3"]
    );
}

#[test]
fn test_lemma_ignores_diacritics_unless_asked() {
    let lexicon = Lexicon::new().with_members(
        Version::V5_1,
        vec![member("f1", "café", Language::Spa, "vec9", &[])],
    );
    let evaluator = Evaluator::new(lexicon);

    assert_eq!(ids(&evaluator, "lemma=cafe"), vec!["f1"]);
    assert!(ids(&evaluator, "lemma=cafe&diacriticsSensitive=true").is_empty());
    assert_eq!(ids(&evaluator, "lemma=caf%C3%A9&diacriticsSensitive=true"), vec!["f1"]);
}

#[test]
fn test_malformed_roles_are_unconstrained() {
    let evaluator = Evaluator::new(bring_lexicon());
    let malformed = ids(&evaluator, "lemma=bring&roles_cnf=[[\"Actor\"");
    let plain = ids(&evaluator, "lemma=bring");
    assert_eq!(malformed, plain);
    assert_eq!(plain, vec!["ev-w1", "gv-1", "ev-w2", "pdt-2", "ev-w3"]);
}

#[test]
fn test_unknown_version_falls_back_to_default() {
    let evaluator = Evaluator::new(bring_lexicon());
    assert_eq!(
        ids(&evaluator, "lemma=bring&version=synsemclass9.9").len(),
        5
    );
}

#[test]
fn test_class_lookup_paginates_with_config() {
    let evaluator = Evaluator::with_config(bring_lexicon(), EvaluatorConfig::with_page_size(1));
    let response = evaluator.search(&SearchParams::from_query_string("classID=vec00"));
    assert_eq!(response.page_count(), 3);
    assert_eq!(response.total_class_members, 6);

    let all = evaluator.search(&SearchParams::from_query_string("classID=vec00&allResults=true"));
    assert_eq!(all.page_count(), 1);
    assert_eq!(all.groups().count(), 3);
}
