//! Session behavior against in-process and scripted transports.

use crate::{
    Applied, EvaluatorTransport, ResultView, RetryPolicy, SearchSession, SearchTransport,
    SessionConfig, SessionError, TransportError, TransportResult,
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use synsem_evaluator::Lexicon;
use synsem_query::{roles, ClassMember, Language, Role, SearchParams, SearchResponse, Version};

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

fn lexicon() -> Lexicon {
    let mut members = vec![
        member("ev-w1", "bring", Language::Eng, "vec00107", &["Actor", "Theme"]),
        member("pdt-1", "přinést", Language::Cz, "vec00107", &["Actor", "Theme"]),
        member("ev-w2", "bring up", Language::Eng, "vec00205", &["Actor", "Patient"]),
        member("es-1", "traer", Language::Spa, "vec00107", &["Actor"]),
    ];
    for c in 0..7 {
        members.push(member(
            &format!("ev-x{}", c),
            "take",
            Language::Eng,
            &format!("vec1{:04}", c),
            &["Agent"],
        ));
    }
    Lexicon::new()
        .with_members(Version::V5_1, members)
        .with_members(
            Version::V4_0,
            vec![member("old-1", "bring", Language::Eng, "vec00107", &["Actor", "Goal"])],
        )
}

fn session() -> SearchSession {
    SearchSession::with_transport(EvaluatorTransport::from_lexicon(lexicon()))
}

fn quick_retry(max_attempts: u32) -> SessionConfig {
    SessionConfig {
        retry: RetryPolicy::new(max_attempts, Duration::from_millis(1), Duration::from_millis(2)),
        ..SessionConfig::default()
    }
}

/// Fails the first `failures` searches with `error`, then delegates.
struct Flaky {
    inner: EvaluatorTransport,
    failures: AtomicU32,
    error: TransportError,
    searches: AtomicU32,
}

impl Flaky {
    fn new(failures: u32, error: TransportError) -> Self {
        Self {
            inner: EvaluatorTransport::from_lexicon(lexicon()),
            failures: AtomicU32::new(failures),
            error,
            searches: AtomicU32::new(0),
        }
    }
}

#[async_trait]
impl SearchTransport for Flaky {
    async fn search(&self, params: &SearchParams) -> TransportResult<SearchResponse> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        let remaining = self.failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures.store(remaining - 1, Ordering::SeqCst);
            return Err(self.error.clone());
        }
        self.inner.search(params).await
    }

    async fn shortlabels(&self, version: Version) -> TransportResult<Vec<Role>> {
        self.inner.shortlabels(version).await
    }
}

fn loaded_ids(session: &SearchSession) -> Vec<String> {
    session
        .view()
        .response()
        .map(|response| response.members().map(|m| m.id.clone()).collect())
        .unwrap_or_default()
}

#[tokio::test]
async fn test_empty_form_is_rejected_locally() {
    let transport = Arc::new(Flaky::new(0, TransportError::Timeout));
    let mut session = SearchSession::new(transport.clone(), SessionConfig::default());
    session.update(|request| request.with_lemma("   "));

    let err = session.submit().await.unwrap_err();
    assert!(matches!(err, SessionError::EmptyQuery));
    assert_eq!(transport.searches.load(Ordering::SeqCst), 0);
    assert_eq!(session.view(), &ResultView::Empty);
}

#[tokio::test]
async fn test_submit_with_role_query() {
    let mut session = session();
    session.update(|request| {
        request
            .with_lemma("bring")
            .with_languages(vec![Language::Eng, Language::Cz])
    });
    let builder = session.builder_mut();
    builder.select_role(Role::from("Actor"));
    builder.select_role(Role::from("Patient"));
    builder.select_role(Role::from("Theme"));
    let second = builder.add_clause();
    builder.add_role_to_clause(second, Role::from("Patient"));
    builder.add_role_to_clause(second, Role::from("Theme"));

    assert_eq!(session.submit().await.unwrap(), Applied::Applied);
    assert_eq!(loaded_ids(&session), vec!["ev-w1", "ev-w2"]);
}

#[tokio::test]
async fn test_older_response_is_stale() {
    let mut session = session();
    let transport = EvaluatorTransport::from_lexicon(lexicon());
    let retry = RetryPolicy::none();

    session.update(|request| request.with_lemma("bring"));
    let first = session.prepare().unwrap();
    session.update(|request| request.with_lemma("take"));
    let second = session.prepare().unwrap();
    assert!(first.token().is_cancelled());

    let second_done = second.execute(&transport, &retry).await;
    let first_done = first.execute(&transport, &retry).await;

    assert_eq!(session.apply(second_done), Applied::Applied);
    assert_eq!(session.apply(first_done), Applied::Stale);
    assert_eq!(loaded_ids(&session).len(), 7);
}

#[tokio::test]
async fn test_cancelled_search_never_reaches_transport() {
    let flaky = Flaky::new(0, TransportError::Timeout);
    let mut session = session();
    session.update(|request| request.with_lemma("bring"));
    let pending = session.prepare().unwrap();
    session.clear_all();

    let done = pending.execute(&flaky, &RetryPolicy::none()).await;
    assert_eq!(done.outcome, Err(TransportError::Cancelled));
    assert_eq!(flaky.searches.load(Ordering::SeqCst), 0);
    assert_eq!(session.apply(done), Applied::Stale);
}

#[tokio::test]
async fn test_transient_failure_is_retried() {
    let transport = Arc::new(Flaky::new(2, TransportError::Timeout));
    let mut session = SearchSession::new(transport.clone(), quick_retry(3));
    session.update(|request| request.with_lemma("bring"));

    session.submit().await.unwrap();
    assert_eq!(transport.searches.load(Ordering::SeqCst), 3);
    assert_eq!(loaded_ids(&session).len(), 2);
}

#[tokio::test]
async fn test_failure_is_visible_and_recoverable() {
    let error = TransportError::Status {
        code: 400,
        message: "bad request".into(),
    };
    let transport = Arc::new(Flaky::new(1, error));
    let mut session = SearchSession::new(transport.clone(), quick_retry(3));
    session.update(|request| request.with_lemma("bring"));
    session.builder_mut().select_role(Role::from("Actor"));

    assert_eq!(session.submit().await.unwrap(), Applied::Applied);
    assert_eq!(transport.searches.load(Ordering::SeqCst), 1);
    assert_eq!(
        session.view(),
        &ResultView::Failed {
            message: "search service returned status 400: bad request".into(),
            retryable: false,
        }
    );
    assert_eq!(session.request().lemma(), "bring");
    assert_eq!(session.builder().to_readable_string(), "(Actor)");

    session.submit().await.unwrap();
    assert_eq!(loaded_ids(&session).len(), 2);
}

#[tokio::test]
async fn test_pages_follow_response() {
    let mut session = session();
    session.update(|request| request.with_class_id("vec"));
    session.submit().await.unwrap();

    assert_eq!(session.page_count(), 2);
    assert_eq!(session.page_groups().len(), 5);
    assert!(session.set_page(1));
    assert_eq!(session.page_groups().len(), 4);
    assert!(!session.set_page(2));
    assert_eq!(session.current_page(), 1);

    session.submit().await.unwrap();
    assert_eq!(session.current_page(), 0);
}

#[tokio::test]
async fn test_fetch_class_members_replaces_form() {
    let mut session = session();
    session.update(|request| request.with_lemma("bring").with_restrict_roles(true));
    session.builder_mut().select_role(Role::from("Patient"));

    session.fetch_class_members("vec00107").await.unwrap();
    assert_eq!(session.request().class_id(), "vec00107");
    assert_eq!(session.request().lemma(), "");
    assert!(!session.request().restrict_roles());
    assert!(session.builder().is_empty());
    assert_eq!(loaded_ids(&session), vec!["ev-w1", "pdt-1", "es-1"]);
}

#[test]
fn test_fill_roles_clears_text_fields() {
    let mut session = session();
    session.update(|request| request.with_lemma("bring").with_cm_note("idiom"));
    let source = member("ev-w1", "bring", Language::Eng, "vec00107", &["Actor", "Theme"]);

    session.fill_roles(&source);
    assert_eq!(session.request().lemma(), "");
    assert_eq!(session.request().cm_note(), "");
    assert_eq!(session.builder().to_readable_string(), "(Actor) AND (Theme)");
}

#[tokio::test]
async fn test_clear_all_keeps_version() {
    let mut session = session();
    session.update(|request| request.with_lemma("bring").with_version(Version::V4_0));
    session.builder_mut().select_role(Role::from("Actor"));
    session.submit().await.unwrap();
    assert_eq!(loaded_ids(&session), vec!["old-1"]);

    session.clear_all();
    assert_eq!(session.view(), &ResultView::Empty);
    assert_eq!(session.request().version(), Version::V4_0);
    assert!(session.request().is_empty());
    assert!(session.builder().is_empty());
}

#[tokio::test]
async fn test_share_and_restore_round_trip() {
    let mut original = session();
    original.update(|request| {
        request
            .with_lemma("bring")
            .with_languages(vec![Language::Eng])
            .with_restrict_roles(true)
    });
    let builder = original.builder_mut();
    builder.select_role(Role::from("Actor"));
    builder.select_role(Role::from("Theme"));
    let first = builder.clauses()[0].id();
    builder.add_role_to_clause(first, Role::from("Theme"));

    let query = original.share_query_string();
    insta::assert_snapshot!(query, @"lemma=bring&idRef=&classID=&cmnote=&restrict=&filters=eng&roles_cnf=%5B%5B%22Actor%22%2C%22Theme%22%5D%5D&version=synsemclass5.1&restrictRolesSearch=true&diacriticsSensitive=false");

    let mut restored = session();
    let applied = restored.restore_from_query_string(&query).await.unwrap();
    assert_eq!(applied, Some(Applied::Applied));
    assert_eq!(restored.current_request(), original.current_request());
    assert_eq!(restored.builder().to_readable_string(), "(Actor OR Theme)");
    assert_eq!(loaded_ids(&restored), vec!["ev-w1"]);
}

#[tokio::test]
async fn test_restore_without_main_field_does_not_search() {
    let mut session = session();
    let applied = session
        .restore_from_query_string("?version=synsemclass4.0&filters=eng")
        .await
        .unwrap();
    assert_eq!(applied, None);
    assert_eq!(session.request().version(), Version::V4_0);
    assert_eq!(session.view(), &ResultView::Empty);
}

#[tokio::test]
async fn test_spanish_is_never_sent_for_4_0() {
    let mut session = session();
    session.update(|request| {
        request
            .with_lemma("bring")
            .with_languages(vec![Language::Eng, Language::Spa])
            .with_version(Version::V4_0)
    });
    let pending = session.prepare().unwrap();
    assert_eq!(pending.params().filters, "eng");
}

#[tokio::test]
async fn test_vocabulary_is_cached_per_version() {
    let mut session = session();
    let labels = session.load_vocabulary(Version::V5_1).await.unwrap().to_vec();
    assert_eq!(labels, roles(&["Actor", "Agent", "Patient", "Theme"]));

    let old = session.load_vocabulary(Version::V4_0).await.unwrap();
    assert_eq!(old, roles(&["Actor", "Goal"]).as_slice());
}

#[tokio::test]
async fn test_export_is_unpaged() {
    let mut session = session();
    session.update(|request| request.with_class_id("vec"));

    let document = session.export().await.unwrap();
    assert_eq!(document.file_name, "results_classID=vec&version=synsemclass5.1.json");
    let response: SearchResponse = serde_json::from_str(&document.body).unwrap();
    assert_eq!(response.pages.len(), 1);
    assert_eq!(response.unique_common_id_count, 9);

    let dir = tempfile::tempdir().unwrap();
    let path = session.save_export(dir.path()).await.unwrap();
    assert_eq!(std::fs::read_to_string(path).unwrap(), document.body);
}
