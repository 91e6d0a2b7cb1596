//! The client search session.
//!
//! A [`SearchSession`] owns the state behind the search form: one immutable
//! [`SearchRequest`] that is replaced wholesale on every edit, the
//! [`QueryBuilder`] holding the role query, and the [`ResultView`] shown to
//! the user.
//!
//! Submitting is split in three steps so that several searches can be in
//! flight at once:
//!
//! 1. [`SearchSession::prepare`] validates the request, draws a sequence
//!    number and returns a [`PendingSearch`].
//! 2. [`PendingSearch::execute`] talks to the transport, retrying transient
//!    failures until its token is cancelled.
//! 3. [`SearchSession::apply`] installs the outcome, unless a newer request
//!    was prepared meanwhile, in which case it is reported as
//!    [`Applied::Stale`] and dropped.
//!
//! [`SearchSession::submit`] runs all three in order.

use crate::config::SessionConfig;
use crate::errors::{SessionError, SessionResult, TransportError, TransportResult};
use crate::retry::RetryPolicy;
use crate::sequence::{CancellationToken, RequestSequence};
use crate::transport::{SearchTransport, SharedTransport};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use synsem_query::{
    ClassGroup, ClassMember, ExportDocument, QueryBuilder, Role, SearchParams, SearchRequest,
    SearchResponse, Version,
};

/// What the result area currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ResultView {
    #[default]
    Empty,
    Loaded(SearchResponse),
    /// The last search failed. The request and role query are untouched so
    /// the user can retry.
    Failed { message: String, retryable: bool },
}

impl ResultView {
    pub fn response(&self) -> Option<&SearchResponse> {
        match self {
            ResultView::Loaded(response) => Some(response),
            _ => None,
        }
    }
}

/// Outcome of [`SearchSession::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The view now reflects this search.
    Applied,
    /// A newer search was prepared; this outcome was discarded.
    Stale,
}

/// A validated search ready to run.
#[derive(Debug, Clone)]
pub struct PendingSearch {
    seq: u64,
    token: CancellationToken,
    params: SearchParams,
}

impl PendingSearch {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub async fn execute(
        self,
        transport: &dyn SearchTransport,
        retry: &RetryPolicy,
    ) -> CompletedSearch {
        let params = &self.params;
        let outcome = retry
            .run(&self.token, |_| transport.search(params))
            .await;
        CompletedSearch {
            seq: self.seq,
            outcome,
        }
    }
}

/// A finished search waiting to be applied.
#[derive(Debug, Clone)]
pub struct CompletedSearch {
    pub seq: u64,
    pub outcome: TransportResult<SearchResponse>,
}

pub struct SearchSession {
    transport: SharedTransport,
    config: SessionConfig,
    request: SearchRequest,
    builder: QueryBuilder,
    sequence: RequestSequence,
    view: ResultView,
    page: usize,
    vocabulary: BTreeMap<Version, Vec<Role>>,
}

impl SearchSession {
    pub fn new(transport: SharedTransport, config: SessionConfig) -> Self {
        let request = SearchRequest::new().with_version(config.default_version);
        Self {
            transport,
            config,
            request,
            builder: QueryBuilder::new(),
            sequence: RequestSequence::new(),
            view: ResultView::Empty,
            page: 0,
            vocabulary: BTreeMap::new(),
        }
    }

    pub fn with_transport<T>(transport: T) -> Self
    where
        T: SearchTransport + 'static,
    {
        Self::new(Arc::new(transport), SessionConfig::default())
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The form fields. Roles live in [`SearchSession::builder`].
    pub fn request(&self) -> &SearchRequest {
        &self.request
    }

    pub fn builder(&self) -> &QueryBuilder {
        &self.builder
    }

    pub fn builder_mut(&mut self) -> &mut QueryBuilder {
        &mut self.builder
    }

    pub fn view(&self) -> &ResultView {
        &self.view
    }

    /// Replace the form fields wholesale.
    pub fn set_request(&mut self, request: SearchRequest) {
        self.request = request;
    }

    /// Derive a new request from the current one and install it.
    ///
    /// ```ignore
    /// session.update(|request| request.with_lemma("bring"));
    /// ```
    pub fn update<F>(&mut self, edit: F)
    where
        F: FnOnce(SearchRequest) -> SearchRequest,
    {
        let current = std::mem::take(&mut self.request);
        self.request = edit(current);
    }

    /// The request that would be submitted now, roles included.
    pub fn current_request(&self) -> SearchRequest {
        self.request.clone().with_roles(self.builder.to_cnf())
    }

    /// Query string reproducing the current form.
    pub fn share_query_string(&self) -> String {
        SearchParams::from(&self.current_request()).to_query_string()
    }

    /// Validate the current form and reserve a sequence number for it.
    ///
    /// Preparing a search cancels every search prepared before it.
    pub fn prepare(&mut self) -> SessionResult<PendingSearch> {
        let request = self.current_request();
        request.validate()?;
        self.builder.validate()?;

        let seq = self.sequence.next_seq();
        let params = SearchParams::from(&request);
        tracing::debug!(seq, query = %params.to_query_string(), "search prepared");
        Ok(PendingSearch {
            seq,
            token: self.sequence.token(seq),
            params,
        })
    }

    /// Install a finished search if it is still the latest one.
    pub fn apply(&mut self, completed: CompletedSearch) -> Applied {
        if !self.sequence.is_latest(completed.seq) {
            tracing::debug!(
                seq = completed.seq,
                latest = self.sequence.current(),
                "discarding stale search response"
            );
            return Applied::Stale;
        }

        match completed.outcome {
            Ok(response) => {
                self.view = ResultView::Loaded(response);
                self.page = 0;
            }
            Err(TransportError::Cancelled) => return Applied::Stale,
            Err(err) => {
                tracing::error!(seq = completed.seq, %err, "search failed");
                self.view = ResultView::Failed {
                    message: err.to_string(),
                    retryable: err.is_transient(),
                };
            }
        }
        Applied::Applied
    }

    /// Prepare, execute and apply the current form.
    ///
    /// An empty form is rejected with [`SessionError::EmptyQuery`] before
    /// the transport is called. Transport failures do not return an error:
    /// they end up in [`ResultView::Failed`].
    pub async fn submit(&mut self) -> SessionResult<Applied> {
        let pending = self.prepare()?;
        let transport = Arc::clone(&self.transport);
        let completed = pending.execute(transport.as_ref(), &self.config.retry).await;
        Ok(self.apply(completed))
    }

    /// Show every member of one class, replacing the whole form.
    pub async fn fetch_class_members(&mut self, class_id: &str) -> SessionResult<Applied> {
        self.request = SearchRequest::for_class(self.request.version(), class_id);
        self.builder.clear();
        self.submit().await
    }

    /// Turn a member's roles into the role query and clear the text fields.
    pub fn fill_roles(&mut self, member: &ClassMember) {
        self.builder = QueryBuilder::from_roles(member.roles.iter().cloned());
        self.update(SearchRequest::without_text_fields);
    }

    /// Reset the form and results, cancelling any search in flight.
    ///
    /// The selected lexicon version is kept.
    pub fn clear_all(&mut self) {
        self.sequence.cancel_all();
        self.request = SearchRequest::new().with_version(self.request.version());
        self.builder.clear();
        self.view = ResultView::Empty;
        self.page = 0;
    }

    /// Restore the form from a shared query string.
    ///
    /// Searches right away when a main field is present and returns `None`
    /// otherwise.
    pub async fn restore_from_query_string(
        &mut self,
        query: &str,
    ) -> SessionResult<Option<Applied>> {
        let params = SearchParams::from_query_string(query);
        let request = params.to_request();
        self.builder = QueryBuilder::from_cnf(request.roles());
        self.request = request;

        if !params.has_main_field() {
            return Ok(None);
        }
        self.submit().await.map(Some)
    }

    /// Role vocabulary of `version`, fetched once and cached.
    pub async fn load_vocabulary(&mut self, version: Version) -> SessionResult<&[Role]> {
        if !self.vocabulary.contains_key(&version) {
            let transport = Arc::clone(&self.transport);
            let labels = self
                .config
                .retry
                .run(&CancellationToken::noop(), |_| transport.shortlabels(version))
                .await?;
            tracing::debug!(%version, count = labels.len(), "role vocabulary loaded");
            self.vocabulary.insert(version, labels);
        }
        Ok(self
            .vocabulary
            .get(&version)
            .map(Vec::as_slice)
            .unwrap_or_default())
    }

    /// Number of result pages currently loaded.
    pub fn page_count(&self) -> usize {
        self.view.response().map_or(0, SearchResponse::page_count)
    }

    pub fn current_page(&self) -> usize {
        self.page
    }

    /// Move to another loaded page. Out-of-range pages are refused.
    pub fn set_page(&mut self, page: usize) -> bool {
        if page >= self.page_count() {
            return false;
        }
        self.page = page;
        true
    }

    /// Class groups on the current page.
    pub fn page_groups(&self) -> &[ClassGroup] {
        self.view
            .response()
            .and_then(|response| response.page(self.page))
            .unwrap_or_default()
    }

    /// Fetch the full, unpaged result set of the current form as JSON.
    pub async fn export(&self) -> SessionResult<ExportDocument> {
        let request = self.current_request();
        request.validate()?;
        let params = SearchParams::from(&request);
        let unpaged = SearchParams::from(&request.with_all_results(true));

        let transport = Arc::clone(&self.transport);
        let response = self
            .config
            .retry
            .run(&CancellationToken::noop(), |_| transport.search(&unpaged))
            .await?;
        Ok(ExportDocument::new(&params, &response)?)
    }

    /// Export into `dir`, returning the path written.
    pub async fn save_export(&self, dir: &Path) -> SessionResult<PathBuf> {
        let document = self.export().await?;
        let path = dir.join(&document.file_name);
        fs::write(&path, &document.body).map_err(|e| SessionError::Export {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(path)
    }
}
