//! Client-side search session for SynSemClass.
//!
//! The session keeps the search form as one immutable request, owns the
//! role query builder, and submits through a [`SearchTransport`]. Responses
//! are guarded by a request sequence so that a slow, older search never
//! overwrites a newer one, and in-flight searches can be cancelled.
//!
//! ## Usage
//!
//! ```
//! use synsem_evaluator::Lexicon;
//! use synsem_session::{EvaluatorTransport, ResultView, SearchSession};
//!
//! # tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap().block_on(async {
//! let mut session = SearchSession::with_transport(EvaluatorTransport::from_lexicon(Lexicon::new()));
//! session.update(|request| request.with_lemma("bring"));
//! session.submit().await.unwrap();
//! assert!(matches!(session.view(), ResultView::Loaded(_)));
//! # });
//! ```

pub mod config;
pub mod errors;
pub mod retry;
pub mod sequence;
pub mod session;
pub mod transport;

pub use config::SessionConfig;
pub use errors::{SessionError, SessionResult, TransportError, TransportResult};
pub use retry::RetryPolicy;
pub use sequence::{CancellationToken, RequestSequence};
pub use session::{Applied, CompletedSearch, PendingSearch, ResultView, SearchSession};
pub use transport::{EvaluatorTransport, SearchTransport, SharedTransport};
