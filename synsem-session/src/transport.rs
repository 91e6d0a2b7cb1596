//! The search endpoint seam.
//!
//! A [`SearchTransport`] answers the two calls the session makes: a search
//! with wire parameters and the role vocabulary of a version. HTTP clients
//! live outside this crate; [`EvaluatorTransport`] answers in-process with
//! a [`synsem_evaluator::Evaluator`].

use crate::errors::TransportResult;
use async_trait::async_trait;
use std::sync::Arc;
use synsem_evaluator::{Evaluator, Lexicon, MemberSource};
use synsem_query::{Role, SearchParams, SearchResponse, Version};

#[async_trait]
pub trait SearchTransport: Send + Sync {
    async fn search(&self, params: &SearchParams) -> TransportResult<SearchResponse>;

    /// Ordered role labels of `version`.
    async fn shortlabels(&self, version: Version) -> TransportResult<Vec<Role>>;
}

pub type SharedTransport = Arc<dyn SearchTransport>;

/// Serves searches from an in-memory evaluator.
#[derive(Debug, Clone)]
pub struct EvaluatorTransport<S = Lexicon> {
    evaluator: Evaluator<S>,
}

impl<S: MemberSource> EvaluatorTransport<S> {
    pub fn new(evaluator: Evaluator<S>) -> Self {
        Self { evaluator }
    }

    pub fn evaluator(&self) -> &Evaluator<S> {
        &self.evaluator
    }
}

impl EvaluatorTransport<Lexicon> {
    pub fn from_lexicon(lexicon: Lexicon) -> Self {
        Self::new(Evaluator::new(lexicon))
    }
}

#[async_trait]
impl<S: MemberSource> SearchTransport for EvaluatorTransport<S> {
    async fn search(&self, params: &SearchParams) -> TransportResult<SearchResponse> {
        Ok(self.evaluator.search(params))
    }

    async fn shortlabels(&self, version: Version) -> TransportResult<Vec<Role>> {
        Ok(self.evaluator.shortlabels(version))
    }
}
