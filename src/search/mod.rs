use async_trait::async_trait;
use thiserror::Error;

use crate::models::ResultSet;
use crate::request::{HttpError, ResponseErrorContext};

pub use client::{SearchClient, PAGE_SIZE};
pub use query::{SearchQuery, FALLBACK_QUERY};

pub mod client;
mod query;

/// Terminal outcome of a single search that did not produce a [ResultSet]
#[derive(Error, Debug)]
pub enum SearchFailure {
    #[error("Could not reach the search endpoint")]
    Network(#[source] reqwest::Error),
    #[error("Search endpoint answered {}", .0.code)]
    Status(ResponseErrorContext),
    #[error("Search endpoint sent a body that isn't a list of hits")]
    Decode(ResponseErrorContext),
}

impl SearchFailure {
    /// The request never got a response back
    pub fn is_network(&self) -> bool {
        matches!(self, SearchFailure::Network(_))
    }

    /// A response came back but its payload was unusable
    pub fn is_decode(&self) -> bool {
        matches!(self, SearchFailure::Decode(_))
    }
}

impl From<HttpError> for SearchFailure {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::ReqwestError(err) => SearchFailure::Network(err),
            HttpError::FailStatus(context) => SearchFailure::Status(context),
            HttpError::UnexpectedBody(context) => SearchFailure::Decode(context),
        }
    }
}

/// Anything that can turn a settled query into a page of photos
#[async_trait]
pub trait PhotoSearch: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> Result<ResultSet, SearchFailure>;
}
