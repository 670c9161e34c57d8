//! Domain service for flight offer lookups.
//!
//! The search state talks to the remote API only through
//! [`FlightSearchService`], so it can be driven by a stub.

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

use crate::models::{RawOffer, SearchCriteria};

/// Errors raised while exchanging client credentials for a token.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Token request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Token endpoint returned {status}: {body}")]
    Rejected { status: StatusCode, body: String },

    #[error("Failed to decode token response: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("Token response did not contain an access_token")]
    MissingToken,
}

/// Errors raised by a flight offers query.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Flight offers request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Flight offers endpoint returned {status}: {body}")]
    Rejected { status: StatusCode, body: String },

    #[error("Failed to decode flight offers: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("Invalid search request: {0}")]
    InvalidRequest(String),
}

impl SearchError {
    #[must_use]
    pub const fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }
}

#[async_trait]
pub trait FlightSearchService: Send + Sync {
    /// Runs one bounded offers query for `criteria`.
    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<RawOffer>, SearchError>;
}
