use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::{AmadeusConfig, Credentials};
use crate::models::{FlightOffersResponse, RawOffer, SearchCriteria};
use crate::services::flight_service::{AuthError, FlightSearchService, SearchError};

const TOKEN_PATH: &str = "/v1/security/oauth2/token";
const FLIGHT_OFFERS_PATH: &str = "/v2/shopping/flight-offers";

/// Opaque bearer credential. Never expires as far as this crate knows.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
}

/// Lazily acquired client-credentials token, reused until [`reset`].
///
/// The lock is not held across the exchange, so two concurrent first calls
/// may both hit the auth endpoint; the later write wins.
///
/// [`reset`]: TokenCache::reset
pub struct TokenCache {
    client: Client,
    token_url: String,
    credentials: Credentials,
    token: RwLock<Option<AuthToken>>,
}

impl TokenCache {
    #[must_use]
    pub fn new(client: Client, base_url: &str, credentials: Credentials) -> Self {
        Self {
            client,
            token_url: format!("{}{TOKEN_PATH}", base_url.trim_end_matches('/')),
            credentials,
            token: RwLock::new(None),
        }
    }

    pub async fn get_token(&self) -> Result<AuthToken, AuthError> {
        if let Some(token) = self.token.read().await.clone() {
            return Ok(token);
        }

        let token = self.exchange().await?;
        *self.token.write().await = Some(token.clone());
        Ok(token)
    }

    pub async fn reset(&self) {
        *self.token.write().await = None;
    }

    pub async fn has_token(&self) -> bool {
        self.token.read().await.is_some()
    }

    async fn exchange(&self) -> Result<AuthToken, AuthError> {
        if self.credentials.is_empty() {
            warn!("Amadeus credentials are not set; token exchange will likely fail");
        }

        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
        ];

        debug!(url = %self.token_url, "Requesting Amadeus access token");

        let response = self
            .client
            .post(&self.token_url)
            .form(&params)
            .send()
            .await
            .map_err(AuthError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Rejected { status, body });
        }

        let body: TokenResponse = response.json().await.map_err(AuthError::Decode)?;

        let token = body
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingToken)?;

        info!("Obtained Amadeus access token");
        Ok(AuthToken(token))
    }
}

#[derive(Clone)]
pub struct AmadeusClient {
    client: Client,
    config: AmadeusConfig,
    tokens: Arc<TokenCache>,
}

impl AmadeusClient {
    /// Builds a client with its own token cache.
    #[must_use]
    pub fn new(config: AmadeusConfig) -> Self {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .unwrap_or_else(|_| Client::new());

        let tokens = Arc::new(TokenCache::new(
            client.clone(),
            &config.base_url,
            config.credentials.clone(),
        ));

        Self {
            client,
            config,
            tokens,
        }
    }

    /// Builds a client that shares an existing token cache.
    #[must_use]
    pub fn with_token_cache(config: AmadeusConfig, tokens: Arc<TokenCache>) -> Self {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            config,
            tokens,
        }
    }

    #[must_use]
    pub fn token_cache(&self) -> &Arc<TokenCache> {
        &self.tokens
    }

    fn offers_url(&self, criteria: &SearchCriteria) -> Result<Url, SearchError> {
        let base = format!(
            "{}{FLIGHT_OFFERS_PATH}",
            self.config.base_url.trim_end_matches('/')
        );
        let departure_date = criteria.departure_date.format("%Y-%m-%d").to_string();
        let adults = self.config.adults.to_string();
        let max = self.config.max_results.to_string();

        Url::parse_with_params(
            &base,
            [
                ("originLocationCode", criteria.origin.as_str()),
                ("destinationLocationCode", criteria.destination.as_str()),
                ("departureDate", departure_date.as_str()),
                ("adults", adults.as_str()),
                ("max", max.as_str()),
            ],
        )
        .map_err(|e| SearchError::InvalidRequest(e.to_string()))
    }

    pub async fn search_offers(
        &self,
        criteria: &SearchCriteria,
    ) -> Result<Vec<RawOffer>, SearchError> {
        let token = self.tokens.get_token().await?;
        let url = self.offers_url(criteria)?;

        debug!(
            origin = %criteria.origin,
            destination = %criteria.destination,
            date = %criteria.departure_date,
            "Searching flight offers"
        );

        let response = self
            .client
            .get(url)
            .bearer_auth(token.as_str())
            .send()
            .await
            .map_err(SearchError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Rejected { status, body });
        }

        let body: FlightOffersResponse = response.json().await.map_err(SearchError::Decode)?;

        debug!(count = body.data.len(), "Received flight offers");
        Ok(body.data)
    }
}

#[async_trait]
impl FlightSearchService for AmadeusClient {
    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<RawOffer>, SearchError> {
        self.search_offers(criteria).await
    }
}
