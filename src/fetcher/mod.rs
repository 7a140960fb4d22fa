//! Recipe fetching functionality.
//!
//! This module issues a single GET against the recipe host, decodes the
//! `{ "recipes": [...] }` envelope and validates the result. Every failure is
//! reported as one of the four [`FetchError`] cases; parser and transport
//! errors never leak past this module in any other shape.

use crate::config::{ConfigError, ServiceConfig};
use crate::model::{Recipe, RecipeResponse};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

mod preview;

pub use preview::PreviewRecipeService;

/// Errors that can occur when fetching recipes.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid recipe URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Unable to reach the recipe server: {0}")]
    Network(#[source] NetworkError),

    #[error("The recipe data is invalid or corrupted")]
    MalformedData,

    #[error("No recipes are available")]
    EmptyData,
}

/// Why a request never produced a usable response body.
#[derive(Error, Debug)]
pub enum NetworkError {
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("unexpected HTTP status {0}")]
    Status(StatusCode),
}

impl NetworkError {
    /// The HTTP status, when the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            NetworkError::Transport(e) => e.status(),
            NetworkError::Status(status) => Some(*status),
        }
    }
}

/// The case of a [`FetchError`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchErrorKind {
    InvalidUrl,
    Network,
    MalformedData,
    EmptyData,
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::InvalidUrl(_) => FetchErrorKind::InvalidUrl,
            FetchError::Network(_) => FetchErrorKind::Network,
            FetchError::MalformedData => FetchErrorKind::MalformedData,
            FetchError::EmptyData => FetchErrorKind::EmptyData,
        }
    }
}

/// Selects which fixed path on the recipe host to request.
///
/// Only [`Endpoint::Recipes`] serves real data; the other two deliberately
/// return broken payloads and exist to exercise error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Endpoint {
    #[default]
    Recipes,
    MalformedData,
    EmptyData,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Recipes => "/recipes.json",
            Endpoint::MalformedData => "/recipes-malformed.json",
            Endpoint::EmptyData => "/recipes-empty.json",
        }
    }
}

/// A source of recipe listings.
///
/// Front ends hold one of these and never care whether it talks to the
/// network or serves canned data.
#[async_trait]
pub trait RecipeProvider: Send + Sync {
    async fn fetch_recipes(&self, endpoint: Endpoint) -> Result<Vec<Recipe>, FetchError>;
}

/// Fetches recipes over HTTP.
///
/// Each call makes exactly one attempt. There is no retry, no caching and no
/// timeout beyond the HTTP client's own defaults.
///
/// # Examples
///
/// ```no_run
/// use fetch_recipes::{Endpoint, RecipeService, ServiceConfig};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let service = RecipeService::new(ServiceConfig::default())?;
/// let recipes = service.fetch(Endpoint::Recipes).await?;
/// println!("{} recipes", recipes.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RecipeService {
    client: Client,
    base_url: String,
}

impl RecipeService {
    /// Builds a service with its own HTTP client.
    pub fn new(config: ServiceConfig) -> Result<Self, ConfigError> {
        let client = Client::builder().user_agent(config.user_agent).build()?;
        Ok(Self::with_client(client, config.base_url))
    }

    /// Builds a service around an existing client, e.g. one shared by the app.
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        RecipeService {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for an endpoint.
    pub fn endpoint_url(&self, endpoint: Endpoint) -> Result<Url, FetchError> {
        let raw = format!("{}{}", self.base_url.trim_end_matches('/'), endpoint.path());
        Ok(Url::parse(&raw)?)
    }

    /// Fetches, decodes and validates the recipe list for `endpoint`.
    pub async fn fetch(&self, endpoint: Endpoint) -> Result<Vec<Recipe>, FetchError> {
        let url = self.endpoint_url(endpoint).inspect_err(|e| {
            warn!("Rejected recipe URL for {:?}: {e}", endpoint);
        })?;
        debug!("Requesting recipes from {url}");

        let body = self.get_body(url).await.map_err(|e| {
            warn!("Recipe request failed: {e}");
            FetchError::Network(e)
        })?;

        let recipes = decode_recipes(&body)?;
        info!("Fetched {} recipes", recipes.len());
        Ok(recipes)
    }

    /// Anything but a 2xx answer is a failure, including redirects reqwest
    /// did not follow and `304 Not Modified`.
    async fn get_body(&self, url: Url) -> Result<Vec<u8>, NetworkError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::Status(status));
        }
        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl RecipeProvider for RecipeService {
    async fn fetch_recipes(&self, endpoint: Endpoint) -> Result<Vec<Recipe>, FetchError> {
        self.fetch(endpoint).await
    }
}

/// Decodes a response body and checks every recipe is usable.
///
/// The list must be non-empty and every record needs a non-empty name and
/// cuisine. One bad record fails the whole payload.
pub(crate) fn decode_recipes(body: &[u8]) -> Result<Vec<Recipe>, FetchError> {
    let response: RecipeResponse = serde_json::from_slice(body).map_err(|e| {
        debug!("Recipe payload did not decode: {e}");
        FetchError::MalformedData
    })?;

    if response.recipes.is_empty() {
        warn!("Recipe payload contained no recipes");
        return Err(FetchError::EmptyData);
    }

    if let Some(invalid) = response.recipes.iter().find(|r| !r.has_required_fields()) {
        warn!("Recipe {} is missing a name or cuisine", invalid.id());
        return Err(FetchError::MalformedData);
    }

    Ok(response.recipes)
}
