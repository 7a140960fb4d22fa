//! UniFFI bindings for cross-platform support (iOS, Android).
//!
//! This module provides FFI-safe types and functions for use with UniFFI.
//! Identifiers and URLs cross the boundary as strings; errors are flattened
//! into [`FetchRecipesError`] with a readable message.

use crate::config::{ConfigError, ServiceConfig};
use crate::fetcher::{
    Endpoint, FetchError, FetchErrorKind, PreviewRecipeService, RecipeProvider, RecipeService,
};
use crate::list::RecipeListState;
use crate::search::{self, RecipeSections, SearchScope};
use crate::{LinkKind, Recipe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use url::Url;
use uuid::Uuid;

/// FFI-safe error type that wraps all possible errors.
#[derive(Debug, uniffi::Error, thiserror::Error)]
pub enum FetchRecipesError {
    #[error("Invalid URL: {message}")]
    InvalidUrl { message: String },

    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Malformed data: {message}")]
    MalformedData { message: String },

    #[error("Empty data: {message}")]
    EmptyData { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl From<FetchError> for FetchRecipesError {
    fn from(e: FetchError) -> Self {
        let message = e.to_string();
        match e.kind() {
            FetchErrorKind::InvalidUrl => FetchRecipesError::InvalidUrl { message },
            FetchErrorKind::Network => FetchRecipesError::Network { message },
            FetchErrorKind::MalformedData => FetchRecipesError::MalformedData { message },
            FetchErrorKind::EmptyData => FetchRecipesError::EmptyData { message },
        }
    }
}

impl From<ConfigError> for FetchRecipesError {
    fn from(e: ConfigError) -> Self {
        FetchRecipesError::Config {
            message: e.to_string(),
        }
    }
}

/// Which error screen a front end should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiErrorKind {
    InvalidUrl,
    Network,
    MalformedData,
    EmptyData,
}

impl From<FetchErrorKind> for FfiErrorKind {
    fn from(kind: FetchErrorKind) -> Self {
        match kind {
            FetchErrorKind::InvalidUrl => FfiErrorKind::InvalidUrl,
            FetchErrorKind::Network => FfiErrorKind::Network,
            FetchErrorKind::MalformedData => FfiErrorKind::MalformedData,
            FetchErrorKind::EmptyData => FfiErrorKind::EmptyData,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiEndpoint {
    Recipes,
    MalformedData,
    EmptyData,
}

impl From<FfiEndpoint> for Endpoint {
    fn from(e: FfiEndpoint) -> Self {
        match e {
            FfiEndpoint::Recipes => Endpoint::Recipes,
            FfiEndpoint::MalformedData => Endpoint::MalformedData,
            FfiEndpoint::EmptyData => Endpoint::EmptyData,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiSearchScope {
    All,
    Name,
    Cuisine,
}

impl From<FfiSearchScope> for SearchScope {
    fn from(s: FfiSearchScope) -> Self {
        match s {
            FfiSearchScope::All => SearchScope::All,
            FfiSearchScope::Name => SearchScope::Name,
            FfiSearchScope::Cuisine => SearchScope::Cuisine,
        }
    }
}

/// Overrides for the default service configuration.
#[derive(Debug, Clone, Default, uniffi::Record)]
pub struct FfiServiceConfig {
    pub base_url: Option<String>,
    pub user_agent: Option<String>,
}

impl FfiServiceConfig {
    /// Replaces the fields of `base` that are set here.
    fn apply_to(self, mut base: ServiceConfig) -> ServiceConfig {
        if let Some(base_url) = self.base_url {
            base.base_url = base_url;
        }
        if let Some(user_agent) = self.user_agent {
            base.user_agent = user_agent;
        }
        base
    }
}

/// Defaults, then the environment, then the caller's overrides.
fn resolve_config(config: Option<FfiServiceConfig>) -> ServiceConfig {
    config
        .unwrap_or_default()
        .apply_to(ServiceConfig::default().with_env_overrides())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiLinkKind {
    Source,
    Video,
}

impl From<LinkKind> for FfiLinkKind {
    fn from(kind: LinkKind) -> Self {
        match kind {
            LinkKind::Source => FfiLinkKind::Source,
            LinkKind::Video => FfiLinkKind::Video,
        }
    }
}

/// An outbound link for a recipe's detail screen.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct FfiRecipeLink {
    pub kind: FfiLinkKind,
    /// Button label
    pub title: String,
    pub url: String,
}

/// FFI-safe representation of a recipe.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct FfiRecipe {
    /// UUID in hyphenated form
    pub id: String,
    pub name: String,
    pub cuisine: String,
    pub photo_url_small: Option<String>,
    pub photo_url_large: Option<String>,
    pub source_url: Option<String>,
    pub youtube_url: Option<String>,
    /// Small photo, falling back to the large one
    pub thumbnail_url: Option<String>,
    /// Large photo, falling back to the small one
    pub hero_image_url: Option<String>,
    /// Detail-screen links in display order
    pub links: Vec<FfiRecipeLink>,
}

impl From<&Recipe> for FfiRecipe {
    fn from(r: &Recipe) -> Self {
        let url = |u: Option<&Url>| u.map(|u| u.to_string());
        FfiRecipe {
            id: r.id().to_string(),
            name: r.name().to_string(),
            cuisine: r.cuisine().to_string(),
            photo_url_small: url(r.photo_url_small()),
            photo_url_large: url(r.photo_url_large()),
            source_url: url(r.source_url()),
            youtube_url: url(r.youtube_url()),
            thumbnail_url: url(r.thumbnail_url()),
            hero_image_url: url(r.hero_image_url()),
            links: r
                .links()
                .into_iter()
                .map(|link| FfiRecipeLink {
                    kind: link.kind.into(),
                    title: link.kind.title().to_string(),
                    url: link.url.to_string(),
                })
                .collect(),
        }
    }
}

/// The derived fields (`thumbnail_url`, `hero_image_url`, `links`) are
/// ignored and recomputed from the stored URLs.
impl TryFrom<FfiRecipe> for Recipe {
    type Error = FetchRecipesError;

    fn try_from(r: FfiRecipe) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&r.id).map_err(|e| FetchRecipesError::MalformedData {
            message: format!("invalid recipe id {:?}: {e}", r.id),
        })?;
        let url = |u: Option<String>| u.and_then(|u| Url::parse(&u).ok());
        Ok(Recipe::new(id, r.name, r.cuisine)
            .with_photo_urls(url(r.photo_url_small), url(r.photo_url_large))
            .with_source_url(url(r.source_url))
            .with_youtube_url(url(r.youtube_url)))
    }
}

/// One cuisine and its recipes.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiCuisineSection {
    pub cuisine: String,
    pub recipes: Vec<FfiRecipe>,
}

/// FFI-safe representation of filtered and grouped recipes.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRecipeSections {
    /// Filtered recipes in original order
    pub filtered: Vec<FfiRecipe>,
    /// Sections sorted by cuisine
    pub sections: Vec<FfiCuisineSection>,
}

impl From<&RecipeSections> for FfiRecipeSections {
    fn from(s: &RecipeSections) -> Self {
        FfiRecipeSections {
            filtered: s.filtered.iter().map(FfiRecipe::from).collect(),
            sections: s
                .iter()
                .map(|(cuisine, recipes)| FfiCuisineSection {
                    cuisine: cuisine.to_string(),
                    recipes: recipes.iter().map(FfiRecipe::from).collect(),
                })
                .collect(),
        }
    }
}

/// A recipe list screen's state, shared with the front end.
///
/// Overlapping refreshes are not serialized: each issues its own request and
/// the one that finishes last wins.
#[derive(uniffi::Object)]
pub struct FfiRecipeList {
    provider: Arc<dyn RecipeProvider>,
    state: Mutex<RecipeListState>,
}

impl FfiRecipeList {
    fn with_provider(provider: Arc<dyn RecipeProvider>) -> Arc<Self> {
        Arc::new(FfiRecipeList {
            provider,
            state: Mutex::new(RecipeListState::new()),
        })
    }

    fn state(&self) -> MutexGuard<'_, RecipeListState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[uniffi::export(async_runtime = "tokio")]
impl FfiRecipeList {
    /// Creates a list backed by the recipe host.
    #[uniffi::constructor]
    pub fn new(config: Option<FfiServiceConfig>) -> Result<Arc<Self>, FetchRecipesError> {
        let service = RecipeService::new(resolve_config(config))?;
        Ok(Self::with_provider(Arc::new(service)))
    }

    /// Creates a list backed by canned preview data.
    #[uniffi::constructor]
    pub fn preview() -> Arc<Self> {
        Self::with_provider(Arc::new(PreviewRecipeService::new()))
    }

    /// Fetches recipes and replaces the list (or records the error).
    pub async fn refresh(&self, endpoint: FfiEndpoint) {
        self.state().begin_loading();
        let result = self.provider.fetch_recipes(endpoint.into()).await;
        self.state().finish_loading(result);
    }

    pub fn set_search_text(&self, text: String) {
        self.state().set_search_text(text);
    }

    pub fn set_search_scope(&self, scope: FfiSearchScope) {
        self.state().set_search_scope(scope.into());
    }

    /// Current filtered recipes grouped by cuisine.
    pub fn sections(&self) -> FfiRecipeSections {
        FfiRecipeSections::from(self.state().sections())
    }

    pub fn suggestions(&self) -> Vec<String> {
        self.state().suggestions()
    }

    pub fn is_loading(&self) -> bool {
        self.state().is_loading()
    }

    pub fn shows_loading_placeholder(&self) -> bool {
        self.state().shows_loading_placeholder()
    }

    pub fn error_kind(&self) -> Option<FfiErrorKind> {
        self.state().error().map(|e| e.kind().into())
    }

    pub fn error_message(&self) -> Option<String> {
        self.state().error().map(|e| e.to_string())
    }

    /// Looks up a recipe by its id string.
    pub fn recipe(&self, id: String) -> Option<FfiRecipe> {
        let id = Uuid::parse_str(&id).ok()?;
        self.state().recipe(id).map(FfiRecipe::from)
    }
}

// ============================================================================
// Exported FFI Functions
// ============================================================================

/// Fetches recipes from the recipe host.
///
/// # Arguments
/// * `endpoint` - Which path to request
/// * `config` - Optional overrides for the base URL and user agent
#[uniffi::export(async_runtime = "tokio")]
pub async fn fetch_recipes(
    endpoint: FfiEndpoint,
    config: Option<FfiServiceConfig>,
) -> Result<Vec<FfiRecipe>, FetchRecipesError> {
    let service = RecipeService::new(resolve_config(config))?;
    let recipes = service.fetch(endpoint.into()).await?;
    Ok(recipes.iter().map(FfiRecipe::from).collect())
}

/// Returns canned recipes without any network access.
#[uniffi::export(async_runtime = "tokio")]
pub async fn preview_recipes(endpoint: FfiEndpoint) -> Result<Vec<FfiRecipe>, FetchRecipesError> {
    let recipes = PreviewRecipeService::new()
        .fetch_recipes(endpoint.into())
        .await?;
    Ok(recipes.iter().map(FfiRecipe::from).collect())
}

/// Filters recipes by a search string and groups them by cuisine.
///
/// Fails only if a recipe id is not a valid UUID.
#[uniffi::export]
pub fn filter_recipes(
    recipes: Vec<FfiRecipe>,
    search_text: String,
    scope: FfiSearchScope,
) -> Result<FfiRecipeSections, FetchRecipesError> {
    let recipes = recipes
        .into_iter()
        .map(Recipe::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    let sections = search::recompute(&recipes, &search_text, scope.into());
    Ok(FfiRecipeSections::from(&sections))
}

/// Search completions drawn from recipe names and cuisines.
///
/// Fails only if a recipe id is not a valid UUID.
#[uniffi::export]
pub fn search_suggestions(
    recipes: Vec<FfiRecipe>,
    query: String,
) -> Result<Vec<String>, FetchRecipesError> {
    let recipes = recipes
        .into_iter()
        .map(Recipe::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(search::suggestions(&recipes, &query))
}

/// Returns the library version.
#[uniffi::export]
pub fn library_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
