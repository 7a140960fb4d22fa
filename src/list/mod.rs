//! State behind a recipe list screen.
//!
//! [`RecipeListState`] owns the last fetched recipes and everything derived
//! from them. The derived [`RecipeSections`] are rebuilt whenever the recipes,
//! the search text or the scope change, so they are never stale.

use crate::fetcher::{Endpoint, FetchError, RecipeProvider};
use crate::search::{self, RecipeSections, SearchScope};
use crate::Recipe;
use tracing::{debug, warn};
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct RecipeListState {
    recipes: Vec<Recipe>,
    search_text: String,
    search_scope: SearchScope,
    sections: RecipeSections,
    is_loading: bool,
    error: Option<FetchError>,
}

impl RecipeListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a fetch as started and clears the previous error.
    pub fn begin_loading(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    /// Applies the outcome of a fetch.
    ///
    /// A failure clears the list so old recipes are never shown next to a new
    /// error.
    pub fn finish_loading(&mut self, result: Result<Vec<Recipe>, FetchError>) {
        match result {
            Ok(recipes) => {
                debug!("Loaded {} recipes into list", recipes.len());
                self.recipes = recipes;
                self.error = None;
            }
            Err(e) => {
                warn!("Recipe list failed to load: {e}");
                self.recipes.clear();
                self.error = Some(e);
            }
        }
        self.is_loading = false;
        self.recompute();
    }

    /// Fetches from `provider` and applies the result.
    ///
    /// Every call is a single attempt; retrying means calling this again.
    pub async fn refresh(&mut self, provider: &dyn RecipeProvider, endpoint: Endpoint) {
        self.begin_loading();
        let result = provider.fetch_recipes(endpoint).await;
        self.finish_loading(result);
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.recompute();
    }

    pub fn set_search_scope(&mut self, scope: SearchScope) {
        self.search_scope = scope;
        self.recompute();
    }

    fn recompute(&mut self) {
        self.sections = search::recompute(&self.recipes, &self.search_text, self.search_scope);
    }

    /// The unfiltered recipes from the last successful fetch.
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn sections(&self) -> &RecipeSections {
        &self.sections
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn search_scope(&self) -> SearchScope {
        self.search_scope
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// True while the very first load is in flight, when there's nothing else to show.
    pub fn shows_loading_placeholder(&self) -> bool {
        self.is_loading && self.recipes.is_empty()
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    /// Suggestions for the current search text.
    pub fn suggestions(&self) -> Vec<String> {
        search::suggestions(&self.recipes, &self.search_text)
    }

    /// Looks up a recipe by id, e.g. when navigating to its detail screen.
    pub fn recipe(&self, id: Uuid) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::PreviewRecipeService;
    use crate::FetchErrorKind;

    #[test]
    fn test_initial_state() {
        let state = RecipeListState::new();
        assert!(state.recipes().is_empty());
        assert!(state.sections().is_empty());
        assert_eq!(state.search_text(), "");
        assert_eq!(state.search_scope(), SearchScope::All);
        assert!(!state.is_loading());
        assert!(state.error().is_none());
    }

    #[tokio::test]
    async fn test_refresh_success() {
        let mut state = RecipeListState::new();
        state
            .refresh(&PreviewRecipeService::new(), Endpoint::Recipes)
            .await;

        assert!(!state.is_loading());
        assert!(state.error().is_none());
        assert_eq!(state.recipes().len(), 3);
        assert_eq!(state.sections().cuisines, ["Italian", "Japanese", "Mexican"]);
    }

    #[tokio::test]
    async fn test_error_clears_list() {
        let provider = PreviewRecipeService::new();
        let mut state = RecipeListState::new();
        state.refresh(&provider, Endpoint::Recipes).await;
        assert_eq!(state.recipes().len(), 3);

        state.refresh(&provider, Endpoint::EmptyData).await;
        assert!(state.recipes().is_empty());
        assert!(state.sections().is_empty());
        assert_eq!(state.error().map(|e| e.kind()), Some(FetchErrorKind::EmptyData));

        // The latest error replaces the previous one
        state.refresh(&provider, Endpoint::MalformedData).await;
        assert_eq!(
            state.error().map(|e| e.kind()),
            Some(FetchErrorKind::MalformedData)
        );

        // A successful retry clears it
        state.refresh(&provider, Endpoint::Recipes).await;
        assert!(state.error().is_none());
        assert_eq!(state.recipes().len(), 3);
    }

    #[test]
    fn test_loading_flags() {
        let mut state = RecipeListState::new();
        state.finish_loading(Err(FetchError::EmptyData));

        state.begin_loading();
        assert!(state.is_loading());
        assert!(state.shows_loading_placeholder());
        assert!(state.error().is_none());

        state.finish_loading(Ok(PreviewRecipeService::sample_recipes()));
        state.begin_loading();
        assert!(state.is_loading());
        // Existing recipes stay visible during a refresh
        assert!(!state.shows_loading_placeholder());
    }

    #[test]
    fn test_search_recomputes_sections() {
        let mut state = RecipeListState::new();
        state.finish_loading(Ok(PreviewRecipeService::sample_recipes()));

        state.set_search_text("TACO");
        assert_eq!(state.sections().cuisines, ["Mexican"]);

        state.set_search_scope(SearchScope::Cuisine);
        assert!(state.sections().is_empty());

        state.set_search_text("ital");
        assert_eq!(state.sections().filtered[0].name(), "Pasta Carbonara");

        state.set_search_text("");
        assert_eq!(state.sections().filtered.len(), 3);
    }

    #[test]
    fn test_new_recipes_keep_search() {
        let mut state = RecipeListState::new();
        state.set_search_text("sushi");
        state.finish_loading(Ok(PreviewRecipeService::sample_recipes()));

        assert_eq!(state.sections().filtered.len(), 1);
        assert_eq!(state.sections().cuisines, ["Japanese"]);
    }

    #[test]
    fn test_suggestions_and_lookup() {
        let mut state = RecipeListState::new();
        state.finish_loading(Ok(PreviewRecipeService::sample_recipes()));

        state.set_search_text("an");
        assert_eq!(state.suggestions(), ["Italian", "Japanese", "Mexican"]);

        let id = state.recipes()[1].id();
        assert_eq!(state.recipe(id).map(|r| r.name()), Some("Sushi Roll"));
        assert!(state.recipe(Uuid::new_v4()).is_none());
    }
}
