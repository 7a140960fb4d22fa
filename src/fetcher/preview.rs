use super::{Endpoint, FetchError, RecipeProvider};
use crate::model::Recipe;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

/// Serves a fixed set of recipes without touching the network.
///
/// Used for UI previews and tests. The two fixture endpoints fail the same
/// way the real host does.
#[derive(Debug, Clone, Default)]
pub struct PreviewRecipeService {
    latency: Duration,
}

impl PreviewRecipeService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits this long before answering each call.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// The recipes served for [`Endpoint::Recipes`]. Ids are fresh on every call.
    pub fn sample_recipes() -> Vec<Recipe> {
        vec![
            Recipe::new(Uuid::new_v4(), "Pasta Carbonara", "Italian"),
            Recipe::new(Uuid::new_v4(), "Sushi Roll", "Japanese"),
            Recipe::new(Uuid::new_v4(), "Tacos", "Mexican"),
        ]
    }
}

#[async_trait]
impl RecipeProvider for PreviewRecipeService {
    async fn fetch_recipes(&self, endpoint: Endpoint) -> Result<Vec<Recipe>, FetchError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        debug!("Serving preview recipes for {:?}", endpoint);

        match endpoint {
            Endpoint::Recipes => Ok(Self::sample_recipes()),
            Endpoint::MalformedData => Err(FetchError::MalformedData),
            Endpoint::EmptyData => Err(FetchError::EmptyData),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn test_preview_recipes() {
        let recipes = PreviewRecipeService::new()
            .fetch_recipes(Endpoint::Recipes)
            .await
            .unwrap();

        let names: Vec<&str> = recipes.iter().map(|r| r.name()).collect();
        assert_eq!(names, ["Pasta Carbonara", "Sushi Roll", "Tacos"]);
        assert!(recipes.iter().all(|r| r.has_required_fields()));
    }

    #[tokio::test]
    async fn test_preview_fixture_errors() {
        let service = PreviewRecipeService::new();
        assert!(matches!(
            service.fetch_recipes(Endpoint::MalformedData).await,
            Err(FetchError::MalformedData)
        ));
        assert!(matches!(
            service.fetch_recipes(Endpoint::EmptyData).await,
            Err(FetchError::EmptyData)
        ));
    }

    #[tokio::test]
    async fn test_preview_latency() {
        let service = PreviewRecipeService::new().with_latency(Duration::from_millis(20));
        let started = Instant::now();
        service.fetch_recipes(Endpoint::Recipes).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(20));
    }
}
