pub mod config;
pub mod fetcher;
pub mod ffi;
pub mod list;
pub mod model;
pub mod search;

pub use config::{ConfigError, ServiceConfig};
pub use fetcher::{
    Endpoint, FetchError, FetchErrorKind, NetworkError, PreviewRecipeService, RecipeProvider,
    RecipeService,
};
pub use list::RecipeListState;
pub use model::*;
pub use search::{recompute, suggestions, RecipeSections, SearchScope};

uniffi::setup_scaffolding!();
