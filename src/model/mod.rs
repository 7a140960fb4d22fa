mod recipe;

pub use recipe::{LinkKind, Recipe, RecipeLink};
pub(crate) use recipe::RecipeResponse;
