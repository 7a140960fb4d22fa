use crate::Recipe;
use std::collections::BTreeMap;

/// Which recipe fields a search term is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SearchScope {
    #[default]
    All,
    Name,
    Cuisine,
}

impl SearchScope {
    /// Every scope, in the order a scope picker lists them.
    pub const ALL: [SearchScope; 3] = [SearchScope::All, SearchScope::Name, SearchScope::Cuisine];

    pub fn title(&self) -> &'static str {
        match self {
            SearchScope::All => "All",
            SearchScope::Name => "Name",
            SearchScope::Cuisine => "Cuisine",
        }
    }

    /// `needle` must already be lowercased.
    pub(crate) fn matches(&self, recipe: &Recipe, needle: &str) -> bool {
        let name = || recipe.name().to_lowercase().contains(needle);
        let cuisine = || recipe.cuisine().to_lowercase().contains(needle);
        match self {
            SearchScope::All => name() || cuisine(),
            SearchScope::Name => name(),
            SearchScope::Cuisine => cuisine(),
        }
    }
}

/// The filtered recipe list together with its cuisine grouping.
///
/// Always produced as a whole by [`recompute`](super::recompute), so the
/// three views never disagree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecipeSections {
    /// Recipes that passed the filter, in input order
    pub filtered: Vec<Recipe>,
    /// Filtered recipes keyed by cuisine
    pub by_cuisine: BTreeMap<String, Vec<Recipe>>,
    /// Cuisine keys in ascending order
    pub cuisines: Vec<String>,
}

impl RecipeSections {
    pub fn is_empty(&self) -> bool {
        self.filtered.is_empty()
    }

    /// Recipes for one cuisine, or an empty slice if none matched.
    pub fn recipes_in(&self, cuisine: &str) -> &[Recipe] {
        self.by_cuisine
            .get(cuisine)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Iterates sections in display order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Recipe])> {
        self.by_cuisine
            .iter()
            .map(|(cuisine, recipes)| (cuisine.as_str(), recipes.as_slice()))
    }
}
