use crate::Recipe;
use std::collections::{BTreeMap, BTreeSet};

mod model;

pub use model::*;

/// Maximum number of search suggestions returned.
pub const MAX_SUGGESTIONS: usize = 5;

/// Filter recipes by a search string and group the survivors by cuisine.
///
/// An empty `search_text` keeps every recipe in its original order. Otherwise
/// a recipe is kept when the text occurs case-insensitively in the fields
/// selected by `scope`. Groups preserve the order of the filtered list.
///
/// ```
/// use fetch_recipes::{recompute, Recipe, SearchScope};
/// use uuid::Uuid;
///
/// let recipes = vec![
///     Recipe::new(Uuid::new_v4(), "Taco", "Mexican"),
///     Recipe::new(Uuid::new_v4(), "Ramen", "Japanese"),
/// ];
/// let sections = recompute(&recipes, "tac", SearchScope::All);
/// assert_eq!(sections.cuisines, ["Mexican"]);
/// ```
pub fn recompute(recipes: &[Recipe], search_text: &str, scope: SearchScope) -> RecipeSections {
    let filtered = filter_recipes(recipes, search_text, scope);
    let by_cuisine = group_by_cuisine(&filtered);
    let cuisines = by_cuisine.keys().cloned().collect();

    RecipeSections {
        filtered,
        by_cuisine,
        cuisines,
    }
}

fn filter_recipes(recipes: &[Recipe], search_text: &str, scope: SearchScope) -> Vec<Recipe> {
    if search_text.is_empty() {
        return recipes.to_vec();
    }

    let needle = search_text.to_lowercase();
    recipes
        .iter()
        .filter(|recipe| scope.matches(recipe, &needle))
        .cloned()
        .collect()
}

fn group_by_cuisine(recipes: &[Recipe]) -> BTreeMap<String, Vec<Recipe>> {
    let mut groups: BTreeMap<String, Vec<Recipe>> = BTreeMap::new();
    for recipe in recipes {
        groups
            .entry(recipe.cuisine().to_string())
            .or_default()
            .push(recipe.clone());
    }
    groups
}

/// Completion candidates for a search field.
///
/// Candidates are the distinct recipe names and cuisines. With an empty query
/// the first few candidates are returned; otherwise only those containing the
/// query (case-insensitively), in ascending order.
pub fn suggestions(recipes: &[Recipe], query: &str) -> Vec<String> {
    let candidates: BTreeSet<&str> = recipes
        .iter()
        .flat_map(|r| [r.name(), r.cuisine()])
        .collect();

    let needle = query.to_lowercase();
    candidates
        .into_iter()
        .filter(|candidate| needle.is_empty() || candidate.to_lowercase().contains(&needle))
        .take(MAX_SUGGESTIONS)
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn recipe(name: &str, cuisine: &str) -> Recipe {
        Recipe::new(Uuid::new_v4(), name, cuisine)
    }

    fn sample_recipes() -> Vec<Recipe> {
        vec![
            recipe("Apam Balik", "Malaysian"),
            recipe("Apple & Blackberry Crumble", "British"),
            recipe("Bakewell Tart", "British"),
            recipe("Budino Di Ricotta", "Italian"),
            recipe("Banana Pancakes", "American"),
            recipe("Canadian Butter Tarts", "Canadian"),
            recipe("Chocolate Gateau", "French"),
            recipe("Tarte Tatin", "French"),
        ]
    }

    fn names(recipes: &[Recipe]) -> Vec<&str> {
        recipes.iter().map(|r| r.name()).collect()
    }

    #[test]
    fn test_empty_search_keeps_everything_in_order() {
        let recipes = sample_recipes();
        let sections = recompute(&recipes, "", SearchScope::Name);

        assert_eq!(sections.filtered, recipes);
        assert_eq!(
            sections.cuisines,
            ["American", "British", "Canadian", "French", "Italian", "Malaysian"]
        );
    }

    #[test]
    fn test_taco_ramen_scenario() {
        let recipes = vec![recipe("Taco", "Mexican"), recipe("Ramen", "Japanese")];
        let sections = recompute(&recipes, "a", SearchScope::All);

        // Both names contain an "a"
        assert_eq!(names(&sections.filtered), ["Taco", "Ramen"]);

        let sections = recompute(&recipes, "tac", SearchScope::All);
        assert_eq!(names(&sections.filtered), ["Taco"]);
        assert_eq!(sections.cuisines, ["Mexican"]);
        assert_eq!(names(sections.recipes_in("Mexican")), ["Taco"]);
        assert!(sections.recipes_in("Japanese").is_empty());
    }

    #[test]
    fn test_name_scope_is_sound_and_complete() {
        let recipes = sample_recipes();
        for query in ["tar", "TART", "an", "b", "zzz", "&"] {
            let sections = recompute(&recipes, query, SearchScope::Name);
            let needle = query.to_lowercase();

            for kept in &sections.filtered {
                assert!(kept.name().to_lowercase().contains(&needle));
            }
            let expected = recipes
                .iter()
                .filter(|r| r.name().to_lowercase().contains(&needle))
                .count();
            assert_eq!(sections.filtered.len(), expected, "query {query:?}");
        }
    }

    #[test]
    fn test_cuisine_scope_ignores_names() {
        let recipes = sample_recipes();
        let sections = recompute(&recipes, "british", SearchScope::Cuisine);
        assert_eq!(
            names(&sections.filtered),
            ["Apple & Blackberry Crumble", "Bakewell Tart"]
        );

        // "Tart" appears only in names
        let sections = recompute(&recipes, "tart", SearchScope::Cuisine);
        assert!(sections.is_empty());
        assert!(sections.cuisines.is_empty());
    }

    #[test]
    fn test_all_scope_matches_name_or_cuisine() {
        let recipes = sample_recipes();
        let sections = recompute(&recipes, "CAN", SearchScope::All);
        assert_eq!(
            names(&sections.filtered),
            ["Banana Pancakes", "Canadian Butter Tarts"]
        );
        assert_eq!(sections.cuisines, ["American", "Canadian"]);
    }

    #[test]
    fn test_groups_preserve_filtered_order() {
        let recipes = sample_recipes();
        let sections = recompute(&recipes, "", SearchScope::All);

        assert_eq!(
            names(sections.recipes_in("French")),
            ["Chocolate Gateau", "Tarte Tatin"]
        );
        let section_order: Vec<&str> = sections.iter().map(|(cuisine, _)| cuisine).collect();
        assert_eq!(section_order, sections.cuisines);
    }

    #[test]
    fn test_cuisine_keys_sorted_and_unique() {
        let recipes = vec![
            recipe("a", "b"),
            recipe("c", "B"),
            recipe("d", "a"),
            recipe("e", "b"),
            recipe("f", "Z"),
        ];
        let sections = recompute(&recipes, "", SearchScope::All);

        // Ordinal order puts uppercase first
        assert_eq!(sections.cuisines, ["B", "Z", "a", "b"]);
        assert!(sections.cuisines.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(sections.recipes_in("b").len(), 2);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let recipes = sample_recipes();
        for scope in SearchScope::ALL {
            let first = recompute(&recipes, "ta", scope);
            let second = recompute(&recipes, "ta", scope);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_empty_input() {
        let sections = recompute(&[], "anything", SearchScope::All);
        assert_eq!(sections, RecipeSections::default());
    }

    #[test]
    fn test_scope_titles() {
        let titles: Vec<&str> = SearchScope::ALL.iter().map(|s| s.title()).collect();
        assert_eq!(titles, ["All", "Name", "Cuisine"]);
        assert_eq!(SearchScope::default(), SearchScope::All);
    }

    #[test]
    fn test_suggestions_for_query() {
        let recipes = sample_recipes();
        let results = suggestions(&recipes, "TAR");
        assert_eq!(results, ["Bakewell Tart", "Canadian Butter Tarts", "Tarte Tatin"]);
    }

    #[test]
    fn test_suggestions_are_capped() {
        let recipes = sample_recipes();
        let results = suggestions(&recipes, "a");
        assert_eq!(results.len(), MAX_SUGGESTIONS);
        assert!(results.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_suggestions_empty_query() {
        let recipes = vec![
            recipe("Tacos", "Mexican"),
            recipe("Burrito", "Mexican"),
            recipe("Ramen", "Japanese"),
        ];
        let results = suggestions(&recipes, "");

        // Cuisines and names are deduplicated together
        assert_eq!(results.len(), 5);
        assert_eq!(
            results.iter().filter(|s| s.as_str() == "Mexican").count(),
            1
        );
    }

    #[test]
    fn test_suggestions_no_match() {
        assert!(suggestions(&sample_recipes(), "sushi").is_empty());
    }
}
