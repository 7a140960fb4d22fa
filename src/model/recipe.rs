use serde::{Deserialize, Deserializer, Serialize};
use url::Url;
use uuid::Uuid;

/// A single recipe as served by the recipe endpoint.
///
/// Recipes are immutable once decoded. The wire format uses snake_case keys
/// and names the identifier `uuid`; the in-memory field is `id`.
///
/// # Examples
///
/// ```
/// use fetch_recipes::Recipe;
///
/// let json = r#"{ "uuid": "0c6ca6e7-e32a-4053-b824-1dbf749910d8",
///                 "name": "Apam Balik", "cuisine": "Malaysian" }"#;
/// let recipe: Recipe = serde_json::from_str(json)?;
/// assert_eq!(recipe.name(), "Apam Balik");
/// assert!(recipe.source_url().is_none());
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(rename = "uuid")]
    id: Uuid,
    name: String,
    cuisine: String,
    #[serde(default, deserialize_with = "lenient_url", skip_serializing_if = "Option::is_none")]
    photo_url_small: Option<Url>,
    #[serde(default, deserialize_with = "lenient_url", skip_serializing_if = "Option::is_none")]
    photo_url_large: Option<Url>,
    #[serde(default, deserialize_with = "lenient_url", skip_serializing_if = "Option::is_none")]
    source_url: Option<Url>,
    #[serde(default, deserialize_with = "lenient_url", skip_serializing_if = "Option::is_none")]
    youtube_url: Option<Url>,
}

/// What an outbound recipe link points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkKind {
    /// The original recipe page.
    Source,
    /// A video walkthrough.
    Video,
}

impl LinkKind {
    /// Label a detail screen shows for this link.
    pub fn title(&self) -> &'static str {
        match self {
            LinkKind::Source => "View Original Recipe",
            LinkKind::Video => "Watch on YouTube",
        }
    }
}

/// An outbound link shown on a recipe's detail screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeLink<'a> {
    pub kind: LinkKind,
    pub url: &'a Url,
}

impl Recipe {
    /// Creates a recipe without any photos or links.
    pub fn new(id: Uuid, name: impl Into<String>, cuisine: impl Into<String>) -> Self {
        Recipe {
            id,
            name: name.into(),
            cuisine: cuisine.into(),
            photo_url_small: None,
            photo_url_large: None,
            source_url: None,
            youtube_url: None,
        }
    }

    pub fn with_photo_urls(mut self, small: Option<Url>, large: Option<Url>) -> Self {
        self.photo_url_small = small;
        self.photo_url_large = large;
        self
    }

    pub fn with_source_url(mut self, url: Option<Url>) -> Self {
        self.source_url = url;
        self
    }

    pub fn with_youtube_url(mut self, url: Option<Url>) -> Self {
        self.youtube_url = url;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cuisine(&self) -> &str {
        &self.cuisine
    }

    pub fn photo_url_small(&self) -> Option<&Url> {
        self.photo_url_small.as_ref()
    }

    pub fn photo_url_large(&self) -> Option<&Url> {
        self.photo_url_large.as_ref()
    }

    pub fn source_url(&self) -> Option<&Url> {
        self.source_url.as_ref()
    }

    pub fn youtube_url(&self) -> Option<&Url> {
        self.youtube_url.as_ref()
    }

    /// Image for list rows: the small photo, or the large one if that's all there is.
    pub fn thumbnail_url(&self) -> Option<&Url> {
        self.photo_url_small().or_else(|| self.photo_url_large())
    }

    /// Image for the detail header: the large photo, falling back to the small one.
    pub fn hero_image_url(&self) -> Option<&Url> {
        self.photo_url_large().or_else(|| self.photo_url_small())
    }

    /// Outbound links in display order (source page first, then video).
    pub fn links(&self) -> Vec<RecipeLink<'_>> {
        [
            (LinkKind::Source, self.source_url()),
            (LinkKind::Video, self.youtube_url()),
        ]
        .into_iter()
        .filter_map(|(kind, url)| url.map(|url| RecipeLink { kind, url }))
        .collect()
    }

    /// Returns true when both required text fields are non-empty.
    pub(crate) fn has_required_fields(&self) -> bool {
        !self.name.is_empty() && !self.cuisine.is_empty()
    }
}

/// Envelope the endpoint wraps the recipe list in.
#[derive(Debug, Deserialize)]
pub(crate) struct RecipeResponse {
    pub(crate) recipes: Vec<Recipe>,
}

/// Unparsable URL strings are treated as absent rather than failing the record.
fn lenient_url<'de, D>(deserializer: D) -> Result<Option<Url>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| Url::parse(&s).ok()))
}
