use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Maximum number of movies a nomination list can hold.
pub const NOMINATION_LIMIT: usize = 5;

/// Key under which the comma-joined nomination ids are persisted.
pub const STORAGE_KEY: &str = "movie_ids";

/// OMDb's placeholder for a missing poster.
pub const POSTER_NOT_AVAILABLE: &str = "N/A";

/// A movie as returned by OMDb search and lookup endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    /// Kept as text: series come back as ranges like "2011–2019".
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(
        rename = "Poster",
        default,
        deserialize_with = "deserialize_poster",
        serialize_with = "serialize_poster"
    )]
    pub poster: Option<String>,
}

impl Movie {
    pub fn new(
        imdb_id: impl Into<String>,
        title: impl Into<String>,
        year: impl Into<String>,
        poster: Option<String>,
    ) -> Self {
        Self {
            imdb_id: imdb_id.into(),
            title: title.into(),
            year: year.into(),
            poster,
        }
    }

    pub fn poster_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.poster.as_deref().unwrap_or(fallback)
    }
}

fn deserialize_poster<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.filter(|p| !p.is_empty() && p != POSTER_NOT_AVAILABLE))
}

fn serialize_poster<S>(poster: &Option<String>, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(poster.as_deref().unwrap_or(POSTER_NOT_AVAILABLE))
}

/// Common OMDb response wrapper. `Response` is the literal string "True" or "False".
#[derive(Debug, Clone, Deserialize)]
pub struct OmdbEnvelope<T> {
    #[serde(rename = "Response")]
    pub response: String,
    #[serde(rename = "Error")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub body: Option<T>,
}

impl<T> OmdbEnvelope<T> {
    pub fn is_success(&self) -> bool {
        self.response.eq_ignore_ascii_case("true")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchPage {
    #[serde(rename = "Search", default)]
    pub search: Vec<Movie>,
    #[serde(rename = "totalResults")]
    pub total_results: Option<String>,
}
