use serde::{de::IgnoredAny, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::Display;

/// Number of cast members kept from the credits response
pub const TOP_CAST: usize = 5;

const NOT_AVAILABLE: &str = "N/A";
const NO_OVERVIEW: &str = "No overview available.";

/// Average user rating, or "N/A" when the provider has none
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rating {
    Score(f64),
    NotAvailable,
}

impl Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rating::Score(score) => write!(f, "{}", score),
            Rating::NotAvailable => write!(f, "{}", NOT_AVAILABLE),
        }
    }
}

impl Serialize for Rating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Rating::Score(score) => serializer.serialize_f64(*score),
            Rating::NotAvailable => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

impl<'de> Deserialize<'de> for Rating {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Score(f64),
            Text(IgnoredAny),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Score(score) => Rating::Score(score),
            Raw::Text(_) => Rating::NotAvailable,
        })
    }
}

/// Display attributes for a movie. Never used as ranking input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    /// Up to five names, in provider order
    pub cast: Vec<String>,
    pub rating: Rating,
    /// Four-digit year, or empty when unknown
    pub release_year: String,
    pub vote_count: u64,
    pub overview: String,
    pub genres: Vec<String>,
    /// Runtime in minutes
    pub runtime: Option<u32>,
    pub language: String,
    pub tagline: String,
    pub status: String,
}

impl MovieDetails {
    /// The fully degraded record shown when the provider cannot be reached
    pub fn unavailable() -> Self {
        Self {
            cast: Vec::new(),
            rating: Rating::NotAvailable,
            release_year: String::new(),
            vote_count: 0,
            overview: NO_OVERVIEW.to_string(),
            genres: Vec::new(),
            runtime: None,
            language: NOT_AVAILABLE.to_string(),
            tagline: String::new(),
            status: NOT_AVAILABLE.to_string(),
        }
    }

    /// Combines a details response with the cast from a credits response
    pub fn from_tmdb(movie: TmdbMovie, credits: Option<TmdbCredits>) -> Self {
        let cast = credits
            .map(|c| {
                c.cast
                    .into_iter()
                    .filter_map(|m| m.name)
                    .take(TOP_CAST)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            cast,
            rating: movie
                .vote_average
                .map(Rating::Score)
                .unwrap_or(Rating::NotAvailable),
            release_year: movie
                .release_date
                .map(|date| date.chars().take(4).collect())
                .unwrap_or_default(),
            vote_count: movie.vote_count.unwrap_or(0),
            overview: movie.overview.unwrap_or_else(|| NO_OVERVIEW.to_string()),
            genres: movie.genres.into_iter().filter_map(|g| g.name).collect(),
            runtime: movie.runtime,
            language: movie
                .original_language
                .map(|lang| lang.to_uppercase())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            tagline: movie.tagline.unwrap_or_default(),
            status: movie.status.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        }
    }
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// TMDB sends `null` for some list fields; treat it like an absent field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Response from GET /movie/{id}
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbMovie {
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_count: Option<u64>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<TmdbGenre>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub original_language: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenre {
    #[serde(default)]
    pub name: Option<String>,
}

/// Response from GET /movie/{id}/credits
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbCredits {
    #[serde(default, deserialize_with = "null_as_default")]
    pub cast: Vec<TmdbCastMember>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCastMember {
    #[serde(default)]
    pub name: Option<String>,
}
