use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

pub const UNKNOWN_YEAR: &str = "Unknown";
pub const NO_POSTER: &str = "No poster available";
pub const NO_IMDB_URL: &str = "URL not available";
pub const DEFAULT_RATING: f64 = 0.0;

/// Every catalog, whatever backend produced it, is a title-keyed map.
pub type Catalog = BTreeMap<String, MovieDetails>;

/// Everything we know about a movie apart from its title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    #[serde(default = "unknown_year", deserialize_with = "lenient_year")]
    pub year: String,
    #[serde(default, deserialize_with = "lenient_rating")]
    pub rating: f64,
    #[serde(default = "no_poster", deserialize_with = "lenient_poster")]
    pub poster: String,
    #[serde(default = "no_imdb_url", deserialize_with = "lenient_imdb_url")]
    pub imdb_url: String,
    #[serde(default, deserialize_with = "lenient_notes")]
    pub notes: String,
}

impl Default for MovieDetails {
    fn default() -> Self {
        MovieDetails {
            year: unknown_year(),
            rating: DEFAULT_RATING,
            poster: no_poster(),
            imdb_url: no_imdb_url(),
            notes: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    pub title: String,
    pub details: MovieDetails,
}

impl Movie {
    pub fn new(
        title: &str,
        year: &str,
        rating: f64,
        poster: &str,
        imdb_url: &str,
        notes: &str,
    ) -> Self {
        Movie {
            title: title.to_string(),
            details: MovieDetails {
                year: year.to_string(),
                rating,
                poster: poster.to_string(),
                imdb_url: imdb_url.to_string(),
                notes: notes.to_string(),
            },
        }
    }

    pub fn csv_titles() -> Vec<&'static str> {
        vec!["Title", "Year", "Rating", "Poster", "imdb_url", "notes"]
    }
}

impl MovieDetails {
    pub fn to_csvable_array(&self, title: &str) -> Vec<String> {
        vec![
            title.to_string(),
            self.year.clone(),
            self.rating.to_string(),
            self.poster.clone(),
            self.imdb_url.clone(),
            self.notes.clone(),
        ]
    }
}

/// Parses persisted rating text. Blank or garbage text yields `None`.
pub fn parse_rating(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|r| r.is_finite())
}

fn unknown_year() -> String {
    UNKNOWN_YEAR.to_string()
}

fn no_poster() -> String {
    NO_POSTER.to_string()
}

fn no_imdb_url() -> String {
    NO_IMDB_URL.to_string()
}

fn text_or<'de, D>(deserializer: D, fallback: &str) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => fallback.to_string(),
    })
}

fn lenient_year<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    text_or(deserializer, UNKNOWN_YEAR)
}

fn lenient_poster<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    text_or(deserializer, NO_POSTER)
}

fn lenient_imdb_url<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    text_or(deserializer, NO_IMDB_URL)
}

fn lenient_notes<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    text_or(deserializer, "")
}

fn lenient_rating<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(DEFAULT_RATING),
        Some(Value::String(s)) => parse_rating(&s).unwrap_or(DEFAULT_RATING),
        _ => DEFAULT_RATING,
    })
}
