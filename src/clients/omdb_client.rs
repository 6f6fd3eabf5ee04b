use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tokio_retry::{
    strategy::{jitter, ExponentialBackoff},
    Retry,
};

use super::MovieLookup;
use crate::error::{CatalogError, Result};

pub const DEFAULT_OMDB_URL: &str = "http://www.omdbapi.com/";

/// The subset of an OMDb title lookup the catalog cares about.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MovieMetadata {
    #[serde(rename = "Title")]
    pub title: Option<String>,
    #[serde(rename = "Year")]
    pub year: Option<String>,
    #[serde(rename = "imdbRating")]
    pub imdb_rating: Option<String>,
    #[serde(rename = "Poster")]
    pub poster: Option<String>,
    #[serde(rename = "imdbID")]
    pub imdb_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmdbResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(flatten)]
    movie: MovieMetadata,
}

#[derive(Debug, Clone)]
pub struct OmdbClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OmdbClient {
    pub fn new(api_key: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CatalogError::Api(format!("Could not build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: DEFAULT_OMDB_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    async fn get_body(&self, title: &str) -> Result<(StatusCode, String)> {
        let retry_strategy = ExponentialBackoff::from_millis(10).map(jitter).take(3);
        Retry::spawn(retry_strategy, || async move {
            self.get_body_no_retry(title).await
        })
        .await
    }

    async fn get_body_no_retry(&self, title: &str) -> Result<(StatusCode, String)> {
        let resp = self
            .client
            .get(&self.base_url)
            .query(&[("apikey", self.api_key.as_str()), ("t", title)])
            .send()
            .await
            .map_err(|e| {
                CatalogError::Api(format!("Failed to query OMDb for '{}': {}", title, e))
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            CatalogError::Api(format!("Failed to read OMDb response for '{}': {}", title, e))
        })?;

        Ok((status, body))
    }
}

#[async_trait]
impl MovieLookup for OmdbClient {
    async fn fetch_movie_data(&self, title: &str) -> Result<Option<MovieMetadata>> {
        log::debug!("Fetching OMDb data for movie {}", title);

        let (status, body) = self.get_body(title).await?;
        if status != StatusCode::OK {
            log::warn!("Failed to fetch data. Status code: {}", status.as_u16());
            return Ok(None);
        }

        parse_response(&body)
    }
}

/// Interprets an OMDb response body. `"Response": "False"` means the title
/// was not found and is not an error.
pub fn parse_response(body: &str) -> Result<Option<MovieMetadata>> {
    let response: OmdbResponse = serde_json::from_str(body)?;

    if response.response == "True" {
        return Ok(Some(response.movie));
    }

    log::warn!(
        "Error: {}",
        response.error.as_deref().unwrap_or("unknown OMDb error")
    );
    Ok(None)
}
