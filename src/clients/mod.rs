use async_trait::async_trait;

use crate::error::Result;

pub mod omdb_client;

use omdb_client::MovieMetadata;

/// Looks up movie metadata by title. `Ok(None)` means the title is unknown.
#[async_trait]
pub trait MovieLookup {
    async fn fetch_movie_data(&self, title: &str) -> Result<Option<MovieMetadata>>;
}
