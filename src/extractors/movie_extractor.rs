use crate::{
    clients::omdb_client::MovieMetadata,
    model::movie::{parse_rating, Movie, DEFAULT_RATING, NO_POSTER, UNKNOWN_YEAR},
};

/// Shown instead of an IMDb link when the lookup has no id.
pub const NO_IMDB_LINK: &str = "#";

#[derive(Debug)]
pub struct MovieExtractor {}

impl MovieExtractor {
    /// Builds the catalog record for `title` out of a metadata lookup.
    /// Fields the lookup left out, or reported as `N/A`, get placeholders.
    pub fn extract_movie_from_metadata(
        title: &str,
        metadata: &MovieMetadata,
        note: &str,
    ) -> Movie {
        let year = MovieExtractor::known(&metadata.year).unwrap_or(UNKNOWN_YEAR);
        let rating = MovieExtractor::known(&metadata.imdb_rating)
            .and_then(parse_rating)
            .unwrap_or(DEFAULT_RATING);
        let poster = MovieExtractor::known(&metadata.poster).unwrap_or(NO_POSTER);
        let imdb_url = MovieExtractor::known(&metadata.imdb_id)
            .map(|id| format!("https://www.imdb.com/title/{}/", id))
            .unwrap_or_else(|| NO_IMDB_LINK.to_string());

        Movie::new(title, year, rating, poster, &imdb_url, note)
    }

    fn known(field: &Option<String>) -> Option<&str> {
        field
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty() && *value != "N/A")
    }
}
