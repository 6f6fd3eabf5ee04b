use clap::Parser;
use std::path::PathBuf;

use crate::clients::omdb_client::DEFAULT_OMDB_URL;

/// Movie App with custom storage file
#[derive(Parser, Debug)]
#[command(name = "movie_catalog", version, about)]
pub struct Args {
    /// The storage file for movie data (CSV or JSON)
    pub storage_file: PathBuf,

    /// HTML template used by "Generate website"
    #[arg(long, default_value = "index_template.html")]
    pub template: PathBuf,

    /// Where "Generate website" writes the page
    #[arg(long, default_value = "index.html")]
    pub output: PathBuf,

    /// Heading of the generated page
    #[arg(long, default_value = "My Movie App")]
    pub site_title: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub storage_file: PathBuf,
    pub template_path: PathBuf,
    pub website_path: PathBuf,
    pub site_title: String,
    pub omdb_api_key: Option<String>,
    pub omdb_url: String,
}

impl Config {
    /// Combines command line arguments with `OMDB_API_KEY` / `OMDB_API_URL`
    /// from the environment.
    pub fn from_args(args: Args) -> Self {
        let omdb_api_key = std::env::var("OMDB_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
        let omdb_url =
            std::env::var("OMDB_API_URL").unwrap_or_else(|_| DEFAULT_OMDB_URL.to_string());

        Config {
            storage_file: args.storage_file,
            template_path: args.template,
            website_path: args.output,
            site_title: args.site_title,
            omdb_api_key,
            omdb_url,
        }
    }
}

/// Loads `.env`, or the file named by `MOVIE_CATALOG_ENV_PATH`. Missing
/// files are ignored.
pub fn load_env() {
    if let Ok(path) = std::env::var("MOVIE_CATALOG_ENV_PATH") {
        dotenvy::from_path(path).ok();
    } else {
        dotenvy::dotenv().ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_for_website_options() {
        let args = Args::try_parse_from(["movie_catalog", "movies.json"]).unwrap();

        assert_eq!(args.storage_file, PathBuf::from("movies.json"));
        assert_eq!(args.template, PathBuf::from("index_template.html"));
        assert_eq!(args.output, PathBuf::from("index.html"));
        assert_eq!(args.site_title, "My Movie App");
    }

    #[test]
    fn storage_file_is_required() {
        assert!(Args::try_parse_from(["movie_catalog"]).is_err());
    }
}
