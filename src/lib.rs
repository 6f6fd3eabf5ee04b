use std::io;

pub mod app;
use app::movie_app::{MovieApp, WebsiteOptions};

pub mod clients;
use clients::omdb_client::OmdbClient;

pub mod config;
use config::Config;

pub mod error;
pub mod extractors;
pub mod model;

pub mod persisters;
pub mod stats;
pub mod website;

pub async fn run(config: Config) -> error::Result<()> {
    let storage = persisters::open_storage(&config.storage_file)?;

    let api_key = config.omdb_api_key.unwrap_or_else(|| {
        log::warn!("OMDB_API_KEY is not set, movie lookups will fail");
        String::new()
    });
    let omdb_client = OmdbClient::new(&api_key)?.with_base_url(&config.omdb_url);

    let website = WebsiteOptions {
        template_path: config.template_path,
        output_path: config.website_path,
        site_title: config.site_title,
    };

    let movie_app = MovieApp::new(storage, omdb_client, website);
    movie_app.run(io::stdin().lock(), io::stdout()).await?;

    log::info!(
        "Catalog saved in {}. See you next time!",
        config.storage_file.display()
    );
    Ok(())
}
