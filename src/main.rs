use clap::Parser;

use movie_catalog::config::{self, Args, Config};

mod logging;

#[tokio::main]
async fn main() {
    config::load_env();
    logging::setup_logging();

    let config = Config::from_args(Args::parse());

    if let Err(e) = movie_catalog::run(config).await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
