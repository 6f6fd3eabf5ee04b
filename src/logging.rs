/// Logs go to stderr so they never interleave with the menu on stdout.
pub fn setup_logging() {
    let mut builder = env_logger::Builder::new();

    builder
        .filter(None, log::LevelFilter::Warn)
        .filter(Some("movie_catalog"), log::LevelFilter::Info)
        .format_timestamp(None)
        .target(env_logger::Target::Stderr);

    if let Ok(rust_log) = std::env::var("RUST_LOG") {
        builder.parse_filters(&rust_log);
    }

    builder.init();
}
