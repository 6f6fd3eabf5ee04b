use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Movie not found: {0}")]
    MovieNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unsupported file format for {0}. Use either a JSON or CSV file.")]
    UnsupportedFormat(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
