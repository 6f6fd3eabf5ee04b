//! # Storage Layer
//!
//! A catalog lives in a single flat file. Two formats are supported and both
//! present the same contract through [`MovieStorage`]:
//!
//! - [`csv_storage::CsvStorage`]: header row plus one row per movie.
//! - [`json_storage::JsonStorage`]: one JSON object keyed by title.
//!
//! Every mutation reads the whole file, changes the catalog in memory and
//! rewrites the whole file before returning. Nothing is cached between calls.
//!
//! Missing or unreadable files list as an empty catalog. A mutation never
//! rewrites a file it failed to parse.

use std::path::Path;

use crate::error::{CatalogError, Result};
use crate::model::{Catalog, Movie};

pub mod atomic;
pub mod csv_storage;
pub mod json_storage;

use csv_storage::CsvStorage;
use json_storage::JsonStorage;

/// Abstract interface for a movie catalog file.
///
/// Implementations only provide whole-file `load_movies`/`save_movies`; the
/// catalog operations are built on top of those two.
pub trait MovieStorage {
    /// The file backing this storage, for diagnostics.
    fn file_path(&self) -> &Path;

    /// Read the full catalog. A missing file is an empty catalog; malformed
    /// content is an error.
    fn load_movies(&self) -> Result<Catalog>;

    /// Replace the file contents with `movies`.
    fn save_movies(&self, movies: &Catalog) -> Result<()>;

    /// Full catalog. Never fails: read problems are logged and yield an
    /// empty catalog.
    fn list_movies(&self) -> Catalog {
        match self.load_movies() {
            Ok(movies) => movies,
            Err(e) => {
                log::error!(
                    "Error loading movies from {}: {}",
                    self.file_path().display(),
                    e
                );
                Catalog::new()
            }
        }
    }

    /// Add a movie unless its title is already taken.
    ///
    /// The six fields of an entry arrive bundled in `movie`: `title` is the
    /// key and `details` holds `year`, `rating`, `poster`, `imdb_url` and
    /// `notes`, all stored verbatim. Build one with [`Movie::new`], whose
    /// arguments follow that order. Non-finite ratings are logged and
    /// nothing is written.
    fn add_movie(&self, movie: Movie) -> Result<()> {
        if !movie.details.rating.is_finite() {
            log::warn!(
                "Invalid rating {} for movie '{}'.",
                movie.details.rating,
                movie.title
            );
            return Ok(());
        }

        let mut movies = self.load_movies()?;
        if movies.contains_key(&movie.title) {
            log::warn!("Movie '{}' already exists.", movie.title);
            return Ok(());
        }

        let title = movie.title;
        movies.insert(title.clone(), movie.details);
        self.save_movies(&movies)?;
        log::debug!("Movie '{}' added successfully.", title);
        Ok(())
    }

    fn delete_movie(&self, title: &str) -> Result<()> {
        let mut movies = self.load_movies()?;
        if movies.remove(title).is_none() {
            log::warn!("Movie '{}' not found.", title);
            return Ok(());
        }

        self.save_movies(&movies)?;
        log::debug!("Movie '{}' deleted successfully.", title);
        Ok(())
    }

    /// Overwrite the rating of an existing movie. Unknown titles and
    /// non-finite ratings are a no-op.
    fn update_movie(&self, title: &str, rating: f64) -> Result<()> {
        if !rating.is_finite() {
            log::warn!("Invalid rating {} for movie '{}'.", rating, title);
            return Ok(());
        }

        let mut movies = self.load_movies()?;
        match movies.get_mut(title) {
            Some(details) => details.rating = rating,
            None => {
                log::warn!("Movie '{}' not found.", title);
                return Ok(());
            }
        }

        self.save_movies(&movies)?;
        log::debug!("Movie '{}' updated with new rating: {}.", title, rating);
        Ok(())
    }

    /// Overwrite the notes of an existing movie.
    ///
    /// Unlike the other mutations this one fails with
    /// [`CatalogError::MovieNotFound`] when the title is unknown, and leaves
    /// the file untouched.
    fn update_movie_notes(&self, title: &str, notes: &str) -> Result<()> {
        let mut movies = self.load_movies()?;
        let details = movies
            .get_mut(title)
            .ok_or_else(|| CatalogError::MovieNotFound(title.to_string()))?;
        details.notes = notes.to_string();

        self.save_movies(&movies)?;
        log::debug!("Notes for movie '{}' updated.", title);
        Ok(())
    }
}

/// Persisted file formats, picked from the storage file's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageFormat {
    Csv,
    Json,
}

impl StorageFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("csv") => Ok(StorageFormat::Csv),
            Some("json") => Ok(StorageFormat::Json),
            _ => Err(CatalogError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Open the storage matching `path`'s extension, creating an empty catalog
/// file when needed.
pub fn open_storage(path: &Path) -> Result<Box<dyn MovieStorage>> {
    let format = StorageFormat::from_path(path)?;
    log::debug!("Using {:?} storage at {}", format, path.display());

    let storage: Box<dyn MovieStorage> = match format {
        StorageFormat::Csv => Box::new(CsvStorage::new(path)?),
        StorageFormat::Json => Box::new(JsonStorage::new(path)?),
    };
    Ok(storage)
}
