use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::atomic::write_atomically;
use super::MovieStorage;
use crate::error::Result;
use crate::model::Catalog;

/// Catalog stored as a single JSON object keyed by title.
#[derive(Debug)]
pub struct JsonStorage {
    file_path: PathBuf,
}

impl JsonStorage {
    /// Opens `file_path`, resetting it to `{}` when it is missing or does
    /// not hold a valid catalog.
    pub fn new<P: AsRef<Path>>(file_path: P) -> Result<Self> {
        let storage = JsonStorage {
            file_path: file_path.as_ref().to_path_buf(),
        };

        let needs_init = match fs::read_to_string(&storage.file_path) {
            Ok(content) => match serde_json::from_str::<Catalog>(&content) {
                Ok(_) => false,
                Err(e) => {
                    log::warn!(
                        "Invalid movie file {}, starting an empty catalog: {}",
                        storage.file_path.display(),
                        e
                    );
                    true
                }
            },
            Err(e) => {
                log::info!(
                    "Creating movie file {} ({})",
                    storage.file_path.display(),
                    e
                );
                true
            }
        };

        if needs_init {
            storage.save_movies(&Catalog::new())?;
        }

        Ok(storage)
    }
}

impl MovieStorage for JsonStorage {
    fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn load_movies(&self) -> Result<Catalog> {
        let content = match fs::read_to_string(&self.file_path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Catalog::new()),
            Err(e) => return Err(e.into()),
        };

        Ok(serde_json::from_str(&content)?)
    }

    fn save_movies(&self, movies: &Catalog) -> Result<()> {
        write_atomically(&self.file_path, |file| {
            serde_json::to_writer_pretty(&mut *file, movies)?;
            file.write_all(b"\n")?;
            Ok(())
        })?;

        log::debug!(
            "Saved {} movies to {}",
            movies.len(),
            self.file_path.display()
        );
        Ok(())
    }
}
