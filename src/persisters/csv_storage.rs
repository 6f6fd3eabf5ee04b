use csv::{ReaderBuilder, StringRecord, Writer};

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use super::atomic::write_atomically;
use super::MovieStorage;
use crate::error::Result;
use crate::model::movie::{parse_rating, DEFAULT_RATING, NO_IMDB_URL, NO_POSTER, UNKNOWN_YEAR};
use crate::model::{Catalog, Movie, MovieDetails};

/// Catalog stored as `Title,Year,Rating,Poster,imdb_url,notes` rows.
#[derive(Debug)]
pub struct CsvStorage {
    file_path: PathBuf,
}

impl CsvStorage {
    /// Opens `file_path`, writing a header-only file if it can't be read.
    pub fn new<P: AsRef<Path>>(file_path: P) -> Result<Self> {
        let storage = CsvStorage {
            file_path: file_path.as_ref().to_path_buf(),
        };

        if let Err(e) = File::open(&storage.file_path) {
            log::info!(
                "Creating movie file {} ({})",
                storage.file_path.display(),
                e
            );
            storage.save_movies(&Catalog::new())?;
        }

        Ok(storage)
    }
}

impl MovieStorage for CsvStorage {
    fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn load_movies(&self) -> Result<Catalog> {
        let file = match File::open(&self.file_path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Catalog::new()),
            Err(e) => return Err(e.into()),
        };

        let mut reader = ReaderBuilder::new().flexible(true).from_reader(file);
        let columns = CsvColumns::from_headers(reader.headers()?);

        let mut movies = Catalog::new();
        for record in reader.records() {
            let movie = columns.movie_from_record(&record?);
            movies.insert(movie.title, movie.details);
        }

        Ok(movies)
    }

    fn save_movies(&self, movies: &Catalog) -> Result<()> {
        write_atomically(&self.file_path, |file| {
            let mut wrt = Writer::from_writer(file);
            wrt.write_record(Movie::csv_titles())?;
            for (title, details) in movies {
                wrt.write_record(details.to_csvable_array(title))?;
            }
            wrt.flush()?;
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

/// Column positions resolved from the header row, so a reordered or
/// partial header still reads.
#[derive(Debug)]
struct CsvColumns {
    title: Option<usize>,
    year: Option<usize>,
    rating: Option<usize>,
    poster: Option<usize>,
    imdb_url: Option<usize>,
    notes: Option<usize>,
}

impl CsvColumns {
    fn from_headers(headers: &StringRecord) -> Self {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);

        CsvColumns {
            title: find("Title"),
            year: find("Year"),
            rating: find("Rating"),
            poster: find("Poster"),
            imdb_url: find("imdb_url"),
            notes: find("notes"),
        }
    }

    fn movie_from_record(&self, record: &StringRecord) -> Movie {
        let field = |column: Option<usize>| column.and_then(|i| record.get(i));
        let text_or = |column: Option<usize>, fallback: &str| {
            field(column).unwrap_or(fallback).to_string()
        };

        let title = text_or(self.title, "");
        let rating = match field(self.rating) {
            Some(text) => parse_rating(text).unwrap_or_else(|| {
                if !text.trim().is_empty() {
                    log::warn!("Invalid rating '{}' for movie '{}'", text, title);
                }
                DEFAULT_RATING
            }),
            None => DEFAULT_RATING,
        };

        Movie {
            details: MovieDetails {
                year: text_or(self.year, UNKNOWN_YEAR),
                rating,
                poster: text_or(self.poster, NO_POSTER),
                imdb_url: text_or(self.imdb_url, NO_IMDB_URL),
                notes: text_or(self.notes, ""),
            },
            title,
        }
    }
}
