use rand::seq::IndexedRandom;

use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::{
    clients::MovieLookup,
    error::{CatalogError, Result},
    extractors::movie_extractor::MovieExtractor,
    model::Catalog,
    persisters::MovieStorage,
    stats, website,
};

const MENU: &str = "
********** My Movies Database **********

Menu:
0. Exit
1. List movies
2. Add movie
3. Delete movie
4. Update movie
5. Stats
6. Random movie
7. Search movie
8. Movies sorted by rating
9. Generate website
10. Update movie rating
";

#[derive(Debug, Clone)]
pub struct WebsiteOptions {
    pub template_path: PathBuf,
    pub output_path: PathBuf,
    pub site_title: String,
}

/// Interactive menu over a catalog storage.
pub struct MovieApp<L: MovieLookup> {
    storage: Box<dyn MovieStorage>,
    lookup: L,
    website: WebsiteOptions,
}

impl<L: MovieLookup> MovieApp<L> {
    pub fn new(storage: Box<dyn MovieStorage>, lookup: L, website: WebsiteOptions) -> Self {
        MovieApp {
            storage,
            lookup,
            website,
        }
    }

    /// Runs the menu until the user picks `0` or `input` runs out.
    pub async fn run<R: BufRead, W: Write>(&self, mut input: R, mut output: W) -> Result<()> {
        loop {
            writeln!(output, "{}", MENU)?;

            let Some(choice) = prompt(&mut input, &mut output, "Choose an option: ")? else {
                writeln!(output)?;
                break;
            };

            let outcome = match choice.trim() {
                "1" => self.command_list_movies(&mut output),
                "2" => self.command_add_movie(&mut input, &mut output).await,
                "3" => self.command_delete_movie(&mut input, &mut output),
                "4" => self.command_update_movie(&mut input, &mut output),
                "5" => self.command_movie_stats(&mut output),
                "6" => self.command_random_movie(&mut output),
                "7" => self.command_search_movie(&mut input, &mut output),
                "8" => self.command_sort_by_rating(&mut output),
                "9" => self.command_generate_website(&mut output),
                "10" => self.command_update_rating(&mut input, &mut output),
                "0" => {
                    writeln!(output, "Exiting the Movie App.")?;
                    break;
                }
                _ => {
                    writeln!(output, "Invalid choice. Please try again.")?;
                    Ok(())
                }
            };

            if let Err(e) = outcome {
                log::error!("Command failed: {}", e);
                writeln!(output, "An error occurred: {}", e)?;
            }
        }

        Ok(())
    }

    fn command_list_movies<W: Write>(&self, output: &mut W) -> Result<()> {
        let movies = self.storage.list_movies();
        writeln!(output, "There are {} movies in the list.", movies.len())?;

        if movies.is_empty() {
            writeln!(output, "No movies found.")?;
            return Ok(());
        }

        for (title, details) in &movies {
            writeln!(
                output,
                "{}: {} - {} stars, IMDb URL: {}",
                title, details.year, details.rating, details.imdb_url
            )?;
        }
        Ok(())
    }

    async fn command_add_movie<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        output: &mut W,
    ) -> Result<()> {
        let Some(title) = prompt(input, output, "Enter movie title: ")? else {
            return Ok(());
        };
        let title = title.trim();
        if title.is_empty() {
            writeln!(output, "Movie title cannot be empty.")?;
            return Ok(());
        }

        if self.storage.list_movies().contains_key(title) {
            writeln!(output, "Movie '{}' already exists.", title)?;
            return Ok(());
        }

        let Some(metadata) = self.lookup.fetch_movie_data(title).await? else {
            writeln!(output, "Movie not found.")?;
            return Ok(());
        };

        let note = prompt(input, output, "Enter movie notes (optional): ")?.unwrap_or_default();
        let movie = MovieExtractor::extract_movie_from_metadata(title, &metadata, &note);

        self.storage.add_movie(movie)?;
        writeln!(output, "Movie '{}' added successfully.", title)?;
        Ok(())
    }

    fn command_delete_movie<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        output: &mut W,
    ) -> Result<()> {
        let Some(title) = prompt(input, output, "Enter movie title to delete: ")? else {
            return Ok(());
        };
        let title = title.trim();

        if !self.storage.list_movies().contains_key(title) {
            writeln!(output, "Movie '{}' not found.", title)?;
            return Ok(());
        }

        self.storage.delete_movie(title)?;
        writeln!(output, "Movie '{}' deleted successfully.", title)?;
        Ok(())
    }

    fn command_update_movie<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        output: &mut W,
    ) -> Result<()> {
        let Some(title) = prompt(input, output, "Enter movie title to update: ")? else {
            return Ok(());
        };
        let title = title.trim();
        let note = prompt(input, output, "Enter new note: ")?.unwrap_or_default();

        match self.storage.update_movie_notes(title, &note) {
            Ok(()) => writeln!(output, "Movie '{}' successfully updated.", title)?,
            Err(CatalogError::MovieNotFound(_)) => {
                writeln!(output, "Movie '{}' not found.", title)?
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    fn command_update_rating<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        output: &mut W,
    ) -> Result<()> {
        let Some(title) = prompt(input, output, "Enter movie title to update: ")? else {
            return Ok(());
        };
        let title = title.trim();
        if !self.storage.list_movies().contains_key(title) {
            writeln!(output, "Movie '{}' not found.", title)?;
            return Ok(());
        }

        let rating = prompt(input, output, "Enter new rating (0-10): ")?.unwrap_or_default();
        let Some(rating) = rating.trim().parse::<f64>().ok().filter(|r| r.is_finite()) else {
            writeln!(output, "Invalid rating '{}'.", rating.trim())?;
            return Ok(());
        };

        self.storage.update_movie(title, rating)?;
        writeln!(output, "Movie '{}' updated with new rating: {}.", title, rating)?;
        Ok(())
    }

    fn command_movie_stats<W: Write>(&self, output: &mut W) -> Result<()> {
        let Some(stats) = stats::rating_stats(&self.storage.list_movies()) else {
            writeln!(output, "No movies available for statistics.")?;
            return Ok(());
        };

        writeln!(output, "Average rating of all movies: {:.2} stars.", stats.average)?;
        writeln!(output, "Median rating of all movies: {:.2} stars.", stats.median)?;
        writeln!(
            output,
            "Best rated movie: {} with {} stars.",
            stats.best.0, stats.best.1
        )?;
        writeln!(
            output,
            "Worst rated movie: {} with {} stars.",
            stats.worst.0, stats.worst.1
        )?;
        Ok(())
    }

    fn command_random_movie<W: Write>(&self, output: &mut W) -> Result<()> {
        let movies = self.storage.list_movies();
        let titles: Vec<&String> = movies.keys().collect();

        match titles.choose(&mut rand::rng()) {
            Some(title) => writeln!(output, "Your movie for tonight is {}.", title)?,
            None => writeln!(output, "No movies available to pick from.")?,
        }
        Ok(())
    }

    fn command_search_movie<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        output: &mut W,
    ) -> Result<()> {
        let Some(query) = prompt(
            input,
            output,
            "Enter movie title or part of the title to search: ",
        )?
        else {
            return Ok(());
        };

        let found = search_movies(&self.storage.list_movies(), &query);
        if found.is_empty() {
            writeln!(output, "No movies found.")?;
            return Ok(());
        }

        for (title, details) in &found {
            writeln!(output, "{}: {} - {} stars", title, details.year, details.rating)?;
        }
        Ok(())
    }

    fn command_sort_by_rating<W: Write>(&self, output: &mut W) -> Result<()> {
        let movies = self.storage.list_movies();
        if movies.is_empty() {
            writeln!(output, "No movies found.")?;
            return Ok(());
        }

        for (title, rating) in stats::sorted_by_rating(&movies) {
            writeln!(output, "{}: {} - {} stars", title, movies[title].year, rating)?;
        }
        Ok(())
    }

    fn command_generate_website<W: Write>(&self, output: &mut W) -> Result<()> {
        let movies = self.storage.list_movies();
        if movies.is_empty() {
            writeln!(output, "No movies available to generate website.")?;
            return Ok(());
        }

        website::generate_website(
            &movies,
            &self.website.template_path,
            &self.website.output_path,
            &self.website.site_title,
        )?;
        writeln!(output, "Website was generated successfully.")?;
        Ok(())
    }
}

/// Case-insensitive title search.
pub fn search_movies(movies: &Catalog, query: &str) -> Catalog {
    let query = query.trim().to_lowercase();
    movies
        .iter()
        .filter(|(title, _)| title.to_lowercase().contains(&query))
        .map(|(title, details)| (title.clone(), details.clone()))
        .collect()
}

/// Prints `message` and reads one line. `None` once input is exhausted.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
) -> Result<Option<String>> {
    write!(output, "{}", message)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MovieDetails;
    use std::io::Cursor;

    #[test]
    fn search_ignores_case() {
        let movies: Catalog = ["The Matrix", "Matrix Reloaded", "Up"]
            .into_iter()
            .map(|title| (title.to_string(), MovieDetails::default()))
            .collect();

        let found = search_movies(&movies, "MATRIX");

        assert_eq!(found.len(), 2);
        assert!(found.contains_key("The Matrix"));
        assert!(!found.contains_key("Up"));
    }

    #[test]
    fn prompt_strips_line_endings_and_detects_eof() {
        let mut input = Cursor::new("Titanic\r\n");
        let mut output = Vec::new();

        let first = prompt(&mut input, &mut output, "Title: ").unwrap();
        let second = prompt(&mut input, &mut output, "Title: ").unwrap();

        assert_eq!(first.as_deref(), Some("Titanic"));
        assert_eq!(second, None);
        assert_eq!(String::from_utf8(output).unwrap(), "Title: Title: ");
    }
}
