#[cfg(test)]
mod tests {

    use async_trait::async_trait;
    use movie_catalog::{
        app::movie_app::{MovieApp, WebsiteOptions},
        clients::{omdb_client::MovieMetadata, MovieLookup},
        error::Result,
        model::Movie,
        persisters::{open_storage, MovieStorage},
    };
    use std::{
        fs::File,
        io::{Cursor, Read},
        path::Path,
    };
    use tempfile::TempDir;

    struct FakeOmdb;

    #[async_trait]
    impl MovieLookup for FakeOmdb {
        async fn fetch_movie_data(&self, title: &str) -> Result<Option<MovieMetadata>> {
            if title != "Titanic" {
                return Ok(None);
            }
            Ok(Some(MovieMetadata {
                title: Some("Titanic".to_string()),
                year: Some("1997".to_string()),
                imdb_rating: Some("7.9".to_string()),
                poster: Some("https://img/titanic.jpg".to_string()),
                imdb_id: Some("tt0120338".to_string()),
            }))
        }
    }

    fn build_app(dir: &TempDir, storage_file: &str) -> MovieApp<FakeOmdb> {
        let storage = open_storage(&dir.path().join(storage_file)).unwrap();
        let website = WebsiteOptions {
            template_path: dir.path().join("index_template.html"),
            output_path: dir.path().join("index.html"),
            site_title: "Test Movies".to_string(),
        };
        MovieApp::new(storage, FakeOmdb, website)
    }

    async fn run_script(app: &MovieApp<FakeOmdb>, script: &str) -> String {
        let mut output = Vec::new();
        app.run(Cursor::new(script.to_string()), &mut output)
            .await
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[tokio::test]
    async fn adds_lists_and_updates_movies() {
        for storage_file in ["movies.json", "movies.csv"] {
            let dir = TempDir::new().unwrap();
            let app = build_app(&dir, storage_file);

            let output = run_script(
                &app,
                "2\nTitanic\nclassic\n1\n4\nTitanic\nmust rewatch\n4\nNope\nx\n10\nTitanic\n9.1\n0\n",
            )
            .await;

            assert!(output.contains("Movie 'Titanic' added successfully."));
            assert!(output.contains("There are 1 movies in the list."));
            assert!(output.contains(
                "Titanic: 1997 - 7.9 stars, IMDb URL: https://www.imdb.com/title/tt0120338/"
            ));
            assert!(output.contains("Movie 'Titanic' successfully updated."));
            assert!(output.contains("Movie 'Nope' not found."));
            assert!(output.contains("Movie 'Titanic' updated with new rating: 9.1."));
            assert!(output.ends_with("Exiting the Movie App.\n"));

            let reopened = open_storage(&dir.path().join(storage_file)).unwrap();
            let movies = reopened.list_movies();
            assert_eq!(movies["Titanic"].notes, "must rewatch");
            assert_eq!(movies["Titanic"].rating, 9.1);
        }
    }

    #[tokio::test]
    async fn rejects_unknown_and_duplicate_titles() {
        let dir = TempDir::new().unwrap();
        let app = build_app(&dir, "movies.json");

        let output = run_script(&app, "2\nTitanic\n\n2\nTitanic\n2\nNot A Movie\n0\n").await;

        assert!(output.contains("Movie 'Titanic' already exists."));
        assert!(output.contains("Movie not found."));
        let movies = open_storage(&dir.path().join("movies.json"))
            .unwrap()
            .list_movies();
        assert_eq!(movies.len(), 1);
        assert_eq!(movies["Titanic"].notes, "");
    }

    #[tokio::test]
    async fn non_finite_rating_input_is_rejected() {
        for storage_file in ["movies.json", "movies.csv"] {
            let dir = TempDir::new().unwrap();
            let app = build_app(&dir, storage_file);

            let output =
                run_script(&app, "2\nTitanic\n\n10\nTitanic\ninf\n10\nTitanic\nNaN\n0\n").await;

            assert!(output.contains("Invalid rating 'inf'."));
            assert!(output.contains("Invalid rating 'NaN'."));
            assert!(!output.contains("updated with new rating"));
            let movies = open_storage(&dir.path().join(storage_file))
                .unwrap()
                .list_movies();
            assert_eq!(movies["Titanic"].rating, 7.9);
        }
    }

    #[tokio::test]
    async fn stats_search_sort_and_delete() {
        let dir = TempDir::new().unwrap();
        let storage = open_storage(&dir.path().join("movies.csv")).unwrap();
        for (title, rating) in [("Alien", 8.5), ("Cats", 2.8), ("Up", 8.3)] {
            storage
                .add_movie(Movie::new(title, "2000", rating, "p.jpg", "#", ""))
                .unwrap();
        }
        let app = build_app(&dir, "movies.csv");

        let output = run_script(&app, "5\n7\nup\n8\n3\nCats\n3\nCats\n6\n0\n").await;

        assert!(output.contains("Average rating of all movies: 6.53 stars."));
        assert!(output.contains("Median rating of all movies: 8.30 stars."));
        assert!(output.contains("Best rated movie: Alien with 8.5 stars."));
        assert!(output.contains("Worst rated movie: Cats with 2.8 stars."));
        assert!(output.contains("Up: 2000 - 8.3 stars\n"));
        let alien = output.find("Alien: 2000 - 8.5 stars").unwrap();
        let cats = output.find("Cats: 2000 - 2.8 stars").unwrap();
        assert!(alien < cats);
        assert!(output.contains("Movie 'Cats' deleted successfully."));
        assert!(output.contains("Movie 'Cats' not found."));
        assert!(output.contains("Your movie for tonight is "));
    }

    #[tokio::test]
    async fn generates_website_from_catalog() {
        let dir = TempDir::new().unwrap();
        let app = build_app(&dir, "movies.json");

        let output = run_script(&app, "9\n2\nTitanic\nclassic\n9\n").await;

        assert!(output.contains("No movies available to generate website."));
        assert!(output.contains("Website was generated successfully."));

        let page = get_file_content(&dir.path().join("index.html"));
        assert!(page.contains("<h1>Test Movies</h1>"));
        assert!(page.contains("<h2>Titanic</h2>"));
        assert!(page.contains("<div class=\"movie-note\">classic</div>"));
    }

    #[tokio::test]
    async fn invalid_choice_and_end_of_input() {
        let dir = TempDir::new().unwrap();
        let app = build_app(&dir, "movies.json");

        let output = run_script(&app, "42\n1\n").await;

        assert!(output.contains("Invalid choice. Please try again."));
        assert!(output.contains("No movies found."));
        assert!(!output.contains("Exiting the Movie App."));
    }

    fn get_file_content(file_path: &Path) -> String {
        let mut file = match File::open(file_path) {
            Ok(file) => file,
            Err(e) => panic!("Error opening generated file: {}", e),
        };

        let mut content = String::new();
        if let Err(e) = file.read_to_string(&mut content) {
            eprintln!("Error reading the file: {}", e);
            panic!("Failed to read file");
        }

        content
    }
}
