pub mod movie_app;
