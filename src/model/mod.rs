pub mod movie;

pub use movie::{Catalog, Movie, MovieDetails};
