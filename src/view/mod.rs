//! Pure mapping from API data and session state to the structures the
//! terminal renderer draws. Nothing here touches the terminal or network.

pub mod detail;
pub mod genres;
pub mod grid;
pub mod pagination;

pub use detail::{DetailView, MovieDetailView, movie_detail};
pub use genres::{GenreBar, genre_filters};
pub use grid::{GridView, MovieCard, movie_grid};
pub use pagination::{PageControl, PaginationView, paginate};
