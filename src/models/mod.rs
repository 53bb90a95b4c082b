pub mod metadata;
pub mod movie;
pub mod navigation;

pub use metadata::{MovieDetails, Rating, TmdbCredits, TmdbMovie};
pub use movie::{CatalogRecord, Movie, RankedNeighbor};
pub use navigation::{
    NavigationState, Notice, NoticeLevel, RecommendedMovie, SelectedMovie, Transition,
};
