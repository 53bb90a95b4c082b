pub mod catalog;
pub mod navigation;
pub mod providers;
pub mod ranking;
pub mod similarity;

pub use catalog::CatalogStore;
pub use navigation::Navigator;
pub use providers::{MetadataEnricher, TmdbProvider};
pub use ranking::{RankingEngine, DEFAULT_RECOMMENDATIONS};
pub use similarity::SimilarityTable;
