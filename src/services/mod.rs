pub mod posters;
pub mod providers;
pub mod recommendations;

pub use posters::PosterFetcher;
pub use recommendations::RecommendationEngine;
