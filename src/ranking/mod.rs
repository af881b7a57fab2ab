pub mod engine;
pub mod model;

pub use engine::rank_top_crops;
pub use model::{RankingOptions, RankingOutcome, RankingResponse};
