mod handle;
mod recommend;
mod scaler;
mod similarity;


pub use handle::EngineHandle;
pub use recommend::{Recommendation, SimilarityEngine, DEFAULT_RECOMMENDATIONS};
pub use scaler::FeatureScaler;
pub use similarity::{cosine_similarity, round_score};
