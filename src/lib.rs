// Public API exports
pub mod catalog;
pub mod config;
pub mod engine;

// Re-export main types for convenience
pub use catalog::{
    AudioFeatures, Catalog, CatalogError, CatalogItem, CatalogLoader, ColumnMapping, RawTable,
    SongTitles,
};

pub use engine::{
    EngineHandle, FeatureScaler, Recommendation, SimilarityEngine, DEFAULT_RECOMMENDATIONS,
};

pub use config::RecommenderConfig;
