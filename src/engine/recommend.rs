use super::{cosine_similarity, round_score, FeatureScaler};
use crate::catalog::{Catalog, FEATURE_COUNT};
use serde::Serialize;
use tracing::info;

/// Number of recommendations returned when the caller does not ask for a count
pub const DEFAULT_RECOMMENDATIONS: usize = 5;

/// One ranked result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub song: String,
    pub artist: String,
    /// Cosine similarity rounded to three decimals
    pub score: f64,
}

/// Nearest-neighbour search over standardized audio features
///
/// Owns the catalog and the normalized feature matrix, both fixed at build
/// time. Queries are read-only, so a built engine can be shared freely.
#[derive(Debug, Clone)]
pub struct SimilarityEngine {
    catalog: Catalog,
    scaler: FeatureScaler,
    /// One standardized vector per catalog row, index-aligned
    normalized: Vec<[f64; FEATURE_COUNT]>,
}

impl SimilarityEngine {
    pub fn build(catalog: Catalog) -> Self {
        let raw: Vec<[f64; FEATURE_COUNT]> =
            catalog.iter().map(|item| item.features.to_array()).collect();

        let scaler = FeatureScaler::fit(&raw);
        let normalized = raw.iter().map(|row| scaler.transform(row)).collect();

        info!("Similarity engine ready over {} songs", catalog.len());

        Self {
            catalog,
            scaler,
            normalized,
        }
    }

    /// Top `n` songs most similar to `song_title`, best first
    ///
    /// An unknown title yields an empty list. The queried song never appears
    /// in its own results; equal scores are ordered by catalog position.
    pub fn recommend(&self, song_title: &str, n: usize) -> Vec<Recommendation> {
        let Some(query) = self.catalog.index_of(song_title) else {
            return Vec::new();
        };
        if n == 0 {
            return Vec::new();
        }

        let target = &self.normalized[query];
        let mut ranked: Vec<(usize, f64)> = self
            .normalized
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != query)
            .map(|(i, v)| (i, cosine_similarity(target, v)))
            .collect();

        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

        ranked
            .into_iter()
            .take(n)
            .map(|(i, score)| {
                let item = self.catalog.row_at(i);
                Recommendation {
                    song: item.song.clone(),
                    artist: item.artist.clone(),
                    score: round_score(score),
                }
            })
            .collect()
    }

    pub fn recommend_default(&self, song_title: &str) -> Vec<Recommendation> {
        self.recommend(song_title, DEFAULT_RECOMMENDATIONS)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn scaler(&self) -> &FeatureScaler {
        &self.scaler
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }
}
