use super::{AudioFeatures, Catalog, CatalogError, CatalogItem, Column, ColumnMapping, RawTable};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

/// Default cap on catalog size
pub const DEFAULT_MAX_SIZE: usize = 20_000;

/// Default sampling seed
pub const DEFAULT_SEED: u64 = 42;

/// Builder that turns a raw table into a validated catalog
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    columns: ColumnMapping,
    max_size: usize,
    seed: u64,
}

impl CatalogLoader {
    /// Create a loader with the Spotify column mapping and default limits
    pub fn new() -> Self {
        Self {
            columns: ColumnMapping::default(),
            max_size: DEFAULT_MAX_SIZE,
            seed: DEFAULT_SEED,
        }
    }

    pub fn columns(mut self, columns: ColumnMapping) -> Self {
        self.columns = columns;
        self
    }

    /// Set the maximum number of rows kept after cleaning
    pub fn max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    /// Set the seed used when sampling down to `max_size`
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn load_path(&self, path: impl AsRef<Path>) -> Result<Catalog, CatalogError> {
        let path = path.as_ref();
        info!("Loading catalog from {}", path.display());
        self.load(RawTable::from_path(path)?)
    }

    /// Validate, clean, deduplicate and size-bound a raw table
    ///
    /// Rows with a missing or non-finite feature are dropped, as are rows
    /// without a title. Titles are deduplicated keeping the first occurrence.
    /// If more than `max_size` rows remain, a seeded sample of exactly
    /// `max_size` rows is kept in source order.
    pub fn load(&self, raw: RawTable) -> Result<Catalog, CatalogError> {
        if self.max_size == 0 {
            return Err(CatalogError::InvalidConfig(
                "max_size must be at least 1".to_string(),
            ));
        }

        let resolved = self.columns.resolve(raw.headers())?;

        let mut items = Vec::new();
        let mut seen = HashSet::new();
        let mut missing_features = 0usize;
        let mut untitled = 0usize;
        let mut duplicates = 0usize;

        for row in raw.rows() {
            let raw_cell = |column: Column| {
                row.get(resolved.position(column))
                    .map(|s| s.as_str())
                    .unwrap_or("")
            };
            let cell = |column: Column| raw_cell(column).trim();

            let features = match (
                parse_number(cell(Column::Danceability)),
                parse_number(cell(Column::Energy)),
                parse_number(cell(Column::Tempo)),
                parse_number(cell(Column::Valence)),
            ) {
                (Some(d), Some(e), Some(t), Some(v)) => AudioFeatures::new(d, e, t, v),
                _ => {
                    missing_features += 1;
                    continue;
                }
            };

            // Titles are kept verbatim; whitespace only matters for emptiness
            let song = raw_cell(Column::Song);
            if song.trim().is_empty() {
                untitled += 1;
                continue;
            }

            if !seen.insert(song.to_string()) {
                duplicates += 1;
                continue;
            }

            let genre = cell(Column::Genre);
            items.push(CatalogItem {
                song: song.to_string(),
                artist: cell(Column::Artist).to_string(),
                genre: (!genre.is_empty()).then(|| genre.to_string()),
                features,
                popularity: parse_number(cell(Column::Popularity)),
            });
        }

        debug!(
            "Dropped {} rows with missing features, {} untitled, {} duplicate titles",
            missing_features, untitled, duplicates
        );

        let cleaned = items.len();
        let items = self.sample(items);

        info!(
            "Loaded catalog: {} rows read, {} after cleaning, {} kept",
            raw.len(),
            cleaned,
            items.len()
        );

        Ok(Catalog::new(items))
    }

    /// Keep a deterministic random subset of exactly `max_size` rows
    fn sample(&self, items: Vec<CatalogItem>) -> Vec<CatalogItem> {
        if items.len() <= self.max_size {
            return items;
        }

        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut keep = vec![false; items.len()];
        for i in rand::seq::index::sample(&mut rng, items.len(), self.max_size).into_vec() {
            keep[i] = true;
        }

        items
            .into_iter()
            .zip(keep)
            .filter_map(|(item, kept)| kept.then_some(item))
            .collect()
    }
}

impl Default for CatalogLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a finite number; empty, unparsable, NaN and infinite cells read as missing
fn parse_number(cell: &str) -> Option<f64> {
    cell.parse::<f64>().ok().filter(|v| v.is_finite())
}
