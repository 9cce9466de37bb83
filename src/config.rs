use crate::catalog::{CatalogLoader, ColumnMapping, DEFAULT_MAX_SIZE, DEFAULT_SEED};
use crate::engine::DEFAULT_RECOMMENDATIONS;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Loader and query settings, optionally read from a JSON file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecommenderConfig {
    /// Catalog size cap applied after cleaning
    pub max_rows: usize,
    /// Seed for the size-cap sample
    pub seed: u64,
    /// Number of recommendations per query
    pub default_count: usize,
    pub columns: ColumnMapping,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            max_rows: DEFAULT_MAX_SIZE,
            seed: DEFAULT_SEED,
            default_count: DEFAULT_RECOMMENDATIONS,
            columns: ColumnMapping::default(),
        }
    }
}

impl RecommenderConfig {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_rows == 0 {
            bail!("max_rows must be at least 1");
        }
        if self.default_count == 0 {
            bail!("default_count must be at least 1");
        }
        Ok(())
    }

    /// Catalog loader configured from these settings
    pub fn loader(&self) -> CatalogLoader {
        CatalogLoader::new()
            .columns(self.columns.clone())
            .max_size(self.max_rows)
            .seed(self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = RecommenderConfig::default();
        assert_eq!(config.max_rows, 20_000);
        assert_eq!(config.seed, 42);
        assert_eq!(config.default_count, 5);
        assert_eq!(config.columns, ColumnMapping::spotify());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: RecommenderConfig =
            serde_json::from_str(r#"{ "max_rows": 100, "columns": { "song": "title" } }"#)
                .unwrap();
        assert_eq!(config.max_rows, 100);
        assert_eq!(config.seed, 42);
        assert_eq!(config.columns.song, "title");
        assert_eq!(config.columns.artist, "artist_name");
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = serde_json::from_str::<RecommenderConfig>(r#"{ "max_row": 100 }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_zero_limits() {
        let config = RecommenderConfig {
            max_rows: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = RecommenderConfig {
            default_count: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_path() {
        let path = std::env::temp_dir().join(format!(
            "song-recommender-config-{}.json",
            std::process::id()
        ));
        let mut file = fs::File::create(&path).unwrap();
        write!(file, r#"{{ "seed": 7, "default_count": 3 }}"#).unwrap();
        drop(file);

        let config = RecommenderConfig::from_path(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(config.seed, 7);
        assert_eq!(config.default_count, 3);
    }

    #[test]
    fn test_from_missing_path() {
        let err = RecommenderConfig::from_path("/nonexistent/config.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
