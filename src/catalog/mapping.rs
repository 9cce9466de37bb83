use super::CatalogError;
use serde::{Deserialize, Serialize};

/// Canonical catalog columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Song,
    Artist,
    Genre,
    Danceability,
    Energy,
    Tempo,
    Valence,
    Popularity,
}

impl Column {
    pub const ALL: [Column; 8] = [
        Column::Song,
        Column::Artist,
        Column::Genre,
        Column::Danceability,
        Column::Energy,
        Column::Tempo,
        Column::Valence,
        Column::Popularity,
    ];

    pub fn canonical_name(self) -> &'static str {
        match self {
            Column::Song => "Song",
            Column::Artist => "Artist",
            Column::Genre => "Genre",
            Column::Danceability => "Danceability",
            Column::Energy => "Energy",
            Column::Tempo => "Tempo",
            Column::Valence => "Valence",
            Column::Popularity => "Popularity",
        }
    }
}

/// Maps each canonical column to its header in the source table
///
/// Defaults to the Spotify tracks export. A header equal to the canonical
/// name is accepted as well, so already-renamed tables load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnMapping {
    pub song: String,
    pub artist: String,
    pub genre: String,
    pub danceability: String,
    pub energy: String,
    pub tempo: String,
    pub valence: String,
    pub popularity: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self::spotify()
    }
}

impl ColumnMapping {
    pub fn spotify() -> Self {
        Self {
            song: "track_name".to_string(),
            artist: "artist_name".to_string(),
            genre: "genre".to_string(),
            danceability: "danceability".to_string(),
            energy: "energy".to_string(),
            tempo: "tempo".to_string(),
            valence: "valence".to_string(),
            popularity: "popularity".to_string(),
        }
    }

    /// Header name expected in the source for a canonical column
    pub fn source_name(&self, column: Column) -> &str {
        match column {
            Column::Song => &self.song,
            Column::Artist => &self.artist,
            Column::Genre => &self.genre,
            Column::Danceability => &self.danceability,
            Column::Energy => &self.energy,
            Column::Tempo => &self.tempo,
            Column::Valence => &self.valence,
            Column::Popularity => &self.popularity,
        }
    }

    /// Locate every canonical column in `headers`
    ///
    /// Fails with a schema error listing all columns that could not be found.
    pub fn resolve(&self, headers: &[String]) -> Result<ResolvedColumns, CatalogError> {
        let mut positions = [0usize; Column::ALL.len()];
        let mut missing = Vec::new();

        for (slot, column) in Column::ALL.iter().enumerate() {
            let source = self.source_name(*column);
            let found = headers
                .iter()
                .position(|h| h == source)
                .or_else(|| headers.iter().position(|h| h == column.canonical_name()));

            match found {
                Some(pos) => positions[slot] = pos,
                None => missing.push(format!("{} (as '{}')", column.canonical_name(), source)),
            }
        }

        if !missing.is_empty() {
            return Err(CatalogError::Schema {
                missing,
                available: headers.to_vec(),
            });
        }

        Ok(ResolvedColumns { positions })
    }
}

/// Source column positions for each canonical column
#[derive(Debug, Clone, Copy)]
pub struct ResolvedColumns {
    positions: [usize; Column::ALL.len()],
}

impl ResolvedColumns {
    pub fn position(&self, column: Column) -> usize {
        self.positions[column as usize]
    }
}
