/// Number of audio features used for similarity
pub const FEATURE_COUNT: usize = 4;

/// Feature names in vector order
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = ["Danceability", "Energy", "Tempo", "Valence"];

/// The four audio features describing a song
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioFeatures {
    pub danceability: f64,
    pub energy: f64,
    pub tempo: f64,
    pub valence: f64,
}

impl AudioFeatures {
    pub fn new(danceability: f64, energy: f64, tempo: f64, valence: f64) -> Self {
        Self {
            danceability,
            energy,
            tempo,
            valence,
        }
    }

    /// Features as a fixed-size vector, ordered as in [`FEATURE_NAMES`]
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [self.danceability, self.energy, self.tempo, self.valence]
    }
}

/// A single row of the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogItem {
    /// Song title, unique within the catalog
    pub song: String,
    pub artist: String,
    pub genre: Option<String>,
    pub features: AudioFeatures,
    /// Carried for display only, never used for ranking
    pub popularity: Option<f64>,
}
