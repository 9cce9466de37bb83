mod error;
mod item;
mod loader;
mod mapping;
mod raw;


pub use error::CatalogError;
pub use item::{AudioFeatures, CatalogItem, FEATURE_COUNT, FEATURE_NAMES};
pub use loader::{CatalogLoader, DEFAULT_MAX_SIZE, DEFAULT_SEED};
pub use mapping::{Column, ColumnMapping, ResolvedColumns};
pub use raw::RawTable;

use std::collections::HashMap;

/// Immutable, deduplicated song catalog
///
/// Rows are addressed by their position `0..len()`. Titles are unique, so a
/// title maps to exactly one row.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<CatalogItem>,
    /// Title -> row index
    index: HashMap<String, usize>,
    /// Row indices in ascending title order
    sorted: Vec<usize>,
}

impl Catalog {
    /// Titles in `items` must already be unique
    pub(crate) fn new(items: Vec<CatalogItem>) -> Self {
        let index: HashMap<String, usize> = items
            .iter()
            .enumerate()
            .map(|(i, item)| (item.song.clone(), i))
            .collect();
        debug_assert_eq!(index.len(), items.len(), "duplicate titles in catalog");

        let mut sorted: Vec<usize> = (0..items.len()).collect();
        sorted.sort_by(|&a, &b| items[a].song.cmp(&items[b].song));

        Self {
            items,
            index,
            sorted,
        }
    }

    /// Row index for an exact, case-sensitive title match
    pub fn index_of(&self, song: &str) -> Option<usize> {
        self.index.get(song).copied()
    }

    /// Item at `index`
    ///
    /// Panics if `index` is out of range; valid indices come from
    /// [`Catalog::index_of`] or enumeration.
    pub fn row_at(&self, index: usize) -> &CatalogItem {
        &self.items[index]
    }

    /// Distinct titles in ascending order
    ///
    /// The iterator is lazy and `Clone`, so it can be restarted at any point.
    pub fn all_song_titles(&self) -> SongTitles<'_> {
        SongTitles {
            items: &self.items,
            order: self.sorted.iter(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Iterator over catalog titles in sorted order
#[derive(Debug, Clone)]
pub struct SongTitles<'a> {
    items: &'a [CatalogItem],
    order: std::slice::Iter<'a, usize>,
}

impl<'a> Iterator for SongTitles<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.order.next().map(|&i| self.items[i].song.as_str())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

impl ExactSizeIterator for SongTitles<'_> {}
