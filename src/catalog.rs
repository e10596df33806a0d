//! Level and power-up catalogs
//!
//! Both catalogs are bundled JSON files parsed once at startup. The simulation
//! only ever sees the validated in-memory records.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Errors raised while loading bundled data
#[derive(thiserror::Error, Debug)]
pub enum DataLoadError {
    /// The file could not be read
    #[error("Failed to read '{path}': {reason}")]
    InvalidSource { path: String, reason: String },

    /// The file parsed but its contents are unusable
    #[error("Invalid catalog content: {0}")]
    InvalidContent(String),

    /// The file is not valid JSON for the expected shape
    #[error("Invalid JSON: {0}")]
    InvalidFormat(#[from] serde_json::Error),
}

fn read_source(path: &Path) -> Result<String, DataLoadError> {
    std::fs::read_to_string(path).map_err(|e| DataLoadError::InvalidSource {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// One level layout: rows top-to-bottom, columns left-to-right, each a color tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub id: i64,
    pub blocks: Vec<Vec<String>>,
}

/// Marker carried by tags of blocks that can never be destroyed
pub const INDESTRUCTIBLE_MARKERS: [&str; 2] = ["gray", "metal"];

/// Whether a block color tag names an indestructible block
pub fn is_indestructible_tag(tag: &str) -> bool {
    INDESTRUCTIBLE_MARKERS.iter().any(|m| tag.contains(m))
}

impl Level {
    /// Number of indestructible tags in the layout (fixed for the level's lifetime)
    pub fn indestructible_count(&self) -> usize {
        self.blocks
            .iter()
            .flatten()
            .filter(|tag| is_indestructible_tag(tag))
            .count()
    }

    /// Total number of block tags in the layout
    pub fn block_count(&self) -> usize {
        self.blocks.iter().map(Vec::len).sum()
    }
}

/// All levels, indexed by level number. Never empty.
#[derive(Debug, Clone)]
pub struct LevelCatalog {
    levels: Vec<Level>,
}

impl LevelCatalog {
    pub fn new(levels: Vec<Level>) -> Result<Self, DataLoadError> {
        if levels.is_empty() {
            return Err(DataLoadError::InvalidContent(
                "level catalog is empty".to_string(),
            ));
        }
        if let Some(level) = levels.iter().find(|l| l.blocks.is_empty()) {
            return Err(DataLoadError::InvalidContent(format!(
                "level {} has no block rows",
                level.id
            )));
        }
        Ok(Self { levels })
    }

    pub fn from_json(json: &str) -> Result<Self, DataLoadError> {
        let levels: Vec<Level> = serde_json::from_str(json)?;
        Self::new(levels)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DataLoadError> {
        let catalog = Self::from_json(&read_source(path.as_ref())?)?;
        log::info!(
            "Loaded {} levels from {}",
            catalog.len(),
            path.as_ref().display()
        );
        Ok(catalog)
    }

    /// Level at `index`; out-of-range indices clamp to the last level
    pub fn get(&self, index: usize) -> &Level {
        &self.levels[index.min(self.levels.len() - 1)]
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

/// A droppable power-up: `image` is both the sprite and the effect name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerUp {
    pub image: String,
    pub odds: u8,
}

/// Upper bound (inclusive) of a power-up roll
pub const MAX_ODDS: u8 = 100;

/// Power-up drop table, kept sorted ascending by odds
#[derive(Debug, Clone, Default)]
pub struct PowerUpCatalog {
    entries: Vec<PowerUp>,
}

impl PowerUpCatalog {
    pub fn new(mut entries: Vec<PowerUp>) -> Result<Self, DataLoadError> {
        if let Some(bad) = entries.iter().find(|p| p.odds > MAX_ODDS) {
            return Err(DataLoadError::InvalidContent(format!(
                "power-up '{}' has odds {} (max {})",
                bad.image, bad.odds, MAX_ODDS
            )));
        }
        // Stable sort: equal odds keep file order
        entries.sort_by_key(|p| p.odds);
        Ok(Self { entries })
    }

    pub fn from_json(json: &str) -> Result<Self, DataLoadError> {
        let entries: Vec<PowerUp> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DataLoadError> {
        let catalog = Self::from_json(&read_source(path.as_ref())?)?;
        log::info!(
            "Loaded {} power-ups from {}",
            catalog.entries.len(),
            path.as_ref().display()
        );
        Ok(catalog)
    }

    /// Entries in ascending odds order
    pub fn entries(&self) -> &[PowerUp] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVELS: &str = r#"[
        { "id": 0, "blocks": [["red", "gray"], ["gray", "yellow"]] },
        { "id": 1, "blocks": [["green", "green", "metal_block"]] }
    ]"#;

    #[test]
    fn test_level_catalog_parses() {
        let catalog = LevelCatalog::from_json(LEVELS).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(0).blocks[1][1], "yellow");
        assert_eq!(catalog.get(1).id, 1);
        // Out-of-range clamps
        assert_eq!(catalog.get(9).id, 1);
    }

    #[test]
    fn test_indestructible_count() {
        let catalog = LevelCatalog::from_json(LEVELS).unwrap();
        assert_eq!(catalog.get(0).indestructible_count(), 2);
        assert_eq!(catalog.get(0).block_count(), 4);
        assert_eq!(catalog.get(1).indestructible_count(), 1);
    }

    #[test]
    fn test_empty_level_catalog_rejected() {
        let err = LevelCatalog::from_json("[]").unwrap_err();
        assert!(matches!(err, DataLoadError::InvalidContent(_)));

        let err = LevelCatalog::from_json(r#"[{ "id": 3, "blocks": [] }]"#).unwrap_err();
        assert!(matches!(err, DataLoadError::InvalidContent(_)));
    }

    #[test]
    fn test_malformed_json_is_format_error() {
        let err = LevelCatalog::from_json("{ not json").unwrap_err();
        assert!(matches!(err, DataLoadError::InvalidFormat(_)));

        let err = PowerUpCatalog::from_json(r#"[{ "image": "expand" }]"#).unwrap_err();
        assert!(matches!(err, DataLoadError::InvalidFormat(_)));
    }

    #[test]
    fn test_missing_file_is_source_error() {
        let err = LevelCatalog::load("/definitely/not/here/levels.json").unwrap_err();
        assert!(matches!(err, DataLoadError::InvalidSource { .. }));
    }

    #[test]
    fn test_power_ups_sorted_by_odds() {
        let catalog = PowerUpCatalog::from_json(
            r#"[
                { "image": "expand", "odds": 30 },
                { "image": "reduce", "odds": 10 },
                { "image": "normal", "odds": 20 }
            ]"#,
        )
        .unwrap();
        let names: Vec<_> = catalog.entries().iter().map(|p| p.image.as_str()).collect();
        assert_eq!(names, ["reduce", "normal", "expand"]);
    }

    #[test]
    fn test_bundled_assets_parse() {
        let levels = LevelCatalog::from_json(include_str!("../assets/levels.json")).unwrap();
        assert!(levels.len() >= 2);
        let power_ups = PowerUpCatalog::from_json(include_str!("../assets/powers.json")).unwrap();
        assert!(!power_ups.is_empty());
    }

    #[test]
    fn test_power_up_odds_out_of_range() {
        let err = PowerUpCatalog::from_json(r#"[{ "image": "expand", "odds": 101 }]"#)
            .unwrap_err();
        assert!(matches!(err, DataLoadError::InvalidContent(_)));
    }
}
