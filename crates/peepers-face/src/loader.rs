use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::catalog::EmotionCatalog;
use crate::types::{Emotion, Point};

/// Catalog shipped with the crate.
const DEFAULT_CATALOG: &[u8] = include_bytes!("../../../assets/emotions/default.json");

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    emotions: Vec<EmotionEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EmotionEntry {
    name: String,
    left: Vec<[i16; 2]>,
    right: Vec<[i16; 2]>,
}

impl From<EmotionEntry> for Emotion {
    fn from(entry: EmotionEntry) -> Self {
        let points = |raw: Vec<[i16; 2]>| raw.into_iter().map(Point::from).collect();
        Emotion::new(entry.name, points(entry.left), points(entry.right))
    }
}

/// Decode and validate a catalog from JSON bytes.
///
/// The document is `{ "emotions": [ { "name", "left", "right" } ] }` with
/// each outline a list of `[x, y]` pairs.
pub fn load_from_bytes(json: &[u8]) -> Result<EmotionCatalog> {
    let file: CatalogFile =
        serde_json::from_slice(json).context("failed to parse emotion catalog JSON")?;
    let entries = file.emotions.into_iter().map(Emotion::from).collect();
    EmotionCatalog::new(entries).context("invalid emotion catalog")
}

/// Load a catalog from a JSON file on disk.
pub fn load_from_path(path: &Path) -> Result<EmotionCatalog> {
    let json =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    load_from_bytes(&json).with_context(|| format!("in {}", path.display()))
}

/// The embedded default catalog.
pub fn load_default() -> Result<EmotionCatalog> {
    load_from_bytes(DEFAULT_CATALOG)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIANGLES: &str = r#"{
        "emotions": [
            { "name": "neutral", "left": [[0,0],[4,0],[2,3]], "right": [[10,0],[14,0],[12,3]] },
            { "name": "wide",    "left": [[0,0],[6,0],[3,5]], "right": [[10,0],[16,0],[13,5]] }
        ]
    }"#;

    #[test]
    fn load_default_catalog() {
        let catalog = load_default().unwrap();
        assert_eq!(catalog.len(), 9);
        assert_eq!(catalog.vertex_count(), 8);
        assert!(catalog.blink().is_some());
        for name in ["angry", "happy", "love", "sad", "surprise", "sus", "sus2"] {
            assert!(catalog.find(name).is_some(), "missing {name}");
        }
    }

    #[test]
    fn default_outlines_fit_the_display() {
        let catalog = load_default().unwrap();
        for id in catalog.ids() {
            let e = catalog.get(id);
            for p in e.left_shape.iter().chain(&e.right_shape) {
                assert!((0..128).contains(&p.x) && (0..64).contains(&p.y), "{}: {p:?}", e.name);
            }
        }
    }

    #[test]
    fn parses_points_in_order() {
        let catalog = load_from_bytes(TRIANGLES.as_bytes()).unwrap();
        let wide = catalog.get(catalog.find("wide").unwrap());
        assert_eq!(wide.left_shape[2], Point::new(3, 5));
        assert_eq!(wide.right_shape[0], Point::new(10, 0));
        assert!(catalog.blink().is_none());
    }

    #[test]
    fn bad_json_returns_error() {
        assert!(load_from_bytes(b"not json").is_err());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let json = TRIANGLES.replace("\"wide\",", "\"wide\", \"colour\": 1,");
        assert!(load_from_bytes(json.as_bytes()).is_err());
    }

    #[test]
    fn mismatched_vertex_count_names_the_emotion() {
        let json = TRIANGLES.replace("[[0,0],[6,0],[3,5]]", "[[0,0],[6,0],[3,5],[1,5]]");
        let err = load_from_bytes(json.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("wide"), "{err:#}");
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = load_from_path(Path::new("/nonexistent/emotions.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/emotions.json"));
    }
}
