//! Fruit type catalogue entries.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer};

/// Locale whose common names are kept.
const COMMON_NAME_LOCALE: &str = "en";

/// A plant type from the types endpoint.
///
/// The server sends common names for every locale. Only English names are
/// kept.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FruitType {
    pub id: u32,
    #[serde(default)]
    pub parent_id: Option<u32>,
    #[serde(default)]
    pub pending: bool,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub taxonomic_rank: Option<u32>,
    #[serde(default)]
    pub scientific_names: Vec<String>,
    #[serde(default, deserialize_with = "english_names")]
    pub common_names: Vec<String>,
    #[serde(default)]
    pub urls: HashMap<String, String>,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl FruitType {
    /// Preferred display name: first common name, then first scientific name.
    pub fn name(&self) -> Option<&str> {
        self.common_names
            .first()
            .or_else(|| self.scientific_names.first())
            .map(String::as_str)
    }
}

fn english_names<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut names: HashMap<String, Vec<String>> =
        Option::deserialize(deserializer)?.unwrap_or_default();
    Ok(names.remove(COMMON_NAME_LOCALE).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    const APPLE: &str = r#"{
        "id": 42,
        "created_at": "2014-06-19T01:02:03.456Z",
        "updated_at": "2014-07-20T12:34:56.789Z",
        "parent_id": 114,
        "pending": true,
        "scientific_names": ["Malus pumila", "Malus domestica"],
        "taxonomic_rank": 8,
        "common_names": {
            "de": ["Apfel"],
            "en": ["Apple", "Orchard apple"]
        },
        "categories": ["forager"],
        "urls": {"wikipedia": "https://en.wikipedia.org/wiki/Malus_domestica"}
    }"#;

    #[test]
    fn test_decode_keeps_english_names() {
        let fruit: FruitType = serde_json::from_str(APPLE).unwrap();
        assert_eq!(fruit.id, 42);
        assert_eq!(fruit.parent_id, Some(114));
        assert_eq!(fruit.taxonomic_rank, Some(8));
        assert_eq!(fruit.common_names, vec!["Apple", "Orchard apple"]);
        assert_eq!(fruit.name(), Some("Apple"));
        assert_eq!(fruit.urls.len(), 1);
    }

    #[test]
    fn test_decode_without_english_names() {
        let json = r#"{
            "id": 1,
            "created_at": "x",
            "updated_at": "y",
            "scientific_names": ["Prunus avium"],
            "common_names": {"fr": ["Cerise"]}
        }"#;
        let fruit: FruitType = serde_json::from_str(json).unwrap();
        assert!(fruit.common_names.is_empty());
        assert_eq!(fruit.name(), Some("Prunus avium"));
        assert!(!fruit.pending);
    }

    #[test]
    fn test_decode_null_common_names() {
        let json = r#"{"id": 1, "created_at": "x", "updated_at": "y", "common_names": null}"#;
        let fruit: FruitType = serde_json::from_str(json).unwrap();
        assert_eq!(fruit.name(), None);
    }
}
