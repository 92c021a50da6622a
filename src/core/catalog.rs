//! Catalog data as delivered by the upstream data layer.
//!
//! Parsing is forgiving: anything that is not a JSON array of
//! categories degrades to fewer (or zero) strips plus a log line, never an
//! error the rendering layer has to handle.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::error::CatalogError;
use super::registry::InstanceId;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Subitem {
    #[serde(deserialize_with = "id_from_number_or_string")]
    pub id: String,
    pub name: String,
    #[serde(default, rename = "imageUrl")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Category {
    #[serde(deserialize_with = "id_from_number_or_string")]
    pub id: String,
    pub name: String,
    #[serde(default, rename = "imageUrl")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub subitems: Vec<Subitem>,
}

impl Category {
    pub fn instance_id(&self) -> InstanceId {
        InstanceId::new(self.id.clone())
    }
}

fn id_from_number_or_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(serde_json::Number),
        Text(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Number(n) => n.to_string(),
        RawId::Text(s) => s,
    })
}

/// Parse a catalog payload.  Non-JSON or non-array payloads yield an empty
/// catalog; malformed or duplicate categories are skipped.
pub fn parse_catalog(text: &str) -> Vec<Category> {
    let value: Value = match serde_json::from_str(text) {
        Ok(v) => v,
        Err(err) => {
            tracing::warn!(%err, "catalog payload is not JSON; showing empty catalog");
            return Vec::new();
        }
    };

    let items = match value {
        Value::Array(items) => items,
        Value::Null => {
            tracing::debug!("catalog payload is null; showing empty catalog");
            return Vec::new();
        }
        other => {
            tracing::warn!(
                kind = json_kind(&other),
                "catalog payload is not a sequence; showing empty catalog"
            );
            return Vec::new();
        }
    };

    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<Category>(item) {
            Ok(category) => {
                if seen.insert(category.id.clone()) {
                    out.push(category);
                } else {
                    tracing::warn!(index, id = %category.id, "duplicate category id; skipping");
                }
            }
            Err(err) => tracing::warn!(index, %err, "malformed category; skipping"),
        }
    }
    out
}

/// Read and parse a catalog file.
pub fn load_catalog(path: &Path) -> Result<Vec<Category>, CatalogError> {
    let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = parse_catalog(&text);
    tracing::debug!(path = %path.display(), categories = catalog.len(), "catalog loaded");
    Ok(catalog)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Built-in catalog used when no file is given.
pub fn demo_catalog() -> Vec<Category> {
    let rows: &[(&str, &str, &[&str])] = &[
        (
            "1",
            "Fresh Produce",
            &[
                "Apples", "Bananas", "Carrots", "Dates", "Eggplant", "Figs", "Grapes",
                "Honeydew", "Iceberg", "Jalapeño", "Kale", "Limes",
            ],
        ),
        ("2", "Bakery", &["Baguette", "Croissant", "Rye Loaf", "Bagels", "Muffins", "Scones"]),
        ("3", "Dairy", &["Milk", "Butter"]),
        (
            "4",
            "Pantry",
            &[
                "Rice", "Pasta", "Lentils", "Flour", "Sugar", "Olive Oil", "Vinegar", "Honey",
                "Oats",
            ],
        ),
        ("5", "Frozen", &["Peas", "Ice Cream", "Dumplings", "Berries", "Pizza"]),
    ];

    rows.iter()
        .map(|(id, name, items)| Category {
            id: (*id).to_string(),
            name: (*name).to_string(),
            image_url: None,
            subitems: items
                .iter()
                .enumerate()
                .map(|(i, item)| Subitem {
                    id: format!("{id}-{}", i + 1),
                    name: (*item).to_string(),
                    image_url: None,
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numeric_and_string_ids() {
        let text = r#"[
            {"id": 7, "name": "Tools", "imageUrl": "t.png",
             "subitems": [{"id": "h", "name": "Hammer", "imageUrl": "h.png"}]},
            {"id": "garden", "name": "Garden"}
        ]"#;
        let catalog = parse_catalog(text);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[0].id, "7");
        assert_eq!(catalog[0].image_url.as_deref(), Some("t.png"));
        assert_eq!(catalog[0].subitems[0].name, "Hammer");
        assert_eq!(catalog[1].instance_id(), InstanceId::from("garden"));
        assert!(catalog[1].subitems.is_empty());
    }

    #[test]
    fn non_sequence_payload_is_empty() {
        assert!(parse_catalog(r#"{"categories": []}"#).is_empty());
        assert!(parse_catalog("42").is_empty());
        assert!(parse_catalog("null").is_empty());
        assert!(parse_catalog("not json at all").is_empty());
        assert!(parse_catalog("").is_empty());
    }

    #[test]
    fn malformed_and_duplicate_entries_are_skipped() {
        let text = r#"[
            {"id": 1, "name": "A"},
            {"name": "missing id"},
            "just a string",
            {"id": 1, "name": "A again"},
            {"id": 2, "name": "B"}
        ]"#;
        let names: Vec<String> = parse_catalog(text).into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = load_catalog(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Read { .. }));
    }

    #[test]
    fn demo_catalog_has_unique_ids() {
        let catalog = demo_catalog();
        let ids: HashSet<_> = catalog.iter().map(|c| c.id.clone()).collect();
        assert_eq!(ids.len(), catalog.len());
    }
}
