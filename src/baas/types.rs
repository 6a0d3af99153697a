/// Record types served by the hosted REST backend
///
/// The backend owns these records; the portal only reads and mutates them through
/// REST calls. Decoding is lenient where the backend's column types vary between
/// deployments (numeric vs text ids, single file reference vs list).

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Record identifier as returned by the backend
///
/// Accepts integer and string ids alike; rendered and filtered as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        scalar_text(Value::deserialize(deserializer)?)
            .map(RecordId)
            .ok_or_else(|| serde::de::Error::custom("record id must be a string or number"))
    }
}

/// A county, addressed publicly by its slug
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct County {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default, deserialize_with = "optional_text")]
    pub county_number: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Body sent when creating or editing a county
#[derive(Debug, Clone, Serialize)]
pub struct CountyDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub county_number: i64,
    pub description: String,
}

/// A government project; only `verified` projects are public
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: RecordId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub county: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub verified: bool,
    #[serde(default, deserialize_with = "file_refs")]
    pub images: Vec<String>,
    #[serde(default, deserialize_with = "file_refs")]
    pub docs: Vec<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Allowed project status label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectStatus {
    pub status_name: String,
}

/// URL-safe slug derived from a county name: "Tharaka Nithi" -> "tharaka-nithi"
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn optional_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(scalar_text(Value::deserialize(deserializer)?))
}

fn file_refs<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) if !s.is_empty() => vec![s],
        Value::Array(items) => items.into_iter().filter_map(scalar_text).collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn project_decodes_loose_columns() {
        let project: Project = serde_json::from_value(json!({
            "id": 7,
            "title": "Borehole",
            "county": "kitui",
            "status": null,
            "description": "Water for schools",
            "verified": true,
            "images": "https://cdn.example/a.png",
            "docs": null,
            "created_at": "2024-10-01T09:30:00+00:00"
        }))
        .unwrap();

        assert_eq!(project.id.as_str(), "7");
        assert_eq!(project.images, vec!["https://cdn.example/a.png"]);
        assert!(project.docs.is_empty());
        assert_eq!(project.status, None);
    }

    #[test]
    fn county_number_accepts_text_or_number() {
        let a: County = serde_json::from_value(json!({"id": "c1", "name": "Nairobi", "slug": "nairobi", "county_number": 47})).unwrap();
        let b: County = serde_json::from_value(json!({"id": 2, "name": "Mombasa", "slug": "mombasa", "county_number": "1"})).unwrap();
        assert_eq!(a.county_number.as_deref(), Some("47"));
        assert_eq!(b.county_number.as_deref(), Some("1"));
        assert_eq!(a.description, None);
    }

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("Tharaka  Nithi"), "tharaka-nithi");
        assert_eq!(slugify(" Elgeyo/Marakwet "), "elgeyo-marakwet");
        assert_eq!(slugify("Murang'a"), "murang-a");
    }
}
