//! Lore entries and their relationships.
//!
//! An entry is the unit the rest of Lorekeep reasons about: a named,
//! categorized record with free-form custom fields and a list of typed,
//! directed relationships to other entries. Entries are read-only here;
//! creating and editing them is the job of whatever owns the storage.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Relationship type used for containment (child `part_of` parent).
pub const PART_OF: &str = "part_of";

/// Relationship type for hostile relations between characters.
pub const ENEMY_OF: &str = "enemy_of";

/// Relationship type for friendly relations between characters.
pub const ALLY_OF: &str = "ally_of";

/// The category an entry is filed under.
///
/// Categories come from configuration, so this is an opaque string rather
/// than a closed enum. The well-known ones have constructors because the
/// consistency checker looks for them.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    pub const CHARACTERS: &'static str = "characters";
    pub const LOCATIONS: &'static str = "locations";
    pub const EVENTS: &'static str = "events";
    pub const CONCEPTS: &'static str = "concepts";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn characters() -> Self {
        Self::new(Self::CHARACTERS)
    }

    pub fn locations() -> Self {
        Self::new(Self::LOCATIONS)
    }

    pub fn events() -> Self {
        Self::new(Self::EVENTS)
    }

    pub fn concepts() -> Self {
        Self::new(Self::CONCEPTS)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is(&self, name: &str) -> bool {
        self.0 == name
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Category {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// A value stored in an entry's `custom_fields`.
///
/// Custom fields are schema-free. Scalars and flat lists of scalars take
/// part in text search; anything else is carried along untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    List(Vec<FieldValue>),
    Other(serde_json::Value),
}

impl FieldValue {
    /// Renders a scalar as text. Lists and other values have no scalar form.
    pub fn scalar_text(&self) -> Option<String> {
        match self {
            Self::Bool(b) => Some(b.to_string()),
            Self::Integer(n) => Some(n.to_string()),
            Self::Float(x) => Some(x.to_string()),
            Self::Text(s) => Some(s.clone()),
            Self::List(_) | Self::Other(_) => None,
        }
    }

    /// Text fragments this value contributes to search.
    ///
    /// A scalar yields itself, a list yields its scalar members, and
    /// nested structures yield nothing.
    pub fn searchable_parts(&self) -> Vec<String> {
        match self {
            Self::List(items) => items.iter().filter_map(FieldValue::scalar_text).collect(),
            other => other.scalar_text().into_iter().collect(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

/// Bookkeeping attached to an entry by the storage layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryMetadata {
    #[serde(default, rename = "created_date")]
    pub created: Option<NaiveDateTime>,
    #[serde(default, rename = "modified_date")]
    pub modified: Option<NaiveDateTime>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_version() -> u32 {
    1
}

fn default_status() -> String {
    "draft".to_string()
}

impl Default for EntryMetadata {
    fn default() -> Self {
        Self {
            created: None,
            modified: None,
            author: None,
            version: default_version(),
            status: default_status(),
        }
    }
}

/// A typed, directed link from one entry to another.
///
/// The target may not exist. That is a finding for the checker, not a
/// reason to reject the relationship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub target_id: String,
    pub relationship_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_strength")]
    pub strength: f64,
}

fn default_strength() -> f64 {
    5.0
}

impl Relationship {
    /// Creates a relationship with the default strength and no description.
    pub fn new(target_id: impl Into<String>, relationship_type: impl Into<String>) -> Self {
        Self {
            target_id: target_id.into(),
            relationship_type: relationship_type.into(),
            description: String::new(),
            strength: default_strength(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_strength(mut self, strength: f64) -> Self {
        self.strength = strength;
        self
    }

    pub fn is_type(&self, relationship_type: &str) -> bool {
        self.relationship_type == relationship_type
    }
}

/// A single lore record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    pub category: Category,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub subcategory: Option<String>,
    /// Top-level date, used when `custom_fields` has no `date`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub custom_fields: BTreeMap<String, FieldValue>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
    #[serde(default)]
    pub metadata: EntryMetadata,
}

impl Entry {
    /// Creates an empty entry with the given identity.
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: Category) -> Self {
        Self {
            id: id.into(),
            category,
            name: name.into(),
            description: String::new(),
            subcategory: None,
            date: None,
            tags: BTreeSet::new(),
            custom_fields: BTreeMap::new(),
            relationships: Vec::new(),
            metadata: EntryMetadata::default(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// The entry's date text: `custom_fields.date` first, then the
    /// top-level `date`.
    pub fn date_text(&self) -> Option<String> {
        self.field_text("date").or_else(|| self.date.clone())
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.custom_fields.insert(key.into(), value.into());
        self
    }

    pub fn with_relationship(mut self, relationship: Relationship) -> Self {
        self.relationships.push(relationship);
        self
    }

    /// Looks up a custom field rendered as text, if it is a scalar.
    pub fn field_text(&self, key: &str) -> Option<String> {
        self.custom_fields.get(key).and_then(FieldValue::scalar_text)
    }

    /// Relationships of the given type, in declaration order.
    pub fn relationships_of<'a>(
        &'a self,
        relationship_type: &'a str,
    ) -> impl Iterator<Item = &'a Relationship> + 'a {
        self.relationships
            .iter()
            .filter(move |rel| rel.is_type(relationship_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_deserializes_with_defaults() {
        let json = r#"{
            "id": "loc-1",
            "category": "locations",
            "name": "Veyra",
            "relationships": [{"target_id": "loc-2", "relationship_type": "part_of"}]
        }"#;

        let entry: Entry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.category, Category::locations());
        assert!(entry.tags.is_empty());
        assert_eq!(entry.metadata.version, 1);
        assert_eq!(entry.relationships[0].strength, 5.0);
        assert_eq!(entry.relationships[0].description, "");
    }

    #[test]
    fn test_top_level_date() {
        let json = r#"{"id": "ev-1", "category": "events", "name": "The Collapse", "date": "Year 0"}"#;
        let entry: Entry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.date.as_deref(), Some("Year 0"));
        assert_eq!(entry.date_text().as_deref(), Some("Year 0"));

        let entry = entry.with_field("date", "Year 3");
        assert_eq!(entry.date_text().as_deref(), Some("Year 3"));

        let undated = Entry::new("ev-2", "Dawn", Category::events());
        assert_eq!(undated.date_text(), None);
        assert!(!serde_json::to_string(&undated).unwrap().contains("\"date\""));
    }

    #[test]
    fn test_custom_field_shapes() {
        let json = r#"{
            "id": "c-1",
            "category": "characters",
            "name": "Ilsa",
            "custom_fields": {
                "title": "Warden",
                "age": 41,
                "aliases": ["The Grey", "Ilsa of Thorn", {"nested": true}],
                "stats": {"str": 12}
            }
        }"#;

        let entry: Entry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.field_text("title").as_deref(), Some("Warden"));
        assert_eq!(entry.field_text("age").as_deref(), Some("41"));
        assert_eq!(entry.field_text("aliases"), None);
        assert_eq!(
            entry.custom_fields["aliases"].searchable_parts(),
            vec!["The Grey".to_string(), "Ilsa of Thorn".to_string()]
        );
        assert!(entry.custom_fields["stats"].searchable_parts().is_empty());
    }

    #[test]
    fn test_metadata_parses_iso_timestamps() {
        let json = r#"{
            "id": "e-1",
            "category": "events",
            "metadata": {
                "created_date": "2024-03-01T10:15:00.123456",
                "modified_date": "2024-03-02T08:00:00",
                "author": "system",
                "version": 3,
                "status": "published"
            }
        }"#;

        let entry: Entry = serde_json::from_str(json).unwrap();
        assert!(entry.metadata.created.is_some());
        assert_eq!(entry.metadata.version, 3);
        assert_eq!(entry.metadata.status, "published");
    }

    #[test]
    fn test_relationships_of() {
        let entry = Entry::new("a", "A", Category::characters())
            .with_relationship(Relationship::new("b", ENEMY_OF))
            .with_relationship(Relationship::new("c", ALLY_OF))
            .with_relationship(Relationship::new("d", ENEMY_OF));

        let enemies: Vec<&str> = entry
            .relationships_of(ENEMY_OF)
            .map(|r| r.target_id.as_str())
            .collect();
        assert_eq!(enemies, vec!["b", "d"]);
    }
}
