//! Containers (schedules, lists) and terms as seen by the resolvers.
//!
//! Both are read transiently from remote JSON and never persisted. Parsing
//! works on `serde_json::Value` because the catalog shapes carry many fields
//! this layer ignores and use different keys for the same concept.

use serde::Serialize;
use serde_json::Value;

/// Which catalog a container lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerKind {
    Schedule,
    List,
}

impl ContainerKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Schedule => "schedule",
            Self::List => "list",
        }
    }

    /// Extract the containers of this kind from a catalog response, in
    /// traversal order.
    pub fn flatten_catalog(self, catalog: &Value) -> Vec<Container> {
        match self {
            Self::Schedule => flatten_schedules(catalog),
            Self::List => flatten_lists(catalog),
        }
    }
}

impl std::fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A schedule or list owned by the remote service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Container {
    /// Opaque identifier, kept in its original JSON type.
    pub id: Value,
    /// Display name; `None` when the entry had no usable name.
    pub name: Option<String>,
}

impl Container {
    pub fn new(id: impl Into<Value>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
        }
    }

    /// Case-insensitive exact comparison of the display name.
    ///
    /// Unnamed entries never match, not even an empty target.
    pub fn matches(&self, target: &str) -> bool {
        self.name
            .as_deref()
            .is_some_and(|name| name.to_lowercase() == target.to_lowercase())
    }

    /// Whether the entry carries a usable identifier. Entries without one
    /// can be listed but never targeted.
    pub fn has_id(&self) -> bool {
        !self.id.is_null()
    }

    /// Identifier rendered as a query parameter value.
    pub fn id_param(&self) -> String {
        id_to_param(&self.id)
    }
}

/// A dictionary word selected from a search result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Term {
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kanji_full: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hiragana_full: Option<String>,
    pub definitions: Vec<String>,
}

impl Term {
    /// Read a word object from a search result entry.
    ///
    /// Returns `None` when the entry has no `id`.
    pub fn from_value(entry: &Value) -> Option<Self> {
        let text = |key: &str| entry.get(key).and_then(Value::as_str).map(str::to_string);
        let id = entry.get("id").filter(|id| !id.is_null())?.clone();

        Some(Self {
            id,
            kanji_full: text("kanji_full"),
            hiragana_full: text("hiragana_full"),
            definitions: entry
                .get("definitions")
                .or_else(|| entry.get("def"))
                .map(definitions_from)
                .unwrap_or_default(),
        })
    }

    pub fn id_param(&self) -> String {
        id_to_param(&self.id)
    }
}

/// Entries of a word search response.
///
/// Accepts `{"words": [...]}` as well as a bare array.
pub fn search_results(response: &Value) -> &[Value] {
    response
        .get("words")
        .unwrap_or(response)
        .as_array()
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn flatten_schedules(catalog: &Value) -> Vec<Container> {
    catalog
        .get("schedules")
        .unwrap_or(catalog)
        .as_array()
        .into_iter()
        .flatten()
        .map(|entry| container_from(entry, &["id"], &["name", "title"]))
        .collect()
}

// termtype group -> group -> list
fn flatten_lists(catalog: &Value) -> Vec<Container> {
    let children = |value: &Value, key: &str| -> Vec<Value> {
        value
            .get(key)
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default()
    };

    children(catalog, "termtype_groups")
        .iter()
        .flat_map(|termtype| children(termtype, "groups"))
        .flat_map(|group| children(&group, "lists"))
        .map(|entry| container_from(&entry, &["list_id", "id"], &["title", "name"]))
        .collect()
}

fn container_from(entry: &Value, id_keys: &[&str], name_keys: &[&str]) -> Container {
    let id = id_keys
        .iter()
        .find_map(|key| entry.get(*key))
        .cloned()
        .unwrap_or(Value::Null);
    let name = name_keys
        .iter()
        .find_map(|key| entry.get(*key).and_then(Value::as_str))
        .map(str::to_string);

    Container { id, name }
}

fn definitions_from(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => vec![s.clone()],
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Null => None,
                other => Some(other.to_string()),
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn id_to_param(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
