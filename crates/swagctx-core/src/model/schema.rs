use serde::{Deserialize, Serialize};

use super::value::Value;

/// A reference to a definition or an inline schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Schema(Box<Schema>),
}

/// A named structured type with single-parent inheritance.
///
/// Definitions take their name from the key they are stored under in
/// [`Spec::definitions`](super::Spec::definitions); inline schemas use
/// `title` when present.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schema {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Parent definition, either a bare name or a `#/definitions/<name>` pointer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<Value>,
}

impl Schema {
    pub fn required_properties(&self) -> impl Iterator<Item = &Value> {
        self.properties.iter().filter(|p| p.required)
    }

    pub fn optional_properties(&self) -> impl Iterator<Item = &Value> {
        self.properties.iter().filter(|p| !p.required)
    }

    /// Properties that carry enum members of their own or on their array element.
    pub fn enums(&self) -> impl Iterator<Item = &Value> {
        self.properties.iter().filter(|p| p.enum_members().is_some())
    }

    pub fn parent_name(&self) -> Option<&str> {
        self.parent.as_deref().map(ref_name)
    }
}

/// Last segment of a reference path: `#/definitions/Pet` → `Pet`.
pub fn ref_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
