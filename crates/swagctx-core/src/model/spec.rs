use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::operation::Operation;
use super::schema::{Schema, ref_name};
use super::security::SecurityDefinition;
use super::value::Value;

/// Info object describing the API.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Info {
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub version: String,
}

/// Tag definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A parsed, fully loaded API description.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Spec {
    pub info: Info,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(rename = "basePath", skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schemes: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub operations: Vec<Operation>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub definitions: IndexMap<String, Schema>,

    #[serde(
        rename = "securityDefinitions",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub security_definitions: Vec<SecurityDefinition>,

    /// Spec-wide enums.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enums: Vec<Value>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
}

impl Spec {
    /// Look up a definition by bare name or `#/definitions/<name>` pointer.
    pub fn definition(&self, reference: &str) -> Option<(&str, &Schema)> {
        self.definitions
            .get_key_value(ref_name(reference))
            .map(|(name, schema)| (name.as_str(), schema))
    }

    pub fn tag(&self, name: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.name == name)
    }
}
