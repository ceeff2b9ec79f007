use serde::{Deserialize, Serialize};

use super::schema::SchemaOrRef;

/// A named, typed element: the shape shared by parameters, properties,
/// response schemas and global enums.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Value {
    #[serde(default)]
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Primitive type tag (`string`, `integer`, `array`, `object`, ...).
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(default)]
    pub required: bool,

    /// Nested object schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaOrRef>,

    /// Array element.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Value>>,

    /// Dictionary element.
    #[serde(
        rename = "additionalProperties",
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<Box<Value>>,

    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<serde_json::Value>>,

    #[serde(rename = "isGlobal", default)]
    pub is_global: bool,

    /// Spec-wide name of a global enum, when it differs from `name`.
    #[serde(rename = "globalName", skip_serializing_if = "Option::is_none")]
    pub global_name: Option<String>,

    #[serde(rename = "default", skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,
}

impl Value {
    pub fn is_array(&self) -> bool {
        self.value_type.as_deref() == Some("array")
    }

    pub fn is_dictionary(&self) -> bool {
        self.value_type.as_deref() == Some("object") && self.additional_properties.is_some()
    }

    /// Own enum members, falling back to the array element's members.
    ///
    /// Dictionary elements are never consulted.
    pub fn enum_members(&self) -> Option<&[serde_json::Value]> {
        self.enum_values
            .as_deref()
            .or_else(|| self.items.as_ref().and_then(|i| i.enum_values.as_deref()))
    }
}

/// Where a parameter is carried in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    FormData,
    Body,
}

impl ParameterLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Path => "path",
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::FormData => "form",
            ParameterLocation::Body => "body",
        }
    }
}

/// An operation parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    #[serde(rename = "in")]
    pub location: ParameterLocation,

    #[serde(flatten)]
    pub value: Value,
}

impl Parameter {
    pub fn is_body_or_form(&self) -> bool {
        matches!(
            self.location,
            ParameterLocation::Body | ParameterLocation::FormData
        )
    }
}
