use crate::context::{ContextMap, ContextMapExt, ContextNode};
use crate::error::{CompileError, DiagnosticKind};
use crate::model::{Parameter, Value};

use super::name_normalizer::{to_enum_case_name, to_field_name};
use super::spec_to_context::{Compiler, qualify, raw};

/// Type tags that pass through unchanged.
const PRIMITIVE_TYPES: &[&str] = &["string", "integer", "number", "boolean", "array", "file"];

/// Type used when a value has no type tag at all.
pub const UNRESOLVED_TYPE: &str = "Any";

impl Compiler<'_> {
    /// Resolve a top-level value such as a global enum.
    pub fn resolve_value(&mut self, value: &Value) -> Result<ContextNode, CompileError> {
        self.resolve_value_in(value, "")
    }

    /// Resolve a value declared inside `scope`, a schema name or operation id.
    pub fn resolve_value_in(
        &mut self,
        value: &Value,
        scope: &str,
    ) -> Result<ContextNode, CompileError> {
        let path = qualify(scope, &value.name);
        Ok(self.value_map(value, &value.name, &path)?.into())
    }

    /// Resolve a parameter of `operation_id`: the value context plus its
    /// `parameterType`.
    pub fn resolve_parameter(
        &mut self,
        parameter: &Parameter,
        operation_id: &str,
    ) -> Result<ContextNode, CompileError> {
        let path = qualify(operation_id, &parameter.value.name);
        let mut ctx = self.value_map(&parameter.value, &parameter.value.name, &path)?;
        ctx.set("parameterType", parameter.location.as_str());
        ctx.set("raw", raw(parameter, &path)?);
        Ok(ctx.into())
    }

    /// Build the value context. `owner` names inline schemas that have no
    /// title; `path` locates the value in diagnostics.
    pub(crate) fn value_map(
        &mut self,
        value: &Value,
        owner: &str,
        path: &str,
    ) -> Result<ContextMap, CompileError> {
        let is_array = value.is_array();
        let is_dictionary = value.is_dictionary();

        let mut ctx = ContextMap::new();
        ctx.set("type", self.resolve_type(value, owner, path));
        ctx.set("name", to_field_name(&value.name));
        ctx.set("value", &value.name);
        ctx.set("description", value.description.as_ref());
        ctx.set("format", value.format.as_ref());
        ctx.set("default", value.default_value.as_ref().map(ContextNode::from));
        ctx.set("required", value.required);
        ctx.set("optional", !value.required);
        ctx.set("enumName", self.enum_name(value));
        ctx.set("enums", value.enum_members().map(enum_cases));

        let array_type = match value.items.as_deref() {
            Some(items) if is_array => Some(self.resolve_type(
                items,
                &format!("{owner} item"),
                &format!("{path}.items"),
            )),
            _ => None,
        };
        ctx.set("arrayType", array_type);

        let dictionary_type = match value.additional_properties.as_deref() {
            Some(element) if is_dictionary => Some(self.resolve_type(
                element,
                &format!("{owner} value"),
                &format!("{path}.additionalProperties"),
            )),
            _ => None,
        };
        ctx.set("dictionaryType", dictionary_type);

        ctx.set("isArray", is_array);
        ctx.set("isDictionary", is_dictionary);
        ctx.set("isGlobal", value.is_global);
        ctx.set("raw", raw(value, path)?);
        Ok(ctx)
    }

    /// The nested schema's type name, else the primitive tag.
    ///
    /// Unclassifiable values are reported and resolve to their raw tag, or
    /// [`UNRESOLVED_TYPE`] when untagged.
    pub(crate) fn resolve_type(&mut self, value: &Value, owner: &str, path: &str) -> String {
        if let Some(ref schema) = value.schema {
            return self.schema_ref_type(schema, owner, path);
        }

        match value.value_type.as_deref() {
            Some(tag) if PRIMITIVE_TYPES.contains(&tag) => tag.to_string(),
            Some("object") if value.is_dictionary() => "object".to_string(),
            Some(tag) => {
                self.report(
                    DiagnosticKind::UnresolvedType,
                    path,
                    format!("couldn't calculate type for `{tag}` without a schema"),
                );
                tag.to_string()
            }
            None => {
                self.report(
                    DiagnosticKind::UnresolvedType,
                    path,
                    "couldn't calculate type: no type tag and no schema".to_string(),
                );
                UNRESOLVED_TYPE.to_string()
            }
        }
    }

    fn enum_name(&self, value: &Value) -> String {
        let name = match value.global_name {
            Some(ref global) if value.is_global => global,
            _ => &value.name,
        };
        self.profile().enum_name(name)
    }
}

fn enum_cases(members: &[serde_json::Value]) -> Vec<ContextNode> {
    members
        .iter()
        .map(|member| {
            let label = match member {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            let mut case = ContextMap::new();
            case.set("name", to_enum_case_name(&label));
            case.set("value", ContextNode::from(member));
            case.into()
        })
        .collect()
}
