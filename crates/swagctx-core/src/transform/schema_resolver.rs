use crate::context::{ContextMap, ContextMapExt, ContextNode};
use crate::error::{CompileError, DiagnosticKind};
use crate::model::{Schema, SchemaOrRef, Spec, Value, ref_name};

use super::spec_to_context::{Compiler, raw};

/// A schema and its ancestors, nearest first: `[self, parent, grandparent, ...]`.
type InheritanceChain<'a> = Vec<(&'a str, &'a Schema)>;

impl<'a> Compiler<'a> {
    /// Resolve a named schema, including its whole parent chain.
    pub fn resolve_schema(
        &mut self,
        name: &'a str,
        schema: &'a Schema,
    ) -> Result<ContextNode, CompileError> {
        let chain = self.inheritance_chain(name, schema)?;
        self.schema_context(&chain)
    }

    /// Generated type name for a schema reference. `owner` names inline
    /// schemas that carry no title; a reference that matches no definition is
    /// reported against `path` and falls back to its last segment.
    pub(crate) fn schema_ref_type(
        &mut self,
        schema: &SchemaOrRef,
        owner: &str,
        path: &str,
    ) -> String {
        match schema {
            SchemaOrRef::Ref { ref_path } => match self.spec().definition(ref_path) {
                Some((name, _)) => self.profile().type_name(name),
                None => {
                    self.report(
                        DiagnosticKind::UnresolvedType,
                        path,
                        format!("reference `{ref_path}` does not match any definition"),
                    );
                    self.profile().type_name(ref_name(ref_path))
                }
            },
            SchemaOrRef::Schema(inline) => {
                self.profile().type_name(inline.title.as_deref().unwrap_or(owner))
            }
        }
    }

    /// Walk the parent chain, failing on a missing parent or a repeated schema.
    fn inheritance_chain(
        &self,
        name: &'a str,
        schema: &'a Schema,
    ) -> Result<InheritanceChain<'a>, CompileError> {
        let spec: &'a Spec = self.spec();
        let mut chain = vec![(name, schema)];
        let mut current = (name, schema);

        while let Some(parent) = current.1.parent_name() {
            let Some(next) = spec.definition(parent) else {
                return Err(CompileError::UnknownParent {
                    schema: current.0.to_string(),
                    parent: parent.to_string(),
                });
            };
            if chain.iter().any(|(seen, _)| *seen == next.0) {
                let mut names: Vec<String> = chain.iter().map(|(n, _)| n.to_string()).collect();
                names.push(next.0.to_string());
                return Err(CompileError::CyclicInheritance {
                    schema: name.to_string(),
                    chain: names,
                });
            }
            chain.push(next);
            current = next;
        }

        Ok(chain)
    }

    fn schema_context(
        &mut self,
        chain: &[(&'a str, &'a Schema)],
    ) -> Result<ContextNode, CompileError> {
        let (name, schema) = chain[0];
        log::debug!("resolving schema {name}");

        let parent = match chain.get(1..) {
            Some(ancestors) if !ancestors.is_empty() => self.schema_context(ancestors)?,
            _ => ContextNode::Absent,
        };

        let mut ctx = ContextMap::new();
        ctx.set("type", self.profile().type_name(name));
        ctx.set("description", schema.description.as_ref());
        ctx.set("parent", parent);
        ctx.set(
            "requiredProperties",
            self.resolve_values(declared_by(name, schema.required_properties()))?,
        );
        ctx.set(
            "optionalProperties",
            self.resolve_values(declared_by(name, schema.optional_properties()))?,
        );
        ctx.set("properties", self.resolve_values(declared_by(name, schema.properties.iter()))?);
        ctx.set("allProperties", self.resolve_values(all_properties(chain).into_iter())?);
        ctx.set("enums", self.resolve_values(declared_by(name, schema.enums()))?);
        ctx.set("raw", raw(schema, name)?);
        Ok(ctx.into())
    }

    /// Resolve `(declaring schema, property)` pairs.
    fn resolve_values<'v>(
        &mut self,
        values: impl Iterator<Item = (&'v str, &'v Value)>,
    ) -> Result<Vec<ContextNode>, CompileError> {
        values
            .map(|(scope, v)| self.resolve_value_in(v, scope))
            .collect()
    }
}

fn declared_by<'v>(
    schema: &'v str,
    values: impl Iterator<Item = &'v Value>,
) -> impl Iterator<Item = (&'v str, &'v Value)> {
    values.map(move |v| (schema, v))
}

/// Own properties plus every inherited property not re-declared closer to
/// `chain[0]`, each paired with the schema that declares it.
///
/// Inherited properties come first, in ancestor order.
fn all_properties<'a>(chain: &[(&'a str, &'a Schema)]) -> Vec<(&'a str, &'a Value)> {
    let Some(((name, schema), ancestors)) = chain.split_first() else {
        return Vec::new();
    };

    let mut all: Vec<(&'a str, &'a Value)> = all_properties(ancestors)
        .into_iter()
        .filter(|(_, inherited)| !schema.properties.iter().any(|own| own.name == inherited.name))
        .collect();
    all.extend(schema.properties.iter().map(|p| (*name, p)));
    all
}
