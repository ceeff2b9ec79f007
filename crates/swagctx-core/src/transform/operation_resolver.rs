use crate::context::{ContextMap, ContextMapExt, ContextNode};
use crate::error::CompileError;
use crate::model::{Operation, ParameterLocation, Response, SecurityRequirement};

use super::name_normalizer::route_to_operation_id;
use super::spec_to_context::{Compiler, raw};

impl Compiler<'_> {
    /// Resolve one operation into its template context.
    pub fn resolve_operation(&mut self, op: &Operation) -> Result<ContextNode, CompileError> {
        let operation_id = op
            .operation_id
            .clone()
            .unwrap_or_else(|| route_to_operation_id(op.method.as_str(), &op.path));
        log::debug!("resolving operation {operation_id}");

        // Each parameter is resolved once so diagnostics are not repeated per group.
        let mut params: Vec<(ParameterLocation, bool, ContextNode)> =
            Vec::with_capacity(op.parameters.len());
        for p in &op.parameters {
            let scoped_enum = p.value.enum_members().is_some() && !p.value.is_global;
            params.push((p.location, scoped_enum, self.resolve_parameter(p, &operation_id)?));
        }
        let in_location = |location: ParameterLocation| -> Vec<ContextNode> {
            params
                .iter()
                .filter(|(l, _, _)| *l == location)
                .map(|(_, _, ctx)| ctx.clone())
                .collect()
        };

        let mut responses = Vec::with_capacity(op.responses.len());
        for response in &op.responses {
            responses.push(self.resolve_response(response, &operation_id)?);
        }
        let success_index = op
            .responses
            .iter()
            .position(|r| matches!(r.status_code, Some(200 | 204)));
        let success_response = success_index
            .map(|i| responses[i].clone())
            .unwrap_or(ContextNode::Absent);
        let success_type = success_response.get("schema").get("type").clone();

        let security: Vec<ContextNode> = op.security.iter().map(security_requirement).collect();

        let mut ctx = ContextMap::new();
        ctx.set("operationId", &operation_id);
        ctx.set("method", op.method.as_str());
        ctx.set("path", &op.path);
        ctx.set("summary", op.summary.as_ref());
        ctx.set("description", op.description.as_ref());
        ctx.set("tag", op.tags.first());
        ctx.set("tags", op.tags.iter().collect::<Vec<_>>());
        ctx.set("deprecated", op.deprecated);
        ctx.set("params", params.iter().map(|(_, _, c)| c.clone()).collect::<Vec<_>>());
        ctx.set(
            "nonBodyParams",
            params
                .iter()
                .filter(|(l, _, _)| *l != ParameterLocation::Body)
                .map(|(_, _, c)| c.clone())
                .collect::<Vec<_>>(),
        );
        ctx.set("bodyParam", in_location(ParameterLocation::Body).into_iter().next());
        ctx.set("pathParams", in_location(ParameterLocation::Path));
        ctx.set("queryParams", in_location(ParameterLocation::Query));
        ctx.set("headerParams", in_location(ParameterLocation::Header));
        ctx.set("formParams", in_location(ParameterLocation::FormData));
        ctx.set("hasBody", op.parameters.iter().any(|p| p.is_body_or_form()));
        ctx.set(
            "enums",
            params
                .iter()
                .filter(|(_, scoped_enum, _)| *scoped_enum)
                .map(|(_, _, c)| c.clone())
                .collect::<Vec<_>>(),
        );
        ctx.set("responses", responses);
        ctx.set("successResponse", success_response);
        ctx.set("successType", success_type);
        ctx.set("securityRequirement", security.first().cloned());
        ctx.set("securityRequirements", security);
        ctx.set("raw", raw(op, &operation_id)?);
        Ok(ctx.into())
    }

    fn resolve_response(
        &mut self,
        response: &Response,
        operation_id: &str,
    ) -> Result<ContextNode, CompileError> {
        let schema = match response.schema {
            Some(ref value) => {
                let owner = if value.name.is_empty() {
                    format!("{operation_id} response")
                } else {
                    value.name.clone()
                };
                let status = response
                    .status_code
                    .map_or_else(|| "default".to_string(), |code| code.to_string());
                let path = format!("{operation_id}.responses.{status}");
                ContextNode::from(self.value_map(value, &owner, &path)?)
            }
            None => ContextNode::Absent,
        };

        let mut ctx = ContextMap::new();
        ctx.set("statusCode", response.status_code);
        ctx.set("description", response.description.as_ref());
        ctx.set("schema", schema);
        Ok(ctx.into())
    }
}

fn security_requirement(requirement: &SecurityRequirement) -> ContextNode {
    let mut ctx = ContextMap::new();
    ctx.set("name", &requirement.name);
    ctx.set("scope", requirement.scopes.first());
    ctx.set("scopes", requirement.scopes.iter().collect::<Vec<_>>());
    ctx.into()
}
