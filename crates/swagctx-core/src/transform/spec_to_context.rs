use indexmap::IndexMap;
use serde::Serialize;

use crate::config::CompilerConfig;
use crate::context::{Context, ContextMap, ContextMapExt, ContextNode};
use crate::error::{CompileError, Diagnostic, DiagnosticKind};
use crate::model::{SecurityDefinition, Spec};

use super::profile::NamingProfile;

/// The result of one compilation run.
#[derive(Debug, Clone)]
pub struct Compilation {
    pub context: Context,
    pub diagnostics: Vec<Diagnostic>,
}

/// One spec-to-context run. Borrows the spec read-only and owns the naming
/// profile and diagnostics, so separate runs share no mutable state.
#[derive(Debug)]
pub struct Compiler<'a> {
    spec: &'a Spec,
    profile: NamingProfile,
    diagnostics: Vec<Diagnostic>,
}

/// Compile a spec with the default profile.
pub fn compile(spec: &Spec) -> Result<Compilation, CompileError> {
    compile_with_profile(spec, NamingProfile::plain())
}

/// Compile a spec with an explicit naming profile.
pub fn compile_with_profile(
    spec: &Spec,
    profile: NamingProfile,
) -> Result<Compilation, CompileError> {
    Compiler::new(spec, profile).compile()
}

impl<'a> Compiler<'a> {
    pub fn new(spec: &'a Spec, profile: NamingProfile) -> Self {
        Self {
            spec,
            profile,
            diagnostics: Vec::new(),
        }
    }

    pub fn from_config(spec: &'a Spec, config: &CompilerConfig) -> Self {
        Self::new(spec, NamingProfile::from_config(config))
    }

    pub fn spec(&self) -> &'a Spec {
        self.spec
    }

    pub fn profile(&self) -> &NamingProfile {
        &self.profile
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub(crate) fn report(&mut self, kind: DiagnosticKind, subject: &str, message: String) {
        let subject = if subject.is_empty() { ANONYMOUS } else { subject };
        let diagnostic = Diagnostic {
            kind,
            subject: subject.to_string(),
            message,
        };
        // A property is resolved once per list it appears in; its path is the same each time.
        if !self.diagnostics.contains(&diagnostic) {
            self.diagnostics.push(diagnostic);
        }
    }

    /// Build the full context tree and prune it.
    pub fn compile(mut self) -> Result<Compilation, CompileError> {
        let spec = self.spec;
        log::info!(
            "compiling spec \"{}\" - {} (profile: {})",
            spec.info.title,
            count_summary(&[
                ("operation", spec.operations.len()),
                ("definition", spec.definitions.len()),
                ("tag", spec.tags.len()),
                ("enum", spec.enums.len()),
                ("security definition", spec.security_definitions.len()),
            ]),
            self.profile.name()
        );

        let root = self.spec_context()?;

        for diagnostic in &self.diagnostics {
            log::warn!("{diagnostic}");
        }

        let context = root
            .prune()
            .unwrap_or_else(|| Context::Mapping(IndexMap::new()));
        Ok(Compilation {
            context,
            diagnostics: self.diagnostics,
        })
    }

    fn spec_context(&mut self) -> Result<ContextNode, CompileError> {
        let spec = self.spec;

        let mut operations = Vec::with_capacity(spec.operations.len());
        for op in &spec.operations {
            operations.push(self.resolve_operation(op)?);
        }

        // Untagged operations only appear in the flat list.
        let mut by_tag: IndexMap<&str, Vec<ContextNode>> = IndexMap::new();
        for (op, ctx) in spec.operations.iter().zip(&operations) {
            if let Some(tag) = op.tags.first() {
                by_tag.entry(tag.as_str()).or_default().push(ctx.clone());
            }
        }
        let tags: Vec<ContextNode> = by_tag
            .into_iter()
            .map(|(name, ops)| {
                let mut tag = ContextMap::new();
                tag.set("name", name);
                tag.set(
                    "description",
                    spec.tag(name).and_then(|t| t.description.as_ref()),
                );
                tag.set("operations", ops);
                tag.into()
            })
            .collect();

        let mut definitions = Vec::with_capacity(spec.definitions.len());
        for (name, schema) in &spec.definitions {
            definitions.push(self.resolve_schema(name, schema)?);
        }

        let mut enums = Vec::with_capacity(spec.enums.len());
        for value in &spec.enums {
            enums.push(self.resolve_value(value)?);
        }

        let mut info = ContextMap::new();
        info.set("title", &spec.info.title);
        info.set("description", spec.info.description.as_ref());
        info.set("version", &spec.info.version);

        let mut ctx = ContextMap::new();
        ctx.set("info", info);
        ctx.set("host", spec.host.as_ref());
        ctx.set("basePath", spec.base_path.as_ref());
        ctx.set("baseURL", base_url(spec));
        ctx.set("schemes", spec.schemes.iter().collect::<Vec<_>>());
        ctx.set("operations", operations);
        ctx.set("tags", tags);
        ctx.set("definitions", definitions);
        ctx.set("enums", enums);
        ctx.set(
            "securityDefinitions",
            spec.security_definitions
                .iter()
                .map(security_definition)
                .collect::<Vec<_>>(),
        );
        ctx.set("raw", raw(spec, &spec.info.title)?);
        Ok(ctx.into())
    }
}

/// Subject used for values without a name.
const ANONYMOUS: &str = "<anonymous>";

/// Diagnostic path of `name` inside `scope`: `Pet.metadata`, or just `name` at top level.
pub(crate) fn qualify(scope: &str, name: &str) -> String {
    let name = if name.is_empty() { ANONYMOUS } else { name };
    if scope.is_empty() {
        name.to_string()
    } else {
        format!("{scope}.{name}")
    }
}

/// The model node itself under `raw`, for fields the context does not lift.
pub(crate) fn raw<T: Serialize>(node: &T, subject: &str) -> Result<ContextNode, CompileError> {
    ContextNode::from_serialize(node).map_err(|source| CompileError::Raw {
        subject: subject.to_string(),
        source,
    })
}

/// `<first scheme or http>://<host><basePath>`, with empty fallbacks.
fn base_url(spec: &Spec) -> String {
    format!(
        "{}://{}{}",
        spec.schemes.first().map_or("http", String::as_str),
        spec.host.as_deref().unwrap_or(""),
        spec.base_path.as_deref().unwrap_or("")
    )
}

fn security_definition(definition: &SecurityDefinition) -> ContextNode {
    let scopes: Vec<ContextNode> = definition
        .scopes
        .iter()
        .map(|(name, description)| {
            let mut scope = ContextMap::new();
            scope.set("name", name);
            scope.set("description", description);
            scope.into()
        })
        .collect();

    let mut ctx = ContextMap::new();
    ctx.set("name", &definition.name);
    ctx.set("type", definition.scheme_type.as_str());
    ctx.set("description", definition.description.as_ref());
    ctx.set("parameterName", definition.parameter_name.as_ref());
    ctx.set("in", definition.location.as_ref());
    ctx.set("flow", definition.flow.as_ref());
    ctx.set("authorizationUrl", definition.authorization_url.as_ref());
    ctx.set("tokenUrl", definition.token_url.as_ref());
    ctx.set("scopes", scopes);
    ctx.into()
}

/// `3 operations, 1 tag, 0 enums`
fn count_summary(counts: &[(&str, usize)]) -> String {
    counts
        .iter()
        .map(|(label, count)| {
            let plural = if *count == 1 { "" } else { "s" };
            format!("{count} {label}{plural}")
        })
        .collect::<Vec<_>>()
        .join(", ")
}
