use std::fmt;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("cyclic inheritance in schema {schema}: {}", .chain.join(" -> "))]
    CyclicInheritance { schema: String, chain: Vec<String> },

    #[error("schema {schema} inherits from unknown definition {parent}")]
    UnknownParent { schema: String, parent: String },

    #[error("failed to serialize raw context for {subject}: {source}")]
    Raw {
        subject: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml_ng::Error,
    },
}

/// Category of a recovered, non-fatal resolution problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A value had neither a usable primitive type tag nor a nested schema.
    UnresolvedType,
}

impl DiagnosticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::UnresolvedType => "unresolved-type",
        }
    }
}

/// A problem that was recovered from locally and reported at the end of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Dotted path of the value the diagnostic is about, e.g. `Pet.metadata`.
    pub subject: String,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind.as_str(), self.subject, self.message)
    }
}
