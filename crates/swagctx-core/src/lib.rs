pub mod config;
pub mod context;
pub mod error;
pub mod model;
pub mod transform;

pub use context::{Context, ContextNode};
pub use error::{CompileError, Diagnostic, DiagnosticKind};
pub use transform::{Compilation, Compiler, NamingProfile, compile};
