//! The in-memory API description consumed by the compiler.
//!
//! These types are produced by an external spec parser. They derive serde so
//! a host holding the model as JSON or YAML can load it directly; nothing in
//! this module reads Swagger documents or follows remote references.

pub mod operation;
pub mod schema;
pub mod security;
pub mod spec;
pub mod value;

pub use operation::{HttpMethod, Operation, Response};
pub use schema::{Schema, SchemaOrRef, ref_name};
pub use security::{SecurityDefinition, SecurityRequirement, SecuritySchemeType};
pub use spec::{Info, Spec, Tag};
pub use value::{Parameter, ParameterLocation, Value};
