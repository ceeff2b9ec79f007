pub mod name_normalizer;
pub mod operation_resolver;
pub mod profile;
pub mod schema_resolver;
pub mod spec_to_context;
pub mod value_resolver;

pub use profile::{EscapeStrategy, NamingProfile, PrefixEscape};
pub use spec_to_context::{Compilation, Compiler, compile, compile_with_profile};
