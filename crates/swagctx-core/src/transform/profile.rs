use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, LazyLock};

use crate::config::CompilerConfig;

use super::name_normalizer::to_type_name;

/// Type names that collide with Swift keywords or standard-library types.
static SWIFT_DISALLOWED: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "Any",
        "AnyObject",
        "Array",
        "Bool",
        "Character",
        "Class",
        "Codable",
        "Data",
        "Date",
        "Decimal",
        "Decodable",
        "Dictionary",
        "Double",
        "Encodable",
        "Enum",
        "Error",
        "Float",
        "Int",
        "Int32",
        "Int64",
        "Optional",
        "Protocol",
        "Result",
        "Self",
        "Set",
        "String",
        "Struct",
        "Type",
        "URL",
        "UUID",
        "Void",
    ]
    .into_iter()
    .collect()
});

/// How to rename an identifier that collides with a disallowed name.
pub trait EscapeStrategy: fmt::Debug + Send + Sync {
    fn escape_model_type(&self, name: &str) -> String;

    fn escape_enum_type(&self, name: &str) -> String {
        self.escape_model_type(name)
    }
}

/// Prepends a fixed marker, `_` by default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixEscape {
    pub prefix: String,
}

impl Default for PrefixEscape {
    fn default() -> Self {
        Self {
            prefix: "_".to_string(),
        }
    }
}

impl EscapeStrategy for PrefixEscape {
    fn escape_model_type(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name)
    }
}

/// Per-target-language naming rules: a disallowed-identifier set plus the
/// strategy used to escape collisions.
#[derive(Debug, Clone)]
pub struct NamingProfile {
    name: String,
    disallowed: HashSet<String>,
    escape: Arc<dyn EscapeStrategy>,
}

impl Default for NamingProfile {
    fn default() -> Self {
        Self::plain()
    }
}

impl NamingProfile {
    pub fn new<I, S>(name: &str, disallowed: I, escape: Arc<dyn EscapeStrategy>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.to_string(),
            disallowed: disallowed.into_iter().map(Into::into).collect(),
            escape,
        }
    }

    /// No disallowed identifiers.
    pub fn plain() -> Self {
        Self::new("default", Vec::<String>::new(), Arc::new(PrefixEscape::default()))
    }

    pub fn swift() -> Self {
        Self::new(
            "swift",
            SWIFT_DISALLOWED.iter().copied(),
            Arc::new(PrefixEscape::default()),
        )
    }

    /// Look up a built-in profile by name.
    pub fn named(name: &str) -> Option<Self> {
        match name {
            "default" => Some(Self::plain()),
            "swift" => Some(Self::swift()),
            _ => None,
        }
    }

    /// Build the profile a config selects. Unknown profile names fall back to `default`.
    pub fn from_config(config: &CompilerConfig) -> Self {
        let mut profile = Self::named(&config.profile).unwrap_or_else(|| {
            log::warn!(
                "unrecognized profile {}, using default",
                config.profile
            );
            Self::plain()
        });
        profile.disallowed.extend(config.reserved.iter().cloned());
        if let Some(ref prefix) = config.escape_prefix {
            profile.escape = Arc::new(PrefixEscape {
                prefix: prefix.clone(),
            });
        }
        profile
    }

    pub fn with_escape(mut self, escape: Arc<dyn EscapeStrategy>) -> Self {
        self.escape = escape;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_disallowed(&self, identifier: &str) -> bool {
        self.disallowed.contains(identifier)
    }

    /// Type-cased name for a schema, escaped when disallowed.
    pub fn type_name(&self, raw: &str) -> String {
        let name = to_type_name(raw);
        if self.is_disallowed(&name) {
            self.escape.escape_model_type(&name)
        } else {
            name
        }
    }

    /// Type-cased name for an enum, escaped when disallowed.
    pub fn enum_name(&self, raw: &str) -> String {
        let name = to_type_name(raw);
        if self.is_disallowed(&name) {
            self.escape.escape_enum_type(&name)
        } else {
            name
        }
    }
}
