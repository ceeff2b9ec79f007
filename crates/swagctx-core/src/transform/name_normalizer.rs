use std::sync::LazyLock;

use heck::{ToLowerCamelCase, ToPascalCase};
use regex::{Captures, Regex};

/// A `{name}` path placeholder. Non-greedy: each placeholder matches on its own.
static PATH_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^{}]*)\}").expect("placeholder pattern is valid"));

/// UpperCamelCase identifier for a generated type.
pub fn to_type_name(raw: &str) -> String {
    guard_leading_digit(pascal(raw))
}

/// lowerCamelCase identifier for a field or parameter.
pub fn to_field_name(raw: &str) -> String {
    guard_leading_digit(sanitize_identifier(raw).to_lower_camel_case())
}

/// UpperCamelCase identifier for an enum case.
pub fn to_enum_case_name(raw: &str) -> String {
    guard_leading_digit(pascal(raw))
}

/// Derive an operation identifier from HTTP method + path.
///
/// Each path segment is type-cased and concatenated, then every `{name}`
/// placeholder becomes `By<Name>_<name>`:
///
/// - `GET /users` → `getUsers`
/// - `GET /users/{id}` → `getUsersById_id`
/// - `DELETE /users/{userId}/posts/{postId}` →
///   `deleteUsersByUserId_userIdPostsByPostId_postId`
pub fn route_to_operation_id(method: &str, path: &str) -> String {
    let joined: String = path.split('/').map(type_case_segment).collect();
    let replaced = PATH_PLACEHOLDER.replace_all(&joined, |caps: &Captures| {
        format!("By{}_{}", pascal(&caps[1]), &caps[1])
    });
    format!("{}{}", method.to_lowercase(), replaced)
}

/// Type-case the literal parts of one path segment, keeping placeholders verbatim.
fn type_case_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut last = 0;
    for m in PATH_PLACEHOLDER.find_iter(segment) {
        out.push_str(&type_case_literal(&segment[last..m.start()]));
        out.push_str(m.as_str());
        last = m.end();
    }
    out.push_str(&type_case_literal(&segment[last..]));
    out
}

fn type_case_literal(literal: &str) -> String {
    if literal.chars().any(char::is_alphanumeric) {
        pascal(literal)
    } else {
        String::new()
    }
}

fn pascal(raw: &str) -> String {
    sanitize_identifier(raw).to_pascal_case()
}

/// heck drops a leading `_`, so a leading digit is escaped after casing.
fn guard_leading_digit(name: String) -> String {
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{name}")
    } else {
        name
    }
}

/// Collapse separator runs to `_` so heck splits on them; empty input becomes `unnamed`.
fn sanitize_identifier(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut prev_was_separator = false;

    for ch in name.chars() {
        if ch.is_alphanumeric() {
            if prev_was_separator && !result.is_empty() {
                result.push('_');
            }
            result.push(ch);
            prev_was_separator = false;
        } else {
            prev_was_separator = true;
        }
    }

    if result.is_empty() {
        return "unnamed".to_string();
    }

    result
}
