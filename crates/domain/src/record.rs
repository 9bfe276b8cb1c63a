//! Record helpers — dot-path lookup, coercion, and template interpolation.
//!
//! Records are arbitrary JSON objects owned by the calling subsystem.
//! These helpers implement the loose, never-failing coercions the engine
//! relies on: a lookup either resolves to a value or to "absent", and
//! coercions degrade to `None` instead of erroring.

use serde_json::Value;

/// Resolve a dot-separated path against a record.
///
/// Traverses nested objects (`"owner.email"`); array indexing is not
/// supported. Returns `None` when any segment is missing or a non-object
/// is traversed into.
#[must_use]
pub fn resolve_path<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = record;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Coerce a JSON value to a display string.
///
/// Strings are used verbatim; other values use their JSON rendering.
/// `None` (absent field) coerces to `None`.
#[must_use]
pub fn coerce_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Coerce a JSON value to a number for ordering comparisons.
///
/// Accepts JSON numbers and numeric strings; anything else (including an
/// absent field) is `None`, which makes the comparison fail.
#[must_use]
pub fn coerce_number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Substitute `{{key}}` tokens with top-level record fields.
///
/// Keys resolve against top-level fields only (no nested paths), missing
/// keys substitute an empty string, and no escaping is performed. A `{{`
/// without a closing `}}` is copied through verbatim.
#[must_use]
pub fn interpolate(template: &str, record: &Value) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        output.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];
        let Some(end) = after_open.find("}}") else {
            output.push_str(&rest[start..]);
            return output;
        };
        let key = after_open[..end].trim();
        if let Some(value) = coerce_string(record.get(key)) {
            output.push_str(&value);
        }
        rest = &after_open[end + 2..];
    }
    output.push_str(rest);
    output
}
