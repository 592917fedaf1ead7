//! The locals map used to render template expressions.

use serde_json::{Map, Value};

/// Resolved key/value configuration handed to the rendering engine and to
/// hook and generator subprocesses.
pub type Locals = Map<String, Value>;

/// Parse `key=value` pairs into a locals map with type coercion.
///
/// `"true"`/`"false"` become booleans, numeric strings become numbers,
/// everything else stays a string. Entries without a `=` are skipped, as is
/// an entry with an empty key or value.
pub fn parse_key_values<S: AsRef<str>>(pairs: &[S]) -> Locals {
    let mut locals = Locals::new();
    for pair in pairs {
        let Some((key, value)) = pair.as_ref().split_once('=') else {
            continue;
        };
        if key.is_empty() || value.is_empty() {
            continue;
        }
        locals.insert(key.to_string(), coerce(value));
    }
    locals
}

/// Coerce a raw string value into a typed JSON value.
pub fn coerce(raw: &str) -> Value {
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => {
            if let Ok(int) = raw.parse::<i64>() {
                Value::Number(int.into())
            } else if let Some(float) = raw.parse::<f64>().ok().and_then(serde_json::Number::from_f64) {
                Value::Number(float)
            } else {
                Value::String(raw.to_string())
            }
        }
    }
}

/// Merge `overlay` into `base`, overwriting on key collision.
pub fn merge(base: &mut Locals, overlay: Locals) {
    for (key, value) in overlay {
        base.insert(key, value);
    }
}
