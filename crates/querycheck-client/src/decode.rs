//! Response decoding: pull the result array out of a JSON body.

use serde_json::Value;

/// Extract the array under `key` from a JSON object body.
pub(crate) fn items(body: &str, key: &str) -> Result<Vec<Value>, String> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| format!("body is not JSON: {e}"))?;

    let Value::Object(mut map) = value else {
        return Err("body is not a JSON object".to_string());
    };

    match map.remove(key) {
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(format!("{key:?} is not an array: {other}")),
        None => Err(format!("missing {key:?} container")),
    }
}
