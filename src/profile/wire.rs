use serde::Deserialize;
use serde_json::Value;

/// `result` of `GET /player/v1.0/{id}`; only the rating blocks are read.
///
/// Ratings come either as `{"display": "3.512", ...}` objects or as bare values.
#[derive(Deserialize)]
pub(crate) struct PlayerNode {
    pub(crate) singles: Option<Value>,
    pub(crate) doubles: Option<Value>,
}

pub(crate) fn display_of(node: Option<&Value>) -> Option<String> {
    let v = match node? {
        Value::Object(map) => map.get("display")?,
        other => other,
    };
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
