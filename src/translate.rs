use crate::model::{FlattenResult, TranslationRecord};
use serde_json::Value;

/// Placeholder for a terminal field that is not present at all.
pub const MISSING_FIELD: &str = "missing";

/// Nesting path from the document root down to the terminal level.
const LEVELS: [&str; 5] = ["results", "lexicalEntries", "entries", "senses", "translations"];

/// Extracts every `{language, text}` pair from a dictionary response:
/// results[] -> lexicalEntries[] -> entries[] -> senses[] -> translations[]
///
/// The service omits branches inconsistently, so a missing, null or mistyped
/// array at any node just contributes nothing. Output keeps document order.
pub fn flatten(raw: &Value) -> FlattenResult {
    let mut level: Vec<&Value> = vec![raw];

    for field in LEVELS {
        level = concat_field(&level, field);
    }

    level
        .into_iter()
        .filter(|t| !t.is_null())
        .map(to_record)
        .collect()
}

/// Parses a raw body and flattens it. Only unparsable text is an error.
pub fn parse_and_flatten(body: &str) -> Result<FlattenResult, serde_json::Error> {
    let raw: Value = serde_json::from_str(body)?;
    Ok(flatten(&raw))
}

fn concat_field<'a>(nodes: &[&'a Value], field: &str) -> Vec<&'a Value> {
    nodes
        .iter()
        .copied()
        .filter_map(|node| node.get(field).and_then(Value::as_array))
        .flatten()
        .collect()
}

fn to_record(translation: &Value) -> TranslationRecord {
    TranslationRecord {
        language: coerce(translation.get("language")),
        text: coerce(translation.get("text")),
    }
}

/// String form of any JSON value; strings lose their quotes.
fn coerce(field: Option<&Value>) -> String {
    match field {
        None => MISSING_FIELD.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
