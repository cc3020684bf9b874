//! Required-field presence checks over JSON request bodies.

use serde_json::{Map, Value};

/// First required field found missing, with the client-facing message.
#[derive(Debug, PartialEq, Eq)]
pub struct MissingField {
    pub field: &'static str,
    pub error: String,
}

/// Walk `fields` in order and report the first one whose value in `body` is
/// absent or falsy (null, false, numeric zero, empty string). Returns None
/// when every required field holds a truthy value.
///
/// Falsy-as-missing is deliberate: a legitimate `quantity: 0` or `price: 0`
/// is rejected the same as an absent field. Callers depend on this.
pub fn check_required_fields(
    fields: &[&'static str],
    body: &Map<String, Value>,
) -> Option<MissingField> {
    for &field in fields {
        if !is_truthy(body.get(field)) {
            return Some(MissingField {
                field,
                error: format!("{} is required", capitalize(field)),
            });
        }
    }
    None
}

fn is_truthy(v: Option<&Value>) -> bool {
    match v {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map_or(true, |f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Upper-cases the first character only: `category_id` -> `Category_id`.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
