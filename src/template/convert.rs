use liquid::model::Value as LiquidValue;
use liquid::Object;
use serde_json::{Map, Value as JsonValue};

/// Convert JSON value to Liquid value
pub fn json_to_liquid(json: &JsonValue) -> LiquidValue {
    match json {
        JsonValue::Null => LiquidValue::Nil,
        JsonValue::Bool(b) => LiquidValue::scalar(*b),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                LiquidValue::scalar(i)
            } else if let Some(f) = n.as_f64() {
                LiquidValue::scalar(f)
            } else {
                // Default to string
                LiquidValue::scalar(n.to_string())
            }
        }
        JsonValue::String(s) => LiquidValue::scalar(s.clone()),
        JsonValue::Array(arr) => LiquidValue::Array(arr.iter().map(json_to_liquid).collect()),
        JsonValue::Object(obj) => LiquidValue::Object(object_to_liquid(obj)),
    }
}

/// Convert a JSON mapping into a Liquid object
pub fn object_to_liquid(map: &Map<String, JsonValue>) -> Object {
    let mut liquid_obj = Object::new();
    for (k, v) in map {
        liquid_obj.insert(k.clone().into(), json_to_liquid(v));
    }
    liquid_obj
}
