use serde::{de::Error as _, Deserialize, Deserializer};
use serde_json::{Map, Value};

pub(crate) type JsonObject = Map<String, Value>;

#[derive(Debug, Deserialize)]
pub(crate) enum Environment {
    /// The receipt was generated in the sandbox environment.
    Sandbox,
    /// The receipt was generated in the production environment.
    Production,

    #[serde(untagged)]
    Unknown(String),
}

/// For optional array fields where an absent key means `None`, but a present
/// key must hold an array of objects. Use together with `#[serde(default)]`;
/// a `null` or non-array value is rejected instead of being coerced.
pub(crate) fn present_object_array<'de, D>(
    deserializer: D,
) -> Result<Option<Vec<JsonObject>>, D::Error>
where
    D: Deserializer<'de>,
{
    Vec::<JsonObject>::deserialize(deserializer).map(Some)
}

/// For arrays of records where one bad element shouldn't cost the rest: keeps
/// the object elements in order and skips anything else. A missing, `null` or
/// non-array value gives an empty list.
pub(crate) fn object_elements<'de, D>(deserializer: D) -> Result<Vec<JsonObject>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(elements) => elements
            .into_iter()
            .filter_map(|element| match element {
                Value::Object(object) => Some(object),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// Status codes arrive as integers, but strings ("21003") and integral
/// floats (21006.0) are accepted as well. Fractional or out-of-range numbers
/// are rejected.
pub(crate) fn status_code<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let code = match &value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(integral))
        }
        _ => None,
    };
    code.ok_or_else(|| D::Error::custom(format!("invalid status code: {value}")))
}

fn integral(f: f64) -> Option<i64> {
    // i64::MAX isn't representable as f64; the bound below is 2^63.
    (f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64)
        .then_some(f as i64)
}
