//! JSON response contract
//!
//! Models frequently wrap JSON in markdown fences. Extraction tries, in
//! order: the whole text, then the first fenced block. Whatever parses first
//! is checked for the required top-level keys.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::core::error::ResponseError;

/// Outcome of looking for JSON in raw model output
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    /// The whole text parsed
    Direct(Value),
    /// A fenced code block parsed
    Fenced(Value),
    /// Nothing parsed; carries the parser message of the last attempt
    Unparseable(String),
}

impl Extraction {
    /// Run the extraction over `raw`
    #[must_use]
    pub fn from_text(raw: &str) -> Self {
        let direct_err = match serde_json::from_str::<Value>(raw.trim()) {
            Ok(value) => return Self::Direct(value),
            Err(e) => e.to_string(),
        };

        match fenced_block(raw) {
            Some(block) => match serde_json::from_str::<Value>(block) {
                Ok(value) => Self::Fenced(value),
                Err(e) => Self::Unparseable(e.to_string()),
            },
            None => Self::Unparseable(direct_err),
        }
    }

    /// The parsed value, or a format error
    pub fn into_value(self) -> Result<Value, ResponseError> {
        match self {
            Self::Direct(value) | Self::Fenced(value) => Ok(value),
            Self::Unparseable(msg) => Err(ResponseError::InvalidFormat(msg)),
        }
    }
}

/// Body of the first ```` ```json ```` block, or of the first bare fence
fn fenced_block(raw: &str) -> Option<&str> {
    let (open, skip) = match raw.find("```json") {
        Some(pos) => (pos, "```json".len()),
        None => (raw.find("```")?, 3),
    };
    let start = open + skip;
    let len = raw[start..].find("```")?;
    Some(raw[start..start + len].trim())
}

/// Parse model output and require `keys` at the top level
pub fn parse_contract(raw: &str, keys: &[&str]) -> Result<Map<String, Value>, ResponseError> {
    let value = Extraction::from_text(raw).into_value()?;
    let Value::Object(object) = value else {
        return Err(ResponseError::InvalidStructure("expected a JSON object".to_string()));
    };

    if let Some(missing) = keys.iter().find(|k| !object.contains_key(**k)) {
        return Err(ResponseError::InvalidStructure(format!("Missing required key: {missing}")));
    }

    Ok(object)
}

/// Deserialize one required field of a contract object
pub fn field<T: DeserializeOwned>(object: &Map<String, Value>, key: &str) -> Result<T, ResponseError> {
    let value = object
        .get(key)
        .cloned()
        .ok_or_else(|| ResponseError::InvalidStructure(format!("Missing required key: {key}")))?;
    serde_json::from_value(value)
        .map_err(|e| ResponseError::InvalidStructure(format!("{key}: {e}")))
}
