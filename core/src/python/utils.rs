//! Conversions between Python arguments and core types

use crate::error::{Result, ScancatError};
use serde_json::Value;

/// Parses a JSON argument, naming it in the error
pub fn parse_json(name: &str, text: &str) -> Result<Value> {
    serde_json::from_str(text)
        .map_err(|e| ScancatError::InvalidValue(format!("'{}' is not valid JSON: {}", name, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_names_argument() {
        assert_eq!(parse_json("slices_json", "[]").unwrap(), Value::Array(Vec::new()));
        let err = parse_json("header_json", "{").unwrap_err();
        assert!(err.to_string().contains("'header_json'"));
    }
}
