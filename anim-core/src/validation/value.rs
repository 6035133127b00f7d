//! Typed access into untyped JSON trees
//!
//! Every accessor takes the dotted path of the value it inspects so failures
//! point at the exact field. Numbers are never coerced from strings; integer
//! fields accept any JSON number with no fractional part.

use crate::{AnimError, Result};
use serde_json::{Map, Value};

/// JSON type name used in type mismatch reports
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// `path.key`
pub fn join_key(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

/// `path[index]`
pub fn join_index(path: &str, index: usize) -> String {
    format!("{path}[{index}]")
}

pub fn expect_object<'v>(value: &'v Value, path: &str) -> Result<&'v Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| AnimError::type_mismatch(path, "object", type_name(value)))
}

pub fn expect_array<'v>(value: &'v Value, path: &str) -> Result<&'v [Value]> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| AnimError::type_mismatch(path, "array", type_name(value)))
}

pub fn expect_string<'v>(value: &'v Value, path: &str) -> Result<&'v str> {
    value
        .as_str()
        .ok_or_else(|| AnimError::type_mismatch(path, "string", type_name(value)))
}

/// A finite JSON number
pub fn expect_number(value: &Value, path: &str) -> Result<f64> {
    let number = value
        .as_f64()
        .ok_or_else(|| AnimError::type_mismatch(path, "number", type_name(value)))?;
    if !number.is_finite() {
        return Err(AnimError::out_of_range(path, "number must be finite"));
    }
    Ok(number)
}

/// A JSON number with no fractional part within `[min, max]`
pub fn expect_integer_in(value: &Value, path: &str, min: u64, max: u64) -> Result<u64> {
    if !value.is_number() {
        return Err(AnimError::type_mismatch(path, "integer", type_name(value)));
    }
    let number = expect_number(value, path)?;
    check_integral(number, path, min, max)
}

/// Range-check a number that must hold an integer value
pub fn check_integral(number: f64, path: &str, min: u64, max: u64) -> Result<u64> {
    if !number.is_finite() {
        return Err(AnimError::out_of_range(path, "number must be finite"));
    }
    if number.fract() != 0.0 {
        return Err(AnimError::type_mismatch(path, "integer", "number"));
    }
    if number < min as f64 {
        return Err(AnimError::out_of_range(path, format!("must be >= {min}")));
    }
    if number > max as f64 {
        return Err(AnimError::out_of_range(path, format!("must be <= {max}")));
    }
    Ok(number as u64)
}

/// Non-negative integer that fits in a u32
pub fn expect_u32(value: &Value, path: &str) -> Result<u32> {
    let n = expect_integer_in(value, path, 0, u64::from(u32::MAX))?;
    Ok(n as u32)
}

/// Field lookup where JSON `null` counts as absent
pub fn optional_field<'v>(object: &'v Map<String, Value>, key: &str) -> Option<&'v Value> {
    object.get(key).filter(|value| !value.is_null())
}

/// Collect every absent key before failing, so all are reported at once
pub fn require_fields<'v, const N: usize>(
    object: &'v Map<String, Value>,
    keys: [&str; N],
    path: &str,
) -> Result<[&'v Value; N]> {
    let missing: Vec<String> = keys
        .iter()
        .filter(|key| optional_field(object, key).is_none())
        .map(|key| key.to_string())
        .collect();

    if !missing.is_empty() {
        return Err(AnimError::MissingField {
            missing_fields: missing,
            field_path: (!path.is_empty()).then(|| path.to_string()),
        });
    }

    Ok(keys.map(|key| &object[key]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorCode;
    use serde_json::json;

    #[test]
    fn test_paths() {
        assert_eq!(join_key("", "meta"), "meta");
        assert_eq!(join_key("meta", "ratio"), "meta.ratio");
        assert_eq!(join_index("meta.frame", 2), "meta.frame[2]");
    }

    #[test]
    fn test_numbers_are_not_coerced() {
        let err = expect_number(&json!("1.5"), "meta.ratio").unwrap_err();
        assert_eq!(err.code(), ErrorCode::TypeMismatch);
        assert_eq!(err.expected_type(), Some("number"));
        assert_eq!(err.actual_type(), Some("string"));
        assert_eq!(err.field_path(), Some("meta.ratio"));

        assert_eq!(expect_number(&json!(1.5), "x").unwrap(), 1.5);
    }

    #[test]
    fn test_integer_ranges() {
        assert_eq!(expect_integer_in(&json!(255), "o", 0, 255).unwrap(), 255);
        assert_eq!(expect_integer_in(&json!(255.0), "o", 0, 255).unwrap(), 255);

        let err = expect_integer_in(&json!(256), "o", 0, 255).unwrap_err();
        assert_eq!(err.code(), ErrorCode::OutOfRange);

        let err = expect_integer_in(&json!(-1), "o", 0, 255).unwrap_err();
        assert_eq!(err.code(), ErrorCode::OutOfRange);

        let err = expect_integer_in(&json!(1.5), "o", 0, 255).unwrap_err();
        assert_eq!(err.code(), ErrorCode::TypeMismatch);

        let err = expect_integer_in(&json!(true), "o", 0, 255).unwrap_err();
        assert_eq!(err.actual_type(), Some("boolean"));
    }

    #[test]
    fn test_require_fields_reports_all_missing() {
        let value = json!({"ratio": 1, "frames": null});
        let object = value.as_object().unwrap();

        let err = require_fields(object, ["ratio", "bitmaps", "frames"], "").unwrap_err();
        assert_eq!(err.code(), ErrorCode::MissingField);
        assert_eq!(err.missing_fields(), ["bitmaps", "frames"]);
        assert_eq!(err.field_path(), None);

        let [ratio] = require_fields(object, ["ratio"], "").unwrap();
        assert_eq!(ratio, &json!(1));
    }
}
