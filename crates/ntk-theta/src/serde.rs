use std::collections::BTreeMap;
use std::iter::FromIterator;

use ntk_core::errors::{ErrorInfo, NtkError};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

use crate::report::DistReport;

fn serde_error(code: &str, err: impl ToString) -> NtkError {
    NtkError::Serde(ErrorInfo::new(code, err.to_string()))
}

fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let ordered = map
                .into_iter()
                .map(|(key, value)| (key, canonicalize(value)))
                .collect::<BTreeMap<_, _>>();
            Value::Object(Map::from_iter(ordered))
        }
        Value::Array(values) => Value::Array(values.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

/// Serializes a value into canonical JSON bytes with sorted object keys.
pub fn to_canonical_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, NtkError> {
    let value = serde_json::to_value(value).map_err(|err| serde_error("json-serialize", err))?;
    let mut bytes = Vec::new();
    serde_json::to_writer(&mut bytes, &canonicalize(value))
        .map_err(|err| serde_error("json-write", err))?;
    Ok(bytes)
}

/// Deserializes a value from JSON bytes.
pub fn from_json_slice<T: DeserializeOwned>(data: &[u8]) -> Result<T, NtkError> {
    serde_json::from_slice(data).map_err(|err| serde_error("json-deserialize", err))
}

/// Deserializes a YAML payload into the requested type.
pub fn from_yaml_slice<T: DeserializeOwned>(data: &[u8]) -> Result<T, NtkError> {
    serde_yaml::from_slice(data).map_err(|err| serde_error("yaml-deserialize", err))
}

/// Serializes a value into YAML.
pub fn to_yaml_string<T: Serialize>(value: &T) -> Result<String, NtkError> {
    serde_yaml::to_string(value).map_err(|err| serde_error("yaml-serialize", err))
}

/// Serialises a distance report to pretty JSON.
pub fn report_to_json(report: &DistReport) -> Result<String, NtkError> {
    serde_json::to_string_pretty(report).map_err(|err| serde_error("dist-report-serialize", err))
}

/// Restores a distance report from JSON.
pub fn report_from_json(json: &str) -> Result<DistReport, NtkError> {
    serde_json::from_str(json).map_err(|err| serde_error("dist-report-deserialize", err))
}
