use std::path::Path;

use serde_json::{Map, Value};
use tracing::info;

use crate::error::LoadError;

/// Member name under which wrapped datasets keep their couplets.
const WRAPPER_KEY: &str = "thirukkurals";

/// A decoded dataset.
///
/// Every recognized shape ends up as `Records`. Anything else is carried
/// through untouched as `Opaque` so callers can decide what to do with it.
#[derive(Debug, Clone, PartialEq)]
pub enum Dataset {
    Records(Vec<Value>),
    Opaque(Value),
}

impl Dataset {
    pub fn len(&self) -> usize {
        match self {
            Self::Records(records) => records.len(),
            Self::Opaque(_) => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The dataset as the JSON document printed by `load_data_only`.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Records(records) => Value::Array(records.clone()),
            Self::Opaque(value) => value.clone(),
        }
    }
}

/// Read and decode the dataset file at `path`.
pub fn load_dataset(path: &Path) -> Result<Dataset, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    let bytes = std::fs::read(path)?;
    let value: Value = serde_json::from_slice(&bytes)?;
    decode_dataset(value)
}

/// Decode an already parsed dataset document.
///
/// Shapes are tried in order: a tabular frame, an object whose
/// `thirukkurals` member is a frame, an object with a `thirukkurals`
/// member of any kind, and a plain array.
pub fn decode_dataset(value: Value) -> Result<Dataset, LoadError> {
    if let Some(frame) = Frame::parse(&value)? {
        info!("Found tabular frame with columns: {:?}", frame.columns);
        return Ok(Dataset::Records(frame.into_records()));
    }

    info!("Data type: {}", json_kind(&value));

    match value {
        Value::Object(mut map) if map.contains_key(WRAPPER_KEY) => {
            let inner = map.remove(WRAPPER_KEY).unwrap_or(Value::Null);
            if let Some(frame) = Frame::parse(&inner)? {
                info!("Found tabular frame in {WRAPPER_KEY}");
                return Ok(Dataset::Records(frame.into_records()));
            }
            Ok(match inner {
                Value::Array(records) => Dataset::Records(records),
                other => Dataset::Opaque(other),
            })
        }
        Value::Array(records) => Ok(Dataset::Records(records)),
        other => Ok(Dataset::Opaque(other)),
    }
}

/// A table in pandas' `split` orientation: named columns plus row arrays.
#[derive(Debug)]
struct Frame<'a> {
    columns: Vec<&'a str>,
    rows: &'a [Value],
}

impl<'a> Frame<'a> {
    /// Returns `Ok(None)` when `value` is not shaped like a frame at all,
    /// and an error when it is but its rows do not line up with the columns.
    fn parse(value: &'a Value) -> Result<Option<Self>, LoadError> {
        let Some(map) = value.as_object() else {
            return Ok(None);
        };
        let (Some(columns), Some(rows)) = (
            map.get("columns").and_then(Value::as_array),
            map.get("data").and_then(Value::as_array),
        ) else {
            return Ok(None);
        };
        let Some(columns) = columns
            .iter()
            .map(Value::as_str)
            .collect::<Option<Vec<_>>>()
        else {
            return Ok(None);
        };

        for (i, row) in rows.iter().enumerate() {
            let cells = row.as_array().ok_or_else(|| {
                LoadError::Shape(format!("row {i} is not an array"))
            })?;
            if cells.len() != columns.len() {
                return Err(LoadError::Shape(format!(
                    "row {i} has {} values, expected {}",
                    cells.len(),
                    columns.len()
                )));
            }
        }

        Ok(Some(Self { columns, rows }))
    }

    fn into_records(self) -> Vec<Value> {
        self.rows
            .iter()
            .filter_map(Value::as_array)
            .map(|cells| {
                let record: Map<String, Value> = self
                    .columns
                    .iter()
                    .zip(cells)
                    .map(|(column, cell)| ((*column).to_string(), cell.clone()))
                    .collect();
                Value::Object(record)
            })
            .collect()
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
