//! The typed-array encoding: a JSON array of arrays.
//!
//! Row 0 holds the column names, row 1 the column type tags, and every later row the
//! values of one result row.

use query_engine_metadata::metadata::ColumnType;
use serde_json::Value;

use crate::error::ParseError;
use crate::result_set::{CellValue, ResultSet, Row};

pub fn parse(raw: &[u8]) -> Result<ResultSet, ParseError> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Err(ParseError::EmptyPayload);
    }

    let payload: Vec<Vec<Value>> = serde_json::from_slice(raw)?;
    let mut payload_rows = payload.into_iter();

    let Some(header) = payload_rows.next() else {
        return Err(ParseError::EmptyPayload);
    };
    let columns = parse_column_names(header)?;

    // a header and nothing else: a valid query with no rows.
    let Some(type_row) = payload_rows.next() else {
        return Ok(ResultSet::new(columns, None, vec![]));
    };
    let column_types = parse_column_types(type_row, columns.len())?;

    let rows = payload_rows
        .enumerate()
        .map(|(index, values)| parse_row(index, values, &columns, &column_types))
        .collect::<Result<Vec<Row>, ParseError>>()?;

    Ok(ResultSet::new(columns, Some(column_types), rows))
}

fn parse_column_names(header: Vec<Value>) -> Result<Vec<String>, ParseError> {
    header
        .into_iter()
        .enumerate()
        .map(|(index, value)| match value {
            Value::String(name) => Ok(name),
            other => Err(ParseError::InvalidHeader(format!(
                "column {index} name is not a string: {other}"
            ))),
        })
        .collect()
}

fn parse_column_types(type_row: Vec<Value>, width: usize) -> Result<Vec<ColumnType>, ParseError> {
    if type_row.len() != width {
        return Err(ParseError::InvalidHeader(format!(
            "{} column types for {width} columns",
            type_row.len()
        )));
    }
    type_row
        .into_iter()
        .enumerate()
        .map(|(index, value)| match value {
            Value::String(tag) => Ok(ColumnType::from_type_tag(&tag)),
            other => Err(ParseError::InvalidHeader(format!(
                "column {index} type is not a string: {other}"
            ))),
        })
        .collect()
}

fn parse_row(
    index: usize,
    values: Vec<Value>,
    columns: &[String],
    column_types: &[ColumnType],
) -> Result<Row, ParseError> {
    if values.len() != columns.len() {
        return Err(ParseError::RowWidthMismatch {
            row: index,
            expected: columns.len(),
            actual: values.len(),
        });
    }
    Ok(values
        .into_iter()
        .zip(columns.iter().zip(column_types))
        .map(|(value, (column, column_type))| resolve_cell(value, *column_type, column))
        .collect())
}

/// Resolve a wire value by its JSON kind, refined by the column's declared type.
/// Kinds with no rule are logged and left unset.
fn resolve_cell(value: Value, column_type: ColumnType, column: &str) -> Option<CellValue> {
    match value {
        Value::Null => Some(CellValue::Null),
        Value::Bool(b) => Some(CellValue::Bool(b)),
        Value::String(s) => Some(CellValue::String(s)),
        Value::Number(number) => resolve_number(&number, column_type),
        Value::Array(_) | Value::Object(_) => {
            tracing::warn!(
                column,
                column_type = %column_type,
                kind = json_kind(&value),
                "can't scan value, leaving the cell unset"
            );
            None
        }
    }
}

fn resolve_number(number: &serde_json::Number, column_type: ColumnType) -> Option<CellValue> {
    if column_type.is_floating_point() {
        return number.as_f64().map(CellValue::Float64);
    }
    if let Some(integer) = number.as_i64() {
        if column_type.is_narrow_integer() {
            if let Ok(narrow) = i32::try_from(integer) {
                return Some(CellValue::Int32(narrow));
            }
        }
        return Some(CellValue::Int64(integer));
    }
    number.as_f64().map(CellValue::Float64)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
