//! The in-memory result of one query, and the typed cells it is made of.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use query_engine_metadata::metadata::ColumnType;

use crate::error::ScanError;

/// A single typed value, resolved once when the response is parsed.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CellValue {
    #[default]
    Null,
    Bool(bool),
    Int32(i32),
    Int64(i64),
    Float64(f64),
    String(String),
    Timestamp(DateTime<Utc>),
    /// Untyped text straight off the wire; the caller decides what it is.
    Bytes(Vec<u8>),
}

impl CellValue {
    pub fn kind(&self) -> &'static str {
        match self {
            CellValue::Null => "null",
            CellValue::Bool(_) => "bool",
            CellValue::Int32(_) => "int32",
            CellValue::Int64(_) => "int64",
            CellValue::Float64(_) => "float64",
            CellValue::String(_) => "string",
            CellValue::Timestamp(_) => "timestamp",
            CellValue::Bytes(_) => "bytes",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Convert to a native type, see [`FromCell`].
    pub fn get<T: FromCell>(&self) -> Result<T, ScanError> {
        T::from_cell(self)
    }

    fn text(&self) -> Option<Cow<'_, str>> {
        match self {
            CellValue::String(s) => Some(Cow::Borrowed(s)),
            CellValue::Bytes(b) => std::str::from_utf8(b).ok().map(Cow::Borrowed),
            _ => None,
        }
    }
}

/// A row of cells. `None` is a cell the parser could not resolve; it is skipped when scanning.
pub type Row = Vec<Option<CellValue>>;

/// Column names, optional declared column types, and rows, in wire order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    columns: Vec<String>,
    column_types: Option<Vec<ColumnType>>,
    rows: Vec<Row>,
}

impl ResultSet {
    pub fn new(columns: Vec<String>, column_types: Option<Vec<ColumnType>>, rows: Vec<Row>) -> Self {
        ResultSet {
            columns,
            column_types,
            rows,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_types(&self) -> Option<&[ColumnType]> {
        self.column_types.as_deref()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub(crate) fn into_parts(self) -> (Vec<String>, Option<Vec<ColumnType>>, Vec<Row>) {
        (self.columns, self.column_types, self.rows)
    }
}

/// Recognise text that looks like a date or a date and time.
///
/// Accepts RFC 3339, `YYYY-MM-DD hh:mm:ss[.f]`, `YYYY-MM-DDThh:mm:ss[.f]` (read as UTC)
/// and a bare `YYYY-MM-DD` (midnight UTC).
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.len() < 10 || !text.as_bytes()[0].is_ascii_digit() {
        return None;
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Some(timestamp.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Native types a cell can be read into.
///
/// Untyped `Bytes` cells are coerced from their text, which is how values from the
/// tabular encoding become numbers and booleans.
pub trait FromCell: Sized {
    const TYPE_NAME: &'static str;

    fn from_cell(cell: &CellValue) -> Result<Self, ScanError>;
}

fn conversion_error<T: FromCell>(cell: &CellValue) -> ScanError {
    ScanError::Conversion {
        from: cell.kind(),
        to: T::TYPE_NAME,
    }
}

fn parse_text<T: FromCell + std::str::FromStr>(cell: &CellValue) -> Result<T, ScanError> {
    cell.text()
        .and_then(|text| text.trim().parse::<T>().ok())
        .ok_or_else(|| conversion_error::<T>(cell))
}

impl FromCell for bool {
    const TYPE_NAME: &'static str = "bool";

    fn from_cell(cell: &CellValue) -> Result<Self, ScanError> {
        match cell {
            CellValue::Bool(b) => Ok(*b),
            CellValue::Int32(i) => Ok(*i != 0),
            CellValue::Int64(i) => Ok(*i != 0),
            _ => parse_text(cell),
        }
    }
}

impl FromCell for i64 {
    const TYPE_NAME: &'static str = "int64";

    fn from_cell(cell: &CellValue) -> Result<Self, ScanError> {
        match cell {
            CellValue::Int32(i) => Ok((*i).into()),
            CellValue::Int64(i) => Ok(*i),
            _ => parse_text(cell),
        }
    }
}

impl FromCell for i32 {
    const TYPE_NAME: &'static str = "int32";

    fn from_cell(cell: &CellValue) -> Result<Self, ScanError> {
        match cell {
            CellValue::Int32(i) => Ok(*i),
            CellValue::Int64(i) => i32::try_from(*i).map_err(|_| conversion_error::<i32>(cell)),
            _ => parse_text(cell),
        }
    }
}

impl FromCell for f64 {
    const TYPE_NAME: &'static str = "float64";

    #[allow(clippy::cast_precision_loss)]
    fn from_cell(cell: &CellValue) -> Result<Self, ScanError> {
        match cell {
            CellValue::Float64(f) => Ok(*f),
            CellValue::Int32(i) => Ok((*i).into()),
            CellValue::Int64(i) => Ok(*i as f64),
            _ => parse_text(cell),
        }
    }
}

impl FromCell for String {
    const TYPE_NAME: &'static str = "string";

    fn from_cell(cell: &CellValue) -> Result<Self, ScanError> {
        match cell {
            CellValue::Null => Err(conversion_error::<String>(cell)),
            CellValue::Bool(b) => Ok(b.to_string()),
            CellValue::Int32(i) => Ok(i.to_string()),
            CellValue::Int64(i) => Ok(i.to_string()),
            CellValue::Float64(f) => Ok(f.to_string()),
            CellValue::Timestamp(t) => Ok(t.to_rfc3339()),
            CellValue::String(_) | CellValue::Bytes(_) => cell
                .text()
                .map(Cow::into_owned)
                .ok_or_else(|| conversion_error::<String>(cell)),
        }
    }
}

impl FromCell for DateTime<Utc> {
    const TYPE_NAME: &'static str = "timestamp";

    /// Integral cells are epoch milliseconds, the engine's native time representation.
    fn from_cell(cell: &CellValue) -> Result<Self, ScanError> {
        match cell {
            CellValue::Timestamp(t) => Ok(*t),
            CellValue::Int64(millis) => Utc
                .timestamp_millis_opt(*millis)
                .single()
                .ok_or_else(|| conversion_error::<DateTime<Utc>>(cell)),
            CellValue::Int32(millis) => Utc
                .timestamp_millis_opt((*millis).into())
                .single()
                .ok_or_else(|| conversion_error::<DateTime<Utc>>(cell)),
            _ => cell
                .text()
                .and_then(|text| parse_timestamp(&text))
                .ok_or_else(|| conversion_error::<DateTime<Utc>>(cell)),
        }
    }
}

impl FromCell for Vec<u8> {
    const TYPE_NAME: &'static str = "bytes";

    fn from_cell(cell: &CellValue) -> Result<Self, ScanError> {
        match cell {
            CellValue::Bytes(b) => Ok(b.clone()),
            CellValue::String(s) => Ok(s.clone().into_bytes()),
            _ => Err(conversion_error::<Vec<u8>>(cell)),
        }
    }
}

impl<T: FromCell> FromCell for Option<T> {
    const TYPE_NAME: &'static str = T::TYPE_NAME;

    fn from_cell(cell: &CellValue) -> Result<Self, ScanError> {
        match cell {
            CellValue::Null => Ok(None),
            _ => T::from_cell(cell).map(Some),
        }
    }
}
