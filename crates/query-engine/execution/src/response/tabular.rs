//! The tabular encoding: CSV text with a line of column names.
//!
//! Cells carry no type information. `<nil>` is null, text that looks like a date or a
//! timestamp becomes a timestamp, and anything else is kept as raw bytes for the
//! caller to coerce.

use crate::error::ParseError;
use crate::result_set::{parse_timestamp, CellValue, ResultSet, Row};

/// The out-of-band token standing for a null cell.
pub const NULL_MARKER: &str = "<nil>";

pub fn parse(raw: &[u8]) -> Result<ResultSet, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(raw);

    let columns: Vec<String> = match reader.headers() {
        Ok(headers) => headers.iter().map(str::to_string).collect(),
        Err(err) => {
            tracing::debug!(error = %err, "no readable header line, treating the response as empty");
            return Ok(ResultSet::default());
        }
    };
    if columns.is_empty() {
        return Ok(ResultSet::default());
    }

    let rows = reader
        .byte_records()
        .map(|record| {
            record
                .map(|record| record.iter().map(resolve_cell).collect::<Row>())
                .map_err(ParseError::Csv)
        })
        .collect::<Result<Vec<Row>, ParseError>>()?;

    Ok(ResultSet::new(columns, None, rows))
}

fn resolve_cell(field: &[u8]) -> Option<CellValue> {
    if field == NULL_MARKER.as_bytes() {
        return Some(CellValue::Null);
    }
    let timestamp = std::str::from_utf8(field).ok().and_then(parse_timestamp);
    Some(timestamp.map_or_else(|| CellValue::Bytes(field.to_vec()), CellValue::Timestamp))
}

#[cfg(test)]
mod tests {
    use super::parse;
    use crate::error::ParseError;
    use crate::result_set::CellValue;
    use chrono::{TimeZone, Utc};

    #[test]
    fn header_then_values() {
        let result = parse(b"__time,added,channel\n2015-09-12T00:46:58Z,36,#en.wikipedia\n").unwrap();
        assert_eq!(result.columns(), ["__time", "added", "channel"]);
        assert_eq!(result.column_types(), None);
        assert_eq!(
            result.rows()[0],
            vec![
                Some(CellValue::Timestamp(
                    Utc.with_ymd_and_hms(2015, 9, 12, 0, 46, 58).unwrap()
                )),
                Some(CellValue::Bytes(b"36".to_vec())),
                Some(CellValue::Bytes(b"#en.wikipedia".to_vec())),
            ]
        );
    }

    #[test]
    fn quoted_fields_and_null_marker() {
        let result = parse(b"name,comment\n\"Smith, J\",<nil>\n\"say \"\"hi\"\"\",\"\"\n").unwrap();
        assert_eq!(result.row_count(), 2);
        assert_eq!(
            result.rows()[0],
            vec![
                Some(CellValue::Bytes(b"Smith, J".to_vec())),
                Some(CellValue::Null),
            ]
        );
        assert_eq!(
            result.rows()[1],
            vec![
                Some(CellValue::Bytes(b"say \"hi\"".to_vec())),
                Some(CellValue::Bytes(vec![])),
            ]
        );
    }

    #[test]
    fn empty_body_is_an_empty_result() {
        let result = parse(b"").unwrap();
        assert!(result.is_empty());
        assert!(result.columns().is_empty());
    }

    #[test]
    fn header_only_is_an_empty_result() {
        let result = parse(b"a,b\n").unwrap();
        assert!(result.is_empty());
        assert_eq!(result.columns().len(), 2);
    }

    #[test]
    fn ragged_lines_are_errors() {
        assert!(matches!(parse(b"a,b\n1,2\n3\n"), Err(ParseError::Csv(_))));
    }
}
