//! Rewrite a query template's placeholders into literal values.
//!
//! Two conventions are understood: ordinal markers (`$1`, `$2`, ...) that reference
//! arguments by 1-based index, and anonymous markers (`?`) that consume arguments
//! in order. A `$` directly preceded by another `$` never starts an ordinal marker,
//! which keeps `$$...$$` quoted text in templates intact.

use query_engine_sql::sql;
use query_engine_sql::sql::placeholder::PlaceholderStyle;
use query_engine_sql::sql::value::Value;

use super::values;
use crate::translation::error::Error;

/// The convention a particular translation uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Convention {
    Ordinal,
    Anonymous,
}

/// A `$N` marker located in a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrdinalMarker<'a> {
    /// Byte offset of the `$`.
    pub start: usize,
    /// Byte offset just past the last digit.
    pub end: usize,
    pub digits: &'a str,
}

/// Find every ordinal marker, left to right.
pub fn ordinal_markers(template: &str) -> Vec<OrdinalMarker<'_>> {
    let bytes = template.as_bytes();
    let mut markers = vec![];
    let mut position = 0;

    while position < bytes.len() {
        let escaped = position > 0 && bytes[position - 1] == b'$';
        if bytes[position] == b'$' && !escaped {
            let digits_end = bytes[position + 1..]
                .iter()
                .position(|byte| !byte.is_ascii_digit())
                .map_or(bytes.len(), |offset| position + 1 + offset);
            if digits_end > position + 1 {
                markers.push(OrdinalMarker {
                    start: position,
                    end: digits_end,
                    digits: &template[position + 1..digits_end],
                });
                position = digits_end;
                continue;
            }
        }
        position += 1;
    }

    markers
}

/// The number of arguments an ordinal template expects: its highest index.
/// Markers whose index cannot be parsed are not counted.
pub fn count_ordinal_placeholders(template: &str) -> usize {
    ordinal_markers(template)
        .iter()
        .filter_map(|marker| marker.digits.parse::<usize>().ok())
        .max()
        .unwrap_or(0)
}

pub fn count_anonymous_placeholders(template: &str) -> usize {
    template.matches('?').count()
}

/// The number of inputs a prepared template declares.
///
/// Unless anonymous markers are forced, only the ordinal convention is scanned:
/// whether `?` characters are placeholders depends on the arguments supplied later.
pub fn count_placeholders(template: &str, style: PlaceholderStyle) -> usize {
    match style {
        PlaceholderStyle::Anonymous => count_anonymous_placeholders(template),
        PlaceholderStyle::Infer | PlaceholderStyle::Ordinal => count_ordinal_placeholders(template),
    }
}

/// Decide which convention applies to this template and argument list.
pub fn resolve_convention(
    style: PlaceholderStyle,
    template: &str,
    argument_count: usize,
) -> Convention {
    match style {
        PlaceholderStyle::Ordinal => Convention::Ordinal,
        PlaceholderStyle::Anonymous => Convention::Anonymous,
        PlaceholderStyle::Infer => {
            if count_anonymous_placeholders(template) == argument_count {
                Convention::Anonymous
            } else {
                Convention::Ordinal
            }
        }
    }
}

/// Replace every placeholder in `template` with its argument.
pub fn translate(
    template: &str,
    arguments: &[Value],
    style: PlaceholderStyle,
) -> Result<sql::string::SQL, Error> {
    check_finite(arguments)?;
    match resolve_convention(style, template, arguments.len()) {
        Convention::Ordinal => translate_ordinal(template, arguments),
        Convention::Anonymous => translate_anonymous(template, arguments),
    }
}

/// NaN and the infinities would be rendered as bare identifiers.
fn check_finite(arguments: &[Value]) -> Result<(), Error> {
    match arguments.iter().enumerate().find_map(|(index, argument)| match argument {
        Value::Float(f) if !f.is_finite() => Some((index + 1, *f)),
        _ => None,
    }) {
        Some((position, value)) => Err(Error::NonFiniteArgument {
            position,
            value: value.to_string(),
        }),
        None => Ok(()),
    }
}

fn translate_ordinal(template: &str, arguments: &[Value]) -> Result<sql::string::SQL, Error> {
    let markers = ordinal_markers(template);

    // resolve every index before emitting anything.
    let indexes = markers
        .iter()
        .map(|marker| {
            let index =
                marker
                    .digits
                    .parse::<usize>()
                    .map_err(|err| Error::UnparsableIndex {
                        marker: template[marker.start..marker.end].to_string(),
                        template: template.to_string(),
                        reason: err.to_string(),
                    })?;
            if index == 0 || index > arguments.len() {
                return Err(Error::IndexOutOfRange {
                    index,
                    arguments: arguments.len(),
                });
            }
            Ok(index)
        })
        .collect::<Result<Vec<usize>, Error>>()?;

    let expected = indexes.iter().copied().max().unwrap_or(0);
    if expected != arguments.len() {
        return Err(Error::ArgumentCountMismatch {
            expected,
            actual: arguments.len(),
        });
    }

    let mut sql = sql::string::SQL::new();
    let mut copied_up_to = 0;
    for (marker, index) in markers.iter().zip(indexes) {
        sql.append_syntax(&template[copied_up_to..marker.start]);
        values::append_ordinal_argument(&mut sql, &arguments[index - 1]);
        copied_up_to = marker.end;
    }
    sql.append_syntax(&template[copied_up_to..]);

    Ok(sql)
}

fn translate_anonymous(template: &str, arguments: &[Value]) -> Result<sql::string::SQL, Error> {
    let placeholders = count_anonymous_placeholders(template);
    if placeholders != arguments.len() {
        return Err(Error::ArgumentCountMismatch {
            expected: placeholders,
            actual: arguments.len(),
        });
    }

    let mut segments = template.split('?');
    let mut sql = sql::string::SQL::new();
    let mut preceding = segments.next().unwrap_or_default();
    sql.append_syntax(preceding);

    for (argument, segment) in arguments.iter().zip(segments) {
        values::append_anonymous_argument(&mut sql, argument, preceding.ends_with('\''));
        sql.append_syntax(segment);
        preceding = segment;
    }

    Ok(sql)
}
