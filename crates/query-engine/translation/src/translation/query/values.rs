//! Handle the rendering of argument values as SQL literals.

use query_engine_sql::sql;
use query_engine_sql::sql::value::Value;

/// Splice an argument referenced by a `$N` marker.
///
/// Null is the bare `null` token, text-like values are `$$`-delimited and
/// everything else is its plain textual form.
pub fn append_ordinal_argument(sql: &mut sql::string::SQL, value: &Value) {
    if value.is_null() {
        sql.append_literal("null");
    } else if value.is_string() {
        sql.append_dollar_quoted(&value.to_text());
    } else {
        sql.append_literal(&value.to_text());
    }
}

/// Splice an argument at a `?` marker.
///
/// When the template already opened a quote right before the marker the text goes
/// in as is, so copy-pasted templates like `name='?'` are not quoted twice.
pub fn append_anonymous_argument(
    sql: &mut sql::string::SQL,
    value: &Value,
    quoted_by_template: bool,
) {
    if value.is_null() {
        sql.append_literal("null");
    } else if value.is_string() && !quoted_by_template {
        sql.append_dollar_quoted(&value.to_text());
    } else {
        sql.append_literal(&value.to_text());
    }
}
