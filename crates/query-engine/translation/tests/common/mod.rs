use query_engine_metadata::metadata::ResponseEncoding;
use query_engine_sql::sql::placeholder::PlaceholderStyle;
use query_engine_sql::sql::value::Value;
use query_engine_translation::translation;

/// Translate a template with the default (inferred) placeholder style and return the literal query.
pub fn test_translation(template: &str, arguments: &[Value]) -> Result<String, translation::error::Error> {
    test_translation_with_style(template, arguments, PlaceholderStyle::Infer)
}

pub fn test_translation_with_style(
    template: &str,
    arguments: &[Value],
    placeholder_style: PlaceholderStyle,
) -> Result<String, translation::error::Error> {
    let plan = translation::query::translate(translation::query::QueryRequest {
        template,
        arguments,
        placeholder_style,
        response_encoding: ResponseEncoding::Auto,
    })?;
    Ok(plan.query_sql().to_string())
}
