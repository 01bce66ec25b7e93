//! Argument values supplied alongside a query template.

use std::borrow::Cow;

use chrono::{DateTime, SecondsFormat, Utc};

/// A single positional argument. Arguments are nullable.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Timestamp(DateTime<Utc>),
    Bytes(Vec<u8>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Values whose literal form is quoted text rather than a bare token.
    pub fn is_string(&self) -> bool {
        matches!(
            self,
            Value::String(_) | Value::Timestamp(_) | Value::Bytes(_)
        )
    }

    /// The unquoted textual form of the value.
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            Value::Null => Cow::Borrowed("null"),
            Value::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
            Value::Int(i) => Cow::Owned(i.to_string()),
            Value::Float(f) => Cow::Owned(f.to_string()),
            Value::String(s) => Cow::Borrowed(s),
            Value::Timestamp(t) => Cow::Owned(t.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Value::Bytes(b) => String::from_utf8_lossy(b),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.to_text())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value.into())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::Timestamp(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Bytes(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::Value;
    use chrono::{TimeZone, Utc};

    #[test]
    fn textual_forms() {
        assert_eq!(Value::Null.to_text(), "null");
        assert_eq!(Value::from(true).to_text(), "true");
        assert_eq!(Value::from(-12).to_text(), "-12");
        assert_eq!(Value::from(2.5).to_text(), "2.5");
        assert_eq!(Value::from("bob").to_text(), "bob");
        assert_eq!(Value::from(b"raw".to_vec()).to_text(), "raw");
        let time = Utc.with_ymd_and_hms(2015, 9, 12, 0, 46, 58).unwrap();
        assert_eq!(Value::from(time).to_text(), "2015-09-12T00:46:58Z");
    }

    #[test]
    fn options_map_to_null() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::String("x".to_string()));
    }

    #[test]
    fn only_text_like_values_are_strings() {
        assert!(Value::from("x").is_string());
        assert!(Value::from(b"x".to_vec()).is_string());
        assert!(!Value::from(5).is_string());
        assert!(!Value::Null.is_string());
    }
}
