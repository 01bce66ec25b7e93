//! Column type tags as reported in the types header of a typed-array response.

use enum_iterator::Sequence;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The column types the engine reports and we know how to read.
///
/// The engine reports either its native type names (`STRING`, `LONG`, ...) or SQL
/// type names (`VARCHAR`, `BIGINT`, ...) depending on the request. Both map here.
/// Anything else (`COMPLEX<...>`, `ARRAY<...>`, `OTHER`) is `Unknown`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Sequence, Serialize, Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    String,
    Long,
    Integer,
    Float,
    Double,
    Boolean,
    Timestamp,
    Unknown,
}

impl ColumnType {
    /// The type tags that resolve to this column type.
    pub fn type_tags(self) -> &'static [&'static str] {
        match self {
            ColumnType::String => &["STRING", "VARCHAR", "CHAR"],
            ColumnType::Long => &["LONG", "BIGINT"],
            ColumnType::Integer => &["INTEGER", "INT", "SMALLINT", "TINYINT"],
            ColumnType::Float => &["FLOAT", "REAL"],
            ColumnType::Double => &["DOUBLE", "DECIMAL"],
            ColumnType::Boolean => &["BOOLEAN"],
            ColumnType::Timestamp => &["TIMESTAMP", "DATE"],
            ColumnType::Unknown => &[],
        }
    }

    /// Resolve a type tag from the wire. Matching is case-insensitive.
    pub fn from_type_tag(tag: &str) -> ColumnType {
        let tag = tag.trim();
        enum_iterator::all::<ColumnType>()
            .find(|column_type| {
                column_type
                    .type_tags()
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(tag))
            })
            .unwrap_or(ColumnType::Unknown)
    }

    /// Whether integral wire values in this column should still be read as floats.
    pub fn is_floating_point(self) -> bool {
        matches!(self, ColumnType::Float | ColumnType::Double)
    }

    /// Whether integral wire values in this column fit a 32-bit integer by declaration.
    pub fn is_narrow_integer(self) -> bool {
        matches!(self, ColumnType::Integer)
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.type_tags().first() {
            Some(tag) => write!(f, "{tag}"),
            None => write!(f, "UNKNOWN"),
        }
    }
}
