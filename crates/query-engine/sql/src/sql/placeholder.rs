//! Placeholder conventions accepted in query templates.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Which placeholder convention a template uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum PlaceholderStyle {
    /// Anonymous when the number of `?` equals the number of arguments,
    /// ordinal otherwise.
    #[default]
    Infer,
    /// `$1`, `$2`, ... referencing arguments by 1-based index.
    Ordinal,
    /// `?` markers resolved by position.
    Anonymous,
}
