//! Statement effect values.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

/// The two legal values of a statement's `Effect` key. Matching is case-sensitive.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, Serialize, Deserialize, ToSchema,
)]
pub enum Effect {
    Allow,
    Deny,
}

impl Effect {
    /// Reads an effect out of a JSON value. Anything other than the exact
    /// strings `Allow` or `Deny` yields `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_str().and_then(|s| s.parse().ok())
    }
}
