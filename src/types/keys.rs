//! Recognised keys on each level of a policy document.

use std::collections::BTreeSet;
use std::fmt::{Display, Formatter, Result as FmtResult};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};
use utoipa::ToSchema;

use super::repr::quote_str;

/// Keys allowed on the first level of the document.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, EnumIter, Serialize, Deserialize, ToSchema,
)]
pub enum TopLevelKey {
    PolicyName,
    PolicyDocument,
}

/// Keys allowed inside `PolicyDocument`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, EnumIter, Serialize, Deserialize, ToSchema,
)]
pub enum DocumentKey {
    Version,
    Statement,
}

/// Keys allowed inside a single statement.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, EnumIter, Serialize, Deserialize, ToSchema,
)]
pub enum StatementKey {
    Sid,
    Effect,
    Principal,
    Action,
    Resource,
    Condition,
}

/// A sorted set of key names, rendered as `{'a', 'b'}`, or `set()` when empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct KeyList(Vec<String>);

impl KeyList {
    pub fn new(keys: impl IntoIterator<Item = String>) -> Self {
        KeyList(keys.into_iter().sorted().dedup().collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> &[String] {
        &self.0
    }
}

impl Display for KeyList {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.0.is_empty() {
            return f.write_str("set()");
        }
        write!(f, "{{{}}}", self.0.iter().map(|k| quote_str(k)).join(", "))
    }
}

/// Keys of `object` that are not variants of `K`.
pub(crate) fn unexpected_keys<K>(object: &Map<String, Value>) -> KeyList
where
    K: IntoEnumIterator + AsRef<str>,
{
    let allowed: BTreeSet<String> = K::iter().map(|k| k.as_ref().to_string()).collect();
    KeyList::new(object.keys().filter(|k| !allowed.contains(*k)).cloned())
}

/// True when the key set of `object` equals the variant set of `K`, no more and no less.
pub(crate) fn has_exact_keys<K>(object: &Map<String, Value>) -> bool
where
    K: IntoEnumIterator + AsRef<str>,
{
    let allowed: BTreeSet<String> = K::iter().map(|k| k.as_ref().to_string()).collect();
    let observed: BTreeSet<String> = object.keys().cloned().collect();
    allowed == observed
}
