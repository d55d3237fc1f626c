//! Data model for policy documents and validation results.
//!
//! Document layout:
//! - first level: `PolicyName`, `PolicyDocument`
//! - `PolicyDocument`: `Version`, `Statement`
//! - each statement: `Sid`, `Effect`, `Principal`, `Action`, `Resource`, `Condition`

mod effect;
mod keys;
mod outcome;
mod repr;

pub use effect::Effect;
pub use keys::{DocumentKey, KeyList, StatementKey, TopLevelKey};
pub use outcome::{Advisory, ResourceOutcome, ValidationReport};

pub(crate) use keys::{has_exact_keys, unexpected_keys};
pub(crate) use repr::display_value;
