//! What a validation run reports: one resource outcome per statement plus
//! any advisories raised along the way.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::traits::ValidationSink;

use super::keys::StatementKey;

/// Classification of one statement's `Resource` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct ResourceOutcome {
    /// Zero-based position of the statement.
    pub index: usize,
    /// `false` when the resource is the `*` wildcard.
    pub scoped: bool,
}

impl ResourceOutcome {
    pub fn is_wildcard(&self) -> bool {
        !self.scoped
    }
}

impl Display for ResourceOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let returned = if self.scoped { "True" } else { "False" };
        write!(
            f,
            "Method returned {returned} for statement with index {}.",
            self.index
        )
    }
}

/// A recommended key that a statement left out. Never fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct Advisory {
    pub index: usize,
    pub key: StatementKey,
}

impl Display for Advisory {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "Warning: You may include key '{}' in statement with index {}!",
            self.key, self.index
        )
    }
}

/// Everything a successful run produced, in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ValidationReport {
    outcomes: Vec<ResourceOutcome>,
    advisories: Vec<Advisory>,
}

impl ValidationReport {
    pub fn outcomes(&self) -> &[ResourceOutcome] {
        &self.outcomes
    }

    pub fn advisories(&self) -> &[Advisory] {
        &self.advisories
    }

    /// Indices of statements whose resource is the `*` wildcard.
    pub fn wildcard_indices(&self) -> Vec<usize> {
        self.outcomes
            .iter()
            .filter(|o| o.is_wildcard())
            .map(|o| o.index)
            .collect()
    }
}

impl ValidationSink for ValidationReport {
    fn on_outcome(&mut self, outcome: &ResourceOutcome) {
        self.outcomes.push(*outcome);
    }

    fn on_advisory(&mut self, advisory: &Advisory) {
        self.advisories.push(*advisory);
    }
}
