use crate::types::{Advisory, ResourceOutcome};

/// Receives results of a validation run as they are produced.
///
/// Outcomes arrive in statement order. A statement's advisories arrive before
/// its outcome. When a run fails, everything delivered before the failure
/// stays delivered; nothing is delivered after it.
pub trait ValidationSink {
    /// Called once per statement that passed validation.
    fn on_outcome(&mut self, _outcome: &ResourceOutcome) {}

    /// Called for each recommended key a statement omits, only when the
    /// validator has warnings enabled.
    fn on_advisory(&mut self, _advisory: &Advisory) {}
}
