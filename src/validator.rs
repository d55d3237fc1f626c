use std::path::Path;

use regex::Regex;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::checks;
use crate::config::{DEFAULT_POLICY_NAME_REGEX, ValidatorConfig, compile_policy_name_pattern};
use crate::error::{PolicyError, PolicyNameError, StatementError};
use crate::loader;
use crate::traits::ValidationSink;
use crate::types::{ResourceOutcome, StatementKey, ValidationReport};

/// Validates policy documents against the fixed `PolicyName` / `PolicyDocument`
/// layout. Holds only its configuration, so one instance can check any
/// number of documents.
#[derive(Debug, Clone)]
pub struct Validator {
    config: ValidatorConfig,
    policy_name_regex: Regex,
}

impl Default for Validator {
    fn default() -> Self {
        Validator {
            config: ValidatorConfig::default(),
            policy_name_regex: DEFAULT_POLICY_NAME_REGEX.clone(),
        }
    }
}

impl Validator {
    /// A validator with the default pattern and warnings off.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: ValidatorConfig) -> Result<Self, PolicyError> {
        let policy_name_regex = compile_policy_name_pattern(&config.policy_name_pattern)?;
        Ok(Validator {
            config,
            policy_name_regex,
        })
    }

    pub fn builder() -> ValidatorBuilder {
        ValidatorBuilder::default()
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Run the full pipeline and collect every outcome and advisory.
    ///
    /// ```rust
    /// use iam_policy_validator::{Validator, parse_document};
    /// let doc = parse_document(r#"{
    ///     "PolicyName": "root",
    ///     "PolicyDocument": {
    ///         "Version": "2012-10-17",
    ///         "Statement": [{"Effect": "Allow", "Action": "*", "Resource": "*"}]
    ///     }
    /// }"#).unwrap();
    /// let report = Validator::new().validate(&doc).unwrap();
    /// assert_eq!(report.outcomes()[0].to_string(), "Method returned False for statement with index 0.");
    /// ```
    pub fn validate(&self, document: &Value) -> Result<ValidationReport, PolicyError> {
        let mut report = ValidationReport::default();
        self.validate_with(document, &mut report)?;
        Ok(report)
    }

    /// Run the full pipeline, delivering results to `sink` as they are produced.
    ///
    /// Order: `PolicyName`, `PolicyDocument` presence, exact key sets, then each
    /// statement followed by its resource classification. The first failure
    /// ends the run.
    pub fn validate_with(
        &self,
        document: &Value,
        sink: &mut dyn ValidationSink,
    ) -> Result<(), PolicyError> {
        let result = self.run(document, sink);
        if let Err(err) = &result {
            debug!(
                event = "Validate",
                phase = "Failed",
                kind = err.kind().as_ref(),
                error = %err
            );
        }
        result
    }

    fn run(&self, document: &Value, sink: &mut dyn ValidationSink) -> Result<(), PolicyError> {
        debug!(
            event = "Validate",
            phase = "Start",
            warnings = self.config.warnings,
            pattern = self.config.policy_name_pattern.as_str()
        );

        self.validate_policy_name(document)?;
        let policy_document = self.validate_policy_document(document)?;
        self.validate_shape(document)?;

        let statements = checks::statements(policy_document)?;
        debug!(
            event = "Validate",
            phase = "Statements",
            count = statements.len()
        );

        for (index, statement) in statements.iter().enumerate() {
            let statement = self.validate_statement(index, statement, sink)?;
            // Presence of Resource was just checked.
            let scoped = statement
                .get(StatementKey::Resource.as_ref())
                .is_some_and(Self::classify_resource);
            let outcome = ResourceOutcome { index, scoped };
            info!(
                event = "Validate",
                phase = "Resource",
                index,
                scoped = outcome.scoped,
                "{outcome}"
            );
            sink.on_outcome(&outcome);
        }

        debug!(event = "Validate", phase = "Done");
        Ok(())
    }

    /// `PolicyName` must be present, 1 to 128 characters long, and match the
    /// configured pattern at its start.
    pub fn validate_policy_name(&self, document: &Value) -> Result<(), PolicyNameError> {
        let top = checks::top_level(document)?;
        checks::check_policy_name(
            top,
            &self.policy_name_regex,
            &self.config.policy_name_pattern,
        )
    }

    /// `PolicyDocument` must be present and hold `Version` and `Statement`.
    /// Returns the `PolicyDocument` object.
    pub fn validate_policy_document<'a>(
        &self,
        document: &'a Value,
    ) -> Result<&'a Map<String, Value>, PolicyError> {
        let top = checks::top_level(document)?;
        Ok(checks::check_policy_document(top)?)
    }

    /// First level must be exactly `{PolicyName, PolicyDocument}`, second level
    /// exactly `{Version, Statement}`. Only extra keys are named on failure.
    pub fn validate_shape(&self, document: &Value) -> Result<(), PolicyError> {
        let top = checks::top_level(document)?;
        checks::check_shape(top)
    }

    /// Check one statement and return it as an object. Advisories go to `sink`
    /// when warnings are enabled.
    pub fn validate_statement<'a>(
        &self,
        index: usize,
        statement: &'a Value,
        sink: &mut dyn ValidationSink,
    ) -> Result<&'a Map<String, Value>, StatementError> {
        checks::check_statement(index, statement, self.config.warnings, sink)
    }

    /// `false` if `resource` is the `*` wildcard, `true` otherwise.
    pub fn classify_resource(resource: &Value) -> bool {
        checks::classify_resource(resource)
    }

    /// Decode `text` and validate it.
    pub fn validate_str(&self, text: &str) -> Result<ValidationReport, PolicyError> {
        let document = loader::parse_document(text)?;
        self.validate(&document)
    }

    /// Open `path`, decode it and validate it. The file is closed when this
    /// returns, whether validation passed or not.
    pub fn validate_file(
        &self,
        path: impl AsRef<Path>,
        sink: &mut dyn ValidationSink,
    ) -> Result<(), PolicyError> {
        let mut file = loader::open_document(path)?;
        let document = file.read_document()?;
        self.validate_with(&document, sink)
    }
}

/// Builder for a [`Validator`] with non-default options.
#[derive(Debug, Clone, Default)]
pub struct ValidatorBuilder {
    config: ValidatorConfig,
}

impl ValidatorBuilder {
    pub fn policy_name_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.config.policy_name_pattern = pattern.into();
        self
    }

    pub fn warnings(mut self, enabled: bool) -> Self {
        self.config.warnings = enabled;
        self
    }

    /// Compiles the pattern. Fails with `PolicyError::InvalidPattern` if it is
    /// not a valid regular expression.
    pub fn build(self) -> Result<Validator, PolicyError> {
        Validator::from_config(self.config)
    }
}

#[cfg(test)]
mod tests;
