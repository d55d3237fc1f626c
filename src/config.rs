//! Construction-time options for a [`Validator`](crate::Validator).

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::PolicyError;

/// Pattern a `PolicyName` must match by default.
pub const DEFAULT_POLICY_NAME_PATTERN: &str = r"[\w+=,.@-]+";

// Infallible: the pattern is a constant.
pub(crate) static DEFAULT_POLICY_NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    compile_policy_name_pattern(DEFAULT_POLICY_NAME_PATTERN)
        .expect("default policy name pattern compiles")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default, deny_unknown_fields)]
pub struct ValidatorConfig {
    /// Regular expression a `PolicyName` has to match, starting at its first
    /// character. Trailing characters after the match are not checked.
    pub policy_name_pattern: String,
    /// Report advisories for omitted `Sid`, `Principal` and `Condition` keys.
    pub warnings: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        ValidatorConfig {
            policy_name_pattern: DEFAULT_POLICY_NAME_PATTERN.to_string(),
            warnings: false,
        }
    }
}

impl ValidatorConfig {
    /// Read a configuration from JSON. Missing fields take their defaults.
    ///
    /// ```rust
    /// use iam_policy_validator::ValidatorConfig;
    /// let config = ValidatorConfig::from_json(r#"{"warnings": true}"#).unwrap();
    /// assert!(config.warnings);
    /// assert_eq!(config.policy_name_pattern, r"[\w+=,.@-]+");
    /// ```
    pub fn from_json(text: &str) -> Result<Self, PolicyError> {
        serde_json::from_str(text).map_err(|e| PolicyError::InvalidConfig(e.to_string()))
    }
}

/// Compiles `pattern` so that it only matches at the start of the input.
pub(crate) fn compile_policy_name_pattern(pattern: &str) -> Result<Regex, PolicyError> {
    Regex::new(&format!("^(?:{pattern})")).map_err(|e| PolicyError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    #[parameterized(
        simple = { "TestPolicy", true },
        all_symbols = { "a+b=c,d.e@f-g_h", true },
        unicode_word = { "Richtlinie_ä", true },
        prefix_only = { "Valid then invalid!", true },
        leading_space = { " Policy", false },
        leading_symbol = { "!Policy", false },
        empty = { "", false },
    )]
    fn test_default_pattern_matches_at_start(name: &str, expected: bool) {
        assert_eq!(DEFAULT_POLICY_NAME_REGEX.is_match(name), expected);
    }

    #[test]
    fn test_default_regex_is_anchored() {
        assert_eq!(DEFAULT_POLICY_NAME_REGEX.as_str(), r"^(?:[\w+=,.@-]+)");
    }

    #[test]
    fn test_alternation_is_anchored_as_a_whole() {
        let re = compile_policy_name_pattern("foo|bar").unwrap();
        assert!(re.is_match("bar-policy"));
        assert!(!re.is_match("xbar"));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = compile_policy_name_pattern("[unclosed").unwrap_err();
        match err {
            PolicyError::InvalidPattern { pattern, .. } => assert_eq!(pattern, "[unclosed"),
            other => panic!("expected InvalidPattern, got {other:?}"),
        }
    }

    #[test]
    fn test_config_from_json() {
        let config = ValidatorConfig::from_json(r#"{"policy_name_pattern": "[a-z]+"}"#).unwrap();
        assert_eq!(config.policy_name_pattern, "[a-z]+");
        assert!(!config.warnings);

        assert_eq!(ValidatorConfig::from_json("{}").unwrap(), ValidatorConfig::default());
    }

    #[test]
    fn test_config_rejects_unknown_fields() {
        let err = ValidatorConfig::from_json(r#"{"warning": true}"#).unwrap_err();
        assert!(matches!(err, PolicyError::InvalidConfig(_)));
    }
}
