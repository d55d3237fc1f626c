use regex::Regex;
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::{PolicyDocumentError, PolicyError, PolicyNameError, StatementError};
use crate::traits::ValidationSink;
use crate::types::{
    Advisory, DocumentKey, Effect, StatementKey, TopLevelKey, display_value, has_exact_keys,
    unexpected_keys,
};

pub(crate) const POLICY_NAME_MAX_LEN: usize = 128;
pub(crate) const WILDCARD_RESOURCE: &str = "*";

type Object = Map<String, Value>;

pub(crate) fn top_level(document: &Value) -> Result<&Object, PolicyNameError> {
    document.as_object().ok_or(PolicyNameError::NotAnObject)
}

/// Exact key-set check on the first and second level. Only keys beyond the
/// allowed set are named in the error; a level that merely lacks a key fails
/// with an empty listing.
pub(crate) fn check_shape(top: &Object) -> Result<(), PolicyError> {
    if !has_exact_keys::<TopLevelKey>(top) {
        return Err(PolicyNameError::UnexpectedKeys(unexpected_keys::<TopLevelKey>(top)).into());
    }

    let policy_document = top
        .get(TopLevelKey::PolicyDocument.as_ref())
        .and_then(Value::as_object)
        .ok_or(PolicyDocumentError::NotAnObject)?;

    if !has_exact_keys::<DocumentKey>(policy_document) {
        return Err(
            PolicyDocumentError::UnexpectedKeys(unexpected_keys::<DocumentKey>(policy_document))
                .into(),
        );
    }

    Ok(())
}

pub(crate) fn check_policy_name(
    top: &Object,
    pattern: &Regex,
    pattern_text: &str,
) -> Result<(), PolicyNameError> {
    let name = top
        .get(TopLevelKey::PolicyName.as_ref())
        .ok_or(PolicyNameError::Missing)?
        .as_str()
        .ok_or(PolicyNameError::NotAString)?;

    let length = name.chars().count();
    if length == 0 || length > POLICY_NAME_MAX_LEN {
        return Err(PolicyNameError::Length { length });
    }

    if !pattern.is_match(name) {
        return Err(PolicyNameError::Pattern {
            pattern: pattern_text.to_string(),
        });
    }

    Ok(())
}

pub(crate) fn check_policy_document(top: &Object) -> Result<&Object, PolicyDocumentError> {
    let policy_document = top
        .get(TopLevelKey::PolicyDocument.as_ref())
        .ok_or(PolicyDocumentError::Missing)?
        .as_object()
        .ok_or(PolicyDocumentError::NotAnObject)?;

    for key in [DocumentKey::Version, DocumentKey::Statement] {
        if !policy_document.contains_key(key.as_ref()) {
            return Err(PolicyDocumentError::MissingKey(key));
        }
    }

    Ok(policy_document)
}

pub(crate) fn statements(policy_document: &Object) -> Result<&[Value], PolicyDocumentError> {
    policy_document
        .get(DocumentKey::Statement.as_ref())
        .ok_or(PolicyDocumentError::MissingKey(DocumentKey::Statement))?
        .as_array()
        .map(Vec::as_slice)
        .ok_or(PolicyDocumentError::StatementNotAList)
}

/// Checks one statement. Keys are inspected in a fixed order and the first
/// violation is returned; advisories for keys inspected before that point
/// have already reached `sink`.
pub(crate) fn check_statement<'a>(
    index: usize,
    statement: &'a Value,
    warnings: bool,
    sink: &mut dyn ValidationSink,
) -> Result<&'a Object, StatementError> {
    let statement = statement
        .as_object()
        .ok_or(StatementError::NotAnObject { index })?;

    let keys = unexpected_keys::<StatementKey>(statement);
    if !keys.is_empty() {
        return Err(StatementError::UnexpectedKeys { keys, index });
    }

    let mut advise = |key: StatementKey| {
        if warnings && !statement.contains_key(key.as_ref()) {
            let advisory = Advisory { index, key };
            warn!(
                event = "Validate",
                phase = "Statement",
                index,
                key = key.as_ref(),
                "{advisory}"
            );
            sink.on_advisory(&advisory);
        }
    };
    let require = move |key: StatementKey| -> Result<&'a Value, StatementError> {
        statement
            .get(key.as_ref())
            .ok_or(StatementError::MissingKey { key, index })
    };

    advise(StatementKey::Sid);

    let effect = require(StatementKey::Effect)?;
    if Effect::from_value(effect).is_none() {
        return Err(StatementError::InvalidEffect {
            value: display_value(effect),
            index,
        });
    }

    advise(StatementKey::Principal);
    require(StatementKey::Action)?;
    require(StatementKey::Resource)?;
    advise(StatementKey::Condition);

    Ok(statement)
}

/// `false` for the `*` wildcard, `true` for any other value, whatever its type.
pub(crate) fn classify_resource(resource: &Value) -> bool {
    !matches!(resource, Value::String(s) if s == WILDCARD_RESOURCE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ValidationReport;
    use serde_json::json;
    use yare::parameterized;

    fn object(value: &Value) -> &Object {
        value.as_object().unwrap()
    }

    #[parameterized(
        wildcard = { json!("*"), false },
        bucket = { json!("arn:aws:s3:::my-bucket/*"), true },
        star_list = { json!(["*"]), true },
        double_star = { json!("**"), true },
        number = { json!(1), true },
        null = { json!(null), true },
    )]
    fn test_classify_resource(resource: Value, expected: bool) {
        assert_eq!(classify_resource(&resource), expected);
        assert_eq!(classify_resource(&resource), classify_resource(&resource));
    }

    #[test]
    fn test_policy_name_length_bounds() {
        let re = Regex::new(".*").unwrap();
        let name = |n: usize| json!({ "PolicyName": "a".repeat(n) });

        assert!(check_policy_name(object(&name(1)), &re, ".*").is_ok());
        assert!(check_policy_name(object(&name(128)), &re, ".*").is_ok());
        assert_eq!(
            check_policy_name(object(&name(0)), &re, ".*"),
            Err(PolicyNameError::Length { length: 0 })
        );
        assert_eq!(
            check_policy_name(object(&name(129)), &re, ".*"),
            Err(PolicyNameError::Length { length: 129 })
        );
    }

    #[test]
    fn test_policy_name_length_counts_characters() {
        let re = Regex::new(".*").unwrap();
        let doc = json!({ "PolicyName": "ä".repeat(128) });
        assert!(check_policy_name(object(&doc), &re, ".*").is_ok());
    }

    #[test]
    fn test_policy_name_not_a_string() {
        let re = Regex::new(".*").unwrap();
        let doc = json!({ "PolicyName": 42 });
        assert_eq!(
            check_policy_name(object(&doc), &re, ".*"),
            Err(PolicyNameError::NotAString)
        );
    }

    #[test]
    fn test_shape_reports_only_extra_keys() {
        let missing = json!({ "PolicyName": "p" });
        let err = check_shape(object(&missing)).unwrap_err();
        assert_eq!(err.to_string(), "Unexpected key(s) on first level: set()");

        let second = json!({ "PolicyName": "p", "PolicyDocument": { "Version": "1" } });
        let err = check_shape(object(&second)).unwrap_err();
        assert_eq!(err.to_string(), "Unexpected key(s) on second level: set()");
    }

    #[test]
    fn test_statements_must_be_a_list() {
        let doc = json!({ "Version": "1", "Statement": { "Effect": "Allow" } });
        assert_eq!(
            statements(object(&doc)).unwrap_err(),
            PolicyDocumentError::StatementNotAList
        );
    }

    #[test]
    fn test_statement_checks_unexpected_keys_first() {
        let statement = json!({ "Unexpected_key": 1 });
        let mut report = ValidationReport::default();
        let err = check_statement(0, &statement, true, &mut report).unwrap_err();
        assert!(matches!(err, StatementError::UnexpectedKeys { index: 0, .. }));
        assert!(report.advisories().is_empty());
    }

    #[test]
    fn test_statement_advisory_precedes_effect_failure() {
        let statement = json!({ "Action": "s3:GetObject", "Resource": "*" });
        let mut report = ValidationReport::default();
        let err = check_statement(4, &statement, true, &mut report).unwrap_err();
        assert_eq!(
            err,
            StatementError::MissingKey {
                key: StatementKey::Effect,
                index: 4
            }
        );
        assert_eq!(
            report.advisories(),
            [Advisory {
                index: 4,
                key: StatementKey::Sid
            }]
        );
    }

    #[test]
    fn test_statement_without_warnings_is_silent() {
        let statement = json!({ "Effect": "Deny", "Action": "*", "Resource": "*" });
        let mut report = ValidationReport::default();
        check_statement(0, &statement, false, &mut report).unwrap();
        assert!(report.advisories().is_empty());
    }

    #[test]
    fn test_statement_not_an_object() {
        let mut report = ValidationReport::default();
        let err = check_statement(2, &json!("Allow"), false, &mut report).unwrap_err();
        assert_eq!(err, StatementError::NotAnObject { index: 2 });
    }
}
