//! Fail-fast structural validation for IAM-style JSON access policies.
//!
//! A policy document has exactly two first-level keys, `PolicyName` and
//! `PolicyDocument`; the latter holds a `Version` and a `Statement` list. The
//! [`Validator`] walks the document in a fixed order, stops at the first
//! violation with a typed [`PolicyError`], and otherwise reports for every
//! statement whether its `Resource` is the `*` wildcard.
//!
//! ```rust
//! use iam_policy_validator::Validator;
//!
//! let report = Validator::new()
//!     .validate_str(r#"{
//!         "PolicyName": "read-bucket",
//!         "PolicyDocument": {
//!             "Version": "2012-10-17",
//!             "Statement": [
//!                 {"Effect": "Allow", "Action": "s3:GetObject", "Resource": "arn:aws:s3:::my-bucket/*"}
//!             ]
//!         }
//!     }"#)
//!     .unwrap();
//! assert_eq!(report.wildcard_indices(), Vec::<usize>::new());
//! ```

pub use config::{DEFAULT_POLICY_NAME_PATTERN, ValidatorConfig};
pub use error::{ErrorKind, PolicyDocumentError, PolicyError, PolicyNameError, StatementError};
pub use loader::{PolicyFile, open_document, parse_document, read_document};
pub use traits::ValidationSink;
pub use types::{
    Advisory, DocumentKey, Effect, KeyList, ResourceOutcome, StatementKey, TopLevelKey,
    ValidationReport,
};
pub use validator::{Validator, ValidatorBuilder};

mod checks;
mod config;
mod error;
mod loader;
mod traits;
mod types;
mod validator;
