use std::path::PathBuf;

use super::*;
use crate::error::ErrorKind;
use crate::types::{Advisory, StatementKey};
use insta::assert_snapshot;
use serde_json::json;
use yare::parameterized;


/// Records the display line of everything a run delivers, in arrival order.
#[derive(Debug, Default)]
struct RecordingSink {
    lines: Vec<String>,
}

impl ValidationSink for RecordingSink {
    fn on_outcome(&mut self, outcome: &ResourceOutcome) {
        self.lines.push(outcome.to_string());
    }

    fn on_advisory(&mut self, advisory: &Advisory) {
        self.lines.push(advisory.to_string());
    }
}

fn testdata(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("testdata")
        .join(name)
}

fn load(name: &str) -> Value {
    loader::open_document(testdata(name))
        .and_then(|mut file| file.read_document())
        .expect("fixture should load")
}

fn warning_validator() -> Validator {
    Validator::builder()
        .warnings(true)
        .build()
        .expect("default pattern compiles")
}

fn policy_with_statements(statements: Value) -> Value {
    json!({
        "PolicyName": "root",
        "PolicyDocument": {
            "Version": "2012-10-17",
            "Statement": statements,
        }
    })
}

fn run_err(document: &Value) -> PolicyError {
    Validator::new()
        .validate(document)
        .expect_err("document should be rejected")
}

include!("pipeline.rs");
include!("statements.rs");
