use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::error::PolicyError;

/// Decode policy text into a JSON document.
///
/// Decoder errors are mapped into `PolicyError::Load` with the decoder's
/// message unchanged.
///
/// Example:
/// ```rust
/// use iam_policy_validator::parse_document;
/// let doc = parse_document(r#"{"PolicyName": "root", "PolicyDocument": {}}"#).unwrap();
/// assert!(doc.is_object());
/// assert!(parse_document("{").is_err());
/// ```
pub fn parse_document(text: &str) -> Result<Value, PolicyError> {
    Ok(serde_json::from_str(text)?)
}

/// Decode a JSON document from any reader.
pub fn read_document<R: Read>(reader: R) -> Result<Value, PolicyError> {
    Ok(serde_json::from_reader(reader)?)
}

/// An open policy file. The handle is released when this value is dropped.
#[derive(Debug)]
pub struct PolicyFile {
    path: PathBuf,
    reader: BufReader<File>,
}

impl PolicyFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Decode the file's contents. The handle stays open until `self` is dropped.
    pub fn read_document(&mut self) -> Result<Value, PolicyError> {
        read_document(&mut self.reader)
    }
}

impl Drop for PolicyFile {
    fn drop(&mut self) {
        debug!(
            event = "Load",
            phase = "Released",
            path = %self.path.display()
        );
    }
}

/// Open a policy file for reading.
pub fn open_document(path: impl AsRef<Path>) -> Result<PolicyFile, PolicyError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    debug!(event = "Load", phase = "Opened", path = %path.display());
    Ok(PolicyFile {
        path: path.to_path_buf(),
        reader: BufReader::new(file),
    })
}
