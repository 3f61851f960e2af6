//! Error types for decoding lines and loading record kinds.

use std::path::PathBuf;

use thiserror::Error;

use crate::kind::RecordKind;

/// Errors produced while decoding a single line.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Invalid(String),
}

impl DecodeError {
    /// True when the bytes are not well-formed JSON at all, as opposed to
    /// well-formed JSON that does not match the record shape.
    pub fn is_syntax(&self) -> bool {
        match self {
            DecodeError::Json(e) => e.is_syntax() || e.is_eof(),
            DecodeError::Invalid(_) => false,
        }
    }
}

/// Errors that stop a single-kind load.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line} is longer than {limit} bytes")]
    LineTooLong { line: usize, limit: usize },

    #[error("failed to decode line {line}: {source}")]
    Decode {
        line: usize,
        #[source]
        source: DecodeError,
    },
}

/// A load failure attributed to the record kind it happened on.
#[derive(Error, Debug)]
#[error("{kind}: {source}")]
pub struct KindError {
    pub kind: RecordKind,
    #[source]
    pub source: LoadError,
}

/// Every per-kind failure of one `Insomnium::load` call, in load order.
#[derive(Error, Debug)]
#[error("{}", one_per_line(.errors))]
pub struct LoadAllError {
    errors: Vec<KindError>,
}

impl LoadAllError {
    pub(crate) fn new(errors: Vec<KindError>) -> Self {
        Self { errors }
    }

    pub fn errors(&self) -> &[KindError] {
        &self.errors
    }

    pub fn iter(&self) -> std::slice::Iter<'_, KindError> {
        self.errors.iter()
    }

    /// Kinds that failed, in load order.
    pub fn kinds(&self) -> Vec<RecordKind> {
        self.errors.iter().map(|e| e.kind).collect()
    }

    pub fn into_errors(self) -> Vec<KindError> {
        self.errors
    }
}

fn one_per_line(errors: &[KindError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

impl<'a> IntoIterator for &'a LoadAllError {
    type Item = &'a KindError;
    type IntoIter = std::slice::Iter<'a, KindError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn missing(kind: RecordKind) -> KindError {
        KindError {
            kind,
            source: LoadError::Open {
                path: PathBuf::from(format!("/data/{}", kind.file_name())),
                source: io::Error::new(io::ErrorKind::NotFound, "not found"),
            },
        }
    }

    #[test]
    fn combined_error_lists_each_failure_on_its_own_line() {
        let err = LoadAllError::new(vec![
            missing(RecordKind::Workspace),
            missing(RecordKind::Request),
        ]);

        assert_eq!(
            err.to_string(),
            "Workspace: failed to open /data/insomnia.Workspace.db: not found\n\
             Request: failed to open /data/insomnia.Request.db: not found"
        );
        assert_eq!(err.kinds(), vec![RecordKind::Workspace, RecordKind::Request]);
    }

    #[test]
    fn combined_error_has_no_single_source() {
        let err = LoadAllError::new(vec![missing(RecordKind::Project)]);
        let as_error: &dyn std::error::Error = &err;

        assert!(as_error.source().is_none());
        assert_eq!(err.iter().count(), 1);
    }

    #[test]
    fn syntax_errors_are_told_apart_from_shape_mismatches() {
        let syntax = serde_json::from_slice::<serde_json::Value>(b"{\"_id\":").unwrap_err();
        assert!(DecodeError::from(syntax).is_syntax());

        let shape = serde_json::from_slice::<u32>(b"\"text\"").unwrap_err();
        assert!(!DecodeError::from(shape).is_syntax());
    }
}
