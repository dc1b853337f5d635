use std::path::PathBuf;

use crate::syntax_kind::SyntaxKind;

/// Failures while loading a tree document.
///
/// Resolution itself never fails; only getting a tree into memory can.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    #[error("failed to read tree document {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed tree document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("label `{0}` is used by more than one node")]
    DuplicateLabel(String),

    #[error("no node is labelled `{0}`")]
    UnknownLabel(String),

    #[error("unknown static context preset `{0}` (expected empty, xpath or xquery)")]
    InvalidStaticContext(String),

    #[error("{0:?} nodes belong to the static context and cannot appear in the tree")]
    DetachedKind(SyntaxKind),
}
