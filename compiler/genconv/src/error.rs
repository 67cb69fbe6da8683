//! Run-level failures.

use thiserror::Error;

/// Why a generation run failed. Every failure is fatal to the run.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GenerateError {
    /// A requested conversion does not take exactly one value to one value.
    #[error("{method}: expected signature to have exactly one parameter and one result, found {params} and {results}")]
    Signature {
        method: String,
        params: usize,
        results: usize,
    },

    #[error("{method}: delegate {delegate} does not exist")]
    DelegateNotFound { method: String, delegate: String },

    #[error("{method}: delegate {delegate} is not a function")]
    DelegateNotFunction { method: String, delegate: String },

    /// Only raised under [`DuplicatePolicy::Reject`](crate::DuplicatePolicy::Reject).
    #[error("{method}: conversion {source_type} -> {target_type} is already declared by {existing}")]
    DuplicateSignature {
        method: String,
        existing: String,
        source_type: String,
        target_type: String,
    },

    /// Building a method body failed; `path` is the rendered breadcrumb
    /// from the method's own `source -> target` frame down to the cause.
    #[error("Error while creating converter method: {method}\n\n{path}")]
    Build { method: String, path: String },
}
