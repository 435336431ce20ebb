use crate::exceptions::Exception;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TypeResolutionError {
    #[error("Type not found: {0}")]
    TypeNotFound(String),
    #[error("Type already defined: {0}")]
    DuplicateType(String),
    #[error("{0} is not a generic type definition")]
    NotGenericDefinition(String),
    #[error("{type_name} expects {expected} generic arguments, got {actual}")]
    GenericArityMismatch {
        type_name: String,
        expected: usize,
        actual: usize,
    },
    #[error("Generic index {index} out of bounds (length {length})")]
    GenericIndexOutOfBounds { index: usize, length: usize },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MethodResolutionError {
    #[error("Missing optional parameters not supported (argument {index})")]
    UnsupportedArgument { index: usize },
    #[error("Ambiguous match for {method}: {}", candidates.join(", "))]
    AmbiguousMatch {
        method: String,
        candidates: Vec<String>,
    },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum InvokeError {
    #[error("Method resolution failed: {0}")]
    Resolution(#[from] MethodResolutionError),

    #[error("Type resolution failed: {0}")]
    TypeResolution(#[from] TypeResolutionError),

    #[error("Matching method not found: {type_name}::{method}")]
    MethodNotFound { type_name: String, method: String },

    #[error("{method} expects {expected} generic arguments, got {actual}")]
    GenericArityMismatch {
        method: String,
        expected: usize,
        actual: usize,
    },

    #[error("{method} expects {expected} arguments, got {actual}")]
    ArgumentCount {
        method: String,
        expected: usize,
        actual: usize,
    },

    #[error("Argument {index} of {method}: expected {expected}, got {actual}")]
    ArgumentMismatch {
        method: String,
        index: usize,
        expected: String,
        actual: String,
    },

    #[error("Instance method {0} invoked without a target")]
    TargetRequired(String),

    #[error("Method {0} has no body")]
    MissingBody(String),

    #[error("Method {0} is asynchronous")]
    AsyncMethod(String),

    #[error("Method {0} is not asynchronous")]
    NotAsync(String),

    #[error(transparent)]
    Exception(#[from] Exception),
}
