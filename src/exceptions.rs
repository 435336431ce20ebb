//! Managed exceptions raised by method bodies.
//!
//! The invoker never wraps or translates these: whatever a body throws is what
//! the caller of [`GenericInvoker`](crate::invoke::GenericInvoker) receives.
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{type_name}: {message}")]
pub struct Exception {
    pub type_name: String,
    pub message: String,
}

impl Exception {
    pub fn new(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            message: message.into(),
        }
    }

    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Self::new("System.InvalidOperationException", message)
    }

    pub fn argument(message: impl Into<String>) -> Self {
        Self::new("System.ArgumentException", message)
    }
}
