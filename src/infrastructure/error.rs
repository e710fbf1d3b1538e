//! Errors raised where the CLI touches the process environment

use thiserror::Error;

use crate::application::ApplicationError;

/// A failed layout or structure operation, or an I/O failure outside the
/// services (stdin, working directory, config template).
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl InfraError {
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}
