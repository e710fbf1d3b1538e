//! Path context for I/O failures inside the services

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// Turns a filesystem `io::Result` into an `OperationFailed` error that
/// names the action and path, e.g. `create directory: /p/Docs/API`.
pub trait IoResultExt<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: format!("{}: {}", action, path.display()),
            source: Box::new(e),
        })
    }
}
