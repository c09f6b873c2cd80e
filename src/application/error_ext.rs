//! Context helpers for fallible manifest and filesystem operations

use std::error::Error;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// Attach "<action>: <path>" context to any error, turning it into
/// [`ApplicationError::OperationFailed`].
pub trait PathContext<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;
}

impl<T, E> PathContext<T> for Result<T, E>
where
    E: Error + Send + Sync + 'static,
{
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: format!("{}: {}", action, path.display()),
            source: Box::new(e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn given_io_error_when_adding_context_then_action_path_and_cause_shown() {
        let res: io::Result<()> = Err(io::Error::from(io::ErrorKind::NotFound));

        let err = res
            .with_path_context("read manifest", Path::new("pkg/package.json"))
            .unwrap_err();

        let msg = err.to_string();
        assert!(msg.starts_with("read manifest: pkg/package.json: "));
        assert!(msg.contains("not found"));
    }

    #[test]
    fn given_json_error_when_adding_context_then_operation_failed() {
        let res = serde_json::from_str::<serde_json::Value>("{");

        let err = res
            .with_path_context("parse manifest", Path::new("package.json"))
            .unwrap_err();

        assert!(matches!(err, ApplicationError::OperationFailed { .. }));
    }
}
