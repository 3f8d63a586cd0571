use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::controller::factory::ControllerKind;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("no applicable constructor found for {0:?}")]
    NoConstructor(ControllerKind),

    #[error("failed to construct {kind:?} controller")]
    Construction {
        kind: ControllerKind,
        #[source]
        source: Box<AppError>,
    },

    #[error("factory returned an unexpected controller for {0:?}")]
    WrongController(ControllerKind),

    #[error("failed to load {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to save {}: {source}", .path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("document has no backing file")]
    NoBackingFile,

    #[error("invalid localization bundle: {0}")]
    Bundle(#[from] serde_json::Error),
}

impl AppError {
    /// Message shown in the error dialog. Construction failures surface the
    /// wrapped cause rather than the factory wrapper text.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Construction { source, .. } => source.user_message(),
            other => other.to_string(),
        }
    }
}

/// Convenience type alias for Results with AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_display() {
        let err = AppError::Load {
            path: PathBuf::from("/tmp/a.json"),
            source: io::Error::new(io::ErrorKind::NotFound, "file not found"),
        };
        assert!(err.to_string().contains("/tmp/a.json"));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_construction_error_surfaces_root_cause() {
        let err = AppError::Construction {
            kind: ControllerKind::EditorTab,
            source: Box::new(AppError::NoConstructor(ControllerKind::EditorTab)),
        };
        assert!(err.user_message().contains("no applicable constructor"));
    }

    #[test]
    fn test_user_message_defaults_to_display() {
        let err = AppError::NoBackingFile;
        assert_eq!(err.user_message(), err.to_string());
    }
}
