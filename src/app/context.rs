//! Shared application context captured once at startup and handed to every
//! controller through the factory.

use std::path::PathBuf;

use crate::ui::dialogs::DialogService;

use super::bundle::Bundle;

pub struct AppContext {
    parameters: Vec<PathBuf>,
    bundle: Bundle,
    dialogs: Box<dyn DialogService>,
}

impl AppContext {
    pub fn new(parameters: Vec<PathBuf>, bundle: Bundle, dialogs: Box<dyn DialogService>) -> Self {
        Self {
            parameters,
            bundle,
            dialogs,
        }
    }

    /// File paths passed on the command line; each existing one is opened as
    /// a tab at startup.
    pub fn parameters(&self) -> &[PathBuf] {
        &self.parameters
    }

    pub fn bundle(&self) -> &Bundle {
        &self.bundle
    }

    pub fn dialogs(&self) -> &dyn DialogService {
        self.dialogs.as_ref()
    }
}
