//! Dialog collaborators, specified at their interface boundary.
//!
//! A cancelled picker is a normal `None`, never an error.

use std::path::{Path, PathBuf};

pub trait DialogService {
    /// Prompt for an existing file to open. `None` means cancelled.
    fn open_file(&self, title: &str, initial_dir: Option<&Path>) -> Option<PathBuf>;

    /// Prompt for a destination path to save to. `None` means cancelled.
    fn save_file(&self, title: &str, initial_dir: Option<&Path>) -> Option<PathBuf>;

    /// Modal error dialog.
    fn alert(&self, message: &str);
}

/// Dialog service for environments without a display. Pickers always cancel;
/// alerts go to the log.
pub struct HeadlessDialogs;

impl DialogService for HeadlessDialogs {
    fn open_file(&self, _title: &str, _initial_dir: Option<&Path>) -> Option<PathBuf> {
        None
    }

    fn save_file(&self, _title: &str, _initial_dir: Option<&Path>) -> Option<PathBuf> {
        None
    }

    fn alert(&self, message: &str) {
        log::error!("{message}");
    }
}
