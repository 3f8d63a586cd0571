use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::ui::surface::TextBuffer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(pub u64);

/// One open document's complete state: file binding, buffer content and the
/// dirty/new lifecycle flags.
pub struct Document {
    pub id: DocumentId,
    pub buffer: TextBuffer,
    pub file_path: Option<PathBuf>,
    pub display_name: String,
    pub cursor_position: usize,
    has_unsaved_changes: Rc<Cell<bool>>,
    is_new: bool,
}

impl Document {
    /// Create a document and wire the dirty flag into the buffer's modify
    /// callback. `fallback_name` is shown while the document has no path.
    pub fn new(id: DocumentId, file_path: Option<PathBuf>, fallback_name: &str) -> Self {
        let display_name = match &file_path {
            Some(path) => extract_filename(path),
            None => fallback_name.to_string(),
        };

        let buffer = TextBuffer::default();
        let has_unsaved_changes = Rc::new(Cell::new(false));
        let changes = has_unsaved_changes.clone();
        buffer.add_modify_callback(move |inserted, deleted| {
            if inserted > 0 || deleted > 0 {
                changes.set(true);
            }
        });

        Self {
            id,
            buffer,
            file_path,
            display_name,
            cursor_position: 0,
            has_unsaved_changes,
            is_new: true,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.has_unsaved_changes.get()
    }

    pub fn mark_clean(&self) {
        self.has_unsaved_changes.set(false);
    }

    pub fn set_dirty(&self, dirty: bool) {
        self.has_unsaved_changes.set(dirty);
    }

    pub fn is_new(&self) -> bool {
        self.is_new
    }

    /// Once a document stops being new it must have a concrete path.
    pub fn set_new(&mut self, is_new: bool) {
        debug_assert!(is_new || self.file_path.is_some());
        self.is_new = is_new;
    }

    /// Rebind the backing file and refresh the display name.
    pub fn set_file_path(&mut self, path: PathBuf) {
        self.display_name = extract_filename(&path);
        self.file_path = Some(path);
    }

    /// Release the buffer. The document is unusable afterwards.
    pub fn cleanup(&mut self) {
        self.buffer.cleanup();
    }
}

/// Extract the file name component, or "Unknown" if there is none.
fn extract_filename(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}
