//! The shared editable-buffer widget, modelled at its interface boundary.
//!
//! One [`ActiveSurface`] exists per window and is rebound to whichever tab is
//! currently selected. Each document owns a [`TextBuffer`]; selection changes
//! swap the buffer and context menu on the surface, never the other way
//! around.

use std::cell::RefCell;
use std::ops::Range;
use std::rc::Rc;

use crate::app::document::DocumentId;

type ModifyCallback = Box<dyn FnMut(usize, usize)>;

/// Clone-shared handle to one document's text content.
///
/// Cloning shares the underlying storage; modify callbacks fire on every
/// content change with the inserted and deleted byte counts.
#[derive(Clone, Default)]
pub struct TextBuffer {
    text: Rc<RefCell<String>>,
    callbacks: Rc<RefCell<Vec<ModifyCallback>>>,
}

impl TextBuffer {
    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    pub fn length(&self) -> usize {
        self.text.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.borrow().is_empty()
    }

    pub fn set_text(&self, content: &str) {
        let deleted = {
            let mut text = self.text.borrow_mut();
            let deleted = text.len();
            text.clear();
            text.push_str(content);
            deleted
        };
        self.notify(content.len(), deleted);
    }

    /// Insert at a byte position. `pos` must lie on a char boundary.
    pub fn insert(&self, pos: usize, content: &str) {
        self.text.borrow_mut().insert_str(pos, content);
        self.notify(content.len(), 0);
    }

    /// Remove a byte range. Bounds must lie on char boundaries.
    pub fn remove(&self, range: Range<usize>) {
        let deleted = range.len();
        self.text.borrow_mut().replace_range(range, "");
        self.notify(0, deleted);
    }

    pub fn add_modify_callback(&self, callback: impl FnMut(usize, usize) + 'static) {
        self.callbacks.borrow_mut().push(Box::new(callback));
    }

    /// Drop all callbacks and content. Called when the owning document is
    /// disposed.
    pub fn cleanup(&self) {
        self.callbacks.borrow_mut().clear();
        self.text.borrow_mut().clear();
    }

    /// Whether two handles share the same underlying storage.
    pub fn same_buffer(&self, other: &TextBuffer) -> bool {
        Rc::ptr_eq(&self.text, &other.text)
    }

    fn notify(&self, inserted: usize, deleted: usize) {
        if inserted == 0 && deleted == 0 {
            return;
        }
        // The text borrow is released before callbacks run.
        let callbacks = self.callbacks.clone();
        for callback in callbacks.borrow_mut().iter_mut() {
            callback(inserted, deleted);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Copy,
    Cut,
    Paste,
    Format,
}

#[derive(Debug, Clone)]
pub struct MenuItem {
    pub label: String,
    pub shortcut: &'static str,
    pub action: MenuAction,
}

/// Per-tab context menu. Carries its owning document so tests and callers can
/// verify which tab's menu is attached to the surface.
#[derive(Debug, Clone)]
pub struct ContextMenu {
    owner: DocumentId,
    items: Vec<MenuItem>,
}

impl ContextMenu {
    pub fn new(owner: DocumentId) -> Self {
        Self {
            owner,
            items: Vec::new(),
        }
    }

    pub fn add(&mut self, label: impl Into<String>, shortcut: &'static str, action: MenuAction) {
        self.items.push(MenuItem {
            label: label.into(),
            shortcut,
            action,
        });
    }

    pub fn owner(&self) -> DocumentId {
        self.owner
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }
}

/// The single reusable editor widget, owned by the selected tab at any
/// instant. Holds the bound buffer, the attached context menu, cursor and
/// selection state, and the clipboard.
#[derive(Default)]
pub struct ActiveSurface {
    buffer: Option<TextBuffer>,
    menu: Option<ContextMenu>,
    clipboard: String,
    cursor: usize,
    selection: Option<Range<usize>>,
    focused: bool,
}

impl ActiveSurface {
    /// Rebind the surface to a document's buffer. Cursor and selection reset;
    /// the caller restores the document's saved cursor afterwards.
    pub fn set_buffer(&mut self, buffer: TextBuffer) {
        self.buffer = Some(buffer);
        self.cursor = 0;
        self.selection = None;
    }

    pub fn buffer(&self) -> Option<&TextBuffer> {
        self.buffer.as_ref()
    }

    pub fn is_showing(&self, buffer: &TextBuffer) -> bool {
        self.buffer
            .as_ref()
            .is_some_and(|bound| bound.same_buffer(buffer))
    }

    /// Drop the buffer, menu and focus. Used when the owning tab is disposed.
    pub fn release(&mut self) {
        self.buffer = None;
        self.menu = None;
        self.selection = None;
        self.cursor = 0;
        self.focused = false;
    }

    pub fn attach_menu(&mut self, menu: ContextMenu) {
        self.menu = Some(menu);
    }

    pub fn detach_menu(&mut self) {
        self.menu = None;
    }

    pub fn menu(&self) -> Option<&ContextMenu> {
        self.menu.as_ref()
    }

    pub fn set_cursor(&mut self, pos: usize) {
        let len = self.buffer.as_ref().map_or(0, TextBuffer::length);
        self.cursor = pos.min(len);
        self.selection = None;
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn select(&mut self, range: Range<usize>) {
        let len = self.buffer.as_ref().map_or(0, TextBuffer::length);
        let start = range.start.min(len);
        let end = range.end.min(len);
        if start < end {
            self.selection = Some(start..end);
            self.cursor = end;
        } else {
            self.selection = None;
        }
    }

    pub fn selection(&self) -> Option<Range<usize>> {
        self.selection.clone()
    }

    pub fn selected_text(&self) -> Option<String> {
        let range = self.selection.clone()?;
        let buffer = self.buffer.as_ref()?;
        Some(buffer.text()[range].to_string())
    }

    /// Keystroke entry point: replaces the selection or inserts at the
    /// cursor. Fires the buffer's modify callbacks, which is what marks the
    /// owning document dirty.
    pub fn type_text(&mut self, content: &str) {
        let Some(buffer) = self.buffer.clone() else {
            return;
        };
        if let Some(range) = self.selection.take() {
            self.cursor = range.start;
            buffer.remove(range);
        }
        buffer.insert(self.cursor, content);
        self.cursor += content.len();
    }

    pub fn copy(&mut self) {
        if let Some(text) = self.selected_text() {
            self.clipboard = text;
        }
    }

    pub fn cut(&mut self) {
        let Some(text) = self.selected_text() else {
            return;
        };
        self.clipboard = text;
        if let (Some(range), Some(buffer)) = (self.selection.take(), self.buffer.clone()) {
            self.cursor = range.start;
            buffer.remove(range);
        }
    }

    pub fn paste(&mut self) {
        let content = self.clipboard.clone();
        if !content.is_empty() {
            self.type_text(&content);
        }
    }

    pub fn clipboard(&self) -> &str {
        &self.clipboard
    }

    pub fn set_clipboard(&mut self, content: impl Into<String>) {
        self.clipboard = content.into();
    }

    pub fn take_focus(&mut self) {
        self.focused = true;
    }

    pub fn drop_focus(&mut self) {
        self.focused = false;
    }

    pub fn has_focus(&self) -> bool {
        self.focused
    }
}
