//! One tab's controller: binds a document session to the shared surface and
//! mediates load/save and the tab's context menu.

use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

use crate::app::context::AppContext;
use crate::app::document::{Document, DocumentId};
use crate::app::error::{AppError, Result};
use crate::app::text::normalize_line_endings;
use crate::ui::surface::{ContextMenu, MenuAction};
use crate::ui::window::WindowHandle;

pub struct EditorTabController {
    context: Rc<AppContext>,
    window: WindowHandle,
    document: Document,
    menu: ContextMenu,
    status_message: String,
}

impl EditorTabController {
    /// Construction performs the full wiring: buffer created, dirty flag
    /// hooked into the modify callback, context menu built. The container
    /// assigns the document identity through [`bind_document`] afterwards.
    ///
    /// [`bind_document`]: EditorTabController::bind_document
    pub fn new(context: Rc<AppContext>, window: WindowHandle) -> Self {
        let (document, menu) = Self::wire(&context, DocumentId(0), None, "");
        Self {
            context,
            window,
            document,
            menu,
            status_message: String::new(),
        }
    }

    /// Bind this controller to its document identity. Replaces the
    /// placeholder session created at construction.
    pub fn bind_document(&mut self, id: DocumentId, path: Option<PathBuf>, fallback_name: &str) {
        let (document, menu) = Self::wire(&self.context, id, path, fallback_name);
        self.document = document;
        self.menu = menu;
    }

    fn wire(
        context: &AppContext,
        id: DocumentId,
        path: Option<PathBuf>,
        fallback_name: &str,
    ) -> (Document, ContextMenu) {
        let document = Document::new(id, path, fallback_name);

        let bundle = context.bundle();
        let mut menu = ContextMenu::new(id);
        menu.add(bundle.get("copy"), "Ctrl+C", MenuAction::Copy);
        menu.add(bundle.get("cut"), "Ctrl+X", MenuAction::Cut);
        menu.add(bundle.get("paste"), "Ctrl+V", MenuAction::Paste);
        menu.add(bundle.get("format"), "Ctrl+Space", MenuAction::Format);

        (document, menu)
    }

    pub fn id(&self) -> DocumentId {
        self.document.id
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn content(&self) -> String {
        self.document.buffer.text()
    }

    pub fn is_edited(&self) -> bool {
        self.document.is_dirty()
    }

    pub fn is_new(&self) -> bool {
        self.document.is_new()
    }

    pub fn set_new(&mut self, is_new: bool) {
        self.document.set_new(is_new);
    }

    pub fn set_file(&mut self, path: PathBuf) {
        self.document.set_file_path(path);
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Read the bound file into the buffer, joining lines with the platform
    /// separator. Loading is not an edit, so the dirty flag is untouched; on
    /// failure the buffer is left empty and the error propagates.
    pub fn load_content(&mut self) -> Result<()> {
        let path = self
            .document
            .file_path
            .clone()
            .ok_or(AppError::NoBackingFile)?;

        let was_dirty = self.document.is_dirty();
        let raw = fs::read_to_string(&path).map_err(|source| AppError::Load { path, source })?;
        self.document.buffer.set_text(&normalize_line_endings(&raw));
        self.document.set_dirty(was_dirty);
        Ok(())
    }

    /// Write the whole buffer to the bound file in one call. Success clears
    /// both lifecycle flags.
    pub fn save_content(&mut self) -> Result<()> {
        let path = self
            .document
            .file_path
            .clone()
            .ok_or(AppError::NoBackingFile)?;

        fs::write(&path, self.document.buffer.text())
            .map_err(|source| AppError::Save { path, source })?;
        self.document.mark_clean();
        self.document.set_new(false);
        Ok(())
    }

    /// Called on every tab activation. The surface is reused across tabs, so
    /// the previous tab's context menu must be explicitly detached before
    /// this tab's menu, buffer and cursor are applied; the focus request runs
    /// on the next turn of the event loop.
    pub fn on_selected(&mut self) {
        self.window.set_status(&self.status_message);

        let buffer = self.document.buffer.clone();
        let cursor = self.document.cursor_position;
        let menu = self.menu.clone();
        self.window.with_surface(|surface| {
            surface.detach_menu();
            surface.attach_menu(menu);
            surface.set_buffer(buffer);
            surface.set_cursor(cursor);
        });

        self.window.run_later(|window| window.surface_mut().take_focus());
    }

    /// Dispatch a context menu action against the shared surface.
    pub fn run_menu_action(&mut self, action: MenuAction) {
        match action {
            MenuAction::Copy => self.window.with_surface(|surface| surface.copy()),
            MenuAction::Cut => self.window.with_surface(|surface| surface.cut()),
            MenuAction::Paste => self.window.with_surface(|surface| surface.paste()),
            MenuAction::Format => {
                // Pretty-print placeholder: the buffer round-trips unchanged
                // and the dirty flag is preserved.
                let text = self.document.buffer.text();
                let was_dirty = self.document.is_dirty();
                self.document.buffer.set_text(&text);
                self.document.set_dirty(was_dirty);
            }
        }
    }

    pub fn menu(&self) -> &ContextMenu {
        &self.menu
    }

    /// Explicit teardown: releases the surface binding if this tab holds it
    /// and frees the buffer. No operation is valid afterwards.
    pub fn dispose(&mut self) {
        let buffer = self.document.buffer.clone();
        self.window.with_surface(|surface| {
            if surface.is_showing(&buffer) {
                surface.release();
            }
        });
        self.document.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::app::bundle::Bundle;
    use crate::app::text::LINE_SEPARATOR;
    use crate::ui::dialogs::testing::ScriptedDialogs;

    fn controller() -> EditorTabController {
        let context = Rc::new(AppContext::new(
            Vec::new(),
            Bundle::default(),
            Box::new(ScriptedDialogs::default()),
        ));
        let window = WindowHandle::new("t");
        EditorTabController::new(context, window)
    }

    fn temp_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_content_normalizes_line_endings() {
        let file = temp_file("one\r\ntwo\nthree");
        let mut tab = controller();
        tab.bind_document(DocumentId(1), Some(file.path().to_path_buf()), "");

        tab.load_content().unwrap();
        assert_eq!(
            tab.content(),
            format!("one{0}two{0}three{0}", LINE_SEPARATOR)
        );
        assert!(!tab.is_edited());
    }

    #[test]
    fn test_load_missing_file_fails_and_leaves_buffer_empty() {
        let mut tab = controller();
        tab.bind_document(DocumentId(1), Some(PathBuf::from("/no/such/file.json")), "");

        let err = tab.load_content().unwrap_err();
        assert!(matches!(err, AppError::Load { .. }));
        assert!(tab.content().is_empty());
    }

    #[test]
    fn test_load_without_backing_file_fails() {
        let mut tab = controller();
        tab.bind_document(DocumentId(1), None, "New File 1");
        assert!(matches!(tab.load_content(), Err(AppError::NoBackingFile)));
    }

    #[test]
    fn test_save_content_clears_flags() {
        let file = temp_file("");
        let mut tab = controller();
        tab.bind_document(DocumentId(1), Some(file.path().to_path_buf()), "");
        tab.document().buffer.set_text("{\"a\": 1}");
        assert!(tab.is_edited());
        assert!(tab.is_new());

        tab.save_content().unwrap();
        assert!(!tab.is_edited());
        assert!(!tab.is_new());
        assert_eq!(fs::read_to_string(file.path()).unwrap(), "{\"a\": 1}");
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let file = temp_file("");
        let mut tab = controller();
        tab.bind_document(DocumentId(1), Some(file.path().to_path_buf()), "");
        let written = format!("alpha{0}beta{0}", LINE_SEPARATOR);
        tab.document().buffer.set_text(&written);

        tab.save_content().unwrap();
        tab.load_content().unwrap();
        assert_eq!(tab.content(), written);
    }

    #[test]
    fn test_on_selected_attaches_menu_and_defers_focus() {
        let mut tab = controller();
        tab.bind_document(DocumentId(9), None, "New File 1");
        tab.on_selected();

        let window = tab.window.clone();
        window.with_surface(|surface| {
            assert_eq!(surface.menu().map(|m| m.owner()), Some(DocumentId(9)));
            assert!(surface.is_showing(&tab.document().buffer));
            assert!(!surface.has_focus());
        });

        window.drain_deferred();
        assert!(window.with_surface(|surface| surface.has_focus()));
    }

    #[test]
    fn test_typing_on_surface_marks_document_dirty() {
        let mut tab = controller();
        tab.bind_document(DocumentId(1), None, "New File 1");
        tab.on_selected();

        tab.window.with_surface(|surface| surface.type_text("{}"));
        assert!(tab.is_edited());
        assert_eq!(tab.content(), "{}");
    }

    #[test]
    fn test_format_round_trips_buffer_unchanged() {
        let mut tab = controller();
        tab.bind_document(DocumentId(1), None, "New File 1");
        tab.document().buffer.set_text("{ \"raw\": true }");
        tab.document().mark_clean();

        tab.run_menu_action(MenuAction::Format);
        assert_eq!(tab.content(), "{ \"raw\": true }");
        assert!(!tab.is_edited());
    }

    #[test]
    fn test_context_menu_actions_use_surface_clipboard() {
        let mut tab = controller();
        tab.bind_document(DocumentId(1), None, "New File 1");
        tab.on_selected();
        tab.window.with_surface(|surface| {
            surface.type_text("hello");
            surface.select(0..5);
        });

        tab.run_menu_action(MenuAction::Copy);
        assert_eq!(tab.window.with_surface(|s| s.clipboard().to_string()), "hello");

        tab.run_menu_action(MenuAction::Cut);
        assert_eq!(tab.content(), "");

        tab.run_menu_action(MenuAction::Paste);
        assert_eq!(tab.content(), "hello");
    }

    #[test]
    fn test_dispose_releases_surface_binding() {
        let mut tab = controller();
        tab.bind_document(DocumentId(1), None, "New File 1");
        tab.on_selected();

        tab.dispose();
        let window = tab.window.clone();
        assert!(window.with_surface(|surface| surface.buffer().is_none()));
        assert!(window.with_surface(|surface| surface.menu().is_none()));
    }

    #[test]
    fn test_menu_labels_come_from_bundle() {
        let tab = {
            let mut tab = controller();
            tab.bind_document(DocumentId(1), None, "New File 1");
            tab
        };
        let labels: Vec<&str> = tab.menu().items().iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, ["Copy", "Cut", "Paste", "Format"]);
    }
}
