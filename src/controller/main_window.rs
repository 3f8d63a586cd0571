//! The session container: owns the ordered tab registry and coordinates the
//! new/open/save/save-as/close workflows.

use std::path::PathBuf;
use std::rc::Rc;

use crate::app::context::AppContext;
use crate::app::document::DocumentId;
use crate::app::error::AppError;
use crate::app::messages::Message;
use crate::ui::window::WindowHandle;

use super::factory::{Controller, ControllerFactory, ControllerKind};
use super::editor_tab::EditorTabController;

pub struct MainWindowController {
    context: Rc<AppContext>,
    window: WindowHandle,
    factory: ControllerFactory,
    tabs: Vec<EditorTabController>,
    selected: Option<DocumentId>,
    next_id: u64,
    untitled_counter: u32,
    /// Last directory used in a file dialog, re-used to seed the next one.
    last_open_directory: Option<PathBuf>,
}

impl MainWindowController {
    pub fn new(context: Rc<AppContext>, window: WindowHandle) -> Self {
        let factory = ControllerFactory::new(context.clone(), window.clone());
        window.set_title(context.bundle().get("appname"));
        Self {
            context,
            window,
            factory,
            tabs: Vec::new(),
            selected: None,
            next_id: 1,
            untitled_counter: 0,
            last_open_directory: None,
        }
    }

    /// Single entry point of the dispatch loop.
    pub fn handle(&mut self, message: Message) {
        match message {
            Message::FileNew => {
                self.create_session(None, false);
            }
            Message::FileOpen => self.load_file(None),
            Message::FileSave => {
                if let Some(id) = self.selected {
                    self.save_session(id);
                }
            }
            Message::FileSaveAs => {
                if let Some(id) = self.selected {
                    self.save_as_session(id);
                }
            }
            Message::WindowClose => self.close_window(),
            Message::ShowAbout => self.show_about(),
            Message::FilesDropped(paths) => {
                for path in paths {
                    self.create_session(Some(path), true);
                }
            }
            Message::TabSelected(id) => self.select_tab(id),
            Message::TabCloseRequested(id) => self.close_tab(id),
            Message::ContextMenu(action) => {
                if let Some(idx) = self.selected.and_then(|id| self.tab_index(id)) {
                    self.tabs[idx].run_menu_action(action);
                    self.refresh_window();
                }
            }
        }
    }

    /// Open every existing startup path as a tab; missing paths are skipped.
    pub fn open_startup_paths(&mut self) {
        let parameters = self.context.parameters().to_vec();
        for path in parameters {
            if path.exists() {
                self.load_file(Some(path));
            } else {
                log::warn!("skipping missing startup file: {}", path.display());
            }
        }
    }

    /// Construct a new editor tab through the factory, register and select
    /// it, and optionally load its file. Construction failure discards the
    /// partial session and surfaces the cause; a load failure keeps the tab
    /// with an empty buffer but is surfaced all the same.
    pub fn create_session(&mut self, path: Option<PathBuf>, should_load: bool) -> Option<DocumentId> {
        let mut controller = match self
            .factory
            .build(ControllerKind::EditorTab)
            .and_then(Controller::into_editor_tab)
        {
            Ok(controller) => controller,
            Err(err) => {
                log::error!("editor tab construction failed: {err}");
                self.report_error(&err);
                return None;
            }
        };

        let id = DocumentId(self.next_id);
        self.next_id += 1;

        let fallback_name = if path.is_none() {
            self.untitled_counter += 1;
            format!(
                "{} {}",
                self.context.bundle().get("new_file"),
                self.untitled_counter
            )
        } else {
            String::new()
        };

        controller.bind_document(id, path, &fallback_name);
        self.tabs.push(controller);

        if should_load {
            let idx = self.tabs.len() - 1;
            if let Err(err) = self.tabs[idx].load_content() {
                log::error!("{err}");
                self.report_error(&err);
            }
            self.tabs[idx].set_new(false);
        }

        self.select_tab(id);
        Some(id)
    }

    /// Open a file into a new tab. Without a path the open dialog is shown;
    /// cancelling it is a no-op.
    pub fn load_file(&mut self, path: Option<PathBuf>) {
        let path = match path {
            Some(path) => Some(path),
            None => {
                let title = self.context.bundle().get("load_title").to_string();
                self.context
                    .dialogs()
                    .open_file(&title, self.last_open_directory.as_deref())
            }
        };

        let Some(path) = path else {
            return;
        };
        self.remember_directory(&path);
        self.create_session(Some(path), true);
    }

    /// Save semantics: only writes when dirty, and bootstraps a destination
    /// path for brand-new documents with exactly one prompt.
    pub fn save_session(&mut self, id: DocumentId) {
        let Some(idx) = self.tab_index(id) else {
            return;
        };
        if !self.tabs[idx].is_edited() {
            return;
        }

        if self.tabs[idx].is_new() {
            let title = self.context.bundle().get("save_title").to_string();
            let Some(path) = self
                .context
                .dialogs()
                .save_file(&title, self.last_open_directory.as_deref())
            else {
                return;
            };
            self.remember_directory(&path);
            self.tabs[idx].set_file(path);
        }

        if let Err(err) = self.tabs[idx].save_content() {
            log::error!("{err}");
            self.report_error(&err);
        }
        self.refresh_window();
    }

    /// Always prompts for a destination and rebinds the file, independent of
    /// the dirty flag.
    pub fn save_as_session(&mut self, id: DocumentId) {
        let Some(idx) = self.tab_index(id) else {
            return;
        };

        let title = self.context.bundle().get("save_title").to_string();
        let Some(path) = self
            .context
            .dialogs()
            .save_file(&title, self.last_open_directory.as_deref())
        else {
            return;
        };
        self.remember_directory(&path);
        self.tabs[idx].set_file(path);

        if let Err(err) = self.tabs[idx].save_content() {
            log::error!("{err}");
            self.report_error(&err);
        }
        self.refresh_window();
    }

    /// Flush every session through the save path, tear each one down, and
    /// hide the window.
    pub fn close_window(&mut self) {
        let ids: Vec<DocumentId> = self.tabs.iter().map(EditorTabController::id).collect();
        for id in ids {
            self.save_session(id);
        }
        for tab in &mut self.tabs {
            tab.dispose();
        }
        self.tabs.clear();
        self.selected = None;
        self.window.clear_status();
        self.window.hide();
    }

    /// Tab-close request: flush like a save, then dispose and remove. The
    /// nearest neighbor becomes selected; closing the last tab clears the
    /// status display.
    pub fn close_tab(&mut self, id: DocumentId) {
        self.save_session(id);

        let Some(idx) = self.tab_index(id) else {
            return;
        };
        let was_selected = self.selected == Some(id);
        let mut tab = self.tabs.remove(idx);
        tab.dispose();
        if was_selected {
            self.selected = None;
        }

        if self.tabs.is_empty() {
            self.window.clear_status();
            self.refresh_window();
        } else if was_selected {
            let neighbor = idx.min(self.tabs.len() - 1);
            let neighbor_id = self.tabs[neighbor].id();
            self.select_tab(neighbor_id);
        } else {
            self.refresh_window();
        }
    }

    /// Activate a tab. The outgoing tab's cursor is captured before the
    /// surface is rebound to the incoming one.
    pub fn select_tab(&mut self, id: DocumentId) {
        let Some(idx) = self.tab_index(id) else {
            return;
        };

        if let Some(prev_idx) = self.selected.and_then(|prev| self.tab_index(prev)) {
            let prev_buffer = self.tabs[prev_idx].document().buffer.clone();
            let cursor = self.window.with_surface(|surface| {
                surface.is_showing(&prev_buffer).then(|| surface.cursor())
            });
            if let Some(cursor) = cursor {
                self.tabs[prev_idx].document_mut().cursor_position = cursor;
            }
        }

        self.selected = Some(id);
        self.tabs[idx].on_selected();
        self.refresh_window();
    }

    fn show_about(&mut self) {
        match self
            .factory
            .build(ControllerKind::About)
            .and_then(Controller::into_about)
        {
            Ok(about) => self.window.set_status(about.version_line()),
            Err(err) => {
                log::error!("about controller construction failed: {err}");
                self.report_error(&err);
            }
        }
    }

    pub fn tabs(&self) -> &[EditorTabController] {
        &self.tabs
    }

    pub fn selected(&self) -> Option<DocumentId> {
        self.selected
    }

    pub fn tab(&self, id: DocumentId) -> Option<&EditorTabController> {
        self.tab_index(id).map(|idx| &self.tabs[idx])
    }

    fn tab_index(&self, id: DocumentId) -> Option<usize> {
        self.tabs.iter().position(|tab| tab.id() == id)
    }

    fn remember_directory(&mut self, path: &std::path::Path) {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.last_open_directory = Some(parent.to_path_buf());
        }
    }

    fn report_error(&self, err: &AppError) {
        self.context.dialogs().alert(&err.user_message());
    }

    /// Window title tracks the selected document and its dirty marker.
    fn refresh_window(&self) {
        let appname = self.context.bundle().get("appname");
        match self.selected.and_then(|id| self.tab(id)) {
            Some(tab) => {
                let marker = if tab.is_edited() { "*" } else { "" };
                self.window.set_title(format!(
                    "{marker}{} - {appname}",
                    tab.document().display_name
                ));
            }
            None => self.window.set_title(appname),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::app::bundle::Bundle;
    use crate::app::text::LINE_SEPARATOR;
    use crate::ui::dialogs::testing::ScriptedDialogs;
    use crate::ui::surface::MenuAction;

    struct Fixture {
        main: MainWindowController,
        window: WindowHandle,
        dialogs: ScriptedDialogs,
        _dir: tempfile::TempDir,
        dir: PathBuf,
    }

    fn fixture() -> Fixture {
        fixture_with_parameters(Vec::new())
    }

    fn fixture_with_parameters(parameters: Vec<PathBuf>) -> Fixture {
        let dialogs = ScriptedDialogs::default();
        let context = Rc::new(AppContext::new(
            parameters,
            Bundle::default(),
            Box::new(dialogs.clone()),
        ));
        let window = WindowHandle::new("t");
        let main = MainWindowController::new(context, window.clone());
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().to_path_buf();
        Fixture {
            main,
            window,
            dialogs,
            _dir: tmp,
            dir,
        }
    }

    fn write_file(dir: &PathBuf, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_create_session_loads_and_clears_new_flag() {
        let mut fx = fixture();
        let path = write_file(&fx.dir, "a.json", "line one\nline two");

        let id = fx.main.create_session(Some(path), true).unwrap();
        let tab = fx.main.tab(id).unwrap();
        assert!(!tab.is_new());
        assert!(!tab.is_edited());
        assert_eq!(
            tab.content(),
            format!("line one{0}line two{0}", LINE_SEPARATOR)
        );
        assert_eq!(fx.main.selected(), Some(id));
    }

    #[test]
    fn test_file_new_uses_localized_placeholder_names() {
        let mut fx = fixture();
        fx.main.handle(Message::FileNew);
        fx.main.handle(Message::FileNew);

        let names: Vec<String> = fx
            .main
            .tabs()
            .iter()
            .map(|t| t.document().display_name.clone())
            .collect();
        assert_eq!(names, ["New File 1", "New File 2"]);
        assert!(fx.main.tabs().iter().all(EditorTabController::is_new));
    }

    #[test]
    fn test_save_session_is_noop_when_clean() {
        let mut fx = fixture();
        let path = write_file(&fx.dir, "a.json", "data");
        let id = fx.main.create_session(Some(path.clone()), true).unwrap();

        fx.main.save_session(id);
        assert_eq!(fx.dialogs.save_prompts(), 0);
        assert_eq!(fs::read_to_string(&path).unwrap(), "data");
    }

    #[test]
    fn test_save_session_prompts_once_for_new_document() {
        let mut fx = fixture();
        let destination = fx.dir.join("fresh.json");
        fx.dialogs.push_save(Some(destination.clone()));

        let id = fx.main.create_session(None, false).unwrap();
        fx.window.with_surface(|surface| surface.type_text("{}"));

        fx.main.save_session(id);
        assert_eq!(fx.dialogs.save_prompts(), 1);

        let tab = fx.main.tab(id).unwrap();
        assert!(!tab.is_new());
        assert!(!tab.is_edited());
        assert_eq!(tab.document().display_name, "fresh.json");
        assert_eq!(fs::read_to_string(&destination).unwrap(), "{}");
    }

    #[test]
    fn test_save_session_cancelled_prompt_writes_nothing() {
        let mut fx = fixture();
        fx.dialogs.push_save(None);

        let id = fx.main.create_session(None, false).unwrap();
        fx.window.with_surface(|surface| surface.type_text("{}"));

        fx.main.save_session(id);
        assert_eq!(fx.dialogs.save_prompts(), 1);
        let tab = fx.main.tab(id).unwrap();
        assert!(tab.is_new());
        assert!(tab.is_edited());
    }

    #[test]
    fn test_save_as_always_prompts_and_rebinds_path() {
        let mut fx = fixture();
        let original = write_file(&fx.dir, "a.json", "data");
        let id = fx.main.create_session(Some(original), true).unwrap();

        // Clean document: plain save would be a no-op, save-as is not.
        let renamed = fx.dir.join("b.json");
        fx.dialogs.push_save(Some(renamed.clone()));
        fx.main.save_as_session(id);

        assert_eq!(fx.dialogs.save_prompts(), 1);
        let tab = fx.main.tab(id).unwrap();
        assert_eq!(tab.document().file_path.as_deref(), Some(renamed.as_path()));
        assert!(renamed.exists());
    }

    #[test]
    fn test_selecting_tab_swaps_context_menu() {
        let mut fx = fixture();
        let a = write_file(&fx.dir, "a.json", "a");
        let b = write_file(&fx.dir, "b.json", "b");
        let id_a = fx.main.create_session(Some(a), true).unwrap();
        let id_b = fx.main.create_session(Some(b), true).unwrap();

        fx.main.select_tab(id_a);
        assert_eq!(
            fx.window.with_surface(|s| s.menu().map(|m| m.owner())),
            Some(id_a)
        );

        fx.main.select_tab(id_b);
        assert_eq!(
            fx.window.with_surface(|s| s.menu().map(|m| m.owner())),
            Some(id_b)
        );
        let buffer_b = fx.main.tab(id_b).unwrap().document().buffer.clone();
        assert!(fx.window.with_surface(|s| s.is_showing(&buffer_b)));
    }

    #[test]
    fn test_dropped_files_open_in_drop_order() {
        let mut fx = fixture();
        let paths = vec![
            write_file(&fx.dir, "a.json", "1"),
            write_file(&fx.dir, "b.json", "2"),
            write_file(&fx.dir, "c.json", "3"),
        ];

        fx.main.handle(Message::FilesDropped(paths));

        let names: Vec<String> = fx
            .main
            .tabs()
            .iter()
            .map(|t| t.document().display_name.clone())
            .collect();
        assert_eq!(names, ["a.json", "b.json", "c.json"]);
        assert!(fx.main.tabs().iter().all(|t| !t.is_new()));
        assert_eq!(fx.main.tabs()[2].content(), format!("3{LINE_SEPARATOR}"));
    }

    #[test]
    fn test_close_window_prompts_per_dirty_new_tab_then_hides() {
        let mut fx = fixture();
        fx.dialogs.push_save(Some(fx.dir.join("one.json")));
        fx.dialogs.push_save(Some(fx.dir.join("two.json")));

        let first = fx.main.create_session(None, false).unwrap();
        fx.window.with_surface(|surface| surface.type_text("1"));
        let second = fx.main.create_session(None, false).unwrap();
        fx.window.with_surface(|surface| surface.type_text("2"));

        // Both tabs are dirty and unsaved.
        assert!(fx.main.tab(first).unwrap().is_edited());
        assert!(fx.main.tab(second).unwrap().is_edited());

        fx.main.handle(Message::WindowClose);
        assert_eq!(fx.dialogs.save_prompts(), 2);
        assert!(!fx.window.is_visible());
        assert!(fx.main.tabs().is_empty());
        assert_eq!(fs::read_to_string(fx.dir.join("one.json")).unwrap(), "1");
        assert_eq!(fs::read_to_string(fx.dir.join("two.json")).unwrap(), "2");
    }

    #[test]
    fn test_close_last_tab_clears_status() {
        let mut fx = fixture();
        let path = write_file(&fx.dir, "a.json", "a");
        let id = fx.main.create_session(Some(path), true).unwrap();
        fx.window.set_status("something");

        fx.main.handle(Message::TabCloseRequested(id));
        assert!(fx.main.tabs().is_empty());
        assert_eq!(fx.window.status(), "");
        assert_eq!(fx.main.selected(), None);
    }

    #[test]
    fn test_close_tab_selects_nearest_neighbor() {
        let mut fx = fixture();
        let ids: Vec<DocumentId> = ["a.json", "b.json", "c.json"]
            .iter()
            .map(|name| {
                let path = write_file(&fx.dir, name, "x");
                fx.main.create_session(Some(path), true).unwrap()
            })
            .collect();

        fx.main.select_tab(ids[1]);
        fx.main.close_tab(ids[1]);
        assert_eq!(fx.main.selected(), Some(ids[2]));
        assert_eq!(fx.main.tabs().len(), 2);
    }

    #[test]
    fn test_open_dialog_cancel_is_noop() {
        let mut fx = fixture();
        fx.dialogs.push_open(None);
        fx.main.handle(Message::FileOpen);
        assert_eq!(fx.dialogs.open_prompts(), 1);
        assert!(fx.main.tabs().is_empty());
    }

    #[test]
    fn test_open_dialog_choice_creates_loaded_tab() {
        let mut fx = fixture();
        let path = write_file(&fx.dir, "picked.json", "chosen");
        fx.dialogs.push_open(Some(path));

        fx.main.handle(Message::FileOpen);
        assert_eq!(fx.main.tabs().len(), 1);
        let tab = &fx.main.tabs()[0];
        assert!(!tab.is_new());
        assert_eq!(tab.content(), format!("chosen{LINE_SEPARATOR}"));
    }

    #[test]
    fn test_startup_parameters_skip_missing_paths() {
        let dialogs_dir = tempfile::tempdir().unwrap();
        let existing = dialogs_dir.path().join("real.json");
        fs::write(&existing, "ok").unwrap();
        let missing = dialogs_dir.path().join("gone.json");

        let mut fx = fixture_with_parameters(vec![existing, missing]);
        fx.main.open_startup_paths();

        assert_eq!(fx.main.tabs().len(), 1);
        assert_eq!(fx.main.tabs()[0].document().display_name, "real.json");
    }

    #[test]
    fn test_load_failure_surfaces_alert_but_keeps_tab() {
        let mut fx = fixture();
        let id = fx
            .main
            .create_session(Some(fx.dir.join("missing.json")), true)
            .unwrap();

        let alerts = fx.dialogs.alerts();
        assert_eq!(alerts.len(), 1);
        assert!(alerts[0].contains("missing.json"));

        let tab = fx.main.tab(id).unwrap();
        assert!(tab.content().is_empty());
        assert!(!tab.is_new());
    }

    #[test]
    fn test_dirty_marker_in_window_title() {
        let mut fx = fixture();
        let path = write_file(&fx.dir, "a.json", "a");
        fx.main.create_session(Some(path), true).unwrap();
        assert_eq!(fx.window.title(), "a.json - JsonPad");

        fx.window.with_surface(|surface| surface.type_text("!"));
        fx.main.handle(Message::ContextMenu(MenuAction::Format));
        assert_eq!(fx.window.title(), "*a.json - JsonPad");
    }

    #[test]
    fn test_about_sets_status_line() {
        let mut fx = fixture();
        fx.main.handle(Message::ShowAbout);
        assert!(fx.window.status().starts_with("JsonPad "));
    }

    #[test]
    fn test_cursor_preserved_across_tab_switch() {
        let mut fx = fixture();
        let a = write_file(&fx.dir, "a.json", "0123456789");
        let b = write_file(&fx.dir, "b.json", "x");
        let id_a = fx.main.create_session(Some(a), true).unwrap();
        let id_b = fx.main.create_session(Some(b), true).unwrap();

        fx.main.select_tab(id_a);
        fx.window.with_surface(|surface| surface.set_cursor(4));
        fx.main.select_tab(id_b);
        fx.main.select_tab(id_a);
        assert_eq!(fx.window.with_surface(|surface| surface.cursor()), 4);
    }
}
