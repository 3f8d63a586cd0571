//! Capability-dispatched controller construction.
//!
//! The window-composition layer asks for controllers by kind; the factory
//! holds the shared (application context, window) pair and picks the right
//! constructor shape from the kind's advertised capabilities, so no caller
//! ever knows concrete construction details.

use std::rc::Rc;

use crate::app::context::AppContext;
use crate::app::error::{AppError, Result};
use crate::ui::window::WindowHandle;

use super::about::AboutController;
use super::editor_tab::EditorTabController;
use super::main_window::MainWindowController;

/// Constructor shapes a controller kind can support, in dispatch priority
/// order: tab-document first, then window-bound, then base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Tab-document controller: built with (context, window) and bound to a
    /// document afterwards.
    TabDocument,
    /// Window-bound controller: first available constructor taking
    /// (context, window).
    WindowBound,
    /// Base controller: built with the context alone.
    Base,
}

const CAPABILITY_PRIORITY: [Capability; 3] =
    [Capability::TabDocument, Capability::WindowBound, Capability::Base];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerKind {
    EditorTab,
    MainWindow,
    About,
}

impl ControllerKind {
    pub fn capabilities(self) -> &'static [Capability] {
        match self {
            ControllerKind::EditorTab => {
                &[Capability::TabDocument, Capability::WindowBound, Capability::Base]
            }
            ControllerKind::MainWindow => &[Capability::WindowBound, Capability::Base],
            ControllerKind::About => &[Capability::Base],
        }
    }
}

pub enum Controller {
    EditorTab(EditorTabController),
    MainWindow(MainWindowController),
    About(AboutController),
}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Controller::EditorTab(_) => f.write_str("EditorTab"),
            Controller::MainWindow(_) => f.write_str("MainWindow"),
            Controller::About(_) => f.write_str("About"),
        }
    }
}

impl Controller {
    pub fn kind(&self) -> ControllerKind {
        match self {
            Controller::EditorTab(_) => ControllerKind::EditorTab,
            Controller::MainWindow(_) => ControllerKind::MainWindow,
            Controller::About(_) => ControllerKind::About,
        }
    }

    pub fn into_editor_tab(self) -> Result<EditorTabController> {
        match self {
            Controller::EditorTab(controller) => Ok(controller),
            other => Err(AppError::WrongController(other.kind())),
        }
    }

    pub fn into_main_window(self) -> Result<MainWindowController> {
        match self {
            Controller::MainWindow(controller) => Ok(controller),
            other => Err(AppError::WrongController(other.kind())),
        }
    }

    pub fn into_about(self) -> Result<AboutController> {
        match self {
            Controller::About(controller) => Ok(controller),
            other => Err(AppError::WrongController(other.kind())),
        }
    }
}

/// Stateless apart from its bound context; one instance serves a whole
/// window's controller tree.
pub struct ControllerFactory {
    context: Rc<AppContext>,
    window: WindowHandle,
}

impl ControllerFactory {
    pub fn new(context: Rc<AppContext>, window: WindowHandle) -> Self {
        Self { context, window }
    }

    /// Build a controller for `kind`. The first matching capability wins;
    /// any failure inside a constructor is wrapped so the cause is never
    /// swallowed.
    pub fn build(&self, kind: ControllerKind) -> Result<Controller> {
        let capability = preferred_capability(kind.capabilities())
            .ok_or(AppError::NoConstructor(kind))?;

        let built = match capability {
            Capability::TabDocument => self.build_tab_document(kind),
            Capability::WindowBound => self.build_window_bound(kind),
            Capability::Base => self.build_base(kind),
        };

        built.map_err(|source| AppError::Construction {
            kind,
            source: Box::new(source),
        })
    }

    fn build_tab_document(&self, kind: ControllerKind) -> Result<Controller> {
        match kind {
            ControllerKind::EditorTab => Ok(Controller::EditorTab(EditorTabController::new(
                self.context.clone(),
                self.window.clone(),
            ))),
            other => Err(AppError::NoConstructor(other)),
        }
    }

    fn build_window_bound(&self, kind: ControllerKind) -> Result<Controller> {
        match kind {
            ControllerKind::MainWindow => Ok(Controller::MainWindow(MainWindowController::new(
                self.context.clone(),
                self.window.clone(),
            ))),
            ControllerKind::EditorTab => Ok(Controller::EditorTab(EditorTabController::new(
                self.context.clone(),
                self.window.clone(),
            ))),
            other => Err(AppError::NoConstructor(other)),
        }
    }

    fn build_base(&self, kind: ControllerKind) -> Result<Controller> {
        match kind {
            ControllerKind::About => {
                Ok(Controller::About(AboutController::new(self.context.clone())))
            }
            other => Err(AppError::NoConstructor(other)),
        }
    }
}

fn preferred_capability(capabilities: &[Capability]) -> Option<Capability> {
    CAPABILITY_PRIORITY
        .into_iter()
        .find(|capability| capabilities.contains(capability))
}
