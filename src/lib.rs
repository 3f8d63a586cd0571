//! JsonPad session core: a multi-tab document session lifecycle with
//! save/save-as workflows, drag-and-drop import and factory-built
//! controllers. Rendering, dialogs and localization are collaborators
//! specified at their interface boundary.

pub mod app;
pub mod controller;
pub mod ui;

// Re-exports for convenient external access
pub use app::bundle::Bundle;
pub use app::context::AppContext;
pub use app::document::{Document, DocumentId};
pub use app::error::{AppError, Result};
pub use app::messages::Message;
pub use app::shell::Shell;
pub use app::text::LINE_SEPARATOR;
pub use controller::factory::{Capability, Controller, ControllerFactory, ControllerKind};
pub use ui::dialogs::{DialogService, HeadlessDialogs};
pub use ui::surface::{ActiveSurface, ContextMenu, MenuAction, TextBuffer};
pub use ui::window::WindowHandle;
