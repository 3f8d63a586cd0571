//! Messages driving the single-threaded dispatch loop.
//!
//! Menu items, drag-and-drop and tab events each send one of these; the shell
//! hands them to the main window controller in arrival order.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::rc::Rc;

use crate::ui::surface::MenuAction;

use super::document::DocumentId;

#[derive(Debug, Clone)]
pub enum Message {
    // File menu
    FileNew,
    FileOpen,
    FileSave,
    FileSaveAs,
    WindowClose,
    ShowAbout,

    // Drag-and-drop import, in drop order
    FilesDropped(Vec<PathBuf>),

    // Tab strip
    TabSelected(DocumentId),
    TabCloseRequested(DocumentId),

    // Context menu of the selected tab
    ContextMenu(MenuAction),
}

/// Single-threaded message channel in the shape of the usual UI toolkit pair.
pub fn channel() -> (Sender, Receiver) {
    let queue = Rc::new(RefCell::new(VecDeque::new()));
    (Sender(queue.clone()), Receiver(queue))
}

#[derive(Clone)]
pub struct Sender(Rc<RefCell<VecDeque<Message>>>);

impl Sender {
    pub fn send(&self, message: Message) {
        self.0.borrow_mut().push_back(message);
    }
}

pub struct Receiver(Rc<RefCell<VecDeque<Message>>>);

impl Receiver {
    pub fn recv(&self) -> Option<Message> {
        self.0.borrow_mut().pop_front()
    }
}
