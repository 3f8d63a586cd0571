//! Event loop glue: owns the message channel, the window and the main
//! controller, and drains the deferred queue after every dispatch.

use std::rc::Rc;

use crate::controller::factory::{Controller, ControllerFactory, ControllerKind};
use crate::controller::main_window::MainWindowController;
use crate::ui::window::WindowHandle;

use super::context::AppContext;
use super::error::Result;
use super::messages::{channel, Message, Receiver, Sender};

pub struct Shell {
    window: WindowHandle,
    main: MainWindowController,
    sender: Sender,
    receiver: Receiver,
}

impl Shell {
    /// Build the window and its controller tree and open the startup files.
    pub fn new(context: Rc<AppContext>) -> Result<Self> {
        let window = WindowHandle::new(context.bundle().get("appname"));
        let factory = ControllerFactory::new(context, window.clone());
        let mut main = factory
            .build(ControllerKind::MainWindow)
            .and_then(Controller::into_main_window)?;
        main.open_startup_paths();

        let (sender, receiver) = channel();
        Ok(Self {
            window,
            main,
            sender,
            receiver,
        })
    }

    /// Clone a sender for event producers (menu items, drop targets, tests).
    pub fn sender(&self) -> Sender {
        self.sender.clone()
    }

    pub fn window(&self) -> &WindowHandle {
        &self.window
    }

    pub fn main(&self) -> &MainWindowController {
        &self.main
    }

    pub fn main_mut(&mut self) -> &mut MainWindowController {
        &mut self.main
    }

    /// Handle one message, then run whatever was deferred to the next turn.
    pub fn dispatch(&mut self, message: Message) {
        self.main.handle(message);
        self.window.drain_deferred();
    }

    /// Drain all queued messages in arrival order. Deferred actions scheduled
    /// by a message run before the next message, preserving the
    /// single-threaded ordering guarantee.
    pub fn pump(&mut self) {
        self.window.drain_deferred();
        while let Some(message) = self.receiver.recv() {
            self.dispatch(message);
        }
    }

    pub fn is_running(&self) -> bool {
        self.window.is_visible()
    }
}
