//! Window-level shared state: title, status line, visibility, the active
//! surface, and the deferred-action queue.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use super::surface::ActiveSurface;

type DeferredAction = Box<dyn FnOnce(&mut WindowState)>;

pub struct WindowState {
    title: String,
    status: String,
    visible: bool,
    surface: ActiveSurface,
    deferred: VecDeque<DeferredAction>,
}

impl WindowState {
    pub fn surface(&self) -> &ActiveSurface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut ActiveSurface {
        &mut self.surface
    }

    /// Queue a follow-up action from inside another deferred action.
    pub fn run_later(&mut self, action: impl FnOnce(&mut WindowState) + 'static) {
        self.deferred.push_back(Box::new(action));
    }
}

/// Cheap clone-shared handle to one window.
///
/// All mutation goes through short-lived borrows so controllers can hold a
/// handle each without conflicting.
#[derive(Clone)]
pub struct WindowHandle {
    state: Rc<RefCell<WindowState>>,
}

impl WindowHandle {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            state: Rc::new(RefCell::new(WindowState {
                title: title.into(),
                status: String::new(),
                visible: true,
                surface: ActiveSurface::default(),
                deferred: VecDeque::new(),
            })),
        }
    }

    pub fn title(&self) -> String {
        self.state.borrow().title.clone()
    }

    pub fn set_title(&self, title: impl Into<String>) {
        self.state.borrow_mut().title = title.into();
    }

    pub fn status(&self) -> String {
        self.state.borrow().status.clone()
    }

    pub fn set_status(&self, status: impl Into<String>) {
        self.state.borrow_mut().status = status.into();
    }

    pub fn clear_status(&self) {
        self.state.borrow_mut().status.clear();
    }

    pub fn is_visible(&self) -> bool {
        self.state.borrow().visible
    }

    pub fn show(&self) {
        self.state.borrow_mut().visible = true;
    }

    pub fn hide(&self) {
        self.state.borrow_mut().visible = false;
    }

    pub fn with_surface<R>(&self, f: impl FnOnce(&mut ActiveSurface) -> R) -> R {
        f(&mut self.state.borrow_mut().surface)
    }

    /// Schedule an action for the next turn of the event loop. Used for the
    /// focus request after a tab switch, which must not run mid-transition.
    pub fn run_later(&self, action: impl FnOnce(&mut WindowState) + 'static) {
        self.state.borrow_mut().deferred.push_back(Box::new(action));
    }

    /// Drain the deferred queue, running actions in submission order.
    /// Returns the number of actions run.
    pub fn drain_deferred(&self) -> usize {
        let mut ran = 0;
        loop {
            let action = self.state.borrow_mut().deferred.pop_front();
            let Some(action) = action else {
                break;
            };
            let mut state = self.state.borrow_mut();
            action(&mut state);
            ran += 1;
        }
        ran
    }
}
