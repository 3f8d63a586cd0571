use std::rc::Rc;

use crate::app::context::AppContext;

/// Base-capability controller: needs the application context only.
pub struct AboutController {
    context: Rc<AppContext>,
}

impl AboutController {
    pub fn new(context: Rc<AppContext>) -> Self {
        Self { context }
    }

    /// One-line application identification shown in the status display.
    pub fn version_line(&self) -> String {
        format!(
            "{} {}",
            self.context.bundle().get("appname"),
            env!("CARGO_PKG_VERSION")
        )
    }
}
