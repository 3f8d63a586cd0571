//! Controllers, produced on demand by the capability-dispatched factory.

pub mod about;
pub mod editor_tab;
pub mod factory;
pub mod main_window;
