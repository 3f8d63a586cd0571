pub mod dialogs;
pub mod surface;
pub mod window;
