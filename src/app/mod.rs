//! Application layer.
//!
//! - `document` - one open document's state (file binding, buffer, flags)
//! - `context` / `bundle` - shared startup context and localized strings
//! - `messages` / `shell` - the single-threaded dispatch loop
//! - `error` / `text` - error taxonomy and line-ending helpers

pub mod bundle;
pub mod context;
pub mod document;
pub mod error;
pub mod messages;
pub mod shell;
pub mod text;
