//! Main library for copyonsave, used by its CLI.
//!
//! On every save, copyonsave reads `copyonsaveandedit.json` from the workspace
//! root and, for each rule whose `source` matches the saved file, writes a copy
//! of the file's content with the rule's injection prepended or appended.

pub mod hook;
pub mod interceptor;
pub mod notification;
pub mod open;
pub mod rules;
pub mod watch;
pub mod workspace;
