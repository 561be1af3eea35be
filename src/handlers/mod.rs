//! HTTP handlers for shell CRUD and identifier generation.

pub mod shell;
pub use shell::*;
