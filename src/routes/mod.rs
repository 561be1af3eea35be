//! Route builders for the HTTP surface.

mod common;
mod shell;
pub use common::common_routes;
pub use shell::shell_routes;
