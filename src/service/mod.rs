//! ShellService: typed store access, plus request normalization rules.

mod shell;
mod validation;
pub use shell::ShellService;
pub use validation::{has_required_fields, normalize, normalize_update, REQUIRED_FIELDS_MSG};
