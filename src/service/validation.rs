//! Whitespace normalization and required-field rules for shell payloads.

use crate::model::{ShellForm, ShellUpdateForm};

/// Message returned when one of the mandatory fields is missing or blank.
pub const REQUIRED_FIELDS_MSG: &str =
    "Fields 'aas_id', 'id_short', and 'global_asset_id' are required and cannot be empty";

/// Trim surrounding whitespace from every text field. Optional fields that
/// were absent stay absent. Idempotent.
pub fn normalize(form: &mut ShellForm) {
    trim_in_place(&mut form.aas_id);
    trim_in_place(&mut form.id_short);
    trim_in_place(&mut form.global_asset_id);
    trim_opt(&mut form.version);
    trim_opt(&mut form.revision);
    trim_opt(&mut form.description);
}

/// Normalize an update payload. A replacement identifier that trims down to
/// an empty string counts as absent.
pub fn normalize_update(form: &mut ShellUpdateForm) {
    normalize(&mut form.shell);
    trim_opt(&mut form.update_aas_id);
    if form.update_aas_id.as_deref() == Some("") {
        form.update_aas_id = None;
    }
}

/// The three identity fields must be non-empty after normalization.
pub fn has_required_fields(form: &ShellForm) -> bool {
    !form.aas_id.is_empty() && !form.id_short.is_empty() && !form.global_asset_id.is_empty()
}

fn trim_in_place(s: &mut String) {
    let trimmed = s.trim();
    if trimmed.len() != s.len() {
        *s = trimmed.to_string();
    }
}

fn trim_opt(field: &mut Option<String>) {
    if let Some(s) = field {
        trim_in_place(s);
    }
}
