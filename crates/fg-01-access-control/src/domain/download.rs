//! Storage path parsing for the download gate.
//!
//! Submission uploads live under `<scheme>://webform/<form id>/...`.

/// Path segment that marks form-owned uploads.
pub const FORM_UPLOAD_SEGMENT: &str = "webform";

/// Extract the owning form id from a storage path.
///
/// The scheme prefix is optional and the `webform` segment may be preceded by
/// other directories. Returns `None` when the path does not name a form.
pub fn download_form_id(path: &str) -> Option<&str> {
    let without_scheme = match path.split_once("://") {
        Some((_, rest)) => rest,
        None => path,
    };

    let mut segments = without_scheme.split('/');
    segments.find(|segment| *segment == FORM_UPLOAD_SEGMENT)?;
    segments.next().filter(|id| !id.is_empty())
}
