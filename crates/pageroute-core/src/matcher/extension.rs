//! File-extension split for the extension-aware branch.

/// Splits `report.ics` into `("report", "ics")`.
///
/// Only the last dot counts; dotfiles (`.env`), trailing dots and extensions
/// that are not plain alphanumerics yield `None`.
pub fn split_extension(segment: &str) -> Option<(&str, &str)> {
    let (stem, ext) = segment.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some((stem, ext))
}
