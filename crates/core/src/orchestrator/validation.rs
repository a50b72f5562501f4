//! Attach-time checks on file URLs.

use reqwest::Url;

use super::types::FileRejection;

/// Parse `raw` as an absolute http(s) URL.
pub fn check_url(raw: &str) -> Result<Url, FileRejection> {
    let url = Url::parse(raw).map_err(|_| FileRejection::InvalidUrl(raw.to_string()))?;
    match url.scheme() {
        "http" | "https" if url.has_host() => Ok(url),
        _ => Err(FileRejection::InvalidUrl(raw.to_string())),
    }
}

/// Check the extension of the last path segment against `allowed`.
///
/// Comparison ignores case and a leading dot in the allowed entries.
pub fn check_extension(url: &Url, allowed: &[String]) -> Result<(), FileRejection> {
    let extension = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty());

    let Some(extension) = extension else {
        return Err(FileRejection::UnsupportedType(url.to_string()));
    };

    let supported = allowed
        .iter()
        .any(|a| a.trim_start_matches('.').eq_ignore_ascii_case(extension));

    if supported {
        Ok(())
    } else {
        Err(FileRejection::UnsupportedType(url.to_string()))
    }
}

/// True while a task holding `current` files can take another one.
pub fn can_add_file(current: usize, max: usize) -> bool {
    current < max
}
