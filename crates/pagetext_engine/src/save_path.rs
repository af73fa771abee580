use std::path::PathBuf;

use thiserror::Error;
use url::Url;

const OUTPUT_EXTENSION: &str = "txt";
const INDEX_STEM: &str = "index";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SavePathError {
    #[error("invalid url {url}: {message}")]
    InvalidUrl { url: String, message: String },
    #[error("url {0} has no hostname")]
    MissingHost(String),
    #[error("url path segment {0:?} cannot be used as a file name")]
    UnsafeSegment(String),
}

/// Output location for a page, relative to the output root:
/// `{hostname}/{directory segments}/{last segment without extension}.txt`.
///
/// `https://example.com/blog/2024/post.html` → `example.com/blog/2024/post.txt`.
/// A URL without path segments saves as `{hostname}/index.txt`.
pub fn relative_output_path(url: &str) -> Result<PathBuf, SavePathError> {
    let parsed = Url::parse(url).map_err(|err| SavePathError::InvalidUrl {
        url: url.to_string(),
        message: err.to_string(),
    })?;
    let host = parsed
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| SavePathError::MissingHost(url.to_string()))?;

    let segments: Vec<&str> = parsed
        .path_segments()
        .map(|segments| segments.filter(|s| !s.is_empty()).collect())
        .unwrap_or_default();

    let mut path = PathBuf::from(sanitize_segment(host)?);
    let file_stem = match segments.split_last() {
        Some((last, dirs)) => {
            for dir in dirs {
                path.push(sanitize_segment(dir)?);
            }
            sanitize_segment(strip_extension(last))?
        }
        None => INDEX_STEM.to_string(),
    };
    path.push(format!("{file_stem}.{OUTPUT_EXTENSION}"));
    Ok(path)
}

fn strip_extension(segment: &str) -> &str {
    match segment.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => segment,
    }
}

fn sanitize_segment(segment: &str) -> Result<String, SavePathError> {
    if segment == "." || segment == ".." {
        return Err(SavePathError::UnsafeSegment(segment.to_string()));
    }
    let mut cleaned: String = segment
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();
    if cleaned.trim_matches(&['_', ' ', '.'][..]).is_empty() {
        return Err(SavePathError::UnsafeSegment(segment.to_string()));
    }
    if is_reserved_windows_name(&cleaned) {
        cleaned.push('_');
    }
    Ok(cleaned)
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}

fn is_reserved_windows_name(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
        "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    ];
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(name))
}
