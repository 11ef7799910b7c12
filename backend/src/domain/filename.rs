//! Download filenames derived from a captured URL.

use percent_encoding::percent_decode_str;
use url::Url;

const DEFAULT_EXTENSION: &str = ".txt";

/// `<host[:port]>-<last path segment>`, made safe to write to disk. The
/// path is percent-decoded before its last segment is taken.
pub fn safe_filename(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    let authority = match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    };
    let path = percent_decode_str(url.path()).decode_utf8_lossy();
    let candidate = format!("{}-{}", authority, last_segment(&path));
    sanitize_basename(&candidate)
}

/// Replace unsafe characters, collapse and trim dashes, and make sure the
/// name carries an extension. Running it on its own output changes nothing.
pub fn sanitize_basename(candidate: &str) -> String {
    let replaced: String = candidate
        .chars()
        .map(|c| if is_filename_char(c) { c } else { '-' })
        .collect();

    let mut name = collapse_dashes(&replaced).trim_matches('-').to_string();
    if !has_extension(&name) {
        name.push_str(DEFAULT_EXTENSION);
    }
    name
}

fn is_filename_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')
}

/// Collapse every run of `-` into a single `-`
pub fn collapse_dashes(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut previous_dash = false;
    for c in name.chars() {
        if c == '-' {
            if previous_dash {
                continue;
            }
            previous_dash = true;
        } else {
            previous_dash = false;
        }
        out.push(c);
    }
    out
}

/// The last dot is followed only by alphanumerics
fn has_extension(name: &str) -> bool {
    match name.rfind('.') {
        None => false,
        Some(dot) => {
            let ext = &name[dot + 1..];
            !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric())
        }
    }
}

/// Last element of a slash separated path. Trailing slashes are ignored;
/// an empty path gives `.` and a path of only slashes gives `/`.
fn last_segment(path: &str) -> &str {
    if path.is_empty() {
        return ".";
    }
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/";
    }
    match trimmed.rfind('/') {
        Some(slash) => &trimmed[slash + 1..],
        None => trimmed,
    }
}
