//! Request path normalization
//!
//! Turns the raw request path into the relative key used for asset lookup.

use std::borrow::Cow;

/// Normalize a request path into a lookup key.
///
/// Percent-decodes the path, then resolves it as if rooted at `/`: empty and
/// `.` segments are dropped and `..` pops the previous segment but never goes
/// above the root. The result has no leading or trailing separator; the root
/// itself maps to the empty string.
///
/// # Examples
/// ```
/// use openapi_viewer::http::path::lookup_key;
/// assert_eq!(lookup_key("/swagger-ui.css"), "swagger-ui.css");
/// assert_eq!(lookup_key("/a//b/./c/../d"), "a/b/d");
/// assert_eq!(lookup_key("/../../etc/passwd"), "etc/passwd");
/// assert_eq!(lookup_key("/"), "");
/// ```
pub fn lookup_key(raw_path: &str) -> String {
    let decoded = urlencoding::decode(raw_path).unwrap_or(Cow::Borrowed(raw_path));

    let mut segments: Vec<&str> = Vec::new();
    for segment in decoded.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }

    segments.join("/")
}

/// Strip a mount prefix from a request path, the way a reverse proxy would.
///
/// Returns the remainder starting with `/` (or empty when the path equals the
/// prefix), or `None` when the path is outside the mount.
///
/// # Examples
/// ```
/// use openapi_viewer::http::path::strip_mount_prefix;
/// assert_eq!(strip_mount_prefix("/docs/index.html", "/docs"), Some("/index.html"));
/// assert_eq!(strip_mount_prefix("/docs", "/docs"), Some(""));
/// assert_eq!(strip_mount_prefix("/docsx", "/docs"), None);
/// ```
pub fn strip_mount_prefix<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return Some(path);
    }

    let rest = path.strip_prefix(prefix)?;
    if rest.is_empty() || rest.starts_with('/') {
        Some(rest)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_variants() {
        assert_eq!(lookup_key(""), "");
        assert_eq!(lookup_key("/"), "");
        assert_eq!(lookup_key("//"), "");
        assert_eq!(lookup_key("/."), "");
        assert_eq!(lookup_key("/.."), "");
    }

    #[test]
    fn test_plain_paths() {
        assert_eq!(lookup_key("/spec"), "spec");
        assert_eq!(lookup_key("/docs/pets/123"), "docs/pets/123");
        assert_eq!(lookup_key("/docs/pets/"), "docs/pets");
        assert_eq!(lookup_key("index.html"), "index.html");
    }

    #[test]
    fn test_traversal_cannot_escape_root() {
        assert_eq!(lookup_key("/../../etc/passwd"), "etc/passwd");
        assert_eq!(lookup_key("/a/../../b"), "b");
        assert_eq!(lookup_key("/%2e%2e/%2e%2e/etc/passwd"), "etc/passwd");
        assert_eq!(lookup_key("/..%2f..%2fetc/passwd"), "etc/passwd");
        assert_eq!(lookup_key("/..\\..\\etc\\passwd"), "etc/passwd");
        assert!(!lookup_key("/x/../../../y").contains(".."));
    }

    #[test]
    fn test_percent_decoding() {
        assert_eq!(lookup_key("/my%20file.js"), "my file.js");
        // Invalid UTF-8 after decoding keeps the raw path
        assert_eq!(lookup_key("/%ff.js"), "%ff.js");
    }

    #[test]
    fn test_strip_mount_prefix() {
        assert_eq!(strip_mount_prefix("/docs/", "/docs"), Some("/"));
        assert_eq!(strip_mount_prefix("/docs/spec", "/docs/"), Some("/spec"));
        assert_eq!(strip_mount_prefix("/api/users", "/docs"), None);
        assert_eq!(strip_mount_prefix("/anything", ""), Some("/anything"));
        assert_eq!(strip_mount_prefix("/anything", "/"), Some("/anything"));
    }
}
