//! MIME type detection module
//!
//! Returns the Content-Type for an asset: by extension first, then by sniffing
//! the first bytes of the content.

use std::borrow::Cow;

/// Number of leading bytes inspected when sniffing
const SNIFF_LEN: usize = 512;

/// Lowercase prefixes that mark a document as HTML
const HTML_SIGNATURES: [&[u8]; 6] = [
    b"<!doctype html",
    b"<html",
    b"<head",
    b"<body",
    b"<script",
    b"<!--",
];

/// Get MIME Content-Type for an asset
///
/// # Examples
/// ```
/// use openapi_viewer::http::mime::get_content_type;
/// assert_eq!(get_content_type(Some("js"), b""), "application/javascript");
/// assert_eq!(get_content_type(Some("css"), b""), "text/css");
/// assert_eq!(get_content_type(None, b"<!DOCTYPE html><html></html>"), "text/html; charset=utf-8");
/// ```
pub fn get_content_type(extension: Option<&str>, content: &[u8]) -> Cow<'static, str> {
    if let Some(ext) = extension.map(str::to_ascii_lowercase) {
        if let Some(content_type) = known_content_type(&ext) {
            return Cow::Borrowed(content_type);
        }
        if let Some(mime) = mime_guess::from_ext(&ext).first() {
            return Cow::Owned(mime.to_string());
        }
    }
    Cow::Borrowed(sniff_content_type(content))
}

/// Content types for the extensions a documentation bundle ships
fn known_content_type(extension: &str) -> Option<&'static str> {
    let content_type = match extension {
        // Text
        "html" | "htm" => "text/html; charset=utf-8",
        "css" => "text/css",
        "txt" | "md" => "text/plain; charset=utf-8",
        "xml" => "application/xml",
        "yaml" | "yml" => "application/yaml",

        // JavaScript/WASM
        "js" | "mjs" => "application/javascript",
        "json" | "map" => "application/json",
        "wasm" => "application/wasm",

        // Images
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "webp" => "image/webp",

        // Fonts
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "otf" => "font/otf",
        "eot" => "application/vnd.ms-fontobject",

        _ => return None,
    };
    Some(content_type)
}

/// Guess a content type from the leading bytes of a file
fn sniff_content_type(content: &[u8]) -> &'static str {
    let head = &content[..content.len().min(SNIFF_LEN)];

    if head.starts_with(b"\x89PNG\r\n\x1a\n") {
        return "image/png";
    }
    if head.starts_with(b"GIF87a") || head.starts_with(b"GIF89a") {
        return "image/gif";
    }
    if head.starts_with(b"\xff\xd8\xff") {
        return "image/jpeg";
    }
    if head.starts_with(b"%PDF-") {
        return "application/pdf";
    }

    let trimmed = trim_leading_whitespace(head);
    if HTML_SIGNATURES
        .iter()
        .any(|sig| trimmed.len() >= sig.len() && trimmed[..sig.len()].eq_ignore_ascii_case(sig))
    {
        return "text/html; charset=utf-8";
    }

    if !head.is_empty() && !head.iter().any(|b| is_binary_byte(*b)) {
        return "text/plain; charset=utf-8";
    }

    "application/octet-stream"
}

fn trim_leading_whitespace(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    &bytes[start..]
}

/// Control bytes that never appear in text files
const fn is_binary_byte(b: u8) -> bool {
    matches!(b, 0x00..=0x08 | 0x0b | 0x0e..=0x1a | 0x1c..=0x1f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_types() {
        assert_eq!(get_content_type(Some("html"), b""), "text/html; charset=utf-8");
        assert_eq!(get_content_type(Some("css"), b""), "text/css");
        assert_eq!(get_content_type(Some("js"), b""), "application/javascript");
        assert_eq!(get_content_type(Some("json"), b""), "application/json");
        assert_eq!(get_content_type(Some("png"), b""), "image/png");
        assert_eq!(get_content_type(Some("PNG"), b""), "image/png");
    }

    #[test]
    fn test_falls_back_to_extension_database() {
        assert_eq!(get_content_type(Some("mp4"), b""), "video/mp4");
    }

    #[test]
    fn test_sniffing() {
        assert_eq!(
            get_content_type(None, b"  <HTML><body></body></HTML>"),
            "text/html; charset=utf-8"
        );
        assert_eq!(
            get_content_type(Some("unknownext"), b"\x89PNG\r\n\x1a\n\0\0"),
            "image/png"
        );
        assert_eq!(get_content_type(None, b"plain words"), "text/plain; charset=utf-8");
        assert_eq!(get_content_type(None, b"\x00\x01\x02"), "application/octet-stream");
        assert_eq!(get_content_type(None, b""), "application/octet-stream");
    }
}
