//! Character set detection for archive pages
//!
//! Listing pages are decoded in HTML order of precedence: a byte order mark,
//! then the charset declared by the transport (`Content-Type`), then a
//! `<meta>` declaration near the top of the document, and finally UTF-8.

use encoding_rs::{Encoding, UTF_8};
use once_cell::sync::Lazy;
use regex::bytes::Regex;
use std::borrow::Cow;

/// How far into the document a `<meta>` charset declaration is looked for
const META_PRESCAN_BYTES: usize = 1024;

static META_CHARSET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i-u)<meta[^>]*?charset\s*=\s*["']?\s*([a-z0-9_:.\-]+)"#)
        .expect("meta charset pattern is valid")
});

/// Looks up the encoding named by the `charset` parameter of a `Content-Type` value
///
/// Unknown labels are ignored.
pub fn charset_from_content_type(content_type: &str) -> Option<&'static Encoding> {
    content_type
        .split(';')
        .skip(1)
        .filter_map(|param| param.split_once('='))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("charset"))
        .and_then(|(_, label)| Encoding::for_label(label.trim().trim_matches('"').as_bytes()))
}

/// Looks up the encoding declared by a `<meta>` tag at the start of `content`
pub fn sniff_meta_charset(content: &[u8]) -> Option<&'static Encoding> {
    let head = &content[..content.len().min(META_PRESCAN_BYTES)];
    let label = META_CHARSET.captures(head)?.get(1)?;
    let encoding = Encoding::for_label(label.as_bytes())?;

    // A document that is readable as ASCII cannot really be UTF-16
    if encoding == encoding_rs::UTF_16LE || encoding == encoding_rs::UTF_16BE {
        return Some(UTF_8);
    }
    Some(encoding)
}

/// Decodes an HTML document to text
///
/// A byte order mark wins over a `<meta>` declaration; without either the
/// content is read as UTF-8, with malformed sequences replaced.
pub fn decode_html(content: &[u8]) -> Cow<'_, str> {
    let fallback = sniff_meta_charset(content).unwrap_or(UTF_8);
    let (text, encoding, had_errors) = fallback.decode(content);

    if had_errors {
        tracing::warn!("Malformed {} sequences replaced while decoding page", encoding.name());
    }
    text
}

/// Re-encodes a body received with a transport charset as UTF-8
///
/// The result starts with a UTF-8 byte order mark so that [`decode_html`]
/// keeps honouring the transport charset over any `<meta>` declaration.
pub fn transcode_to_utf8(content: &[u8], encoding: &'static Encoding) -> Vec<u8> {
    let (text, _, _) = encoding.decode(content);

    let mut body = Vec::with_capacity(text.len() + 3);
    body.extend_from_slice(b"\xEF\xBB\xBF");
    body.extend_from_slice(text.as_bytes());
    body
}
