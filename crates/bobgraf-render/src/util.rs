// Shared SVG text helpers.

use std::fmt::Write as _;

/// Attribute form of a coordinate or font size. Integral values print without a fraction
/// (`35`, not `35.0`); non-finite values print as `0`.
pub(crate) fn push_number(out: &mut String, v: f64) {
    if !v.is_finite() {
        out.push('0');
        return;
    }
    // `-0` would otherwise survive `Display`.
    let v = if v == 0.0 { 0.0 } else { v };
    let _ = write!(out, "{v}");
}

pub(crate) fn escape_xml_into(out: &mut String, text: &str) {
    let bytes = text.as_bytes();
    let mut start = 0usize;
    for (i, &b) in bytes.iter().enumerate() {
        let esc = match b {
            b'&' => "&amp;",
            b'<' => "&lt;",
            b'>' => "&gt;",
            b'"' => "&quot;",
            b'\'' => "&#39;",
            _ => continue,
        };
        if start < i {
            out.push_str(&text[start..i]);
        }
        out.push_str(esc);
        start = i + 1;
    }
    if start < text.len() {
        out.push_str(&text[start..]);
    }
}
