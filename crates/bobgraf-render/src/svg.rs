use crate::util::{escape_xml_into, push_number};
use crate::{Error, Result};
use bobgraf_core::{CanvasExtent, CanvasItem};
use std::fmt::Write as _;

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";
/// Namespace of the extension attribute that carries PV bindings through the SVG.
pub const INKSCAPE_NS: &str = "http://www.inkscape.org/namespaces/inkscape";
pub const INKSCAPE_LABEL_ATTR: &str = "label";
/// Every emitted text node is identified as `text-<n>`, `n` counting from 1.
pub const TEXT_ID_PREFIX: &str = "text-";

/// Fraction of the widget height used as the text baseline (single-line heuristic).
const BASELINE_RATIO: f64 = 0.75;

pub fn text_node_id(n: u32) -> String {
    format!("{TEXT_ID_PREFIX}{n}")
}

/// Inverse of [`text_node_id`].
///
/// Returns `None` for ids without the `text-` prefix. A prefixed id whose suffix is not a
/// non-negative integer (`text-3-4821`, `text-abc`) is malformed rather than foreign.
pub fn parse_text_node_id(id: &str) -> Option<Result<u32>> {
    let suffix = id.strip_prefix(TEXT_ID_PREFIX)?;
    Some(
        suffix
            .trim()
            .parse::<u32>()
            .map_err(|_| Error::MalformedNodeId {
                node_id: id.to_string(),
            }),
    )
}

/// Renders extracted widgets as an SVG document sized to `extent`.
///
/// Items with empty text are skipped and do not consume an id, so ids form a dense `1..=n`
/// sequence over the emitted nodes, in item order. Output is a pure function of the inputs.
pub fn render_items_svg(items: &[CanvasItem], extent: &CanvasExtent) -> String {
    let (width, height) = (extent.width(), extent.height());

    let mut out = String::new();
    out.push_str("<?xml version='1.0' encoding='utf-8'?>\n");
    let _ = write!(
        &mut out,
        r#"<svg xmlns="{SVG_NS}" xmlns:inkscape="{INKSCAPE_NS}" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#,
    );

    let mut next_id: u32 = 1;
    for item in items.iter().filter(|i| !i.text.is_empty()) {
        push_text_node(&mut out, item, next_id);
        next_id += 1;
    }
    tracing::debug!(nodes = next_id - 1, width, height, "encoded SVG");

    out.push_str("</svg>\n");
    out
}

fn push_text_node(out: &mut String, item: &CanvasItem, n: u32) {
    let baseline_y = item.y as f64 + BASELINE_RATIO * item.height as f64;

    let _ = write!(out, r#"<text id="{TEXT_ID_PREFIX}{n}" x="{}" y=""#, item.x);
    push_number(out, baseline_y);
    out.push_str(r#"" font-family=""#);
    escape_xml_into(out, &item.font.family);
    out.push_str(r#"" font-size=""#);
    push_number(out, item.font.size);
    let _ = write!(out, r#"" fill="{}""#, item.color);
    if let Some(binding) = item.live_binding() {
        let _ = write!(out, r#" inkscape:{INKSCAPE_LABEL_ATTR}=""#);
        escape_xml_into(out, binding);
        out.push('"');
    }
    out.push('>');
    escape_xml_into(out, &item.text);
    out.push_str("</text>");
}
