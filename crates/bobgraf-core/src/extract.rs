use crate::display::{DisplayWidget, FontSpec, Rgb, WidgetKind};
use crate::geom::CanvasExtent;
use crate::Result;

/// Text shown for live widgets; no PV value is available at conversion time.
pub const LIVE_PLACEHOLDER_TEXT: &str = "22.2C";

/// A recognized widget, normalized for SVG encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasItem {
    pub kind: WidgetKind,
    pub name: String,
    /// Text to draw. May be empty for labels; never empty for live widgets.
    pub text: String,
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
    pub font: FontSpec,
    pub color: Rgb,
    /// Scheme-stripped PV name. `Some` for live widgets only (possibly empty).
    pub binding: Option<String>,
}

impl CanvasItem {
    pub fn from_widget(widget: DisplayWidget) -> Self {
        let (text, binding) = match widget.kind {
            WidgetKind::Label => (widget.text, None),
            WidgetKind::TextUpdate => (
                LIVE_PLACEHOLDER_TEXT.to_string(),
                Some(widget.binding().to_string()),
            ),
        };
        Self {
            kind: widget.kind,
            name: widget.name,
            text,
            x: widget.x,
            y: widget.y,
            width: widget.width,
            height: widget.height,
            font: widget.font,
            color: widget.foreground,
            binding,
        }
    }

    /// The binding name to stamp on the SVG node, if this item carries a usable one.
    pub fn live_binding(&self) -> Option<&str> {
        if !self.kind.is_live() {
            return None;
        }
        self.binding.as_deref().filter(|b| !b.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    pub items: Vec<CanvasItem>,
    pub extent: CanvasExtent,
}

/// Parses a display document and extracts its recognized widgets.
pub fn parse_display(text: &str) -> Result<Extraction> {
    let doc = roxmltree::Document::parse(text)?;
    Ok(extract_items(doc.root_element()))
}

/// Extracts the recognized widgets directly under `root`, in document order.
///
/// Every extracted widget contributes to the extent, including labels with empty text.
pub fn extract_items(root: roxmltree::Node<'_, '_>) -> Extraction {
    let mut out = Extraction::default();
    for node in root.children().filter(|c| c.has_tag_name("widget")) {
        let Some(widget) = DisplayWidget::from_node(node) else {
            tracing::debug!(
                widget_type = node.attribute("type").unwrap_or_default(),
                "skipping unsupported widget"
            );
            continue;
        };
        out.extent
            .include(widget.x, widget.y, widget.width, widget.height);
        out.items.push(CanvasItem::from_widget(widget));
    }
    tracing::debug!(
        items = out.items.len(),
        width = out.extent.width(),
        height = out.extent.height(),
        "extracted display widgets"
    );
    out
}
