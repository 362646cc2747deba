//! Typed view over a single `<widget>` element of a Phoebus display.
//!
//! Field parsing never fails: absent or malformed values fall back to the defaults Phoebus
//! itself uses for new widgets.

use std::fmt;

/// Connection scheme prefix Phoebus writes in front of Channel Access PV names.
pub const CA_SCHEME_PREFIX: &str = "ca://";

pub const DEFAULT_X: i64 = 0;
pub const DEFAULT_Y: i64 = 0;
pub const DEFAULT_WIDTH: i64 = 80;
pub const DEFAULT_HEIGHT: i64 = 20;

pub const DEFAULT_FONT_FAMILY: &str = "Sans";
pub const DEFAULT_FONT_SIZE: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    /// Static text (`type="label"`).
    Label,
    /// Live PV readback (`type="textupdate"`).
    TextUpdate,
}

impl WidgetKind {
    /// Maps a widget `type` attribute to a recognized kind; every other type is ignored.
    pub fn from_type_attr(raw: &str) -> Option<Self> {
        match raw {
            "label" => Some(Self::Label),
            "textupdate" => Some(Self::TextUpdate),
            _ => None,
        }
    }

    pub fn is_live(self) -> bool {
        matches!(self, Self::TextUpdate)
    }
}

/// Foreground color as written in the display. Channels are kept as given, out-of-range
/// values included; CSS clamps them to `0..=255` when the SVG is painted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rgb {
    pub red: i64,
    pub green: i64,
    pub blue: i64,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb {
        red: 0,
        green: 0,
        blue: 0,
    };

    pub fn new(red: i64, green: i64, blue: i64) -> Self {
        Self { red, green, blue }
    }
}

/// Formats as an SVG/CSS functional color, e.g. `rgb(0,128,255)`.
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.red, self.green, self.blue)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: String,
    pub size: f64,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: DEFAULT_FONT_FAMILY.to_string(),
            size: DEFAULT_FONT_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayWidget {
    pub kind: WidgetKind,
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
    pub name: String,
    pub text: String,
    /// Raw PV reference, scheme prefix included.
    pub pv_name: String,
    pub font: FontSpec,
    pub foreground: Rgb,
}

impl DisplayWidget {
    /// Reads a `<widget>` element. Returns `None` when its `type` is not a recognized kind.
    pub fn from_node(node: roxmltree::Node<'_, '_>) -> Option<Self> {
        let kind = WidgetKind::from_type_attr(node.attribute("type").unwrap_or_default())?;
        Some(Self {
            kind,
            x: child_int(node, "x").unwrap_or(DEFAULT_X),
            y: child_int(node, "y").unwrap_or(DEFAULT_Y),
            width: child_int(node, "width").unwrap_or(DEFAULT_WIDTH),
            height: child_int(node, "height").unwrap_or(DEFAULT_HEIGHT),
            name: child_text(node, "name").unwrap_or_default(),
            text: child_text(node, "text").unwrap_or_default(),
            pv_name: child_text(node, "pv_name").unwrap_or_default(),
            font: font_spec(node),
            foreground: foreground_color(node),
        })
    }

    /// PV name with the `ca://` scheme removed.
    pub fn binding(&self) -> &str {
        strip_scheme(&self.pv_name)
    }
}

/// Removes the Channel Access scheme prefix if (and only if) the reference starts with it.
pub fn strip_scheme(raw: &str) -> &str {
    raw.strip_prefix(CA_SCHEME_PREFIX).unwrap_or(raw)
}

fn child_element<'a, 'input>(
    node: roxmltree::Node<'a, 'input>,
    name: &str,
) -> Option<roxmltree::Node<'a, 'input>> {
    node.children()
        .find(|c| c.is_element() && c.tag_name().name() == name)
}

fn child_text(node: roxmltree::Node<'_, '_>, name: &str) -> Option<String> {
    let text = child_element(node, name)?.text()?;
    Some(text.trim().to_string())
}

/// Integer field that tolerates float formatting (`"12.0"`, `"7.9"`); fractions truncate.
fn child_int(node: roxmltree::Node<'_, '_>, name: &str) -> Option<i64> {
    let raw = child_element(node, name)?.text()?;
    let v = raw.trim().parse::<f64>().ok()?;
    if !v.is_finite() {
        return None;
    }
    Some(v.trunc() as i64)
}

/// Reads `<font><font family=".." size=".."/></font>`.
fn font_spec(node: roxmltree::Node<'_, '_>) -> FontSpec {
    let Some(inner) = child_element(node, "font").and_then(|outer| child_element(outer, "font"))
    else {
        return FontSpec::default();
    };

    let family = inner
        .attribute("family")
        .unwrap_or(DEFAULT_FONT_FAMILY)
        .to_string();
    let size = inner
        .attribute("size")
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(DEFAULT_FONT_SIZE);
    FontSpec { family, size }
}

/// Reads `<foreground_color><color red=".." green=".." blue=".."/></foreground_color>`.
///
/// A missing channel counts as `0`; any unparsable channel discards the whole color.
fn foreground_color(node: roxmltree::Node<'_, '_>) -> Rgb {
    let Some(color) =
        child_element(node, "foreground_color").and_then(|fg| child_element(fg, "color"))
    else {
        return Rgb::BLACK;
    };

    let channel = |name: &str| -> Option<i64> {
        match color.attribute(name) {
            None => Some(0),
            Some(raw) => raw.trim().parse::<i64>().ok(),
        }
    };
    match (channel("red"), channel("green"), channel("blue")) {
        (Some(red), Some(green), Some(blue)) => Rgb::new(red, green, blue),
        _ => Rgb::BLACK,
    }
}
