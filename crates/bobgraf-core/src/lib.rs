#![forbid(unsafe_code)]

//! Phoebus display (`.bob`) reader (headless).
//!
//! Reads the widget tree of a display document, keeps the two text-bearing widget kinds
//! (`label` and `textupdate`) and normalizes them into [`CanvasItem`]s ready for SVG encoding.
//!
//! Design goals:
//! - lenient field parsing (absent or malformed fields fall back to Phoebus-like defaults)
//! - deterministic output (item order follows document order)

pub mod display;
pub mod error;
pub mod extract;
pub mod geom;

pub use display::{DisplayWidget, FontSpec, Rgb, WidgetKind, strip_scheme};
pub use error::{Error, Result};
pub use extract::{CanvasItem, Extraction, LIVE_PLACEHOLDER_TEXT, extract_items, parse_display};
pub use geom::{CANVAS_MARGIN, CanvasExtent};
