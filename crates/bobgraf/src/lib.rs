#![forbid(unsafe_code)]

//! `bobgraf` turns Phoebus displays into data-bound Grafana SVG panels.
//!
//! The pipeline has two stages, each usable on its own:
//!
//! 1. display (`.bob`) → SVG: [`convert_display`] / [`convert_display_file`]
//! 2. SVG + panel template → panel JSON: [`panel::assemble_panel`] / [`build_panel_file`]
//!
//! Between the stages the SVG may be edited freely (e.g. in Inkscape); the only contract is that
//! bound text nodes keep their `text-<n>` ids and `inkscape:label` attributes.

pub mod panel;
pub mod pipeline;

pub use bobgraf_core::{
    CANVAS_MARGIN, CanvasExtent, CanvasItem, DisplayWidget, Extraction, FontSpec,
    LIVE_PLACEHOLDER_TEXT, Rgb, WidgetKind, extract_items, parse_display, strip_scheme,
};
pub use panel::{DataSourceRef, PanelOptions, QueryTarget, SvgMapping, assemble_panel};
pub use pipeline::{
    DEFAULT_TEMPLATE_PATH, PanelPaths, build_panel_file, convert_display, convert_display_file,
    panel_output_path,
};

pub mod render {
    pub use bobgraf_render::{
        BindingEntry, INKSCAPE_LABEL_ATTR, INKSCAPE_NS, TEXT_ID_PREFIX, parse_text_node_id,
        recover_bindings, render_items_svg, text_node_id,
    };
}

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Display(#[from] bobgraf_core::Error),
    #[error(transparent)]
    Svg(#[from] bobgraf_render::Error),
    #[error("template JSON file not found: {}", .path.display())]
    MissingTemplate { path: PathBuf },
    #[error("Error reading JSON template '{}': {source}", .path.display())]
    TemplateJson {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("panel template must be a JSON object")]
    TemplateNotObject,
    #[error(
        "binding for text-{id} needs at least 3 label tokens (PV, unit, precision), found {found}"
    )]
    InsufficientTokens { id: u32, found: usize },
    #[error("Error reading '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Error writing output file '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
