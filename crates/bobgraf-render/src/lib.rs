#![forbid(unsafe_code)]

//! SVG side of the display-to-panel pipeline.
//!
//! [`svg::render_items_svg`] draws extracted widgets as `<text>` nodes with stable `text-<n>` ids
//! and stamps live widgets' PV names into `inkscape:label`. [`bindings::recover_bindings`] reads
//! those labels back from any SVG (including one re-saved by Inkscape).

pub mod bindings;
pub mod svg;
mod util;

pub use bindings::{BindingEntry, recover_bindings};
pub use svg::{
    INKSCAPE_LABEL_ATTR, INKSCAPE_NS, TEXT_ID_PREFIX, parse_text_node_id, render_items_svg,
    text_node_id,
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Malformed SVG document: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("SVG node `{node_id}` has no inkscape:label binding")]
    MissingLabel { node_id: String },
    #[error("SVG node id `{node_id}` does not end in a text node number")]
    MalformedNodeId { node_id: String },
    #[error("SVG node id `{node_id}` appears more than once")]
    DuplicateNode { node_id: String },
}

pub type Result<T> = std::result::Result<T, Error>;
