use crate::svg::{INKSCAPE_LABEL_ATTR, INKSCAPE_NS, parse_text_node_id, text_node_id};
use crate::{Error, Result};
use std::collections::BTreeMap;

/// A `text-<n>` node recovered from an SVG, with its whitespace-split `inkscape:label`.
///
/// The first token is the PV name. Further tokens are passed through untouched; their meaning
/// belongs to the panel's event script (unit and precision for `mapValue`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingEntry {
    pub id: u32,
    pub tokens: Vec<String>,
}

impl BindingEntry {
    pub fn node_id(&self) -> String {
        text_node_id(self.id)
    }

    pub fn binding_name(&self) -> Option<&str> {
        self.tokens.first().map(String::as_str)
    }
}

/// Scans every element of `svg` for `text-<n>` ids and returns their bindings sorted by `n`.
///
/// Elements whose id lacks the `text-` prefix are ignored. A prefixed id with a non-numeric
/// suffix, or a matching element without an `inkscape:label`, fails the whole call.
///
/// Two elements resolving to the same number (`text-2` and `text-+2`) are also rejected
/// instead of letting the later node overwrite the earlier one.
pub fn recover_bindings(svg: &str) -> Result<Vec<BindingEntry>> {
    let doc = roxmltree::Document::parse(svg)?;

    let mut by_id: BTreeMap<u32, Vec<String>> = BTreeMap::new();
    for node in doc.descendants().filter(|n| n.is_element()) {
        let Some(raw_id) = node.attribute("id") else {
            continue;
        };
        let Some(id) = parse_text_node_id(raw_id) else {
            continue;
        };
        let id = id?;
        let Some(label) = node.attribute((INKSCAPE_NS, INKSCAPE_LABEL_ATTR)) else {
            return Err(Error::MissingLabel {
                node_id: raw_id.to_string(),
            });
        };
        let tokens = label.split_whitespace().map(str::to_string).collect();
        if by_id.insert(id, tokens).is_some() {
            return Err(Error::DuplicateNode {
                node_id: raw_id.to_string(),
            });
        }
    }

    let entries: Vec<BindingEntry> = by_id
        .into_iter()
        .map(|(id, tokens)| BindingEntry { id, tokens })
        .collect();
    tracing::debug!(?entries, "recovered SVG bindings");
    Ok(entries)
}
