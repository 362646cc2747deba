//! Fuses a bound SVG into a Grafana SVG-panel template.
//!
//! For every recovered binding, in ascending id order, the panel gets:
//! - a `mapValue(...)` call appended to `options.eventSource`
//! - an `options.svgMappings` entry naming the SVG node
//! - a query in `targets` fetching the PV, with `refId` `E<n>`
//!
//! Template fields this module does not own are left as they are.

use crate::{Error, Result};
use bobgraf_render::BindingEntry;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt::Write as _;

/// Appended once to the helper script, ahead of the generated calls.
pub const SCRIPT_SEPARATOR: &str = "\n\n";
/// PV name, unit and precision.
pub const MIN_LABEL_TOKENS: usize = 3;

/// Grafana datasource reference used by every generated query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataSourceRef {
    #[serde(rename = "type")]
    pub kind: String,
    pub uid: String,
}

impl Default for DataSourceRef {
    fn default() -> Self {
        Self {
            kind: "sasaki77-archiverappliance-datasource".to_string(),
            uid: "6ATSoo3Nk".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PanelOptions {
    pub datasource: DataSourceRef,
    /// Query `refId` is this prefix followed by the binding id.
    pub ref_id_prefix: String,
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self {
            datasource: DataSourceRef::default(),
            ref_id_prefix: "E".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SvgMapping {
    pub mapped_name: String,
    pub svg_id: String,
}

/// An archiver-appliance query, field order as Grafana exports it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryTarget {
    pub alias: String,
    pub alias_pattern: String,
    pub datasource: DataSourceRef,
    pub functions: Vec<Value>,
    pub hide: bool,
    pub operator: String,
    pub ref_id: String,
    pub regex: bool,
    pub stream: bool,
    pub strm_cap: String,
    pub strm_int: String,
    pub target: String,
}

impl QueryTarget {
    pub fn latest(ref_id: String, target: String, datasource: DataSourceRef) -> Self {
        Self {
            alias: String::new(),
            alias_pattern: String::new(),
            datasource,
            functions: Vec::new(),
            hide: false,
            operator: "last".to_string(),
            ref_id,
            regex: false,
            stream: false,
            strm_cap: String::new(),
            strm_int: String::new(),
            target,
        }
    }
}

/// The three per-binding lists plus the finished event script.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelParts {
    pub event_source: String,
    pub mappings: Vec<SvgMapping>,
    pub targets: Vec<QueryTarget>,
}

/// Builds the event script, mappings and query targets for `entries`, sorted by id.
pub fn build_panel_parts(
    entries: &[BindingEntry],
    helper_script: &str,
    options: &PanelOptions,
) -> Result<PanelParts> {
    let mut sorted: Vec<&BindingEntry> = entries.iter().collect();
    sorted.sort_by_key(|e| e.id);

    let mut event_source = String::with_capacity(helper_script.len() + 64 * sorted.len());
    event_source.push_str(helper_script);
    event_source.push_str(SCRIPT_SEPARATOR);

    let mut mappings = Vec::with_capacity(sorted.len());
    let mut targets = Vec::with_capacity(sorted.len());
    for entry in sorted {
        let [pv, unit, precision, ..] = entry.tokens.as_slice() else {
            return Err(Error::InsufficientTokens {
                id: entry.id,
                found: entry.tokens.len(),
            });
        };

        let _ = write!(
            &mut event_source,
            "\nmapValue(svgmap, '{}', '{}', '{}', {precision});",
            entry.id,
            js_single_quoted(pv),
            js_single_quoted(unit),
        );
        mappings.push(SvgMapping {
            mapped_name: entry.id.to_string(),
            svg_id: entry.node_id(),
        });
        targets.push(QueryTarget::latest(
            format!("{}{}", options.ref_id_prefix, entry.id),
            pv.clone(),
            options.datasource.clone(),
        ));
    }

    Ok(PanelParts {
        event_source,
        mappings,
        targets,
    })
}

/// Writes the SVG, event script, mappings and targets into `template`.
///
/// `options.svgSource`, `options.eventSource`, `options.svgMappings` and `targets` are replaced
/// outright. A missing or non-object `options` is replaced by a fresh object.
pub fn assemble_panel(
    template: Value,
    entries: &[BindingEntry],
    svg_source: &str,
    helper_script: &str,
    options: &PanelOptions,
) -> Result<Value> {
    let Value::Object(mut panel) = template else {
        return Err(Error::TemplateNotObject);
    };
    let parts = build_panel_parts(entries, helper_script, options)?;

    let svg_options = panel
        .entry("options")
        .or_insert_with(|| Value::Object(Map::new()));
    if !svg_options.is_object() {
        *svg_options = Value::Object(Map::new());
    }
    if let Value::Object(svg_options) = svg_options {
        svg_options.insert("svgSource".to_string(), Value::String(svg_source.to_string()));
        svg_options.insert("eventSource".to_string(), Value::String(parts.event_source));
        svg_options.insert("svgMappings".to_string(), serde_json::to_value(&parts.mappings)?);
    }
    panel.insert("targets".to_string(), serde_json::to_value(&parts.targets)?);

    Ok(Value::Object(panel))
}

fn js_single_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            _ => out.push(ch),
        }
    }
    out
}
