//! File-level entry points for the two pipeline stages.
//!
//! Each stage reads its inputs fully, does its work in memory and writes one output file. Any
//! read, parse or write failure aborts the stage; nothing is retried or cleaned up.

use crate::panel::{PanelOptions, assemble_panel};
use crate::{Error, Result};
use bobgraf_core::parse_display;
use bobgraf_render::{recover_bindings, render_items_svg};
use std::path::{Path, PathBuf};

pub const DEFAULT_TEMPLATE_PATH: &str = "json/template.json";

/// Where the panel stage finds its helper script and writes its output.
#[derive(Debug, Clone)]
pub struct PanelPaths {
    pub helper_script: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for PanelPaths {
    fn default() -> Self {
        Self {
            helper_script: PathBuf::from("js/helpers.js"),
            output_dir: PathBuf::from("json"),
        }
    }
}

/// Converts display XML into SVG text.
pub fn convert_display(display_xml: &str) -> Result<String> {
    let extraction = parse_display(display_xml)?;
    Ok(render_items_svg(&extraction.items, &extraction.extent))
}

pub fn convert_display_file(input: &Path, output: &Path) -> Result<()> {
    let display_xml = read_text(input)?;
    let svg = convert_display(&display_xml)?;
    std::fs::write(output, svg).map_err(|source| Error::Write {
        path: output.to_path_buf(),
        source,
    })
}

/// `<output_dir>/<svg file stem>.json`
pub fn panel_output_path(svg_path: &Path, output_dir: &Path) -> PathBuf {
    let stem = svg_path.file_stem().unwrap_or(svg_path.as_os_str());
    let mut name = stem.to_os_string();
    name.push(".json");
    output_dir.join(name)
}

/// Builds a panel JSON file from `svg_path` and `template_path`; returns the written path.
pub fn build_panel_file(
    svg_path: &Path,
    template_path: &Path,
    paths: &PanelPaths,
    options: &PanelOptions,
) -> Result<PathBuf> {
    let svg_source = read_text(svg_path)?;
    let entries = recover_bindings(&svg_source)?;

    if !template_path.is_file() {
        return Err(Error::MissingTemplate {
            path: template_path.to_path_buf(),
        });
    }
    tracing::debug!(template = %template_path.display(), "loading panel template");
    let template_text = read_text(template_path)?;
    let template: serde_json::Value =
        serde_json::from_str(&template_text).map_err(|source| Error::TemplateJson {
            path: template_path.to_path_buf(),
            source,
        })?;

    let helper_script = read_text(&paths.helper_script)?;

    let panel = assemble_panel(template, &entries, &svg_source, &helper_script, options)?;
    let json = serde_json::to_string_pretty(&panel)?;

    let output_path = panel_output_path(svg_path, &paths.output_dir);
    std::fs::write(&output_path, json).map_err(|source| Error::Write {
        path: output_path.clone(),
        source,
    })?;
    Ok(output_path)
}

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })
}
