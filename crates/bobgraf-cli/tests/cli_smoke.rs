use assert_cmd::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn repo_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("expected crates/<name> layout")
        .to_path_buf()
}

/// A scratch working directory laid out like the repo root (`js/helpers.js`,
/// `json/template.json`), since the panel stage resolves both relative to the cwd.
fn panel_workdir() -> tempfile::TempDir {
    let root = repo_root();
    let tmp = tempfile::tempdir().expect("tempdir");
    fs::create_dir_all(tmp.path().join("js")).expect("mkdir js");
    fs::create_dir_all(tmp.path().join("json")).expect("mkdir json");
    fs::copy(root.join("js/helpers.js"), tmp.path().join("js/helpers.js")).expect("copy helpers");
    fs::copy(
        root.join("json/template.json"),
        tmp.path().join("json/template.json"),
    )
    .expect("copy template");
    tmp
}

fn bobgraf() -> Command {
    Command::new(assert_cmd::cargo_bin!("bobgraf"))
}

#[test]
fn cli_converts_display_to_svg() {
    let fixture = repo_root().join("fixtures/display/pumps.bob");
    assert!(fixture.exists(), "fixture missing: {}", fixture.display());

    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("pumps.svg");
    bobgraf()
        .args([
            "svg",
            fixture.to_string_lossy().as_ref(),
            out.to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let svg = fs::read_to_string(&out).expect("read svg");
    assert_eq!(svg.matches("<text ").count(), 3, "{svg}");
    assert!(svg.contains(r#"width="200" height="90" viewBox="0 0 200 90""#), "{svg}");
    assert!(svg.contains(r#"id="text-1" x="10" y="35""#), "{svg}");
    assert!(svg.contains(r#"inkscape:label="PUMP:A:TEMP""#), "{svg}");
    assert!(svg.contains(r#"fill="rgb(0,128,0)""#), "{svg}");
    assert!(svg.contains(r#"inkscape:label="PUMP:A:FLOW""#), "{svg}");
}

#[test]
fn cli_builds_panel_from_converted_live_display() {
    let work = panel_workdir();
    let fixture = repo_root().join("fixtures/display/live_only.bob");
    let svg_path = work.path().join("tank.svg");

    bobgraf()
        .current_dir(work.path())
        .args([
            "svg",
            fixture.to_string_lossy().as_ref(),
            svg_path.to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    // Operators add unit and precision to each label in Inkscape before building the panel.
    let svg = fs::read_to_string(&svg_path).expect("read svg");
    let svg = svg
        .replace(
            r#"inkscape:label="TANK:LEVEL""#,
            r#"inkscape:label="TANK:LEVEL % 0""#,
        )
        .replace(
            r#"inkscape:label="TANK:PRESSURE""#,
            r#"inkscape:label="TANK:PRESSURE bar 2""#,
        );
    fs::write(&svg_path, &svg).expect("write svg");

    let output = bobgraf()
        .current_dir(work.path())
        .args(["panel", "tank.svg"])
        .output()
        .expect("run panel");
    assert!(output.status.success(), "{output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Created: json"), "{stdout}");
    assert!(stdout.contains("tank.json"), "{stdout}");

    let text = fs::read_to_string(work.path().join("json/tank.json")).expect("read panel");
    let panel: serde_json::Value = serde_json::from_str(&text).expect("panel json");
    assert_eq!(panel["title"], "Display");
    assert_eq!(panel["options"]["svgSource"], svg.as_str());
    assert_eq!(
        panel["options"]["svgMappings"],
        serde_json::json!([
            { "mappedName": "1", "svgId": "text-1" },
            { "mappedName": "2", "svgId": "text-2" }
        ])
    );
    let event = panel["options"]["eventSource"].as_str().expect("eventSource");
    assert!(event.starts_with("// Event helpers"));
    assert!(event.ends_with(
        "\n\n\nmapValue(svgmap, '1', 'TANK:LEVEL', '%', 0);\
         \nmapValue(svgmap, '2', 'TANK:PRESSURE', 'bar', 2);"
    ));
    assert_eq!(panel["targets"][0]["refId"], "E1");
    assert_eq!(panel["targets"][0]["target"], "TANK:LEVEL");
    assert_eq!(panel["targets"][1]["target"], "TANK:PRESSURE");
}

#[test]
fn cli_panel_accepts_an_explicit_template() {
    let work = panel_workdir();
    fs::write(
        work.path().join("custom.json"),
        r#"{"title":"Custom","targets":[{"refId":"A"}]}"#,
    )
    .expect("write template");
    fs::write(
        work.path().join("p.svg"),
        r#"<svg xmlns:inkscape="http://www.inkscape.org/namespaces/inkscape"><text id="text-1" inkscape:label="PV u 1">x</text></svg>"#,
    )
    .expect("write svg");

    bobgraf()
        .current_dir(work.path())
        .args(["panel", "p.svg", "custom.json"])
        .assert()
        .success();

    let panel: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(work.path().join("json/p.json")).expect("read panel"),
    )
    .expect("panel json");
    assert_eq!(panel["title"], "Custom");
    assert_eq!(panel["options"]["svgMappings"][0]["svgId"], "text-1");
    assert_eq!(panel["targets"].as_array().map(Vec::len), Some(1));
}

#[test]
fn cli_usage_errors_exit_1() {
    bobgraf().assert().code(1);
    bobgraf().args(["svg", "only-one.bob"]).assert().code(1);
    bobgraf().args(["panel"]).assert().code(1);
    bobgraf().args(["panel", "a.svg", "b.json", "c"]).assert().code(1);
    bobgraf().args(["render", "a.svg"]).assert().code(1);
}

#[test]
fn cli_missing_template_exits_1() {
    let work = panel_workdir();
    fs::write(work.path().join("p.svg"), "<svg/>").expect("write svg");

    let output = bobgraf()
        .current_dir(work.path())
        .args(["panel", "p.svg", "json/nope.json"])
        .output()
        .expect("run panel");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("template JSON file not found"), "{stderr}");
    assert!(!work.path().join("json/p.json").exists());
}

#[test]
fn cli_unlabeled_text_node_exits_1() {
    let work = panel_workdir();
    fs::write(
        work.path().join("p.svg"),
        r#"<svg xmlns="http://www.w3.org/2000/svg"><text id="text-7">x</text></svg>"#,
    )
    .expect("write svg");

    let output = bobgraf()
        .current_dir(work.path())
        .args(["panel", "p.svg"])
        .output()
        .expect("run panel");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("text-7"), "{stderr}");
}

#[test]
fn cli_malformed_display_exits_1() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = tmp.path().join("bad.bob");
    fs::write(&input, "<display><widget></display>").expect("write display");

    bobgraf()
        .args([
            "svg",
            input.to_string_lossy().as_ref(),
            tmp.path().join("out.svg").to_string_lossy().as_ref(),
        ])
        .assert()
        .code(1);
    assert!(!tmp.path().join("out.svg").exists());
}
