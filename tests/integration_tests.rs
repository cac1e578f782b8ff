//! Integration tests for the theme build pipeline

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use theme_variants::report::RecordingReporter;
use theme_variants::{build, build_with_layout, BuildError, BuildLayout, Project, SilentReporter};

const PACKAGE: &str = include_str!("fixtures/package.json");
const BACKGROUNDS: &str = include_str!("fixtures/backgrounds.json");
const TEMPLATE: &str = include_str!("fixtures/templates/template.hidden-tmTheme");

/// Create a project tree from the fixtures
fn fixture_project() -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    write_project(dir.path(), BACKGROUNDS, TEMPLATE);
    dir
}

fn write_project(root: &Path, backgrounds: &str, template: &str) {
    fs::write(root.join("package.json"), PACKAGE).unwrap();
    fs::write(root.join("backgrounds.json"), backgrounds).unwrap();
    fs::create_dir_all(root.join("templates")).unwrap();
    fs::write(root.join("templates/template.hidden-tmTheme"), template).unwrap();
}

fn theme_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|n| n.ends_with(".tmTheme"))
        .collect();
    names.sort();
    names
}

#[test]
fn test_end_to_end_acme() {
    let dir = fixture_project();

    build(dir.path(), &mut SilentReporter).expect("Should build");

    assert_eq!(
        theme_files(dir.path()),
        vec!["Acme - Night owl.tmTheme", "Acme.tmTheme"]
    );

    let default = fs::read_to_string(dir.path().join("Acme.tmTheme")).unwrap();
    assert!(default.contains("<string>Acme</string>"));
    assert!(default.contains("<string>#000000</string>"));
    assert!(default.contains("Gutter (Acme, rgb 0,0,0)"));

    let night = fs::read_to_string(dir.path().join("Acme - Night owl.tmTheme")).unwrap();
    assert!(night.contains("<string>Acme - Night owl</string>"));
    assert!(night.contains("<string>#0A0A1E</string>"));
    assert!(night.contains("Gutter (Acme - Night owl, rgb 10,10,30)"));
}

#[test]
fn test_output_is_template_with_substitutions() {
    let dir = fixture_project();
    build(dir.path(), &mut SilentReporter).unwrap();

    let expected = TEMPLATE
        .replace("{{name}}", "Acme - Night owl")
        .replace("{{bg_rgb}}", "10,10,30")
        .replace("{{bg_hex}}", "#0A0A1E");
    let actual = fs::read_to_string(dir.path().join("Acme - Night owl.tmTheme")).unwrap();
    assert_eq!(actual, expected);
}

#[test]
fn test_no_placeholders_left() {
    let dir = fixture_project();
    build(dir.path(), &mut SilentReporter).unwrap();

    for name in theme_files(dir.path()) {
        let content = fs::read_to_string(dir.path().join(&name)).unwrap();
        assert!(!content.contains("{{"), "{} still has placeholders", name);
    }
}

#[test]
fn test_stale_theme_removed() {
    let dir = fixture_project();
    fs::write(dir.path().join("Old.tmTheme"), "stale").unwrap();

    let summary = build(dir.path(), &mut SilentReporter).unwrap();

    assert!(!dir.path().join("Old.tmTheme").exists());
    assert_eq!(summary.removed.len(), 1);
}

#[test]
fn test_template_directory_untouched() {
    let dir = fixture_project();
    build(dir.path(), &mut SilentReporter).unwrap();

    let entries: Vec<_> = fs::read_dir(dir.path().join("templates"))
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(
        fs::read_to_string(dir.path().join("templates/template.hidden-tmTheme")).unwrap(),
        TEMPLATE
    );
}

#[test]
fn test_build_is_idempotent() {
    let dir = fixture_project();

    build(dir.path(), &mut SilentReporter).unwrap();
    let first = fs::read(dir.path().join("Acme - Night owl.tmTheme")).unwrap();
    build(dir.path(), &mut SilentReporter).unwrap();
    let second = fs::read(dir.path().join("Acme - Night owl.tmTheme")).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_progress_events() {
    let dir = fixture_project();
    let mut reporter = RecordingReporter::default();

    build(dir.path(), &mut reporter).unwrap();

    let generating: Vec<_> = reporter
        .events
        .iter()
        .filter(|e| e.starts_with("generating"))
        .cloned()
        .collect();
    assert_eq!(
        generating,
        vec!["generating default variation", "generating night owl variation"]
    );
    assert!(reporter.events[0].starts_with("header Acme Builder: Current version: 1.4.2"));
    assert!(reporter.events[0].contains("https://github.com/centril/acme-theme"));
}

#[test]
fn test_unresolved_placeholder_is_fatal() {
    let dir = TempDir::new().unwrap();
    write_project(
        dir.path(),
        BACKGROUNDS,
        "<string>{{name}}</string>\n<string>{{fg_hex}}</string>\n",
    );

    let err = build(dir.path(), &mut SilentReporter).unwrap_err();

    match &err {
        BuildError::UnresolvedPlaceholder { token, .. } => assert_eq!(token, "{{fg_hex}}"),
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.report().contains("{{fg_hex}}"));
    assert!(theme_files(dir.path()).is_empty());
}

#[test]
fn test_missing_color_aborts_before_any_output() {
    let dir = TempDir::new().unwrap();
    write_project(
        dir.path(),
        r##"[
            { "name": "default", "color": { "rgb": "0,0,0", "hex": "#000000" } },
            { "name": "broken", "color": { "rgb": "1,1,1" } }
        ]"##,
        TEMPLATE,
    );
    fs::write(dir.path().join("Old.tmTheme"), "stale").unwrap();

    let err = build(dir.path(), &mut SilentReporter).unwrap_err();

    assert!(matches!(err, BuildError::Config { .. }));
    assert!(err.to_string().contains("color.hex"));
    // Nothing ran, so the stale file is still there
    assert_eq!(theme_files(dir.path()), vec!["Old.tmTheme"]);
}

#[test]
fn test_missing_template() {
    let dir = fixture_project();
    fs::remove_file(dir.path().join("templates/template.hidden-tmTheme")).unwrap();

    let err = build(dir.path(), &mut SilentReporter).unwrap_err();
    assert!(matches!(err, BuildError::TemplateMissing { .. }));
}

#[test]
fn test_layout_file_is_discovered() {
    let dir = fixture_project();
    fs::write(
        dir.path().join("theme-variants.toml"),
        "[paths]\noutput = \"dist\"\nstaging = \"work\"\n",
    )
    .unwrap();

    build(dir.path(), &mut SilentReporter).unwrap();

    assert_eq!(
        theme_files(&dir.path().join("dist")),
        vec!["Acme - Night owl.tmTheme", "Acme.tmTheme"]
    );
    assert!(theme_files(dir.path()).is_empty());
}

#[test]
fn test_custom_extension() {
    let dir = fixture_project();
    let layout = BuildLayout::default().with_extension(".xml");

    let summary = build_with_layout(dir.path(), layout, &mut SilentReporter).unwrap();

    assert_eq!(summary.written.len(), 2);
    assert!(dir.path().join("Acme.xml").is_file());
    assert!(dir.path().join("Acme - Night owl.xml").is_file());
}

#[test]
fn test_plan_does_not_write() {
    let dir = fixture_project();
    let project = Project::discover(dir.path()).unwrap();

    let plans = project.plan().unwrap();

    assert_eq!(plans.len(), 2);
    assert_eq!(plans[1].artifact, "Acme - Night owl");
    assert!(theme_files(dir.path()).is_empty());
}

#[test]
fn test_variant_name_cannot_escape_project() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("a/b/project");
    fs::create_dir_all(&root).unwrap();
    write_project(
        &root,
        r##"[
            { "name": "default", "color": { "rgb": "0,0,0", "hex": "#000000" } },
            { "name": "x/../../../escaped", "color": { "rgb": "1,1,1", "hex": "#010101" } }
        ]"##,
        TEMPLATE,
    );

    let err = build(&root, &mut SilentReporter).unwrap_err();

    assert!(matches!(err, BuildError::Config { .. }));
    assert!(err.to_string().contains("x/../../../escaped"));
    let mut pending = vec![dir.path().to_path_buf()];
    while let Some(current) = pending.pop() {
        for entry in fs::read_dir(&current).unwrap() {
            let path = entry.unwrap().path();
            assert!(!path.to_string_lossy().contains("escaped"), "{}", path.display());
            if path.is_dir() {
                pending.push(path);
            }
        }
    }
    assert!(theme_files(&root).is_empty());
}

#[test]
fn test_output_dir_equal_to_template_dir_is_rejected() {
    let dir = fixture_project();
    fs::write(
        dir.path().join("theme-variants.toml"),
        "[paths]\noutput = \"templates\"\n",
    )
    .unwrap();

    let err = build(dir.path(), &mut SilentReporter).unwrap_err();

    match err {
        BuildError::Config { path, message } => {
            assert_eq!(path, dir.path().join("theme-variants.toml"));
            assert!(message.contains("output directory"), "got: {}", message);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(
        fs::read_to_string(dir.path().join("templates/template.hidden-tmTheme")).unwrap(),
        TEMPLATE
    );
}
