//! Integration tests for the PedigreeBuilder API
//!
//! These tests drive the public pipeline from outline text to image bytes.

use std::fs;

use pedigree::{
    Document, PedigreeBuilder, PedigreeError,
    config::{AppConfig, LayoutConfig, StyleConfig},
    record::FamilyRecord,
};

const FAMILY: &str = "\
# 何氏家谱
## 字辈: 文,明,俊,永,方
- 文达
  - 明圣
    - 俊盛
      - 永盛
        - 方益
  - 明德
    - 天盛
      - 方程
";

#[test]
fn test_builder_api_exists() {
    let _builder = PedigreeBuilder::default();
}

#[test]
fn test_parse_and_render_svg() {
    let builder = PedigreeBuilder::default();
    let outline = builder.parse(FAMILY).expect("Failed to parse outline");
    let root = outline.root.expect("Outline should have a root");

    let layout = builder.layout(&root).expect("Failed to lay out");
    assert_eq!(layout.len(), 8);
    assert_eq!(layout.labels().len(), 5);

    let svg = builder
        .render_svg(&layout, outline.title.as_deref())
        .expect("Failed to render");
    assert!(svg.contains("<svg"), "Output should contain SVG tag");
    assert!(svg.contains("</svg>"), "Output should be complete SVG");
    assert!(svg.contains("何氏家谱"));
}

#[test]
fn test_render_png() {
    let builder = PedigreeBuilder::default();
    let layout = builder
        .layout(&FamilyRecord::new("文达").with_child(FamilyRecord::new("明圣")))
        .unwrap();

    let png = builder.render_png(&layout, None).unwrap();
    assert!(png.starts_with(b"\x89PNG"));
}

#[test]
fn test_outline_scenario_indentation_0_2_4_2() {
    let builder = PedigreeBuilder::default();
    let root = builder
        .parse("- root\n  - a\n    - a1\n  - b\n")
        .unwrap()
        .root
        .unwrap();
    let layout = builder.layout(&root).unwrap();

    let by_name = |name: &str| {
        layout
            .nodes()
            .find(|node| node.name() == name)
            .unwrap_or_else(|| panic!("{name} missing"))
    };
    assert_eq!(by_name("root").depth(), 0);
    assert_eq!(by_name("a").depth(), 1);
    assert_eq!(by_name("a1").depth(), 2);
    assert_eq!(by_name("b").depth(), 1);
    assert_eq!(by_name("a1").parent().unwrap().name(), "a");
    assert_eq!(by_name("b").parent().unwrap().name(), "root");
}

#[test]
fn test_parse_error_keeps_source() {
    let builder = PedigreeBuilder::default();
    let source = "- one\n- two\n";

    match builder.parse(source) {
        Err(PedigreeError::Parse { err, src }) => {
            assert_eq!(src, source);
            assert!(!err.diagnostics().is_empty());
        }
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn test_json_record() {
    let builder = PedigreeBuilder::default();
    let root = builder
        .parse_json(r#"{"name": "文达", "generations": ["文", "明"], "children": [{"name": "明圣"}]}"#)
        .unwrap();
    assert_eq!(root.count_members(), 2);
    assert_eq!(root.generations, vec!["文", "明"]);

    let err = builder
        .parse_json(r#"{"name": "文达", "children": [{"children": []}]}"#)
        .unwrap_err();
    assert!(matches!(err, PedigreeError::MalformedInput(_)));
    assert!(err.is_input_error());
}

#[test]
fn test_json_null_children_is_a_leaf() {
    let builder = PedigreeBuilder::default();
    let root = builder
        .parse_json(r#"{"name": "文达", "children": [{"name": "明圣", "children": null}]}"#)
        .unwrap();

    let layout = builder.layout(&root).unwrap();
    assert_eq!(layout.nodes().count(), 2);
}

#[test]
fn test_load_dispatches_on_extension() {
    let dir = tempfile::tempdir().unwrap();
    let builder = PedigreeBuilder::default();

    let outline_path = dir.path().join("family.md");
    fs::write(&outline_path, FAMILY).unwrap();
    let document = builder.load(&outline_path).unwrap();
    assert_eq!(document.title.as_deref(), Some("何氏家谱"));
    assert_eq!(document.root.count_members(), 8);

    let json_path = dir.path().join("family_tree.JSON");
    fs::write(&json_path, r#"{"name": "文达"}"#).unwrap();
    let document = builder.load(&json_path).unwrap();
    assert_eq!(document, Document::new(None, FamilyRecord::new("文达")));
}

#[test]
fn test_empty_outline_is_empty_tree() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.md");
    fs::write(&path, "# 空谱\n## 字辈: 文\n").unwrap();

    let err = PedigreeBuilder::default().load(&path).unwrap_err();
    assert!(matches!(err, PedigreeError::EmptyTree));
}

#[test]
fn test_missing_input_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = PedigreeBuilder::default()
        .load(&dir.path().join("missing.md"))
        .unwrap_err();
    assert!(matches!(err, PedigreeError::Io(_)));
    assert!(!err.is_input_error());
}

#[test]
fn test_render_to_file_writes_both_formats() {
    let dir = tempfile::tempdir().unwrap();
    let builder = PedigreeBuilder::default();
    let document = Document::from_outline(builder.parse(FAMILY).unwrap()).unwrap();

    let svg_path = dir.path().join("家谱.svg");
    builder.render_to_file(&document, &svg_path).unwrap();
    let svg = fs::read_to_string(&svg_path).unwrap();
    assert!(svg.starts_with("<svg"));

    let png_path = dir.path().join("家谱.PNG");
    builder.render_to_file(&document, &png_path).unwrap();
    assert!(fs::read(&png_path).unwrap().starts_with(b"\x89PNG"));

    // Only the two images, no temporary files left over
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
}

#[test]
fn test_failed_render_leaves_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let document = Document::new(None, FamilyRecord::new("文达"));

    let unsupported = dir.path().join("tree.pdf");
    let err = PedigreeBuilder::default()
        .render_to_file(&document, &unsupported)
        .unwrap_err();
    assert!(matches!(err, PedigreeError::Config(_)));

    let style = StyleConfig::default().with_background_color("no-such-color");
    let builder = PedigreeBuilder::new(AppConfig::new(LayoutConfig::default(), style));
    let target = dir.path().join("tree.svg");
    assert!(builder.render_to_file(&document, &target).is_err());

    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_failed_render_keeps_previous_output() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("tree.svg");
    fs::write(&target, "previous").unwrap();

    let document = Document::new(None, FamilyRecord::new("  "));
    let err = PedigreeBuilder::default()
        .render_to_file(&document, &target)
        .unwrap_err();
    assert!(matches!(err, PedigreeError::MalformedInput(_)));
    assert_eq!(fs::read_to_string(&target).unwrap(), "previous");
}

#[test]
fn test_invalid_layout_config_is_rejected() {
    let layout = LayoutConfig::default().with_horizontal_spacing(-1.0);
    let builder = PedigreeBuilder::new(AppConfig::new(layout, StyleConfig::default()));

    let err = builder.layout(&FamilyRecord::new("文达")).unwrap_err();
    assert!(matches!(err, PedigreeError::Config(_)));
}
