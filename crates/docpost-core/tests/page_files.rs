//! Integration tests for the file transforms on realistic converter output.

use docpost_core::{
    Document, Error, Placement, PositionalId, PostProcessConfig, ScriptMode, Substitution,
    add_script_to_file, post_process_file,
};
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Three pages shaped like pdf2htmlEX output.
const CONVERTED_PAGE: &str = r#"<!DOCTYPE html>
<html xmlns="http://www.w3.org/1999/xhtml">
<head>
<meta charset="utf-8"/>
<script>try{pdf2htmlEX.defaultViewer = new pdf2htmlEX.Viewer({});}catch(e){}</script>
<script src="compatibility.min.js"></script>
<title>liberty07_03</title>
</head>
<body>
<div id="sidebar"><div id="outline"></div></div>
<div id="page-container">
<div id="pf1" class="pf w0 h0" data-page-no="1"><div class="pc pc1 w0 h0"><img class="bi x0 y0 w1 h1" alt="" src="bg1.png"/><div class="t m0 x1 h2 y1 ff1 fs0 fc0 sc0 ls0 ws0">Liberty</div><div class="t m0 x2 h3 y2 ff2 fs1 fc0 sc0 ls0 ws0">Reference</div></div><div class="pi" data-data='{"ctm":[1,0,0,1,0,0]}'></div></div>
<div id="pf2" class="pf w0 h0" data-page-no="2"><div class="pc pc2 w0 h0"><div class="t m0 x3 h4 y3 ff1 fs2 fc1 sc0 ls0 ws0">Contents</div></div></div>
<div id="pf3" class="pf w0 h0" data-page-no="3"><div class="pc pc3 w0 h0"><div class="t m0 x8 h5 y2899 ff1 fs2 fc2 sc0 ls0 ws0">timing</div><div class="t m0 x8 h5 y2900 ff1 fs2 fc2 sc0 ls0 ws0">group</div><div class="t m0 x9 h5 y2901 ff1 fs2 fc2 sc0 ls0 ws0">pin</div></div></div>
</div>
<div class="loading-indicator"></div>
</body>
</html>
"#;

fn write_page(dir: &TempDir, html: &str) -> PathBuf {
    let path = dir.path().join("liberty07_03.html");
    fs::write(&path, html).unwrap();
    path
}

#[test]
fn test_post_process_assigns_distinct_positional_ids() {
    let dir = TempDir::new().unwrap();
    let path = write_page(&dir, CONVERTED_PAGE);

    let report =
        post_process_file(&path, &PostProcessConfig::default(), ScriptMode::Append).unwrap();
    assert_eq!(report.ids_assigned, 6);
    assert_eq!(report.pages, 3);
    assert_eq!(report.file.as_deref(), Some(path.as_path()));

    let html = fs::read_to_string(&path).unwrap();
    for id in ["1.0", "1.1", "2.0", "3.0", "3.1", "3.2"] {
        assert!(html.contains(&format!(r#"id="{id}""#)), "missing id {id}");
    }
    // The page wrapper ids stay untouched.
    assert!(html.contains(r#"id="pf3""#));
}

#[test]
fn test_ids_follow_page_and_item_position() {
    let doc = Document::parse(CONVERTED_PAGE);
    let ids = doc.assign_positional_ids("page-container").unwrap();

    let unique: HashSet<_> = ids.iter().collect();
    assert_eq!(unique.len(), ids.len());

    let expected = [(0, 0), (0, 1), (1, 0), (2, 0), (2, 1), (2, 2)];
    for (id, (page, item)) in ids.iter().zip(expected) {
        assert_eq!(*id, PositionalId::new(page, item));
        assert_eq!(id.to_string(), format!("{}.{item}", page + 1));
    }
}

#[test]
fn test_replace_all_leaves_exactly_three_scripts() {
    let dir = TempDir::new().unwrap();
    let html = CONVERTED_PAGE.replace(
        "<div class=\"loading-indicator\"></div>",
        "<div class=\"loading-indicator\"></div><script src=\"pdf2htmlEX.min.js\"></script>",
    );
    let path = write_page(&dir, &html);
    assert_eq!(Document::read(&path).unwrap().script_count(), 3);

    let report =
        post_process_file(&path, &PostProcessConfig::default(), ScriptMode::ReplaceAll).unwrap();
    assert_eq!(report.scripts_removed, 3);

    let doc = Document::read(&path).unwrap();
    assert_eq!(doc.script_count(), 3);
    assert_eq!(doc.script_sources(Placement::Body).unwrap(), vec!["highlight.js"]);
    assert_eq!(
        doc.script_sources(Placement::Head).unwrap(),
        vec!["iframe.js", "switch.js"]
    );

    let written = fs::read_to_string(&path).unwrap();
    for old in ["compatibility.min.js", "pdf2htmlEX.min.js", "defaultViewer"] {
        assert!(!written.contains(old), "{old} should be gone");
    }
}

#[test]
fn test_failed_post_process_leaves_file_untouched() {
    let dir = TempDir::new().unwrap();
    let broken = CONVERTED_PAGE.replace(
        r#"<div class="pc pc2 w0 h0"><div class="t m0 x3 h4 y3 ff1 fs2 fc1 sc0 ls0 ws0">Contents</div></div>"#,
        "<span>blank page</span>",
    );
    let path = write_page(&dir, &broken);

    let err =
        post_process_file(&path, &PostProcessConfig::default(), ScriptMode::Append).unwrap_err();
    assert!(matches!(err, Error::MissingFirstChild { page: 2 }));
    assert_eq!(fs::read_to_string(&path).unwrap(), broken);
}

#[test]
fn test_post_process_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = post_process_file(
        &dir.path().join("absent.html"),
        &PostProcessConfig::default(),
        ScriptMode::Append,
    )
    .unwrap_err();
    assert!(err.is_io_error());
}

#[test]
fn test_add_js_twice_inserts_two_scripts() {
    let dir = TempDir::new().unwrap();
    let path = write_page(&dir, CONVERTED_PAGE);
    let substitution = Substitution::default();

    add_script_to_file(&path, &substitution).unwrap();
    add_script_to_file(&path, &substitution).unwrap();

    let html = fs::read_to_string(&path).unwrap();
    assert_eq!(html.matches(r#"<script src="highlight.js"></script>"#).count(), 2);
    assert_eq!(html.matches("</body>").count(), 1);
}

#[test]
fn test_add_js_without_marker_keeps_content() {
    let dir = TempDir::new().unwrap();
    let fragment = "<div>fragment without body</div>";
    let path = write_page(&dir, fragment);

    let report = add_script_to_file(&path, &Substitution::default()).unwrap();
    assert_eq!(report.replacements, 0);
    assert_eq!(fs::read_to_string(&path).unwrap(), fragment);
}
