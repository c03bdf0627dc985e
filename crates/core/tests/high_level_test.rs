//! Tests for the high-level rendering API:
//! - render_text() - render to a String
//! - render_text_to_fp() - render to a writer
//! - write_text_file() - atomic file output
//! - GridBuilder - fluent configuration

use std::fs;
use std::io::Cursor;

use gridscribe_core::api::{
    ComposeOptions, GridBuilder, PARALLEL_MIN_WORDS, render_text, render_text_to_fp,
    write_text_file,
};
use gridscribe_core::layout::GridParams;
use gridscribe_core::{BBox, OcrWord, SourceFrame};
use tempfile::tempdir;

fn words() -> Vec<OcrWord> {
    vec![
        OcrWord::new("Hi", BBox::new(100.0, 100.0, 140.0, 120.0)),
        OcrWord::new("there", BBox::new(200.0, 100.0, 260.0, 120.0)),
    ]
}

fn frame() -> SourceFrame {
    SourceFrame::new(1000, 500).unwrap()
}

// ============================================================================
// render_text
// ============================================================================

#[test]
fn test_render_text_defaults() {
    let text = render_text(&words(), frame(), None).unwrap();
    assert_eq!(text.lines().count(), 60);
    assert!(text.ends_with('\n'));
    // 200 * 120 / 1000 = 24
    assert_eq!(
        text.lines().nth(14),
        Some(format!("{}Hi{}there", " ".repeat(12), " ".repeat(10)).as_str())
    );
}

#[test]
fn test_render_text_custom_grid() {
    let options = ComposeOptions {
        params: GridParams::new(40, 5).unwrap(),
        threads: None,
    };
    let text = render_text(&words(), frame(), Some(options)).unwrap();
    assert_eq!(text, "\n    Hi  there\n\n\n\n");
}

#[test]
fn test_render_text_parallel_large_input() {
    let many: Vec<OcrWord> = (0..PARALLEL_MIN_WORDS * 2)
        .map(|i| {
            let x = (i * 37 % 1000) as f64;
            let y = (i * 53 % 500) as f64;
            OcrWord::new(format!("w{i}"), BBox::new(x, y, x + 20.0, y))
        })
        .collect();

    let sequential = render_text(&many, frame(), None).unwrap();
    let parallel = render_text(
        &many,
        frame(),
        Some(ComposeOptions {
            params: GridParams::default(),
            threads: Some(0),
        }),
    )
    .unwrap();
    assert_eq!(sequential, parallel);
}

// ============================================================================
// render_text_to_fp
// ============================================================================

#[test]
fn test_render_text_to_fp() {
    let mut output = Cursor::new(Vec::new());
    render_text_to_fp(&words(), frame(), &mut output, None).unwrap();
    let text = String::from_utf8(output.into_inner()).unwrap();
    assert_eq!(text, render_text(&words(), frame(), None).unwrap());
}

#[test]
fn test_render_text_to_fp_invalid_frame_writes_nothing() {
    let mut output = Vec::new();
    let bad = SourceFrame {
        width: 0,
        height: 500,
    };
    assert!(render_text_to_fp(&words(), bad, &mut output, None).is_err());
    assert!(output.is_empty());
}

// ============================================================================
// write_text_file
// ============================================================================

#[test]
fn test_write_text_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.txt");
    write_text_file(&words(), frame(), &path, None).unwrap();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        render_text(&words(), frame(), None).unwrap()
    );
    // no temporary files left behind
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_write_text_file_failure_creates_nothing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.txt");
    let options = ComposeOptions {
        params: GridParams {
            width: 0,
            height: 60,
        },
        threads: None,
    };
    assert!(write_text_file(&words(), frame(), &path, Some(options)).is_err());
    assert!(!path.exists());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_write_text_file_failure_keeps_existing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.txt");
    fs::write(&path, "previous").unwrap();
    let bad = SourceFrame {
        width: 1000,
        height: 0,
    };
    assert!(write_text_file(&words(), bad, &path, None).is_err());
    assert_eq!(fs::read_to_string(&path).unwrap(), "previous");
}

// ============================================================================
// GridBuilder
// ============================================================================

#[test]
fn test_builder_render_matches_render_text() {
    let builder = GridBuilder::new(frame()).width(40).height(5);
    let options = builder.build_options();
    assert_eq!(
        builder.render(&words()).unwrap(),
        render_text(&words(), frame(), Some(options)).unwrap()
    );
}

#[test]
fn test_builder_write_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("layout.txt");
    GridBuilder::new(frame())
        .params(GridParams::new(40, 5).unwrap())
        .write_file(&words(), &path)
        .unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "\n    Hi  there\n\n\n\n");
}

#[test]
fn test_builder_compose_returns_grid() {
    let grid = GridBuilder::new(frame()).compose(&words()).unwrap();
    assert_eq!(grid.width(), 120);
    assert_eq!(grid.height(), 60);
    assert_eq!(grid.filled_cells(), 7);
}
