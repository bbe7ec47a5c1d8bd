//! Integration tests for the versegrid pipeline

use std::fs;
use std::path::{Path, PathBuf};

use versegrid::prelude::*;
use versegrid_core::bytes::map_bytes;
use versegrid_unicode::ArabicShaper;

/// A scratch directory unique to this test process and test name
fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("versegrid_it_{}_{}", std::process::id(), name));
    if let Err(e) = fs::create_dir_all(&dir) {
        unreachable!("cannot create {}: {e}", dir.display());
    }
    dir
}

fn write_corpus(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("corpus.txt");
    if let Err(e) = fs::write(&path, content) {
        unreachable!("cannot write {}: {e}", path.display());
    }
    path
}

/// Decode by content sniffing, whatever the extension says
fn decode_gray(path: &Path) -> image::GrayImage {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => unreachable!("cannot read {}: {e}", path.display()),
    };
    match image::load_from_memory(&bytes) {
        Ok(img) => img.to_luma8(),
        Err(e) => unreachable!("cannot decode {}: {e}", path.display()),
    }
}

#[test]
fn test_scenario_corpus() {
    let dir = scratch("scenario");
    let input = write_corpus(&dir, "1|1|AB\n1|2|CD\nx|y\n");
    let output = dir.join("out.png");

    let vis = match visualize(&input, &output) {
        Some(vis) => vis,
        None => unreachable!("scenario corpus failed"),
    };

    assert_eq!(vis.grid.dimensions(), (2, 3));
    let rows: Vec<&[u8]> = vis.grid.rows().collect();
    let expected: Vec<&[u8]> = vec![&[65, 66, 32][..], &[67, 68, 0][..]];
    assert_eq!(rows, expected);
    assert_eq!(vis.grid.content(), b"AB CD");

    // min 0 (padding) and max 68 stretch to 0 and 255
    assert_eq!(vis.image.data, vec![243, 247, 120, 251, 255, 0]);

    let written = decode_gray(&output);
    assert_eq!(written.dimensions(), (3, 2));
    assert_eq!(written.into_raw(), vis.image.data);
    assert_eq!(fs::metadata(&output).map(|m| m.len() as usize).ok(), Some(vis.encoded_len));
}

#[test]
fn test_empty_corpus_yields_nothing() {
    let dir = scratch("empty");
    let input = write_corpus(&dir, "");
    let output = dir.join("out.png");

    assert!(visualize(&input, &output).is_none());
    assert!(!output.exists());

    match try_visualize(&input, &output, &Options::default()) {
        Ok(_) => unreachable!("empty corpus produced an image"),
        Err(e) => assert_eq!(e.kind(), ErrorKind::EmptyContent),
    }
}

#[test]
fn test_only_malformed_lines_is_empty() {
    let dir = scratch("malformed");
    let input = write_corpus(&dir, "no delimiters\na|b\na|b|c|d\n");
    let output = dir.join("out.png");

    match try_visualize(&input, &output, &Options::default()) {
        Ok(_) => unreachable!("malformed corpus produced an image"),
        Err(e) => assert_eq!(e.kind(), ErrorKind::EmptyContent),
    }
}

#[test]
fn test_missing_input() {
    let dir = scratch("missing");
    let input = dir.join("does_not_exist.txt");
    let output = dir.join("out.png");

    assert!(visualize(&input, &output).is_none());
    match try_visualize(&input, &output, &Options::default()) {
        Ok(_) => unreachable!("missing input produced an image"),
        Err(e) => assert_eq!(e.kind(), ErrorKind::InputAccess),
    }
}

#[test]
fn test_report_passes_the_outcome_through() {
    let dir = scratch("report");
    let input = write_corpus(&dir, "1|1|AB\n1|2|CD\n");
    let output = dir.join("out.pgm");

    let vis = report(try_visualize(&input, &output, &Options::default()), &output, true);
    assert_eq!(vis.map(|vis| vis.grid.dimensions()), Some((2, 3)));

    let missing = dir.join("absent.txt");
    for quiet in [false, true] {
        let result = try_visualize(&missing, &output, &Options::default());
        assert!(report(result, &output, quiet).is_none());
    }
}

#[test]
fn test_unknown_output_extension() {
    let dir = scratch("extension");
    let input = write_corpus(&dir, "1|1|AB\n");
    let output = dir.join("out.svg");

    assert!(visualize(&input, &output).is_none());
    assert!(!output.exists());
}

#[test]
fn test_unwritable_output() {
    let dir = scratch("unwritable");
    let input = write_corpus(&dir, "1|1|AB\n");
    let output = dir.join("no_such_dir").join("out.png");

    match try_visualize(&input, &output, &Options::default()) {
        Ok(_) => unreachable!("wrote into a missing directory"),
        Err(e) => assert_eq!(e.kind(), ErrorKind::OutputWrite),
    }
}

#[test]
fn test_uniform_corpus_is_black() {
    let dir = scratch("uniform");
    let input = write_corpus(&dir, "1|1|AAAA\n");
    let output = dir.join("out.png");

    let vis = match visualize(&input, &output) {
        Some(vis) => vis,
        None => unreachable!("uniform corpus failed"),
    };
    assert_eq!(vis.grid.dimensions(), (2, 2));
    assert_eq!(vis.image.data, vec![0; 4]);
    assert!(output.exists());
}

#[test]
fn test_uniform_corpus_can_fail() {
    let dir = scratch("uniform_error");
    let input = write_corpus(&dir, "1|1|AAAA\n");
    let output = dir.join("out.png");
    let options = Options {
        render_params: RenderParams {
            uniform: UniformPolicy::Error,
        },
        ..Options::default()
    };

    match try_visualize(&input, &output, &options) {
        Ok(_) => unreachable!("uniform grid accepted under the error policy"),
        Err(e) => assert_eq!(e.kind(), ErrorKind::DegenerateGrid),
    }
    assert!(visualize_with(&input, &output, &options).is_none());
}

#[test]
fn test_arabic_byte_count_matches_shaped_text() {
    let dir = scratch("arabic");
    let verses = [
        "\u{0628}\u{0650}\u{0633}\u{0652}\u{0645}\u{0650} \u{0627}\u{0644}\u{0644}\u{0651}\u{064E}\u{0647}\u{0650}",
        "\u{0627}\u{0644}\u{0652}\u{062D}\u{064E}\u{0645}\u{0652}\u{062F}\u{064F}",
    ];
    let input = write_corpus(
        &dir,
        &format!("1|1|{}\n1|2|{}\n", verses[0], verses[1]),
    );
    let output = dir.join("out.png");

    let vis = match try_visualize(&input, &output, &Options::default()) {
        Ok(vis) => vis,
        Err(e) => unreachable!("arabic corpus failed: {e}"),
    };

    let shaped = ArabicShaper::new().shape_text(&verses.join(" "), &ShapingParams::default());
    assert_eq!(vis.grid.len(), shaped.chars().count());
    assert_eq!(vis.grid.content(), map_bytes(&shaped).as_slice());

    let (h, w) = vis.grid.dimensions();
    let cells = h as usize * w as usize;
    assert!(cells >= vis.grid.len());
    assert!(cells - vis.grid.len() < h as usize);
}

#[test]
fn test_shaping_changes_bytes() {
    let dir = scratch("no_shaping");
    let input = write_corpus(&dir, "1|1|\u{0628}\u{0633}\u{0645}\n");

    let shaped = match try_visualize(&input, &dir.join("a.png"), &Options::default()) {
        Ok(vis) => vis,
        Err(e) => unreachable!("shaped run failed: {e}"),
    };
    let raw = match try_visualize(
        &input,
        &dir.join("b.png"),
        &Options {
            shaping: false,
            ..Options::default()
        },
    ) {
        Ok(vis) => vis,
        Err(e) => unreachable!("unshaped run failed: {e}"),
    };

    // Logical beh seen meem: 0x0628 0x0633 0x0645
    assert_eq!(raw.grid.content(), &[0x28, 0x33, 0x45]);
    // Visual final meem, medial seen, initial beh: FEE2 FEB4 FE91
    assert_eq!(shaped.grid.content(), &[0xE2, 0xB4, 0x91]);
}

#[test]
fn test_forced_grid_height() {
    let dir = scratch("height");
    let input = write_corpus(&dir, "1|1|ABCDEFG\n");
    let output = dir.join("out.pgm");
    let options = Options {
        grid_height: Some(1),
        ..Options::default()
    };

    let vis = match try_visualize(&input, &output, &options) {
        Ok(vis) => vis,
        Err(e) => unreachable!("forced height failed: {e}"),
    };
    assert_eq!(vis.grid.dimensions(), (1, 7));

    let bytes = match fs::read(&output) {
        Ok(bytes) => bytes,
        Err(e) => unreachable!("cannot read {}: {e}", output.display()),
    };
    assert!(bytes.starts_with(b"P5\n7 1\n255\n"));
}

#[test]
fn test_grid_height_beyond_content_is_rejected() {
    let dir = scratch("tall_height");
    let input = write_corpus(&dir, "1|1|AB\n");
    let output = dir.join("out.png");
    let options = Options {
        grid_height: Some(4_000_000_000),
        ..Options::default()
    };

    match try_visualize(&input, &output, &options) {
        Ok(_) => unreachable!("height far beyond the content accepted"),
        Err(e) => assert_eq!(e.kind(), ErrorKind::DegenerateGrid),
    }
    assert!(!output.exists());
}

#[test]
fn test_zero_grid_height_is_rejected() {
    let dir = scratch("zero_height");
    let input = write_corpus(&dir, "1|1|AB\n");
    let options = Options {
        grid_height: Some(0),
        ..Options::default()
    };

    match try_visualize(&input, &dir.join("out.png"), &options) {
        Ok(_) => unreachable!("zero height accepted"),
        Err(e) => assert_eq!(e.kind(), ErrorKind::DegenerateGrid),
    }
}

#[test]
fn test_other_formats() {
    let dir = scratch("formats");
    let input = write_corpus(&dir, "1|1|AB\n1|2|CD\n");

    for name in ["out.bmp", "out.tiff", "out.tif", "out.PNG"] {
        let output = dir.join(name);
        let vis = match try_visualize(&input, &output, &Options::default()) {
            Ok(vis) => vis,
            Err(e) => unreachable!("{name}: {e}"),
        };
        let written = decode_gray(&output);
        assert_eq!(written.into_raw(), vis.image.data, "{name}");
    }

    // Lossy or palette formats: only the shape is checked
    for name in ["out.jpg", "out.jpeg", "out.gif"] {
        let output = dir.join(name);
        let vis = match try_visualize(&input, &output, &Options::default()) {
            Ok(vis) => vis,
            Err(e) => unreachable!("{name}: {e}"),
        };
        let written = decode_gray(&output);
        assert_eq!(written.dimensions(), (vis.image.width, vis.image.height), "{name}");
    }
}
