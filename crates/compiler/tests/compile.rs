//! End-to-end builds from archive entries to decoded fonts

use chrono::{TimeZone, Utc};
use glyphpress_compiler::{
    ArchiveEntry, BuildFailure, BuildStatus, CancelToken, CompileOptions, Compiler, FailureReason,
};
use glyphpress_core::Codepoint;
use glyphpress_font_builder::verify_checksums;
use read_fonts::{
    FontRef, TableProvider,
    tables::glyf::Glyph,
    types::{GlyphId, GlyphId16},
};

const SQUARE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
  <path d="M10 10 H90 V90 H10 Z"/>
</svg>"#;

const RING: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
  <path fill-rule="evenodd" d="M20 30 H80 V100 H20 Z M35 45 V85 H65 V45 Z"/>
</svg>"#;

fn options() -> CompileOptions {
    CompileOptions::new()
        .timestamp(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap())
        .max_workers(2)
}

fn entry(name: &str, data: &str) -> ArchiveEntry {
    ArchiveEntry::new(name, data.as_bytes().to_vec())
}

fn simple_glyph<'a>(font: &FontRef<'a>, gid: u32) -> Option<read_fonts::tables::glyf::SimpleGlyph<'a>> {
    let glyf = font.glyf().unwrap();
    let loca = font.loca(None).unwrap();
    match loca.get_glyf(GlyphId::new(gid), &glyf).unwrap() {
        Some(Glyph::Simple(glyph)) => Some(glyph),
        _ => None,
    }
}

#[test]
fn test_two_glyph_archive() {
    let _ = env_logger::builder().is_test(true).try_init();

    let entries = vec![
        entry("glyph_97.svg", RING),
        entry("__MACOSX/", ""),
        entry("glyph_65.svg", SQUARE),
        entry("README.txt", "drawn with a tablet"),
    ];
    let (artifact, report) = Compiler::new(options()).compile(entries);
    let artifact = artifact.expect("font");

    assert_eq!(report.status(), BuildStatus::Success);
    assert!(report.issues.is_empty());
    assert_eq!(
        report.succeeded.iter().copied().collect::<Vec<_>>(),
        vec![Codepoint::from('A'), Codepoint::from('a')]
    );
    assert!(report.failed_code_points().is_empty());

    verify_checksums(artifact.bytes()).unwrap();
    let font = FontRef::new(artifact.bytes()).unwrap();
    assert_eq!(font.maxp().unwrap().num_glyphs(), 3);
    let cmap = font.cmap().unwrap();
    assert_eq!(cmap.map_codepoint(0x41u32), Some(GlyphId::new(1)));
    assert_eq!(cmap.map_codepoint(0x61u32), Some(GlyphId::new(2)));

    let square = simple_glyph(&font, 1).expect("outline for A");
    assert_eq!(square.number_of_contours(), 1);
    assert_eq!((square.x_min(), square.y_min(), square.x_max(), square.y_max()), (50, -100, 850, 700));
    assert_eq!(font.hmtx().unwrap().h_metrics()[1].advance.get(), 900);

    let ring = simple_glyph(&font, 2).expect("outline for a");
    assert_eq!(ring.number_of_contours(), 2);
    assert_eq!(ring.y_min(), -200);
    assert_eq!(ring.y_max(), 500);

    let post = font.post().unwrap();
    assert_eq!(post.glyph_name(GlyphId16::new(2)), Some("uni0061"));
}

#[test]
fn test_partial_failures_are_reported() {
    let entries = vec![
        entry("glyph_65.svg", SQUARE),
        entry("glyph_065.svg", RING),
        entry("glyph_66.svg", "<svg viewBox=\"0 0 100 100\"><path d=\"M0 0 L"),
        ArchiveEntry::new("glyph_67.png", vec![0x89, b'P', b'N', b'G']),
        entry("glyph_1114112.svg", SQUARE),
        entry("glyph_68.svg", r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100"/>"#),
    ];
    let (artifact, report) = Compiler::new(options()).compile(entries);
    let artifact = artifact.expect("font");
    assert_eq!(report.status(), BuildStatus::Partial);
    assert!(report.fatal.is_none());

    let reasons: Vec<(&str, Option<u32>)> =
        report.issues.iter().map(|i| (i.entry_name.as_str(), i.code_point)).collect();
    assert_eq!(
        reasons,
        vec![
            ("glyph_065.svg", Some(65)),
            ("glyph_1114112.svg", Some(0x110000)),
            ("glyph_66.svg", Some(66)),
            ("glyph_67.png", Some(67)),
            ("glyph_68.svg", Some(68)),
        ]
    );
    assert_eq!(
        report.issues[0].reason,
        FailureReason::DuplicateCodePoint { kept: "glyph_65.svg".to_string() }
    );
    assert!(matches!(report.issues[2].reason, FailureReason::MalformedOutline(_)));
    assert!(matches!(report.issues[3].reason, FailureReason::UnsupportedFormat(_)));
    assert_eq!(report.issues[4].reason, FailureReason::DegenerateOutline);

    let failed: Vec<u32> = report.failed_code_points().into_keys().collect();
    assert_eq!(failed, vec![66, 67, 0x110000]);
    assert_eq!(
        report.succeeded.iter().map(|cp| cp.to_u32()).collect::<Vec<_>>(),
        vec![65, 68]
    );

    // The blank glyph is mapped, the failed ones are not.
    let font = FontRef::new(artifact.bytes()).unwrap();
    let cmap = font.cmap().unwrap();
    assert_eq!(cmap.map_codepoint(68u32), Some(GlyphId::new(2)));
    assert_eq!(cmap.map_codepoint(66u32), None);
    assert_eq!(cmap.map_codepoint(67u32), None);
    assert_eq!(font.maxp().unwrap().num_glyphs(), 3);
    assert!(simple_glyph(&font, 2).is_none());
}

#[test]
fn test_empty_archive_is_fatal() {
    let entries = vec![entry("notes.txt", "hello"), entry("glyph_5.svg", SQUARE)];
    let (artifact, report) = Compiler::new(options()).compile(entries);
    assert!(artifact.is_none());
    assert_eq!(report.status(), BuildStatus::Failure);
    assert_eq!(report.fatal, Some(BuildFailure::EmptyArchive { entries: 2, rejected: 1 }));
    assert_eq!(report.issues.len(), 1);
    assert!(report.succeeded.is_empty());

    let (artifact, report) = Compiler::new(options()).compile(Vec::new());
    assert!(artifact.is_none());
    assert!(matches!(report.fatal, Some(BuildFailure::EmptyArchive { entries: 0, .. })));
}

#[test]
fn test_only_raster_sources_still_build() {
    let entries = vec![ArchiveEntry::new("glyph_65.png", vec![0x89, b'P', b'N', b'G'])];
    let (artifact, report) = Compiler::new(options()).compile(entries);
    let artifact = artifact.expect("font with only .notdef");
    assert_eq!(artifact.glyph_count(), 1);
    assert_eq!(report.status(), BuildStatus::Partial);
    assert!(report.succeeded.is_empty());
}

#[test]
fn test_kept_duplicate_failure_is_reported() {
    let entries = vec![
        ArchiveEntry::new("glyph_65.png", vec![0x89, b'P', b'N', b'G']),
        entry("glyph_65.svg", SQUARE),
        entry("glyph_66.svg", SQUARE),
    ];
    let (artifact, report) = Compiler::new(options()).compile(entries);
    assert!(artifact.is_some());
    assert_eq!(
        report.issues[0].reason,
        FailureReason::DuplicateCodePoint { kept: "glyph_65.png".to_string() }
    );

    let failed = report.failed_code_points();
    assert_eq!(failed.len(), 1);
    assert!(matches!(failed[&65], FailureReason::UnsupportedFormat(_)));
}

#[test]
fn test_builds_are_reproducible() {
    let entries = || {
        vec![
            entry("glyph_97.svg", RING),
            entry("glyph_65.svg", SQUARE),
            entry("glyph_66.svg", SQUARE),
            entry("glyph_67.svg", RING),
        ]
    };
    let compiler = Compiler::new(options());
    let (first, _) = compiler.compile(entries());
    let (second, _) = compiler.compile(entries().into_iter().rev());
    assert_eq!(first.unwrap().bytes(), second.unwrap().bytes());

    let single = Compiler::new(options().max_workers(1));
    let (third, _) = single.compile(entries());
    assert_eq!(
        third.unwrap().bytes(),
        compiler.compile(entries()).0.unwrap().bytes()
    );
}

#[test]
fn test_cancelled_build_has_no_font() {
    let cancel = CancelToken::new();
    cancel.cancel();
    let (artifact, report) =
        Compiler::new(options()).compile_with_cancel(vec![entry("glyph_65.svg", SQUARE)], &cancel);
    assert!(artifact.is_none());
    assert_eq!(report.fatal, Some(BuildFailure::Cancelled));
    assert_eq!(report.status(), BuildStatus::Failure);
}

#[test]
fn test_concurrent_builds_share_a_compiler() {
    let compiler = Compiler::new(options());
    let fonts: Vec<Vec<u8>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    let (artifact, _) = compiler.compile(vec![entry("glyph_65.svg", SQUARE)]);
                    artifact.unwrap().into_bytes()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert!(fonts.windows(2).all(|pair| pair[0] == pair[1]));
}
