use bannerfont::{FigletFont, FontError, ParseError, PrintDirection, SmushMode};
use std::path::Path;

fn fixture(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fonts").join(name)
}

#[test]
fn test_zipped_equals_plain() {
    let plain = FigletFont::load(&fixture("mono.flf")).unwrap();
    let zipped = FigletFont::load(&fixture("mono_zipped.flf")).unwrap();
    assert_eq!(plain.header(), zipped.header());
    assert_eq!(plain.glyph_count(), zipped.glyph_count());
    // space, printable ASCII, four of the Deutsch letters and one tagged glyph
    assert_eq!(plain.glyph_count(), 100);
    assert_eq!(zipped.name(), "mono_zipped");
}

#[test]
fn test_header_values() {
    let font = FigletFont::load(&fixture("mono.flf")).unwrap();
    assert_eq!(font.hard_blank(), '$');
    assert_eq!(font.height(), 3);
    assert_eq!(font.baseline(), 3);
    assert_eq!(font.max_length(), 4);
    assert_eq!(font.print_direction(), PrintDirection::LeftToRight);
    assert_eq!(font.smush_mode(), SmushMode::KERN);
    assert!(font.comment().starts_with("mono:"));
}

#[test]
fn test_glyphs() {
    let font = FigletFont::load(&fixture("mono.flf")).unwrap();
    let at = font.glyph('@').unwrap();
    assert_eq!(at.row(0).as_deref(), Some("@@"));
    assert_eq!(font.glyph(' ').unwrap().row(2).as_deref(), Some("$$"));
    assert!(!font.has_char('Ä'));
    assert!(font.has_char('ß'));
    assert_eq!(font.glyph('☺').unwrap().row(1).as_deref(), Some(":)"));
    assert!(font.chars().all(|c| font.glyph(c).unwrap().width() == 2));
}

#[test]
fn test_invalid_utf8_is_tolerated() {
    let mut bytes = std::fs::read(fixture("mono.flf")).unwrap();
    let comment_start = bytes.iter().position(|&b| b == b'\n').unwrap() + 1;
    bytes[comment_start] = 0xFF;
    let font = FigletFont::from_bytes("lossy", &bytes).unwrap();
    assert!(font.comment().starts_with('\u{FFFD}'));
}

#[test]
fn test_broken_zip() {
    let err = FigletFont::from_bytes("junk", b"PK\x03\x04 definitely not a zip").unwrap_err();
    assert!(matches!(
        err,
        FontError::Parse {
            source: ParseError::Zip(_),
            ..
        }
    ));
}
