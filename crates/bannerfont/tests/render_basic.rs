use bannerfont::{render, FigletFont, FontRepository, Justify, RenderOptions};
use pretty_assertions::assert_eq;
use std::path::Path;

fn mono() -> FigletFont {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fonts");
    FontRepository::new([dir]).load("mono").unwrap()
}

fn rows(row: &str, times: usize) -> String {
    format!("{row}\n").repeat(times)
}

#[test]
fn test_render_word() {
    let banner = render("foo", &mono(), &RenderOptions::default()).unwrap();
    assert_eq!(banner.as_str(), rows("ffoooo", 3));
    assert_eq!(banner.lines().count(), 3);
}

#[test]
fn test_render_wraps_words() {
    let opts = RenderOptions::default().with_width(10);
    let banner = mono().render("hi there", &opts).unwrap();
    let expected = rows("hhii", 3) + &rows("tthheerr", 3) + &rows("ee", 3);
    assert_eq!(banner.as_str(), expected);
}

#[test]
fn test_render_hard_blank_space() {
    let banner = mono().render("a b", &RenderOptions::default()).unwrap();
    assert_eq!(banner.as_str(), rows("aa  bb", 3));
}

#[test]
fn test_render_tagged_glyph() {
    let banner = mono().render("☺", &RenderOptions::default()).unwrap();
    assert_eq!(banner.as_str(), rows(":)", 3));
}

#[test]
fn test_render_center() {
    let opts = RenderOptions::default().with_width(12).with_justify(Justify::Center);
    let banner = mono().render("ab", &opts).unwrap();
    assert_eq!(banner.as_str(), rows("    aabb", 3));
}

#[test]
fn test_post_processing() {
    let banner = mono().render("(/", &RenderOptions::default()).unwrap();
    assert_eq!(banner.reverse().as_str(), rows("\\\\))", 3));
    assert_eq!(banner.flip().as_str(), rows("((\\\\", 3));
    assert_eq!(
        banner.normalize_surrounding_blank_lines().as_str(),
        format!("\n{}\n{}\n{}\n\n", "((//", "((//", "((//")
    );
}

#[test]
fn test_render_wraps_at_latest_space() {
    let opts = RenderOptions::default().with_width(14);
    let banner = mono().render("ab cd ef", &opts).unwrap();
    let expected = rows("aabb  ccdd", 3) + &rows("eeff", 3);
    assert_eq!(banner.as_str(), expected);
}
