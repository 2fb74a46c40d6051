use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

fn fonts_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../bannerfont/tests/fonts")
}

fn bannerfont() -> Command {
    let mut cmd = Command::cargo_bin("bannerfont").unwrap();
    cmd.env_remove("BANNERFONT_PATH");
    cmd
}

#[test]
fn render_from_font_dir() {
    bannerfont()
        .args(["render", "--font", "mono", "--font-dir"])
        .arg(fonts_dir())
        .arg("hi")
        .assert()
        .success()
        .stdout("hhii\nhhii\nhhii\n");
}

#[test]
fn render_joins_words_and_justifies() {
    bannerfont()
        .args(["render", "-f", "mono", "-w", "12", "-j", "right", "--font-dir"])
        .arg(fonts_dir())
        .args(["a", "b"])
        .assert()
        .success()
        .stdout("     aa  bb\n".repeat(3));
}

#[test]
fn render_uses_env_path() {
    bannerfont()
        .env("BANNERFONT_PATH", fonts_dir())
        .args(["render", "--font", "mono_zipped", "--reverse", "(x"])
        .assert()
        .success()
        .stdout("xx))\n".repeat(3));
}

#[test]
fn render_normalized() {
    bannerfont()
        .args(["render", "--font", "mono", "--normalize", "--font-dir"])
        .arg(fonts_dir())
        .arg("o")
        .assert()
        .success()
        .stdout("\noo\noo\noo\n\n");
}

#[test]
fn missing_font_fails() {
    bannerfont()
        .args(["render", "--font", "nope", "hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("font not found: nope"));
}

#[test]
fn too_narrow_fails() {
    bannerfont()
        .args(["render", "--font", "mono", "-w", "2", "--font-dir"])
        .arg(fonts_dir())
        .arg("x")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be printed within 2 columns"));
}

#[test]
fn list_fonts() {
    bannerfont()
        .arg("list")
        .arg("--font-dir")
        .arg(fonts_dir())
        .assert()
        .success()
        .stdout("mono\nmono_zipped\n");
}

#[test]
fn info_short() {
    bannerfont()
        .args(["info", "--font", "mono", "--short", "--font-dir"])
        .arg(fonts_dir())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("mono: a three-row kerning font"));
}
