//! Test support utilities for bannerfont.
//!
//! [`FontSource`] writes small FIGlet font files in memory so tests can
//! describe just the glyphs they care about. Not part of the stable API.

use crate::{
    font::{FigletFont, DEUTSCH_CHARS},
    Result,
};
use std::collections::BTreeMap;

/// Builder for the text of a `.flf` font.
///
/// Glyphs that are not given are written as empty blocks and are therefore
/// absent from the parsed font (space excepted).
#[derive(Clone, Debug)]
pub struct FontSource {
    height: usize,
    hard_blank: char,
    old_layout: i64,
    full_layout: Option<i64>,
    print_direction: Option<i64>,
    comments: Vec<String>,
    glyphs: BTreeMap<char, Vec<String>>,
}

impl FontSource {
    pub fn new(height: usize) -> Self {
        Self {
            height,
            hard_blank: '$',
            old_layout: 0,
            full_layout: None,
            print_direction: None,
            comments: Vec::new(),
            glyphs: BTreeMap::new(),
        }
    }

    pub fn hard_blank(mut self, ch: char) -> Self {
        self.hard_blank = ch;
        self
    }

    pub fn old_layout(mut self, layout: i64) -> Self {
        self.old_layout = layout;
        self
    }

    /// Sets the full layout header field.
    pub fn layout(mut self, layout: i64) -> Self {
        self.full_layout = Some(layout);
        self
    }

    pub fn print_direction(mut self, direction: i64) -> Self {
        self.print_direction = Some(direction);
        self
    }

    pub fn comment(mut self, line: &str) -> Self {
        self.comments.push(line.to_string());
        self
    }

    /// Adds a glyph. Rows beyond the font height are ignored, missing rows
    /// are left empty.
    pub fn glyph(mut self, ch: char, rows: &[&str]) -> Self {
        self.glyphs.insert(ch, rows.iter().map(|r| r.to_string()).collect());
        self
    }

    pub fn build(&self) -> String {
        let mut out = format!(
            "flf2a{} {} {} 16 {} {}",
            self.hard_blank,
            self.height,
            self.height,
            self.old_layout,
            self.comments.len()
        );
        if self.print_direction.is_some() || self.full_layout.is_some() {
            out.push_str(&format!(" {}", self.print_direction.unwrap_or(0)));
        }
        if let Some(full) = self.full_layout {
            out.push_str(&format!(" {full}"));
        }
        out.push('\n');
        for line in &self.comments {
            out.push_str(line);
            out.push('\n');
        }

        let standard = (32u8..=126).map(char::from).chain(DEUTSCH_CHARS);
        for ch in standard.clone() {
            self.push_glyph(&mut out, ch);
        }
        for &ch in self.glyphs.keys() {
            if standard.clone().any(|c| c == ch) {
                continue;
            }
            out.push_str(&format!("0x{:04X}  tagged\n", ch as u32));
            self.push_glyph(&mut out, ch);
        }
        out
    }

    pub fn parse(&self) -> Result<FigletFont> {
        FigletFont::parse("test", &self.build())
    }

    fn push_glyph(&self, out: &mut String, ch: char) {
        let rows = self.glyphs.get(&ch);
        let mark = if ch == '@' { '#' } else { '@' };
        for i in 0..self.height {
            let row = rows.and_then(|r| r.get(i)).map(String::as_str).unwrap_or("");
            out.push_str(row);
            out.push(mark);
            if i + 1 == self.height {
                out.push(mark);
            }
            out.push('\n');
        }
    }
}
