//! FIGlet font definitions (`.flf`, and the compatible TOIlet `.tlf`).
use crate::{
    error::{FontError, ParseError, Result},
    smush::SmushMode,
};
use log::{debug, trace};
use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::{fs, path::Path};
use zip::ZipArchive;

/// The seven Deutsch characters every font stores right after `~`.
pub const DEUTSCH_CHARS: [char; 7] = ['Ä', 'Ö', 'Ü', 'ä', 'ö', 'ü', 'ß'];

pub(crate) const ZIP_MAGIC: &[u8; 4] = b"PK\x03\x04";

/// Resolved print direction.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PrintDirection {
    #[default]
    LeftToRight,
    RightToLeft,
}

impl PrintDirection {
    /// Header value `1` is right-to-left, anything else left-to-right.
    pub fn from_header(value: i64) -> Self {
        if value == 1 {
            PrintDirection::RightToLeft
        } else {
            PrintDirection::LeftToRight
        }
    }
}

/// One FIGcharacter: `height` rows of sub-characters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Glyph {
    rows: Vec<Vec<char>>,
    width: usize,
}

impl Glyph {
    pub fn new<S: AsRef<str>>(rows: &[S]) -> Self {
        let rows: Vec<Vec<char>> = rows
            .iter()
            .map(|r| r.as_ref().chars().collect())
            .collect();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        Self { rows, width }
    }

    /// Longest row, in sub-characters.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<char>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<String> {
        self.rows.get(index).map(|r| r.iter().collect())
    }

    fn has_data(&self) -> bool {
        self.rows.iter().any(|r| !r.is_empty())
    }
}

/// A parsed FIGlet font. Immutable once built.
#[derive(Clone, Debug)]
pub struct FigletFont {
    name: String,
    header: String,
    comment: String,
    hard_blank: char,
    height: usize,
    baseline: i64,
    max_length: i64,
    print_direction: PrintDirection,
    smush_mode: SmushMode,
    glyphs: HashMap<char, Glyph>,
}

struct Header {
    hard_blank: char,
    height: usize,
    baseline: i64,
    max_length: i64,
    comment_lines: usize,
    print_direction: PrintDirection,
    smush_mode: SmushMode,
}

impl FigletFont {
    /// Reads a font file from disk. The font is named after the file stem.
    ///
    /// A file that cannot be read is reported as [`FontError::FontNotFound`].
    pub fn load(path: &Path) -> Result<Self> {
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let bytes = fs::read(path).map_err(|e| {
            debug!("cannot read font {}: {e}", path.display());
            FontError::FontNotFound(name.clone())
        })?;
        Self::from_bytes(name, &bytes)
    }

    /// Parses font bytes. Zip archives are accepted, their first entry is
    /// used. Invalid UTF-8 is replaced rather than rejected.
    pub fn from_bytes(name: impl Into<String>, bytes: &[u8]) -> Result<Self> {
        let name = name.into();
        match decode(bytes) {
            Ok(content) => Self::parse(name, &content),
            Err(source) => Err(FontError::Parse { font: name, source }),
        }
    }

    /// Parses the text of a font file.
    pub fn parse(name: impl Into<String>, content: &str) -> Result<Self> {
        let name = name.into();
        match Self::parse_content(&name, content) {
            Ok(font) => {
                debug!(
                    "loaded font {}: {} glyphs, height {}, smush mode {:#x}",
                    font.name,
                    font.glyphs.len(),
                    font.height,
                    font.smush_mode.bits()
                );
                Ok(font)
            }
            Err(source) => Err(FontError::Parse { font: name, source }),
        }
    }

    fn parse_content(name: &str, content: &str) -> std::result::Result<Self, ParseError> {
        let mut lines = content.lines();
        let header_line = lines.next().ok_or(ParseError::MissingHeader)?;
        let header = parse_header(header_line)?;

        let comment = lines
            .by_ref()
            .take(header.comment_lines)
            .collect::<Vec<_>>()
            .join("\n");

        let mut font = FigletFont {
            name: name.to_string(),
            header: header_line.to_string(),
            comment,
            hard_blank: header.hard_blank,
            height: header.height,
            baseline: header.baseline,
            max_length: header.max_length,
            print_direction: header.print_direction,
            smush_mode: header.smush_mode,
            glyphs: HashMap::new(),
        };

        for code in 32u8..=126 {
            let glyph = read_glyph(&mut lines, font.height, code as u32)?;
            // Space stays even when empty, line wrapping looks for it.
            if code == b' ' || glyph.has_data() {
                font.glyphs.insert(code as char, glyph);
            }
        }

        for ch in DEUTSCH_CHARS {
            let glyph = read_glyph(&mut lines, font.height, ch as u32)?;
            if glyph.has_data() {
                font.glyphs.insert(ch, glyph);
            }
        }

        while let Some(line) = lines.next() {
            let Some(token) = line.split_whitespace().next() else {
                continue;
            };
            let Some(hex) = token.strip_prefix("0x").or_else(|| token.strip_prefix("0X")) else {
                trace!("{name}: skipping line outside a hex code tag: {line:?}");
                continue;
            };
            let code = u32::from_str_radix(hex, 16)
                .map_err(|_| ParseError::BadCodeTag(token.to_string()))?;
            let glyph = read_glyph(&mut lines, font.height, code)?;
            match char::from_u32(code) {
                Some(ch) if glyph.has_data() => {
                    font.glyphs.insert(ch, glyph);
                }
                Some(_) => {}
                None => trace!("{name}: dropping glyph for non-scalar code {code:#x}"),
            }
        }

        Ok(font)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw header line.
    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn hard_blank(&self) -> char {
        self.hard_blank
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn baseline(&self) -> i64 {
        self.baseline
    }

    pub fn max_length(&self) -> i64 {
        self.max_length
    }

    pub fn print_direction(&self) -> PrintDirection {
        self.print_direction
    }

    pub fn smush_mode(&self) -> SmushMode {
        self.smush_mode
    }

    pub fn glyph(&self, ch: char) -> Option<&Glyph> {
        self.glyphs.get(&ch)
    }

    pub fn has_char(&self, ch: char) -> bool {
        self.glyphs.contains_key(&ch)
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// Every character the font can print, in code point order.
    pub fn chars(&self) -> impl Iterator<Item = char> {
        let mut chars: Vec<char> = self.glyphs.keys().copied().collect();
        chars.sort_unstable();
        chars.into_iter()
    }
}

/// Matches `^[tf]lf2.` and returns the rest of the line.
pub(crate) fn strip_magic(line: &str) -> Option<&str> {
    let mut chars = line.char_indices();
    let (_, first) = chars.next()?;
    if first != 'f' && first != 't' {
        return None;
    }
    for expected in ['l', 'f', '2'] {
        if chars.next()?.1 != expected {
            return None;
        }
    }
    let (idx, sub_version) = chars.next()?;
    Some(&line[idx + sub_version.len_utf8()..])
}

fn parse_header(line: &str) -> std::result::Result<Header, ParseError> {
    let rest = strip_magic(line).ok_or_else(|| ParseError::BadMagic(line.to_string()))?;
    let fields: Vec<&str> = rest.split_whitespace().collect();
    if fields.len() < 6 {
        return Err(ParseError::ShortHeader(fields.len()));
    }

    let int = |index: usize, field: &'static str| -> std::result::Result<i64, ParseError> {
        fields[index].parse().map_err(|_| ParseError::BadInteger {
            field,
            value: fields[index].to_string(),
        })
    };

    let hard_blank = fields[0].chars().next().ok_or(ParseError::ShortHeader(0))?;
    let height = int(1, "height")?;
    if height < 1 {
        return Err(ParseError::BadHeight(height));
    }
    let baseline = int(2, "baseline")?;
    let max_length = int(3, "max_length")?;
    let old_layout = int(4, "old_layout")?;
    let comment_lines = int(5, "comment_lines")?;
    let print_direction = if fields.len() > 6 {
        PrintDirection::from_header(int(6, "print_direction")?)
    } else {
        PrintDirection::LeftToRight
    };
    let full_layout = if fields.len() > 7 {
        Some(int(7, "full_layout")?)
    } else {
        None
    };

    Ok(Header {
        hard_blank,
        height: height as usize,
        baseline,
        max_length,
        comment_lines: comment_lines.max(0) as usize,
        print_direction,
        smush_mode: SmushMode::from_layout(old_layout, full_layout),
    })
}

/// The end mark is the last non-blank character of a glyph's first row.
fn detect_end_mark(line: &str) -> Option<char> {
    line.trim_end().chars().next_back().or_else(|| line.chars().next())
}

/// Removes one or two trailing end marks (and any whitespace after them).
/// A blank mark is stripped as is, so padding before it survives. Rows that
/// do not end in the mark are left untouched.
fn strip_end_mark(line: &str, mark: char) -> &str {
    if mark.is_whitespace() {
        let body = line.strip_suffix(mark).unwrap_or(line);
        return body.strip_suffix(mark).unwrap_or(body);
    }
    match line.trim_end().strip_suffix(mark) {
        Some(body) => body.strip_suffix(mark).unwrap_or(body),
        None => line,
    }
}

fn read_glyph<'a, I>(
    lines: &mut I,
    height: usize,
    code: u32,
) -> std::result::Result<Glyph, ParseError>
where
    I: Iterator<Item = &'a str>,
{
    let mut end_mark = None;
    // The header height is untrusted until the rows are actually there.
    let mut rows = Vec::new();
    for _ in 0..height {
        let line = lines.next().ok_or(ParseError::Truncated(code))?;
        let mark = match end_mark {
            Some(mark) => mark,
            None => {
                let mark = detect_end_mark(line).ok_or(ParseError::EmptyRow(code))?;
                end_mark = Some(mark);
                mark
            }
        };
        rows.push(strip_end_mark(line, mark));
    }
    Ok(Glyph::new(&rows))
}

/// Font text from raw file bytes, unpacking zip archives.
pub(crate) fn decode(bytes: &[u8]) -> std::result::Result<String, ParseError> {
    if bytes.starts_with(ZIP_MAGIC) {
        return first_zip_entry(bytes);
    }
    Ok(String::from_utf8_lossy(bytes).into_owned())
}

fn first_zip_entry(bytes: &[u8]) -> std::result::Result<String, ParseError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    if archive.is_empty() {
        return Err(ParseError::EmptyArchive);
    }
    let mut entry = archive.by_index(0)?;
    let mut buf = Vec::new();
    entry.read_to_end(&mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
