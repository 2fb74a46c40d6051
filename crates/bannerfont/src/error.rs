use thiserror::Error;

#[derive(Debug, Error)]
pub enum FontError {
    #[error("font not found: {0}")]
    FontNotFound(String),
    #[error("problem parsing {font} font: {source}")]
    Parse {
        font: String,
        #[source]
        source: ParseError,
    },
    #[error("character {ch:?} is {glyph_width} columns wide and cannot be printed within {width} columns")]
    CharacterTooWide {
        ch: char,
        glyph_width: usize,
        width: usize,
    },
}

/// Underlying cause of a [`FontError::Parse`].
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("missing header line")]
    MissingHeader,
    #[error("`{0}` is not a valid figlet font header")]
    BadMagic(String),
    #[error("malformed header: expected at least 6 fields, found {0}")]
    ShortHeader(usize),
    #[error("header field `{field}` is not an integer: `{value}`")]
    BadInteger { field: &'static str, value: String },
    #[error("font height must be at least 1, got {0}")]
    BadHeight(i64),
    #[error("font data ends inside the glyph for code {0:#x}")]
    Truncated(u32),
    #[error("empty row in the glyph for code {0:#x}")]
    EmptyRow(u32),
    #[error("invalid code tag `{0}`")]
    BadCodeTag(String),
    #[error("zip archive: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("zip archive contains no entries")]
    EmptyArchive,
    #[error("reading zip entry: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FontError>;
