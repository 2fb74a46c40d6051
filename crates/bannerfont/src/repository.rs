//! Locating fonts on disk by name.
use log::{debug, warn};
use std::{
    collections::BTreeSet,
    env, fs,
    io::{BufRead, BufReader, Read},
    path::{Path, PathBuf},
};

use crate::{
    error::{FontError, Result},
    font::{self, FigletFont, ZIP_MAGIC},
};

/// Environment variable holding extra font directories, separated like
/// `PATH`.
pub const FONT_PATH_ENV: &str = "BANNERFONT_PATH";

/// Extensions tried, in order, when resolving a font name.
const EXTENSIONS: [&str; 2] = ["tlf", "flf"];

const INFO_LINE_LIMIT: usize = 100;

const BDF_PROPERTIES: &[&str] = &[
    "FONT",
    "COMMENT",
    "FONTNAME_REGISTRY",
    "FAMILY_NAME",
    "FOUNDRY",
    "WEIGHT_NAME",
    "SETWIDTH_NAME",
    "SLANT",
    "ADD_STYLE_NAME",
    "PIXEL_SIZE",
    "POINT_SIZE",
    "RESOLUTION_X",
    "RESOLUTION_Y",
    "SPACING",
    "AVERAGE_WIDTH",
    "FONT_DESCENT",
    "FONT_ASCENT",
    "CAP_HEIGHT",
    "X_HEIGHT",
    "FACE_NAME",
    "FULL_NAME",
    "COPYRIGHT",
    "_DEC_",
    "DEFAULT_CHAR",
    "NOTICE",
    "RELATIVE_",
];

/// An ordered list of directories fonts are looked up in.
#[derive(Clone, Debug, Default)]
pub struct FontRepository {
    search_paths: Vec<PathBuf>,
}

impl FontRepository {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            search_paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    /// Repository built from [`FONT_PATH_ENV`]. Empty when it is unset.
    pub fn from_env() -> Self {
        match env::var_os(FONT_PATH_ENV) {
            Some(value) => {
                Self::new(env::split_paths(&value).filter(|p| !p.as_os_str().is_empty()))
            }
            None => Self::default(),
        }
    }

    /// Appends a directory searched after the existing ones.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.search_paths.push(path.into());
        self
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Finds the file for `name`. A name that is itself an existing file
    /// wins, otherwise each directory is tried with `.tlf` then `.flf`.
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        let direct = Path::new(name);
        if direct.is_file() {
            return Some(direct.to_path_buf());
        }
        for dir in &self.search_paths {
            for ext in EXTENSIONS {
                let candidate = dir.join(format!("{name}.{ext}"));
                if candidate.is_file() {
                    return Some(candidate);
                }
            }
        }
        None
    }

    pub fn load(&self, name: &str) -> Result<FigletFont> {
        let path = self.resolve(name).ok_or_else(|| {
            debug!("font {name} not found in {:?}", self.search_paths);
            FontError::FontNotFound(name.to_string())
        })?;
        debug!("loading font {name} from {}", path.display());
        FigletFont::load(&path)
    }

    /// Names of all valid fonts in the search path, sorted and without
    /// duplicates. Unreadable directories are skipped.
    pub fn list(&self) -> Vec<String> {
        let mut names = BTreeSet::new();
        for dir in &self.search_paths {
            let entries = match fs::read_dir(dir) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("cannot list {}: {e}", dir.display());
                    continue;
                }
            };
            for entry in entries.flatten() {
                let path = entry.path();
                let has_font_ext = path
                    .extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| EXTENSIONS.contains(&e));
                if !has_font_ext || !is_valid_font(&path) {
                    continue;
                }
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.insert(stem.to_string());
                }
            }
        }
        names.into_iter().collect()
    }

    /// Human readable description taken from the top of the font file:
    /// the first lines minus the header, BDF properties and glyph rows.
    /// With `short` only the first remaining line is returned.
    pub fn info(&self, name: &str, short: bool) -> Result<String> {
        let path = self
            .resolve(name)
            .ok_or_else(|| FontError::FontNotFound(name.to_string()))?;
        let bytes = fs::read(&path).map_err(|_| FontError::FontNotFound(name.to_string()))?;
        let text = font::decode(&bytes).map_err(|source| FontError::Parse {
            font: name.to_string(),
            source,
        })?;
        let mut lines = text
            .lines()
            .take(INFO_LINE_LIMIT)
            .filter(|line| !is_info_noise(line));
        if short {
            return Ok(lines.next().unwrap_or_default().to_string());
        }
        Ok(lines.collect::<Vec<_>>().join("\n"))
    }
}

/// True when the file's first line carries the `flf2`/`tlf2` signature.
/// Zip archives are judged by their first entry.
pub fn is_valid_font(path: &Path) -> bool {
    let Ok(file) = fs::File::open(path) else {
        return false;
    };
    let mut reader = BufReader::new(file);
    let mut first_line = Vec::new();
    if reader.read_until(b'\n', &mut first_line).is_err() {
        return false;
    }
    if !first_line.starts_with(ZIP_MAGIC) {
        return font::strip_magic(&String::from_utf8_lossy(&first_line)).is_some();
    }
    let mut bytes = first_line;
    if reader.read_to_end(&mut bytes).is_err() {
        return false;
    }
    font::decode(&bytes)
        .map(|text| text.lines().next().and_then(font::strip_magic).is_some())
        .unwrap_or(false)
}

fn is_info_noise(line: &str) -> bool {
    let header = line.starts_with("flf2") || line.starts_with("tlf2");
    let property = BDF_PROPERTIES.iter().any(|p| line.starts_with(p));
    let glyph_row = line.ends_with(['@', '#', '$']);
    header || property || glyph_row
}
