use log::debug;

use crate::{
    banner::Banner,
    builder::{Line, LineBuilder},
    error::Result,
    font::{FigletFont, PrintDirection},
};

/// Requested print direction. `Auto` follows the font.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Direction {
    #[default]
    Auto,
    LeftToRight,
    RightToLeft,
}

/// Horizontal placement of each line within the output width.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Justify {
    /// Left for left-to-right output, right otherwise.
    #[default]
    Auto,
    Left,
    Center,
    Right,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RenderOptions {
    /// Output width in columns.
    pub width: usize,
    pub justify: Justify,
    pub direction: Direction,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 80,
            justify: Justify::Auto,
            direction: Direction::Auto,
        }
    }
}

impl RenderOptions {
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn with_justify(mut self, justify: Justify) -> Self {
        self.justify = justify;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }
}

pub fn resolve_direction(requested: Direction, font: &FigletFont) -> PrintDirection {
    match requested {
        Direction::Auto => font.print_direction(),
        Direction::LeftToRight => PrintDirection::LeftToRight,
        Direction::RightToLeft => PrintDirection::RightToLeft,
    }
}

/// Resolves `Auto` against the already resolved direction. The result is
/// never `Justify::Auto`.
pub fn resolve_justify(requested: Justify, direction: PrintDirection) -> Justify {
    match (requested, direction) {
        (Justify::Auto, PrintDirection::LeftToRight) => Justify::Left,
        (Justify::Auto, PrintDirection::RightToLeft) => Justify::Right,
        (justify, _) => justify,
    }
}

/// Renders `text` with `font`.
///
/// Every output row ends in `\n` and hard blanks come out as spaces.
/// Characters the font has no glyph for are skipped.
pub fn render(text: &str, font: &FigletFont, options: &RenderOptions) -> Result<Banner> {
    let direction = resolve_direction(options.direction, font);
    let justify = resolve_justify(options.justify, direction);
    debug!(
        "rendering {} chars with {} ({direction:?}, {justify:?}, width {})",
        text.chars().count(),
        font.name(),
        options.width
    );

    let lines = LineBuilder::new(font, text, direction, options.width).build()?;

    let mut out = String::new();
    for line in &lines {
        write_line(&mut out, line, justify, options.width);
    }
    let hard_blank = font.hard_blank();
    let out: String = out
        .chars()
        .map(|c| if c == hard_blank { ' ' } else { c })
        .collect();
    Ok(Banner::from(out))
}

fn write_line(out: &mut String, line: &Line, justify: Justify, width: usize) {
    for row in line {
        let pad = match justify {
            Justify::Right => width.saturating_sub(row.len() + 1),
            Justify::Center => width.saturating_sub(row.len()) / 2,
            Justify::Left | Justify::Auto => 0,
        };
        out.extend(std::iter::repeat(' ').take(pad));
        out.extend(row.iter());
        out.push('\n');
    }
}

impl FigletFont {
    /// Shorthand for [`render`].
    pub fn render(&self, text: &str, options: &RenderOptions) -> Result<Banner> {
        render(text, self, options)
    }
}
