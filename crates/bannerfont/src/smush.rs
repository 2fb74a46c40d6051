//! Horizontal smushing rules.
//!
//! Two neighbouring glyphs are pushed together until their edges touch
//! (kerning) and, when the font allows it, one column further so the
//! touching sub-characters merge into one (smushing). [`Compositor::smush`]
//! decides what a pair of touching sub-characters becomes.
use bitflags::bitflags;

use crate::font::{FigletFont, PrintDirection};

bitflags! {
    /// The font's *full layout* value.
    ///
    /// Bits 0-5 select individual smushing rules, bit 6 enables kerning and
    /// bit 7 enables smushing. Higher (vertical layout) bits are kept but
    /// never consulted.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SmushMode: u32 {
        /// Equal sub-characters merge into one (never hard blanks).
        const EQUAL     = 1;
        /// `_` is replaced by any of `|/\[]{}()<>`.
        const LOWLINE   = 2;
        /// `|`, `/\`, `[]`, `{}`, `()`, `<>`: the later class wins.
        const HIERARCHY = 4;
        /// Opposite brackets `[]`, `{}`, `()` become `|`.
        const PAIR      = 8;
        /// `/\` becomes `|`, `\/` becomes `Y`, `><` becomes `X`.
        const BIGX      = 16;
        /// Two hard blanks merge into one.
        const HARDBLANK = 32;
        const KERN      = 64;
        const SMUSH     = 128;
    }
}

impl SmushMode {
    /// All six rule bits. A smushing font with none of them set uses
    /// universal smushing.
    pub const RULES: Self = Self::EQUAL
        .union(Self::LOWLINE)
        .union(Self::HIERARCHY)
        .union(Self::PAIR)
        .union(Self::BIGX)
        .union(Self::HARDBLANK);

    /// Derives the mode from the header's layout fields.
    ///
    /// Fonts without a full layout field get one synthesised from the old
    /// layout: `0` means kerning, negative means full width and anything
    /// else is smushing with the low five rule bits.
    pub fn from_layout(old_layout: i64, full_layout: Option<i64>) -> Self {
        match full_layout {
            // Only the low bits matter, truncation keeps them intact.
            Some(full) => Self::from_bits_retain(full as u32),
            None if old_layout == 0 => Self::KERN,
            None if old_layout < 0 => Self::empty(),
            None => Self::from_bits_retain((old_layout & 31) as u32) | Self::SMUSH,
        }
    }

    /// True when glyphs move together at all (kerning or smushing).
    pub fn overlaps(self) -> bool {
        self.intersects(Self::KERN | Self::SMUSH)
    }

    pub fn is_universal(self) -> bool {
        !self.intersects(Self::RULES)
    }
}

const HIERARCHY_CHARS: &str = "|/\\[]{}()<>";

fn hierarchy_class(c: char) -> Option<u8> {
    match c {
        '|' => Some(1),
        '/' | '\\' => Some(2),
        '[' | ']' => Some(3),
        '{' | '}' => Some(4),
        '(' | ')' => Some(5),
        '<' | '>' => Some(6),
        _ => None,
    }
}

/// Merges the touching edges of adjacent glyphs for one font and direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Compositor {
    mode: SmushMode,
    hard_blank: char,
    direction: PrintDirection,
}

impl Compositor {
    pub fn new(mode: SmushMode, hard_blank: char, direction: PrintDirection) -> Self {
        Self {
            mode,
            hard_blank,
            direction,
        }
    }

    pub fn for_font(font: &FigletFont, direction: PrintDirection) -> Self {
        Self::new(font.smush_mode(), font.hard_blank(), direction)
    }

    pub fn mode(&self) -> SmushMode {
        self.mode
    }

    /// Returns the sub-character that `left` and `right` merge into, or
    /// `None` when they have to stay side by side.
    ///
    /// `prev_width` and `cur_width` are the widths of the glyph already on
    /// the line and of the incoming glyph; glyphs narrower than two columns
    /// are only ever kerned.
    pub fn smush(
        &self,
        left: char,
        right: char,
        prev_width: usize,
        cur_width: usize,
    ) -> Option<char> {
        if left.is_whitespace() {
            return Some(right);
        }
        if right.is_whitespace() {
            return Some(left);
        }
        if prev_width < 2 || cur_width < 2 {
            return None;
        }
        if !self.mode.contains(SmushMode::SMUSH) {
            return None;
        }

        let hard_blank = self.hard_blank;
        if self.mode.is_universal() {
            // Visible sub-characters beat hard blanks, otherwise the one
            // typed later wins.
            if left == hard_blank {
                return Some(right);
            }
            if right == hard_blank {
                return Some(left);
            }
            return Some(match self.direction {
                PrintDirection::RightToLeft => left,
                PrintDirection::LeftToRight => right,
            });
        }

        if self.mode.contains(SmushMode::HARDBLANK) && left == hard_blank && right == hard_blank {
            return Some(left);
        }
        if left == hard_blank || right == hard_blank {
            return None;
        }

        if self.mode.contains(SmushMode::EQUAL) && left == right {
            return Some(left);
        }

        if self.mode.contains(SmushMode::LOWLINE) {
            if left == '_' && HIERARCHY_CHARS.contains(right) {
                return Some(right);
            }
            if right == '_' && HIERARCHY_CHARS.contains(left) {
                return Some(left);
            }
        }

        if self.mode.contains(SmushMode::HIERARCHY) {
            if let (Some(l), Some(r)) = (hierarchy_class(left), hierarchy_class(right)) {
                if l < r || (left == '|' && right == '|') {
                    return Some(right);
                }
                if r < l {
                    return Some(left);
                }
            }
        }

        if self.mode.contains(SmushMode::PAIR)
            && matches!(
                (left, right),
                ('[', ']') | (']', '[') | ('{', '}') | ('}', '{') | ('(', ')') | (')', '(')
            )
        {
            return Some('|');
        }

        if self.mode.contains(SmushMode::BIGX) {
            match (left, right) {
                ('/', '\\') => return Some('|'),
                ('\\', '/') => return Some('Y'),
                ('>', '<') => return Some('X'),
                _ => {}
            }
        }

        None
    }
}
