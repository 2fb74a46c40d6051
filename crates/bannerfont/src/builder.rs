//! Lays glyphs out into lines no wider than the output width.
//!
//! Glyphs are appended to a row buffer one at a time, each pushed as far
//! left as the font's layout allows. When a glyph would overflow the line
//! the builder backs up to the last space (or explicit newline) and starts
//! a new line after it; a single word wider than the line is split where
//! it overflows.
use log::trace;

use crate::{
    error::{FontError, Result},
    font::{FigletFont, Glyph, PrintDirection},
    smush::Compositor,
};

/// Rows of one output line.
pub(crate) type Line = Vec<Vec<char>>;

/// Where a line may be broken: the buffer as it was before the character at
/// `pos` was placed.
#[derive(Clone, Debug)]
struct BreakPoint {
    rows: Line,
    pos: usize,
}

pub(crate) struct LineBuilder<'a> {
    font: &'a FigletFont,
    compositor: Compositor,
    direction: PrintDirection,
    width: usize,
    text: Vec<char>,
    buffer: Line,
    prev_width: usize,
    break_points: Vec<BreakPoint>,
    lines: Vec<Line>,
}

impl<'a> LineBuilder<'a> {
    /// Right-to-left text is laid out back to front.
    pub fn new(font: &'a FigletFont, text: &str, direction: PrintDirection, width: usize) -> Self {
        let mut text: Vec<char> = text.chars().collect();
        if direction == PrintDirection::RightToLeft {
            text.reverse();
        }
        Self {
            font,
            compositor: Compositor::for_font(font, direction),
            direction,
            width,
            text,
            buffer: vec![Vec::new(); font.height()],
            prev_width: 0,
            break_points: Vec::new(),
            lines: Vec::new(),
        }
    }

    /// Consumes the text and returns the finished lines. The last line is
    /// always emitted, even when it is empty.
    pub fn build(mut self) -> Result<Vec<Line>> {
        let mut cursor = 0;
        while cursor < self.text.len() {
            cursor = self.step(cursor)?;
        }
        let last = std::mem::take(&mut self.buffer);
        self.lines.push(last);
        Ok(self.lines)
    }

    /// Places the character at `cursor` and returns the next position to
    /// look at.
    fn step(&mut self, cursor: usize) -> Result<usize> {
        let ch = self.text[cursor];
        if ch == '\n' {
            self.mark_break(cursor);
            return self.break_line(cursor);
        }

        let font = self.font;
        let Some(glyph) = font.glyph(ch) else {
            trace!("no glyph for {ch:?}, skipping");
            return Ok(cursor + 1);
        };
        if glyph.width() > self.width {
            return Err(FontError::CharacterTooWide {
                ch,
                glyph_width: glyph.width(),
                width: self.width,
            });
        }

        let overlap = self.overlap(glyph);
        let total = self.buffer_width() + glyph.width() - overlap;
        if ch == ' ' {
            self.mark_break(cursor);
        }
        if total >= self.width {
            return self.break_line(cursor);
        }

        let widths = (self.prev_width, glyph.width());
        for (row, glyph_row) in self.buffer.iter_mut().zip(glyph.rows()) {
            *row = merge_row(
                &self.compositor,
                self.direction,
                row,
                glyph_row,
                overlap,
                widths,
            );
        }
        self.prev_width = glyph.width();
        Ok(cursor + 1)
    }

    fn mark_break(&mut self, pos: usize) {
        self.break_points.push(BreakPoint {
            rows: self.buffer.clone(),
            pos,
        });
    }

    /// Ends the current line. Returns where layout resumes.
    fn break_line(&mut self, cursor: usize) -> Result<usize> {
        if let Some(point) = self.break_points.pop() {
            trace!("line break at {}", point.pos);
            self.lines.push(point.rows);
            self.reset();
            return Ok(point.pos + 1);
        }

        if self.buffer.iter().all(Vec::is_empty) {
            let ch = self.text[cursor];
            let glyph_width = self.font.glyph(ch).map(Glyph::width).unwrap_or(0);
            return Err(FontError::CharacterTooWide {
                ch,
                glyph_width,
                width: self.width,
            });
        }

        trace!("splitting word at {cursor}");
        let rows = std::mem::take(&mut self.buffer);
        self.lines.push(rows);
        self.reset();
        Ok(cursor)
    }

    fn reset(&mut self) {
        self.buffer = vec![Vec::new(); self.font.height()];
        self.break_points.clear();
        self.prev_width = 0;
    }

    fn buffer_width(&self) -> usize {
        self.buffer.first().map(Vec::len).unwrap_or(0)
    }

    /// How many columns `glyph` can slide into the buffer. The smallest
    /// value over all rows wins.
    fn overlap(&self, glyph: &Glyph) -> usize {
        if !self.compositor.mode().overlaps() {
            return 0;
        }
        let mut amount = glyph.width();
        for (buffer_row, glyph_row) in self.buffer.iter().zip(glyph.rows()) {
            let (left, right) = match self.direction {
                PrintDirection::LeftToRight => (buffer_row, glyph_row),
                PrintDirection::RightToLeft => (glyph_row, buffer_row),
            };

            let left_edge = left.iter().rposition(|c| !c.is_whitespace()).unwrap_or(0);
            let left_ch = left.get(left_edge).copied();
            let right_edge = right.iter().take_while(|c| c.is_whitespace()).count();
            let right_ch = right.get(right_edge).copied();

            let mut row_amount = right_edge as isize + left.len() as isize - 1 - left_edge as isize;
            let merges = match (left_ch, right_ch) {
                (None, _) | (Some(' '), _) => true,
                (Some(l), Some(r)) => self
                    .compositor
                    .smush(l, r, self.prev_width, glyph.width())
                    .is_some(),
                (Some(_), None) => false,
            };
            if merges {
                row_amount += 1;
            }
            amount = amount.min(row_amount.max(0) as usize);
        }
        amount
    }
}

/// Joins one buffer row with one glyph row, merging `overlap` columns.
fn merge_row(
    compositor: &Compositor,
    direction: PrintDirection,
    buffer_row: &[char],
    glyph_row: &[char],
    overlap: usize,
    (prev_width, cur_width): (usize, usize),
) -> Vec<char> {
    let (left, right) = match direction {
        PrintDirection::LeftToRight => (buffer_row, glyph_row),
        PrintDirection::RightToLeft => (glyph_row, buffer_row),
    };
    let mut merged = left.to_vec();
    for i in 0..overlap {
        let Some(idx) = (left.len() + i).checked_sub(overlap) else {
            continue;
        };
        let (Some(&l), Some(&r)) = (merged.get(idx), right.get(i)) else {
            continue;
        };
        merged[idx] = compositor.smush(l, r, prev_width, cur_width).unwrap_or(l);
    }
    merged.extend_from_slice(&right[overlap.min(right.len())..]);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FontSource;
    use pretty_assertions::assert_eq;

    fn kerning_font() -> FigletFont {
        FontSource::new(2)
            .layout(64)
            .glyph(' ', &["$$", "$$"])
            .glyph('f', &["ff", "ff"])
            .glyph('o', &["oo", "oo"])
            .parse()
            .unwrap()
    }

    fn lines(font: &FigletFont, text: &str, width: usize) -> Vec<Vec<String>> {
        LineBuilder::new(font, text, PrintDirection::LeftToRight, width)
            .build()
            .unwrap()
            .into_iter()
            .map(|line| line.into_iter().map(|row| row.into_iter().collect()).collect())
            .collect()
    }

    #[test]
    fn kerned_glyphs_touch() {
        let font = kerning_font();
        assert_eq!(lines(&font, "fo o", 80), vec![vec!["ffoo$$oo", "ffoo$$oo"]]);
    }

    #[test]
    fn wraps_at_last_space() {
        let font = kerning_font();
        assert_eq!(
            lines(&font, "fo fo", 8),
            vec![vec!["ffoo", "ffoo"], vec!["ffoo", "ffoo"]]
        );
    }

    #[test]
    fn wraps_at_the_space_closest_to_the_width() {
        let font = kerning_font();
        assert_eq!(
            lines(&font, "fo fo fo", 11),
            vec![vec!["ffoo$$ffoo", "ffoo$$ffoo"], vec!["ffoo", "ffoo"]]
        );
    }

    #[test]
    fn newline_wins_over_pending_space() {
        let font = kerning_font();
        assert_eq!(
            lines(&font, "f o\no", 7),
            vec![vec!["ff$$oo", "ff$$oo"], vec!["oo", "oo"]]
        );
    }

    #[test]
    fn splits_long_words() {
        let font = kerning_font();
        assert_eq!(lines(&font, "foo", 5), vec![vec!["ffoo", "ffoo"], vec!["oo", "oo"]]);
    }

    #[test]
    fn explicit_newline() {
        let font = kerning_font();
        assert_eq!(lines(&font, "f\no", 80), vec![vec!["ff", "ff"], vec!["oo", "oo"]]);
    }

    #[test]
    fn trailing_newline_leaves_empty_line() {
        let font = kerning_font();
        assert_eq!(lines(&font, "f\n", 80), vec![vec!["ff", "ff"], vec!["", ""]]);
    }

    #[test]
    fn missing_glyphs_are_skipped() {
        let font = kerning_font();
        assert_eq!(lines(&font, "fxo", 80), vec![vec!["ffoo", "ffoo"]]);
    }

    #[test]
    fn too_narrow_for_a_single_glyph() {
        let font = kerning_font();
        let err = LineBuilder::new(&font, "f", PrintDirection::LeftToRight, 2)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            FontError::CharacterTooWide {
                ch: 'f',
                glyph_width: 2,
                width: 2
            }
        ));
        let err = LineBuilder::new(&font, "o", PrintDirection::LeftToRight, 1)
            .build()
            .unwrap_err();
        assert!(matches!(err, FontError::CharacterTooWide { ch: 'o', .. }));
    }

    #[test]
    fn full_width_never_overlaps() {
        let font = FontSource::new(1)
            .old_layout(-1)
            .glyph('a', &["a "])
            .glyph('b', &[" b"])
            .parse()
            .unwrap();
        assert_eq!(lines(&font, "ab", 80), vec![vec!["a  b"]]);
    }

    #[test]
    fn kerning_closes_whitespace_gaps() {
        let font = FontSource::new(1)
            .layout(64)
            .glyph('a', &["a "])
            .glyph('b', &[" b"])
            .parse()
            .unwrap();
        assert_eq!(lines(&font, "ab", 80), vec![vec!["ab"]]);
    }

    #[test]
    fn smushing_merges_one_column() {
        let font = FontSource::new(1)
            .layout(128 | 1)
            .glyph('a', &["a|"])
            .glyph('b', &["|b"])
            .parse()
            .unwrap();
        assert_eq!(lines(&font, "ab", 80), vec![vec!["a|b"]]);
    }

    #[test]
    fn right_to_left_lays_out_backwards() {
        let font = kerning_font();
        let rows = LineBuilder::new(&font, "fo", PrintDirection::RightToLeft, 80)
            .build()
            .unwrap();
        let row: String = rows[0][0].iter().collect();
        assert_eq!(row, "ffoo");
    }

    #[test]
    fn right_to_left_smushes_into_the_buffer() {
        let font = FontSource::new(1)
            .layout(128 | 1)
            .glyph('a', &["|a"])
            .glyph('b', &["b|"])
            .parse()
            .unwrap();
        let rows = LineBuilder::new(&font, "ba", PrintDirection::RightToLeft, 80)
            .build()
            .unwrap();
        let row: String = rows[0][0].iter().collect();
        assert_eq!(row, "b|a");
    }

    #[test]
    fn merge_row_keeps_left_when_rules_fail() {
        let c = Compositor::new(crate::smush::SmushMode::KERN, '$', PrintDirection::LeftToRight);
        let merged = merge_row(
            &c,
            PrintDirection::LeftToRight,
            &['a', 'b'],
            &['c', 'd'],
            1,
            (2, 2),
        );
        assert_eq!(merged, vec!['a', 'b', 'd']);
    }
}
