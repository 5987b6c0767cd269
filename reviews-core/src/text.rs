//! Text measurement seam for the layout engine.
//!
//! The engine never rasterises anything; it only asks a `TextMeasurer` how big a
//! string is at a width. `MonospaceMeasurer` is the deterministic implementation
//! used by the terminal surface and the tests: every column advances by a fixed
//! fraction of the font size and lines wrap greedily on word boundaries.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::layout::Size;

/// Size and line height of one text role.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    pub size: f32,
    pub line_height: f32,
}

impl FontMetrics {
    pub const fn new(size: f32, line_height: f32) -> Self {
        Self { size, line_height }
    }
}

/// Fonts for every text role in a review cell, plus the show-more label.
#[derive(Debug, Clone, PartialEq)]
pub struct Typography {
    pub name: FontMetrics,
    pub text: FontMetrics,
    pub created: FontMetrics,
    pub show_more: FontMetrics,
    pub show_more_label: String,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            name: FontMetrics::new(16.0, 20.0),
            text: FontMetrics::new(16.0, 20.0),
            created: FontMetrics::new(12.0, 16.0),
            show_more: FontMetrics::new(14.0, 18.0),
            show_more_label: "Show more...".to_owned(),
        }
    }
}

/// Measures strings for layout.
///
/// Implementations must be pure: the same arguments always give the same size.
pub trait TextMeasurer {
    /// Height of a single line in `font`.
    fn line_height(&self, font: &FontMetrics) -> f32 {
        font.line_height
    }

    /// Bounding size of `text` wrapped at `max_width`.
    ///
    /// With `max_height` set, only the whole lines that fit inside it are counted.
    /// Empty text measures as `Size::ZERO`.
    fn measure(&self, text: &str, font: &FontMetrics, max_width: f32, max_height: Option<f32>) -> Size;
}

/// Fixed-advance measurer with greedy word wrapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasurer {
    /// Advance of one column as a fraction of the font size.
    pub advance_ratio: f32,
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self { advance_ratio: 0.5 }
    }
}

impl MonospaceMeasurer {
    /// Width of one column in `font`.
    pub fn advance(&self, font: &FontMetrics) -> f32 {
        font.size * self.advance_ratio
    }

    /// Number of whole columns that fit in `max_width` (at least one).
    pub fn columns(&self, font: &FontMetrics, max_width: f32) -> usize {
        let advance = self.advance(font);
        if advance <= 0.0 {
            return usize::MAX;
        }
        ((max_width / advance).floor() as usize).max(1)
    }

    /// Wraps `text` into lines of at most `columns` columns.
    ///
    /// Returns the line strings. Hard breaks on `\n` are kept, runs of whitespace
    /// collapse to one space, and words wider than a line are split by character.
    pub fn wrap(&self, text: &str, columns: usize) -> Vec<String> {
        let mut lines = Vec::new();
        for paragraph in text.split('\n') {
            let mut line = String::new();
            let mut width = 0usize;
            for word in paragraph.split_whitespace() {
                let word_width = word.width();
                if width > 0 && width + 1 + word_width <= columns {
                    line.push(' ');
                    line.push_str(word);
                    width += 1 + word_width;
                    continue;
                }
                if width > 0 {
                    lines.push(std::mem::take(&mut line));
                    width = 0;
                }
                if word_width <= columns {
                    line.push_str(word);
                    width = word_width;
                    continue;
                }
                for ch in word.chars() {
                    let ch_width = ch.width().unwrap_or(0);
                    if width > 0 && width + ch_width > columns {
                        lines.push(std::mem::take(&mut line));
                        width = 0;
                    }
                    line.push(ch);
                    width += ch_width;
                }
            }
            lines.push(line);
        }
        lines
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&self, text: &str, font: &FontMetrics, max_width: f32, max_height: Option<f32>) -> Size {
        if text.is_empty() {
            return Size::ZERO;
        }
        let lines = self.wrap(text, self.columns(font, max_width));
        let mut count = lines.len();
        if let Some(limit) = max_height {
            let fit = if font.line_height > 0.0 {
                // Tolerate float noise so `line_height * n` admits exactly n lines.
                (limit / font.line_height + 1e-3).floor().max(0.0) as usize
            } else {
                count
            };
            count = count.min(fit);
        }
        let widest = lines[..count].iter().map(|l| l.width()).max().unwrap_or(0);
        Size {
            width: (widest as f32 * self.advance(font)).min(max_width),
            height: count as f32 * font.line_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: FontMetrics = FontMetrics::new(16.0, 20.0);

    #[test]
    fn wraps_greedily_on_words() {
        let m = MonospaceMeasurer::default();
        let lines = m.wrap("aaa bbb ccc dddd", 8);
        assert_eq!(lines, vec!["aaa bbb", "ccc dddd"]);
    }

    #[test]
    fn keeps_hard_breaks_and_splits_long_words() {
        let m = MonospaceMeasurer::default();
        assert_eq!(m.wrap("ab\n\ncd", 10), vec!["ab", "", "cd"]);
        assert_eq!(m.wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn measure_counts_lines_and_widest_line() {
        let m = MonospaceMeasurer::default();
        // 8pt advance -> 28 columns in 230pt.
        let size = m.measure("hello world", &TEXT, 230.0, None);
        assert_eq!(size, Size { width: 88.0, height: 20.0 });

        let long = "word ".repeat(30);
        let size = m.measure(long.trim_end(), &TEXT, 230.0, None);
        // 5 words of 4 + 4 separators = 24 columns per line, 30 words -> 6 lines.
        assert_eq!(size.height, 120.0);
        assert_eq!(size.width, 192.0);
    }

    #[test]
    fn max_height_keeps_whole_lines_only() {
        let m = MonospaceMeasurer::default();
        let long = "word ".repeat(30);
        assert_eq!(m.measure(&long, &TEXT, 230.0, Some(60.0)).height, 60.0);
        assert_eq!(m.measure(&long, &TEXT, 230.0, Some(59.0)).height, 40.0);
        assert_eq!(m.measure(&long, &TEXT, 230.0, Some(0.0)).height, 0.0);
    }

    #[test]
    fn empty_text_is_zero_sized() {
        let m = MonospaceMeasurer::default();
        assert_eq!(m.measure("", &TEXT, 230.0, None), Size::ZERO);
    }

    #[test]
    fn wide_characters_take_two_columns() {
        let m = MonospaceMeasurer::default();
        assert_eq!(m.wrap("日本語", 4), vec!["日本", "語"]);
    }
}
