//! Approximate font metrics for the four template typefaces.
//!
//! Widths are in em units and grouped by character class rather than per
//! glyph. That is accurate enough to decide where a line wraps and how many
//! lines a block takes, which is all pagination needs.

use serde::{Deserialize, Serialize};

use crate::models::TemplateChoice;

// ────────────────────────────────────────────────────────────────────────────
// Font family
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontFamily {
    /// Modern template.
    Inter,
    /// Professional template.
    EbGaramond,
    /// Minimal template.
    Lato,
    /// Creative template; condensed.
    Oswald,
}

impl FontFamily {
    pub fn for_template(template: TemplateChoice) -> Self {
        match template {
            TemplateChoice::Modern => FontFamily::Inter,
            TemplateChoice::Professional => FontFamily::EbGaramond,
            TemplateChoice::Minimal => FontFamily::Lato,
            TemplateChoice::Creative => FontFamily::Oswald,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Page configuration
// ────────────────────────────────────────────────────────────────────────────

/// Layout parameters for one printed page.
///
/// A4 (8.27" × 11.69"), 0.75" margins, 10pt type:
/// text width = 6.77" × (72.27pt/in ÷ 10pt) ≈ 48.9em,
/// text height = 10.19" × 72.27 ÷ 12pt leading ≈ 61 lines, less heading spacing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    pub font: FontFamily,
    pub font_size_pt: u8,
    pub text_width_em: f32,
    pub lines_per_page: u16,
}

pub fn a4_page_config(font: FontFamily) -> PageConfig {
    PageConfig {
        font,
        font_size_pt: 10,
        text_width_em: 48.9,
        lines_per_page: 58,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Metric table
// ────────────────────────────────────────────────────────────────────────────

pub struct FontMetrics {
    pub font: FontFamily,
    /// i l j t f r . , ; : ' ! |
    narrow: f32,
    lower: f32,
    upper: f32,
    /// m w M W @ %
    wide: f32,
    digit: f32,
    pub space_width: f32,
    /// Anything outside printable ASCII.
    fallback: f32,
}

static INTER: FontMetrics = FontMetrics {
    font: FontFamily::Inter,
    narrow: 0.27,
    lower: 0.53,
    upper: 0.66,
    wide: 0.86,
    digit: 0.58,
    space_width: 0.26,
    fallback: 0.55,
};

static EB_GARAMOND: FontMetrics = FontMetrics {
    font: FontFamily::EbGaramond,
    narrow: 0.24,
    lower: 0.44,
    upper: 0.64,
    wide: 0.78,
    digit: 0.46,
    space_width: 0.22,
    fallback: 0.48,
};

static LATO: FontMetrics = FontMetrics {
    font: FontFamily::Lato,
    narrow: 0.24,
    lower: 0.50,
    upper: 0.64,
    wide: 0.82,
    digit: 0.58,
    space_width: 0.19,
    fallback: 0.52,
};

static OSWALD: FontMetrics = FontMetrics {
    font: FontFamily::Oswald,
    narrow: 0.20,
    lower: 0.40,
    upper: 0.46,
    wide: 0.62,
    digit: 0.43,
    space_width: 0.20,
    fallback: 0.42,
};

pub fn get_metrics(font: FontFamily) -> &'static FontMetrics {
    match font {
        FontFamily::Inter => &INTER,
        FontFamily::EbGaramond => &EB_GARAMOND,
        FontFamily::Lato => &LATO,
        FontFamily::Oswald => &OSWALD,
    }
}

impl FontMetrics {
    fn char_width(&self, c: char) -> f32 {
        match c {
            ' ' => self.space_width,
            'i' | 'l' | 'j' | 't' | 'f' | 'r' | '.' | ',' | ';' | ':' | '\'' | '!' | '|' => {
                self.narrow
            }
            'm' | 'w' | 'M' | 'W' | '@' | '%' => self.wide,
            '0'..='9' => self.digit,
            'A'..='Z' => self.upper,
            c if c.is_ascii_graphic() => self.lower,
            _ => self.fallback,
        }
    }

    /// Rendered width of `s` in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.char_width(c)).sum()
    }

    /// Greedy word wrap at `max_em`. Words wider than a line are broken by
    /// character. An empty or all-whitespace input yields one empty line so
    /// that deliberate blank lines survive.
    pub fn wrap(&self, text: &str, max_em: f32) -> Vec<String> {
        let mut lines = Vec::new();
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in text.split_whitespace() {
            let word_w = self.measure_str(word);
            let space_w = if current.is_empty() { 0.0 } else { self.space_width };

            if current_width + space_w + word_w <= max_em {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(word);
                current_width += space_w + word_w;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0.0;
            }

            if word_w <= max_em {
                current.push_str(word);
                current_width = word_w;
            } else {
                for c in word.chars() {
                    let w = self.char_width(c);
                    if current_width + w > max_em && !current.is_empty() {
                        lines.push(std::mem::take(&mut current));
                        current_width = 0.0;
                    }
                    current.push(c);
                    current_width += w;
                }
            }
        }

        if !current.is_empty() || lines.is_empty() {
            lines.push(current);
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_empty_returns_zero() {
        assert_eq!(get_metrics(FontFamily::Inter).measure_str(""), 0.0);
    }

    #[test]
    fn test_condensed_font_narrower() {
        let s = "Senior Platform Engineer";
        assert!(
            get_metrics(FontFamily::Oswald).measure_str(s)
                < get_metrics(FontFamily::Inter).measure_str(s)
        );
    }

    #[test]
    fn test_wrap_short_text_single_line() {
        let lines = get_metrics(FontFamily::Lato).wrap("hello world", 48.9);
        assert_eq!(lines, vec!["hello world".to_string()]);
    }

    #[test]
    fn test_wrap_long_text_respects_width() {
        let metrics = get_metrics(FontFamily::Inter);
        let text = "word ".repeat(60);
        let lines = metrics.wrap(&text, 20.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(metrics.measure_str(line) <= 20.0, "{line}");
        }
        assert_eq!(lines.join(" ").split_whitespace().count(), 60);
    }

    #[test]
    fn test_wrap_breaks_oversized_word() {
        let metrics = get_metrics(FontFamily::Inter);
        let lines = metrics.wrap(&"x".repeat(200), 10.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat().len(), 200);
    }

    #[test]
    fn test_wrap_blank_keeps_one_line() {
        let lines = get_metrics(FontFamily::Inter).wrap("", 10.0);
        assert_eq!(lines, vec![String::new()]);
    }

    #[test]
    fn test_every_template_has_a_font() {
        for template in TemplateChoice::ALL {
            let font = FontFamily::for_template(template);
            assert_eq!(get_metrics(font).font, font);
        }
    }
}
