//! Glyph advance tables and text measurement.
//!
//! Widths are stored in font units per 1000 em, the same unit PDF font programs use,
//! so a measured width is `sum(advances) * size / 1000`.

use std::collections::HashMap;

use crate::error::ResourceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFace {
    Regular,
    Bold,
}

/// Measures the rendered width of a string in points.
///
/// Implementations must be pure: the same inputs always yield the same width.
pub trait TextMetrics {
    fn width(&self, face: FontFace, size: f32, text: &str) -> f32;
}

const FIRST_CHAR: u32 = 32;
const LAST_CHAR: u32 = 255;

#[rustfmt::skip]
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_ASCII: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

#[derive(Debug, Clone)]
pub struct FontMetrics {
    widths: Vec<u16>,
    extra: HashMap<char, u16>,
    missing_width: u16,
}

impl FontMetrics {
    pub fn helvetica() -> Self {
        Self::standard(&HELVETICA_ASCII)
    }

    pub fn helvetica_bold() -> Self {
        Self::standard(&HELVETICA_BOLD_ASCII)
    }

    fn standard(ascii: &[u16; 95]) -> Self {
        let mut widths = vec![0u16; (LAST_CHAR - FIRST_CHAR + 1) as usize];
        widths[..ascii.len()].copy_from_slice(ascii);
        widths[(0xB7 - FIRST_CHAR) as usize] = 278;
        // No-break space measures like a regular space.
        widths[(0xA0 - FIRST_CHAR) as usize] = ascii[0];
        let extra = HashMap::from([
            ('\u{2022}', 350),
            ('\u{2026}', 1000),
            ('\u{2013}', 556),
            ('\u{2014}', 1000),
        ]);
        Self {
            widths,
            extra,
            missing_width: 556,
        }
    }

    /// Builds a width table from a TrueType/OpenType font program.
    ///
    /// Every character the font's Unicode cmap subtables map gets its real advance.
    /// Characters without a glyph measure as `.notdef`, which is what the viewer draws.
    pub fn from_font_bytes(data: &[u8]) -> Result<Self, ResourceError> {
        let face = ttf_parser::Face::parse(data, 0)
            .map_err(|e| ResourceError::Font(format!("unparseable font program: {e}")))?;
        let scale = 1000.0 / face.units_per_em().max(1) as f32;
        let to_units = |id: ttf_parser::GlyphId| -> Option<u16> {
            let width = face.glyph_hor_advance(id)?;
            Some(((width as f32) * scale).round().clamp(0.0, u16::MAX as f32) as u16)
        };
        let advance = |ch: char| face.glyph_index(ch).and_then(to_units);

        let widths: Vec<u16> = (FIRST_CHAR..=LAST_CHAR)
            .map(|code| char::from_u32(code).and_then(advance).unwrap_or(0))
            .collect();
        if widths.iter().all(|w| *w == 0) {
            return Err(ResourceError::Font("font program maps no Latin glyphs".into()));
        }

        let mut extra = HashMap::new();
        if let Some(cmap) = face.tables().cmap {
            for subtable in cmap.subtables.into_iter().filter(|t| t.is_unicode()) {
                subtable.codepoints(|code| {
                    if code <= LAST_CHAR {
                        return;
                    }
                    let Some(ch) = char::from_u32(code) else {
                        return;
                    };
                    if let Some(width) = subtable.glyph_index(code).and_then(to_units) {
                        extra.entry(ch).or_insert(width);
                    }
                });
            }
        }

        let missing_width = to_units(ttf_parser::GlyphId(0))
            .filter(|w| *w > 0)
            .or_else(|| advance(' '))
            .unwrap_or(500)
            .max(1);
        Ok(Self {
            widths,
            extra,
            missing_width,
        })
    }

    pub fn advance(&self, ch: char) -> u16 {
        let code = ch as u32;
        if (FIRST_CHAR..=LAST_CHAR).contains(&code) {
            let width = self.widths[(code - FIRST_CHAR) as usize];
            if width > 0 {
                return width;
            }
            return self.missing_width;
        }
        self.extra.get(&ch).copied().unwrap_or(self.missing_width)
    }

    pub fn text_width(&self, size: f32, text: &str) -> f32 {
        let units: u32 = text.chars().map(|ch| self.advance(ch) as u32).sum();
        units as f32 * size / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helvetica_matches_standard_advances() {
        let m = FontMetrics::helvetica();
        assert_eq!(m.advance(' '), 278);
        assert_eq!(m.advance('A'), 667);
        assert_eq!(m.advance('W'), 944);
        assert_eq!(m.advance('i'), 222);
        assert_eq!(m.advance('~'), 584);
        assert_eq!(m.advance('\u{2022}'), 350);
    }

    #[test]
    fn bold_is_wider_for_lowercase() {
        let regular = FontMetrics::helvetica();
        let bold = FontMetrics::helvetica_bold();
        assert!(bold.text_width(10.0, "itinerary") > regular.text_width(10.0, "itinerary"));
    }

    #[test]
    fn width_scales_with_size() {
        let m = FontMetrics::helvetica();
        let w10 = m.text_width(10.0, "Serengeti");
        let w20 = m.text_width(20.0, "Serengeti");
        assert!((w20 - 2.0 * w10).abs() < 1e-3);
        assert_eq!(m.text_width(12.0, ""), 0.0);
    }

    #[test]
    fn unknown_glyphs_use_missing_width() {
        let m = FontMetrics::helvetica();
        assert_eq!(m.advance('\u{4E16}'), 556);
        assert_eq!(m.advance('\u{01}'), 556);
    }

    const ROBOTO: &[u8] = include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/RobotoMedium.ttf"));

    fn real_width(size: f32, text: &str) -> f32 {
        let face = ttf_parser::Face::parse(ROBOTO, 0).unwrap();
        let units: f32 = text
            .chars()
            .map(|ch| {
                let id = face.glyph_index(ch).unwrap_or(ttf_parser::GlyphId(0));
                face.glyph_hor_advance(id).unwrap_or(0) as f32
            })
            .sum();
        units * size / face.units_per_em() as f32
    }

    #[test]
    fn embedded_font_measures_beyond_latin1() {
        let m = FontMetrics::from_font_bytes(ROBOTO).unwrap();
        for text in ["Серенгети", "Ηλιοβασίλεμα", "Łódź", "Győr", "€ 1 200"] {
            let ours = m.text_width(10.0, text);
            let real = real_width(10.0, text);
            // Per-glyph rounding to 1/1000 em.
            let tolerance = 0.005 * text.chars().count() as f32 + 1e-3;
            assert!((ours - real).abs() <= tolerance, "{text}: {ours} vs {real}");
        }
        assert_ne!(m.advance('Ж'), m.advance(' '));
    }

    #[test]
    fn embedded_font_unmapped_glyph_measures_as_notdef() {
        let m = FontMetrics::from_font_bytes(ROBOTO).unwrap();
        let expected = real_width(1000.0, "\u{4E16}").round() as u16;
        assert_eq!(m.advance('\u{4E16}'), expected.max(1));
    }

    #[test]
    fn garbage_font_bytes_are_rejected() {
        assert!(FontMetrics::from_font_bytes(b"not a font").is_err());
    }
}
