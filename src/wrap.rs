//! Greedy line breaking against measured widths.

use crate::metrics::{FontFace, TextMetrics};

pub const BULLET_GLYPH: &str = "\u{2022}";

/// A wrapped bullet item: the first line carries the glyph, continuation lines hang
/// under the item text.
#[derive(Debug, Clone, PartialEq)]
pub struct BulletLines {
    pub lines: Vec<String>,
}

/// Breaks `text` into lines no wider than `max_width`.
///
/// Paragraphs are separated by blank lines in the input; one empty string is emitted
/// between consecutive paragraphs. Whitespace inside a paragraph (including single
/// newlines) is collapsed. A word wider than the column is split into chunks that fit.
pub fn wrap<M>(metrics: &M, face: FontFace, size: f32, text: &str, max_width: f32) -> Vec<String>
where
    M: TextMetrics + ?Sized,
{
    let mut lines = Vec::new();
    for paragraph in paragraphs(text) {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        wrap_paragraph(metrics, face, size, &paragraph, max_width, &mut lines);
    }
    lines
}

/// Wraps one bullet item against `max_width - indent`. The item is treated as a single
/// paragraph.
pub fn wrap_bullet<M>(
    metrics: &M,
    face: FontFace,
    size: f32,
    item: &str,
    max_width: f32,
    indent: f32,
) -> BulletLines
where
    M: TextMetrics + ?Sized,
{
    let flattened = item.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut lines = Vec::new();
    wrap_paragraph(metrics, face, size, &flattened, max_width - indent, &mut lines);
    BulletLines { lines }
}

/// Returns the longest prefix of `text` (plus "...") that fits `max_width`.
pub fn truncate_to_width<M>(metrics: &M, face: FontFace, size: f32, text: &str, max_width: f32) -> String
where
    M: TextMetrics + ?Sized,
{
    if metrics.width(face, size, text) <= max_width {
        return text.to_string();
    }
    const ELLIPSIS: &str = "...";
    let mut out = String::new();
    for ch in text.chars() {
        out.push(ch);
        let candidate = format!("{}{ELLIPSIS}", out.trim_end());
        if metrics.width(face, size, &candidate) > max_width {
            out.pop();
            break;
        }
    }
    let kept = out.trim_end();
    if kept.is_empty() {
        return String::new();
    }
    format!("{kept}{ELLIPSIS}")
}

fn paragraphs(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                out.push(current.join(" "));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        out.push(current.join(" "));
    }
    out
}

fn wrap_paragraph<M>(
    metrics: &M,
    face: FontFace,
    size: f32,
    paragraph: &str,
    max_width: f32,
    lines: &mut Vec<String>,
) where
    M: TextMetrics + ?Sized,
{
    let max_width = max_width.max(1.0);
    let fits = |s: &str| metrics.width(face, size, s) <= max_width;
    let mut current = String::new();

    for word in paragraph.split_whitespace() {
        if !current.is_empty() {
            let candidate = format!("{current} {word}");
            if fits(&candidate) {
                current = candidate;
                continue;
            }
            lines.push(std::mem::take(&mut current));
        }

        if fits(word) {
            current = word.to_string();
            continue;
        }
        let mut chunks = hard_split(metrics, face, size, word, max_width);
        // The tail chunk stays open so following words may join it.
        current = chunks.pop().unwrap_or_default();
        lines.extend(chunks);
    }

    if !current.is_empty() {
        lines.push(current);
    }
}

fn hard_split<M>(metrics: &M, face: FontFace, size: f32, word: &str, max_width: f32) -> Vec<String>
where
    M: TextMetrics + ?Sized,
{
    let mut chunks = Vec::new();
    let mut chunk = String::new();
    for ch in word.chars() {
        chunk.push(ch);
        if metrics.width(face, size, &chunk) > max_width && chunk.chars().count() > 1 {
            chunk.pop();
            chunks.push(std::mem::take(&mut chunk));
            chunk.push(ch);
        }
    }
    if !chunk.is_empty() {
        chunks.push(chunk);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::FontMetrics;
    use pretty_assertions::assert_eq;

    /// One point per character, regardless of face or size.
    struct Mono;

    impl TextMetrics for Mono {
        fn width(&self, _face: FontFace, _size: f32, text: &str) -> f32 {
            text.chars().count() as f32
        }
    }

    fn w(text: &str, max: f32) -> Vec<String> {
        wrap(&Mono, FontFace::Regular, 10.0, text, max)
    }

    #[test]
    fn greedy_fill() {
        assert_eq!(w("aaa bbb ccc", 7.0), vec!["aaa bbb", "ccc"]);
        assert_eq!(w("aaa bbb ccc", 11.0), vec!["aaa bbb ccc"]);
    }

    #[test]
    fn paragraph_breaks_insert_one_blank_line() {
        let text = "first para\n\n\n  \nsecond para";
        assert_eq!(w(text, 40.0), vec!["first para", "", "second para"]);
    }

    #[test]
    fn single_newlines_collapse_into_the_paragraph() {
        assert_eq!(w("one\ntwo\r\nthree", 40.0), vec!["one two three"]);
    }

    #[test]
    fn empty_and_whitespace_only_give_no_lines() {
        assert!(w("", 10.0).is_empty());
        assert!(w("   \n\t\n  ", 10.0).is_empty());
        assert!(wrap_bullet(&Mono, FontFace::Regular, 10.0, "  ", 20.0, 2.0).lines.is_empty());
    }

    #[test]
    fn long_token_is_hard_split_and_tail_stays_open() {
        assert_eq!(w("abcdefghij xy", 4.0), vec!["abcd", "efgh", "ij", "xy"]);
        assert_eq!(w("abcdefgh i", 4.0), vec!["abcd", "efgh", "i"]);
        assert_eq!(w("ab abcdefg", 5.0), vec!["ab", "abcde", "fg"]);
    }

    #[test]
    fn bullet_width_is_reduced_by_indent() {
        let wrapped = wrap_bullet(&Mono, FontFace::Regular, 10.0, "aa bb cc", 7.0, 2.0);
        assert_eq!(wrapped.lines, vec!["aa bb", "cc"]);
    }

    #[test]
    fn lines_never_exceed_width_with_real_metrics() {
        let m = FontMetrics::helvetica();
        struct Helv(FontMetrics);
        impl TextMetrics for Helv {
            fn width(&self, _f: FontFace, size: f32, text: &str) -> f32 {
                self.0.text_width(size, text)
            }
        }
        let metrics = Helv(m);
        let text = "Morning game drive through the Serengeti plains followed by a picnic \
                    breakfast under an acacia tree. Afternoon visit to the Olduvai Gorge \
                    museum. Supercalifragilisticexpialidociouslylongtokenwithoutanyspaces.";
        for max in [40.0, 90.0, 150.0, 260.0] {
            let lines = wrap(&metrics, FontFace::Regular, 9.5, text, max);
            assert!(!lines.is_empty());
            for line in &lines {
                assert!(metrics.width(FontFace::Regular, 9.5, line) <= max, "{line:?} > {max}");
            }
        }
    }

    #[test]
    fn wrapping_is_deterministic() {
        let text = "Day one arrives at Kilimanjaro airport.\n\nTransfer to Arusha.";
        assert_eq!(w(text, 12.0), w(text, 12.0));
    }

    #[test]
    fn truncation_adds_ellipsis_only_when_needed() {
        let f = FontFace::Regular;
        assert_eq!(truncate_to_width(&Mono, f, 10.0, "short", 10.0), "short");
        assert_eq!(truncate_to_width(&Mono, f, 10.0, "a much longer value", 10.0), "a much...");
        assert_eq!(truncate_to_width(&Mono, f, 10.0, "abc", 2.0), "");
    }
}
