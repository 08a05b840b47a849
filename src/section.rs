//! Measuring and drawing one section box inside a column.
//!
//! Measuring is pure. Drawing only happens once the caller knows the box fits, so a
//! failed attempt leaves the page untouched and can be retried on a fresh page.

use crate::canvas::{Color, Page, Paint, TextStyle};
use crate::document::Section;
use crate::geometry::Rect;
use crate::metrics::{FontFace, TextMetrics};
use crate::page_setup::{Column, PageSetup};
use crate::resources::RenderResources;
use crate::wrap::{wrap, wrap_bullet, BULLET_GLYPH};

#[derive(Debug, Clone, PartialEq)]
pub enum BoxLine {
    Text(String),
    BulletFirst(String),
    BulletRest(String),
    Blank,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionLayout {
    pub heading_lines: Vec<String>,
    pub pill_width: f32,
    pub pill_height: f32,
    pub lines: Vec<BoxLine>,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    Placed { box_height: f32, cursor_y: f32 },
    DoesNotFit { box_height: f32 },
}

pub struct SectionBox<'a> {
    setup: &'a PageSetup,
    resources: &'a RenderResources,
}

impl<'a> SectionBox<'a> {
    pub fn new(setup: &'a PageSetup, resources: &'a RenderResources) -> Self {
        Self { setup, resources }
    }

    pub fn inner_width(&self) -> f32 {
        self.setup.column_width() - 2.0 * self.setup.box_padding
    }

    pub fn measure(&self, section: &Section) -> SectionLayout {
        let s = self.setup;
        let fonts = &self.resources.fonts;
        let inner = self.inner_width();

        let heading = section.heading_or_default().to_uppercase();
        let pill_text_width = inner - 2.0 * s.pill_padding_x;
        let heading_lines = wrap(fonts, FontFace::Bold, s.heading_font_size, &heading, pill_text_width);
        let widest = heading_lines
            .iter()
            .map(|l| fonts.width(FontFace::Bold, s.heading_font_size, l))
            .fold(0.0f32, f32::max);
        let pill_width = (widest + 2.0 * s.pill_padding_x).min(inner);
        let pill_height = heading_lines.len() as f32 * s.heading_line_height + 2.0 * s.pill_padding_y;

        let mut lines = Vec::new();
        if !section.body.trim().is_empty() {
            for line in wrap(fonts, FontFace::Regular, s.body_font_size, &section.body, inner) {
                lines.push(if line.is_empty() { BoxLine::Blank } else { BoxLine::Text(line) });
            }
        }
        for bullet in &section.bullets {
            let wrapped = wrap_bullet(fonts, FontFace::Regular, s.body_font_size, bullet, inner, s.bullet_indent);
            for (i, line) in wrapped.lines.into_iter().enumerate() {
                lines.push(if i == 0 { BoxLine::BulletFirst(line) } else { BoxLine::BulletRest(line) });
            }
        }

        let heading_area = pill_height + s.heading_gap;
        let content = heading_area + lines.len() as f32 * s.line_height + 2.0 * s.box_padding;
        SectionLayout {
            heading_lines,
            pill_width,
            pill_height,
            lines,
            height: content.max(s.min_box_height),
        }
    }

    /// Draws the section at `top_y` if the whole box fits above the fit floor.
    pub fn measure_and_place(&self, page: &mut Page, column: Column, top_y: f32, section: &Section) -> Placement {
        let layout = self.measure(section);
        if top_y - layout.height < self.setup.fit_floor() {
            return Placement::DoesNotFit {
                box_height: layout.height,
            };
        }
        self.draw(page, column, top_y, layout.height, &layout);
        Placement::Placed {
            box_height: layout.height,
            cursor_y: top_y - layout.height - self.setup.section_gap,
        }
    }

    /// Places a section that cannot fit even an empty column. The box is clamped to the
    /// space above the bottom margin and lines past its bottom edge are dropped.
    /// Returns the box height and the new cursor.
    pub fn place_clamped(&self, page: &mut Page, column: Column, top_y: f32, section: &Section) -> (f32, f32) {
        let layout = self.measure(section);
        let available = (top_y - self.setup.bottom_margin).max(0.0);
        let box_height = layout.height.min(available);
        self.draw(page, column, top_y, box_height, &layout);
        (box_height, top_y - box_height - self.setup.section_gap)
    }

    fn draw(&self, page: &mut Page, column: Column, top_y: f32, box_height: f32, layout: &SectionLayout) {
        let s = self.setup;
        let brand = self.resources.brand.primary_color;
        let x = s.column_x(column);
        let pad = s.box_padding;

        page.draw_rect(
            Rect::from_top(x, top_y, s.column_width(), box_height),
            Paint::FillStroke {
                fill: Color::WHITE,
                stroke: Color::BORDER,
                width: 0.8,
            },
        );

        let pill_top = top_y - pad;
        let pill = Rect::from_top(x + pad, pill_top, layout.pill_width, layout.pill_height);
        page.draw_rounded_rect(pill, layout.pill_height / 2.0, Paint::Fill(brand));
        let heading_style = TextStyle::new(FontFace::Bold, s.heading_font_size, Color::WHITE);
        for (i, line) in layout.heading_lines.iter().enumerate() {
            let baseline = pill_top - s.pill_padding_y - s.heading_font_size * 0.8 - i as f32 * s.heading_line_height;
            page.draw_text(x + pad + s.pill_padding_x, baseline, line.as_str(), heading_style);
        }

        let body_style = TextStyle::new(FontFace::Regular, s.body_font_size, Color::INK);
        let bullet_style = TextStyle::new(FontFace::Bold, s.body_font_size, brand);
        let text_x = x + pad;
        let floor = top_y - box_height + pad;
        let mut y = pill_top - layout.pill_height - s.heading_gap;

        for line in &layout.lines {
            if matches!(line, BoxLine::Blank) {
                y -= s.line_height * s.blank_line_ratio;
                continue;
            }
            if y - s.line_height < floor - 1e-3 {
                break;
            }
            let baseline = y - s.line_height * 0.72;
            match line {
                BoxLine::Text(text) => page.draw_text(text_x, baseline, text.as_str(), body_style),
                BoxLine::BulletFirst(text) => {
                    page.draw_text(text_x, baseline, BULLET_GLYPH, bullet_style);
                    page.draw_text(text_x + s.bullet_indent, baseline, text.as_str(), body_style);
                }
                BoxLine::BulletRest(text) => {
                    page.draw_text(text_x + s.bullet_indent, baseline, text.as_str(), body_style)
                }
                BoxLine::Blank => {}
            }
            y -= s.line_height;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawCommand, A4_PORTRAIT};
    use crate::resources::Brand;

    fn fixtures() -> (PageSetup, RenderResources) {
        (PageSetup::default(), RenderResources::builtin(Brand::default()))
    }

    #[test]
    fn heading_only_section_gets_minimum_height() {
        let (setup, resources) = fixtures();
        let layout = SectionBox::new(&setup, &resources).measure(&Section::new("Notes", ""));
        assert!(layout.lines.is_empty());
        assert_eq!(layout.heading_lines, vec!["NOTES".to_string()]);
        assert_eq!(layout.height, setup.min_box_height);
    }

    #[test]
    fn height_grows_with_line_count() {
        let (setup, resources) = fixtures();
        let sb = SectionBox::new(&setup, &resources);
        let section = Section::new("Day 1", "Arrive.\n\nRest.").with_bullets(["Dinner", "Briefing"]);
        let layout = sb.measure(&section);
        assert_eq!(
            layout.lines,
            vec![
                BoxLine::Text("Arrive.".into()),
                BoxLine::Blank,
                BoxLine::Text("Rest.".into()),
                BoxLine::BulletFirst("Dinner".into()),
                BoxLine::BulletFirst("Briefing".into()),
            ]
        );
        let expected = layout.pill_height + setup.heading_gap + 5.0 * setup.line_height + 2.0 * setup.box_padding;
        assert!((layout.height - expected.max(setup.min_box_height)).abs() < 1e-3);
    }

    #[test]
    fn long_bullets_hang_under_their_text() {
        let (setup, resources) = fixtures();
        let sb = SectionBox::new(&setup, &resources);
        let bullet = "Guided walk along the crater rim with a ranger, followed by a packed lunch at the picnic site \
                      overlooking the hippo pool";
        let layout = sb.measure(&Section::new("Day 4", "").with_bullets([bullet]));
        assert!(layout.lines.len() > 1);
        assert!(matches!(layout.lines[0], BoxLine::BulletFirst(_)));
        assert!(layout.lines[1..].iter().all(|l| matches!(l, BoxLine::BulletRest(_))));
    }

    #[test]
    fn long_unbroken_heading_is_split_within_the_pill() {
        let (setup, resources) = fixtures();
        let sb = SectionBox::new(&setup, &resources);
        let heading = "x".repeat(200);
        let layout = sb.measure(&Section::new(heading, ""));
        assert!(layout.heading_lines.len() > 1);
        let limit = sb.inner_width() - 2.0 * setup.pill_padding_x;
        for line in &layout.heading_lines {
            assert!(resources.fonts.width(FontFace::Bold, setup.heading_font_size, line) <= limit);
        }
        assert_eq!(layout.heading_lines.concat(), "X".repeat(200));
    }

    #[test]
    fn placed_box_leaves_cursor_above_bottom_margin() {
        let (setup, resources) = fixtures();
        let sb = SectionBox::new(&setup, &resources);
        let mut page = Page::new(A4_PORTRAIT);
        let section = Section::new("Day 1", "Three short sentences. Another one here. And a final one.");
        match sb.measure_and_place(&mut page, Column::Left, 600.0, &section) {
            Placement::Placed { box_height, cursor_y } => {
                assert!(cursor_y >= setup.bottom_margin);
                assert!((cursor_y - (600.0 - box_height - setup.section_gap)).abs() < 1e-3);
            }
            other => panic!("expected placement, got {other:?}"),
        }
        let boxes = page.commands().iter().filter(|c| matches!(c, DrawCommand::Rect { .. })).count();
        assert_eq!(boxes, 1);
    }

    #[test]
    fn overflow_draws_nothing() {
        let (setup, resources) = fixtures();
        let sb = SectionBox::new(&setup, &resources);
        let mut page = Page::new(A4_PORTRAIT);
        let section = Section::new("Day 1", "Body text");
        let top = setup.fit_floor() + 10.0;
        let result = sb.measure_and_place(&mut page, Column::Right, top, &section);
        assert!(matches!(result, Placement::DoesNotFit { .. }));
        assert!(page.commands().is_empty());
    }

    #[test]
    fn clamped_box_stays_above_bottom_margin() {
        let (setup, resources) = fixtures();
        let sb = SectionBox::new(&setup, &resources);
        let mut page = Page::new(A4_PORTRAIT);
        let bullets: Vec<String> = (0..120).map(|i| format!("Activity number {i}")).collect();
        let section = Section::new("Everything", "").with_bullets(bullets);
        let top = 670.0;
        let (box_height, _) = sb.place_clamped(&mut page, Column::Left, top, &section);
        assert!(top - box_height >= setup.bottom_margin - 1e-3);
        let lowest_text = page
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { y, .. } => Some(*y),
                _ => None,
            })
            .fold(f32::MAX, f32::min);
        assert!(lowest_text > top - box_height);
    }
}
