//! Header band and meta strip drawn identically at the top of every page.

use crate::canvas::{Color, Page, Paint, TextStyle};
use crate::document::ItineraryDocument;
use crate::geometry::{Point, Rect};
use crate::metrics::{FontFace, TextMetrics};
use crate::page_setup::PageSetup;
use crate::resources::RenderResources;
use crate::wrap::{truncate_to_width, wrap};

const TEXT_LOGO_SIZE: f32 = 14.0;
const TITLE_GAP: f32 = 16.0;
const META_LABEL_WIDTH: f32 = 74.0;
const SUBTITLE_MAX_LINES: usize = 2;

pub struct DocumentChrome<'a> {
    setup: &'a PageSetup,
    resources: &'a RenderResources,
    document: &'a ItineraryDocument,
}

impl<'a> DocumentChrome<'a> {
    pub fn new(setup: &'a PageSetup, resources: &'a RenderResources, document: &'a ItineraryDocument) -> Self {
        Self {
            setup,
            resources,
            document,
        }
    }

    /// Draws the chrome and returns the y where content may start.
    pub fn draw(&self, page: &mut Page) -> f32 {
        let s = self.setup;
        let page_h = s.page.height;

        page.draw_rect(
            Rect::from_top(0.0, page_h, s.page.width, s.header_height),
            Paint::Fill(self.resources.brand.primary_color),
        );
        let card_width = self.draw_logo_card(page);
        self.draw_titles(page, s.margin_x + card_width + TITLE_GAP);

        let strip_top = page_h - s.header_height;
        page.draw_rect(
            Rect::from_top(0.0, strip_top, s.page.width, s.meta_strip_height),
            Paint::Fill(Color::STRIP),
        );
        self.draw_meta(page, strip_top);

        let rule_y = strip_top - s.meta_strip_height - s.rule_gap;
        page.draw_line(
            Point::new(s.margin_x, rule_y),
            Point::new(s.page.width - s.margin_x, rule_y),
            Color::BORDER,
            0.8,
        );
        rule_y - s.content_gap
    }

    fn draw_logo_card(&self, page: &mut Page) -> f32 {
        let s = self.setup;
        let fonts = &self.resources.fonts;
        let card_h = s.logo_card_height;
        let card_top = s.page.height - (s.header_height - card_h) / 2.0;
        let pad = s.logo_card_padding;

        if let Some(logo) = &self.resources.logo {
            let mut img_h = card_h - 2.0 * pad;
            let mut img_w = img_h * logo.aspect_ratio();
            let max_img_w = s.logo_card_max_width - 2.0 * pad;
            if img_w > max_img_w {
                img_w = max_img_w;
                img_h = img_w / logo.aspect_ratio();
            }
            let card_w = img_w + 2.0 * pad;
            let card = Rect::from_top(s.margin_x, card_top, card_w, card_h);
            page.draw_rounded_rect(card, s.corner_radius, Paint::Fill(Color::WHITE));
            let img_top = card_top - (card_h - img_h) / 2.0;
            page.draw_logo(Rect::from_top(s.margin_x + pad, img_top, img_w, img_h));
            return card_w;
        }

        let brand = &self.resources.brand;
        let text_pad = pad * 1.5;
        let max_text_w = s.logo_card_max_width - 2.0 * text_pad;
        let name = brand.site_name.trim();
        let label = if !name.is_empty() && fonts.width(FontFace::Bold, TEXT_LOGO_SIZE, name) <= max_text_w {
            name.to_string()
        } else {
            brand.initials()
        };
        let text_w = fonts.width(FontFace::Bold, TEXT_LOGO_SIZE, &label);
        let card_w = (text_w + 2.0 * text_pad).max(card_h);
        let card = Rect::from_top(s.margin_x, card_top, card_w, card_h);
        page.draw_rounded_rect(card, s.corner_radius, Paint::Fill(Color::WHITE));
        page.draw_text(
            s.margin_x + (card_w - text_w) / 2.0,
            card_top - card_h / 2.0 - TEXT_LOGO_SIZE * 0.35,
            label,
            TextStyle::new(FontFace::Bold, TEXT_LOGO_SIZE, brand.primary_color),
        );
        card_w
    }

    fn draw_titles(&self, page: &mut Page, x: f32) {
        let s = self.setup;
        let fonts = &self.resources.fonts;
        let available = s.page.width - s.margin_x - x;
        let top = s.page.height;

        let title_lines = wrap(fonts, FontFace::Bold, s.title_font_size, self.document.title(), available);
        if let Some(first) = title_lines.into_iter().next() {
            page.draw_text(
                x,
                top - 38.0,
                first,
                TextStyle::new(FontFace::Bold, s.title_font_size, Color::WHITE),
            );
        }

        let subtitle_lines = wrap(fonts, FontFace::Regular, s.subtitle_font_size, self.document.subtitle(), available);
        let step = s.subtitle_font_size * 1.3;
        for (i, line) in subtitle_lines.into_iter().filter(|l| !l.is_empty()).take(SUBTITLE_MAX_LINES).enumerate() {
            page.draw_text(
                x,
                top - 56.0 - i as f32 * step,
                line,
                TextStyle::new(FontFace::Regular, s.subtitle_font_size, Color::WHITE),
            );
        }
    }

    fn draw_meta(&self, page: &mut Page, strip_top: f32) {
        let s = self.setup;
        let doc = self.document;
        let half = s.content_width() / 2.0;

        let operator = match (doc.operator_name.as_deref(), doc.operator_country.as_deref()) {
            (Some(name), Some(country)) => format!("{name}, {country}"),
            (Some(name), None) => name.to_string(),
            (None, _) => self.resources.brand.site_name.clone(),
        };
        let left = [
            ("PREPARED FOR", doc.prepared_for().to_string()),
            ("EMAIL", doc.customer_email.clone().unwrap_or_else(|| "-".into())),
        ];
        let right = [
            ("OPERATOR", operator),
            ("GENERATED", doc.generated_at.clone().unwrap_or_else(|| "-".into())),
        ];

        for (column_x, rows) in [(s.margin_x, left), (s.margin_x + half, right)] {
            for (row, (label, value)) in rows.iter().enumerate() {
                let baseline = strip_top - 21.0 - row as f32 * 17.0;
                self.draw_meta_field(page, column_x, baseline, label, value, half);
            }
        }
    }

    fn draw_meta_field(&self, page: &mut Page, x: f32, baseline: f32, label: &str, value: &str, half: f32) {
        let s = self.setup;
        let fonts = &self.resources.fonts;
        page.draw_text(x, baseline, label, TextStyle::new(FontFace::Bold, s.meta_label_size, Color::MUTED));
        let value_width = half - META_LABEL_WIDTH - 8.0;
        let value = truncate_to_width(fonts, FontFace::Regular, s.meta_value_size, value, value_width);
        page.draw_text(
            x + META_LABEL_WIDTH,
            baseline,
            value,
            TextStyle::new(FontFace::Regular, s.meta_value_size, Color::INK),
        );
    }
}
