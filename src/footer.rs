//! Second pass over sealed pages: the footer needs the final page count.

use crate::canvas::{Align, Color, Page, TextStyle};
use crate::geometry::Point;
use crate::metrics::{FontFace, TextMetrics};
use crate::page_setup::PageSetup;
use crate::resources::RenderResources;
use crate::wrap::truncate_to_width;

const SEPARATOR: &str = "  \u{00B7}  ";
/// Minimum space between the brand line and the page label.
const LABEL_GAP: f32 = 12.0;

pub fn page_label(number: usize, total: usize) -> String {
    format!("Page {number} / {total}")
}

pub struct FooterStamper<'a> {
    setup: &'a PageSetup,
    resources: &'a RenderResources,
    contact: Option<&'a str>,
}

impl<'a> FooterStamper<'a> {
    pub fn new(setup: &'a PageSetup, resources: &'a RenderResources, contact: Option<&'a str>) -> Self {
        Self {
            setup,
            resources,
            contact,
        }
    }

    /// "Site  ·  website  ·  contact", skipping the parts that are not set.
    pub fn brand_line(&self) -> String {
        let brand = &self.resources.brand;
        std::iter::once(brand.site_name.as_str())
            .chain(brand.website.as_deref())
            .chain(self.contact)
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(SEPARATOR)
    }

    /// Appends the footer to every page. Existing commands are left untouched.
    pub fn stamp(&self, mut pages: Vec<Page>) -> Vec<Page> {
        let total = pages.len();
        let brand_line = self.brand_line();
        for (i, page) in pages.iter_mut().enumerate() {
            self.stamp_page(page, &brand_line, &page_label(i + 1, total));
        }
        pages
    }

    fn stamp_page(&self, page: &mut Page, brand_line: &str, label: &str) {
        let s = self.setup;
        let right_edge = s.page.width - s.margin_x;
        page.draw_line(
            Point::new(s.margin_x, s.footer_rule_y),
            Point::new(right_edge, s.footer_rule_y),
            Color::BORDER,
            0.6,
        );
        let style = TextStyle::new(FontFace::Regular, s.footer_font_size, Color::MUTED);
        let fonts = &self.resources.fonts;
        let label_width = fonts.width(style.face, style.size, label);
        let room = s.content_width() - label_width - LABEL_GAP;
        let brand_line = truncate_to_width(fonts, style.face, style.size, brand_line, room);
        if !brand_line.is_empty() {
            page.draw_text(s.margin_x, s.footer_baseline_y, brand_line, style);
        }
        page.draw_text_aligned(
            fonts,
            s.margin_x,
            s.footer_baseline_y,
            label,
            style,
            s.content_width(),
            Align::Right,
        );
    }
}
