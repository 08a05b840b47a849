use crate::canvas::{PageSize, A4_PORTRAIT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Left,
    Right,
}

impl Column {
    /// Round-robin assignment by global section index.
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 0 {
            Column::Left
        } else {
            Column::Right
        }
    }
}

/// Every dimension the layout uses, in points.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSetup {
    pub page: PageSize,
    pub margin_x: f32,
    pub column_gap: f32,

    pub header_height: f32,
    pub meta_strip_height: f32,
    pub rule_gap: f32,
    pub content_gap: f32,

    pub bottom_margin: f32,
    pub safety_margin: f32,
    pub footer_rule_y: f32,
    pub footer_baseline_y: f32,
    pub footer_font_size: f32,

    pub box_padding: f32,
    pub min_box_height: f32,
    pub section_gap: f32,
    pub body_font_size: f32,
    pub line_height: f32,
    pub blank_line_ratio: f32,
    pub bullet_indent: f32,

    pub heading_font_size: f32,
    pub heading_line_height: f32,
    pub pill_padding_x: f32,
    pub pill_padding_y: f32,
    pub heading_gap: f32,

    pub logo_card_height: f32,
    pub logo_card_padding: f32,
    pub logo_card_max_width: f32,
    pub corner_radius: f32,
    pub title_font_size: f32,
    pub subtitle_font_size: f32,
    pub meta_label_size: f32,
    pub meta_value_size: f32,
}

impl Default for PageSetup {
    fn default() -> Self {
        Self {
            page: A4_PORTRAIT,
            margin_x: 36.0,
            column_gap: 16.0,

            header_height: 92.0,
            meta_strip_height: 54.0,
            rule_gap: 10.0,
            content_gap: 14.0,

            bottom_margin: 54.0,
            safety_margin: 12.0,
            footer_rule_y: 40.0,
            footer_baseline_y: 26.0,
            footer_font_size: 8.0,

            box_padding: 12.0,
            min_box_height: 64.0,
            section_gap: 12.0,
            body_font_size: 9.5,
            line_height: 13.5,
            blank_line_ratio: 0.5,
            bullet_indent: 10.0,

            heading_font_size: 8.5,
            heading_line_height: 11.0,
            pill_padding_x: 8.0,
            pill_padding_y: 4.0,
            heading_gap: 8.0,

            logo_card_height: 60.0,
            logo_card_padding: 8.0,
            logo_card_max_width: 150.0,
            corner_radius: 8.0,
            title_font_size: 18.0,
            subtitle_font_size: 10.0,
            meta_label_size: 7.5,
            meta_value_size: 9.5,
        }
    }
}

impl PageSetup {
    pub fn content_width(&self) -> f32 {
        self.page.width - 2.0 * self.margin_x
    }

    pub fn column_width(&self) -> f32 {
        (self.content_width() - self.column_gap) / 2.0
    }

    pub fn column_x(&self, column: Column) -> f32 {
        match column {
            Column::Left => self.margin_x,
            Column::Right => self.margin_x + self.column_width() + self.column_gap,
        }
    }

    /// Lowest y a box bottom may reach during routine placement.
    pub fn fit_floor(&self) -> f32 {
        self.bottom_margin + self.safety_margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_split_content_width() {
        let setup = PageSetup::default();
        let w = setup.column_width();
        let right = setup.column_x(Column::Right);
        assert!((right + w - (setup.page.width - setup.margin_x)).abs() < 1e-3);
        assert!(setup.section_gap <= setup.safety_margin);
    }

    #[test]
    fn round_robin_columns() {
        let cols: Vec<_> = (0..4).map(Column::for_index).collect();
        assert_eq!(cols, vec![Column::Left, Column::Right, Column::Left, Column::Right]);
    }
}
