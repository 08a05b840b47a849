//! Two-column pagination.
//!
//! Sections are assigned to columns round-robin by their global index and never split.
//! When one does not fit, a new page is started with fresh chrome and both column
//! cursors go back to the top of the content area.

use tracing::{debug, warn};

use crate::canvas::Page;
use crate::chrome::DocumentChrome;
use crate::document::ItineraryDocument;
use crate::page_setup::{Column, PageSetup};
use crate::resources::RenderResources;
use crate::section::{Placement, SectionBox};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlowState {
    AwaitingSection,
    Placing,
    Overflowed,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnCursor {
    pub y: f32,
    /// Whether anything has been placed in this column on the current page.
    pub used: bool,
}

impl ColumnCursor {
    fn fresh(y: f32) -> Self {
        Self { y, used: false }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedSection {
    pub index: usize,
    /// Zero-based page index.
    pub page: usize,
    pub column: Column,
    pub top: f32,
    pub height: f32,
    /// The section was taller than an empty column and got clamped.
    pub forced: bool,
}

/// Sealed pages plus where each section ended up. Footers are not drawn yet.
#[derive(Debug, Clone)]
pub struct PagedDocument {
    pub pages: Vec<Page>,
    pub placements: Vec<PlacedSection>,
}

impl PagedDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

pub struct PageFlowController<'a> {
    setup: &'a PageSetup,
    resources: &'a RenderResources,
    document: &'a ItineraryDocument,
    sealed: Vec<Page>,
    current: Page,
    left: ColumnCursor,
    right: ColumnCursor,
    placements: Vec<PlacedSection>,
    state: FlowState,
}

impl<'a> PageFlowController<'a> {
    /// Starts the first page with its chrome already drawn.
    pub fn new(setup: &'a PageSetup, resources: &'a RenderResources, document: &'a ItineraryDocument) -> Self {
        let mut current = Page::new(setup.page);
        let content_top = DocumentChrome::new(setup, resources, document).draw(&mut current);
        Self {
            setup,
            resources,
            document,
            sealed: Vec::new(),
            current,
            left: ColumnCursor::fresh(content_top),
            right: ColumnCursor::fresh(content_top),
            placements: Vec::with_capacity(document.sections.len()),
            state: FlowState::AwaitingSection,
        }
    }

    pub fn run(mut self) -> PagedDocument {
        let document = self.document;
        let sections = &document.sections;
        let section_box = SectionBox::new(self.setup, self.resources);
        let mut index = 0;

        while self.state != FlowState::Done {
            self.state = match self.state {
                FlowState::AwaitingSection if index < sections.len() => FlowState::Placing,
                FlowState::AwaitingSection => FlowState::Done,
                FlowState::Placing => {
                    let column = Column::for_index(index);
                    let top = self.cursor(column).y;
                    match section_box.measure_and_place(&mut self.current, column, top, &sections[index]) {
                        Placement::Placed { box_height, cursor_y } => {
                            self.record(index, column, top, box_height, cursor_y, false);
                            index += 1;
                            FlowState::AwaitingSection
                        }
                        Placement::DoesNotFit { box_height } => {
                            debug!(index, ?column, box_height, top, "section overflows its column");
                            FlowState::Overflowed
                        }
                    }
                }
                FlowState::Overflowed => {
                    let column = Column::for_index(index);
                    let cursor = *self.cursor(column);
                    if cursor.used {
                        self.start_page();
                        FlowState::Placing
                    } else {
                        // Taller than an empty column; retrying would never succeed.
                        let (box_height, cursor_y) =
                            section_box.place_clamped(&mut self.current, column, cursor.y, &sections[index]);
                        warn!(
                            index,
                            page = self.sealed.len() + 1,
                            "⚠️ Section is taller than a full column, clamping its box"
                        );
                        self.record(index, column, cursor.y, box_height, cursor_y, true);
                        index += 1;
                        FlowState::AwaitingSection
                    }
                }
                FlowState::Done => FlowState::Done,
            };
        }

        self.sealed.push(self.current);
        PagedDocument {
            pages: self.sealed,
            placements: self.placements,
        }
    }

    fn cursor(&mut self, column: Column) -> &mut ColumnCursor {
        match column {
            Column::Left => &mut self.left,
            Column::Right => &mut self.right,
        }
    }

    fn record(&mut self, index: usize, column: Column, top: f32, height: f32, cursor_y: f32, forced: bool) {
        let page = self.sealed.len();
        *self.cursor(column) = ColumnCursor {
            y: cursor_y,
            used: true,
        };
        self.placements.push(PlacedSection {
            index,
            page,
            column,
            top,
            height,
            forced,
        });
    }

    fn start_page(&mut self) {
        let mut next = Page::new(self.setup.page);
        let top = DocumentChrome::new(self.setup, self.resources, self.document).draw(&mut next);
        self.sealed.push(std::mem::replace(&mut self.current, next));
        self.left = ColumnCursor::fresh(top);
        self.right = ColumnCursor::fresh(top);
        debug!(page = self.sealed.len() + 1, "📄 Started new page");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Section;
    use crate::resources::Brand;

    fn tall(lines: usize) -> Section {
        Section::new("Day", "").with_bullets((0..lines).map(|i| format!("Item {i}")))
    }

    fn layout(sections: Vec<Section>) -> (PageSetup, PagedDocument) {
        let setup = PageSetup::default();
        let resources = RenderResources::builtin(Brand::default());
        let document = ItineraryDocument {
            sections,
            ..Default::default()
        };
        let paged = PageFlowController::new(&setup, &resources, &document).run();
        (setup, paged)
    }

    fn content_top(setup: &PageSetup) -> f32 {
        setup.page.height - setup.header_height - setup.meta_strip_height - setup.rule_gap - setup.content_gap
    }

    #[test]
    fn empty_document_has_one_page() {
        let (_, paged) = layout(Vec::new());
        assert_eq!(paged.page_count(), 1);
        assert!(paged.placements.is_empty());
    }

    #[test]
    fn short_sections_alternate_columns_on_one_page() {
        let sections = (0..4).map(|i| Section::new(format!("Day {}", i + 1), "Short day.")).collect();
        let (setup, paged) = layout(sections);
        assert_eq!(paged.page_count(), 1);
        let columns: Vec<_> = paged.placements.iter().map(|p| p.column).collect();
        assert_eq!(columns, vec![Column::Left, Column::Right, Column::Left, Column::Right]);
        assert_eq!(paged.placements[0].top, content_top(&setup));
        assert_eq!(paged.placements[1].top, content_top(&setup));
        assert!(paged.placements[2].top < paged.placements[0].top);
    }

    #[test]
    fn overflow_in_one_column_resets_both() {
        let sections = vec![
            tall(40),
            Section::new("Day 2", "Short."),
            Section::new("Day 3", "Short."),
            Section::new("Day 4", "Short."),
        ];
        let (setup, paged) = layout(sections);
        assert_eq!(paged.page_count(), 2);
        let p = &paged.placements;
        assert_eq!((p[0].page, p[1].page), (0, 0));
        assert_eq!(p[2].page, 1);
        assert_eq!(p[2].top, content_top(&setup));
        // The right column had room on page one but follows the page break.
        assert_eq!(p[3].page, 1);
        assert_eq!(p[3].top, content_top(&setup));
        assert!(p.iter().all(|s| !s.forced));
    }

    #[test]
    fn oversized_section_on_first_page_is_clamped_in_place() {
        let (setup, paged) = layout(vec![tall(60)]);
        assert_eq!(paged.page_count(), 1);
        let placed = &paged.placements[0];
        assert!(placed.forced);
        assert!(placed.top - placed.height >= setup.bottom_margin - 1e-3);
    }

    #[test]
    fn oversized_section_after_others_gets_exactly_one_new_page() {
        let (_, paged) = layout(vec![Section::new("Day 1", "Short."), Section::new("Day 2", "Short."), tall(60)]);
        assert_eq!(paged.page_count(), 2);
        let last = &paged.placements[2];
        assert_eq!(last.page, 1);
        assert!(last.forced);
    }

    #[test]
    fn every_section_is_placed_once() {
        let sections: Vec<_> = (0..25).map(|i| tall(5 + (i * 7) % 50)).collect();
        let (_, paged) = layout(sections);
        let indices: Vec<_> = paged.placements.iter().map(|p| p.index).collect();
        assert_eq!(indices, (0..25).collect::<Vec<_>>());
        for p in &paged.placements {
            assert_eq!(p.column, Column::for_index(p.index));
        }
    }
}
