use std::sync::Arc;

use tracing::info;

use crate::document::ItineraryDocument;
use crate::error::RenderError;
use crate::flow::{PageFlowController, PagedDocument};
use crate::footer::FooterStamper;
use crate::page_setup::PageSetup;
use crate::pdf;
use crate::resources::RenderResources;

/// Entry point of the engine: layout, footers, then serialization.
///
/// A builder holds only read-only state, so one instance can serve concurrent renders.
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    resources: Arc<RenderResources>,
    setup: PageSetup,
}

impl DocumentBuilder {
    pub fn new(resources: Arc<RenderResources>) -> Self {
        Self {
            resources,
            setup: PageSetup::default(),
        }
    }

    pub fn with_setup(mut self, setup: PageSetup) -> Self {
        self.setup = setup;
        self
    }

    pub fn setup(&self) -> &PageSetup {
        &self.setup
    }

    /// Flows every section onto pages. Footers are not drawn yet.
    pub fn layout(&self, document: &ItineraryDocument) -> PagedDocument {
        PageFlowController::new(&self.setup, &self.resources, document).run()
    }

    /// Lays out the document, then stamps "Page i / N" once N is known.
    pub fn render_pages(&self, document: &ItineraryDocument) -> PagedDocument {
        let paged = self.layout(document);
        let stamper = FooterStamper::new(&self.setup, &self.resources, document.contact.as_deref());
        PagedDocument {
            pages: stamper.stamp(paged.pages),
            placements: paged.placements,
        }
    }

    pub fn build(&self, document: &ItineraryDocument) -> Result<Vec<u8>, RenderError> {
        let paged = self.render_pages(document);
        let bytes = pdf::serialize(&paged.pages, document, &self.resources)?;
        let forced = paged.placements.iter().filter(|p| p.forced).count();
        info!(
            sections = document.sections.len(),
            pages = paged.page_count(),
            forced,
            bytes = bytes.len(),
            "✅ Built itinerary PDF"
        );
        Ok(bytes)
    }
}
