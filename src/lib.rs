//! Branded two-column itinerary documents rendered to PDF.
//!
//! The engine ([`builder::DocumentBuilder`]) is synchronous and owns all page state for
//! one call. [`routes`] exposes it over HTTP.

pub mod builder;
pub mod canvas;
pub mod chrome;
pub mod config;
pub mod document;
pub mod error;
pub mod flow;
pub mod footer;
pub mod geometry;
pub mod metrics;
pub mod models;
pub mod page_setup;
pub mod pdf;
pub mod resources;
pub mod routes;
pub mod section;
pub mod wrap;

pub use builder::DocumentBuilder;
pub use document::{ItineraryDocument, Section};
pub use resources::RenderResources;
