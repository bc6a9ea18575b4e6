//! Page rendering and document export

pub mod days;
pub mod pdf;
pub mod templates;

pub use pdf::ItineraryDocument;
pub use templates::{IndexView, PageRenderer, PlanView};
