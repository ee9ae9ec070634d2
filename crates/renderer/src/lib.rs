//! # SensorHub Document Renderer
//!
//! Turns an assembled `SensorReport` into a downloadable document. The
//! analytics crate decides *what* is in a report; this crate only decides how
//! it looks on paper.
//!
//! ## Public API
//!
//! - `DocumentRenderer`: The rendering boundary used by the web server.
//! - `PdfRenderer`: A `printpdf` implementation producing A4 reports with a
//!   statistics summary, safe/critical bars and line charts.
//! - `RenderError`: The specific error types that can be returned from this crate.

pub mod error;
pub mod layout;
pub mod pdf;

pub use error::RenderError;
pub use pdf::PdfRenderer;

use analytics::{SensorReport, Thresholds};
use core_types::SensorKind;

/// Renders a finished report into document bytes.
pub trait DocumentRenderer: Send + Sync {
    /// `thresholds` are the ones the report's risk was evaluated against, or
    /// `None` when the category has none.
    fn render(
        &self,
        kind: SensorKind,
        report: &SensorReport,
        thresholds: Option<&Thresholds>,
    ) -> Result<Vec<u8>, RenderError>;

    /// The MIME type of the bytes returned by [`render`](Self::render).
    fn content_type(&self) -> &'static str;

    /// File extension, without the dot.
    fn extension(&self) -> &'static str;
}
