use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("PDF generation failed: {0}")]
    Pdf(String),

    #[error("Report for '{0}' has nothing to render")]
    EmptyReport(String),
}
