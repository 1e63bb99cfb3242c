//! Presentation helpers for generated content.

pub mod export;
pub mod format;

pub use export::{export_filename, render_document, EXPORT_CONTENT_TYPE};
pub use format::format_content;
