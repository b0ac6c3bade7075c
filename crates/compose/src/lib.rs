#![deny(missing_docs)]
//! Sheetmail composition: inject one spreadsheet record into an HTML email template.

/// lol_html-backed template document.
pub mod document;
/// Composition algorithm.
pub mod engine;
/// Composition, provider, and export errors.
pub mod error;
/// Export flow over stored records and a grid provider.
pub mod export;
/// Content kinds and injected markup.
pub mod inject;
/// Composition options.
pub mod options;
/// Spreadsheet provider boundary.
pub mod provider;
/// Email document shell.
pub mod shell;

pub use document::TemplateDocument;
pub use engine::{ComposeRequest, compose};
pub use error::{ComposeError, ContentMapError, ExportError, ProviderError};
pub use export::{
    ComposedEmail, ContentMap, ErrorBody, ErrorResponse, ExportOutcome, ExportRequest,
    RecordStore, Template, export_content,
};
pub use inject::ColumnContentKind;
pub use options::{ComposeOptions, TextPolicy};
pub use provider::{GridProvider, GridResponse, MajorDimension, ValueRange};
pub use shell::wrap_document;
