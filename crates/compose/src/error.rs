use sheetmail_core::BindingParseError;
use thiserror::Error;

/// Errors that abort composition.
///
/// Display strings are surfaced verbatim to the caller of the export
/// endpoint, so the four lookup messages are fixed.
#[derive(Debug, Error)]
pub enum ComposeError {
    /// The grid has no header labels.
    #[error("No data found.")]
    EmptyGrid,
    /// The lookup column is not among the header labels.
    #[error("Lookup column not found.")]
    LookupColumnNotFound,
    /// No record carries the lookup value in the lookup column.
    #[error("Lookup value not found.")]
    LookupValueNotFound,
    /// No element carries the bound field identifier.
    #[error("Element not found.")]
    TargetElementNotFound,
    /// A binding names a column that is no longer in the header.
    #[error("Bound column not found.")]
    BoundColumnNotFound,
    /// A CSS selector could not be parsed.
    #[error("Invalid selector {selector:?}: {source}")]
    Selector {
        /// Selector text
        selector: String,
        /// Parser error
        source: lol_html::errors::SelectorError,
    },
    /// The markup could not be rewritten.
    #[error("Rewrite error: {0}")]
    Rewrite(#[from] lol_html::errors::RewritingError),
}

/// Errors raised by a grid provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport or API failure reported by the provider.
    #[error("Provider request failed: {0}")]
    Request(String),
    /// The provider answered with a payload that is not a value range.
    #[error("Malformed provider response: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Errors raised while loading persisted records.
#[derive(Debug, Error)]
pub enum ContentMapError {
    /// JSON payload could not be deserialized.
    #[error("Invalid JSON record: {0}")]
    Json(#[from] serde_json::Error),
    /// YAML payload could not be deserialized.
    #[error("Invalid YAML record: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Errors raised by the export flow.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The request carried no content id.
    #[error("Content ID is required.")]
    MissingContentId,
    /// No content map has the requested id.
    #[error("Content is not found.")]
    ContentNotFound,
    /// The content map names a template that does not exist.
    #[error("Template is not found.")]
    TemplateNotFound,
    /// The content map has no template.
    #[error("Content is not bound to a template.")]
    UnboundTemplate,
    /// The content map holds a malformed binding.
    #[error(transparent)]
    InvalidBinding(#[from] BindingParseError),
    /// The grid could not be fetched.
    #[error(transparent)]
    Provider(#[from] ProviderError),
    /// Composition failed.
    #[error(transparent)]
    Compose(#[from] ComposeError),
}

impl ExportError {
    /// HTTP status reported alongside the error message.
    pub fn status_code(&self) -> u16 {
        match self {
            ExportError::MissingContentId | ExportError::UnboundTemplate => 400,
            ExportError::ContentNotFound | ExportError::TemplateNotFound => 404,
            ExportError::Provider(_) => 502,
            ExportError::InvalidBinding(_) | ExportError::Compose(_) => 500,
        }
    }
}
