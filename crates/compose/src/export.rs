//! Export flow: load the content map and template, fetch the grid, compose.

use crate::engine::{ComposeRequest, compose};
use crate::error::{ContentMapError, ExportError};
use crate::options::ComposeOptions;
use crate::provider::{GridProvider, GridResponse};
use serde::{Deserialize, Serialize};
use sheetmail_core::{BindingList, BindingParseError, HeaderOrientation};

/// Persisted binding of a template to a spreadsheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentMap {
    /// Display title.
    pub title: String,
    /// Spreadsheet identifier.
    pub source_id: String,
    /// Range or sheet name; empty for the whole first sheet.
    #[serde(default)]
    pub source_range: String,
    /// Axis carrying the header labels.
    #[serde(default)]
    pub header_orientation: HeaderOrientation,
    /// Bindings in `"slotId:columnName"` form.
    #[serde(default)]
    pub content_fields: Vec<String>,
    /// Template this map feeds, if bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
}

impl ContentMap {
    /// Loads a content map from JSON.
    pub fn from_json(input: &str) -> Result<Self, ContentMapError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Loads a content map from YAML.
    pub fn from_yaml(input: &str) -> Result<Self, ContentMapError> {
        Ok(serde_yaml::from_str(input)?)
    }

    /// Parsed bindings; a malformed entry is an error.
    pub fn bindings(&self) -> Result<BindingList, BindingParseError> {
        BindingList::try_from_persisted(self.content_fields.as_slice())
    }
}

/// Persisted email template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    /// Body markup.
    pub doc: String,
    /// Body background color.
    #[serde(default)]
    pub background_color: String,
}

/// Body of an export request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    /// Content map to export.
    #[serde(default)]
    pub content_id: String,
    /// Header label of the lookup column.
    #[serde(default)]
    pub lookup_field: String,
    /// Value identifying the record.
    #[serde(default)]
    pub lookup_value: String,
}

/// Read access to stored records.
pub trait RecordStore {
    /// Content map with the given id.
    fn content(&self, id: &str) -> Option<ContentMap>;
    /// Template with the given id.
    fn template(&self, id: &str) -> Option<Template>;
}

/// Composed email ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposedEmail {
    /// Title of the content map.
    pub title: String,
    /// Complete HTML document.
    pub doc: String,
    /// Background color carried over from the template.
    pub background_color: String,
}

/// Successful result of [`export_content`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The email was composed.
    Composed(ComposedEmail),
    /// The provider needs the user's consent; nothing was composed.
    AuthorizationRequired {
        /// Consent page URL.
        auth_url: String,
    },
}

/// Runs one export request end to end.
pub fn export_content(
    request: &ExportRequest,
    store: &impl RecordStore,
    provider: &impl GridProvider,
    options: &ComposeOptions,
) -> Result<ExportOutcome, ExportError> {
    if request.content_id.is_empty() {
        return Err(ExportError::MissingContentId);
    }
    let content = store
        .content(&request.content_id)
        .ok_or(ExportError::ContentNotFound)?;
    let template_id = content
        .template_id
        .as_deref()
        .ok_or(ExportError::UnboundTemplate)?;
    let template = store
        .template(template_id)
        .ok_or(ExportError::TemplateNotFound)?;

    let bindings = content.bindings()?;
    let range = match provider.fetch(&content.source_id, &content.source_range)? {
        GridResponse::Values(range) => range,
        GridResponse::AuthorizationRequired { auth_url } => {
            log::warn!("grid provider requires authorization for {}", content.source_id);
            return Ok(ExportOutcome::AuthorizationRequired { auth_url });
        }
    };
    let grid = range.into_rows();

    let doc = compose(
        &ComposeRequest {
            document: &template.doc,
            background_color: &template.background_color,
            bindings: &bindings,
            grid: &grid,
            lookup_field: &request.lookup_field,
            lookup_value: &request.lookup_value,
            orientation: content.header_orientation,
        },
        options,
    )?;

    log::info!("exported content {}", request.content_id);
    Ok(ExportOutcome::Composed(ComposedEmail {
        title: content.title,
        doc,
        background_color: template.background_color,
    }))
}

/// JSON error payload: `{"error":{"message":...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error body.
    pub error: ErrorBody,
}

/// Message carried by an [`ErrorResponse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub message: String,
}

impl From<&ExportError> for ErrorResponse {
    fn from(err: &ExportError) -> Self {
        Self {
            error: ErrorBody {
                message: err.to_string(),
            },
        }
    }
}
