//! Export flow driven by records the host has already loaded.

use crate::types::{
    ContentRecord, EmailRecord, ErrorPayload, ExportInput, ExportResult, TemplateRecord,
};
use napi_derive::napi;
use sheetmail_compose::{
    ComposeOptions, ContentMap, ErrorResponse, ExportOutcome, ExportRequest, GridProvider,
    GridResponse, ProviderError, RecordStore, Template, ValueRange, export_content,
};
use sheetmail_core::Grid;

struct HostRecords {
    content: Option<ContentMap>,
    template: Option<Template>,
}

impl RecordStore for HostRecords {
    fn content(&self, _id: &str) -> Option<ContentMap> {
        self.content.clone()
    }

    fn template(&self, _id: &str) -> Option<Template> {
        self.template.clone()
    }
}

struct HostGrid {
    data: Option<Grid>,
    auth_url: Option<String>,
}

impl GridProvider for HostGrid {
    fn fetch(&self, sheet_id: &str, _range: &str) -> Result<GridResponse, ProviderError> {
        if let Some(auth_url) = &self.auth_url {
            return Ok(GridResponse::AuthorizationRequired {
                auth_url: auth_url.clone(),
            });
        }
        match &self.data {
            Some(values) => Ok(GridResponse::Values(ValueRange {
                values: values.clone(),
                ..ValueRange::default()
            })),
            None => Err(ProviderError::Request(format!(
                "no grid supplied for sheet {sheet_id}"
            ))),
        }
    }
}

impl From<ContentRecord> for ContentMap {
    fn from(record: ContentRecord) -> Self {
        Self {
            title: record.title,
            source_id: record.source_id,
            source_range: record.source_range.unwrap_or_default(),
            header_orientation: record.header_orientation.unwrap_or_default().into(),
            content_fields: record.content_fields,
            template_id: record.template_id,
        }
    }
}

impl From<TemplateRecord> for Template {
    fn from(record: TemplateRecord) -> Self {
        Self {
            doc: record.doc,
            background_color: record.background_color,
        }
    }
}

/// Validates an export request and composes its email.
///
/// Failures are returned as an error payload with a status, never thrown.
#[napi(js_name = "exportEmail")]
pub fn export_email(input: ExportInput, config: Option<crate::ComposeConfig>) -> ExportResult {
    let options: ComposeOptions = crate::convert::to_compose_options(config);
    let request = ExportRequest {
        content_id: input.content_id.unwrap_or_default(),
        lookup_field: input.lookup_field,
        lookup_value: input.lookup_value,
    };
    let store = HostRecords {
        content: input.content.map(Into::into),
        template: input.template.map(Into::into),
    };
    let provider = HostGrid {
        data: input.data,
        auth_url: input.auth_url,
    };

    match export_content(&request, &store, &provider, &options) {
        Ok(ExportOutcome::Composed(email)) => ExportResult {
            status: 200,
            email: Some(EmailRecord {
                title: email.title,
                doc: email.doc,
                background_color: email.background_color,
            }),
            auth_url: None,
            error: None,
        },
        Ok(ExportOutcome::AuthorizationRequired { auth_url }) => ExportResult {
            status: 302,
            email: None,
            auth_url: Some(auth_url),
            error: None,
        },
        Err(err) => {
            let response = ErrorResponse::from(&err);
            ExportResult {
                status: u32::from(err.status_code()),
                email: None,
                auth_url: None,
                error: Some(ErrorPayload {
                    message: response.error.message,
                }),
            }
        }
    }
}
