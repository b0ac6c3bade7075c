//! NAPI-exposed data structures.

use napi_derive::napi;

/// Axis along which header labels run.
#[napi(string_enum)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderAxis {
    /// Row 0 holds the header.
    #[default]
    #[napi(value = "horizontal")]
    Horizontal,
    /// Column 0 holds the header.
    #[napi(value = "vertical")]
    Vertical,
}

/// How text bindings combine with existing element text.
#[napi(string_enum)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextPolicyKind {
    /// Existing text, a space, then the value.
    #[napi(value = "append")]
    Append,
    /// The value alone.
    #[napi(value = "replace")]
    Replace,
}

/// Optional composition settings.
#[napi(object)]
#[derive(Debug, Clone, Default)]
pub struct ComposeConfig {
    /// Text binding policy (defaults to `append`).
    pub text_policy: Option<TextPolicyKind>,
    /// Title and label of injected links (defaults to "Get more info").
    pub link_title: Option<String>,
}

/// Everything needed to compose one email.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct ComposeInput {
    /// Template body markup.
    pub document: String,
    /// Body background color.
    pub background_color: String,
    /// Bindings in `"slotId:columnName"` form.
    pub content_fields: Vec<String>,
    /// Grid values as returned by the spreadsheet provider.
    pub data: Vec<Vec<String>>,
    /// Header label of the lookup column.
    pub lookup_field: String,
    /// Value identifying the record.
    pub lookup_value: String,
    /// Header axis (defaults to `horizontal`).
    pub header_orientation: Option<HeaderAxis>,
}

/// Slot-to-column binding.
#[napi(object)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingEntry {
    /// Template field identifier.
    pub slot_id: String,
    /// Bound column label.
    pub column_name: String,
}

/// Column label with a sample value.
#[napi(object)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnPreviewEntry {
    /// Header label.
    pub name: String,
    /// Value from the preview record.
    pub sample: String,
}

/// Outcome of a registry edit.
#[napi(object)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChangeResult {
    /// `added`, `renamed`, `removed`, `unchanged`, or `rejected`.
    pub kind: String,
    /// Identifier that was added, removed, or is the rename target.
    pub id: Option<String>,
    /// Identifier replaced by a rename.
    pub previous: Option<String>,
    /// Rejection message.
    pub reason: Option<String>,
    /// Live field identifiers after the edit.
    pub fields: Vec<String>,
}

/// Outcome of a mapper interaction.
#[napi(object)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapperResult {
    /// `added`, `updated`, `armed`, `removed`, `disarmed`, `unchanged`, or `refused`.
    pub kind: String,
    /// Index written by `added` or `updated`.
    pub index: Option<u32>,
    /// Binding armed or removed.
    pub binding: Option<BindingEntry>,
    /// Refusal message.
    pub reason: Option<String>,
}

/// Stored content map as loaded by the host.
#[napi(object)]
#[derive(Debug, Clone, Default)]
pub struct ContentRecord {
    /// Display title.
    pub title: String,
    /// Spreadsheet identifier.
    pub source_id: String,
    /// Range or sheet name.
    pub source_range: Option<String>,
    /// Header axis (defaults to `horizontal`).
    pub header_orientation: Option<HeaderAxis>,
    /// Bindings in `"slotId:columnName"` form.
    pub content_fields: Vec<String>,
    /// Bound template, if any.
    pub template_id: Option<String>,
}

/// Stored template as loaded by the host.
#[napi(object)]
#[derive(Debug, Clone, Default)]
pub struct TemplateRecord {
    /// Body markup.
    pub doc: String,
    /// Body background color.
    pub background_color: String,
}

/// Export request plus the records and grid the host resolved for it.
#[napi(object)]
#[derive(Debug, Clone, Default)]
pub struct ExportInput {
    /// Content map id from the request body.
    pub content_id: Option<String>,
    /// Header label of the lookup column.
    pub lookup_field: String,
    /// Value identifying the record.
    pub lookup_value: String,
    /// Content map found for `content_id`.
    pub content: Option<ContentRecord>,
    /// Template found for the content map's `template_id`.
    pub template: Option<TemplateRecord>,
    /// Grid fetched for the content map's source.
    pub data: Option<Vec<Vec<String>>>,
    /// Set instead of `data` when the provider asked for authorization.
    pub auth_url: Option<String>,
}

/// Composed email ready to be stored.
#[napi(object)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailRecord {
    /// Title of the content map.
    pub title: String,
    /// Complete HTML document.
    pub doc: String,
    /// Background color carried over from the template.
    pub background_color: String,
}

/// Error body in the `{"error":{"message":...}}` payload.
#[napi(object)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorPayload {
    /// Human-readable message.
    pub message: String,
}

/// Response for an export request.
#[napi(object)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResult {
    /// HTTP status: 200, 302 for an authorization redirect, or the error status.
    pub status: u32,
    /// Composed email on success.
    pub email: Option<EmailRecord>,
    /// Consent page to redirect to.
    pub auth_url: Option<String>,
    /// Error payload on failure.
    pub error: Option<ErrorPayload>,
}
