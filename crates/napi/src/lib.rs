#![deny(missing_docs)]
//! Node.js bindings that surface sheetmail's Rust implementation.

use napi::Error;
use napi_derive::napi;
use sheetmail_compose::{ComposeRequest, compose};
use sheetmail_core::{BindingList, BindingPair, HeaderOrientation, TabularAccessor};

/// Conversions between core types and NAPI shapes.
mod convert;
/// Export flow over records supplied by the host.
pub mod export;
/// Template field editing class.
pub mod fields;
/// Mapping session class.
pub mod mapper;
/// NAPI-exposed data structures.
pub mod types;

pub use export::export_email;
pub use fields::TemplateFields;
pub use mapper::MappingSession;
pub use types::*;

/// Composes a standalone HTML email from a template and one grid record.
///
/// Errors carry the composition message verbatim, e.g. "Lookup value not found.".
#[napi(js_name = "composeHtml")]
pub fn compose_html(input: ComposeInput, config: Option<ComposeConfig>) -> napi::Result<String> {
    let options = convert::to_compose_options(config);
    let bindings = BindingList::try_from_persisted(input.content_fields.as_slice())
        .map_err(|e| Error::from_reason(e.to_string()))?;
    let orientation: HeaderOrientation = input.header_orientation.unwrap_or_default().into();
    compose(
        &ComposeRequest {
            document: &input.document,
            background_color: &input.background_color,
            bindings: &bindings,
            grid: &input.data,
            lookup_field: &input.lookup_field,
            lookup_value: &input.lookup_value,
            orientation,
        },
        &options,
    )
    .map_err(fields::to_napi_error)
}

/// Returns true if `id` can name a template field.
#[napi]
pub fn is_valid_field_id(id: String) -> bool {
    sheetmail_core::is_valid_field_id(&id)
}

/// Parses a persisted `"slotId:columnName"` binding.
#[napi]
pub fn parse_binding(entry: String) -> napi::Result<BindingEntry> {
    entry
        .parse::<BindingPair>()
        .map(Into::into)
        .map_err(|e| Error::from_reason(e.to_string()))
}

/// Lists header labels with a sample value from the preview record.
#[napi]
pub fn column_previews(
    data: Vec<Vec<String>>,
    header_orientation: Option<HeaderAxis>,
) -> Vec<ColumnPreviewEntry> {
    let accessor = TabularAccessor::new(&data, header_orientation.unwrap_or_default().into());
    sheetmail_core::column_previews(&accessor)
        .into_iter()
        .map(Into::into)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(content_fields: &[&str]) -> ComposeInput {
        ComposeInput {
            document: r#"<p id="greeting">Hi</p>"#.into(),
            background_color: "#fff".into(),
            content_fields: content_fields.iter().map(|f| f.to_string()).collect(),
            data: vec![
                vec!["id".into(), "name".into()],
                vec!["1".into(), "Ada".into()],
            ],
            lookup_field: "id".into(),
            lookup_value: "1".into(),
            header_orientation: None,
        }
    }

    #[test]
    fn compose_html_injects_record() {
        let html = compose_html(input(&["greeting:name"]), None).unwrap();
        assert!(html.contains(r#"<p id="greeting">Hi Ada</p>"#));
    }

    #[test]
    fn compose_html_rejects_malformed_binding() {
        let err = compose_html(input(&["greeting:name", "greeting"]), None).unwrap_err();
        assert!(err.reason.contains("missing the ':' separator"));
    }
}
