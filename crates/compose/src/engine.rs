//! Row lookup and content injection.

use crate::document::TemplateDocument;
use crate::error::ComposeError;
use crate::inject::{ColumnContentKind, image_markup, link_markup};
use crate::options::{ComposeOptions, TextPolicy};
use crate::shell::wrap_document;
use sheetmail_core::tabular::{cell, index_of};
use sheetmail_core::{BindingList, BindingPair, HeaderOrientation, TabularAccessor};

/// Inputs for one composition.
#[derive(Debug, Clone, Copy)]
pub struct ComposeRequest<'a> {
    /// Template body markup.
    pub document: &'a str,
    /// Body background color of the composed document.
    pub background_color: &'a str,
    /// Slot-to-column bindings, applied in order.
    pub bindings: &'a BindingList,
    /// Data grid.
    pub grid: &'a [Vec<String>],
    /// Header label of the column searched for `lookup_value`.
    pub lookup_field: &'a str,
    /// Value identifying the record.
    pub lookup_value: &'a str,
    /// Axis carrying the header labels.
    pub orientation: HeaderOrientation,
}

/// Record selected by the lookup key.
struct LookupRecord<'g> {
    header: Vec<&'g str>,
    values: Vec<&'g str>,
}

impl<'g> LookupRecord<'g> {
    fn resolve(
        accessor: &TabularAccessor<'g>,
        lookup_field: &str,
        lookup_value: &str,
    ) -> Result<Self, ComposeError> {
        let header = accessor.header_row();
        if header.is_empty() {
            return Err(ComposeError::EmptyGrid);
        }
        let lookup_index =
            index_of(&header, lookup_field).ok_or(ComposeError::LookupColumnNotFound)?;
        let record_index = accessor
            .find_record(lookup_index, lookup_value)
            .ok_or(ComposeError::LookupValueNotFound)?;
        Ok(Self {
            header,
            values: accessor.row(record_index),
        })
    }

    fn value_for(&self, column_name: &str) -> Result<&'g str, ComposeError> {
        let index = index_of(&self.header, column_name).ok_or(ComposeError::BoundColumnNotFound)?;
        Ok(cell(&self.values, index))
    }
}

/// Composes a standalone HTML email from a template and one grid record.
///
/// The record is the first one whose lookup column equals `lookup_value`.
/// Each binding then injects that record's cell into the first element whose
/// `id` equals the binding's slot. The lookup is validated before any
/// binding is applied, and the first failure aborts with no partial output.
///
/// # Examples
///
/// ```
/// use sheetmail_compose::{ComposeOptions, ComposeRequest, compose};
/// use sheetmail_core::{BindingList, HeaderOrientation};
///
/// let grid = vec![
///     vec!["id".to_string(), "name".to_string()],
///     vec!["1".to_string(), "Ada".to_string()],
/// ];
/// let bindings = BindingList::from_persisted(&["greeting:name"]);
/// let request = ComposeRequest {
///     document: r#"<p id="greeting">Hi</p>"#,
///     background_color: "#ffffff",
///     bindings: &bindings,
///     grid: &grid,
///     lookup_field: "id",
///     lookup_value: "1",
///     orientation: HeaderOrientation::Horizontal,
/// };
/// let html = compose(&request, &ComposeOptions::default()).unwrap();
/// assert!(html.contains(r#"<p id="greeting">Hi Ada</p>"#));
/// ```
pub fn compose(
    request: &ComposeRequest<'_>,
    options: &ComposeOptions,
) -> Result<String, ComposeError> {
    let accessor = TabularAccessor::new(request.grid, request.orientation);
    let record = LookupRecord::resolve(&accessor, request.lookup_field, request.lookup_value)?;

    let mut document = TemplateDocument::new(request.document);
    for pair in request.bindings.iter() {
        let content = record.value_for(&pair.column_name)?;
        apply_binding(&mut document, pair, content, options)?;
    }

    log::info!(
        "composed document for {}={} with {} binding(s)",
        request.lookup_field,
        request.lookup_value,
        request.bindings.len()
    );
    Ok(wrap_document(document.as_str(), request.background_color))
}

fn apply_binding(
    document: &mut TemplateDocument,
    pair: &BindingPair,
    content: &str,
    options: &ComposeOptions,
) -> Result<(), ComposeError> {
    let slot = pair.slot_id.as_str();
    let kind = ColumnContentKind::classify(&pair.column_name);
    log::debug!("injecting {kind:?} from column {:?} into #{slot}", pair.column_name);

    let applied = match kind {
        ColumnContentKind::Image => {
            document.append_html(slot, &image_markup(content, &pair.column_name))?
        }
        ColumnContentKind::Link => {
            document.append_html(slot, &link_markup(content, &options.link_title))?
        }
        ColumnContentKind::Text => {
            let text = match options.text_policy {
                TextPolicy::Append => {
                    let Some(existing) = document.text_content(slot)? else {
                        return Err(ComposeError::TargetElementNotFound);
                    };
                    format!("{existing} {content}")
                }
                TextPolicy::Replace => content.to_string(),
            };
            document.set_text(slot, &text)?
        }
    };

    if applied {
        Ok(())
    } else {
        Err(ComposeError::TargetElementNotFound)
    }
}
