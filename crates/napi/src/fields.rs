//! Template field editing exposed as a stateful class.

use crate::convert::field_change_result;
use crate::types::FieldChangeResult;
use napi::Error;
use napi_derive::napi;
use sheetmail_compose::{ComposeError, TemplateDocument};
use sheetmail_core::{FieldChange, FieldRegistry};

/// Template markup together with its field registry.
#[napi]
pub struct TemplateFields {
    registry: FieldRegistry,
    document: TemplateDocument,
}

#[napi]
impl TemplateFields {
    #[napi(constructor)]
    /// Loads template markup, registering the fields it already carries.
    pub fn new(markup: String) -> napi::Result<Self> {
        let document = TemplateDocument::new(markup);
        let registry = FieldRegistry::from_ids(document.field_ids().map_err(to_napi_error)?);
        Ok(Self { registry, document })
    }

    /// Live field identifiers.
    #[napi(getter)]
    pub fn fields(&self) -> Vec<String> {
        self.registry.iter().map(str::to_string).collect()
    }

    /// Current template markup.
    #[napi(getter)]
    pub fn markup(&self) -> String {
        self.document.as_str().to_string()
    }

    /// Marks the first element matching `selector` as field `id`.
    ///
    /// When that element already carries a live field, the field is renamed
    /// to `id` instead of gaining a second entry. The markup is only touched
    /// when the registry accepts `id`.
    #[napi]
    pub fn mark(&mut self, selector: String, id: String) -> napi::Result<FieldChangeResult> {
        let current = self
            .document
            .field_id_at(&selector)
            .map_err(to_napi_error)?
            .filter(|existing| self.registry.contains(existing));
        let update = self.registry.add_or_rename(current.as_deref(), &id);
        let marked = match &update.change {
            FieldChange::Added(marked) | FieldChange::Renamed { to: marked, .. } => {
                Some(marked.as_str())
            }
            _ => None,
        };
        if let Some(marked) = marked
            && !self
                .document
                .mark_field(&selector, marked)
                .map_err(to_napi_error)?
        {
            return Err(Error::from_reason(format!(
                "No element matches selector {selector:?}"
            )));
        }
        let result = field_change_result(&update);
        self.registry = update.registry;
        Ok(result)
    }

    /// Renames field `previous` to `id`, updating the element in place.
    #[napi]
    pub fn rename(&mut self, previous: String, id: String) -> napi::Result<FieldChangeResult> {
        let update = self.registry.add_or_rename(Some(&previous), &id);
        update.sync_document(&mut self.document).map_err(to_napi_error)?;
        let result = field_change_result(&update);
        self.registry = update.registry;
        Ok(result)
    }

    /// Removes field `id` and clears it from its element.
    #[napi]
    pub fn remove(&mut self, id: String) -> napi::Result<FieldChangeResult> {
        let update = self.registry.remove(&id);
        update.sync_document(&mut self.document).map_err(to_napi_error)?;
        let result = field_change_result(&update);
        self.registry = update.registry;
        Ok(result)
    }
}

pub(crate) fn to_napi_error(err: ComposeError) -> Error {
    Error::from_reason(err.to_string())
}
