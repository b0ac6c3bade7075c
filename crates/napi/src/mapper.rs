//! Field-to-column mapping session exposed as a stateful class.

use crate::types::{BindingEntry, ColumnPreviewEntry, HeaderAxis, MapperResult};
use napi_derive::napi;
use sheetmail_core::{
    BindingList, FieldMapper, Grid, HeaderOrientation, TabularAccessor, column_previews,
};

/// Mapping session over a loaded grid.
#[napi]
pub struct MappingSession {
    mapper: FieldMapper,
    grid: Grid,
    orientation: HeaderOrientation,
}

#[napi]
impl MappingSession {
    #[napi(constructor)]
    /// Starts a session from persisted bindings and the current grid.
    pub fn new(
        content_fields: Vec<String>,
        data: Vec<Vec<String>>,
        header_orientation: Option<HeaderAxis>,
    ) -> Self {
        Self {
            mapper: FieldMapper::new(BindingList::from_persisted(content_fields.as_slice())),
            grid: data,
            orientation: header_orientation.unwrap_or_default().into(),
        }
    }

    /// Replaces the grid, e.g. after the sheet or orientation changed.
    #[napi]
    pub fn load_grid(&mut self, data: Vec<Vec<String>>, header_orientation: Option<HeaderAxis>) {
        self.grid = data;
        self.orientation = header_orientation.unwrap_or_default().into();
    }

    /// Bindings in persisted `"slotId:columnName"` form.
    #[napi(getter)]
    pub fn content_fields(&self) -> Vec<String> {
        self.mapper.bindings().to_persisted()
    }

    /// Header labels with sample values.
    #[napi]
    pub fn column_previews(&self) -> Vec<ColumnPreviewEntry> {
        column_previews(&self.accessor())
            .into_iter()
            .map(Into::into)
            .collect()
    }

    /// Loads binding `index` into the draft.
    #[napi]
    pub fn select(&mut self, index: u32) -> MapperResult {
        self.mapper.select(index as usize).into()
    }

    /// Clears the draft so the next commit appends.
    #[napi]
    pub fn start_new(&mut self) -> MapperResult {
        self.mapper.start_new().into()
    }

    /// Sets the draft's field identifier.
    #[napi]
    pub fn set_draft_slot(&mut self, slot_id: String) {
        self.mapper.set_draft_slot(slot_id);
    }

    /// Sets the draft's column.
    #[napi]
    pub fn set_draft_column(&mut self, column_name: String) {
        self.mapper.set_draft_column(column_name);
    }

    /// Commits the draft.
    #[napi]
    pub fn commit(&mut self) -> MapperResult {
        let accessor = TabularAccessor::new(&self.grid, self.orientation);
        self.mapper.commit(&accessor).into()
    }

    /// Activates the delete control of `binding`.
    #[napi]
    pub fn activate_delete(&mut self, binding: BindingEntry) -> MapperResult {
        self.mapper.activate_delete(&binding.into()).into()
    }

    /// Reports an interaction unrelated to deletion.
    #[napi]
    pub fn interact_elsewhere(&mut self) -> MapperResult {
        self.mapper.interact_elsewhere().into()
    }

    fn accessor(&self) -> TabularAccessor<'_> {
        TabularAccessor::new(&self.grid, self.orientation)
    }
}
