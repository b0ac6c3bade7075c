#![deny(missing_docs)]
//! Sheetmail core: template field registry, tabular access, and field-to-column mapping.
//!
//! Everything here is pure and synchronous. Markup lives behind
//! [`DocumentAdapter`], so this crate has no HTML dependency.

/// Two-step delete confirmation.
pub mod confirm;
/// Document seam used by the registry.
pub mod document;
/// Registry and mapper refusal types.
pub mod error;
/// Slot-to-column bindings and the mapping session.
pub mod mapper;
/// Named template fields.
pub mod registry;
/// Orientation-aware grid access.
pub mod tabular;

pub use confirm::{ConfirmOutcome, DeleteConfirmation, Interaction, advance_confirmation};
pub use document::{DocumentAdapter, SLOT_ATTRIBUTE};
pub use error::{BindingParseError, FieldRejection, MapperRefusal};
pub use mapper::{
    BindingList, BindingPair, ColumnPreview, FieldMapper, MapperOutcome, column_previews,
};
pub use registry::{FieldChange, FieldRegistry, FieldUpdate, is_valid_field_id};
pub use tabular::{Grid, HeaderOrientation, TabularAccessor, cell, index_of};
