use thiserror::Error;

/// Why a registry operation was refused.
///
/// Rejections are never returned as `Err`: registry edits come from
/// interactive actions, so a refused edit leaves the registry unchanged and
/// is reported through [`crate::FieldChange::Rejected`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldRejection {
    /// Identifier does not match `^[A-Za-z][A-Za-z0-9-]*$`.
    #[error("Invalid field identifier: {0:?}")]
    InvalidIdentifier(String),
    /// Identifier already names a live field.
    #[error("Field identifier already in use: {0}")]
    DuplicateIdentifier(String),
}

/// Errors emitted while parsing a persisted `"slotId:columnName"` binding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingParseError {
    /// The entry has no `:` separator.
    #[error("Binding {0:?} is missing the ':' separator")]
    MissingSeparator(String),
    /// The slot half of the entry is empty.
    #[error("Binding {0:?} has an empty field identifier")]
    EmptySlot(String),
    /// The column half of the entry is empty.
    #[error("Binding {0:?} has an empty column name")]
    EmptyColumn(String),
}

/// Why the mapper refused to commit its draft binding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapperRefusal {
    /// Slot or column has not been chosen yet.
    #[error("Choose both a template field and a column")]
    IncompleteDraft,
    /// Slot text is not a valid field identifier.
    #[error("Invalid field identifier: {0:?}")]
    InvalidSlot(String),
    /// Column is not in the header of the loaded grid.
    #[error("Column not found in the loaded data: {0:?}")]
    UnknownColumn(String),
}
