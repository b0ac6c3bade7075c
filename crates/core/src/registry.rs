//! Template field registry: the set of named slots that live in a document.
//!
//! The registry is a value type. Every edit returns a fresh snapshot inside a
//! [`FieldUpdate`] and leaves the receiver untouched, so a caller holding the
//! previous snapshot never observes a half-applied change. Keeping the
//! document in step with the registry is the job of a [`DocumentAdapter`].

use crate::document::{DocumentAdapter, SLOT_ATTRIBUTE};
use crate::error::FieldRejection;
use serde::{Deserialize, Serialize};

/// Returns true if `id` is a usable field identifier.
///
/// Identifiers start with an ASCII letter followed by ASCII letters, digits,
/// or hyphens (`^[A-Za-z][A-Za-z0-9-]*$`).
///
/// # Examples
///
/// ```
/// use sheetmail_core::registry::is_valid_field_id;
///
/// assert!(is_valid_field_id("hero-image"));
/// assert!(!is_valid_field_id("1st"));
/// assert!(!is_valid_field_id(""));
/// ```
pub fn is_valid_field_id(id: &str) -> bool {
    let mut bytes = id.bytes();
    match bytes.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            bytes.all(|b| b.is_ascii_alphanumeric() || b == b'-')
        }
        _ => false,
    }
}

/// What an edit did to the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChange {
    /// A new field was appended.
    Added(String),
    /// An existing field was renamed in place.
    Renamed {
        /// Identifier that was released.
        from: String,
        /// Identifier that replaced it.
        to: String,
    },
    /// A field was deleted.
    Removed(String),
    /// The edit had nothing to do (unknown id on remove, rename onto itself).
    Unchanged,
    /// The edit was refused; the registry is unchanged.
    Rejected(FieldRejection),
}

/// Snapshot produced by a registry edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldUpdate {
    /// Registry to hold from now on.
    pub registry: FieldRegistry,
    /// Description of the edit.
    pub change: FieldChange,
}

impl FieldUpdate {
    fn unchanged(registry: &FieldRegistry, change: FieldChange) -> Self {
        Self {
            registry: registry.clone(),
            change,
        }
    }

    /// Mirrors a rename or removal onto the document's slot attribute.
    ///
    /// Returns whether the document had an element to update. Additions are
    /// left to the caller, which knows which element the author selected.
    pub fn sync_document<D: DocumentAdapter>(&self, document: &mut D) -> Result<bool, D::Error> {
        match &self.change {
            FieldChange::Renamed { from, to } => document.set_attribute(from, SLOT_ATTRIBUTE, to),
            FieldChange::Removed(id) => document.remove_attribute(id, SLOT_ATTRIBUTE),
            _ => Ok(false),
        }
    }
}

/// Ordered set of live field identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldRegistry {
    fields: Vec<String>,
}

impl FieldRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Rebuilds a registry from identifiers found in a saved document.
    ///
    /// Invalid identifiers and repeats are dropped, keeping first occurrences.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ids.into_iter()
            .fold(Self::new(), |registry, id| {
                registry.add_or_rename(None, id.as_ref()).registry
            })
    }

    /// Adds `new_id`, or renames `previous` to `new_id` when `previous` is live.
    ///
    /// A rename keeps the field's position. Invalid identifiers and
    /// identifiers that are already live are refused without error.
    pub fn add_or_rename(&self, previous: Option<&str>, new_id: &str) -> FieldUpdate {
        if !is_valid_field_id(new_id) {
            log::debug!("rejecting invalid field id {new_id:?}");
            return FieldUpdate::unchanged(
                self,
                FieldChange::Rejected(FieldRejection::InvalidIdentifier(new_id.to_string())),
            );
        }

        if self.contains(new_id) {
            if previous == Some(new_id) {
                return FieldUpdate::unchanged(self, FieldChange::Unchanged);
            }
            log::debug!("rejecting duplicate field id {new_id:?}");
            return FieldUpdate::unchanged(
                self,
                FieldChange::Rejected(FieldRejection::DuplicateIdentifier(new_id.to_string())),
            );
        }

        let mut fields = self.fields.clone();
        let change = match previous.and_then(|p| self.position(p)) {
            Some(index) => {
                let from = std::mem::replace(&mut fields[index], new_id.to_string());
                log::debug!("renaming field {from:?} to {new_id:?}");
                FieldChange::Renamed {
                    from,
                    to: new_id.to_string(),
                }
            }
            None => {
                log::debug!("adding field {new_id:?}");
                fields.push(new_id.to_string());
                FieldChange::Added(new_id.to_string())
            }
        };

        FieldUpdate {
            registry: Self { fields },
            change,
        }
    }

    /// Deletes `id` if it is live.
    pub fn remove(&self, id: &str) -> FieldUpdate {
        let Some(index) = self.position(id) else {
            return FieldUpdate::unchanged(self, FieldChange::Unchanged);
        };

        let mut fields = self.fields.clone();
        let removed = fields.remove(index);
        log::debug!("removing field {removed:?}");
        FieldUpdate {
            registry: Self { fields },
            change: FieldChange::Removed(removed),
        }
    }

    /// Returns true if `id` is live.
    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Iterates over live identifiers in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    /// Number of live fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no field is live.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Live identifiers as a slice.
    pub fn as_slice(&self) -> &[String] {
        &self.fields
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.fields.iter().position(|f| f == id)
    }
}
