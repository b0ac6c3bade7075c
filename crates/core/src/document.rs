//! Seam between field bookkeeping and the markup that carries the fields.

/// Attribute whose value names the field an element carries.
pub const SLOT_ATTRIBUTE: &str = "id";

/// Mutable view of a document addressed by field identifier.
///
/// The registry never touches markup itself; renames and removals are pushed
/// through this trait so any document representation can sit behind it.
pub trait DocumentAdapter {
    /// Error raised when the document cannot be processed.
    type Error;

    /// Sets `attr` to `value` on the element whose slot attribute equals
    /// `element_id`. Returns `false` when no such element exists.
    fn set_attribute(
        &mut self,
        element_id: &str,
        attr: &str,
        value: &str,
    ) -> Result<bool, Self::Error>;

    /// Clears `attr` from the element whose slot attribute equals
    /// `element_id`. Returns `false` when no such element exists.
    fn remove_attribute(&mut self, element_id: &str, attr: &str) -> Result<bool, Self::Error>;
}
