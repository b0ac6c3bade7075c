//! Field-to-column mapping.
//!
//! [`BindingList`] holds the ordered `(slot, column)` pairs and only offers
//! pure edits. [`FieldMapper`] layers the interactive editing state on top:
//! the draft pair being edited, which pair is current, and the two-step
//! delete confirmation.

use crate::confirm::{DeleteConfirmation, Interaction, advance_confirmation};
use crate::error::{BindingParseError, MapperRefusal};
use crate::registry::is_valid_field_id;
use crate::tabular::{TabularAccessor, index_of};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Association between a template field and a grid column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingPair {
    /// Field identifier in the template.
    pub slot_id: String,
    /// Header label of the bound column.
    pub column_name: String,
}

impl BindingPair {
    /// Creates a pair.
    pub fn new(slot_id: impl Into<String>, column_name: impl Into<String>) -> Self {
        Self {
            slot_id: slot_id.into(),
            column_name: column_name.into(),
        }
    }
}

impl fmt::Display for BindingPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.slot_id, self.column_name)
    }
}

/// Parses the persisted `"slotId:columnName"` form.
///
/// Splits on the first `:` so column labels may themselves contain colons.
impl FromStr for BindingPair {
    type Err = BindingParseError;

    fn from_str(entry: &str) -> Result<Self, Self::Err> {
        let (slot, column) = entry
            .split_once(':')
            .ok_or_else(|| BindingParseError::MissingSeparator(entry.to_string()))?;
        if slot.is_empty() {
            return Err(BindingParseError::EmptySlot(entry.to_string()));
        }
        if column.is_empty() {
            return Err(BindingParseError::EmptyColumn(entry.to_string()));
        }
        Ok(Self::new(slot, column))
    }
}

/// Ordered sequence of binding pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BindingList {
    pairs: Vec<BindingPair>,
}

impl BindingList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Parses persisted entries, skipping malformed ones.
    pub fn from_persisted<S: AsRef<str>>(entries: &[S]) -> Self {
        let pairs = entries
            .iter()
            .filter_map(|entry| match entry.as_ref().parse::<BindingPair>() {
                Ok(pair) => Some(pair),
                Err(err) => {
                    log::warn!("skipping persisted binding: {err}");
                    None
                }
            })
            .collect();
        Self { pairs }
    }

    /// Parses persisted entries, failing on the first malformed one.
    ///
    /// Used where a dropped entry would silently change the output, such as
    /// composing from a stored content map.
    pub fn try_from_persisted<S: AsRef<str>>(entries: &[S]) -> Result<Self, BindingParseError> {
        let pairs = entries
            .iter()
            .map(|entry| entry.as_ref().parse::<BindingPair>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { pairs })
    }

    /// Serializes to the persisted `"slotId:columnName"` form.
    pub fn to_persisted(&self) -> Vec<String> {
        self.pairs.iter().map(BindingPair::to_string).collect()
    }

    /// Appends `pair`. Several pairs may read the same column.
    pub fn add_binding(&self, pair: BindingPair) -> Self {
        let mut pairs = self.pairs.clone();
        pairs.push(pair);
        Self { pairs }
    }

    /// Replaces the pair at `index`; out-of-range indexes change nothing.
    pub fn update_binding(&self, index: usize, pair: BindingPair) -> Self {
        let mut pairs = self.pairs.clone();
        if let Some(slot) = pairs.get_mut(index) {
            *slot = pair;
        }
        Self { pairs }
    }

    /// Updates the pair at `index` when given, appends otherwise.
    pub fn upsert(&self, index: Option<usize>, pair: BindingPair) -> Self {
        match index {
            Some(index) => self.update_binding(index, pair),
            None => self.add_binding(pair),
        }
    }

    /// Removes the first pair equal to `pair`.
    pub fn remove_binding(&self, pair: &BindingPair) -> Self {
        let mut pairs = self.pairs.clone();
        if let Some(index) = self.position(pair) {
            pairs.remove(index);
        }
        Self { pairs }
    }

    /// Index of the first pair equal to `pair`.
    pub fn position(&self, pair: &BindingPair) -> Option<usize> {
        self.pairs.iter().position(|p| p == pair)
    }

    /// Pair at `index`.
    pub fn get(&self, index: usize) -> Option<&BindingPair> {
        self.pairs.get(index)
    }

    /// Iterates in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &BindingPair> {
        self.pairs.iter()
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if there are no pairs.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Pairs as a slice.
    pub fn as_slice(&self) -> &[BindingPair] {
        &self.pairs
    }
}

impl FromIterator<BindingPair> for BindingList {
    fn from_iter<I: IntoIterator<Item = BindingPair>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}

/// Candidate column shown while choosing a binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnPreview {
    /// Header label.
    pub name: String,
    /// Value from the preview record, `""` when the record is short.
    pub sample: String,
}

/// Lists header labels with a sample value from the preview record.
pub fn column_previews(accessor: &TabularAccessor<'_>) -> Vec<ColumnPreview> {
    let samples = accessor.preview_row();
    accessor
        .header_row()
        .into_iter()
        .enumerate()
        .map(|(index, name)| ColumnPreview {
            name: name.to_string(),
            sample: crate::tabular::cell(&samples, index).to_string(),
        })
        .collect()
}

/// Result of a mapper interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapperOutcome {
    /// Draft was appended at this index.
    Added(usize),
    /// Draft replaced the pair at this index.
    Updated(usize),
    /// Pair was armed for deletion; activate it again to confirm.
    Armed(BindingPair),
    /// Pair was removed after confirmation.
    Removed(BindingPair),
    /// An armed deletion was cancelled.
    Disarmed,
    /// Nothing happened.
    Unchanged,
    /// Draft was not committed.
    Refused(MapperRefusal),
}

/// Interactive mapping session over a [`BindingList`].
#[derive(Debug, Clone, Default)]
pub struct FieldMapper {
    bindings: BindingList,
    draft: BindingPair,
    current: Option<usize>,
    confirmation: DeleteConfirmation<BindingPair>,
}

impl FieldMapper {
    /// Starts a session over existing bindings.
    pub fn new(bindings: BindingList) -> Self {
        Self {
            bindings,
            ..Self::default()
        }
    }

    /// Current bindings.
    pub fn bindings(&self) -> &BindingList {
        &self.bindings
    }

    /// Ends the session, returning the bindings.
    pub fn into_bindings(self) -> BindingList {
        self.bindings
    }

    /// Pair being edited.
    pub fn draft(&self) -> &BindingPair {
        &self.draft
    }

    /// Index of the pair being edited; `None` while drafting a new pair.
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Delete confirmation phase.
    pub fn confirmation(&self) -> &DeleteConfirmation<BindingPair> {
        &self.confirmation
    }

    /// Loads the pair at `index` into the draft for editing.
    pub fn select(&mut self, index: usize) -> MapperOutcome {
        let disarmed = self.disarm();
        let Some(pair) = self.bindings.get(index) else {
            return disarmed;
        };
        self.draft = pair.clone();
        self.current = Some(index);
        disarmed
    }

    /// Clears the draft so the next commit appends.
    pub fn start_new(&mut self) -> MapperOutcome {
        self.draft = BindingPair::default();
        self.current = None;
        self.disarm()
    }

    /// Sets the draft's field identifier.
    pub fn set_draft_slot(&mut self, slot_id: impl Into<String>) {
        self.draft.slot_id = slot_id.into();
    }

    /// Sets the draft's column.
    pub fn set_draft_column(&mut self, column_name: impl Into<String>) {
        self.draft.column_name = column_name.into();
    }

    /// Commits the draft against the currently loaded grid.
    ///
    /// The column must appear in the grid's header at commit time. Existing
    /// bindings are never revalidated, so a binding whose column later
    /// disappears stays until composition reports it.
    pub fn commit(&mut self, accessor: &TabularAccessor<'_>) -> MapperOutcome {
        self.confirmation = DeleteConfirmation::Idle;

        let draft = &self.draft;
        if draft.slot_id.is_empty() || draft.column_name.is_empty() {
            return MapperOutcome::Refused(MapperRefusal::IncompleteDraft);
        }
        if !is_valid_field_id(&draft.slot_id) {
            return MapperOutcome::Refused(MapperRefusal::InvalidSlot(draft.slot_id.clone()));
        }
        if index_of(&accessor.header_row(), &draft.column_name).is_none() {
            return MapperOutcome::Refused(MapperRefusal::UnknownColumn(
                draft.column_name.clone(),
            ));
        }

        let pair = std::mem::take(&mut self.draft);
        let index = self.current.take().filter(|&i| i < self.bindings.len());
        let outcome = match index {
            Some(index) => MapperOutcome::Updated(index),
            None => MapperOutcome::Added(self.bindings.len()),
        };
        log::debug!("committing binding {pair}");
        self.bindings = self.bindings.upsert(index, pair);
        outcome
    }

    /// Activates the delete control of `pair`.
    ///
    /// The first activation arms; the second removes the pair.
    pub fn activate_delete(&mut self, pair: &BindingPair) -> MapperOutcome {
        let state = std::mem::take(&mut self.confirmation);
        let outcome = advance_confirmation(state, Interaction::Activate(pair.clone()));
        self.confirmation = outcome.next_state;

        let Some(confirmed) = outcome.confirmed else {
            return MapperOutcome::Armed(pair.clone());
        };

        let Some(index) = self.bindings.position(&confirmed) else {
            return MapperOutcome::Unchanged;
        };
        self.bindings = self.bindings.remove_binding(&confirmed);
        self.current = match self.current {
            Some(current) if current == index => None,
            Some(current) if current > index => Some(current - 1),
            other => other,
        };
        log::debug!("removed binding {confirmed}");
        MapperOutcome::Removed(confirmed)
    }

    /// Reports an interaction unrelated to deletion.
    pub fn interact_elsewhere(&mut self) -> MapperOutcome {
        self.disarm()
    }

    fn disarm(&mut self) -> MapperOutcome {
        let state = std::mem::take(&mut self.confirmation);
        let was_armed = state.is_armed();
        self.confirmation = advance_confirmation(state, Interaction::Elsewhere).next_state;
        if was_armed {
            MapperOutcome::Disarmed
        } else {
            MapperOutcome::Unchanged
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tabular::{Grid, HeaderOrientation};

    fn grid() -> Grid {
        vec![
            vec!["id".into(), "name".into(), "headshotImage".into()],
            vec!["1".into(), "Ada".into()],
        ]
    }

    #[test]
    fn parses_and_prints_persisted_form() {
        let pair: BindingPair = "greeting:name".parse().unwrap();
        assert_eq!(pair, BindingPair::new("greeting", "name"));
        assert_eq!(pair.to_string(), "greeting:name");

        let with_colon: BindingPair = "when:time:utc".parse().unwrap();
        assert_eq!(with_colon.column_name, "time:utc");
    }

    #[test]
    fn rejects_malformed_entries() {
        assert_eq!(
            "nocolon".parse::<BindingPair>(),
            Err(BindingParseError::MissingSeparator("nocolon".into()))
        );
        assert!(matches!(
            ":name".parse::<BindingPair>(),
            Err(BindingParseError::EmptySlot(_))
        ));
        assert!(matches!(
            "slot:".parse::<BindingPair>(),
            Err(BindingParseError::EmptyColumn(_))
        ));
    }

    #[test]
    fn from_persisted_skips_bad_entries() {
        let list = BindingList::from_persisted(&["a:x", "broken", "b:y"]);
        assert_eq!(list.to_persisted(), vec!["a:x", "b:y"]);
    }

    #[test]
    fn try_from_persisted_reports_bad_entries() {
        let list = BindingList::try_from_persisted(&["a:x", "b:y"]).unwrap();
        assert_eq!(list.to_persisted(), vec!["a:x", "b:y"]);
        assert_eq!(
            BindingList::try_from_persisted(&["a:x", "broken", "b:"]),
            Err(BindingParseError::MissingSeparator("broken".into()))
        );
    }

    #[test]
    fn edits_return_new_lists() {
        let empty = BindingList::new();
        let one = empty.add_binding(BindingPair::new("a", "x"));
        let two = one.add_binding(BindingPair::new("b", "x"));
        assert!(empty.is_empty());
        assert_eq!(one.len(), 1);
        assert_eq!(two.len(), 2);

        let updated = two.update_binding(0, BindingPair::new("a", "y"));
        assert_eq!(updated.get(0), Some(&BindingPair::new("a", "y")));
        assert_eq!(two.get(0), Some(&BindingPair::new("a", "x")));

        let untouched = two.update_binding(9, BindingPair::new("z", "z"));
        assert_eq!(untouched, two);
    }

    #[test]
    fn upsert_appends_without_index() {
        let list = BindingList::new()
            .upsert(None, BindingPair::new("a", "x"))
            .upsert(Some(0), BindingPair::new("a", "y"));
        assert_eq!(list.to_persisted(), vec!["a:y"]);
    }

    #[test]
    fn remove_binding_drops_first_match_only() {
        let pair = BindingPair::new("a", "x");
        let list: BindingList = vec![pair.clone(), BindingPair::new("b", "y"), pair.clone()]
            .into_iter()
            .collect();
        let removed = list.remove_binding(&pair);
        assert_eq!(removed.to_persisted(), vec!["b:y", "a:x"]);
    }

    #[test]
    fn previews_follow_orientation() {
        let g = grid();
        let accessor = TabularAccessor::new(&g, HeaderOrientation::Horizontal);
        let previews = column_previews(&accessor);
        assert_eq!(previews.len(), 3);
        assert_eq!(previews[1].name, "name");
        assert_eq!(previews[1].sample, "Ada");
        assert_eq!(previews[2].sample, "");

        let vertical = vec![
            vec!["id".to_string(), "1".to_string()],
            vec!["name".to_string(), "Ada".to_string()],
        ];
        let accessor = TabularAccessor::new(&vertical, HeaderOrientation::Vertical);
        let names: Vec<_> = column_previews(&accessor)
            .into_iter()
            .map(|p| (p.name, p.sample))
            .collect();
        assert_eq!(
            names,
            vec![("id".into(), "1".into()), ("name".into(), "Ada".into())]
        );
    }

    #[test]
    fn commit_adds_then_updates() {
        let g = grid();
        let accessor = TabularAccessor::new(&g, HeaderOrientation::Horizontal);
        let mut mapper = FieldMapper::default();

        mapper.set_draft_slot("greeting");
        mapper.set_draft_column("name");
        assert_eq!(mapper.commit(&accessor), MapperOutcome::Added(0));
        assert_eq!(mapper.draft(), &BindingPair::default());

        mapper.select(0);
        assert_eq!(mapper.current(), Some(0));
        mapper.set_draft_column("id");
        assert_eq!(mapper.commit(&accessor), MapperOutcome::Updated(0));
        assert_eq!(mapper.bindings().to_persisted(), vec!["greeting:id"]);
        assert_eq!(mapper.current(), None);
    }

    #[test]
    fn commit_refuses_unknown_column_and_bad_slot() {
        let g = grid();
        let accessor = TabularAccessor::new(&g, HeaderOrientation::Horizontal);
        let mut mapper = FieldMapper::default();

        assert_eq!(
            mapper.commit(&accessor),
            MapperOutcome::Refused(MapperRefusal::IncompleteDraft)
        );

        mapper.set_draft_slot("greeting");
        mapper.set_draft_column("Name");
        assert_eq!(
            mapper.commit(&accessor),
            MapperOutcome::Refused(MapperRefusal::UnknownColumn("Name".into()))
        );

        mapper.set_draft_slot("2greeting");
        mapper.set_draft_column("name");
        assert!(matches!(
            mapper.commit(&accessor),
            MapperOutcome::Refused(MapperRefusal::InvalidSlot(_))
        ));
        assert!(mapper.bindings().is_empty());
    }

    #[test]
    fn bindings_survive_grid_changes() {
        let bindings = BindingList::from_persisted(&["photo:headshotImage"]);
        let mut mapper = FieldMapper::new(bindings);

        let shrunk: Grid = vec![vec!["id".into()]];
        let accessor = TabularAccessor::new(&shrunk, HeaderOrientation::Horizontal);
        mapper.set_draft_slot("ident");
        mapper.set_draft_column("id");
        mapper.commit(&accessor);

        assert_eq!(
            mapper.bindings().to_persisted(),
            vec!["photo:headshotImage", "ident:id"]
        );
    }

    #[test]
    fn delete_requires_two_activations() {
        let pair = BindingPair::new("a", "x");
        let mut mapper = FieldMapper::new(BindingList::from_persisted(&["a:x", "b:y"]));

        assert_eq!(mapper.activate_delete(&pair), MapperOutcome::Armed(pair.clone()));
        assert_eq!(mapper.bindings().len(), 2);

        assert_eq!(mapper.activate_delete(&pair), MapperOutcome::Removed(pair));
        assert_eq!(mapper.bindings().to_persisted(), vec!["b:y"]);
        assert!(!mapper.confirmation().is_armed());
    }

    #[test]
    fn unrelated_interaction_cancels_delete() {
        let pair = BindingPair::new("a", "x");
        let mut mapper = FieldMapper::new(BindingList::from_persisted(&["a:x"]));

        mapper.activate_delete(&pair);
        assert_eq!(mapper.interact_elsewhere(), MapperOutcome::Disarmed);
        assert_eq!(mapper.activate_delete(&pair), MapperOutcome::Armed(pair.clone()));

        // Selecting a pair to edit is also an unrelated interaction.
        assert_eq!(mapper.select(0), MapperOutcome::Disarmed);
        assert_eq!(mapper.bindings().len(), 1);
    }

    #[test]
    fn removing_before_current_shifts_selection() {
        let mut mapper = FieldMapper::new(BindingList::from_persisted(&["a:x", "b:y", "c:z"]));
        mapper.select(2);
        let first = BindingPair::new("a", "x");
        mapper.activate_delete(&first);
        mapper.activate_delete(&first);
        assert_eq!(mapper.current(), Some(1));
        assert_eq!(mapper.draft(), &BindingPair::new("c", "z"));
    }
}
