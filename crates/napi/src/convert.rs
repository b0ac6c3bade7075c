//! Conversions between sheetmail types and their NAPI shapes.

use crate::types::{
    BindingEntry, ColumnPreviewEntry, ComposeConfig, FieldChangeResult, HeaderAxis, MapperResult,
    TextPolicyKind,
};
use sheetmail_compose::{ComposeOptions, TextPolicy};
use sheetmail_core::{
    BindingPair, ColumnPreview, FieldChange, FieldUpdate, HeaderOrientation, MapperOutcome,
};

impl From<HeaderAxis> for HeaderOrientation {
    fn from(axis: HeaderAxis) -> Self {
        match axis {
            HeaderAxis::Horizontal => HeaderOrientation::Horizontal,
            HeaderAxis::Vertical => HeaderOrientation::Vertical,
        }
    }
}

/// Maps optional JS settings onto [`ComposeOptions`], keeping defaults for gaps.
pub fn to_compose_options(config: Option<ComposeConfig>) -> ComposeOptions {
    let cfg = config.unwrap_or_default();
    let defaults = ComposeOptions::default();
    ComposeOptions {
        text_policy: match cfg.text_policy {
            Some(TextPolicyKind::Replace) => TextPolicy::Replace,
            Some(TextPolicyKind::Append) => TextPolicy::Append,
            None => defaults.text_policy,
        },
        link_title: cfg.link_title.unwrap_or(defaults.link_title),
    }
}

impl From<BindingPair> for BindingEntry {
    fn from(pair: BindingPair) -> Self {
        Self {
            slot_id: pair.slot_id,
            column_name: pair.column_name,
        }
    }
}

impl From<BindingEntry> for BindingPair {
    fn from(entry: BindingEntry) -> Self {
        BindingPair::new(entry.slot_id, entry.column_name)
    }
}

impl From<ColumnPreview> for ColumnPreviewEntry {
    fn from(preview: ColumnPreview) -> Self {
        Self {
            name: preview.name,
            sample: preview.sample,
        }
    }
}

/// Flattens a registry update for JS callers.
pub fn field_change_result(update: &FieldUpdate) -> FieldChangeResult {
    let (kind, id, previous, reason) = match &update.change {
        FieldChange::Added(id) => ("added", Some(id.clone()), None, None),
        FieldChange::Renamed { from, to } => {
            ("renamed", Some(to.clone()), Some(from.clone()), None)
        }
        FieldChange::Removed(id) => ("removed", Some(id.clone()), None, None),
        FieldChange::Unchanged => ("unchanged", None, None, None),
        FieldChange::Rejected(rejection) => ("rejected", None, None, Some(rejection.to_string())),
    };
    FieldChangeResult {
        kind: kind.to_string(),
        id,
        previous,
        reason,
        fields: update.registry.iter().map(str::to_string).collect(),
    }
}

impl From<MapperOutcome> for MapperResult {
    fn from(outcome: MapperOutcome) -> Self {
        let (kind, index, binding, reason) = match outcome {
            MapperOutcome::Added(index) => ("added", Some(index as u32), None, None),
            MapperOutcome::Updated(index) => ("updated", Some(index as u32), None, None),
            MapperOutcome::Armed(pair) => ("armed", None, Some(pair.into()), None),
            MapperOutcome::Removed(pair) => ("removed", None, Some(pair.into()), None),
            MapperOutcome::Disarmed => ("disarmed", None, None, None),
            MapperOutcome::Unchanged => ("unchanged", None, None, None),
            MapperOutcome::Refused(refusal) => ("refused", None, None, Some(refusal.to_string())),
        };
        Self {
            kind: kind.to_string(),
            index,
            binding,
            reason,
        }
    }
}
