//! Immutable state snapshot for undo/redo.
//!
//! A `HistorySnapshot` captures the element list, the selection and the
//! playhead time at one point of the edit history. Snapshots are validated
//! on construction and never mutated afterwards; the history stack hands
//! out shared references and the store clones what it restores.

use std::collections::HashSet;

use rb_common::{EditorElement, EditorError, EditorResult, ElementId, TimeMs};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySnapshot {
    elements: Vec<EditorElement>,
    selected: Option<ElementId>,
    time: TimeMs,
}

impl HistorySnapshot {
    /// Build a validated snapshot.
    ///
    /// Rejects duplicate element ids, invalid elements and a selection that
    /// refers to an element not in the list.
    pub fn new(
        elements: Vec<EditorElement>,
        selected: Option<ElementId>,
        time: TimeMs,
    ) -> EditorResult<Self> {
        let snapshot = Self::from_parts(elements, selected, time);
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Build without validation, for state the store already guarantees.
    pub(crate) fn from_parts(
        elements: Vec<EditorElement>,
        selected: Option<ElementId>,
        time: TimeMs,
    ) -> Self {
        Self {
            elements,
            selected,
            time,
        }
    }

    /// Snapshot of an empty editor at time 0.
    pub fn empty() -> Self {
        Self::from_parts(Vec::new(), None, TimeMs::ZERO)
    }

    pub fn elements(&self) -> &[EditorElement] {
        &self.elements
    }

    pub fn selected(&self) -> Option<&ElementId> {
        self.selected.as_ref()
    }

    pub fn time(&self) -> TimeMs {
        self.time
    }

    pub fn validate(&self) -> EditorResult<()> {
        let mut seen = HashSet::with_capacity(self.elements.len());
        for element in &self.elements {
            if !seen.insert(element.id.as_str()) {
                return Err(EditorError::InvalidSnapshot {
                    reason: format!("duplicate element id {}", element.id),
                });
            }
            element.validate().map_err(|e| EditorError::InvalidSnapshot {
                reason: format!("element {}: {e}", element.id),
            })?;
        }
        if let Some(selected) = &self.selected {
            if !seen.contains(selected.as_str()) {
                return Err(EditorError::InvalidSnapshot {
                    reason: format!("selected element {selected} is not in the snapshot"),
                });
            }
        }
        Ok(())
    }

    /// Rough memory footprint in bytes, for history budgeting.
    pub fn estimated_size(&self) -> usize {
        let mut size = std::mem::size_of::<Self>();
        for element in &self.elements {
            size += std::mem::size_of::<EditorElement>();
            size += element.id.as_str().len() + element.name.len();
            size += element.source().map_or(0, str::len);
        }
        size += self.selected.as_ref().map_or(0, |id| id.as_str().len());
        size
    }

    pub fn into_parts(self) -> (Vec<EditorElement>, Option<ElementId>, TimeMs) {
        (self.elements, self.selected, self.time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rb_common::{ElementKind, TextProperties, TimeFrame};

    fn text(id: &str) -> EditorElement {
        EditorElement::new(
            id,
            "Title",
            TimeFrame::from_millis(0, 1000).unwrap(),
            ElementKind::Text(TextProperties::default()),
        )
    }

    #[test]
    fn valid_snapshot_accepted() {
        let snap = HistorySnapshot::new(
            vec![text("a"), text("b")],
            Some(ElementId::from("b")),
            TimeMs(250),
        )
        .unwrap();
        assert_eq!(snap.elements().len(), 2);
        assert_eq!(snap.selected().map(ElementId::as_str), Some("b"));
        assert_eq!(snap.time(), TimeMs(250));
    }

    #[test]
    fn duplicate_ids_rejected() {
        let err = HistorySnapshot::new(vec![text("a"), text("a")], None, TimeMs::ZERO).unwrap_err();
        assert!(matches!(err, EditorError::InvalidSnapshot { .. }));
    }

    #[test]
    fn dangling_selection_rejected() {
        let err = HistorySnapshot::new(vec![text("a")], Some(ElementId::from("zzz")), TimeMs::ZERO)
            .unwrap_err();
        assert!(err.to_string().contains("zzz"));
    }

    #[test]
    fn inverted_time_frame_rejected() {
        let mut bad = text("a");
        bad.time_frame = TimeFrame {
            start: TimeMs(500),
            end: TimeMs(100),
        };
        assert!(HistorySnapshot::new(vec![bad], None, TimeMs::ZERO).is_err());
    }

    #[test]
    fn serde_roundtrip() {
        let snap = HistorySnapshot::new(vec![text("a")], Some(ElementId::from("a")), TimeMs(42)).unwrap();
        let json = serde_json::to_string(&snap).unwrap();
        assert!(json.contains("\"time\":42"));
        let back: HistorySnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snap);
    }

    #[test]
    fn estimated_size_grows_with_elements() {
        let empty = HistorySnapshot::empty();
        let one = HistorySnapshot::new(vec![text("a")], None, TimeMs::ZERO).unwrap();
        assert!(one.estimated_size() > empty.estimated_size());
    }
}
