//! Drag-to-reorder over the field list.
//!
//! Moves are applied on every hover, not on drop, so the list is always in
//! its committed order while a drag is in progress. Ending a drag never rolls
//! anything back.

use crate::store::FieldListStore;
use crate::{IndexError, check_index};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        /// Where the dragged field currently sits.
        source: usize,
    },
}

/// What a finished drag did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSummary {
    pub started_at: usize,
    pub ended_at: usize,
    pub moves: usize,
}

#[derive(Debug, Default)]
pub struct DragReorderProtocol {
    state: DragState,
    started_at: usize,
    moves: usize,
}

impl DragReorderProtocol {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn is_drag_source(&self, index: usize) -> bool {
        matches!(self.state, DragState::Dragging { source } if source == index)
    }

    pub fn begin_drag(&mut self, store: &FieldListStore, index: usize) -> Result<(), IndexError> {
        check_index(index, store.len())?;
        if let DragState::Dragging { source } = self.state {
            warn!(source, index, "drag restarted before previous one ended");
        }
        debug!(index, "drag started");
        self.state = DragState::Dragging { source: index };
        self.started_at = index;
        self.moves = 0;
        Ok(())
    }

    /// Reorders immediately when the hovered position differs from the
    /// dragged field's position. Returns the `(from, to)` move applied, if any.
    pub fn hover(
        &mut self,
        store: &mut FieldListStore,
        index: usize,
    ) -> Result<Option<(usize, usize)>, IndexError> {
        let DragState::Dragging { source } = self.state else {
            return Ok(None);
        };
        if source == index {
            return Ok(None);
        }

        store.move_field(source, index)?;
        self.state = DragState::Dragging { source: index };
        self.moves += 1;
        Ok(Some((source, index)))
    }

    /// Covers both drop and cancel.
    pub fn end_drag(&mut self) -> Option<DragSummary> {
        let DragState::Dragging { source } = std::mem::take(&mut self.state) else {
            return None;
        };
        let summary = DragSummary {
            started_at: self.started_at,
            ended_at: source,
            moves: self.moves,
        };
        info!(
            from = summary.started_at,
            to = summary.ended_at,
            moves = summary.moves,
            "drag ended"
        );
        self.moves = 0;
        Some(summary)
    }
}
