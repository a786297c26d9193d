//! Navigation - where focus goes after an edit or an arrow key.
//!
//! Cells sit on a [`CellTrack`] next to decorative nodes (separators,
//! icons). "Next" and "previous" walk the track and skip anything that is
//! not an entry cell, so `12-34` navigates 2 → 3 straight over the dash.
//!
//! [`navigate`] is pure: the outcome depends only on the track, the focused
//! cell and the interaction.

use crate::state::{self, KeyboardEvent};

// =============================================================================
// CELL TRACK
// =============================================================================

/// One node on the track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackNode {
    /// Entry cell with its index into the token sequence.
    Cell(usize),
    /// Non-entry node drawn between cells.
    Decoration(String),
}

/// Ordered nodes of the widget row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellTrack {
    nodes: Vec<TrackNode>,
}

impl CellTrack {
    /// A plain track of `count` cells.
    pub fn cells(count: usize) -> Self {
        Self {
            nodes: (0..count).map(TrackNode::Cell).collect(),
        }
    }

    /// Insert a decoration after cell `cell`.
    ///
    /// Unknown cell indices leave the track unchanged.
    pub fn decorate_after(mut self, cell: usize, text: impl Into<String>) -> Self {
        if let Some(pos) = self.position_of(cell) {
            self.nodes.insert(pos + 1, TrackNode::Decoration(text.into()));
        }
        self
    }

    /// Insert a decoration before the first node.
    pub fn decorate_start(mut self, text: impl Into<String>) -> Self {
        self.nodes.insert(0, TrackNode::Decoration(text.into()));
        self
    }

    pub fn nodes(&self) -> &[TrackNode] {
        &self.nodes
    }

    /// Number of entry cells on the track.
    pub fn cell_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, TrackNode::Cell(_)))
            .count()
    }

    /// Whether the track holds each of the cells `0..count` exactly once.
    pub fn holds_cells(&self, count: usize) -> bool {
        let mut seen = vec![false; count];
        for node in &self.nodes {
            if let TrackNode::Cell(i) = node {
                match seen.get_mut(*i) {
                    Some(slot) if !*slot => *slot = true,
                    _ => return false,
                }
            }
        }
        seen.into_iter().all(|s| s)
    }

    fn position_of(&self, cell: usize) -> Option<usize> {
        self.nodes.iter().position(|n| *n == TrackNode::Cell(cell))
    }

    /// The next entry cell after `cell`, skipping decorations.
    pub fn next_cell(&self, cell: usize) -> Option<usize> {
        let pos = self.position_of(cell)?;
        self.nodes[pos + 1..].iter().find_map(|n| match n {
            TrackNode::Cell(i) => Some(*i),
            TrackNode::Decoration(_) => None,
        })
    }

    /// The previous entry cell before `cell`, skipping decorations.
    pub fn prev_cell(&self, cell: usize) -> Option<usize> {
        let pos = self.position_of(cell)?;
        self.nodes[..pos].iter().rev().find_map(|n| match n {
            TrackNode::Cell(i) => Some(*i),
            TrackNode::Decoration(_) => None,
        })
    }
}

// =============================================================================
// INTERACTIONS
// =============================================================================

/// The interaction that just happened in the focused cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// A character was inserted.
    Insert,
    /// Forward delete cleared the cell.
    DeleteForward,
    /// Backspace was pressed; `was_empty` is the cell state before the press.
    DeleteBackward { was_empty: bool },
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
}

impl Interaction {
    /// Map a keydown to the interaction it represents, if any.
    ///
    /// Only keys the navigation engine reacts to on keydown are mapped;
    /// insertion and forward delete arrive later as input events.
    pub fn from_key(event: &KeyboardEvent, cell_empty: bool) -> Option<Self> {
        match event.key.as_str() {
            state::ARROW_LEFT => Some(Self::ArrowLeft),
            state::ARROW_RIGHT => Some(Self::ArrowRight),
            state::ARROW_UP => Some(Self::ArrowUp),
            state::ARROW_DOWN => Some(Self::ArrowDown),
            state::BACKSPACE => Some(Self::DeleteBackward { was_empty: cell_empty }),
            _ => None,
        }
    }
}

/// Result of a navigation decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Navigation {
    /// Cell to focus next; `None` keeps focus where it is.
    pub target: Option<usize>,
    /// Whether the key's native behavior must be suppressed.
    pub prevent_default: bool,
}

impl Navigation {
    const STAY: Self = Self { target: None, prevent_default: false };

    fn to(target: Option<usize>, prevent_default: bool) -> Self {
        Self { target, prevent_default }
    }
}

/// Decide where focus goes after `interaction` in cell `current`.
pub fn navigate(track: &CellTrack, current: usize, interaction: Interaction) -> Navigation {
    match interaction {
        Interaction::Insert | Interaction::DeleteForward => {
            Navigation::to(track.next_cell(current), false)
        }
        // Clearing a filled cell is left to the native field
        Interaction::DeleteBackward { was_empty: false } => Navigation::STAY,
        Interaction::DeleteBackward { was_empty: true } => {
            Navigation::to(track.prev_cell(current), true)
        }
        Interaction::ArrowLeft => Navigation::to(track.prev_cell(current), true),
        Interaction::ArrowRight => Navigation::to(track.next_cell(current), true),
        Interaction::ArrowUp | Interaction::ArrowDown => Navigation::to(None, true),
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn dashed() -> CellTrack {
        // [0][1][2] - [3][4][5]
        CellTrack::cells(6).decorate_after(2, "-")
    }

    #[test]
    fn test_plain_track_adjacency() {
        let track = CellTrack::cells(4);
        assert_eq!(track.next_cell(0), Some(1));
        assert_eq!(track.next_cell(3), None);
        assert_eq!(track.prev_cell(0), None);
        assert_eq!(track.prev_cell(2), Some(1));
    }

    #[test]
    fn test_adjacency_skips_decorations() {
        let track = dashed().decorate_start("#");
        assert_eq!(track.nodes().len(), 8);
        assert_eq!(track.cell_count(), 6);
        assert_eq!(track.next_cell(2), Some(3));
        assert_eq!(track.prev_cell(3), Some(2));
        // Leading decoration is not a cell
        assert_eq!(track.prev_cell(0), None);
    }

    #[test]
    fn test_adjacency_skips_consecutive_decorations() {
        let track = CellTrack::cells(2).decorate_after(0, "·").decorate_after(0, "·");
        assert_eq!(track.next_cell(0), Some(1));
        assert_eq!(track.prev_cell(1), Some(0));
    }

    #[test]
    fn test_holds_cells() {
        assert!(dashed().holds_cells(6));
        assert!(!dashed().holds_cells(5));
        assert!(!CellTrack::cells(3).holds_cells(4));
    }

    #[test]
    fn test_decorate_unknown_cell_is_noop() {
        let track = CellTrack::cells(2).decorate_after(9, "-");
        assert_eq!(track, CellTrack::cells(2));
    }

    #[test]
    fn test_insert_moves_forward() {
        let track = CellTrack::cells(4);
        let nav = navigate(&track, 1, Interaction::Insert);
        assert_eq!(nav.target, Some(2));
        assert!(!nav.prevent_default);
    }

    #[test]
    fn test_insert_at_last_cell_stays() {
        let track = CellTrack::cells(4);
        assert_eq!(navigate(&track, 3, Interaction::Insert).target, None);
        assert_eq!(navigate(&track, 3, Interaction::DeleteForward).target, None);
    }

    #[test]
    fn test_backspace_on_empty_moves_back() {
        let track = CellTrack::cells(4);
        let nav = navigate(&track, 2, Interaction::DeleteBackward { was_empty: true });
        assert_eq!(nav.target, Some(1));
        assert!(nav.prevent_default);

        let at_start = navigate(&track, 0, Interaction::DeleteBackward { was_empty: true });
        assert_eq!(at_start.target, None);
    }

    #[test]
    fn test_backspace_on_filled_stays() {
        let track = CellTrack::cells(4);
        let nav = navigate(&track, 2, Interaction::DeleteBackward { was_empty: false });
        assert_eq!(nav, Navigation::default());
    }

    #[test]
    fn test_arrows() {
        let track = dashed();
        assert_eq!(navigate(&track, 3, Interaction::ArrowLeft), Navigation::to(Some(2), true));
        assert_eq!(navigate(&track, 2, Interaction::ArrowRight), Navigation::to(Some(3), true));
        assert_eq!(navigate(&track, 0, Interaction::ArrowLeft), Navigation::to(None, true));
        assert_eq!(navigate(&track, 5, Interaction::ArrowRight), Navigation::to(None, true));
        assert_eq!(navigate(&track, 1, Interaction::ArrowUp), Navigation::to(None, true));
        assert_eq!(navigate(&track, 1, Interaction::ArrowDown), Navigation::to(None, true));
    }

    #[test]
    fn test_interaction_from_key() {
        let backspace = KeyboardEvent::new(state::BACKSPACE);
        assert_eq!(
            Interaction::from_key(&backspace, true),
            Some(Interaction::DeleteBackward { was_empty: true })
        );
        assert_eq!(
            Interaction::from_key(&KeyboardEvent::new(state::ARROW_UP), false),
            Some(Interaction::ArrowUp)
        );
        assert_eq!(Interaction::from_key(&KeyboardEvent::new("5"), true), None);
        assert_eq!(Interaction::from_key(&KeyboardEvent::new(state::DELETE), false), None);
    }
}
