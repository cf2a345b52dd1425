use glam::UVec2;

use crate::core::atom::Atom;
use crate::input::event::PointerSample;

/// A click-locked or hash-selected sprite.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Atlas image the highlight is drawn over.
    pub file: String,
    /// Tile position in the selected sheet's grid.
    pub tile: UVec2,
    pub atom: Atom,
}

/// Idle: the panel follows the pointer. Focused: hover is ignored and one
/// sprite stays highlighted.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Focus {
    #[default]
    Idle,
    Focused(Selection),
}

/// The single, page-wide interaction state.
#[derive(Debug, Clone, Default)]
pub struct ViewportState {
    pub focus: Focus,
    /// Most recent pointer position, replayed on scroll and unfocus.
    pub last_pointer: Option<PointerSample>,
    /// Last fragment the inspector wrote itself; a matching hash change is
    /// an echo and is ignored once.
    pub last_written_hash: Option<String>,
}

impl ViewportState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_focused(&self) -> bool {
        matches!(self.focus, Focus::Focused(_))
    }

    pub fn selection(&self) -> Option<&Selection> {
        match &self.focus {
            Focus::Focused(selection) => Some(selection),
            Focus::Idle => None,
        }
    }
}
