use crate::NodeId;

/// Result of a [`SelectionStore::toggle_locked`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockTransition {
    Locked,
    Unlocked,
}

/// Holds at most one hovered and at most one locked node, by handle.
///
/// Invariant: while a lock is held, hover transitions never become the basis
/// for the displayed panel: `set_hovered`/`clear_hovered` report `false` and
/// leave the store untouched. The store holds [`NodeId`] handles into the
/// dashboard's node registry, never node copies, so simulation merges through
/// the registry are visible to every holder of the id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionStore {
    hovered: Option<NodeId>,
    locked: Option<NodeId>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hovered(&self) -> Option<&NodeId> {
        self.hovered.as_ref()
    }

    pub fn locked(&self) -> Option<&NodeId> {
        self.locked.as_ref()
    }

    /// Record a hover. Returns `true` when the displayed panel must be
    /// re-rendered for this node.
    ///
    /// No-ops (returning `false`) under a lock, when the node-detail panel is
    /// not visible, and when this node is already the hovered one.
    pub fn set_hovered(&mut self, node_id: &NodeId, panel_visible: bool) -> bool {
        if self.locked.is_some() || !panel_visible {
            return false;
        }
        if self.hovered.as_ref() == Some(node_id) {
            return false;
        }
        self.hovered = Some(node_id.clone());
        true
    }

    /// Clear the hover. Returns `true` when the panel must be cleared.
    /// Mirrors the guards of [`Self::set_hovered`], including the redundancy
    /// guard: clearing an empty hover is a no-op.
    pub fn clear_hovered(&mut self, panel_visible: bool) -> bool {
        if self.locked.is_some() || !panel_visible || self.hovered.is_none() {
            return false;
        }
        self.hovered = None;
        true
    }

    /// Lock this node, or unlock it if it already holds the lock.
    pub fn toggle_locked(&mut self, node_id: &NodeId) -> LockTransition {
        if self.locked.as_ref() == Some(node_id) {
            self.locked = None;
            LockTransition::Unlocked
        } else {
            self.locked = Some(node_id.clone());
            LockTransition::Locked
        }
    }

    /// Clear both hover and lock unconditionally. Used on panel switch-away
    /// and on graph reload.
    pub fn reset_all(&mut self) {
        self.hovered = None;
        self.locked = None;
    }
}
