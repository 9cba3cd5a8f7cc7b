use ratatui::widgets::TableState;
use rustc_hash::{FxBuildHasher, FxHashMap};
use smallvec::SmallVec;

use crate::action::{SelectorAction, SelectorEvent};
use crate::hierarchy::NodeId;
use crate::selection::SelectionModel;
use crate::style::SelectorScrollPolicy;

#[cfg(feature = "keymap")]
use crate::keymap::SelectorKeyBindings;
#[cfg(feature = "keymap")]
use crossterm::event::KeyEvent;

/// A visible row with metadata used for rendering and navigation.
#[derive(Clone)]
pub struct VisibleRow {
    pub(crate) id: NodeId,
    pub(crate) level: u16,
    pub(crate) is_tail_stack: SmallVec<[bool; 4]>,
}

/// Widget state: cursor, scroll offset and the cached visible rows.
///
/// Departments are always visible. Classes show under a checked department,
/// subclasses under a checked class.
pub struct SelectorViewState {
    list_state: TableState,
    // Cached visible rows to avoid recomputing DFS every render.
    visible_rows: Vec<VisibleRow>,
    // Fast lookup from node id to visible row index.
    visible_index: FxHashMap<NodeId, usize>,
    // Selection revision the cache was built from; `None` forces a rebuild.
    built_revision: Option<u64>,
    draw_lines: bool,
    #[cfg(feature = "keymap")]
    keymap: SelectorKeyBindings,
}

impl Default for SelectorViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectorViewState {
    /// Creates a new empty state with default capacity.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a state with preallocated capacity for the given number of rows.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            list_state: TableState::default(),
            visible_rows: Vec::with_capacity(capacity),
            visible_index: FxHashMap::with_capacity_and_hasher(capacity, FxBuildHasher),
            built_revision: None,
            draw_lines: true,
            #[cfg(feature = "keymap")]
            keymap: SelectorKeyBindings::new(),
        }
    }

    #[cfg(feature = "keymap")]
    /// Returns a mutable reference to the key binding set.
    pub const fn keymap_mut(&mut self) -> &mut SelectorKeyBindings {
        &mut self.keymap
    }

    pub(crate) const fn list_state(&self) -> &TableState {
        &self.list_state
    }

    pub(crate) const fn list_state_mut(&mut self) -> &mut TableState {
        &mut self.list_state
    }

    pub(crate) fn visible_rows(&self) -> &[VisibleRow] {
        &self.visible_rows
    }

    fn visible_index_of(&self, id: NodeId) -> Option<usize> {
        self.visible_index.get(&id).copied()
    }

    /// Returns whether guide lines are drawn.
    #[inline]
    pub const fn draw_lines(&self) -> bool {
        self.draw_lines
    }

    /// Enables or disables drawing of guide lines.
    pub const fn set_draw_lines(&mut self, draw: bool) {
        self.draw_lines = draw;
    }

    /// Forces the visible rows to be rebuilt on next use.
    pub const fn invalidate(&mut self) {
        self.built_revision = None;
    }

    /// Selects the first visible row.
    pub const fn select_first(&mut self) {
        if self.visible_rows.is_empty() {
            self.list_state.select(None);
        } else {
            self.list_state.select(Some(0));
        }
    }

    /// Selects the last visible row.
    pub const fn select_last(&mut self) {
        self.list_state.select(self.visible_rows.len().checked_sub(1));
    }

    /// Moves the cursor to the previous visible row.
    pub fn select_prev(&mut self) {
        if self.visible_rows.is_empty() {
            self.list_state.select(None);
            return;
        }
        let last = self.visible_rows.len() - 1;
        let selected = self.list_state.selected().unwrap_or(0).min(last);
        self.list_state.select(Some(selected.saturating_sub(1)));
    }

    /// Moves the cursor to the next visible row.
    pub fn select_next(&mut self) {
        if self.visible_rows.is_empty() {
            self.list_state.select(None);
            return;
        }
        let last = self.visible_rows.len() - 1;
        let selected = self.list_state.selected().unwrap_or(0).min(last);
        self.list_state.select(Some((selected + 1).min(last)));
    }

    /// Adjusts scroll offset so the cursor is within the viewport.
    pub fn ensure_selection_visible(&mut self, viewport_height: usize) {
        self.clamp_selection();
        let Some(selected) = self.list_state.selected() else {
            return;
        };
        let viewport_height = viewport_height.max(1);
        let offset = self.list_state.offset();
        if selected < offset {
            *self.list_state.offset_mut() = selected;
        } else if selected >= offset + viewport_height {
            *self.list_state.offset_mut() = selected + 1 - viewport_height;
        }
    }

    /// Adjusts cursor visibility according to the provided scroll policy.
    pub fn ensure_selection_visible_with_policy(
        &mut self,
        viewport_height: usize,
        policy: SelectorScrollPolicy,
    ) {
        match policy {
            SelectorScrollPolicy::KeepInView => self.ensure_selection_visible(viewport_height),
            SelectorScrollPolicy::CenterOnSelect => {
                self.ensure_selection_visible_centered(viewport_height);
            }
        }
    }

    fn ensure_selection_visible_centered(&mut self, viewport_height: usize) {
        self.clamp_selection();
        let Some(selected) = self.list_state.selected() else {
            return;
        };
        let viewport_height = viewport_height.max(1);
        let total = self.visible_rows.len();
        if total <= viewport_height {
            *self.list_state.offset_mut() = 0;
            return;
        }

        // Center the cursor, then clamp to valid scroll range.
        let half = viewport_height / 2;
        let max_offset = total.saturating_sub(viewport_height);
        *self.list_state.offset_mut() = selected.saturating_sub(half).min(max_offset);
    }

    /// Returns the id of the node under the cursor, if any.
    pub fn selected_id(&self) -> Option<NodeId> {
        self.list_state
            .selected()
            .and_then(|idx| self.visible_rows.get(idx).map(|row| row.id))
    }

    /// Returns the depth level of the node under the cursor.
    pub fn selected_level(&self) -> Option<u16> {
        self.list_state
            .selected()
            .and_then(|idx| self.visible_rows.get(idx).map(|row| row.level))
    }

    /// Returns the number of visible rows in the current view.
    pub const fn visible_len(&self) -> usize {
        self.visible_rows.len()
    }

    /// Moves the cursor to the node if it is visible.
    pub fn select_by_id(&mut self, selection: &SelectionModel, id: NodeId) -> bool {
        self.ensure_visible_rows(selection);
        if let Some(idx) = self.visible_index_of(id) {
            self.list_state.select(Some(idx));
            true
        } else {
            false
        }
    }

    /// Rebuilds the visible rows if the selection changed since the last build.
    ///
    /// The cursor stays on the same node when it remains visible, otherwise it
    /// falls back to the nearest visible ancestor.
    pub fn ensure_visible_rows(&mut self, selection: &SelectionModel) {
        if self.built_revision == Some(selection.revision()) {
            return;
        }

        let cursor = self.selected_id();
        self.rebuild_visible_rows(selection);
        self.built_revision = Some(selection.revision());

        let mut target = cursor;
        while let Some(id) = target {
            if let Some(idx) = self.visible_index_of(id) {
                self.list_state.select(Some(idx));
                return;
            }
            target = id.parent();
        }
        self.clamp_selection();
    }

    /// Handles a selector action and returns the resulting event.
    pub fn handle_action<C>(
        &mut self,
        selection: &mut SelectionModel,
        action: SelectorAction<C>,
    ) -> SelectorEvent<C> {
        self.ensure_visible_rows(selection);
        self.handle_action_inner(selection, action)
    }

    #[cfg(feature = "keymap")]
    /// Resolves a key event into an action and handles it.
    pub fn handle_key(
        &mut self,
        selection: &mut SelectionModel,
        key: KeyEvent,
    ) -> SelectorEvent<()> {
        self.ensure_visible_rows(selection);
        let Some(action) = self.keymap.resolve(key) else {
            return SelectorEvent::Unhandled;
        };
        self.handle_action_inner(selection, action)
    }

    #[cfg(feature = "keymap")]
    /// Resolves a key event with a custom mapping and handles it.
    pub fn handle_key_with<C, F>(
        &mut self,
        selection: &mut SelectionModel,
        key: KeyEvent,
        custom: F,
    ) -> SelectorEvent<C>
    where
        F: Fn(KeyEvent) -> Option<C>,
    {
        self.ensure_visible_rows(selection);
        let Some(action) = self.keymap.resolve_with(key, custom) else {
            return SelectorEvent::Unhandled;
        };
        self.handle_action_inner(selection, action)
    }

    fn handle_action_inner<C>(
        &mut self,
        selection: &mut SelectionModel,
        action: SelectorAction<C>,
    ) -> SelectorEvent<C> {
        match action {
            SelectorAction::Custom(_) => return SelectorEvent::Action(action),
            // Saving does not depend on the cursor.
            SelectorAction::Save => return SelectorEvent::Saved(selection.save()),
            _ => {}
        }

        if self.visible_rows.is_empty() {
            return SelectorEvent::Unhandled;
        }

        match action {
            SelectorAction::SelectPrev => {
                self.select_prev();
                SelectorEvent::Handled
            }
            SelectorAction::SelectNext => {
                self.select_next();
                SelectorEvent::Handled
            }
            SelectorAction::SelectParent => {
                if let Some(parent) = self.selected_id().and_then(NodeId::parent)
                    && let Some(idx) = self.visible_index_of(parent)
                {
                    self.list_state.select(Some(idx));
                    return SelectorEvent::Handled;
                }
                SelectorEvent::Unhandled
            }
            SelectorAction::SelectChild => self.select_first_child(),
            SelectorAction::SelectFirst => {
                self.select_first();
                SelectorEvent::Handled
            }
            SelectorAction::SelectLast => {
                self.select_last();
                SelectorEvent::Handled
            }
            SelectorAction::ToggleCheck => {
                let Some(id) = self.selected_id() else {
                    return SelectorEvent::Unhandled;
                };
                match selection.toggle(id) {
                    Ok(_) => {
                        self.ensure_visible_rows(selection);
                        SelectorEvent::Handled
                    }
                    Err(err) => {
                        tracing::debug!(%err, "toggle from view rejected");
                        SelectorEvent::Unhandled
                    }
                }
            }
            SelectorAction::ToggleGuides => {
                self.draw_lines = !self.draw_lines;
                SelectorEvent::Handled
            }
            SelectorAction::Save | SelectorAction::Custom(_) => SelectorEvent::Action(action),
        }
    }

    fn select_first_child<C>(&mut self) -> SelectorEvent<C> {
        let Some(selected_idx) = self.list_state.selected() else {
            return SelectorEvent::Unhandled;
        };
        let Some(row) = self.visible_rows.get(selected_idx) else {
            return SelectorEvent::Unhandled;
        };
        // Children of a checked node are rendered right below it.
        if let Some(next) = self.visible_rows.get(selected_idx + 1)
            && next.level == row.level + 1
        {
            self.list_state.select(Some(selected_idx + 1));
            return SelectorEvent::Handled;
        }
        SelectorEvent::Unhandled
    }

    fn rebuild_visible_rows(&mut self, selection: &SelectionModel) {
        self.visible_rows.clear();
        self.visible_index.clear();
        // Reserve for the fully checked tree so rebuilds after toggles do not grow.
        let hint = selection.hierarchy().size_hint();
        if hint > self.visible_rows.capacity() {
            self.visible_rows.reserve(hint);
            self.visible_index.reserve(hint);
        }

        let mut is_tail_stack: SmallVec<[bool; 4]> = SmallVec::new();
        for department in selection.hierarchy().departments() {
            self.push_subtree(selection, department.into(), &mut is_tail_stack);
        }
    }

    fn push_subtree(
        &mut self,
        selection: &SelectionModel,
        id: NodeId,
        is_tail_stack: &mut SmallVec<[bool; 4]>,
    ) {
        let hierarchy = selection.hierarchy();
        let child_count = hierarchy.child_count(id);
        self.visible_index.insert(id, self.visible_rows.len());
        self.visible_rows.push(VisibleRow {
            id,
            level: id.level(),
            is_tail_stack: is_tail_stack.clone(),
        });

        if child_count == 0 || !selection.is_selected(id) {
            return;
        }
        for (idx, child) in hierarchy.children(id).enumerate() {
            is_tail_stack.push(idx + 1 == child_count);
            self.push_subtree(selection, child, is_tail_stack);
            is_tail_stack.pop();
        }
    }

    const fn clamp_selection(&mut self) {
        if self.visible_rows.is_empty() {
            self.list_state.select(None);
            return;
        }

        if let Some(selected) = self.list_state.selected()
            && selected >= self.visible_rows.len()
        {
            self.list_state
                .select(Some(self.visible_rows.len().saturating_sub(1)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::{DepartmentKey, Hierarchy};

    fn small_model() -> SelectionModel {
        SelectionModel::new(Hierarchy::generated(3, 2, 2).unwrap())
    }

    fn dept(ordinal: u16) -> DepartmentKey {
        DepartmentKey::new(ordinal)
    }

    fn ids(state: &SelectorViewState) -> Vec<NodeId> {
        state.visible_rows.iter().map(|row| row.id).collect()
    }

    #[test]
    fn only_departments_visible_without_selection() {
        let model = small_model();
        let mut state = SelectorViewState::new();

        state.ensure_visible_rows(&model);

        assert_eq!(
            ids(&state),
            vec![NodeId::from(dept(1)), NodeId::from(dept(2)), NodeId::from(dept(3))]
        );
    }

    #[test]
    fn checked_nodes_reveal_children() {
        let mut model = small_model();
        model.toggle_department(dept(2)).unwrap();
        model.toggle_class(dept(2).class(2)).unwrap();
        let mut state = SelectorViewState::new();

        state.ensure_visible_rows(&model);

        assert_eq!(
            ids(&state),
            vec![
                NodeId::from(dept(1)),
                NodeId::from(dept(2)),
                NodeId::from(dept(2).class(1)),
                NodeId::from(dept(2).class(2)),
                NodeId::from(dept(2).class(2).subclass(1)),
                NodeId::from(dept(2).class(2).subclass(2)),
                NodeId::from(dept(3)),
            ]
        );
        let levels: Vec<_> = state.visible_rows.iter().map(|row| row.level).collect();
        assert_eq!(levels, vec![0, 0, 1, 1, 2, 2, 0]);
        let tails: Vec<_> = state.visible_rows[4..6]
            .iter()
            .map(|row| row.is_tail_stack.to_vec())
            .collect();
        assert_eq!(tails, vec![vec![true, false], vec![true, true]]);
    }

    #[test]
    fn toggle_keeps_cursor_on_node() {
        let mut model = small_model();
        let mut state = SelectorViewState::new();
        assert!(state.select_by_id(&model, dept(3).into()));

        let event = state.handle_action::<()>(&mut model, SelectorAction::ToggleCheck);
        assert_eq!(event, SelectorEvent::Handled);
        assert!(model.is_department_selected(dept(3)));
        assert_eq!(state.selected_id(), Some(dept(3).into()));
        assert_eq!(state.visible_len(), 5);

        state.handle_action::<()>(&mut model, SelectorAction::SelectChild);
        assert_eq!(state.selected_id(), Some(dept(3).class(1).into()));
    }

    #[test]
    fn cursor_falls_back_to_ancestor_when_row_hides() {
        let mut model = small_model();
        model.toggle_department(dept(1)).unwrap();
        model.toggle_class(dept(1).class(1)).unwrap();
        let mut state = SelectorViewState::new();
        assert!(state.select_by_id(&model, dept(1).class(1).subclass(2).into()));

        // Unchecked outside the view: the cache notices the new revision.
        model.toggle_class(dept(1).class(1)).unwrap();
        state.ensure_visible_rows(&model);

        assert_eq!(state.selected_id(), Some(dept(1).class(1).into()));
    }

    #[test]
    fn save_action_reports_appended_tokens() {
        let mut model = small_model();
        let mut state = SelectorViewState::new();

        assert_eq!(
            state.handle_action::<()>(&mut model, SelectorAction::Save),
            SelectorEvent::Saved(0)
        );

        state.select_by_id(&model, dept(2).into());
        state.handle_action::<()>(&mut model, SelectorAction::ToggleCheck);
        assert_eq!(
            state.handle_action::<()>(&mut model, SelectorAction::Save),
            SelectorEvent::Saved(1)
        );
        assert_eq!(model.saved_strings().collect::<Vec<_>>(), vec!["2"]);
    }

    #[test]
    fn select_parent_and_custom_actions() {
        let mut model = small_model();
        model.toggle_department(dept(1)).unwrap();
        let mut state = SelectorViewState::new();
        state.select_by_id(&model, dept(1).class(2).into());

        assert_eq!(
            state.handle_action::<()>(&mut model, SelectorAction::SelectParent),
            SelectorEvent::Handled
        );
        assert_eq!(state.selected_id(), Some(dept(1).into()));
        assert_eq!(
            state.handle_action::<()>(&mut model, SelectorAction::SelectParent),
            SelectorEvent::Unhandled
        );
        assert_eq!(
            state.handle_action(&mut model, SelectorAction::Custom(7)),
            SelectorEvent::Action(SelectorAction::Custom(7))
        );
    }

    #[test]
    fn select_last_then_next_stays_on_last_row() {
        let mut model = small_model();
        let mut state = SelectorViewState::new();

        state.handle_action::<()>(&mut model, SelectorAction::SelectLast);
        state.handle_action::<()>(&mut model, SelectorAction::SelectNext);

        assert_eq!(state.list_state.selected(), Some(2));
        assert_eq!(state.selected_id(), Some(NodeId::from(dept(3))));
    }

    #[test]
    fn select_last_then_toggle_checks_last_row() {
        let mut model = small_model();
        let mut state = SelectorViewState::new();

        state.handle_action::<()>(&mut model, SelectorAction::SelectLast);
        let event = state.handle_action::<()>(&mut model, SelectorAction::ToggleCheck);

        assert_eq!(event, SelectorEvent::Handled);
        assert!(model.is_department_selected(dept(3)));
        assert_eq!(state.selected_level(), Some(0));

        state.handle_action::<()>(&mut model, SelectorAction::SelectLast);
        assert_eq!(state.selected_id(), Some(NodeId::from(dept(3).class(2))));
        assert_eq!(state.selected_level(), Some(1));
    }

    #[test]
    fn out_of_range_cursor_is_clamped_before_moving() {
        let mut model = small_model();
        let mut state = SelectorViewState::new();
        state.ensure_visible_rows(&model);
        state.list_state.select(Some(usize::MAX));

        state.handle_action::<()>(&mut model, SelectorAction::SelectPrev);

        assert_eq!(state.list_state.selected(), Some(1));
    }

    #[test]
    fn invalidate_forces_rebuild() {
        let model = small_model();
        let mut state = SelectorViewState::new();
        state.ensure_visible_rows(&model);
        state.visible_rows.clear();

        state.ensure_visible_rows(&model);
        assert_eq!(state.visible_len(), 0);

        state.invalidate();
        state.ensure_visible_rows(&model);
        assert_eq!(state.visible_len(), 3);
    }

    #[test]
    fn rebuild_reserves_for_full_tree() {
        let model = small_model();
        let mut state = SelectorViewState::new();

        state.ensure_visible_rows(&model);

        assert!(state.visible_rows.capacity() >= model.hierarchy().size_hint());
    }

    #[test]
    fn select_prev_clears_selection_when_empty() {
        let mut state = SelectorViewState::new();
        state.list_state.select(Some(0));

        state.select_prev();

        assert_eq!(state.list_state.selected(), None);
    }

    #[test]
    fn centered_scroll_clamps_offset() {
        let mut model = SelectionModel::new(Hierarchy::generated(20, 1, 1).unwrap());
        let mut state = SelectorViewState::new();
        state.select_by_id(&model, dept(19).into());
        state.handle_action::<()>(&mut model, SelectorAction::SelectNext);

        state.ensure_selection_visible_with_policy(6, SelectorScrollPolicy::CenterOnSelect);

        assert_eq!(state.list_state.selected(), Some(19));
        assert_eq!(state.list_state.offset(), 14);
    }
}
