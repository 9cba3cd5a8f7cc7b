// Minimal example: sample hierarchy, a couple of toggles, one save, rendered off-screen.
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::prelude::Buffer;
use ratatui::widgets::{StatefulWidget, Widget};

use tui_storeselect::{
    DepartmentKey, HierarchyLabels, SavedItemsTable, SavedTableStyle, SelectionModel,
    SelectorAction, SelectorEvent, SelectorStyle, SelectorView, SelectorViewState,
};

fn main() {
    // Ten departments, three classes, two subclasses; global cascade.
    let mut selection = SelectionModel::default();
    let mut state = SelectorViewState::new();

    // Drive the model through the view the way key handling would.
    let dept = DepartmentKey::new(2);
    state.select_by_id(&selection, dept.into());
    state.handle_action::<()>(&mut selection, SelectorAction::ToggleCheck);
    state.handle_action::<()>(&mut selection, SelectorAction::SelectChild);
    state.handle_action::<()>(&mut selection, SelectorAction::ToggleCheck);

    // Or call the model directly.
    selection
        .toggle_subclass(dept.class(1).subclass(2))
        .expect("subclass is part of the sample hierarchy");

    if let SelectorEvent::Saved(count) =
        state.handle_action::<()>(&mut selection, SelectorAction::Save)
    {
        println!("saved {count} token(s): {:?}", selection.saved_strings().collect::<Vec<_>>());
    }

    let area = Rect::new(0, 0, 60, 16);
    let [tree_area, table_area] =
        Layout::horizontal([Constraint::Fill(2), Constraint::Fill(1)]).areas(area);
    let mut buffer = Buffer::empty(area);

    let label = HierarchyLabels;
    SelectorView::new(&selection, &label, SelectorStyle::default()).render(
        tree_area,
        &mut buffer,
        &mut state,
    );
    SavedItemsTable::new(&selection, SavedTableStyle::default()).render(table_area, &mut buffer);
}
