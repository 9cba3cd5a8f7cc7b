pub use crate::{
    CascadePolicy, ClassKey, DepartmentKey, Hierarchy, HierarchyConfig, HierarchyLabels, NodeId,
    SavedItemsTable, SavedTableStyle, SelectionError, SelectionModel, SelectionSnapshot,
    SelectionToken, SelectorAction, SelectorEvent, SelectorGlyphs, SelectorLabelParts,
    SelectorLabelProvider, SelectorLabelRenderer, SelectorRowContext, SelectorScrollPolicy,
    SelectorStyle, SelectorView, SelectorViewState, SubclassKey, TokenParseError,
    selector_label_line, selector_name_cell,
};

#[cfg(feature = "keymap")]
pub use crate::{KeymapProfile, SelectorKeyBindings};
