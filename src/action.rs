/// Actions that a user or application can initiate on the selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectorAction<Custom = ()> {
    /// Move the cursor to the previous visible row.
    SelectPrev,
    /// Move the cursor to the next visible row.
    SelectNext,
    /// Move the cursor to the parent node.
    SelectParent,
    /// Move the cursor to the first visible child, if the node is checked.
    SelectChild,
    /// Move the cursor to the first visible row.
    SelectFirst,
    /// Move the cursor to the last visible row.
    SelectLast,
    /// Check or uncheck the node under the cursor.
    ToggleCheck,
    /// Append the encoded selection to the saved table.
    Save,
    /// Toggle drawing of guide lines.
    ToggleGuides,
    /// Custom action forwarded to the caller without internal handling.
    Custom(Custom),
}

/// Result of handling an action or key event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectorEvent<Custom = ()> {
    /// The action was handled internally and state was updated.
    Handled,
    /// The selection was saved; carries the number of tokens appended.
    Saved(usize),
    /// The action was ignored (e.g., nothing under the cursor).
    Unhandled,
    /// The action is forwarded to the caller for handling.
    Action(SelectorAction<Custom>),
}
