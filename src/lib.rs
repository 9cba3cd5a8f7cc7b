//! Hierarchical department → class → subclass checkbox selector for ratatui.
//!
//! [`SelectionModel`] owns the selection state and encodes it into `d`,
//! `d_c` and `d_c_s` tokens on save; [`SelectorView`] and
//! [`SavedItemsTable`] render it.
//!
//! Feature flags:
//! - `keymap`: crossterm-based key bindings and `SelectorViewState::handle_key*` helpers.
//! - `serde`: serde support for `HierarchyConfig`, `SelectionSnapshot` and `CascadePolicy`.

mod action;
mod config;
mod context;
mod error;
mod glyphs;
mod hierarchy;
#[cfg(feature = "keymap")]
mod keymap;
pub mod prelude;
mod selection;
mod state;
mod style;
mod token;
mod widget;

pub use action::{SelectorAction, SelectorEvent};
pub use config::HierarchyConfig;
pub use context::SelectorRowContext;
pub use error::{SelectionError, TokenParseError};
pub use glyphs::{
    HierarchyLabels, SelectorGlyphs, SelectorLabelParts, SelectorLabelProvider,
    SelectorLabelRenderer, selector_label_line, selector_name_cell,
};
pub use hierarchy::{ClassKey, DepartmentKey, Hierarchy, NodeId, SubclassKey};
#[cfg(feature = "keymap")]
pub use keymap::{KeymapProfile, SelectorKeyBindings};
pub use selection::{CascadePolicy, SelectionModel, SelectionSnapshot};
pub use state::SelectorViewState;
pub use style::{SavedTableStyle, SelectorScrollPolicy, SelectorStyle};
pub use token::SelectionToken;
pub use widget::{SavedItemsTable, SelectorView};
