use std::hash::Hash;

use rustc_hash::{FxBuildHasher, FxHashSet};

use crate::error::SelectionError;
use crate::hierarchy::{ClassKey, DepartmentKey, Hierarchy, NodeId, SubclassKey};
use crate::token::SelectionToken;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How far a department or class toggle clears the level below it.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CascadePolicy {
    /// Any department toggle clears every class and subclass; any class
    /// toggle clears every subclass.
    #[default]
    Global,
    /// Only the toggled node's descendants are cleared.
    Scoped,
}

/// Set that remembers insertion order and answers membership in O(1).
#[derive(Clone, Debug)]
struct OrderedSet<K> {
    order: Vec<K>,
    index: FxHashSet<K>,
}

impl<K: Copy + Eq + Hash> OrderedSet<K> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            order: Vec::with_capacity(capacity),
            index: FxHashSet::with_capacity_and_hasher(capacity, FxBuildHasher),
        }
    }

    fn contains(&self, key: &K) -> bool {
        self.index.contains(key)
    }

    fn insert(&mut self, key: K) -> bool {
        if self.index.insert(key) {
            self.order.push(key);
            return true;
        }
        false
    }

    // Returns the new membership.
    fn toggle(&mut self, key: K) -> bool {
        if self.index.remove(&key) {
            self.order.retain(|item| *item != key);
            false
        } else {
            self.insert(key)
        }
    }

    fn retain(&mut self, mut keep: impl FnMut(&K) -> bool) {
        let index = &mut self.index;
        self.order.retain(|item| {
            let retained = keep(item);
            if !retained {
                index.remove(item);
            }
            retained
        });
    }

    fn clear(&mut self) {
        self.order.clear();
        self.index.clear();
    }

    fn as_slice(&self) -> &[K] {
        &self.order
    }

    fn iter(&self) -> std::slice::Iter<'_, K> {
        self.order.iter()
    }
}

/// Department/class/subclass selection state plus the saved-items table.
///
/// Lower levels are kept consistent with their parents only through the
/// cascade run by [`toggle_department`](Self::toggle_department) and
/// [`toggle_class`](Self::toggle_class); a class may be toggled on while its
/// department is unselected.
#[derive(Clone, Debug)]
pub struct SelectionModel {
    hierarchy: Hierarchy,
    policy: CascadePolicy,
    departments: OrderedSet<DepartmentKey>,
    classes: OrderedSet<ClassKey>,
    subclasses: OrderedSet<SubclassKey>,
    saved: Vec<SelectionToken>,
    revision: u64,
}

/// Snapshot of the selection sets (in insertion order) and the saved table.
///
/// With the `serde` feature enabled, this type derives `Serialize`/`Deserialize`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionSnapshot {
    /// Selected department ordinals.
    pub departments: Vec<u16>,
    /// Selected `(department, class)` ordinals.
    pub classes: Vec<(u16, u16)>,
    /// Selected `(department, class, subclass)` ordinals.
    pub subclasses: Vec<(u16, u16, u16)>,
    /// Saved tokens, oldest first.
    pub saved: Vec<String>,
}

impl Default for SelectionModel {
    fn default() -> Self {
        Self::new(Hierarchy::sample())
    }
}

impl SelectionModel {
    /// Creates an empty selection over the hierarchy with the global cascade.
    pub fn new(hierarchy: Hierarchy) -> Self {
        Self::with_policy(hierarchy, CascadePolicy::Global)
    }

    /// Creates an empty selection with an explicit cascade policy.
    pub fn with_policy(hierarchy: Hierarchy, policy: CascadePolicy) -> Self {
        let departments = hierarchy.department_count();
        Self {
            policy,
            departments: OrderedSet::with_capacity(departments),
            classes: OrderedSet::with_capacity(departments),
            subclasses: OrderedSet::with_capacity(departments),
            saved: Vec::new(),
            revision: 0,
            hierarchy,
        }
    }

    pub const fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    pub const fn policy(&self) -> CascadePolicy {
        self.policy
    }

    pub const fn set_policy(&mut self, policy: CascadePolicy) {
        self.policy = policy;
    }

    /// Counter bumped by every successful mutation; views use it to detect
    /// stale caches.
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Selected departments in the order they were toggled on.
    pub fn selected_departments(&self) -> &[DepartmentKey] {
        self.departments.as_slice()
    }

    /// Selected classes in the order they were toggled on.
    pub fn selected_classes(&self) -> &[ClassKey] {
        self.classes.as_slice()
    }

    /// Selected subclasses in the order they were toggled on.
    pub fn selected_subclasses(&self) -> &[SubclassKey] {
        self.subclasses.as_slice()
    }

    /// Flips the department and cascades to classes and subclasses.
    ///
    /// Returns the department's new membership.
    pub fn toggle_department(&mut self, key: DepartmentKey) -> Result<bool, SelectionError> {
        self.checked(key.into())?;
        let selected = self.departments.toggle(key);
        self.revision += 1;
        match self.policy {
            CascadePolicy::Global => {
                self.classes.clear();
                self.subclasses.clear();
            }
            CascadePolicy::Scoped => {
                self.classes.retain(|class| class.department() != key);
                self.subclasses
                    .retain(|subclass| subclass.department() != key);
            }
        }
        tracing::trace!(
            department = key.ordinal(),
            selected,
            policy = ?self.policy,
            "department toggled"
        );
        Ok(selected)
    }

    /// Flips the class and cascades to subclasses.
    ///
    /// Returns the class's new membership.
    pub fn toggle_class(&mut self, key: ClassKey) -> Result<bool, SelectionError> {
        self.checked(key.into())?;
        let selected = self.classes.toggle(key);
        self.revision += 1;
        match self.policy {
            CascadePolicy::Global => self.subclasses.clear(),
            CascadePolicy::Scoped => self.subclasses.retain(|subclass| subclass.class() != key),
        }
        tracing::trace!(
            department = key.department().ordinal(),
            class = key.ordinal(),
            selected,
            "class toggled"
        );
        Ok(selected)
    }

    /// Flips the subclass. Leaves have nothing to cascade to.
    pub fn toggle_subclass(&mut self, key: SubclassKey) -> Result<bool, SelectionError> {
        self.checked(key.into())?;
        let selected = self.subclasses.toggle(key);
        self.revision += 1;
        tracing::trace!(
            department = key.department().ordinal(),
            class = key.class().ordinal(),
            subclass = key.ordinal(),
            selected,
            "subclass toggled"
        );
        Ok(selected)
    }

    /// Toggles the node at whichever level it belongs to.
    pub fn toggle(&mut self, node: NodeId) -> Result<bool, SelectionError> {
        match node {
            NodeId::Department(key) => self.toggle_department(key),
            NodeId::Class(key) => self.toggle_class(key),
            NodeId::Subclass(key) => self.toggle_subclass(key),
        }
    }

    pub fn is_department_selected(&self, key: DepartmentKey) -> bool {
        self.departments.contains(&key)
    }

    pub fn is_class_selected(&self, key: ClassKey) -> bool {
        self.classes.contains(&key)
    }

    pub fn is_subclass_selected(&self, key: SubclassKey) -> bool {
        self.subclasses.contains(&key)
    }

    /// Returns `true` if the node is selected at its own level.
    pub fn is_selected(&self, node: NodeId) -> bool {
        match node {
            NodeId::Department(key) => self.is_department_selected(key),
            NodeId::Class(key) => self.is_class_selected(key),
            NodeId::Subclass(key) => self.is_subclass_selected(key),
        }
    }

    /// Encodes the current selection without touching the table.
    ///
    /// Departments are visited in sequence order; classes and subclasses keep
    /// the order they were toggled on.
    pub fn encode(&self) -> Vec<SelectionToken> {
        let mut tokens = Vec::new();
        for department in self.hierarchy.departments() {
            if !self.is_department_selected(department) {
                continue;
            }
            let mut classes = self
                .classes
                .iter()
                .filter(|class| class.department() == department)
                .peekable();
            if classes.peek().is_none() {
                tokens.push(SelectionToken::Department(department));
                continue;
            }
            for &class in classes {
                let len = tokens.len();
                tokens.extend(
                    self.subclasses
                        .iter()
                        .filter(|subclass| subclass.class() == class)
                        .map(|&subclass| SelectionToken::Subclass(subclass)),
                );
                if tokens.len() == len {
                    tokens.push(SelectionToken::Class(class));
                }
            }
        }
        tokens
    }

    /// Appends the encoded selection to the saved table.
    ///
    /// Returns the number of tokens appended (zero for an empty selection).
    pub fn save(&mut self) -> usize {
        let tokens = self.encode();
        let appended = tokens.len();
        self.saved.extend(tokens);
        self.revision += 1;
        tracing::debug!(appended, total = self.saved.len(), "selection saved");
        appended
    }

    /// Saved tokens, oldest first.
    pub fn saved_items(&self) -> &[SelectionToken] {
        &self.saved
    }

    /// Saved tokens rendered as `d`, `d_c` or `d_c_s` strings.
    pub fn saved_strings(&self) -> impl Iterator<Item = String> + '_ {
        self.saved.iter().map(ToString::to_string)
    }

    pub const fn saved_len(&self) -> usize {
        self.saved.len()
    }

    /// Captures the selection and table for later restore.
    pub fn snapshot(&self) -> SelectionSnapshot {
        SelectionSnapshot {
            departments: self.departments.iter().map(|key| key.ordinal()).collect(),
            classes: self
                .classes
                .iter()
                .map(|key| (key.department().ordinal(), key.ordinal()))
                .collect(),
            subclasses: self
                .subclasses
                .iter()
                .map(|key| {
                    (
                        key.department().ordinal(),
                        key.class().ordinal(),
                        key.ordinal(),
                    )
                })
                .collect(),
            saved: self.saved_strings().collect(),
        }
    }

    /// Restores a snapshot. On error the current state is left unchanged.
    pub fn restore(&mut self, snapshot: &SelectionSnapshot) -> Result<(), SelectionError> {
        let mut departments = OrderedSet::with_capacity(snapshot.departments.len());
        for &ordinal in &snapshot.departments {
            let key = DepartmentKey::new(ordinal);
            self.hierarchy.check(key.into())?;
            departments.insert(key);
        }

        let mut classes = OrderedSet::with_capacity(snapshot.classes.len());
        for &(department, class) in &snapshot.classes {
            let key = DepartmentKey::new(department).class(class);
            self.hierarchy.check(key.into())?;
            classes.insert(key);
        }

        let mut subclasses = OrderedSet::with_capacity(snapshot.subclasses.len());
        for &(department, class, subclass) in &snapshot.subclasses {
            let key = DepartmentKey::new(department).class(class).subclass(subclass);
            self.hierarchy.check(key.into())?;
            subclasses.insert(key);
        }

        let mut saved = Vec::with_capacity(snapshot.saved.len());
        for raw in &snapshot.saved {
            let token: SelectionToken = raw.parse()?;
            self.hierarchy.check(token.node())?;
            saved.push(token);
        }

        self.departments = departments;
        self.classes = classes;
        self.subclasses = subclasses;
        self.saved = saved;
        self.revision += 1;
        Ok(())
    }

    fn checked(&self, node: NodeId) -> Result<(), SelectionError> {
        self.hierarchy.check(node).inspect_err(|err| {
            tracing::debug!(%err, "toggle rejected");
        })
    }
}
