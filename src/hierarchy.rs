use crate::config::HierarchyConfig;
use crate::error::SelectionError;

/// Department identity: 1-based position in the department sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DepartmentKey(u16);

impl DepartmentKey {
    /// Creates a key from a 1-based ordinal. Range is checked by the hierarchy.
    pub const fn new(ordinal: u16) -> Self {
        Self(ordinal)
    }

    pub const fn ordinal(self) -> u16 {
        self.0
    }

    /// Returns the key of the given class under this department.
    pub const fn class(self, ordinal: u16) -> ClassKey {
        ClassKey::new(self, ordinal)
    }
}

/// Class identity: `(department, 1-based class ordinal)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassKey {
    department: DepartmentKey,
    class: u16,
}

impl ClassKey {
    pub const fn new(department: DepartmentKey, ordinal: u16) -> Self {
        Self {
            department,
            class: ordinal,
        }
    }

    pub const fn department(self) -> DepartmentKey {
        self.department
    }

    pub const fn ordinal(self) -> u16 {
        self.class
    }

    /// Returns the key of the given subclass under this class.
    pub const fn subclass(self, ordinal: u16) -> SubclassKey {
        SubclassKey::new(self, ordinal)
    }
}

/// Subclass identity: `(department, class, 1-based subclass ordinal)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubclassKey {
    class: ClassKey,
    subclass: u16,
}

impl SubclassKey {
    pub const fn new(class: ClassKey, ordinal: u16) -> Self {
        Self {
            class,
            subclass: ordinal,
        }
    }

    pub const fn department(self) -> DepartmentKey {
        self.class.department
    }

    pub const fn class(self) -> ClassKey {
        self.class
    }

    pub const fn ordinal(self) -> u16 {
        self.subclass
    }
}

/// A node anywhere in the hierarchy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeId {
    Department(DepartmentKey),
    Class(ClassKey),
    Subclass(SubclassKey),
}

impl NodeId {
    /// Depth of the node: departments are level 0.
    pub const fn level(self) -> u16 {
        match self {
            Self::Department(_) => 0,
            Self::Class(_) => 1,
            Self::Subclass(_) => 2,
        }
    }

    pub const fn parent(self) -> Option<Self> {
        match self {
            Self::Department(_) => None,
            Self::Class(key) => Some(Self::Department(key.department)),
            Self::Subclass(key) => Some(Self::Class(key.class)),
        }
    }

    /// Returns the child with the given ordinal, or `None` for subclasses (leaves).
    pub const fn child(self, ordinal: u16) -> Option<Self> {
        match self {
            Self::Department(key) => Some(Self::Class(key.class(ordinal))),
            Self::Class(key) => Some(Self::Subclass(key.subclass(ordinal))),
            Self::Subclass(_) => None,
        }
    }

    pub const fn ordinal(self) -> u16 {
        match self {
            Self::Department(key) => key.ordinal(),
            Self::Class(key) => key.ordinal(),
            Self::Subclass(key) => key.ordinal(),
        }
    }
}

impl From<DepartmentKey> for NodeId {
    fn from(key: DepartmentKey) -> Self {
        Self::Department(key)
    }
}

impl From<ClassKey> for NodeId {
    fn from(key: ClassKey) -> Self {
        Self::Class(key)
    }
}

impl From<SubclassKey> for NodeId {
    fn from(key: SubclassKey) -> Self {
        Self::Subclass(key)
    }
}

/// Static department → class → subclass label tables.
///
/// Every department offers the same class sequence and every class the same
/// subclass sequence. Ordinal position is the node identity; labels are
/// display text only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hierarchy {
    departments: Vec<String>,
    classes: Vec<String>,
    subclasses: Vec<String>,
}

impl Default for Hierarchy {
    fn default() -> Self {
        Self::sample()
    }
}

impl Hierarchy {
    /// Builds a hierarchy from ordered label lists, validating each level.
    pub fn new(
        departments: Vec<String>,
        classes: Vec<String>,
        subclasses: Vec<String>,
    ) -> Result<Self, SelectionError> {
        HierarchyConfig {
            departments,
            classes,
            subclasses,
        }
        .build()
    }

    /// Placeholder hierarchy with `"Department i"`, `"Class i"`, `"Subclass i"` labels.
    pub fn generated(
        departments: usize,
        classes: usize,
        subclasses: usize,
    ) -> Result<Self, SelectionError> {
        HierarchyConfig::generated(departments, classes, subclasses).build()
    }

    /// Ten departments, three classes, two subclasses.
    pub fn sample() -> Self {
        let config = HierarchyConfig::default();
        Self::from_validated(config.departments, config.classes, config.subclasses)
    }

    pub(crate) const fn from_validated(
        departments: Vec<String>,
        classes: Vec<String>,
        subclasses: Vec<String>,
    ) -> Self {
        Self {
            departments,
            classes,
            subclasses,
        }
    }

    pub const fn department_count(&self) -> usize {
        self.departments.len()
    }

    pub const fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub const fn subclass_count(&self) -> usize {
        self.subclasses.len()
    }

    /// Approximate number of nodes, used to size caches.
    pub const fn size_hint(&self) -> usize {
        let classes = self.departments.len() * self.classes.len();
        self.departments.len() + classes + classes * self.subclasses.len()
    }

    /// Departments in sequence order.
    pub fn departments(&self) -> impl Iterator<Item = DepartmentKey> + use<> {
        (1..=ordinal_bound(self.departments.len())).map(DepartmentKey::new)
    }

    /// Classes of a department in sequence order.
    pub fn classes(&self, department: DepartmentKey) -> impl Iterator<Item = ClassKey> + use<> {
        (1..=ordinal_bound(self.classes.len())).map(move |ordinal| department.class(ordinal))
    }

    /// Subclasses of a class in sequence order.
    pub fn subclasses(&self, class: ClassKey) -> impl Iterator<Item = SubclassKey> + use<> {
        (1..=ordinal_bound(self.subclasses.len())).map(move |ordinal| class.subclass(ordinal))
    }

    /// Number of children the node has in the static tree.
    pub const fn child_count(&self, node: NodeId) -> usize {
        match node {
            NodeId::Department(_) => self.classes.len(),
            NodeId::Class(_) => self.subclasses.len(),
            NodeId::Subclass(_) => 0,
        }
    }

    /// Children of the node in sequence order.
    pub fn children(&self, node: NodeId) -> impl Iterator<Item = NodeId> + use<> {
        (1..=ordinal_bound(self.child_count(node))).filter_map(move |ordinal| node.child(ordinal))
    }

    pub fn contains_department(&self, key: DepartmentKey) -> bool {
        in_level(key.ordinal(), self.departments.len())
    }

    pub fn contains_class(&self, key: ClassKey) -> bool {
        self.contains_department(key.department()) && in_level(key.ordinal(), self.classes.len())
    }

    pub fn contains_subclass(&self, key: SubclassKey) -> bool {
        self.contains_class(key.class()) && in_level(key.ordinal(), self.subclasses.len())
    }

    /// Returns `true` if the node exists in the hierarchy.
    pub fn contains(&self, node: NodeId) -> bool {
        match node {
            NodeId::Department(key) => self.contains_department(key),
            NodeId::Class(key) => self.contains_class(key),
            NodeId::Subclass(key) => self.contains_subclass(key),
        }
    }

    /// Checks the node against the hierarchy, naming it in the error.
    pub fn check(&self, node: NodeId) -> Result<(), SelectionError> {
        if self.contains(node) {
            return Ok(());
        }
        Err(match node {
            NodeId::Department(key) => SelectionError::UnknownDepartment(key.ordinal()),
            NodeId::Class(key) => SelectionError::UnknownClass {
                department: key.department().ordinal(),
                class: key.ordinal(),
            },
            NodeId::Subclass(key) => SelectionError::UnknownSubclass {
                department: key.department().ordinal(),
                class: key.class().ordinal(),
                subclass: key.ordinal(),
            },
        })
    }

    /// Display label of the node, or `None` if it is outside the hierarchy.
    pub fn label(&self, node: NodeId) -> Option<&str> {
        if !self.contains(node) {
            return None;
        }
        let (labels, ordinal) = match node {
            NodeId::Department(key) => (&self.departments, key.ordinal()),
            NodeId::Class(key) => (&self.classes, key.ordinal()),
            NodeId::Subclass(key) => (&self.subclasses, key.ordinal()),
        };
        labels
            .get(usize::from(ordinal) - 1)
            .map(String::as_str)
    }

    pub fn department_by_label(&self, label: &str) -> Option<DepartmentKey> {
        position_of(&self.departments, label).map(DepartmentKey::new)
    }

    pub fn class_by_label(&self, department: DepartmentKey, label: &str) -> Option<ClassKey> {
        if !self.contains_department(department) {
            return None;
        }
        position_of(&self.classes, label).map(|ordinal| department.class(ordinal))
    }

    pub fn subclass_by_label(&self, class: ClassKey, label: &str) -> Option<SubclassKey> {
        if !self.contains_class(class) {
            return None;
        }
        position_of(&self.subclasses, label).map(|ordinal| class.subclass(ordinal))
    }
}

// Level lengths are capped at `u16::MAX` when the hierarchy is built.
fn ordinal_bound(len: usize) -> u16 {
    u16::try_from(len).unwrap_or(u16::MAX)
}

fn in_level(ordinal: u16, len: usize) -> bool {
    ordinal >= 1 && usize::from(ordinal) <= len
}

fn position_of(labels: &[String], label: &str) -> Option<u16> {
    labels
        .iter()
        .position(|candidate| candidate == label)
        .and_then(|idx| u16::try_from(idx + 1).ok())
}
