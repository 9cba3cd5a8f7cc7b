use rustc_hash::{FxBuildHasher, FxHashSet};

use crate::error::SelectionError;
use crate::hierarchy::Hierarchy;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ordered label lists for each hierarchy level.
///
/// With the `serde` feature enabled, this type derives `Serialize`/`Deserialize`
/// so the hierarchy can be injected from a host configuration file.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HierarchyConfig {
    /// Department labels; position `i` is department ordinal `i + 1`.
    pub departments: Vec<String>,
    /// Class labels shared by every department.
    pub classes: Vec<String>,
    /// Subclass labels shared by every class.
    pub subclasses: Vec<String>,
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self::generated(10, 3, 2)
    }
}

impl HierarchyConfig {
    /// Generates placeholder labels (`"Department 1"`, `"Class 1"`, ...).
    pub fn generated(departments: usize, classes: usize, subclasses: usize) -> Self {
        Self {
            departments: numbered("Department", departments),
            classes: numbered("Class", classes),
            subclasses: numbered("Subclass", subclasses),
        }
    }

    /// Validates the label lists and builds the hierarchy.
    pub fn build(self) -> Result<Hierarchy, SelectionError> {
        validate_level("department", &self.departments)?;
        validate_level("class", &self.classes)?;
        validate_level("subclass", &self.subclasses)?;
        Ok(Hierarchy::from_validated(
            self.departments,
            self.classes,
            self.subclasses,
        ))
    }
}

impl TryFrom<HierarchyConfig> for Hierarchy {
    type Error = SelectionError;

    fn try_from(config: HierarchyConfig) -> Result<Self, Self::Error> {
        config.build()
    }
}

fn numbered(prefix: &str, count: usize) -> Vec<String> {
    (1..=count).map(|idx| format!("{prefix} {idx}")).collect()
}

fn validate_level(level: &'static str, labels: &[String]) -> Result<(), SelectionError> {
    if labels.is_empty() {
        return Err(SelectionError::EmptyLevel(level));
    }
    let max = usize::from(u16::MAX);
    if labels.len() > max {
        return Err(SelectionError::LevelTooLarge {
            level,
            len: labels.len(),
            max,
        });
    }
    let mut seen = FxHashSet::with_capacity_and_hasher(labels.len(), FxBuildHasher);
    for label in labels {
        if !seen.insert(label.as_str()) {
            return Err(SelectionError::DuplicateLabel {
                level,
                label: label.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn default_matches_sample_data() {
        let config = HierarchyConfig::default();

        assert_eq!(config.departments.len(), 10);
        assert_eq!(config.departments[0], "Department 1");
        assert_eq!(config.classes, labels(&["Class 1", "Class 2", "Class 3"]));
        assert_eq!(config.subclasses, labels(&["Subclass 1", "Subclass 2"]));
    }

    #[test]
    fn build_rejects_empty_level() {
        let config = HierarchyConfig {
            departments: labels(&["Produce"]),
            classes: Vec::new(),
            subclasses: labels(&["Organic"]),
        };

        assert_eq!(config.build(), Err(SelectionError::EmptyLevel("class")));
    }

    #[test]
    fn build_rejects_duplicate_labels() {
        let config = HierarchyConfig {
            departments: labels(&["Produce", "Bakery", "Produce"]),
            classes: labels(&["Fresh"]),
            subclasses: labels(&["Organic"]),
        };

        assert_eq!(
            config.build(),
            Err(SelectionError::DuplicateLabel {
                level: "department",
                label: "Produce".to_string(),
            })
        );
    }

    #[test]
    fn custom_labels_keep_their_order() {
        let hierarchy = Hierarchy::try_from(HierarchyConfig {
            departments: labels(&["Produce", "Bakery"]),
            classes: labels(&["Fresh", "Frozen"]),
            subclasses: labels(&["Organic"]),
        })
        .unwrap();

        assert_eq!(
            hierarchy.department_by_label("Bakery").map(|key| key.ordinal()),
            Some(2)
        );
        assert_eq!(hierarchy.size_hint(), 2 + 4 + 4);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_from_json() {
        let json = r#"{"departments":["A","B"],"classes":["x"],"subclasses":["y","z"]}"#;
        let config: HierarchyConfig = serde_json::from_str(json).unwrap();
        let hierarchy = config.build().unwrap();

        assert_eq!(hierarchy.department_count(), 2);
        assert_eq!(hierarchy.subclass_count(), 2);
    }
}
