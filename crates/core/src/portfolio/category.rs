//! Two-level product taxonomy.

use serde::{Deserialize, Serialize};

use crate::types::CategoryId;

/// A product category. Top-level categories have no parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(alias = "_id")]
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub parent: Option<CategoryId>,
}

impl Category {
    #[must_use]
    pub const fn is_top_level(&self) -> bool {
        self.parent.is_none()
    }
}

/// Lookup helpers over a flat category listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryTree {
    categories: Vec<Category>,
}

impl CategoryTree {
    #[must_use]
    pub const fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// Categories without a parent, in listing order.
    pub fn top_level(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter().filter(|c| c.is_top_level())
    }

    /// Subcategories of the top-level category called `parent_name`.
    ///
    /// Returns an empty list when no such top-level category exists.
    #[must_use]
    pub fn children_of(&self, parent_name: &str) -> Vec<&Category> {
        let Some(parent) = self
            .top_level()
            .find(|c| c.name == parent_name)
        else {
            return Vec::new();
        };

        self.categories
            .iter()
            .filter(|c| c.parent.as_ref() == Some(&parent.id))
            .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl From<Vec<Category>> for CategoryTree {
    fn from(categories: Vec<Category>) -> Self {
        Self::new(categories)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn tree() -> CategoryTree {
        serde_json::from_value::<Vec<Category>>(serde_json::json!([
            {"id": "1", "name": "Acoustic", "parent": null},
            {"id": "2", "name": "Panels", "parent": "1"},
            {"id": "3", "name": "Audio", "parent": null},
            {"id": "4", "name": "Traps", "parent": "1"},
            {"id": "5", "name": "Cables", "parent": "3"}
        ]))
        .unwrap()
        .into()
    }

    #[test]
    fn test_top_level() {
        let tree = tree();
        let names: Vec<&str> = tree.top_level().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Acoustic", "Audio"]);
    }

    #[test]
    fn test_children_of() {
        let tree = tree();
        let names: Vec<&str> = tree
            .children_of("Acoustic")
            .into_iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["Panels", "Traps"]);
        assert!(tree.children_of("Panels").is_empty());
        assert!(tree.children_of("Unknown").is_empty());
    }
}
