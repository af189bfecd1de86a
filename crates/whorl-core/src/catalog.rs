use crate::error::MenuError;
use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ItemName(String);

crate::impl_string_newtype!(ItemName);

/// A freedesktop icon name, or an absolute path to an image file.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct IconName(String);

crate::impl_string_newtype!(IconName);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: ItemName,
    pub icon: IconName,
}

impl MenuItem {
    pub fn new(name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            name: ItemName::new(name),
            icon: IconName::new(icon),
        }
    }
}

/// Ordered menu item catalog. Item order is ring order.
///
/// Construction enforces the identity invariant: `name` is the key used for
/// lifecycle and hit-region bookkeeping, so two items may not share one.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<MenuItem>,
}

impl Catalog {
    pub fn new(items: Vec<MenuItem>) -> Result<Self, MenuError> {
        let mut seen = HashSet::new();
        for item in &items {
            if !seen.insert(item.name.clone()) {
                return Err(MenuError::DuplicateItemKey(item.name.to_string()));
            }
        }
        Ok(Self { items })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&MenuItem> {
        self.items.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MenuItem> {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_preserves_order() {
        let catalog = Catalog::new(vec![
            MenuItem::new("Cut", "edit-cut"),
            MenuItem::new("Copy", "edit-copy"),
            MenuItem::new("Paste", "edit-paste"),
        ])
        .unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get(1).unwrap().name, ItemName::new("Copy"));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = Catalog::new(vec![
            MenuItem::new("Copy", "edit-copy"),
            MenuItem::new("Copy", "edit-copy-symbolic"),
        ])
        .unwrap_err();

        assert_eq!(err, MenuError::DuplicateItemKey("Copy".to_string()));
    }

    #[test]
    fn items_deserialize_from_plain_strings() {
        let item: MenuItem =
            serde_json::from_str(r#"{ "name": "Delete", "icon": "edit-delete" }"#).unwrap();
        assert_eq!(item, MenuItem::new("Delete", "edit-delete"));
    }
}
