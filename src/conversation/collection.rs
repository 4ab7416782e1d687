//! Ordered, key-addressable group collection.

use std::collections::HashMap;

use crate::conversation::group::Group;
use crate::sync::error::{SyncError, SyncResult};

/// Groups in insertion order, looked up by key.
#[derive(Clone, Debug, Default)]
pub struct GroupCollection {
    groups: Vec<Group>,
    index: HashMap<String, usize>,
}

impl GroupCollection {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection, keeping input order.
    ///
    /// # Errors
    /// Returns an error on an empty or duplicated group key.
    pub fn from_groups(groups: impl IntoIterator<Item = Group>) -> SyncResult<Self> {
        let mut collection = Self::new();
        for group in groups {
            collection.push(group)?;
        }
        Ok(collection)
    }

    /// Append a group.
    ///
    /// # Errors
    /// Returns an error on an empty or duplicated group key.
    pub fn push(&mut self, group: Group) -> SyncResult<()> {
        if group.key.is_empty() {
            return Err(SyncError::InvalidInput("group key is empty".to_string()));
        }
        if self.index.contains_key(&group.key) {
            return Err(SyncError::DuplicateGroup(group.key));
        }
        self.index.insert(group.key.clone(), self.groups.len());
        self.groups.push(group);
        Ok(())
    }

    /// Look up a group by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Group> {
        self.index.get(key).map(|&i| &self.groups[i])
    }

    /// Set the membership flag of the group with this key.
    ///
    /// Keys are never handed out mutably, so the index stays in step with the groups.
    ///
    /// # Errors
    /// Returns [`SyncError::UnknownGroup`] if no group has this key.
    pub fn set_in_conversation(&mut self, key: &str, in_conversation: bool) -> SyncResult<()> {
        let &i = self
            .index
            .get(key)
            .ok_or_else(|| SyncError::UnknownGroup(key.to_string()))?;
        self.groups[i].set_in_conversation(in_conversation);
        Ok(())
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Group> {
        self.groups.iter()
    }

    /// Number of groups.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether the collection holds no group.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl<'a> IntoIterator for &'a GroupCollection {
    type Item = &'a Group;
    type IntoIter = std::slice::Iter<'a, Group>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
