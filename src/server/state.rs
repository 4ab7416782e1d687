//! Application state shared across all request handlers.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use crate::conversation::payload::{EditGroupsPayload, GroupRef};

/// Groups stored for one conversation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipRecord {
    /// Conversation key.
    pub key: String,
    /// Groups the conversation is sent to.
    pub groups: Vec<GroupRef>,
    /// When the membership was last replaced.
    pub updated_at: DateTime<Utc>,
}

/// Shared application state.
#[derive(Debug, Default)]
pub struct AppState {
    memberships: DashMap<String, MembershipRecord>,
}

impl AppState {
    /// Create an empty state.
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Replace the membership of the payload's conversation.
    pub fn store(&self, payload: EditGroupsPayload) -> MembershipRecord {
        let record = MembershipRecord {
            key: payload.key,
            groups: payload.groups,
            updated_at: Utc::now(),
        };
        self.memberships.insert(record.key.clone(), record.clone());
        record
    }

    /// Stored membership of a conversation.
    #[must_use]
    pub fn membership(&self, key: &str) -> Option<MembershipRecord> {
        self.memberships.get(key).map(|entry| entry.value().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(groups: &[&str]) -> EditGroupsPayload {
        EditGroupsPayload {
            key: "conversation1".to_string(),
            groups: groups
                .iter()
                .map(|k| GroupRef { key: (*k).to_string() })
                .collect(),
        }
    }

    #[test]
    fn test_store_replaces_previous_membership() {
        let state = AppState::new();
        state.store(payload(&["group1", "group2"]));
        state.store(payload(&["group2"]));

        let record = state.membership("conversation1").unwrap();
        assert_eq!(record.groups, vec![GroupRef { key: "group2".to_string() }]);
        assert!(state.membership("conversation2").is_none());
    }
}
