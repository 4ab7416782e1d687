//! Wire body of the edit-groups request.

use serde::{Deserialize, Serialize};

use crate::conversation::group::Group;

/// Reference to a group by key only.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupRef {
    /// Group key.
    pub key: String,
}

impl From<&Group> for GroupRef {
    fn from(group: &Group) -> Self {
        Self {
            key: group.key.clone(),
        }
    }
}

/// Body sent to `/conversation/{key}/edit_groups/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditGroupsPayload {
    /// Conversation key.
    pub key: String,
    /// Groups in the conversation, in collection order.
    pub groups: Vec<GroupRef>,
}

impl EditGroupsPayload {
    /// Build a payload from every group flagged as in the conversation.
    #[must_use]
    pub fn from_groups<'a>(key: &str, groups: impl IntoIterator<Item = &'a Group>) -> Self {
        Self {
            key: key.to_string(),
            groups: groups
                .into_iter()
                .filter(|g| g.in_conversation)
                .map(GroupRef::from)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_key_is_serialized() {
        let groups = [
            Group::new("group1", true).with_name("Friends"),
            Group::new("group2", false).with_name("Family"),
        ];
        let payload = EditGroupsPayload::from_groups("conversation1", &groups);

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({"key": "conversation1", "groups": [{"key": "group1"}]})
        );
    }

    #[test]
    fn test_no_members_gives_empty_list() {
        let groups = [Group::new("group1", false)];
        let payload = EditGroupsPayload::from_groups("c", &groups);
        assert!(payload.groups.is_empty());
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({"key": "c", "groups": []})
        );
    }
}
