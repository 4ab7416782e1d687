//! Group records and their construction input.

use serde::{Deserialize, Serialize};

/// A group a conversation may or may not be sent to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// Group key, unique within a collection.
    pub key: String,
    /// Display name. Never sent on save.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Whether the group is part of the conversation.
    pub in_conversation: bool,
}

impl Group {
    /// Create a group.
    #[must_use]
    pub fn new(key: impl Into<String>, in_conversation: bool) -> Self {
        Self {
            key: key.into(),
            name: None,
            in_conversation,
        }
    }

    /// Set the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the membership flag.
    pub const fn set_in_conversation(&mut self, in_conversation: bool) {
        self.in_conversation = in_conversation;
    }
}

/// Construction input for [`crate::conversation::ConversationGroupsModel`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationGroupsInput {
    /// Conversation key.
    pub key: String,
    /// Groups, in display order.
    #[serde(default)]
    pub groups: Vec<Group>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_uses_wire_names() {
        let input: ConversationGroupsInput = serde_json::from_value(serde_json::json!({
            "key": "conversation1",
            "groups": [
                {"key": "group1", "inConversation": true, "name": "Friends"},
                {"key": "group2", "inConversation": false}
            ]
        }))
        .unwrap();

        assert_eq!(input.key, "conversation1");
        assert_eq!(
            input.groups,
            vec![
                Group::new("group1", true).with_name("Friends"),
                Group::new("group2", false),
            ]
        );
    }

    #[test]
    fn test_missing_flag_is_rejected() {
        let result: Result<ConversationGroupsInput, _> = serde_json::from_value(
            serde_json::json!({"key": "c", "groups": [{"key": "g"}]}),
        );
        assert!(result.is_err());
    }
}
