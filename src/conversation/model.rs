//! Conversation group membership model.

use std::sync::Arc;

use crate::conversation::collection::GroupCollection;
use crate::conversation::group::{ConversationGroupsInput, Group};
use crate::conversation::payload::EditGroupsPayload;
use crate::sync::error::{SyncError, SyncResult};
use crate::sync::transport::{SyncMethod, SyncRequest, SyncResponse, Transport};

/// Build the edit-groups path for a conversation key.
#[must_use]
pub fn edit_groups_path(conversation_key: &str) -> String {
    format!(
        "/conversation/{}/edit_groups/",
        urlencoding::encode(conversation_key)
    )
}

/// Which groups a conversation is sent to, and how to save that.
///
/// Created per editing session. Flags are changed in memory and only
/// leave the process through [`save`](Self::save), which never touches
/// local state: a failed save leaves the flags exactly as they were.
pub struct ConversationGroupsModel {
    key: String,
    groups: GroupCollection,
    transport: Arc<dyn Transport>,
    method: SyncMethod,
}

impl ConversationGroupsModel {
    /// Create a model for conversation `key`.
    ///
    /// # Errors
    /// Returns an error if `key` is empty, `.` or `..`, or a group key is empty or duplicated.
    pub fn new(
        key: impl Into<String>,
        groups: impl IntoIterator<Item = Group>,
        transport: Arc<dyn Transport>,
    ) -> SyncResult<Self> {
        let key = key.into();
        if key.is_empty() {
            return Err(SyncError::InvalidInput(
                "conversation key is empty".to_string(),
            ));
        }
        // URL resolution collapses dot segments, even percent-encoded ones.
        if key == "." || key == ".." {
            return Err(SyncError::InvalidInput(format!(
                "conversation key {key:?} is a path dot segment"
            )));
        }
        Ok(Self {
            key,
            groups: GroupCollection::from_groups(groups)?,
            transport,
            method: SyncMethod::default(),
        })
    }

    /// Create a model from deserialized input.
    ///
    /// # Errors
    /// Same as [`new`](Self::new).
    pub fn from_input(
        input: ConversationGroupsInput,
        transport: Arc<dyn Transport>,
    ) -> SyncResult<Self> {
        Self::new(input.key, input.groups, transport)
    }

    /// Use `method` for saves instead of `PUT`.
    #[must_use]
    pub const fn with_method(mut self, method: SyncMethod) -> Self {
        self.method = method;
        self
    }

    /// Conversation key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// All groups, in input order.
    #[must_use]
    pub const fn groups(&self) -> &GroupCollection {
        &self.groups
    }

    /// Look up a group by key.
    #[must_use]
    pub fn group(&self, key: &str) -> Option<&Group> {
        self.groups.get(key)
    }

    /// Groups currently in the conversation, in input order.
    pub fn members(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter().filter(|g| g.in_conversation)
    }

    /// Set whether a group is part of the conversation.
    ///
    /// # Errors
    /// Returns [`SyncError::UnknownGroup`] if no group has this key.
    pub fn set_in_conversation(&mut self, group_key: &str, in_conversation: bool) -> SyncResult<()> {
        self.groups.set_in_conversation(group_key, in_conversation)
    }

    /// Path the model saves to.
    #[must_use]
    pub fn endpoint(&self) -> String {
        edit_groups_path(&self.key)
    }

    /// Body the next save would send.
    #[must_use]
    pub fn payload(&self) -> EditGroupsPayload {
        EditGroupsPayload::from_groups(&self.key, &self.groups)
    }

    /// Send the current membership to the server.
    ///
    /// The body reflects the flags at call time. Overlapping calls are not
    /// coordinated; each sends its own snapshot. Nothing is retried.
    ///
    /// # Errors
    /// Returns the transport's error, or [`SyncError::Status`] when the
    /// server answers with a non-2xx status.
    pub async fn save(&self) -> SyncResult<SyncResponse> {
        let payload = self.payload();
        let request = SyncRequest {
            method: self.method,
            path: self.endpoint(),
            body: serde_json::to_value(&payload)?,
        };

        tracing::debug!(
            conversation = %self.key,
            members = payload.groups.len(),
            "saving conversation groups"
        );

        let response = self.transport.send(request).await?;
        if !response.is_success() {
            tracing::warn!(
                conversation = %self.key,
                status = response.status,
                "saving conversation groups failed"
            );
            return Err(SyncError::Status {
                status: response.status,
                body: response.body,
            });
        }
        Ok(response)
    }
}

impl std::fmt::Debug for ConversationGroupsModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationGroupsModel")
            .field("key", &self.key)
            .field("groups", &self.groups)
            .field("method", &self.method)
            .finish_non_exhaustive()
    }
}
