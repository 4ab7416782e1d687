//! Conversation group membership.
//!
//! - `group`: group records and construction input
//! - `collection`: ordered, key-addressable group collection
//! - `payload`: wire body of the edit-groups request
//! - `model`: the model holding membership state and saving it

pub mod collection;
pub mod group;
pub mod model;
pub mod payload;

pub use collection::GroupCollection;
pub use group::{ConversationGroupsInput, Group};
pub use model::{ConversationGroupsModel, edit_groups_path};
pub use payload::{EditGroupsPayload, GroupRef};
