//! Domain factories for creating domain entities and value objects.

use super::value_object::ConnectionId;

/// Factory for generating ConnectionId instances.
///
/// This factory encapsulates the logic for generating new connection
/// identifiers, separating the generation concern from the validation
/// logic in ConnectionId. Ids are UUID v4, so they are never reused while
/// a connection is live.
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    /// Generate a new ConnectionId with a random UUID v4.
    pub fn generate() -> ConnectionId {
        ConnectionId::from_uuid(uuid::Uuid::new_v4())
    }
}
