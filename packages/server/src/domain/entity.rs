//! Core domain models for room presence and chat messages.

use super::value_object::{ConnectionId, MessageBody, RoomName, Timestamp, Username};

/// Represents one connection's membership identity in a room
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// Connection identifier (assigned at connect time)
    pub id: ConnectionId,
    /// Display name chosen at join time
    pub username: Username,
}

impl Member {
    /// Create a new member
    pub fn new(id: ConnectionId, username: Username) -> Self {
        Self { id, username }
    }
}

/// Represents a chat room and its current member set
///
/// Rooms are implicitly created by the first join and conceptually cease to
/// exist when empty; the registry owns every `Room` instance. Members are
/// keyed by connection id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    /// Room name
    pub name: RoomName,
    /// Connections currently joined, keyed by connection id
    pub members: Vec<Member>,
}

impl Room {
    /// Create a new empty room with the given name
    pub fn new(name: RoomName) -> Self {
        Self {
            name,
            members: Vec::new(),
        }
    }

    /// Add a member, replacing any existing entry with the same connection
    /// id (re-joining the same room updates the display name)
    pub fn upsert_member(&mut self, member: Member) {
        self.members.retain(|m| m.id != member.id);
        self.members.push(member);
    }

    /// Remove a member by connection id, returning it if it was present
    pub fn remove_member(&mut self, connection_id: &ConnectionId) -> Option<Member> {
        let index = self.members.iter().position(|m| &m.id == connection_id)?;
        Some(self.members.remove(index))
    }

    /// Whether the given connection is currently a member
    pub fn contains(&self, connection_id: &ConnectionId) -> bool {
        self.members.iter().any(|m| &m.id == connection_id)
    }

    /// Whether the room has no members left
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Represents a chat message as it crosses the wire
///
/// The core does not store these; history, if any, lives behind the
/// `HistoryStore` boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// Room the message was delivered to
    pub room: RoomName,
    /// Sender's display name, echoed verbatim
    pub username: Username,
    /// Message body
    pub body: MessageBody,
    /// Timestamp supplied by the sender, passed through verbatim
    pub sent_at: Timestamp,
}

impl ChatMessage {
    /// Create a new chat message
    pub fn new(room: RoomName, username: Username, body: MessageBody, sent_at: Timestamp) -> Self {
        Self {
            room,
            username,
            body,
            sent_at,
        }
    }
}
