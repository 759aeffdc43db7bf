//! Room Registry contract.
//!
//! The registry is the single source of truth for "who is in which room".
//! The trait lives in the domain layer and is implemented by the
//! infrastructure layer (dependency inversion); usecases only ever see
//! `Arc<dyn RoomRegistry>`.

use async_trait::async_trait;

use super::{
    entity::Member,
    value_object::{ConnectionId, RoomName},
};

/// Result of a `join` mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOutcome {
    /// The room the connection was implicitly removed from, if it was a
    /// member of a different room when the join arrived
    pub departed: Option<Departure>,
    /// Member list of the joined room as of the mutation, joiner included
    pub members: Vec<Member>,
}

/// A room a connection was removed from, with everything the presence
/// broadcaster needs to notify that room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    /// Name of the room that was left
    pub room: RoomName,
    /// The member as it was recorded at the moment of removal
    pub member: Member,
    /// Member list of the room after the removal
    pub remaining: Vec<Member>,
}

/// Authoritative mapping from room name to member set.
///
/// Implementations must serialize every mutation (`join`, `leave`) against
/// all other mutations touching the same room or the same connection, and
/// reads must observe fully-applied membership only. A connection is a
/// member of at most one room at any instant.
#[async_trait]
pub trait RoomRegistry: Send + Sync {
    /// Add `member` to `room`, creating the room if absent.
    ///
    /// If the connection was already a member of a different room it is
    /// atomically removed from that room first, and the removal is
    /// reported in the outcome so the old room still receives its leave
    /// notice. Re-joining the current room just updates the display name.
    async fn join(&self, member: Member, room: RoomName) -> JoinOutcome;

    /// Remove the connection from its current room, if any.
    ///
    /// Idempotent: returns `None` (and mutates nothing) when the
    /// connection is not currently in a room, which is how a cleanup that
    /// already ran is detected.
    async fn leave(&self, connection_id: &ConnectionId) -> Option<Departure>;

    /// Snapshot of a room's member list; empty if the room has no members.
    async fn members_of(&self, room: &RoomName) -> Vec<Member>;

    /// The connection's current room together with that room's member
    /// list, read atomically so the router never fans out against a
    /// half-applied membership set.
    async fn current_membership(
        &self,
        connection_id: &ConnectionId,
    ) -> Option<(RoomName, Vec<Member>)>;

    /// Names of all rooms that currently have members.
    async fn room_names(&self) -> Vec<RoomName>;
}
