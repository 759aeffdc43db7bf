//! Domain layer for the chat server.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod entity;
pub mod error;
pub mod factory;
pub mod history;
pub mod registry;
pub mod value_object;

pub use entity::{ChatMessage, Member, Room};
pub use error::{HistoryError, ValueObjectError};
pub use factory::ConnectionIdFactory;
pub use history::HistoryStore;
pub use registry::{Departure, JoinOutcome, RoomRegistry};
pub use value_object::{ConnectionId, MessageBody, RoomName, Timestamp, Username};
