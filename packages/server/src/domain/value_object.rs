//! Value Objects for domain models.
//!
//! Value Objects are immutable objects that represent values in the domain.
//! They are compared by their value, not by identity.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::ValueObjectError;

/// Connection identifier value object.
///
/// Assigned by the server when a transport connects, stable for the
/// connection's lifetime and never reused while the connection is live.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionId(String);

impl ConnectionId {
    /// Create a new ConnectionId.
    ///
    /// # Arguments
    ///
    /// * `id` - The connection identifier string
    ///
    /// # Returns
    ///
    /// A Result containing the ConnectionId or an error if validation fails
    pub fn new(id: String) -> Result<Self, ValueObjectError> {
        if id.is_empty() {
            return Err(ValueObjectError::ConnectionIdEmpty);
        }
        let len = id.len();
        if len > 100 {
            return Err(ValueObjectError::ConnectionIdTooLong {
                max: 100,
                actual: len,
            });
        }
        Ok(Self(id))
    }

    /// Create a ConnectionId from a UUID.
    pub fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid.to_string())
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display name value object.
///
/// Chosen by the client at join time; mutable only by re-joining. The name
/// is deliberately permissive: any non-empty bounded string is accepted and
/// no uniqueness is enforced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Username(String);

impl Username {
    /// Create a new Username.
    ///
    /// # Arguments
    ///
    /// * `name` - The display name string
    ///
    /// # Returns
    ///
    /// A Result containing the Username or an error if validation fails
    pub fn new(name: String) -> Result<Self, ValueObjectError> {
        if name.is_empty() {
            return Err(ValueObjectError::UsernameEmpty);
        }
        let len = name.len();
        if len > 100 {
            return Err(ValueObjectError::UsernameTooLong {
                max: 100,
                actual: len,
            });
        }
        Ok(Self(name))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Username {
    type Error = ValueObjectError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::new(name)
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Room name value object.
///
/// Rooms are not pre-registered: any valid name denotes a room that comes
/// into existence with its first member.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomName(String);

impl RoomName {
    /// Create a new RoomName.
    ///
    /// # Arguments
    ///
    /// * `name` - The room name string
    ///
    /// # Returns
    ///
    /// A Result containing the RoomName or an error if validation fails
    pub fn new(name: String) -> Result<Self, ValueObjectError> {
        if name.is_empty() {
            return Err(ValueObjectError::RoomNameEmpty);
        }
        let len = name.len();
        if len > 100 {
            return Err(ValueObjectError::RoomNameTooLong {
                max: 100,
                actual: len,
            });
        }
        Ok(Self(name))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for RoomName {
    type Error = ValueObjectError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::new(name)
    }
}

impl fmt::Display for RoomName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Message body value object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody(String);

impl MessageBody {
    /// Create a new MessageBody.
    pub fn new(body: String) -> Result<Self, ValueObjectError> {
        if body.is_empty() {
            return Err(ValueObjectError::MessageBodyEmpty);
        }
        let len = body.len();
        if len > 10000 {
            return Err(ValueObjectError::MessageBodyTooLong {
                max: 10000,
                actual: len,
            });
        }
        Ok(Self(body))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for MessageBody {
    type Error = ValueObjectError;

    fn try_from(body: String) -> Result<Self, Self::Error> {
        Self::new(body)
    }
}

impl fmt::Display for MessageBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Timestamp value object.
///
/// Unix timestamp in milliseconds. Client-supplied timestamps are passed
/// through verbatim; the core never reorders messages by them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Create a new Timestamp from Unix milliseconds.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the inner i64 value.
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
