//! User aggregate.

use chrono::{DateTime, Utc};
use common::UserId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::aggregate::Aggregate;
use outbox_store::Version;

/// A registered guest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: String,
    email: String,
    created_at: DateTime<Utc>,
    #[serde(default)]
    version: Version,
}

impl User {
    /// Registers a new user.
    pub fn register(
        name: impl Into<String>,
        email: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: UserId::new(),
            name: name.into(),
            email: email.into(),
            created_at: now,
            version: Version::initial(),
        }
    }

    pub fn user_id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Aggregate for User {
    fn aggregate_type() -> &'static str {
        "User"
    }

    fn id(&self) -> Uuid {
        self.id.as_uuid()
    }

    fn version(&self) -> Version {
        self.version
    }

    fn set_version(&mut self, version: Version) {
        self.version = version;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_sets_identity_and_creation_time() {
        let now = Utc::now();
        let user = User::register("Ana", "ana@example.com", now);

        assert_eq!(user.name(), "Ana");
        assert_eq!(user.email(), "ana@example.com");
        assert_eq!(user.created_at(), now);
        assert_eq!(user.version(), Version::initial());
    }

    #[test]
    fn user_state_round_trips() {
        let user = User::register("Ana", "ana@example.com", Utc::now());
        let json = serde_json::to_value(&user).unwrap();
        let back: User = serde_json::from_value(json).unwrap();
        assert_eq!(back.user_id(), user.user_id());
        assert_eq!(back.email(), user.email());
    }
}
