use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The identity record returned by `GET /auth/me`.
///
/// Presence of a `User` in the session is the definition of "logged in";
/// the record is never persisted client-side and is always rehydrated from
/// the server after a token is stored.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test that a user response deserializes with the expected fields.
    #[test]
    fn test_user_deserializes() {
        let body = r#"{"id": 7, "email": "a@b.com", "created_at": "2026-01-15T11:24:00Z"}"#;
        let user: User = serde_json::from_str(body).expect("user should deserialize");
        assert_eq!(user.id, 7);
        assert_eq!(user.email, "a@b.com");
    }

    /// Unknown fields from newer servers must not break deserialization.
    #[test]
    fn test_user_ignores_extra_fields() {
        let body = r#"{"id": 1, "email": "x@y.z", "created_at": "2026-01-15T11:24:00Z", "plan": "pro"}"#;
        let user: User = serde_json::from_str(body).expect("user should deserialize");
        assert_eq!(user.id, 1);
    }
}
