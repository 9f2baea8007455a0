//! User accounts.
//!
//! [`User`] is the public shape returned by the API. The stored document is a
//! [`StoredUser`], which adds the password hash and never leaves the server.

use serde::{Deserialize, Serialize};

use sugarbook_core::{Email, UserId, now_timestamp};

/// Theme preference given to new accounts.
pub const DEFAULT_THEME: &str = "system";

/// A Sugarbook account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    /// Relative URL of the uploaded avatar.
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default = "default_theme")]
    pub theme: String,
    pub created_at: String,
}

impl User {
    /// Build a fresh account with the default theme and no avatar.
    #[must_use]
    pub fn new(name: String, email: Email) -> Self {
        Self {
            id: UserId::generate(),
            name,
            email,
            avatar: None,
            theme: DEFAULT_THEME.to_owned(),
            created_at: now_timestamp(),
        }
    }
}

fn default_theme() -> String {
    DEFAULT_THEME.to_owned()
}

/// The user document as persisted, including the password hash.
#[derive(Clone, Serialize, Deserialize)]
pub struct StoredUser {
    #[serde(flatten)]
    pub user: User,
    /// Argon2 PHC string.
    pub password: String,
}

impl std::fmt::Debug for StoredUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredUser")
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Self-service profile update. `null` and absent both leave a field alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_stored_user_flattens_and_public_shape_hides_password() {
        let user = User::new("Ana".to_owned(), Email::parse("ana@example.com").unwrap());
        let stored = StoredUser {
            user: user.clone(),
            password: "$argon2id$...".to_owned(),
        };

        let document = serde_json::to_value(&stored).unwrap();
        assert_eq!(document["password"], "$argon2id$...");
        assert_eq!(document["theme"], "system");
        assert_eq!(document["avatar"], serde_json::Value::Null);

        let public: User = serde_json::from_value(document).unwrap();
        assert_eq!(public, user);
        assert!(serde_json::to_value(&public).unwrap().get("password").is_none());
    }

    #[test]
    fn test_debug_redacts_password() {
        let stored = StoredUser {
            user: User::new("Ana".to_owned(), Email::parse("ana@example.com").unwrap()),
            password: "secret-hash".to_owned(),
        };
        assert!(!format!("{stored:?}").contains("secret-hash"));
    }

    #[test]
    fn test_patch_skips_nulls() {
        let patch: UserPatch = serde_json::from_value(json!({"name": null, "theme": "dark"})).unwrap();
        assert_eq!(serde_json::to_value(&patch).unwrap(), json!({"theme": "dark"}));
    }
}
