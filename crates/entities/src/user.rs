//! User-related entity definitions.

use serde::{Deserialize, Serialize};

/// A user allowed to sign in, with the stored password hash.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Login name. Also the owner key of every list and todo.
    pub username: String,
    /// PHC-formatted password hash.
    pub password_hash: String,
}

impl UserRecord {
    /// Creates a new user record from an already hashed password.
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
        }
    }
}

impl std::fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRecord")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_hash() {
        let user = UserRecord::new("admin", "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA");

        let rendered = format!("{:?}", user);
        assert!(rendered.contains("admin"));
        assert!(!rendered.contains("argon2id"));
    }
}
