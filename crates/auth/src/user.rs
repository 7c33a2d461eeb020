//! Configured users allowed to sign in.

use std::collections::HashMap;

use entities::UserRecord;

use crate::{hash_password, verify_password, AuthResult};

/// The set of valid users known to the server, keyed by username.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: HashMap<String, UserRecord>,
}

impl UserDirectory {
    /// Creates a directory from user records. Later records win on duplicate
    /// usernames.
    pub fn new(records: impl IntoIterator<Item = UserRecord>) -> Self {
        let users = records
            .into_iter()
            .map(|record| (record.username.clone(), record))
            .collect();
        Self { users }
    }

    /// Creates a directory with a single user, hashing the plaintext password.
    pub fn with_user(username: impl Into<String>, password: &str) -> AuthResult<Self> {
        let record = UserRecord::new(username, hash_password(password)?);
        Ok(Self::new([record]))
    }

    /// Finds a user by username.
    pub fn find(&self, username: &str) -> Option<&UserRecord> {
        self.users.get(username)
    }

    /// Returns all user records.
    pub fn records(&self) -> impl Iterator<Item = &UserRecord> {
        self.users.values()
    }

    /// Returns true if `username` exists and `password` matches its hash.
    pub fn verify(&self, username: &str, password: &str) -> AuthResult<bool> {
        match self.find(username) {
            Some(user) => verify_password(password, &user.password_hash),
            None => {
                tracing::debug!(username, "Unknown user");
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_known_user() {
        let directory = UserDirectory::with_user("admin", "secret").unwrap();

        assert!(directory.verify("admin", "secret").unwrap());
        assert!(!directory.verify("admin", "wrong").unwrap());
    }

    #[test]
    fn test_verify_unknown_user() {
        let directory = UserDirectory::with_user("admin", "secret").unwrap();

        assert!(!directory.verify("someone", "secret").unwrap());
        assert!(directory.find("someone").is_none());
    }

    #[test]
    fn test_new_from_records() {
        let directory = UserDirectory::new([
            UserRecord::new("a", "hash-a"),
            UserRecord::new("b", "hash-b"),
        ]);

        assert_eq!(directory.records().count(), 2);
        assert_eq!(directory.find("b").unwrap().password_hash, "hash-b");
    }
}
