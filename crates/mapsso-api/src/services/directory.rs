//! User directory seam.
//!
//! The host platform owns user accounts; this service only asks it two
//! questions. The in-memory implementation backs the standalone binary and
//! the tests, with argon2id hashes so credential handling is realistic.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, SaltString};
use argon2::{Algorithm, Argon2, Params, PasswordHasher, PasswordVerifier, Version};
use async_trait::async_trait;

/// A directory entry. `password_hash` is a PHC-format argon2id string.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Checks credentials and returns the matching record.
    async fn authenticate(&self, username: &str, password: &str) -> Option<UserRecord>;

    /// Looks up a user by id (token subjects).
    async fn find_by_id(&self, id: &str) -> Option<UserRecord>;
}

/// OWASP-recommended argon2id parameters (19 MiB, t=2, p=1).
fn hasher() -> Argon2<'static> {
    let params = Params::new(19_456, 2, 1, None).unwrap_or_else(|_| Params::default());
    Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
}

/// Hashes a password for seeding directory entries.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(hasher().hash_password(password.as_bytes(), &salt)?.to_string())
}

/// Fixed user set held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    users: Vec<UserRecord>,
}

impl InMemoryDirectory {
    pub fn new(users: Vec<UserRecord>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl UserDirectory for InMemoryDirectory {
    async fn authenticate(&self, username: &str, password: &str) -> Option<UserRecord> {
        let user = self
            .users
            .iter()
            .find(|u| u.username == username || u.email == username)?;
        let parsed = PasswordHash::new(&user.password_hash).ok()?;
        hasher()
            .verify_password(password.as_bytes(), &parsed)
            .ok()?;
        Some(user.clone())
    }

    async fn find_by_id(&self, id: &str) -> Option<UserRecord> {
        self.users.iter().find(|u| u.id == id).cloned()
    }
}
