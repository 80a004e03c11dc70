/**
 * Password Hashing
 *
 * One-way, salted, deliberately slow hashing of plaintext passwords using
 * bcrypt. Hashes are self-describing (`$2b$<cost>$<salt><digest>`), so
 * verification needs nothing but the stored string.
 *
 * bcrypt only reads the first 72 bytes of its input. Longer passwords are
 * rejected at registration and never verify, which keeps
 * `verify(p + "x", hash(p))` false for every accepted `p`.
 */

use bcrypt::DEFAULT_COST;

use crate::backend::error::BackendError;

/// Longest password bcrypt consumes without truncation.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Lowest work factor bcrypt accepts. Only suitable for tests.
pub const MIN_COST: u32 = 4;

/// Highest work factor bcrypt accepts.
pub const MAX_COST: u32 = 31;

/// bcrypt hasher with a fixed work factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self { cost: DEFAULT_COST }
    }
}

impl PasswordHasher {
    /// Create a hasher with the given bcrypt cost.
    ///
    /// The cost is validated by the server configuration; an out-of-range
    /// value surfaces as an `Internal` error from [`PasswordHasher::hash`].
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password with a fresh random salt.
    ///
    /// Two calls on the same plaintext return different strings, both of
    /// which verify against it.
    pub fn hash(&self, plaintext: &str) -> Result<String, BackendError> {
        bcrypt::hash(plaintext, self.cost)
            .map_err(|e| BackendError::internal(format!("password hashing failed: {}", e)))
    }

    /// Check a plaintext password against a stored hash.
    ///
    /// A malformed hash yields `false` rather than an error.
    pub fn verify(&self, plaintext: &str, hash: &str) -> bool {
        if plaintext.len() > MAX_PASSWORD_BYTES {
            return false;
        }
        bcrypt::verify(plaintext, hash).unwrap_or(false)
    }
}
