//! Password hashing. bcrypt with the library default cost.

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::error::AppResult;

/// Hash a plaintext password for storage.
pub fn hash_password(plain: &str) -> AppResult<String> {
    Ok(hash(plain, DEFAULT_COST)?)
}

/// Check a plaintext password against a stored hash. A malformed hash
/// counts as a mismatch rather than an error.
pub fn verify_password(plain: &str, hashed: &str) -> bool {
    verify(plain, hashed).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let hashed = hash_password("hunter2").unwrap();
        assert_ne!(hashed, "hunter2");
        assert!(verify_password("hunter2", &hashed));
        assert!(!verify_password("hunter3", &hashed));
    }

    #[test]
    fn same_password_hashes_differently() {
        let a = hash_password("hunter2").unwrap();
        let b = hash_password("hunter2").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_hash_is_a_mismatch() {
        assert!(!verify_password("hunter2", "not-a-bcrypt-hash"));
    }
}
