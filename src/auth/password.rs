use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use sha2::{Digest, Sha384};
use subtle::ConstantTimeEq;

const ITERATIONS: usize = 4600;

/// Iterated salted SHA-384, base64-encoded. The exact construction is a
/// compatibility contract with the hashes already stored in the users table;
/// changing it invalidates every stored credential.
pub fn encode_password(password: &str, salt: &str) -> String {
    let salted = format!("{password}{{{salt}}}");
    let salted = salted.as_bytes();

    let mut hasher = Sha384::new();
    hasher.update(salted);
    let mut digest = hasher.finalize();

    for _ in 1..ITERATIONS {
        let mut hasher = Sha384::new();
        hasher.update(digest);
        hasher.update(salted);
        digest = hasher.finalize();
    }

    BASE64.encode(digest)
}

/// Constant-time comparison of a candidate password against a stored hash.
pub fn verify_password(password: &str, salt: &str, stored_hash: &str) -> bool {
    let computed = encode_password(password, salt);

    computed.as_bytes().ct_eq(stored_hash.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoding_is_deterministic() {
        let a = encode_password("hunter2", "pepper");
        let b = encode_password("hunter2", "pepper");
        assert_eq!(a, b);
    }

    #[test]
    fn salt_changes_the_digest() {
        assert_ne!(encode_password("hunter2", "pepper"), encode_password("hunter2", "salt"));
    }

    #[test]
    fn verify_accepts_the_matching_password() {
        let stored = encode_password("hunter2", "pepper");
        assert!(verify_password("hunter2", "pepper", &stored));
    }

    #[test]
    fn verify_rejects_a_wrong_password() {
        let stored = encode_password("hunter2", "pepper");
        assert!(!verify_password("hunter3", "pepper", &stored));
        assert!(!verify_password("hunter2", "salt", &stored));
    }
}
