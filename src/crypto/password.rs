use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand::rngs::OsRng;
use zeroize::Zeroizing;

use crate::error::{AppError, Result};

/// Argon2id memory cost in KiB (19 MiB).
const MEMORY_KIB: u32 = 19 * 1024;
const TIME_COST: u32 = 3;
const LANES: u32 = 6;

fn argon2id() -> Result<Argon2<'static>> {
    let params = Params::new(MEMORY_KIB, TIME_COST, LANES, None)
        .map_err(|e| AppError::Hashing(format!("Argon2 params: {}", e)))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hashes a signup password into a PHC string with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String> {
    let secret = Zeroizing::new(password.as_bytes().to_vec());
    let salt = SaltString::generate(&mut OsRng);

    let phc = argon2id()?
        .hash_password(&secret, &salt)
        .map_err(|e| AppError::Hashing(format!("Argon2 hash error: {}", e)))?
        .to_string();

    tracing::debug!("Password hashed");
    Ok(phc)
}

/// Checks a login password against the stored PHC string.
///
/// A mismatch is `Ok(false)`. Only an unparseable stored hash is an error.
pub fn verify_password(password: &str, stored: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored)
        .map_err(|e| AppError::Hashing(format!("Hash parse error: {}", e)))?;
    let secret = Zeroizing::new(password.as_bytes().to_vec());

    Ok(argon2id()?.verify_password(&secret, &parsed).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_only_the_original_password() {
        let hash = hash_password("broccoli-42").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("broccoli-42", &hash).unwrap());
        assert!(!verify_password("broccoli-43", &hash).unwrap());
    }

    #[test]
    fn hash_records_its_cost_parameters() {
        let hash = hash_password("oats").unwrap();
        assert!(hash.contains("m=19456,t=3,p=6"), "{hash}");
    }

    #[test]
    fn salts_differ_between_hashes() {
        assert_ne!(hash_password("same").unwrap(), hash_password("same").unwrap());
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(matches!(
            verify_password("pw", "not-a-phc-string"),
            Err(AppError::Hashing(_))
        ));
    }
}
