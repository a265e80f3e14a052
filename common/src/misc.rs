use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
        rand_core::{OsRng, RngCore},
    },
};

use crate::error::{AppError, Res};

/// Hashes a secret with Argon2 and a random salt.
pub fn hash_str(value: &str) -> Res<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(value.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash secret: {}", e)))
}

/// Checks a secret against a stored Argon2 hash.
pub fn verify_hash(value: &str, hash: &str) -> Res<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(format!("Stored hash is malformed: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(value.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Canonical form under which emails are stored and looked up.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Loose shape check: one `@`, something before it, a dot in the domain.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}

/// Six-digit numeric code, zero padded.
pub fn generate_code() -> String {
    format!("{:06}", OsRng.next_u32() % 1_000_000)
}
