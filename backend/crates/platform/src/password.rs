//! Password hashing and policy checks.
//!
//! Cleartext passwords live in [`ClearTextPassword`], which zeroizes its
//! memory on drop and never prints its contents. Hashes are Argon2id PHC
//! strings wrapped in [`HashedPassword`]. An optional application-wide
//! pepper can be appended before hashing.
//!
//! The policy follows NIST SP 800-63B: length bounds on NFKC-normalized
//! code points, no composition rules, plus a denylist of trivially
//! guessable inputs (and, for this API, entirely-numeric passwords, which
//! would collide with the look of a verification code).

use std::fmt;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// NIST: SHALL accept at least 8 characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;
/// Upper bound to keep hashing cost predictable.
pub const MAX_PASSWORD_LENGTH: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password needs at least {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Password exceeds the {max}-character limit ({actual})")]
    TooLong { max: usize, actual: usize },

    #[error("Password is empty or whitespace only")]
    EmptyOrWhitespace,

    #[error("Password contains control characters")]
    InvalidCharacter,

    #[error("Password cannot be entirely numeric")]
    EntirelyNumeric,

    #[error("Password is too easy to guess")]
    CommonPattern,
}

#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Hashing failed: {0}")]
    HashingFailed(String),

    #[error("Stored hash is not a valid PHC string")]
    InvalidHashFormat,
}

/// Cleartext password, zeroized on drop.
///
/// Deliberately not `Clone`; `Debug` is redacted.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Normalize (NFKC) and validate a candidate password against the
    /// policy. Used for registration and password changes.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let normalized: String = raw.nfkc().collect();

        if normalized.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        // Length is counted in code points, not bytes
        let len = normalized.chars().count();
        if len < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: len,
            });
        }
        if len > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: len,
            });
        }

        if normalized
            .chars()
            .any(|c| c.is_control() && !matches!(c, ' ' | '\t' | '\n'))
        {
            return Err(PasswordPolicyError::InvalidCharacter);
        }

        if normalized.chars().all(|c| c.is_ascii_digit()) {
            return Err(PasswordPolicyError::EntirelyNumeric);
        }

        if is_guessable(&normalized) {
            return Err(PasswordPolicyError::CommonPattern);
        }

        Ok(Self(normalized))
    }

    /// Normalize only, skipping the policy. Login and current-password
    /// checks must accept passwords that predate the current policy.
    pub fn for_verification(raw: String) -> Self {
        Self(raw.nfkc().collect())
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Hash with Argon2id and a fresh random salt. The pepper, when given,
    /// must also be supplied at verification time.
    pub fn hash(&self, pepper: Option<&[u8]>) -> Result<HashedPassword, PasswordHashError> {
        let material = peppered(self.as_bytes(), pepper);
        let salt = SaltString::generate(OsRng);

        // Argon2::default() is the OWASP-recommended id variant
        let hash = Argon2::default()
            .hash_password(&material, &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword(hash.to_string()))
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClearTextPassword([REDACTED])")
    }
}

/// Argon2id hash in PHC string form, safe to store and to print.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword(String);

impl HashedPassword {
    /// Wrap a stored hash, rejecting strings that are not valid PHC.
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();
        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self(hash))
    }

    pub fn as_phc_string(&self) -> &str {
        &self.0
    }

    /// Constant-time verification (argon2 compares digests internally).
    pub fn verify(&self, password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.0) else {
            return false;
        };
        let material = peppered(password.as_bytes(), pepper);
        Argon2::default().verify_password(&material, &parsed).is_ok()
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HashedPassword([HASH])")
    }
}

fn peppered(password: &[u8], pepper: Option<&[u8]>) -> Vec<u8> {
    let mut material = password.to_vec();
    if let Some(p) = pepper {
        material.extend_from_slice(p);
    }
    material
}

/// Inputs an attacker would try in the first handful of guesses.
fn is_guessable(password: &str) -> bool {
    let lower = password.to_lowercase();

    let mut chars = lower.chars();
    if let Some(first) = chars.next() {
        if chars.all(|c| c == first) {
            return true;
        }
    }

    if is_digit_run(&lower) {
        return true;
    }

    const KEYBOARD_RUNS: &[&str] = &[
        "qwerty", "qwertyuiop", "asdfgh", "asdfghjkl", "zxcvbn", "qazwsx", "1qaz2wsx",
    ];
    if KEYBOARD_RUNS.iter().any(|p| lower.contains(p)) {
        return true;
    }

    const DENYLIST: &[&str] = &[
        "password", "password1", "password123", "abcdefgh", "letmein", "welcome1", "admin123",
        "iloveyou", "sunshine", "princess", "football", "baseball", "trustno1",
    ];
    DENYLIST.contains(&lower.as_str())
}

/// Monotone ascending or descending digit sequences ("12345678",
/// "98765432"), wrapping at 9/0.
fn is_digit_run(s: &str) -> bool {
    let digits: Vec<u32> = s.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() < 4 || digits.len() != s.chars().count() {
        return false;
    }

    let up = digits.windows(2).all(|w| w[1] == (w[0] + 1) % 10);
    let down = digits.windows(2).all(|w| w[0] == (w[1] + 1) % 10);
    up || down
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_bounds_enforced() {
        assert!(matches!(
            ClearTextPassword::new("short".into()),
            Err(PasswordPolicyError::TooShort { .. })
        ));
        assert!(matches!(
            ClearTextPassword::new("a".repeat(MAX_PASSWORD_LENGTH + 1)),
            Err(PasswordPolicyError::TooLong { .. })
        ));
    }

    #[test]
    fn blank_input_rejected() {
        assert!(matches!(
            ClearTextPassword::new(String::new()),
            Err(PasswordPolicyError::EmptyOrWhitespace)
        ));
        assert!(matches!(
            ClearTextPassword::new("        ".into()),
            Err(PasswordPolicyError::EmptyOrWhitespace)
        ));
    }

    #[test]
    fn digits_only_rejected() {
        assert!(matches!(
            ClearTextPassword::new("93517246".into()),
            Err(PasswordPolicyError::EntirelyNumeric)
        ));
    }

    #[test]
    fn guessable_inputs_rejected() {
        for bad in ["password123", "qwertyuiop", "aaaaaaaa", "trustno1"] {
            assert!(
                matches!(
                    ClearTextPassword::new(bad.into()),
                    Err(PasswordPolicyError::CommonPattern)
                ),
                "{bad} should be rejected"
            );
        }
        // Sequential digits fail either way (numeric check fires first)
        assert!(ClearTextPassword::new("12345678".into()).is_err());
    }

    #[test]
    fn reasonable_passwords_accepted() {
        assert!(ClearTextPassword::new("Sturdy#Pass99".into()).is_ok());
        assert!(ClearTextPassword::new("Passw0rd!".into()).is_ok());
        assert!(ClearTextPassword::new("contraseña-segura!".into()).is_ok());
    }

    #[test]
    fn for_verification_skips_policy() {
        // Would fail ::new, but stored hashes may predate the policy
        let _ = ClearTextPassword::for_verification("short".into());
    }

    #[test]
    fn hash_verify_round_trip() {
        let password = ClearTextPassword::new("Sturdy#Pass99".into()).unwrap();
        let hashed = password.hash(None).unwrap();

        assert!(hashed.verify(&password, None));
        let wrong = ClearTextPassword::for_verification("Wrong#Pass42".into());
        assert!(!hashed.verify(&wrong, None));
    }

    #[test]
    fn pepper_must_match() {
        let password = ClearTextPassword::new("Sturdy#Pass99".into()).unwrap();
        let hashed = password.hash(Some(b"app-pepper")).unwrap();

        assert!(hashed.verify(&password, Some(b"app-pepper")));
        assert!(!hashed.verify(&password, None));
        assert!(!hashed.verify(&password, Some(b"other-pepper")));
    }

    #[test]
    fn phc_string_round_trip() {
        let password = ClearTextPassword::new("Sturdy#Pass99".into()).unwrap();
        let phc = password.hash(None).unwrap().as_phc_string().to_string();

        let restored = HashedPassword::from_phc_string(phc).unwrap();
        assert!(restored.verify(&password, None));

        assert!(HashedPassword::from_phc_string("not-a-phc-string").is_err());
    }

    #[test]
    fn debug_output_redacted() {
        let password = ClearTextPassword::for_verification("hunter22".into());
        let out = format!("{password:?}");
        assert!(out.contains("REDACTED"));
        assert!(!out.contains("hunter22"));
    }
}
