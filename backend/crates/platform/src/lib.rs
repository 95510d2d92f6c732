//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (random bytes, numeric codes, constant-time compare)
//! - Password hashing (Argon2id, NIST SP 800-63B compliant)
//! - JWT access/refresh token issuance

pub mod crypto;
pub mod password;
pub mod token;
