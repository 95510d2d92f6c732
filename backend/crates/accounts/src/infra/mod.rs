//! Infrastructure Layer
//!
//! PostgreSQL repositories and SMTP mail delivery.

pub mod postgres;
pub mod smtp;
