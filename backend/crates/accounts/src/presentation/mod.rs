//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and auth middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;
