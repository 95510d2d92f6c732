//! Shared kernel for the marketplace backend.
//!
//! Holds the vocabulary every domain crate agrees on: the unified error
//! type with its HTTP mapping, and typed UUID wrappers. Nothing here may
//! depend on a domain crate.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
