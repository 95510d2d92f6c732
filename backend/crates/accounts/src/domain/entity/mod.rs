//! Domain Entities

pub mod account;
