//! Value Objects

pub mod account_id;
pub mod email;
pub mod shop_name;
pub mod verification;
