//! Account ID Value Object

use kernel::id::Id;

/// Marker type for account IDs
pub struct AccountMarker;

/// Type-safe account ID (UUID v4)
pub type AccountId = Id<AccountMarker>;
