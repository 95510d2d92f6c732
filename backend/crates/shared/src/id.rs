//! Typed entity identifiers.
//!
//! `Id<T>` is a UUID tagged with a zero-sized marker so that, say, an
//! account id cannot be passed where a product id is expected. Markers are
//! declared next to the entity they identify:
//!
//! ```
//! use kernel::id::Id;
//! struct AccountMarker;
//! type AccountId = Id<AccountMarker>;
//! ```

use std::fmt;
use std::marker::PhantomData;
use uuid::Uuid;

pub struct Id<T> {
    raw: Uuid,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    /// Fresh random id (UUID v4).
    pub fn new() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    pub fn from_uuid(raw: Uuid) -> Self {
        Self {
            raw,
            _marker: PhantomData,
        }
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.raw
    }

    pub fn into_uuid(self) -> Uuid {
        self.raw
    }
}

// Manual impls: deriving would bound them on `T`, which is only a marker.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<T> Eq for Id<T> {}

impl<T> std::hash::Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<T> Default for Id<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.raw)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.raw, f)
    }
}

impl<T> From<Uuid> for Id<T> {
    fn from(raw: Uuid) -> Self {
        Self::from_uuid(raw)
    }
}

impl<T> From<Id<T>> for Uuid {
    fn from(id: Id<T>) -> Self {
        id.raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct OrderMarker;
    type OrderId = Id<OrderMarker>;

    #[test]
    fn round_trips_through_uuid() {
        let raw = Uuid::new_v4();
        let id = OrderId::from_uuid(raw);
        assert_eq!(id.as_uuid(), &raw);
        assert_eq!(id.into_uuid(), raw);
        assert_eq!(id.to_string(), raw.to_string());
    }

    #[test]
    fn fresh_ids_are_distinct() {
        assert_ne!(OrderId::new(), OrderId::new());
    }
}
