//! Catalog Entities
//!
//! Products, ratings, reels, and reel comments. Media is referenced by URL
//! only; upload and storage happen elsewhere.

use accounts::domain::value_object::account_id::AccountId;
use chrono::{DateTime, Utc};
use kernel::id::Id;
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, CatalogResult};

/// Marker type for product IDs
pub struct ProductMarker;
/// Type-safe product ID
pub type ProductId = Id<ProductMarker>;

/// Marker type for reel IDs
pub struct ReelMarker;
/// Type-safe reel ID
pub type ReelId = Id<ReelMarker>;

/// Marker type for reel comment IDs
pub struct CommentMarker;
/// Type-safe comment ID
pub type CommentId = Id<CommentMarker>;

/// Maximum product/reel name length
const NAME_MAX_LENGTH: usize = 200;
/// Maximum description length
const DESCRIPTION_MAX_LENGTH: usize = 5000;
/// Maximum comment length
const COMMENT_MAX_LENGTH: usize = 1000;

/// Physical condition of a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Condition {
    New,
    LikeNew,
    Good,
    Fair,
    Poor,
}

impl Condition {
    /// Stable string form for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::New => "new",
            Condition::LikeNew => "like-new",
            Condition::Good => "good",
            Condition::Fair => "fair",
            Condition::Poor => "poor",
        }
    }

    /// Parse from the stable string form
    pub fn parse(s: &str) -> CatalogResult<Self> {
        match s {
            "new" => Ok(Condition::New),
            "like-new" => Ok(Condition::LikeNew),
            "good" => Ok(Condition::Good),
            "fair" => Ok(Condition::Fair),
            "poor" => Ok(Condition::Poor),
            other => Err(CatalogError::Validation(format!(
                "Unknown condition: {other}"
            ))),
        }
    }
}

/// Product listing
#[derive(Debug, Clone)]
pub struct Product {
    pub product_id: ProductId,
    pub seller_id: AccountId,
    pub name: String,
    pub description: String,
    /// Price in minor currency units
    pub price: i64,
    pub region: String,
    pub condition: Condition,
    pub phone_number: String,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        seller_id: AccountId,
        name: String,
        description: String,
        price: i64,
        region: String,
        condition: Condition,
        phone_number: String,
        image_url: Option<String>,
    ) -> CatalogResult<Self> {
        let name = validate_name(name)?;
        let description = validate_description(description)?;
        if price < 0 {
            return Err(CatalogError::Validation(
                "Price cannot be negative".to_string(),
            ));
        }

        let now = Utc::now();
        Ok(Self {
            product_id: ProductId::new(),
            seller_id,
            name,
            description,
            price,
            region: region.trim().to_string(),
            condition,
            phone_number: phone_number.trim().to_string(),
            image_url,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Validated replacement fields for editing an existing product
///
/// Same checks as [`Product::new`]; identity, ownership, and `is_active`
/// are not editable through this path.
#[derive(Debug, Clone)]
pub struct ProductChanges {
    pub name: String,
    pub description: String,
    pub price: i64,
    pub region: String,
    pub condition: Condition,
    pub phone_number: String,
    pub image_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl ProductChanges {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: String,
        description: String,
        price: i64,
        region: String,
        condition: Condition,
        phone_number: String,
        image_url: Option<String>,
    ) -> CatalogResult<Self> {
        let name = validate_name(name)?;
        let description = validate_description(description)?;
        if price < 0 {
            return Err(CatalogError::Validation(
                "Price cannot be negative".to_string(),
            ));
        }

        Ok(Self {
            name,
            description,
            price,
            region: region.trim().to_string(),
            condition,
            phone_number: phone_number.trim().to_string(),
            image_url,
            updated_at: Utc::now(),
        })
    }
}

impl Product {
    pub fn apply(&mut self, changes: ProductChanges) {
        self.name = changes.name;
        self.description = changes.description;
        self.price = changes.price;
        self.region = changes.region;
        self.condition = changes.condition;
        self.phone_number = changes.phone_number;
        self.image_url = changes.image_url;
        self.updated_at = changes.updated_at;
    }
}

/// A product together with its SQL-computed rating aggregate
#[derive(Debug, Clone)]
pub struct ProductView {
    pub product: Product,
    pub average_rating: f64,
    pub total_ratings: i64,
}

/// Buyer rating of a product, unique per (product, buyer)
#[derive(Debug, Clone)]
pub struct Rating {
    pub product_id: ProductId,
    pub buyer_id: AccountId,
    pub stars: i16,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Rating {
    pub fn new(
        product_id: ProductId,
        buyer_id: AccountId,
        stars: i16,
        comment: Option<String>,
    ) -> CatalogResult<Self> {
        if !(1..=5).contains(&stars) {
            return Err(CatalogError::Validation(
                "Rating must be between 1 and 5 stars".to_string(),
            ));
        }

        Ok(Self {
            product_id,
            buyer_id,
            stars,
            comment: comment.map(|c| c.trim().to_string()).filter(|c| !c.is_empty()),
            created_at: Utc::now(),
        })
    }
}

/// Short promo video listing
#[derive(Debug, Clone)]
pub struct Reel {
    pub reel_id: ReelId,
    pub seller_id: AccountId,
    pub title: String,
    pub description: String,
    pub price: i64,
    pub video_url: String,
    pub thumbnail_url: Option<String>,
    /// Duration in seconds
    pub duration: i32,
    pub phone_number: String,
    pub views: i64,
    pub likes: i64,
    pub comments: i64,
    pub shares: i64,
    pub created_at: DateTime<Utc>,
}

impl Reel {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        seller_id: AccountId,
        title: String,
        description: String,
        price: i64,
        video_url: String,
        thumbnail_url: Option<String>,
        duration: i32,
        phone_number: String,
    ) -> CatalogResult<Self> {
        let title = validate_name(title)?;
        let description = validate_description(description)?;
        if price < 0 {
            return Err(CatalogError::Validation(
                "Price cannot be negative".to_string(),
            ));
        }
        if video_url.trim().is_empty() {
            return Err(CatalogError::Validation(
                "Video URL cannot be empty".to_string(),
            ));
        }
        if duration < 0 {
            return Err(CatalogError::Validation(
                "Duration cannot be negative".to_string(),
            ));
        }

        Ok(Self {
            reel_id: ReelId::new(),
            seller_id,
            title,
            description,
            price,
            video_url: video_url.trim().to_string(),
            thumbnail_url,
            duration,
            phone_number: phone_number.trim().to_string(),
            views: 0,
            likes: 0,
            comments: 0,
            shares: 0,
            created_at: Utc::now(),
        })
    }
}

/// Comment on a reel
#[derive(Debug, Clone)]
pub struct ReelComment {
    pub comment_id: CommentId,
    pub reel_id: ReelId,
    pub author_id: AccountId,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl ReelComment {
    pub fn new(reel_id: ReelId, author_id: AccountId, text: String) -> CatalogResult<Self> {
        let text = text.trim().to_string();
        if text.is_empty() {
            return Err(CatalogError::Validation(
                "Comment cannot be empty".to_string(),
            ));
        }
        if text.chars().count() > COMMENT_MAX_LENGTH {
            return Err(CatalogError::Validation(format!(
                "Comment must be at most {} characters",
                COMMENT_MAX_LENGTH
            )));
        }

        Ok(Self {
            comment_id: CommentId::new(),
            reel_id,
            author_id,
            text,
            created_at: Utc::now(),
        })
    }
}

fn validate_name(name: String) -> CatalogResult<String> {
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(CatalogError::Validation("Name cannot be empty".to_string()));
    }
    if name.chars().count() > NAME_MAX_LENGTH {
        return Err(CatalogError::Validation(format!(
            "Name must be at most {} characters",
            NAME_MAX_LENGTH
        )));
    }
    Ok(name)
}

fn validate_description(description: String) -> CatalogResult<String> {
    let description = description.trim().to_string();
    if description.chars().count() > DESCRIPTION_MAX_LENGTH {
        return Err(CatalogError::Validation(format!(
            "Description must be at most {} characters",
            DESCRIPTION_MAX_LENGTH
        )));
    }
    Ok(description)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seller() -> AccountId {
        AccountId::new()
    }

    #[test]
    fn test_condition_round_trip() {
        for c in [
            Condition::New,
            Condition::LikeNew,
            Condition::Good,
            Condition::Fair,
            Condition::Poor,
        ] {
            assert_eq!(Condition::parse(c.as_str()).unwrap(), c);
        }
        assert!(Condition::parse("mint").is_err());
    }

    #[test]
    fn test_product_validation() {
        let ok = Product::new(
            seller(),
            "Lamp".to_string(),
            "A lamp".to_string(),
            1500,
            "North".to_string(),
            Condition::Good,
            "+1234567890".to_string(),
            None,
        );
        assert!(ok.is_ok());
        assert!(ok.unwrap().is_active);

        assert!(
            Product::new(
                seller(),
                "  ".to_string(),
                String::new(),
                0,
                String::new(),
                Condition::New,
                String::new(),
                None,
            )
            .is_err()
        );

        assert!(
            Product::new(
                seller(),
                "Lamp".to_string(),
                String::new(),
                -1,
                String::new(),
                Condition::New,
                String::new(),
                None,
            )
            .is_err()
        );
    }

    #[test]
    fn test_product_changes_validation() {
        assert!(
            ProductChanges::new(
                "Lamp, restored".to_string(),
                String::new(),
                2500,
                "North".to_string(),
                Condition::LikeNew,
                "+1234567890".to_string(),
                None,
            )
            .is_ok()
        );
        assert!(
            ProductChanges::new(
                " ".to_string(),
                String::new(),
                2500,
                String::new(),
                Condition::New,
                String::new(),
                None,
            )
            .is_err()
        );
        assert!(
            ProductChanges::new(
                "Lamp".to_string(),
                String::new(),
                -5,
                String::new(),
                Condition::New,
                String::new(),
                None,
            )
            .is_err()
        );
    }

    #[test]
    fn test_rating_bounds() {
        let product = ProductId::new();
        assert!(Rating::new(product, seller(), 0, None).is_err());
        assert!(Rating::new(product, seller(), 6, None).is_err());
        assert!(Rating::new(product, seller(), 1, None).is_ok());
        assert!(Rating::new(product, seller(), 5, Some("great".to_string())).is_ok());
    }

    #[test]
    fn test_rating_blank_comment_dropped() {
        let rating = Rating::new(ProductId::new(), seller(), 4, Some("   ".to_string())).unwrap();
        assert!(rating.comment.is_none());
    }

    #[test]
    fn test_reel_validation() {
        assert!(
            Reel::new(
                seller(),
                "Tour".to_string(),
                String::new(),
                0,
                "https://cdn.example/v.mp4".to_string(),
                None,
                30,
                String::new(),
            )
            .is_ok()
        );

        assert!(
            Reel::new(
                seller(),
                "Tour".to_string(),
                String::new(),
                0,
                "  ".to_string(),
                None,
                30,
                String::new(),
            )
            .is_err()
        );
    }

    #[test]
    fn test_comment_validation() {
        let reel = ReelId::new();
        assert!(ReelComment::new(reel, seller(), "nice".to_string()).is_ok());
        assert!(ReelComment::new(reel, seller(), "  ".to_string()).is_err());
        assert!(ReelComment::new(reel, seller(), "x".repeat(COMMENT_MAX_LENGTH + 1)).is_err());
    }
}
