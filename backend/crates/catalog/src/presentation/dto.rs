//! Data Transfer Objects

use serde::{Deserialize, Serialize};

use crate::domain::entity::{Condition, ProductView, Rating, Reel, ReelComment};

/// Default page size for list endpoints
pub const DEFAULT_PAGE_SIZE: i64 = 20;
/// Maximum page size for list endpoints
pub const MAX_PAGE_SIZE: i64 = 100;

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ListParams {
    /// Clamp to sane bounds
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub description: String,
    pub price: i64,
    pub region: String,
    pub condition: Condition,
    pub phone_number: String,
    pub image_url: Option<String>,
}

/// Full replacement of a product's editable fields
#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    pub name: String,
    pub description: String,
    pub price: i64,
    pub region: String,
    pub condition: Condition,
    pub phone_number: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RateProductRequest {
    pub stars: i16,
    pub comment: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateReelRequest {
    pub title: String,
    pub description: String,
    pub price: i64,
    pub video_url: String,
    pub thumbnail_url: Option<String>,
    pub duration: i32,
    pub phone_number: String,
}

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub text: String,
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub product_id: String,
    pub seller_id: String,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub region: String,
    pub condition: Condition,
    pub phone_number: String,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub average_rating: f64,
    pub total_ratings: i64,
    pub created_at: String,
}

impl From<ProductView> for ProductResponse {
    fn from(view: ProductView) -> Self {
        let p = view.product;
        Self {
            product_id: p.product_id.to_string(),
            seller_id: p.seller_id.to_string(),
            name: p.name,
            description: p.description,
            price: p.price,
            region: p.region,
            condition: p.condition,
            phone_number: p.phone_number,
            image_url: p.image_url,
            is_active: p.is_active,
            average_rating: view.average_rating,
            total_ratings: view.total_ratings,
            created_at: p.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RatingResponse {
    pub product_id: String,
    pub buyer_id: String,
    pub stars: i16,
    pub comment: Option<String>,
    pub created_at: String,
}

impl From<Rating> for RatingResponse {
    fn from(rating: Rating) -> Self {
        Self {
            product_id: rating.product_id.to_string(),
            buyer_id: rating.buyer_id.to_string(),
            stars: rating.stars,
            comment: rating.comment,
            created_at: rating.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReelResponse {
    pub reel_id: String,
    pub seller_id: String,
    pub title: String,
    pub description: String,
    pub price: i64,
    pub video_url: String,
    pub thumbnail_url: Option<String>,
    pub duration: i32,
    pub phone_number: String,
    pub views: i64,
    pub likes: i64,
    pub comments: i64,
    pub shares: i64,
    pub created_at: String,
}

impl From<Reel> for ReelResponse {
    fn from(reel: Reel) -> Self {
        Self {
            reel_id: reel.reel_id.to_string(),
            seller_id: reel.seller_id.to_string(),
            title: reel.title,
            description: reel.description,
            price: reel.price,
            video_url: reel.video_url,
            thumbnail_url: reel.thumbnail_url,
            duration: reel.duration,
            phone_number: reel.phone_number,
            views: reel.views,
            likes: reel.likes,
            comments: reel.comments,
            shares: reel.shares,
            created_at: reel.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub comment_id: String,
    pub reel_id: String,
    pub author_id: String,
    pub text: String,
    pub created_at: String,
}

impl From<ReelComment> for CommentResponse {
    fn from(comment: ReelComment) -> Self {
        Self {
            comment_id: comment.comment_id.to_string(),
            reel_id: comment.reel_id.to_string(),
            author_id: comment.author_id.to_string(),
            text: comment.text,
            created_at: comment.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LikeResponse {
    pub liked: bool,
    pub likes: i64,
}
