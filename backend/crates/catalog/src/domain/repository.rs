//! Repository Traits

use accounts::domain::value_object::account_id::AccountId;

use crate::domain::entity::{
    CommentId, Product, ProductChanges, ProductId, ProductView, Rating, Reel, ReelComment, ReelId,
};
use crate::error::CatalogResult;

/// Product repository trait
#[trait_variant::make(ProductRepository: Send)]
pub trait LocalProductRepository {
    /// Create a new product
    async fn create(&self, product: &Product) -> CatalogResult<()>;

    /// Find an active product with its rating aggregate
    async fn find_by_id(&self, product_id: &ProductId) -> CatalogResult<Option<ProductView>>;

    /// List active products, newest first
    async fn list_active(&self, limit: i64, offset: i64) -> CatalogResult<Vec<ProductView>>;

    /// List a seller's own products, including inactive ones
    async fn list_by_seller(&self, seller_id: &AccountId) -> CatalogResult<Vec<ProductView>>;

    /// List a seller's active products for the public seller page
    async fn list_active_by_seller(&self, seller_id: &AccountId)
    -> CatalogResult<Vec<ProductView>>;

    /// Replace an owned product's editable fields
    ///
    /// Returns false when no matching row exists, which covers both a
    /// missing product and one owned by someone else.
    async fn update_owned(
        &self,
        product_id: &ProductId,
        seller_id: &AccountId,
        changes: &ProductChanges,
    ) -> CatalogResult<bool>;

    /// Delete a product owned by the given seller
    ///
    /// Returns false when no matching row exists, which covers both a
    /// missing product and one owned by someone else.
    async fn delete_owned(
        &self,
        product_id: &ProductId,
        seller_id: &AccountId,
    ) -> CatalogResult<bool>;

    /// Upsert a buyer's rating of a product
    async fn rate(&self, rating: &Rating) -> CatalogResult<()>;

    /// List a product's ratings, newest first
    async fn list_ratings(&self, product_id: &ProductId) -> CatalogResult<Vec<Rating>>;

    /// Delete a buyer's own rating; false when the buyer never rated it
    async fn delete_rating(
        &self,
        product_id: &ProductId,
        buyer_id: &AccountId,
    ) -> CatalogResult<bool>;
}

/// Reel repository trait
#[trait_variant::make(ReelRepository: Send)]
pub trait LocalReelRepository {
    /// Create a new reel
    async fn create(&self, reel: &Reel) -> CatalogResult<()>;

    /// Find a reel by ID
    async fn find_by_id(&self, reel_id: &ReelId) -> CatalogResult<Option<Reel>>;

    /// List reels, newest first
    async fn list(&self, limit: i64, offset: i64) -> CatalogResult<Vec<Reel>>;

    /// List a seller's own reels, newest first
    async fn list_by_seller(&self, seller_id: &AccountId) -> CatalogResult<Vec<Reel>>;

    /// Delete a reel owned by the given seller, with its likes and comments
    ///
    /// Returns false for a missing reel or someone else's.
    async fn delete_owned(&self, reel_id: &ReelId, seller_id: &AccountId) -> CatalogResult<bool>;

    /// Bump the view counter; false when the reel does not exist
    async fn increment_views(&self, reel_id: &ReelId) -> CatalogResult<bool>;

    /// Bump the share counter; false when the reel does not exist
    async fn increment_shares(&self, reel_id: &ReelId) -> CatalogResult<bool>;

    /// Toggle an account's like on a reel
    ///
    /// Returns (now_liked, like_count) or None when the reel is missing.
    async fn toggle_like(
        &self,
        reel_id: &ReelId,
        account_id: &AccountId,
    ) -> CatalogResult<Option<(bool, i64)>>;

    /// Add a comment and bump the comment counter
    async fn add_comment(&self, comment: &ReelComment) -> CatalogResult<()>;

    /// List a reel's comments, oldest first
    async fn list_comments(&self, reel_id: &ReelId) -> CatalogResult<Vec<ReelComment>>;

    /// Delete the author's own comment and drop the comment counter
    ///
    /// Returns false for a missing comment or someone else's.
    async fn delete_comment(
        &self,
        comment_id: &CommentId,
        author_id: &AccountId,
    ) -> CatalogResult<bool>;
}
