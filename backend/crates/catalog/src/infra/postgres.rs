//! PostgreSQL Repository Implementations

use accounts::domain::value_object::account_id::AccountId;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{
    CommentId, Condition, Product, ProductChanges, ProductId, ProductView, Rating, Reel,
    ReelComment, ReelId,
};
use crate::domain::repository::{ProductRepository, ReelRepository};
use crate::error::{CatalogError, CatalogResult};

/// PostgreSQL-backed catalog repository
#[derive(Clone)]
pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const PRODUCT_VIEW_SELECT: &str = r#"
    SELECT
        p.product_id,
        p.seller_id,
        p.name,
        p.description,
        p.price,
        p.region,
        p.condition,
        p.phone_number,
        p.image_url,
        p.is_active,
        p.created_at,
        p.updated_at,
        COALESCE(AVG(r.stars)::float8, 0) AS average_rating,
        COUNT(r.stars) AS total_ratings
    FROM products p
    LEFT JOIN ratings r ON r.product_id = p.product_id
"#;

impl ProductRepository for PgCatalogRepository {
    async fn create(&self, product: &Product) -> CatalogResult<()> {
        sqlx::query(
            r#"
            INSERT INTO products (
                product_id,
                seller_id,
                name,
                description,
                price,
                region,
                condition,
                phone_number,
                image_url,
                is_active,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(product.product_id.as_uuid())
        .bind(product.seller_id.as_uuid())
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(&product.region)
        .bind(product.condition.as_str())
        .bind(&product.phone_number)
        .bind(&product.image_url)
        .bind(product.is_active)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, product_id: &ProductId) -> CatalogResult<Option<ProductView>> {
        let sql = format!(
            "{PRODUCT_VIEW_SELECT} WHERE p.product_id = $1 AND p.is_active GROUP BY p.product_id"
        );
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(product_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_view()).transpose()
    }

    async fn list_active(&self, limit: i64, offset: i64) -> CatalogResult<Vec<ProductView>> {
        let sql = format!(
            "{PRODUCT_VIEW_SELECT} WHERE p.is_active \
             GROUP BY p.product_id ORDER BY p.created_at DESC LIMIT $1 OFFSET $2"
        );
        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(|r| r.into_view()).collect()
    }

    async fn list_by_seller(&self, seller_id: &AccountId) -> CatalogResult<Vec<ProductView>> {
        let sql = format!(
            "{PRODUCT_VIEW_SELECT} WHERE p.seller_id = $1 \
             GROUP BY p.product_id ORDER BY p.created_at DESC"
        );
        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(seller_id.as_uuid())
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(|r| r.into_view()).collect()
    }

    async fn list_active_by_seller(
        &self,
        seller_id: &AccountId,
    ) -> CatalogResult<Vec<ProductView>> {
        let sql = format!(
            "{PRODUCT_VIEW_SELECT} WHERE p.seller_id = $1 AND p.is_active \
             GROUP BY p.product_id ORDER BY p.created_at DESC"
        );
        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(seller_id.as_uuid())
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(|r| r.into_view()).collect()
    }

    async fn update_owned(
        &self,
        product_id: &ProductId,
        seller_id: &AccountId,
        changes: &ProductChanges,
    ) -> CatalogResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE products
            SET name = $3,
                description = $4,
                price = $5,
                region = $6,
                condition = $7,
                phone_number = $8,
                image_url = $9,
                updated_at = $10
            WHERE product_id = $1 AND seller_id = $2
            "#,
        )
        .bind(product_id.as_uuid())
        .bind(seller_id.as_uuid())
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(changes.price)
        .bind(&changes.region)
        .bind(changes.condition.as_str())
        .bind(&changes.phone_number)
        .bind(&changes.image_url)
        .bind(changes.updated_at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated > 0)
    }

    async fn delete_owned(
        &self,
        product_id: &ProductId,
        seller_id: &AccountId,
    ) -> CatalogResult<bool> {
        let deleted = sqlx::query("DELETE FROM products WHERE product_id = $1 AND seller_id = $2")
            .bind(product_id.as_uuid())
            .bind(seller_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn rate(&self, rating: &Rating) -> CatalogResult<()> {
        sqlx::query(
            r#"
            INSERT INTO ratings (product_id, buyer_id, stars, comment, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (product_id, buyer_id)
            DO UPDATE SET stars = EXCLUDED.stars,
                          comment = EXCLUDED.comment,
                          created_at = EXCLUDED.created_at
            "#,
        )
        .bind(rating.product_id.as_uuid())
        .bind(rating.buyer_id.as_uuid())
        .bind(rating.stars)
        .bind(&rating.comment)
        .bind(rating.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_ratings(&self, product_id: &ProductId) -> CatalogResult<Vec<Rating>> {
        let rows = sqlx::query_as::<_, RatingRow>(
            r#"
            SELECT product_id, buyer_id, stars, comment, created_at
            FROM ratings
            WHERE product_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(product_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_rating()).collect())
    }

    async fn delete_rating(
        &self,
        product_id: &ProductId,
        buyer_id: &AccountId,
    ) -> CatalogResult<bool> {
        let deleted = sqlx::query("DELETE FROM ratings WHERE product_id = $1 AND buyer_id = $2")
            .bind(product_id.as_uuid())
            .bind(buyer_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

/// Database row for the product view
#[derive(sqlx::FromRow)]
struct ProductRow {
    product_id: Uuid,
    seller_id: Uuid,
    name: String,
    description: String,
    price: i64,
    region: String,
    condition: String,
    phone_number: String,
    image_url: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    average_rating: f64,
    total_ratings: i64,
}

impl ProductRow {
    fn into_view(self) -> CatalogResult<ProductView> {
        Ok(ProductView {
            product: Product {
                product_id: ProductId::from_uuid(self.product_id),
                seller_id: AccountId::from_uuid(self.seller_id),
                name: self.name,
                description: self.description,
                price: self.price,
                region: self.region,
                condition: Condition::parse(&self.condition)?,
                phone_number: self.phone_number,
                image_url: self.image_url,
                is_active: self.is_active,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
            average_rating: self.average_rating,
            total_ratings: self.total_ratings,
        })
    }
}

/// Database row for ratings
#[derive(sqlx::FromRow)]
struct RatingRow {
    product_id: Uuid,
    buyer_id: Uuid,
    stars: i16,
    comment: Option<String>,
    created_at: DateTime<Utc>,
}

impl RatingRow {
    fn into_rating(self) -> Rating {
        Rating {
            product_id: ProductId::from_uuid(self.product_id),
            buyer_id: AccountId::from_uuid(self.buyer_id),
            stars: self.stars,
            comment: self.comment,
            created_at: self.created_at,
        }
    }
}

// ============================================================================
// Reels
// ============================================================================

impl ReelRepository for PgCatalogRepository {
    async fn create(&self, reel: &Reel) -> CatalogResult<()> {
        sqlx::query(
            r#"
            INSERT INTO reels (
                reel_id,
                seller_id,
                title,
                description,
                price,
                video_url,
                thumbnail_url,
                duration,
                phone_number,
                views,
                likes,
                comments,
                shares,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(reel.reel_id.as_uuid())
        .bind(reel.seller_id.as_uuid())
        .bind(&reel.title)
        .bind(&reel.description)
        .bind(reel.price)
        .bind(&reel.video_url)
        .bind(&reel.thumbnail_url)
        .bind(reel.duration)
        .bind(&reel.phone_number)
        .bind(reel.views)
        .bind(reel.likes)
        .bind(reel.comments)
        .bind(reel.shares)
        .bind(reel.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, reel_id: &ReelId) -> CatalogResult<Option<Reel>> {
        let row = sqlx::query_as::<_, ReelRow>("SELECT * FROM reels WHERE reel_id = $1")
            .bind(reel_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.into_reel()))
    }

    async fn list(&self, limit: i64, offset: i64) -> CatalogResult<Vec<Reel>> {
        let rows = sqlx::query_as::<_, ReelRow>(
            "SELECT * FROM reels ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_reel()).collect())
    }

    async fn list_by_seller(&self, seller_id: &AccountId) -> CatalogResult<Vec<Reel>> {
        let rows = sqlx::query_as::<_, ReelRow>(
            "SELECT * FROM reels WHERE seller_id = $1 ORDER BY created_at DESC",
        )
        .bind(seller_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_reel()).collect())
    }

    async fn delete_owned(&self, reel_id: &ReelId, seller_id: &AccountId) -> CatalogResult<bool> {
        // Likes and comments go with it through the cascade
        let deleted = sqlx::query("DELETE FROM reels WHERE reel_id = $1 AND seller_id = $2")
            .bind(reel_id.as_uuid())
            .bind(seller_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn increment_views(&self, reel_id: &ReelId) -> CatalogResult<bool> {
        let updated = sqlx::query("UPDATE reels SET views = views + 1 WHERE reel_id = $1")
            .bind(reel_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(updated > 0)
    }

    async fn increment_shares(&self, reel_id: &ReelId) -> CatalogResult<bool> {
        let updated = sqlx::query("UPDATE reels SET shares = shares + 1 WHERE reel_id = $1")
            .bind(reel_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(updated > 0)
    }

    async fn toggle_like(
        &self,
        reel_id: &ReelId,
        account_id: &AccountId,
    ) -> CatalogResult<Option<(bool, i64)>> {
        let mut tx = self.pool.begin().await?;

        let removed = sqlx::query("DELETE FROM reel_likes WHERE reel_id = $1 AND account_id = $2")
            .bind(reel_id.as_uuid())
            .bind(account_id.as_uuid())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let likes = if removed > 0 {
            sqlx::query_scalar::<_, i64>(
                "UPDATE reels SET likes = likes - 1 WHERE reel_id = $1 RETURNING likes",
            )
            .bind(reel_id.as_uuid())
            .fetch_optional(&mut *tx)
            .await?
        } else {
            let reel_exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM reels WHERE reel_id = $1)",
            )
            .bind(reel_id.as_uuid())
            .fetch_one(&mut *tx)
            .await?;

            if !reel_exists {
                tx.rollback().await?;
                return Ok(None);
            }

            // Two racing first-likes both reach this branch; the loser's
            // insert is a no-op and must not bump the counter
            let inserted = sqlx::query(
                "INSERT INTO reel_likes (reel_id, account_id) VALUES ($1, $2) \
                 ON CONFLICT DO NOTHING",
            )
            .bind(reel_id.as_uuid())
            .bind(account_id.as_uuid())
            .execute(&mut *tx)
            .await?
            .rows_affected();

            if inserted > 0 {
                sqlx::query_scalar::<_, i64>(
                    "UPDATE reels SET likes = likes + 1 WHERE reel_id = $1 RETURNING likes",
                )
                .bind(reel_id.as_uuid())
                .fetch_optional(&mut *tx)
                .await?
            } else {
                sqlx::query_scalar::<_, i64>("SELECT likes FROM reels WHERE reel_id = $1")
                    .bind(reel_id.as_uuid())
                    .fetch_optional(&mut *tx)
                    .await?
            }
        };

        tx.commit().await?;

        Ok(likes.map(|count| (removed == 0, count)))
    }

    async fn add_comment(&self, comment: &ReelComment) -> CatalogResult<()> {
        let mut tx = self.pool.begin().await?;

        let updated =
            sqlx::query("UPDATE reels SET comments = comments + 1 WHERE reel_id = $1")
                .bind(comment.reel_id.as_uuid())
                .execute(&mut *tx)
                .await?
                .rows_affected();

        if updated == 0 {
            tx.rollback().await?;
            return Err(CatalogError::ReelNotFound);
        }

        sqlx::query(
            r#"
            INSERT INTO reel_comments (comment_id, reel_id, author_id, text, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(comment.comment_id.as_uuid())
        .bind(comment.reel_id.as_uuid())
        .bind(comment.author_id.as_uuid())
        .bind(&comment.text)
        .bind(comment.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(())
    }

    async fn list_comments(&self, reel_id: &ReelId) -> CatalogResult<Vec<ReelComment>> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT comment_id, reel_id, author_id, text, created_at
            FROM reel_comments
            WHERE reel_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(reel_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_comment()).collect())
    }

    async fn delete_comment(
        &self,
        comment_id: &CommentId,
        author_id: &AccountId,
    ) -> CatalogResult<bool> {
        let mut tx = self.pool.begin().await?;

        let reel_id: Option<Uuid> = sqlx::query_scalar(
            "DELETE FROM reel_comments WHERE comment_id = $1 AND author_id = $2 RETURNING reel_id",
        )
        .bind(comment_id.as_uuid())
        .bind(author_id.as_uuid())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(reel_id) = reel_id else {
            tx.rollback().await?;
            return Ok(false);
        };

        sqlx::query("UPDATE reels SET comments = GREATEST(comments - 1, 0) WHERE reel_id = $1")
            .bind(reel_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(true)
    }
}

/// Database row for reels
#[derive(sqlx::FromRow)]
struct ReelRow {
    reel_id: Uuid,
    seller_id: Uuid,
    title: String,
    description: String,
    price: i64,
    video_url: String,
    thumbnail_url: Option<String>,
    duration: i32,
    phone_number: String,
    views: i64,
    likes: i64,
    comments: i64,
    shares: i64,
    created_at: DateTime<Utc>,
}

impl ReelRow {
    fn into_reel(self) -> Reel {
        Reel {
            reel_id: ReelId::from_uuid(self.reel_id),
            seller_id: AccountId::from_uuid(self.seller_id),
            title: self.title,
            description: self.description,
            price: self.price,
            video_url: self.video_url,
            thumbnail_url: self.thumbnail_url,
            duration: self.duration,
            phone_number: self.phone_number,
            views: self.views,
            likes: self.likes,
            comments: self.comments,
            shares: self.shares,
            created_at: self.created_at,
        }
    }
}

/// Database row for reel comments
#[derive(sqlx::FromRow)]
struct CommentRow {
    comment_id: Uuid,
    reel_id: Uuid,
    author_id: Uuid,
    text: String,
    created_at: DateTime<Utc>,
}

impl CommentRow {
    fn into_comment(self) -> ReelComment {
        ReelComment {
            comment_id: CommentId::from_uuid(self.comment_id),
            reel_id: ReelId::from_uuid(self.reel_id),
            author_id: AccountId::from_uuid(self.author_id),
            text: self.text,
            created_at: self.created_at,
        }
    }
}
