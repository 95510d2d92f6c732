//! HTTP Handlers
//!
//! Thin handlers over the repositories. Mutations require authentication;
//! creating listings additionally requires a verified account.

use accounts::domain::value_object::account_id::AccountId;
use accounts::presentation::middleware::CurrentAccount;
use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entity::{
    CommentId, Product, ProductChanges, ProductId, Rating, Reel, ReelComment, ReelId,
};
use crate::domain::repository::{ProductRepository, ReelRepository};
use crate::error::{CatalogError, CatalogResult};
use crate::presentation::dto::{
    CommentRequest, CommentResponse, CreateProductRequest, CreateReelRequest, LikeResponse,
    ListParams, MessageResponse, ProductResponse, RateProductRequest, RatingResponse,
    ReelResponse, UpdateProductRequest,
};

/// Shared state for catalog handlers
#[derive(Clone)]
pub struct CatalogAppState<R>
where
    R: ProductRepository + ReelRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

fn require_verified(current: &CurrentAccount) -> CatalogResult<()> {
    if !current.verified {
        return Err(CatalogError::PermissionDenied);
    }
    Ok(())
}

// ============================================================================
// Products
// ============================================================================

/// GET /api/catalog/products
pub async fn list_products<R>(
    State(state): State<CatalogAppState<R>>,
    Query(params): Query<ListParams>,
) -> CatalogResult<Json<Vec<ProductResponse>>>
where
    R: ProductRepository + ReelRepository + Clone + Send + Sync + 'static,
{
    let products = state
        .repo
        .list_active(params.limit(), params.offset())
        .await?;

    Ok(Json(products.into_iter().map(Into::into).collect()))
}

/// GET /api/catalog/products/{id}
pub async fn get_product<R>(
    State(state): State<CatalogAppState<R>>,
    Path(id): Path<Uuid>,
) -> CatalogResult<Json<ProductResponse>>
where
    R: ProductRepository + ReelRepository + Clone + Send + Sync + 'static,
{
    let view = ProductRepository::find_by_id(state.repo.as_ref(), &ProductId::from_uuid(id))
        .await?
        .ok_or(CatalogError::ProductNotFound)?;

    Ok(Json(view.into()))
}

/// GET /api/catalog/products/mine
pub async fn my_products<R>(
    State(state): State<CatalogAppState<R>>,
    Extension(current): Extension<CurrentAccount>,
) -> CatalogResult<Json<Vec<ProductResponse>>>
where
    R: ProductRepository + ReelRepository + Clone + Send + Sync + 'static,
{
    let products =
        ProductRepository::list_by_seller(state.repo.as_ref(), &current.account_id).await?;

    Ok(Json(products.into_iter().map(Into::into).collect()))
}

/// GET /api/catalog/products/seller/{seller_id}
pub async fn seller_products<R>(
    State(state): State<CatalogAppState<R>>,
    Path(seller_id): Path<Uuid>,
) -> CatalogResult<Json<Vec<ProductResponse>>>
where
    R: ProductRepository + ReelRepository + Clone + Send + Sync + 'static,
{
    let products = state
        .repo
        .list_active_by_seller(&AccountId::from_uuid(seller_id))
        .await?;

    Ok(Json(products.into_iter().map(Into::into).collect()))
}

/// POST /api/catalog/products
pub async fn create_product<R>(
    State(state): State<CatalogAppState<R>>,
    Extension(current): Extension<CurrentAccount>,
    Json(req): Json<CreateProductRequest>,
) -> CatalogResult<(StatusCode, Json<MessageResponse>)>
where
    R: ProductRepository + ReelRepository + Clone + Send + Sync + 'static,
{
    require_verified(&current)?;

    let product = Product::new(
        current.account_id,
        req.name,
        req.description,
        req.price,
        req.region,
        req.condition,
        req.phone_number,
        req.image_url,
    )?;

    ProductRepository::create(state.repo.as_ref(), &product).await?;

    tracing::info!(product_id = %product.product_id, "Product created");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: product.product_id.to_string(),
        }),
    ))
}

/// PUT /api/catalog/products/{id}
pub async fn update_product<R>(
    State(state): State<CatalogAppState<R>>,
    Extension(current): Extension<CurrentAccount>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateProductRequest>,
) -> CatalogResult<Json<MessageResponse>>
where
    R: ProductRepository + ReelRepository + Clone + Send + Sync + 'static,
{
    let changes = ProductChanges::new(
        req.name,
        req.description,
        req.price,
        req.region,
        req.condition,
        req.phone_number,
        req.image_url,
    )?;

    let updated = state
        .repo
        .update_owned(&ProductId::from_uuid(id), &current.account_id, &changes)
        .await?;

    // Another seller's product looks the same as a missing one
    if !updated {
        return Err(CatalogError::ProductNotFound);
    }

    Ok(Json(MessageResponse {
        message: "Product updated".to_string(),
    }))
}

/// DELETE /api/catalog/products/{id}
pub async fn delete_product<R>(
    State(state): State<CatalogAppState<R>>,
    Extension(current): Extension<CurrentAccount>,
    Path(id): Path<Uuid>,
) -> CatalogResult<StatusCode>
where
    R: ProductRepository + ReelRepository + Clone + Send + Sync + 'static,
{
    let deleted = ProductRepository::delete_owned(
        state.repo.as_ref(),
        &ProductId::from_uuid(id),
        &current.account_id,
    )
    .await?;

    // Another seller's product looks the same as a missing one
    if !deleted {
        return Err(CatalogError::ProductNotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/catalog/products/{id}/rating
pub async fn rate_product<R>(
    State(state): State<CatalogAppState<R>>,
    Extension(current): Extension<CurrentAccount>,
    Path(id): Path<Uuid>,
    Json(req): Json<RateProductRequest>,
) -> CatalogResult<Json<MessageResponse>>
where
    R: ProductRepository + ReelRepository + Clone + Send + Sync + 'static,
{
    let product_id = ProductId::from_uuid(id);

    ProductRepository::find_by_id(state.repo.as_ref(), &product_id)
        .await?
        .ok_or(CatalogError::ProductNotFound)?;

    let rating = Rating::new(product_id, current.account_id, req.stars, req.comment)?;
    state.repo.rate(&rating).await?;

    Ok(Json(MessageResponse {
        message: "Rating saved".to_string(),
    }))
}

/// GET /api/catalog/products/{id}/ratings
pub async fn product_ratings<R>(
    State(state): State<CatalogAppState<R>>,
    Path(id): Path<Uuid>,
) -> CatalogResult<Json<Vec<RatingResponse>>>
where
    R: ProductRepository + ReelRepository + Clone + Send + Sync + 'static,
{
    let ratings = state.repo.list_ratings(&ProductId::from_uuid(id)).await?;

    Ok(Json(ratings.into_iter().map(Into::into).collect()))
}

/// DELETE /api/catalog/products/{id}/rating
pub async fn delete_rating<R>(
    State(state): State<CatalogAppState<R>>,
    Extension(current): Extension<CurrentAccount>,
    Path(id): Path<Uuid>,
) -> CatalogResult<StatusCode>
where
    R: ProductRepository + ReelRepository + Clone + Send + Sync + 'static,
{
    let deleted = state
        .repo
        .delete_rating(&ProductId::from_uuid(id), &current.account_id)
        .await?;

    if !deleted {
        return Err(CatalogError::RatingNotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Reels
// ============================================================================

/// GET /api/catalog/reels
pub async fn list_reels<R>(
    State(state): State<CatalogAppState<R>>,
    Query(params): Query<ListParams>,
) -> CatalogResult<Json<Vec<ReelResponse>>>
where
    R: ProductRepository + ReelRepository + Clone + Send + Sync + 'static,
{
    let reels = state.repo.list(params.limit(), params.offset()).await?;

    Ok(Json(reels.into_iter().map(Into::into).collect()))
}

/// GET /api/catalog/reels/{id}
///
/// Fetching a reel counts as a view.
pub async fn get_reel<R>(
    State(state): State<CatalogAppState<R>>,
    Path(id): Path<Uuid>,
) -> CatalogResult<Json<ReelResponse>>
where
    R: ProductRepository + ReelRepository + Clone + Send + Sync + 'static,
{
    let reel_id = ReelId::from_uuid(id);

    if !state.repo.increment_views(&reel_id).await? {
        return Err(CatalogError::ReelNotFound);
    }

    let reel = ReelRepository::find_by_id(state.repo.as_ref(), &reel_id)
        .await?
        .ok_or(CatalogError::ReelNotFound)?;

    Ok(Json(reel.into()))
}

/// GET /api/catalog/reels/mine
pub async fn my_reels<R>(
    State(state): State<CatalogAppState<R>>,
    Extension(current): Extension<CurrentAccount>,
) -> CatalogResult<Json<Vec<ReelResponse>>>
where
    R: ProductRepository + ReelRepository + Clone + Send + Sync + 'static,
{
    let reels = ReelRepository::list_by_seller(state.repo.as_ref(), &current.account_id).await?;

    Ok(Json(reels.into_iter().map(Into::into).collect()))
}

/// DELETE /api/catalog/reels/{id}
pub async fn delete_reel<R>(
    State(state): State<CatalogAppState<R>>,
    Extension(current): Extension<CurrentAccount>,
    Path(id): Path<Uuid>,
) -> CatalogResult<StatusCode>
where
    R: ProductRepository + ReelRepository + Clone + Send + Sync + 'static,
{
    let deleted = ReelRepository::delete_owned(
        state.repo.as_ref(),
        &ReelId::from_uuid(id),
        &current.account_id,
    )
    .await?;

    // Another seller's reel looks the same as a missing one
    if !deleted {
        return Err(CatalogError::ReelNotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/catalog/reels
pub async fn create_reel<R>(
    State(state): State<CatalogAppState<R>>,
    Extension(current): Extension<CurrentAccount>,
    Json(req): Json<CreateReelRequest>,
) -> CatalogResult<(StatusCode, Json<MessageResponse>)>
where
    R: ProductRepository + ReelRepository + Clone + Send + Sync + 'static,
{
    require_verified(&current)?;

    let reel = Reel::new(
        current.account_id,
        req.title,
        req.description,
        req.price,
        req.video_url,
        req.thumbnail_url,
        req.duration,
        req.phone_number,
    )?;

    ReelRepository::create(state.repo.as_ref(), &reel).await?;

    tracing::info!(reel_id = %reel.reel_id, "Reel created");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: reel.reel_id.to_string(),
        }),
    ))
}

/// POST /api/catalog/reels/{id}/like
pub async fn toggle_like<R>(
    State(state): State<CatalogAppState<R>>,
    Extension(current): Extension<CurrentAccount>,
    Path(id): Path<Uuid>,
) -> CatalogResult<Json<LikeResponse>>
where
    R: ProductRepository + ReelRepository + Clone + Send + Sync + 'static,
{
    let (liked, likes) = state
        .repo
        .toggle_like(&ReelId::from_uuid(id), &current.account_id)
        .await?
        .ok_or(CatalogError::ReelNotFound)?;

    Ok(Json(LikeResponse { liked, likes }))
}

/// POST /api/catalog/reels/{id}/share
pub async fn record_share<R>(
    State(state): State<CatalogAppState<R>>,
    Path(id): Path<Uuid>,
) -> CatalogResult<Json<MessageResponse>>
where
    R: ProductRepository + ReelRepository + Clone + Send + Sync + 'static,
{
    if !state.repo.increment_shares(&ReelId::from_uuid(id)).await? {
        return Err(CatalogError::ReelNotFound);
    }

    Ok(Json(MessageResponse {
        message: "Share recorded".to_string(),
    }))
}

/// GET /api/catalog/reels/{id}/comments
pub async fn list_comments<R>(
    State(state): State<CatalogAppState<R>>,
    Path(id): Path<Uuid>,
) -> CatalogResult<Json<Vec<CommentResponse>>>
where
    R: ProductRepository + ReelRepository + Clone + Send + Sync + 'static,
{
    let comments = state.repo.list_comments(&ReelId::from_uuid(id)).await?;

    Ok(Json(comments.into_iter().map(Into::into).collect()))
}

/// POST /api/catalog/reels/{id}/comments
pub async fn add_comment<R>(
    State(state): State<CatalogAppState<R>>,
    Extension(current): Extension<CurrentAccount>,
    Path(id): Path<Uuid>,
    Json(req): Json<CommentRequest>,
) -> CatalogResult<(StatusCode, Json<CommentResponse>)>
where
    R: ProductRepository + ReelRepository + Clone + Send + Sync + 'static,
{
    let comment = ReelComment::new(ReelId::from_uuid(id), current.account_id, req.text)?;
    state.repo.add_comment(&comment).await?;

    Ok((StatusCode::CREATED, Json(comment.into())))
}

/// DELETE /api/catalog/reels/{id}/comments/{comment_id}
pub async fn delete_comment<R>(
    State(state): State<CatalogAppState<R>>,
    Extension(current): Extension<CurrentAccount>,
    Path((_, comment_id)): Path<(Uuid, Uuid)>,
) -> CatalogResult<StatusCode>
where
    R: ProductRepository + ReelRepository + Clone + Send + Sync + 'static,
{
    let deleted = state
        .repo
        .delete_comment(&CommentId::from_uuid(comment_id), &current.account_id)
        .await?;

    // Someone else's comment looks the same as a missing one
    if !deleted {
        return Err(CatalogError::CommentNotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}
