//! Catalog Router

use accounts::presentation::middleware::{AuthMiddlewareState, require_auth};
use axum::{
    Router, middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use platform::token::TokenIssuer;
use std::sync::Arc;

use crate::domain::repository::{ProductRepository, ReelRepository};
use crate::infra::postgres::PgCatalogRepository;
use crate::presentation::handlers::{self, CatalogAppState};

/// Create the catalog router with the PostgreSQL repository
pub fn catalog_router(repo: PgCatalogRepository, issuer: Arc<TokenIssuer>) -> Router {
    catalog_router_generic(repo, issuer)
}

/// Create a generic catalog router for any repository implementation
pub fn catalog_router_generic<R>(repo: R, issuer: Arc<TokenIssuer>) -> Router
where
    R: ProductRepository + ReelRepository + Clone + Send + Sync + 'static,
{
    let state = CatalogAppState {
        repo: Arc::new(repo),
    };

    let auth_state = AuthMiddlewareState { issuer };

    let protected = Router::new()
        .route("/products", post(handlers::create_product::<R>))
        .route("/products/mine", get(handlers::my_products::<R>))
        .route(
            "/products/{id}",
            put(handlers::update_product::<R>).delete(handlers::delete_product::<R>),
        )
        .route(
            "/products/{id}/rating",
            post(handlers::rate_product::<R>).delete(handlers::delete_rating::<R>),
        )
        .route("/reels", post(handlers::create_reel::<R>))
        .route("/reels/mine", get(handlers::my_reels::<R>))
        .route("/reels/{id}", delete(handlers::delete_reel::<R>))
        .route("/reels/{id}/like", post(handlers::toggle_like::<R>))
        .route("/reels/{id}/comments", post(handlers::add_comment::<R>))
        .route(
            "/reels/{id}/comments/{comment_id}",
            delete(handlers::delete_comment::<R>),
        )
        .layer(axum_middleware::from_fn(move |req, next| {
            require_auth(auth_state.clone(), req, next)
        }));

    let public = Router::new()
        .route("/products", get(handlers::list_products::<R>))
        .route("/products/{id}", get(handlers::get_product::<R>))
        .route(
            "/products/seller/{seller_id}",
            get(handlers::seller_products::<R>),
        )
        .route("/products/{id}/ratings", get(handlers::product_ratings::<R>))
        .route("/reels", get(handlers::list_reels::<R>))
        .route("/reels/{id}", get(handlers::get_reel::<R>))
        .route("/reels/{id}/share", post(handlers::record_share::<R>))
        .route("/reels/{id}/comments", get(handlers::list_comments::<R>));

    public.merge(protected).with_state(state)
}
