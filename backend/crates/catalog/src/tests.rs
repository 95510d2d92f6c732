//! Catalog crate scenario tests
//!
//! Exercise the repository contracts over an in-memory double and check the
//! ownership and aggregation rules the handlers rely on.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use accounts::domain::value_object::account_id::AccountId;
use uuid::Uuid;

use crate::domain::entity::{
    CommentId, Condition, Product, ProductChanges, ProductId, ProductView, Rating, Reel,
    ReelComment, ReelId,
};
use crate::domain::repository::{ProductRepository, ReelRepository};
use crate::error::{CatalogError, CatalogResult};

// ============================================================================
// In-memory double
// ============================================================================

#[derive(Default)]
struct CatalogState {
    products: HashMap<Uuid, Product>,
    ratings: HashMap<(Uuid, Uuid), Rating>,
    reels: HashMap<Uuid, Reel>,
    likes: HashSet<(Uuid, Uuid)>,
    comments: Vec<ReelComment>,
    // A like row another writer commits between the exists check and the
    // insert inside toggle_like
    interleaved_like: Option<(Uuid, Uuid)>,
}

impl CatalogState {
    fn record_like(&mut self, key: (Uuid, Uuid)) -> bool {
        let newly = self.likes.insert(key);
        if newly {
            if let Some(reel) = self.reels.get_mut(&key.0) {
                reel.likes += 1;
            }
        }
        newly
    }
}

#[derive(Clone, Default)]
struct InMemoryCatalog {
    inner: Arc<Mutex<CatalogState>>,
}

impl InMemoryCatalog {
    /// Schedule a like that lands mid-toggle, as a concurrent request would
    fn interleave_like(&self, reel_id: &ReelId, account_id: &AccountId) {
        self.inner.lock().unwrap().interleaved_like =
            Some((reel_id.into_uuid(), account_id.into_uuid()));
    }

    fn view(&self, state: &CatalogState, product: &Product) -> ProductView {
        let stars: Vec<i16> = state
            .ratings
            .values()
            .filter(|r| r.product_id == product.product_id)
            .map(|r| r.stars)
            .collect();
        let total = stars.len() as i64;
        let average = if total == 0 {
            0.0
        } else {
            stars.iter().map(|&s| s as f64).sum::<f64>() / total as f64
        };
        ProductView {
            product: product.clone(),
            average_rating: average,
            total_ratings: total,
        }
    }
}

impl ProductRepository for InMemoryCatalog {
    async fn create(&self, product: &Product) -> CatalogResult<()> {
        self.inner
            .lock()
            .unwrap()
            .products
            .insert(product.product_id.into_uuid(), product.clone());
        Ok(())
    }

    async fn find_by_id(&self, product_id: &ProductId) -> CatalogResult<Option<ProductView>> {
        let state = self.inner.lock().unwrap();
        Ok(state
            .products
            .get(product_id.as_uuid())
            .filter(|p| p.is_active)
            .map(|p| self.view(&state, p)))
    }

    async fn list_active(&self, limit: i64, offset: i64) -> CatalogResult<Vec<ProductView>> {
        let state = self.inner.lock().unwrap();
        let mut products: Vec<&Product> =
            state.products.values().filter(|p| p.is_active).collect();
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(products
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .map(|p| self.view(&state, p))
            .collect())
    }

    async fn list_by_seller(&self, seller_id: &AccountId) -> CatalogResult<Vec<ProductView>> {
        let state = self.inner.lock().unwrap();
        Ok(state
            .products
            .values()
            .filter(|p| &p.seller_id == seller_id)
            .map(|p| self.view(&state, p))
            .collect())
    }

    async fn list_active_by_seller(
        &self,
        seller_id: &AccountId,
    ) -> CatalogResult<Vec<ProductView>> {
        let state = self.inner.lock().unwrap();
        Ok(state
            .products
            .values()
            .filter(|p| &p.seller_id == seller_id && p.is_active)
            .map(|p| self.view(&state, p))
            .collect())
    }

    async fn update_owned(
        &self,
        product_id: &ProductId,
        seller_id: &AccountId,
        changes: &ProductChanges,
    ) -> CatalogResult<bool> {
        let mut state = self.inner.lock().unwrap();
        match state
            .products
            .get_mut(product_id.as_uuid())
            .filter(|p| &p.seller_id == seller_id)
        {
            Some(product) => {
                product.apply(changes.clone());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_owned(
        &self,
        product_id: &ProductId,
        seller_id: &AccountId,
    ) -> CatalogResult<bool> {
        let mut state = self.inner.lock().unwrap();
        let owned = state
            .products
            .get(product_id.as_uuid())
            .is_some_and(|p| &p.seller_id == seller_id);
        if owned {
            state.products.remove(product_id.as_uuid());
        }
        Ok(owned)
    }

    async fn rate(&self, rating: &Rating) -> CatalogResult<()> {
        self.inner.lock().unwrap().ratings.insert(
            (
                rating.product_id.into_uuid(),
                rating.buyer_id.into_uuid(),
            ),
            rating.clone(),
        );
        Ok(())
    }

    async fn list_ratings(&self, product_id: &ProductId) -> CatalogResult<Vec<Rating>> {
        let state = self.inner.lock().unwrap();
        let mut ratings: Vec<Rating> = state
            .ratings
            .values()
            .filter(|r| &r.product_id == product_id)
            .cloned()
            .collect();
        ratings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(ratings)
    }

    async fn delete_rating(
        &self,
        product_id: &ProductId,
        buyer_id: &AccountId,
    ) -> CatalogResult<bool> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .ratings
            .remove(&(product_id.into_uuid(), buyer_id.into_uuid()))
            .is_some())
    }
}

impl ReelRepository for InMemoryCatalog {
    async fn create(&self, reel: &Reel) -> CatalogResult<()> {
        self.inner
            .lock()
            .unwrap()
            .reels
            .insert(reel.reel_id.into_uuid(), reel.clone());
        Ok(())
    }

    async fn find_by_id(&self, reel_id: &ReelId) -> CatalogResult<Option<Reel>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .reels
            .get(reel_id.as_uuid())
            .cloned())
    }

    async fn list(&self, limit: i64, offset: i64) -> CatalogResult<Vec<Reel>> {
        let state = self.inner.lock().unwrap();
        let mut reels: Vec<Reel> = state.reels.values().cloned().collect();
        reels.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reels
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn list_by_seller(&self, seller_id: &AccountId) -> CatalogResult<Vec<Reel>> {
        let state = self.inner.lock().unwrap();
        let mut reels: Vec<Reel> = state
            .reels
            .values()
            .filter(|r| &r.seller_id == seller_id)
            .cloned()
            .collect();
        reels.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reels)
    }

    async fn delete_owned(&self, reel_id: &ReelId, seller_id: &AccountId) -> CatalogResult<bool> {
        let mut state = self.inner.lock().unwrap();
        let owned = state
            .reels
            .get(reel_id.as_uuid())
            .is_some_and(|r| &r.seller_id == seller_id);
        if owned {
            state.reels.remove(reel_id.as_uuid());
            state.likes.retain(|(r, _)| r != reel_id.as_uuid());
            state.comments.retain(|c| &c.reel_id != reel_id);
        }
        Ok(owned)
    }

    async fn increment_views(&self, reel_id: &ReelId) -> CatalogResult<bool> {
        let mut state = self.inner.lock().unwrap();
        match state.reels.get_mut(reel_id.as_uuid()) {
            Some(reel) => {
                reel.views += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn increment_shares(&self, reel_id: &ReelId) -> CatalogResult<bool> {
        let mut state = self.inner.lock().unwrap();
        match state.reels.get_mut(reel_id.as_uuid()) {
            Some(reel) => {
                reel.shares += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn toggle_like(
        &self,
        reel_id: &ReelId,
        account_id: &AccountId,
    ) -> CatalogResult<Option<(bool, i64)>> {
        let mut state = self.inner.lock().unwrap();
        if !state.reels.contains_key(reel_id.as_uuid()) {
            return Ok(None);
        }
        let key = (reel_id.into_uuid(), account_id.into_uuid());
        if state.likes.remove(&key) {
            let reel = state.reels.get_mut(reel_id.as_uuid()).unwrap();
            reel.likes -= 1;
            return Ok(Some((false, reel.likes)));
        }
        if let Some(other) = state.interleaved_like.take() {
            state.record_like(other);
        }
        // Insert-if-absent: a row that is already there settles as liked
        // without another counter bump
        state.record_like(key);
        let likes = state.reels.get(reel_id.as_uuid()).unwrap().likes;
        Ok(Some((true, likes)))
    }

    async fn add_comment(&self, comment: &ReelComment) -> CatalogResult<()> {
        let mut state = self.inner.lock().unwrap();
        match state.reels.get_mut(comment.reel_id.as_uuid()) {
            Some(reel) => {
                reel.comments += 1;
                state.comments.push(comment.clone());
                Ok(())
            }
            None => Err(CatalogError::ReelNotFound),
        }
    }

    async fn list_comments(&self, reel_id: &ReelId) -> CatalogResult<Vec<ReelComment>> {
        let state = self.inner.lock().unwrap();
        let mut comments: Vec<ReelComment> = state
            .comments
            .iter()
            .filter(|c| &c.reel_id == reel_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(comments)
    }

    async fn delete_comment(
        &self,
        comment_id: &CommentId,
        author_id: &AccountId,
    ) -> CatalogResult<bool> {
        let mut state = self.inner.lock().unwrap();
        let Some(pos) = state
            .comments
            .iter()
            .position(|c| &c.comment_id == comment_id && &c.author_id == author_id)
        else {
            return Ok(false);
        };
        let comment = state.comments.remove(pos);
        if let Some(reel) = state.reels.get_mut(comment.reel_id.as_uuid()) {
            reel.comments = (reel.comments - 1).max(0);
        }
        Ok(true)
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn product(seller: AccountId, name: &str) -> Product {
    Product::new(
        seller,
        name.to_string(),
        "description".to_string(),
        1500,
        "North".to_string(),
        Condition::Good,
        "+1234567890".to_string(),
        None,
    )
    .unwrap()
}

fn reel(seller: AccountId, title: &str) -> Reel {
    Reel::new(
        seller,
        title.to_string(),
        "description".to_string(),
        1500,
        "https://cdn.example/v.mp4".to_string(),
        None,
        30,
        "+1234567890".to_string(),
    )
    .unwrap()
}

// ============================================================================
// Products
// ============================================================================

#[tokio::test]
async fn delete_requires_ownership() {
    let repo = InMemoryCatalog::default();
    let owner = AccountId::new();
    let stranger = AccountId::new();

    let p = product(owner, "Lamp");
    ProductRepository::create(&repo, &p).await.unwrap();

    // A stranger's delete behaves like the product does not exist
    assert!(
        !ProductRepository::delete_owned(&repo, &p.product_id, &stranger)
            .await
            .unwrap()
    );
    assert!(ProductRepository::find_by_id(&repo, &p.product_id)
        .await
        .unwrap()
        .is_some());

    assert!(
        ProductRepository::delete_owned(&repo, &p.product_id, &owner)
            .await
            .unwrap()
    );
    assert!(ProductRepository::find_by_id(&repo, &p.product_id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn rating_upserts_per_buyer() {
    let repo = InMemoryCatalog::default();
    let seller = AccountId::new();
    let buyer_a = AccountId::new();
    let buyer_b = AccountId::new();

    let p = product(seller, "Lamp");
    ProductRepository::create(&repo, &p).await.unwrap();

    repo.rate(&Rating::new(p.product_id, buyer_a, 5, None).unwrap())
        .await
        .unwrap();
    repo.rate(&Rating::new(p.product_id, buyer_b, 3, None).unwrap())
        .await
        .unwrap();

    let view = ProductRepository::find_by_id(&repo, &p.product_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(view.total_ratings, 2);
    assert!((view.average_rating - 4.0).abs() < f64::EPSILON);

    // Re-rating replaces, not duplicates
    repo.rate(&Rating::new(p.product_id, buyer_a, 1, None).unwrap())
        .await
        .unwrap();

    let view = ProductRepository::find_by_id(&repo, &p.product_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(view.total_ratings, 2);
    assert!((view.average_rating - 2.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn my_products_only_lists_own() {
    let repo = InMemoryCatalog::default();
    let seller_a = AccountId::new();
    let seller_b = AccountId::new();

    ProductRepository::create(&repo, &product(seller_a, "Lamp"))
        .await
        .unwrap();
    ProductRepository::create(&repo, &product(seller_b, "Chair"))
        .await
        .unwrap();

    let mine = ProductRepository::list_by_seller(&repo, &seller_a)
        .await
        .unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].product.name, "Lamp");
}

#[tokio::test]
async fn update_requires_ownership() {
    let repo = InMemoryCatalog::default();
    let owner = AccountId::new();
    let stranger = AccountId::new();

    let p = product(owner, "Lamp");
    ProductRepository::create(&repo, &p).await.unwrap();

    let changes = ProductChanges::new(
        "Lamp, restored".to_string(),
        "rewired".to_string(),
        2500,
        "South".to_string(),
        Condition::LikeNew,
        "+1234567890".to_string(),
        None,
    )
    .unwrap();

    // A stranger's edit behaves like the product does not exist
    assert!(
        !repo
            .update_owned(&p.product_id, &stranger, &changes)
            .await
            .unwrap()
    );

    assert!(
        repo.update_owned(&p.product_id, &owner, &changes)
            .await
            .unwrap()
    );

    let stored = ProductRepository::find_by_id(&repo, &p.product_id)
        .await
        .unwrap()
        .unwrap()
        .product;
    assert_eq!(stored.name, "Lamp, restored");
    assert_eq!(stored.price, 2500);
    assert!(stored.updated_at >= p.updated_at);
    // Ownership and creation time are untouched
    assert_eq!(stored.seller_id, owner);
    assert_eq!(stored.created_at, p.created_at);
}

#[tokio::test]
async fn seller_page_lists_only_active_products() {
    let repo = InMemoryCatalog::default();
    let seller = AccountId::new();

    let active = product(seller, "Lamp");
    let mut retired = product(seller, "Chair");
    retired.is_active = false;
    ProductRepository::create(&repo, &active).await.unwrap();
    ProductRepository::create(&repo, &retired).await.unwrap();

    // The public seller page hides retired listings
    let page = repo.list_active_by_seller(&seller).await.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].product.name, "Lamp");

    // The seller's own view keeps them
    let own = ProductRepository::list_by_seller(&repo, &seller)
        .await
        .unwrap();
    assert_eq!(own.len(), 2);
}

#[tokio::test]
async fn ratings_list_and_author_scoped_delete() {
    let repo = InMemoryCatalog::default();
    let seller = AccountId::new();
    let buyer = AccountId::new();
    let stranger = AccountId::new();

    let p = product(seller, "Lamp");
    ProductRepository::create(&repo, &p).await.unwrap();
    repo.rate(&Rating::new(p.product_id, buyer, 5, Some("great".to_string())).unwrap())
        .await
        .unwrap();

    let ratings = repo.list_ratings(&p.product_id).await.unwrap();
    assert_eq!(ratings.len(), 1);
    assert_eq!(ratings[0].stars, 5);

    // Only the author can remove their rating
    assert!(!repo.delete_rating(&p.product_id, &stranger).await.unwrap());
    assert!(repo.delete_rating(&p.product_id, &buyer).await.unwrap());
    assert!(repo.list_ratings(&p.product_id).await.unwrap().is_empty());

    // And the aggregate reflects the removal
    let view = ProductRepository::find_by_id(&repo, &p.product_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(view.total_ratings, 0);
}

// ============================================================================
// Reels
// ============================================================================

#[tokio::test]
async fn like_toggles_and_tracks_count() {
    let repo = InMemoryCatalog::default();
    let seller = AccountId::new();
    let fan = AccountId::new();

    let r = reel(seller, "Tour");
    ReelRepository::create(&repo, &r).await.unwrap();

    let (liked, likes) = repo.toggle_like(&r.reel_id, &fan).await.unwrap().unwrap();
    assert!(liked);
    assert_eq!(likes, 1);

    let (liked, likes) = repo.toggle_like(&r.reel_id, &fan).await.unwrap().unwrap();
    assert!(!liked);
    assert_eq!(likes, 0);

    // Unknown reel
    assert!(repo
        .toggle_like(&ReelId::new(), &fan)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn comments_bump_counter_and_list_in_order() {
    let repo = InMemoryCatalog::default();
    let seller = AccountId::new();
    let fan = AccountId::new();

    let r = reel(seller, "Tour");
    ReelRepository::create(&repo, &r).await.unwrap();

    repo.add_comment(&ReelComment::new(r.reel_id, fan, "first".to_string()).unwrap())
        .await
        .unwrap();
    repo.add_comment(&ReelComment::new(r.reel_id, fan, "second".to_string()).unwrap())
        .await
        .unwrap();

    let stored = ReelRepository::find_by_id(&repo, &r.reel_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.comments, 2);

    let comments = repo.list_comments(&r.reel_id).await.unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].text, "first");

    // Commenting on a missing reel fails
    let err = repo
        .add_comment(&ReelComment::new(ReelId::new(), fan, "hi".to_string()).unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::ReelNotFound));
}

#[tokio::test]
async fn racing_first_likes_settle_on_one_like() {
    let repo = InMemoryCatalog::default();
    let seller = AccountId::new();
    let fan = AccountId::new();

    let r = reel(seller, "Tour");
    ReelRepository::create(&repo, &r).await.unwrap();

    // Another request's first-like commits while this toggle is in flight
    repo.interleave_like(&r.reel_id, &fan);
    let (liked, likes) = repo.toggle_like(&r.reel_id, &fan).await.unwrap().unwrap();

    // The slower request still reports liked, and the count stays at one
    assert!(liked);
    assert_eq!(likes, 1);

    // The next toggle is a plain unlike
    let (liked, likes) = repo.toggle_like(&r.reel_id, &fan).await.unwrap().unwrap();
    assert!(!liked);
    assert_eq!(likes, 0);
}

#[tokio::test]
async fn reel_delete_requires_ownership() {
    let repo = InMemoryCatalog::default();
    let owner = AccountId::new();
    let stranger = AccountId::new();

    let r = reel(owner, "Tour");
    ReelRepository::create(&repo, &r).await.unwrap();

    assert!(
        !ReelRepository::delete_owned(&repo, &r.reel_id, &stranger)
            .await
            .unwrap()
    );
    assert!(
        ReelRepository::delete_owned(&repo, &r.reel_id, &owner)
            .await
            .unwrap()
    );
    assert!(ReelRepository::find_by_id(&repo, &r.reel_id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn my_reels_only_lists_own() {
    let repo = InMemoryCatalog::default();
    let seller_a = AccountId::new();
    let seller_b = AccountId::new();

    ReelRepository::create(&repo, &reel(seller_a, "Tour"))
        .await
        .unwrap();
    ReelRepository::create(&repo, &reel(seller_b, "Haul"))
        .await
        .unwrap();

    let mine = ReelRepository::list_by_seller(&repo, &seller_a)
        .await
        .unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].title, "Tour");
}

#[tokio::test]
async fn comment_delete_scoped_to_author_and_drops_counter() {
    let repo = InMemoryCatalog::default();
    let seller = AccountId::new();
    let fan = AccountId::new();
    let stranger = AccountId::new();

    let r = reel(seller, "Tour");
    ReelRepository::create(&repo, &r).await.unwrap();

    let comment = ReelComment::new(r.reel_id, fan, "nice".to_string()).unwrap();
    repo.add_comment(&comment).await.unwrap();

    // Someone else's delete behaves like the comment does not exist
    assert!(
        !repo
            .delete_comment(&comment.comment_id, &stranger)
            .await
            .unwrap()
    );
    assert!(
        repo.delete_comment(&comment.comment_id, &fan)
            .await
            .unwrap()
    );

    let stored = ReelRepository::find_by_id(&repo, &r.reel_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.comments, 0);
    assert!(repo.list_comments(&r.reel_id).await.unwrap().is_empty());

    // A second delete of the same comment finds nothing
    assert!(
        !repo
            .delete_comment(&comment.comment_id, &fan)
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn views_and_shares_count_up() {
    let repo = InMemoryCatalog::default();
    let seller = AccountId::new();

    let r = reel(seller, "Tour");
    ReelRepository::create(&repo, &r).await.unwrap();

    assert!(repo.increment_views(&r.reel_id).await.unwrap());
    assert!(repo.increment_views(&r.reel_id).await.unwrap());
    assert!(repo.increment_shares(&r.reel_id).await.unwrap());

    let stored = ReelRepository::find_by_id(&repo, &r.reel_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.views, 2);
    assert_eq!(stored.shares, 1);

    assert!(!repo.increment_views(&ReelId::new()).await.unwrap());
}
