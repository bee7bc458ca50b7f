//! Route definitions for the shop.

use axum::routing::get;
use axum::Router;

use crate::handlers::shop;
use crate::state::AppState;

/// Routes mounted at `/shop`.
///
/// ```text
/// GET /items -> list_items (public)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/items", get(shop::list_items))
}
