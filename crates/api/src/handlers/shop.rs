//! Handler for the shop catalogue.

use axum::Json;
use questlog_core::shop::{ShopItem, CATALOGUE};

/// GET /api/shop/items
pub async fn list_items() -> Json<&'static [ShopItem]> {
    Json(CATALOGUE)
}
