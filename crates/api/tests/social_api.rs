//! HTTP-level integration tests for profile, avatar, leaderboard, shop, and friends.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_quest, get, get_auth, post_auth, post_json_auth, put_json_auth, register,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Profile & avatar
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn avatar_update_is_reflected_in_profile(pool: PgPool) {
    let (_, token) = register(&pool, "stylish").await;

    let body = serde_json::json!({
        "avatar_class": "mage",
        "avatar_image": "https://cdn.example.com/mage.png",
        "name": "Merlin",
    });
    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(app, "/api/user/avatar", body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let profile = body_json(get_auth(app, "/api/user/profile", &token).await).await;
    assert_eq!(profile["username"], "stylish");
    assert_eq!(profile["avatar"]["avatar_class"], "mage");
    assert_eq!(profile["avatar"]["name"], "Merlin");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn avatar_with_blank_name_is_rejected(pool: PgPool) {
    let (_, token) = register(&pool, "nameless").await;

    let body = serde_json::json!({
        "avatar_class": "rogue",
        "avatar_image": "rogue.png",
        "name": "",
    });
    let app = common::build_test_app(pool);
    let response = put_json_auth(app, "/api/user/avatar", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Leaderboard & shop
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn leaderboard_orders_by_xp_and_is_public(pool: PgPool) {
    let (_, low) = register(&pool, "low").await;
    let (_, high) = register(&pool, "high").await;

    for (token, xp) in [(&low, 20), (&high, 90)] {
        let quest_id = create_quest(&pool, token, xp, 0).await;
        let app = common::build_test_app(pool.clone());
        post_auth(app, &format!("/api/quests/{quest_id}/complete"), token).await;
    }

    let app = common::build_test_app(pool);
    let response = get(app, "/api/leaderboard").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let entries = json.as_array().unwrap();
    assert_eq!(entries[0]["username"], "high");
    assert_eq!(entries[0]["xp"], 90);
    assert_eq!(entries[1]["username"], "low");
    assert!(entries[0].get("email").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn shop_lists_catalogue(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/shop/items").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 4);
    assert_eq!(items[0]["id"], "health-potion");
    assert_eq!(items[0]["cost"], 50);
}

// ---------------------------------------------------------------------------
// Friends
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn add_friend_then_list(pool: PgPool) {
    let (_, alice) = register(&pool, "alice").await;
    register(&pool, "bob").await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "friend_username": "bob" });
    let response = post_json_auth(app, "/api/friends/add", body, &alice).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool);
    let json = body_json(get_auth(app, "/api/friends", &alice).await).await;
    let friends = json.as_array().unwrap();
    assert_eq!(friends.len(), 1);
    assert_eq!(friends[0]["username"], "bob");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn friendships_are_one_directional(pool: PgPool) {
    let (_, alice) = register(&pool, "alice").await;
    let (_, bob) = register(&pool, "bob").await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "friend_username": "bob" });
    post_json_auth(app, "/api/friends/add", body, &alice).await;

    let app = common::build_test_app(pool);
    let json = body_json(get_auth(app, "/api/friends", &bob).await).await;
    assert!(json.as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn add_friend_error_cases(pool: PgPool) {
    let (_, alice) = register(&pool, "alice").await;
    register(&pool, "bob").await;

    let cases = [
        ("nobody", StatusCode::NOT_FOUND),
        ("alice", StatusCode::BAD_REQUEST),
        ("bob", StatusCode::CREATED),
        ("bob", StatusCode::CONFLICT),
    ];
    for (username, expected) in cases {
        let app = common::build_test_app(pool.clone());
        let body = serde_json::json!({ "friend_username": username });
        let response = post_json_auth(app, "/api/friends/add", body, &alice).await;
        assert_eq!(response.status(), expected, "adding '{username}'");
    }
}
