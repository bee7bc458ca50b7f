//! Route definitions for the `/verification` resource.

use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;

use crate::handlers::verification;
use crate::state::AppState;

/// Headroom for multipart boundaries and the `quest_id` field.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Routes mounted at `/verification`.
///
/// ```text
/// POST /photo          -> submit_photo (multipart, body limit raised for photos)
/// POST /quiz/generate  -> generate_quiz
/// POST /quiz/submit    -> submit_quiz
/// ```
pub fn router(max_photo_bytes: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/photo",
            post(verification::submit_photo).layer(DefaultBodyLimit::max(
                max_photo_bytes.saturating_add(MULTIPART_OVERHEAD_BYTES),
            )),
        )
        .route("/quiz/generate", post(verification::generate_quiz))
        .route("/quiz/submit", post(verification::submit_quiz))
}
