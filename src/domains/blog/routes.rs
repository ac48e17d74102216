// Blog domain routes
// 블로그 도메인 라우터
use axum::{routing::{get, post, put}, Router};
use crate::domains::blog::handlers::{post_handler, session_handler};
use crate::shared::services::AppState;

/// Create session router
/// 세션 라우터 생성
pub fn create_session_router() -> Router<AppState> {
    Router::new()
        .route("/", get(session_handler::get_session))
        .route("/connect", post(session_handler::connect))
        .route("/disconnect", post(session_handler::disconnect))
        .route("/register", post(session_handler::register))
        .route("/modal", put(session_handler::set_modal))
}

/// Create posts router
/// 게시글 라우터 생성
pub fn create_posts_router() -> Router<AppState> {
    Router::new()
        .route("/", get(post_handler::list_posts).post(post_handler::create_post))
        .route("/refresh", post(post_handler::refresh_posts))
        .route("/:id", get(post_handler::get_post))
}
