// Routes module: 라우팅 설정
// 역할: 블로그 도메인의 라우터를 조합
// Routes module: combines blog domain routers

use axum::Router;
use crate::shared::services::AppState;

use crate::domains::blog::routes::{create_posts_router, create_session_router};

/// Create main router (combines all domain routers)
/// 메인 라우터 생성
pub fn create_router() -> Router<AppState> {
    Router::new()
        .nest("/api/session", create_session_router())
        .nest("/api/posts", create_posts_router())
}
