use crate::domains::blog::models::{
    CreatePostRequest, CreatePostResponse, PostDetailResponse, PostView, PostsResponse,
};
use crate::domains::blog::services::{PostId, PostLoader};
use crate::shared::errors::BlogError;
use crate::shared::services::AppState;
use axum::{extract::{Path, State}, http::StatusCode, Json};

/// 게시글 목록 핸들러 (세션에 저장된 목록)
/// List stored posts handler
#[utoipa::path(
    get,
    path = "/api/posts",
    responses(
        (status = 200, description = "Posts from the last refresh", body = PostsResponse)
    ),
    tag = "Posts"
)]
pub async fn list_posts(State(app_state): State<AppState>) -> Json<PostsResponse> {
    let posts = app_state.blog_state.session.posts();
    Json(PostsResponse {
        posts: posts.iter().map(PostView::from).collect(),
    })
}

/// 게시글 새로고침 핸들러
/// Refresh posts handler (re-fetches the full collection)
#[utoipa::path(
    post,
    path = "/api/posts/refresh",
    responses(
        (status = 200, description = "Posts refreshed", body = PostsResponse),
        (status = 412, description = "Wallet not connected"),
        (status = 502, description = "Solana RPC error")
    ),
    tag = "Posts"
)]
pub async fn refresh_posts(
    State(app_state): State<AppState>,
) -> Result<Json<PostsResponse>, (StatusCode, Json<serde_json::Value>)> {
    let posts = app_state
        .blog_state
        .session
        .refresh_posts()
        .await
        .map_err(|e: BlogError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(PostsResponse {
        posts: posts.iter().map(PostView::from).collect(),
    }))
}

/// 게시글 작성 핸들러
/// Create post handler
#[utoipa::path(
    post,
    path = "/api/posts",
    request_body = CreatePostRequest,
    responses(
        (status = 200, description = "Post created", body = CreatePostResponse),
        (status = 409, description = "Another post is being created"),
        (status = 412, description = "Wallet not connected or profile not registered"),
        (status = 502, description = "Transaction failed")
    ),
    tag = "Posts"
)]
pub async fn create_post(
    State(app_state): State<AppState>,
    Json(request): Json<CreatePostRequest>,
) -> Result<Json<CreatePostResponse>, (StatusCode, Json<serde_json::Value>)> {
    let outcome = app_state
        .blog_state
        .session
        .create_post(&request.title, &request.content)
        .await
        .map_err(|e: BlogError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(CreatePostResponse {
        signature: outcome.signature.to_string(),
        post: PostView::from(&outcome.post),
    }))
}

/// 게시글 상세 핸들러
/// Post detail handler
/// Note: id는 게시글 계정 주소 또는 연결된 지갑의 게시글 시퀀스 번호
#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    params(
        ("id" = String, Path, description = "Post account address or sequence number")
    ),
    responses(
        (status = 200, description = "Post load finished (ready, not_found or failed)", body = PostDetailResponse),
        (status = 400, description = "Invalid post id"),
        (status = 412, description = "Wallet not connected")
    ),
    tag = "Posts"
)]
pub async fn get_post(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PostDetailResponse>, (StatusCode, Json<serde_json::Value>)> {
    let post_id: PostId = id
        .parse()
        .map_err(|e: BlogError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    let provider = app_state
        .blog_state
        .session
        .provider()
        .ok_or_else(|| -> (StatusCode, Json<serde_json::Value>) { BlogError::NotConnected.into() })?;

    let loader = PostLoader::new(post_id);
    let state = loader.bind_provider(Some(provider)).await;
    let address = loader.address().map(|a| a.to_string());

    Ok(Json(PostDetailResponse::from_state(address, &state)))
}
