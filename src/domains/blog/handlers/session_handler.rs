use crate::domains::blog::models::{ModalRequest, RegisterResponse, SessionResponse, UserProfileView};
use crate::shared::errors::BlogError;
use crate::shared::services::AppState;
use axum::{extract::State, http::StatusCode, Json};

fn session_response(app_state: &AppState) -> SessionResponse {
    SessionResponse::from(&app_state.blog_state.session.snapshot())
}

/// 세션 상태 조회 핸들러
/// Get session state handler
#[utoipa::path(
    get,
    path = "/api/session",
    responses(
        (status = 200, description = "Current session state", body = SessionResponse)
    ),
    tag = "Session"
)]
pub async fn get_session(State(app_state): State<AppState>) -> Json<SessionResponse> {
    Json(session_response(&app_state))
}

/// 지갑 연결 핸들러
/// Connect wallet handler
/// Note: 설정된 지갑으로 새 Provider를 만들고 프로필 조회를 다시 실행
#[utoipa::path(
    post,
    path = "/api/session/connect",
    responses(
        (status = 200, description = "Wallet connected, profile lookup finished", body = SessionResponse),
        (status = 409, description = "Session changed during lookup"),
        (status = 502, description = "Solana RPC error (session left Unregistered)"),
        (status = 504, description = "RPC timeout")
    ),
    tag = "Session"
)]
pub async fn connect(
    State(app_state): State<AppState>,
) -> Result<Json<SessionResponse>, (StatusCode, Json<serde_json::Value>)> {
    let provider = app_state.blog_state.new_provider();

    app_state
        .blog_state
        .session
        .connect(provider)
        .await
        .map_err(|e: BlogError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(session_response(&app_state)))
}

/// 지갑 연결 해제 핸들러
/// Disconnect wallet handler
#[utoipa::path(
    post,
    path = "/api/session/disconnect",
    responses(
        (status = 200, description = "Wallet disconnected", body = SessionResponse)
    ),
    tag = "Session"
)]
pub async fn disconnect(State(app_state): State<AppState>) -> Json<SessionResponse> {
    app_state.blog_state.session.disconnect();
    Json(session_response(&app_state))
}

/// 프로필 등록 핸들러
/// Register user profile handler
#[utoipa::path(
    post,
    path = "/api/session/register",
    responses(
        (status = 200, description = "Profile registered", body = RegisterResponse),
        (status = 409, description = "Already registered or registration in progress"),
        (status = 412, description = "Wallet not connected"),
        (status = 502, description = "Transaction failed")
    ),
    tag = "Session"
)]
pub async fn register(
    State(app_state): State<AppState>,
) -> Result<Json<RegisterResponse>, (StatusCode, Json<serde_json::Value>)> {
    let outcome = app_state
        .blog_state
        .session
        .register_user()
        .await
        .map_err(|e: BlogError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(RegisterResponse {
        signature: outcome.signature.to_string(),
        user: UserProfileView::from(&outcome.user),
    }))
}

/// 작성 모달 표시 설정 핸들러
/// Set post-creation modal visibility
#[utoipa::path(
    put,
    path = "/api/session/modal",
    request_body = ModalRequest,
    responses(
        (status = 200, description = "Modal visibility updated", body = SessionResponse)
    ),
    tag = "Session"
)]
pub async fn set_modal(
    State(app_state): State<AppState>,
    Json(request): Json<ModalRequest>,
) -> Json<SessionResponse> {
    app_state.blog_state.session.set_show_modal(request.show);
    Json(session_response(&app_state))
}
