use thiserror::Error;
use axum::{http::StatusCode, Json};
use serde_json::json;
use crate::domains::blog::models::ActionKind;

/// 블로그 세션 관련 에러
/// Blog session errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlogError {
    /// 지갑이 연결되지 않음 (Provider 없음)
    /// No wallet/provider connected
    #[error("Wallet is not connected")]
    NotConnected,

    /// 게시글 ID 파싱 실패 (주소도 시퀀스 번호도 아님)
    /// Post id is neither an address nor a sequence number
    #[error("Invalid post id: {post_id:?}")]
    InvalidPostId { post_id: String },

    /// 이미 프로필이 등록된 지갑
    /// Profile already registered for this wallet
    #[error("User profile already registered")]
    AlreadyRegistered,

    /// 프로필 등록 전에는 게시글 작성 불가
    /// Action requires a registered profile
    #[error("User profile is not registered")]
    NotRegistered,

    /// 같은 종류의 액션이 이미 진행 중
    /// An action of the same kind is still in flight
    #[error("Action already in progress: {0}")]
    ActionInProgress(ActionKind),

    /// 액션 도중 지갑/Provider가 바뀌어 결과를 버림
    /// Wallet or provider changed while the action was in flight
    #[error("Session changed while the action was in flight")]
    SessionChanged,

    /// 계정을 찾을 수 없음
    /// Account not found on chain
    #[error("Account not found: {address}")]
    AccountNotFound { address: String },

    /// 계정 데이터 디코딩 실패
    /// Failed to decode account data
    #[error("Failed to decode account {address}: {reason}")]
    AccountDecode { address: String, reason: String },

    /// Solana RPC 에러
    /// Solana RPC error
    #[error("Solana RPC error: {0}")]
    Rpc(String),

    /// 트랜잭션 전송/확인 실패
    /// Transaction submission or confirmation failed
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// 원격 호출 타임아웃
    /// Remote call timed out
    #[error("Remote call timed out after {millis}ms: {operation}")]
    Timeout { operation: String, millis: u64 },

    /// 설정 에러
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// 내부 에러
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// BlogError를 HTTP 응답으로 변환
impl From<BlogError> for (StatusCode, Json<serde_json::Value>) {
    fn from(err: BlogError) -> Self {
        let status = match &err {
            BlogError::NotConnected => StatusCode::PRECONDITION_FAILED,
            BlogError::InvalidPostId { .. } => StatusCode::BAD_REQUEST,
            BlogError::AlreadyRegistered => StatusCode::CONFLICT,
            BlogError::NotRegistered => StatusCode::PRECONDITION_FAILED,
            BlogError::ActionInProgress(_) => StatusCode::CONFLICT,
            BlogError::SessionChanged => StatusCode::CONFLICT,
            BlogError::AccountNotFound { .. } => StatusCode::NOT_FOUND,
            BlogError::AccountDecode { .. } => StatusCode::BAD_GATEWAY,
            BlogError::Rpc(_) => StatusCode::BAD_GATEWAY,
            BlogError::TransactionFailed(_) => StatusCode::BAD_GATEWAY,
            BlogError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            BlogError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            BlogError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "error": err.to_string() })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let (status, body) = <(StatusCode, Json<serde_json::Value>)>::from(BlogError::AlreadyRegistered);
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body.0["error"], "User profile already registered");

        let (status, _) = <(StatusCode, Json<serde_json::Value>)>::from(
            BlogError::ActionInProgress(ActionKind::CreatePost),
        );
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = <(StatusCode, Json<serde_json::Value>)>::from(BlogError::Timeout {
            operation: "fetch_account".to_string(),
            millis: 5_000,
        });
        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    }
}
