use std::fmt;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use utoipa::ToSchema;
use super::accounts::{PostAccount, UserAccount};

/// 세션 상태 머신
/// Session state machine
///
/// Disconnected → Connecting → Unregistered | Active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// 지갑 미연결
    Disconnected,
    /// 지갑 연결됨, 프로필 조회 중
    Connecting,
    /// 프로필 없음 (또는 조회 실패) → 등록 필요
    Unregistered,
    /// 프로필 존재, 게시글 로드됨
    Active,
}

/// 진행 중인 액션 종류 (조회 전용 refresh는 포함하지 않음)
/// Kind of in-flight session action; read-only refreshes are not tracked here
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Initialize,
    Register,
    CreatePost,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActionKind::Initialize => "initialize",
            ActionKind::Register => "register",
            ActionKind::CreatePost => "create_post",
        };
        f.write_str(name)
    }
}

/// 비동기 로드 결과 (loading | failed | ready)
/// Explicit load state instead of a bare loading flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState<T> {
    /// Provider 대기 중 (아직 시작 안 함)
    Idle,
    Loading,
    Failed(String),
    Ready(T),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// 게시글 + 계정 주소
/// A post together with the address it was fetched from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRecord {
    pub address: Pubkey,
    pub account: PostAccount,
}

/// 세션 스냅샷 (뷰 계층에 노출되는 값)
/// Point-in-time copy of everything the view layer may read
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub status: SessionStatus,
    pub wallet: Option<Pubkey>,
    pub user: Option<UserAccount>,
    pub posts: Vec<PostRecord>,
    pub show_modal: bool,
    pub pending_actions: Vec<ActionKind>,
    pub last_error: Option<String>,
    pub refreshed_at: Option<DateTime<Utc>>,
}

impl SessionSnapshot {
    /// 프로필 등록 여부 (뷰의 initialized 플래그)
    pub fn initialized(&self) -> bool {
        self.status == SessionStatus::Active
    }

    /// 트랜잭션 진행 중 여부
    pub fn transaction_pending(&self) -> bool {
        !self.pending_actions.is_empty()
    }
}
