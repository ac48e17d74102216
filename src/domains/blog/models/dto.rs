use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use super::accounts::{PostAccount, UserAccount};
use super::session::{ActionKind, LoadState, PostRecord, SessionSnapshot, SessionStatus};

/// 사용자 프로필 응답
/// User profile view
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserProfileView {
    #[schema(example = "calm-otter")]
    pub name: String,
    #[schema(example = "https://api.dicebear.com/7.x/identicon/svg?seed=7xKXtg2CW87d97TXJSDpbD5jBheTqA83TZRuJosgAsU")]
    pub avatar: String,
    #[schema(example = "7xKXtg2CW87d97TXJSDpbD5jBheTqA83TZRuJosgAsU")]
    pub authority: String,
    pub last_post_id: u8,
    pub post_count: u8,
}

impl From<&UserAccount> for UserProfileView {
    fn from(user: &UserAccount) -> Self {
        Self {
            name: user.name.clone(),
            avatar: user.avatar.clone(),
            authority: user.authority.to_string(),
            last_post_id: user.last_post_id,
            post_count: user.post_count,
        }
    }
}

/// 게시글 응답
/// Post view
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PostView {
    /// 게시글 계정 주소
    /// Post account address
    pub address: Option<String>,
    pub id: u8,
    pub title: String,
    pub content: String,
    pub user: String,
    pub authority: String,
}

impl PostView {
    pub fn from_account(address: Option<String>, post: &PostAccount) -> Self {
        Self {
            address,
            id: post.id,
            title: post.title.clone(),
            content: post.content.clone(),
            user: post.user.to_string(),
            authority: post.authority.to_string(),
        }
    }
}

impl From<&PostRecord> for PostView {
    fn from(record: &PostRecord) -> Self {
        Self::from_account(Some(record.address.to_string()), &record.account)
    }
}

/// 세션 상태 응답
/// Session state response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionResponse {
    pub status: SessionStatus,
    /// 프로필 등록 여부
    pub initialized: bool,
    /// 트랜잭션 진행 중 여부 (UI 버튼 비활성화용)
    /// True while a submission-bearing action is outstanding
    pub transaction_pending: bool,
    pub pending_actions: Vec<ActionKind>,
    pub wallet: Option<String>,
    pub user: Option<UserProfileView>,
    pub posts: Vec<PostView>,
    pub show_modal: bool,
    pub last_error: Option<String>,
    pub refreshed_at: Option<DateTime<Utc>>,
}

impl From<&SessionSnapshot> for SessionResponse {
    fn from(snapshot: &SessionSnapshot) -> Self {
        Self {
            status: snapshot.status,
            initialized: snapshot.initialized(),
            transaction_pending: snapshot.transaction_pending(),
            pending_actions: snapshot.pending_actions.clone(),
            wallet: snapshot.wallet.map(|w| w.to_string()),
            user: snapshot.user.as_ref().map(UserProfileView::from),
            posts: snapshot.posts.iter().map(PostView::from).collect(),
            show_modal: snapshot.show_modal,
            last_error: snapshot.last_error.clone(),
            refreshed_at: snapshot.refreshed_at,
        }
    }
}

/// 게시글 목록 응답
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PostsResponse {
    pub posts: Vec<PostView>,
}

/// 게시글 작성 요청
/// Create post request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePostRequest {
    #[schema(example = "Hello")]
    pub title: String,
    #[schema(example = "World")]
    pub content: String,
}

/// 게시글 작성 응답
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePostResponse {
    /// 트랜잭션 서명
    pub signature: String,
    pub post: PostView,
}

/// 프로필 등록 응답
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    pub signature: String,
    pub user: UserProfileView,
}

/// 작성 모달 표시 요청
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ModalRequest {
    pub show: bool,
}

/// 게시글 상세 응답
/// Post detail response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PostDetailResponse {
    pub post: Option<PostView>,
    pub is_loading: bool,
    /// idle | loading | ready | not_found | failed
    #[schema(example = "ready")]
    pub state: String,
    pub error: Option<String>,
}

impl PostDetailResponse {
    pub fn from_state(address: Option<String>, state: &LoadState<Option<PostAccount>>) -> Self {
        let (post, label, error) = match state {
            LoadState::Idle => (None, "idle", None),
            LoadState::Loading => (None, "loading", None),
            LoadState::Failed(reason) => (None, "failed", Some(reason.clone())),
            LoadState::Ready(None) => (None, "not_found", None),
            LoadState::Ready(Some(post)) => (Some(PostView::from_account(address, post)), "ready", None),
        };

        Self {
            post,
            is_loading: state.is_loading(),
            state: label.to_string(),
            error,
        }
    }
}
