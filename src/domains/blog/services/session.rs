// =====================================================
// 블로그 세션 (Session Store)
// =====================================================
// 상태 머신: Disconnected → Connecting → Unregistered | Active
//
// 액션 순서 (한 액션 안에서는 항상 순차 실행):
// - initialize_session: 주소 파생 → 프로필 조회 → (있으면) 게시글 새로고침
// - register_user:      이름/아바타 생성 → init_user 전송 → 프로필 재조회 → 새로고침
// - create_post:        프로필 재조회(last_post_id) → 게시글 주소 파생
//                       → create_post 전송 → 게시글 재조회 → 새로고침 → 모달 닫기
//
// 규칙:
// - 실패 시 상태를 바꾸지 않는다 (last_error만 기록). 재시도 없음.
// - 세대(generation)가 바뀐 뒤 도착한 결과는 버린다 (재연결/지갑 변경).
// - 게시글 새로고침은 티켓 순서로 적용: 나중에 시작한 새로고침이 이긴다.
// - 상태 락은 await 동안 잡지 않는다.
// =====================================================

use std::sync::Arc;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use solana_sdk::{pubkey::Pubkey, signature::Signature};
use tracing::{debug, info, warn};
use crate::domains::blog::models::{
    ActionKind, PostAccount, PostRecord, SessionSnapshot, SessionStatus, UserAccount,
};
use crate::domains::blog::program::{
    create_post_instruction, derive_post_address, derive_user_address, init_user_instruction,
};
use crate::domains::blog::services::pending::PendingActions;
use crate::domains::blog::services::provider::Provider;
use crate::shared::errors::BlogError;
use crate::shared::utils::{avatar_url_for, display_name_for};

struct SessionInner {
    status: SessionStatus,
    provider: Option<Arc<Provider>>,
    /// 연결이 바뀔 때마다 증가
    generation: u64,
    user: Option<UserAccount>,
    posts: Vec<PostRecord>,
    show_modal: bool,
    last_error: Option<String>,
    refreshed_at: Option<DateTime<Utc>>,
    refresh_issued: u64,
    refresh_applied: u64,
}

impl SessionInner {
    fn reset(&mut self, provider: Option<Arc<Provider>>, status: SessionStatus) {
        self.generation += 1;
        self.provider = provider;
        self.status = status;
        self.user = None;
        self.posts.clear();
        self.show_modal = false;
        self.last_error = None;
        self.refreshed_at = None;
    }
}

/// 프로필 등록 결과
#[derive(Debug, Clone)]
pub struct RegisterOutcome {
    pub signature: Signature,
    pub user: UserAccount,
}

/// 게시글 작성 결과
#[derive(Debug, Clone)]
pub struct CreatePostOutcome {
    pub signature: Signature,
    pub post: PostRecord,
}

/// 블로그 세션
/// Session store for one connected wallet
///
/// 명시적으로 생성해서 `Arc`로 뷰 계층에 전달한다 (전역 상태 없음).
pub struct BlogSession {
    inner: RwLock<SessionInner>,
    pending: PendingActions,
    avatar_base_url: String,
}

impl BlogSession {
    pub fn new(avatar_base_url: impl Into<String>) -> Self {
        Self {
            inner: RwLock::new(SessionInner {
                status: SessionStatus::Disconnected,
                provider: None,
                generation: 0,
                user: None,
                posts: Vec::new(),
                show_modal: false,
                last_error: None,
                refreshed_at: None,
                refresh_issued: 0,
                refresh_applied: 0,
            }),
            pending: PendingActions::new(),
            avatar_base_url: avatar_base_url.into(),
        }
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // 조회
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    pub fn status(&self) -> SessionStatus {
        self.inner.read().status
    }

    pub fn user(&self) -> Option<UserAccount> {
        self.inner.read().user.clone()
    }

    pub fn posts(&self) -> Vec<PostRecord> {
        self.inner.read().posts.clone()
    }

    pub fn show_modal(&self) -> bool {
        self.inner.read().show_modal
    }

    /// 현재 Provider (연결 안 됐으면 None)
    pub fn provider(&self) -> Option<Arc<Provider>> {
        self.inner.read().provider.clone()
    }

    pub fn transaction_pending(&self) -> bool {
        let generation = self.inner.read().generation;
        !self.pending.active(generation).is_empty()
    }

    /// 뷰 계층용 스냅샷
    /// Consistent copy of the view-facing state
    pub fn snapshot(&self) -> SessionSnapshot {
        let inner = self.inner.read();
        SessionSnapshot {
            status: inner.status,
            wallet: inner.provider.as_ref().map(|p| p.wallet()),
            user: inner.user.clone(),
            posts: inner.posts.clone(),
            show_modal: inner.show_modal,
            pending_actions: self.pending.active(inner.generation),
            last_error: inner.last_error.clone(),
            refreshed_at: inner.refreshed_at,
        }
    }

    /// 게시글 작성 모달 표시 여부 설정
    pub fn set_show_modal(&self, show: bool) {
        self.inner.write().show_modal = show;
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // 연결
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// 지갑/Provider 연결 (변경 포함)
    /// Connect (or switch to) `provider` and re-run the whole profile lookup.
    /// Previous profile and posts are dropped, never reused.
    pub async fn connect(&self, provider: Arc<Provider>) -> Result<SessionStatus, BlogError> {
        {
            let mut inner = self.inner.write();
            info!(
                wallet = %provider.wallet(),
                endpoint = %provider.endpoint(),
                generation = inner.generation + 1,
                "wallet connected"
            );
            inner.reset(Some(provider), SessionStatus::Connecting);
        }

        self.initialize_session().await
    }

    /// 지갑 연결 해제
    pub fn disconnect(&self) {
        let mut inner = self.inner.write();
        info!(generation = inner.generation, "wallet disconnected");
        inner.reset(None, SessionStatus::Disconnected);
    }

    fn current(&self) -> Result<(Arc<Provider>, u64), BlogError> {
        let inner = self.inner.read();
        inner
            .provider
            .clone()
            .map(|provider| (provider, inner.generation))
            .ok_or(BlogError::NotConnected)
    }

    /// 같은 세대일 때만 상태 변경 적용
    fn apply<F>(&self, generation: u64, f: F) -> Result<(), BlogError>
    where
        F: FnOnce(&mut SessionInner),
    {
        let mut inner = self.inner.write();
        if inner.generation != generation {
            debug!(generation, current = inner.generation, "discarding stale session result");
            return Err(BlogError::SessionChanged);
        }
        f(&mut inner);
        Ok(())
    }

    fn record_error(&self, generation: u64, err: &BlogError) {
        let message = err.to_string();
        let _ = self.apply(generation, |inner| inner.last_error = Some(message));
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // 액션
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// 세션 초기화 (프로필 조회)
    /// Look up the wallet's profile.
    ///
    /// - 프로필 있음 → Active + 게시글 새로고침
    /// - 프로필 없음 → Unregistered (에러 아님)
    /// - 원격 에러 → Unregistered + 에러 반환
    pub async fn initialize_session(&self) -> Result<SessionStatus, BlogError> {
        let (provider, generation) = self.current()?;
        let _guard = self.pending.begin(ActionKind::Initialize, generation)?;
        self.apply(generation, |inner| inner.status = SessionStatus::Connecting)?;

        let wallet = provider.wallet();
        let (user_address, _) = derive_user_address(&provider.program_id(), &wallet);
        info!(%wallet, %user_address, "looking up user profile");

        match provider.fetch_account::<UserAccount>(&user_address).await {
            Ok(Some(user)) => {
                info!(name = %user.name, last_post_id = user.last_post_id, "user profile found");
                self.apply(generation, |inner| {
                    inner.user = Some(user);
                    inner.status = SessionStatus::Active;
                    inner.last_error = None;
                })?;

                if let Err(e) = self.refresh_posts().await {
                    warn!(error = %e, "post refresh after login failed");
                }
                Ok(SessionStatus::Active)
            }
            Ok(None) => {
                info!(%wallet, "no user profile, registration required");
                self.apply(generation, |inner| {
                    inner.user = None;
                    inner.status = SessionStatus::Unregistered;
                })?;
                Ok(SessionStatus::Unregistered)
            }
            Err(e) => {
                warn!(%wallet, error = %e, "user profile lookup failed");
                let message = e.to_string();
                self.apply(generation, |inner| {
                    inner.user = None;
                    inner.status = SessionStatus::Unregistered;
                    inner.last_error = Some(message);
                })?;
                Err(e)
            }
        }
    }

    fn require_status(&self, generation: u64, required: SessionStatus) -> Result<(), BlogError> {
        let inner = self.inner.read();
        if inner.generation != generation {
            return Err(BlogError::SessionChanged);
        }

        match (inner.status, required) {
            (current, required) if current == required => Ok(()),
            (SessionStatus::Disconnected, _) => Err(BlogError::NotConnected),
            (SessionStatus::Connecting, _) => Err(BlogError::ActionInProgress(ActionKind::Initialize)),
            (SessionStatus::Active, SessionStatus::Unregistered) => Err(BlogError::AlreadyRegistered),
            (SessionStatus::Unregistered, SessionStatus::Active) => Err(BlogError::NotRegistered),
            (current, required) => Err(BlogError::Internal(format!(
                "unexpected transition {:?} -> {:?}",
                current, required
            ))),
        }
    }

    /// 프로필 등록
    /// Register a profile with a name and avatar generated from the wallet
    pub async fn register_user(&self) -> Result<RegisterOutcome, BlogError> {
        let (provider, generation) = self.current()?;
        self.require_status(generation, SessionStatus::Unregistered)?;
        let _guard = self.pending.begin(ActionKind::Register, generation)?;

        let wallet = provider.wallet();
        let program_id = provider.program_id();
        let name = display_name_for(&wallet);
        let avatar = avatar_url_for(&self.avatar_base_url, &wallet);
        let (user_address, _) = derive_user_address(&program_id, &wallet);

        let result: Result<RegisterOutcome, BlogError> = async {
            let instruction = init_user_instruction(&program_id, &wallet, &name, &avatar)?;
            let signature = provider.submit(instruction).await?;
            info!(%signature, %user_address, "init_user confirmed");

            let user = provider
                .fetch_account::<UserAccount>(&user_address)
                .await?
                .ok_or_else(|| BlogError::AccountNotFound { address: user_address.to_string() })?;
            Ok(RegisterOutcome { signature, user })
        }
        .await;

        match result {
            Ok(outcome) => {
                let user = outcome.user.clone();
                self.apply(generation, |inner| {
                    inner.user = Some(user);
                    inner.status = SessionStatus::Active;
                    inner.last_error = None;
                })?;

                if let Err(e) = self.refresh_posts().await {
                    warn!(error = %e, "post refresh after registration failed");
                }
                Ok(outcome)
            }
            Err(e) => {
                warn!(%wallet, error = %e, "user registration failed");
                self.record_error(generation, &e);
                Err(e)
            }
        }
    }

    /// 게시글 작성
    /// Create a post at the author's current `last_post_id`
    pub async fn create_post(&self, title: &str, content: &str) -> Result<CreatePostOutcome, BlogError> {
        let (provider, generation) = self.current()?;
        self.require_status(generation, SessionStatus::Active)?;
        let _guard = self.pending.begin(ActionKind::CreatePost, generation)?;

        let wallet = provider.wallet();
        let program_id = provider.program_id();
        let (user_address, _) = derive_user_address(&program_id, &wallet);

        let result: Result<CreatePostOutcome, BlogError> = async {
            // 시퀀스 번호가 마지막 로드 이후 바뀌었을 수 있으므로 항상 재조회
            let user = provider
                .fetch_account::<UserAccount>(&user_address)
                .await?
                .ok_or(BlogError::NotRegistered)?;
            let sequence = user.last_post_id;
            let (post_address, _) = derive_post_address(&program_id, &wallet, sequence);
            debug!(sequence, %post_address, "derived post address");

            let instruction = create_post_instruction(&program_id, &wallet, sequence, title, content)?;
            let signature = provider.submit(instruction).await?;
            info!(%signature, %post_address, "create_post confirmed");

            let post = provider
                .fetch_account::<PostAccount>(&post_address)
                .await?
                .ok_or_else(|| BlogError::AccountNotFound { address: post_address.to_string() })?;
            debug!(id = post.id, title = %post.title, "created post fetched");

            Ok(CreatePostOutcome {
                signature,
                post: PostRecord {
                    address: post_address,
                    account: post,
                },
            })
        }
        .await;

        match result {
            Ok(outcome) => {
                if let Err(e) = self.refresh_posts().await {
                    warn!(error = %e, "post refresh after create_post failed");
                }
                self.apply(generation, |inner| {
                    inner.show_modal = false;
                    inner.last_error = None;
                })?;
                Ok(outcome)
            }
            Err(e) => {
                warn!(%wallet, error = %e, "create_post failed");
                self.record_error(generation, &e);
                Err(e)
            }
        }
    }

    /// 게시글 전체 새로고침
    /// Fetch every post and replace the stored collection.
    ///
    /// 여러 새로고침이 겹치면 가장 나중에 시작한 것의 결과만 남는다.
    pub async fn refresh_posts(&self) -> Result<Vec<PostRecord>, BlogError> {
        let (provider, generation) = self.current()?;
        let ticket = {
            let mut inner = self.inner.write();
            inner.refresh_issued += 1;
            inner.refresh_issued
        };

        let fetched = match provider.fetch_all::<PostAccount>().await {
            Ok(fetched) => fetched,
            Err(e) => {
                warn!(error = %e, "fetching posts failed");
                self.record_error(generation, &e);
                return Err(e);
            }
        };

        let records: Vec<PostRecord> = fetched
            .into_iter()
            .map(|(address, account)| PostRecord { address, account })
            .collect();

        let mut inner = self.inner.write();
        if inner.generation != generation {
            debug!(ticket, "discarding posts fetched for a previous connection");
            return Err(BlogError::SessionChanged);
        }
        if ticket < inner.refresh_applied {
            debug!(ticket, applied = inner.refresh_applied, "discarding outdated post refresh");
            return Ok(inner.posts.clone());
        }

        info!(count = records.len(), ticket, "posts refreshed");
        inner.posts = records.clone();
        inner.refresh_applied = ticket;
        inner.refreshed_at = Some(Utc::now());
        Ok(records)
    }

    /// 세션 지갑의 프로필 주소 (연결 안 됐으면 None)
    pub fn user_address(&self) -> Option<Pubkey> {
        self.provider()
            .map(|p| derive_user_address(&p.program_id(), &p.wallet()).0)
    }
}
