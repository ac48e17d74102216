// =====================================================
// 통합 테스트 공통 헬퍼
// =====================================================
// 목적: Mock 체인 위에 세션/Provider/AppState를 구성
//
// 사용법:
// ```rust
// mod common;
// use common::*;
//
// #[tokio::test]
// async fn test_something() {
//     let ctx = setup_test();
//     ctx.session.connect(ctx.provider()).await.unwrap();
//     // 테스트 코드...
// }
// ```
// =====================================================
#![allow(dead_code)]

use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use async_trait::async_trait;
use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
};
use tokio::sync::Notify;
use solana_blog::domains::blog::models::{PostAccount, UserAccount};
use solana_blog::domains::blog::program::{derive_post_address, derive_user_address};
use solana_blog::domains::blog::services::{BlogSession, Provider};
use solana_blog::shared::clients::{AccountClient, MockAccountClient};
use solana_blog::shared::config::{AppConfig, DEFAULT_PROGRAM_ID};
use solana_blog::shared::errors::BlogError;
use solana_blog::shared::services::AppState;

// 테스트용 상수
pub const TEST_AVATAR_BASE_URL: &str = "https://avatars.test/identicon";
pub const TEST_TIMEOUT: Duration = Duration::from_secs(5);

pub fn test_program_id() -> Pubkey {
    Pubkey::from_str(DEFAULT_PROGRAM_ID).expect("valid program id")
}

/// 테스트 컨텍스트: Mock 체인 + 지갑 + 세션
pub struct TestContext {
    pub chain: Arc<MockAccountClient>,
    pub wallet: Arc<Keypair>,
    pub session: Arc<BlogSession>,
}

impl TestContext {
    /// 현재 지갑으로 새 Provider 생성
    pub fn provider(&self) -> Arc<Provider> {
        self.provider_for(self.wallet.clone())
    }

    /// 임의의 지갑으로 새 Provider 생성 (지갑 변경 테스트용)
    pub fn provider_for(&self, wallet: Arc<Keypair>) -> Arc<Provider> {
        let client: Arc<dyn AccountClient> = self.chain.clone();
        Arc::new(Provider::new(client, wallet, test_program_id(), TEST_TIMEOUT))
    }

    /// 임의의 클라이언트/타임아웃으로 Provider 생성
    pub fn provider_with(&self, client: Arc<dyn AccountClient>, timeout: Duration) -> Arc<Provider> {
        Arc::new(Provider::new(client, self.wallet.clone(), test_program_id(), timeout))
    }

    pub fn wallet_pubkey(&self) -> Pubkey {
        self.wallet.pubkey()
    }

    pub fn user_address(&self) -> Pubkey {
        derive_user_address(&test_program_id(), &self.wallet_pubkey()).0
    }

    pub fn post_address(&self, sequence: u8) -> Pubkey {
        derive_post_address(&test_program_id(), &self.wallet_pubkey(), sequence).0
    }

    /// 체인에 프로필 직접 기록
    pub fn seed_user(&self, name: &str, last_post_id: u8) -> UserAccount {
        let user = UserAccount {
            name: name.to_string(),
            avatar: format!("{}?seed={}", TEST_AVATAR_BASE_URL, self.wallet_pubkey()),
            authority: self.wallet_pubkey(),
            last_post_id,
            post_count: last_post_id,
        };
        self.chain
            .insert_account(self.user_address(), &user)
            .expect("seed user");
        user
    }

    /// 체인에 게시글 직접 기록
    pub fn seed_post(&self, sequence: u8, title: &str, content: &str) -> PostAccount {
        let post = PostAccount {
            id: sequence,
            title: title.to_string(),
            content: content.to_string(),
            user: self.user_address(),
            authority: self.wallet_pubkey(),
        };
        self.chain
            .insert_account(self.post_address(sequence), &post)
            .expect("seed post");
        post
    }
}

/// 테스트 전 초기화
///
/// 빈 Mock 체인과 새 지갑, 연결되지 않은 세션을 만듭니다.
pub fn setup_test() -> TestContext {
    TestContext {
        chain: Arc::new(MockAccountClient::new(test_program_id())),
        wallet: Arc::new(Keypair::new()),
        session: Arc::new(BlogSession::new(TEST_AVATAR_BASE_URL)),
    }
}

/// HTTP 테스트용 설정 (Mock 클러스터)
pub fn test_config() -> AppConfig {
    AppConfig::from_lookup(|key| match key {
        "BLOG_CLUSTER" => Some("mock".to_string()),
        "BLOG_RPC_TIMEOUT_SECS" => Some("5".to_string()),
        "BLOG_AVATAR_BASE_URL" => Some(TEST_AVATAR_BASE_URL.to_string()),
        _ => None,
    })
    .expect("test config")
}

/// HTTP 테스트용 AppState (Mock 체인 공유)
pub fn setup_app_state() -> (AppState, Arc<MockAccountClient>, Pubkey) {
    let chain = Arc::new(MockAccountClient::new(test_program_id()));
    let wallet = Keypair::new();
    let wallet_pubkey = wallet.pubkey();
    let client: Arc<dyn AccountClient> = chain.clone();
    let app_state = AppState::with_client(test_config(), client, wallet);
    (app_state, chain, wallet_pubkey)
}

/// 응답하지 않는 클라이언트 (타임아웃 테스트용)
pub struct HangingClient;

#[async_trait]
impl AccountClient for HangingClient {
    async fn get_account_data(&self, _address: &Pubkey) -> Result<Option<Vec<u8>>, BlogError> {
        std::future::pending().await
    }

    async fn get_program_accounts(
        &self,
        _program_id: &Pubkey,
        _discriminator: [u8; 8],
    ) -> Result<Vec<(Pubkey, Vec<u8>)>, BlogError> {
        std::future::pending().await
    }

    async fn submit_instruction(
        &self,
        _instruction: Instruction,
        _payer: &Keypair,
    ) -> Result<Signature, BlogError> {
        std::future::pending().await
    }

    fn endpoint(&self) -> String {
        "hanging://never".to_string()
    }
}

/// 전체 조회 1회를 붙잡아 두는 클라이언트 (새로고침 순서 테스트용)
///
/// `hold_next_listing()` 이후 첫 get_program_accounts는 그 시점의 체인 상태를
/// 읽은 뒤 `release()` 될 때까지 응답을 보류한다.
pub struct GatedClient {
    inner: Arc<MockAccountClient>,
    armed: AtomicBool,
    entered: Notify,
    release: Notify,
}

impl GatedClient {
    pub fn new(inner: Arc<MockAccountClient>) -> Self {
        Self {
            inner,
            armed: AtomicBool::new(false),
            entered: Notify::new(),
            release: Notify::new(),
        }
    }

    pub fn hold_next_listing(&self) {
        self.armed.store(true, Ordering::SeqCst);
    }

    /// 보류된 조회가 데이터를 읽을 때까지 대기
    pub async fn wait_until_held(&self) {
        self.entered.notified().await;
    }

    pub fn release(&self) {
        self.release.notify_one();
    }
}

#[async_trait]
impl AccountClient for GatedClient {
    async fn get_account_data(&self, address: &Pubkey) -> Result<Option<Vec<u8>>, BlogError> {
        self.inner.get_account_data(address).await
    }

    async fn get_program_accounts(
        &self,
        program_id: &Pubkey,
        discriminator: [u8; 8],
    ) -> Result<Vec<(Pubkey, Vec<u8>)>, BlogError> {
        let accounts = self.inner.get_program_accounts(program_id, discriminator).await?;
        if self.armed.swap(false, Ordering::SeqCst) {
            self.entered.notify_one();
            self.release.notified().await;
        }
        Ok(accounts)
    }

    async fn submit_instruction(
        &self,
        instruction: Instruction,
        payer: &Keypair,
    ) -> Result<Signature, BlogError> {
        self.inner.submit_instruction(instruction, payer).await
    }

    fn endpoint(&self) -> String {
        self.inner.endpoint()
    }
}

/// HTTP 테스트용 AppState (응답하지 않는 체인, 타임아웃 1초)
pub fn setup_hanging_app_state() -> AppState {
    let config = AppConfig::from_lookup(|key| match key {
        "BLOG_CLUSTER" => Some("mock".to_string()),
        "BLOG_RPC_TIMEOUT_SECS" => Some("1".to_string()),
        _ => None,
    })
    .expect("test config");
    let client: Arc<dyn AccountClient> = Arc::new(HangingClient);
    AppState::with_client(config, client, Keypair::new())
}
