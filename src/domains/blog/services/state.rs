// Blog domain state
// 블로그 도메인 상태
use std::sync::Arc;
use std::time::Duration;
use solana_sdk::{pubkey::Pubkey, signature::Keypair};
use crate::domains::blog::services::{BlogSession, Provider};
use crate::shared::clients::AccountClient;

/// Blog domain state
/// 세션 + Provider를 만들 재료 (클라이언트, 지갑)
#[derive(Clone)]
pub struct BlogState {
    pub session: Arc<BlogSession>,
    client: Arc<dyn AccountClient>,
    wallet: Arc<Keypair>,
    program_id: Pubkey,
    rpc_timeout: Duration,
}

impl BlogState {
    pub fn new(
        client: Arc<dyn AccountClient>,
        wallet: Keypair,
        program_id: Pubkey,
        rpc_timeout: Duration,
        avatar_base_url: &str,
    ) -> Self {
        Self {
            session: Arc::new(BlogSession::new(avatar_base_url)),
            client,
            wallet: Arc::new(wallet),
            program_id,
            rpc_timeout,
        }
    }

    /// 새 Provider 생성 (연결할 때마다 새 인스턴스)
    /// Build a fresh provider for the configured client and wallet
    pub fn new_provider(&self) -> Arc<Provider> {
        Arc::new(Provider::new(
            self.client.clone(),
            self.wallet.clone(),
            self.program_id,
            self.rpc_timeout,
        ))
    }
}
