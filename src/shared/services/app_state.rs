use std::sync::Arc;
use solana_sdk::signature::Keypair;
use tracing::info;
use crate::domains::blog::services::BlogState;
use crate::shared::clients::{AccountClient, MockAccountClient, SolanaClient};
use crate::shared::config::{AppConfig, ClusterTarget};
use crate::shared::errors::BlogError;

/// Application state (combines all domain states)
/// 애플리케이션 상태 (모든 도메인 상태를 조합)
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub blog_state: BlogState,
}

impl AppState {
    /// 설정으로부터 AppState 생성
    /// 1. 클러스터에 맞는 클라이언트 생성  2. 지갑 로드  3. 도메인 State 조합
    pub fn new(config: AppConfig) -> Result<Self, BlogError> {
        let client: Arc<dyn AccountClient> = match &config.cluster {
            ClusterTarget::Mock => {
                info!("using in-memory mock chain");
                Arc::new(MockAccountClient::new(config.program_id))
            }
            ClusterTarget::Rpc(cluster) => {
                info!(rpc_url = cluster.url(), "using Solana RPC");
                Arc::new(SolanaClient::new(cluster.url()))
            }
        };

        let wallet = config.load_wallet()?;
        Ok(Self::with_client(config, client, wallet))
    }

    /// 클라이언트/지갑을 직접 주입 (테스트용)
    pub fn with_client(config: AppConfig, client: Arc<dyn AccountClient>, wallet: Keypair) -> Self {
        let blog_state = BlogState::new(
            client,
            wallet,
            config.program_id,
            config.rpc_timeout,
            &config.avatar_base_url,
        );

        Self {
            config: Arc::new(config),
            blog_state,
        }
    }
}
