// =====================================================
// AppConfig - 환경 변수 기반 설정
// =====================================================
// 환경 변수 (모두 선택, 기본값 있음):
//   BLOG_CLUSTER           localnet | devnet | mainnet | testnet | <RPC URL> | mock
//   BLOG_PROGRAM_ID        블로그 프로그램 주소 (base58)
//   BLOG_WALLET_KEYPAIR    64바이트 키페어의 Base64 (없으면 새로 생성)
//   BLOG_RPC_TIMEOUT_SECS  원격 호출 타임아웃 (초)
//   BLOG_AVATAR_BASE_URL   아바타 URL 베이스
//   SERVER_ADDR            HTTP 리슨 주소
//   CORS_ORIGIN            허용할 프론트엔드 origin
//   BLOG_AUTO_CONNECT      true면 시작 시 지갑 연결
// =====================================================

use std::str::FromStr;
use std::time::Duration;
use anchor_client::Cluster;
use base64::{engine::general_purpose, Engine as _};
use solana_sdk::{pubkey::Pubkey, signature::Keypair};
use crate::shared::errors::BlogError;
use crate::shared::utils::DEFAULT_AVATAR_BASE_URL;

/// 기본 블로그 프로그램 주소
pub const DEFAULT_PROGRAM_ID: &str = "BpuyPHpxtx8s56p9GFimBZDuTppbyvULwk6fZLo7CH74";
pub const DEFAULT_RPC_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:3002";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3003";

/// 연결 대상
/// Where account reads and transactions go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClusterTarget {
    /// 메모리 기반 Mock 체인
    Mock,
    /// 실제 RPC 노드
    Rpc(Cluster),
}

impl ClusterTarget {
    pub fn parse(value: &str) -> Result<Self, BlogError> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("mock") {
            return Ok(ClusterTarget::Mock);
        }

        let cluster = Cluster::from_str(value)
            .map_err(|e| BlogError::Config(format!("Invalid BLOG_CLUSTER {:?}: {}", value, e)))?;
        url::Url::parse(cluster.url())
            .map_err(|e| BlogError::Config(format!("Invalid RPC URL {:?}: {}", cluster.url(), e)))?;

        Ok(ClusterTarget::Rpc(cluster))
    }
}

/// 애플리케이션 설정
/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub cluster: ClusterTarget,
    pub program_id: Pubkey,
    /// Base64 인코딩된 지갑 키페어
    pub wallet_keypair: Option<String>,
    pub rpc_timeout: Duration,
    pub avatar_base_url: String,
    pub server_addr: String,
    pub cors_origin: String,
    /// 서버 시작 시 세션 연결 여부
    pub auto_connect: bool,
}

impl AppConfig {
    /// 환경 변수에서 설정 읽기
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, BlogError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 임의의 key → value 조회 함수로 설정 구성 (테스트용으로도 사용)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BlogError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let cluster = match get("BLOG_CLUSTER") {
            Some(value) => ClusterTarget::parse(&value)?,
            None => ClusterTarget::Rpc(Cluster::Localnet),
        };

        let program_id_str = get("BLOG_PROGRAM_ID").unwrap_or_else(|| DEFAULT_PROGRAM_ID.to_string());
        let program_id = Pubkey::from_str(program_id_str.trim())
            .map_err(|_| BlogError::Config(format!("Invalid BLOG_PROGRAM_ID: {}", program_id_str)))?;

        let rpc_timeout_secs = match get("BLOG_RPC_TIMEOUT_SECS") {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| BlogError::Config(format!("Invalid BLOG_RPC_TIMEOUT_SECS: {}", value)))?,
            None => DEFAULT_RPC_TIMEOUT_SECS,
        };

        let auto_connect = match get("BLOG_AUTO_CONNECT") {
            Some(value) => match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => return Err(BlogError::Config(format!("Invalid BLOG_AUTO_CONNECT: {}", value))),
            },
            None => false,
        };

        Ok(Self {
            cluster,
            program_id,
            wallet_keypair: get("BLOG_WALLET_KEYPAIR"),
            rpc_timeout: Duration::from_secs(rpc_timeout_secs),
            avatar_base_url: get("BLOG_AVATAR_BASE_URL").unwrap_or_else(|| DEFAULT_AVATAR_BASE_URL.to_string()),
            server_addr: get("SERVER_ADDR").unwrap_or_else(|| DEFAULT_SERVER_ADDR.to_string()),
            cors_origin: get("CORS_ORIGIN").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string()),
            auto_connect,
        })
    }

    /// 지갑 키페어 로드
    /// Load the configured wallet; generates a throwaway keypair when none is set
    pub fn load_wallet(&self) -> Result<Keypair, BlogError> {
        match &self.wallet_keypair {
            Some(encoded) => decode_keypair(encoded),
            None => Ok(Keypair::new()),
        }
    }
}

/// Base64 키페어 디코딩
/// Decode a Base64-encoded 64-byte keypair
pub fn decode_keypair(encoded: &str) -> Result<Keypair, BlogError> {
    let bytes = general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|e| BlogError::Config(format!("Failed to decode wallet keypair: {}", e)))?;

    Keypair::from_bytes(&bytes)
        .map_err(|e| BlogError::Config(format!("Failed to create keypair from bytes: {}", e)))
}
