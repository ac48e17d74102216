// =====================================================
// 원격 계정 클라이언트
// Remote Account Client
// =====================================================
// 세션 계층은 이 trait만 사용하여 체인과 통신합니다.
//
// 구현체:
// - `SolanaClient`: 실제 RPC 노드 (solana-client nonblocking)
// - `MockAccountClient`: 메모리 기반 블로그 프로그램 (테스트/로컬용)
// =====================================================

pub mod mock;
pub mod solana;

use async_trait::async_trait;
use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
};
use crate::shared::errors::BlogError;

pub use mock::MockAccountClient;
pub use solana::SolanaClient;

/// 원격 계정 클라이언트 인터페이스
/// Remote account client interface
///
/// 모든 메서드는 느리고 실패할 수 있는 네트워크 호출로 취급한다.
#[async_trait]
pub trait AccountClient: Send + Sync {
    /// 단일 계정 데이터 조회 (없으면 None)
    /// Fetch one account's raw data; `Ok(None)` when it does not exist
    async fn get_account_data(&self, address: &Pubkey) -> Result<Option<Vec<u8>>, BlogError>;

    /// 특정 타입의 프로그램 계정 전체 조회 (discriminator 필터)
    /// Fetch every account of `program_id` whose data starts with `discriminator`
    async fn get_program_accounts(
        &self,
        program_id: &Pubkey,
        discriminator: [u8; 8],
    ) -> Result<Vec<(Pubkey, Vec<u8>)>, BlogError>;

    /// 명령 1개를 서명/전송하고 확인까지 대기
    /// Sign a single-instruction transaction with `payer`, submit it and await confirmation
    async fn submit_instruction(
        &self,
        instruction: Instruction,
        payer: &Keypair,
    ) -> Result<Signature, BlogError>;

    /// 연결 대상 (로그용)
    fn endpoint(&self) -> String;
}
