use async_trait::async_trait;
use solana_account_decoder::UiAccountEncoding;
use solana_client::{
    nonblocking::rpc_client::RpcClient,
    rpc_config::{RpcAccountInfoConfig, RpcProgramAccountsConfig},
    rpc_filter::{Memcmp, RpcFilterType},
};
use solana_sdk::{
    commitment_config::CommitmentConfig,
    hash::Hash,
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
    transaction::Transaction,
};
use std::sync::Arc;
use super::AccountClient;
use crate::shared::errors::BlogError;

/// Solana RPC 클라이언트
/// Solana RPC client backed by the nonblocking `RpcClient`
#[derive(Clone)]
pub struct SolanaClient {
    rpc_client: Arc<RpcClient>,
    rpc_url: String,
    commitment: CommitmentConfig,
}

impl SolanaClient {
    /// SolanaClient 생성 (confirmed 커밋먼트)
    /// Create SolanaClient for `rpc_url` with `confirmed` commitment
    pub fn new(rpc_url: &str) -> Self {
        let commitment = CommitmentConfig::confirmed();
        let rpc_client = Arc::new(RpcClient::new_with_commitment(rpc_url.to_string(), commitment));

        Self {
            rpc_client,
            rpc_url: rpc_url.to_string(),
            commitment,
        }
    }

    /// 최신 블록해시 조회 (트랜잭션 서명에 필요)
    /// Get latest blockhash (required for transaction signing)
    pub async fn get_latest_blockhash(&self) -> Result<Hash, BlogError> {
        self.rpc_client
            .get_latest_blockhash()
            .await
            .map_err(|e| BlogError::Rpc(format!("Failed to get latest blockhash: {}", e)))
    }

    /// 명령 1개짜리 트랜잭션 생성 및 서명
    /// Create and sign a single-instruction transaction
    pub async fn create_transaction(
        &self,
        instruction: Instruction,
        payer: &Keypair,
    ) -> Result<Transaction, BlogError> {
        let latest_blockhash = self.get_latest_blockhash().await?;

        Ok(Transaction::new_signed_with_payer(
            &[instruction],
            Some(&payer.pubkey()),
            &[payer],
            latest_blockhash,
        ))
    }

    /// RPC URL 반환
    /// Get RPC URL
    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }
}

#[async_trait]
impl AccountClient for SolanaClient {
    async fn get_account_data(&self, address: &Pubkey) -> Result<Option<Vec<u8>>, BlogError> {
        // get_account는 계정이 없을 때도 에러를 반환하므로
        // 커밋먼트 버전을 사용해 "없음"과 "RPC 실패"를 구분한다
        let response = self
            .rpc_client
            .get_account_with_commitment(address, self.commitment)
            .await
            .map_err(|e| BlogError::Rpc(format!("Failed to get account {}: {}", address, e)))?;

        Ok(response.value.map(|account| account.data))
    }

    async fn get_program_accounts(
        &self,
        program_id: &Pubkey,
        discriminator: [u8; 8],
    ) -> Result<Vec<(Pubkey, Vec<u8>)>, BlogError> {
        let config = RpcProgramAccountsConfig {
            filters: Some(vec![RpcFilterType::Memcmp(Memcmp::new_base58_encoded(
                0,
                &discriminator,
            ))]),
            account_config: RpcAccountInfoConfig {
                encoding: Some(UiAccountEncoding::Base64),
                commitment: Some(self.commitment),
                ..RpcAccountInfoConfig::default()
            },
            ..RpcProgramAccountsConfig::default()
        };

        let accounts = self
            .rpc_client
            .get_program_accounts_with_config(program_id, config)
            .await
            .map_err(|e| BlogError::Rpc(format!("Failed to get program accounts: {}", e)))?;

        Ok(accounts
            .into_iter()
            .map(|(address, account)| (address, account.data))
            .collect())
    }

    async fn submit_instruction(
        &self,
        instruction: Instruction,
        payer: &Keypair,
    ) -> Result<Signature, BlogError> {
        let transaction = self.create_transaction(instruction, payer).await?;

        // 트랜잭션 전송 및 확인 대기
        self.rpc_client
            .send_and_confirm_transaction(&transaction)
            .await
            .map_err(|e| BlogError::TransactionFailed(e.to_string()))
    }

    fn endpoint(&self) -> String {
        self.rpc_url().to_string()
    }
}
