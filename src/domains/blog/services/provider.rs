use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
};
use tracing::warn;
use crate::domains::blog::models::ProgramAccount;
use crate::shared::clients::AccountClient;
use crate::shared::errors::BlogError;

/// Provider: 네트워크 연결 + 서명 지갑 묶음
/// Provider bundling the network connection and the signing wallet
///
/// 모든 원격 호출은 `timeout` 으로 감싼다.
pub struct Provider {
    client: Arc<dyn AccountClient>,
    wallet: Arc<Keypair>,
    program_id: Pubkey,
    timeout: Duration,
}

impl Provider {
    pub fn new(
        client: Arc<dyn AccountClient>,
        wallet: Arc<Keypair>,
        program_id: Pubkey,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            wallet,
            program_id,
            timeout,
        }
    }

    /// 연결된 지갑 공개키
    pub fn wallet(&self) -> Pubkey {
        self.wallet.pubkey()
    }

    pub fn program_id(&self) -> Pubkey {
        self.program_id
    }

    pub fn endpoint(&self) -> String {
        self.client.endpoint()
    }

    async fn with_timeout<T, F>(&self, operation: &str, fut: F) -> Result<T, BlogError>
    where
        F: Future<Output = Result<T, BlogError>>,
    {
        tokio::time::timeout(self.timeout, fut)
            .await
            .map_err(|_| BlogError::Timeout {
                operation: operation.to_string(),
                millis: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
            })?
    }

    /// 단일 계정 조회 + 디코딩 (없으면 None)
    /// Fetch and decode one account; `Ok(None)` when it does not exist
    pub async fn fetch_account<A: ProgramAccount>(&self, address: &Pubkey) -> Result<Option<A>, BlogError> {
        let data = self
            .with_timeout("get_account", self.client.get_account_data(address))
            .await?;

        match data {
            Some(data) => A::try_decode(address, &data).map(Some),
            None => Ok(None),
        }
    }

    /// 특정 타입 계정 전체 조회
    /// Fetch every account of type `A`; undecodable accounts are skipped with a warning
    pub async fn fetch_all<A: ProgramAccount>(&self) -> Result<Vec<(Pubkey, A)>, BlogError> {
        let accounts = self
            .with_timeout(
                "get_program_accounts",
                self.client.get_program_accounts(&self.program_id, A::discriminator()),
            )
            .await?;

        let mut decoded = Vec::with_capacity(accounts.len());
        for (address, data) in accounts {
            match A::try_decode(&address, &data) {
                Ok(account) => decoded.push((address, account)),
                Err(e) => warn!(%address, error = %e, "skipping undecodable {}", A::TYPE_NAME),
            }
        }

        Ok(decoded)
    }

    /// 명령 전송 및 확인 대기 (지갑으로 서명)
    /// Sign with the wallet, submit and await confirmation
    pub async fn submit(&self, instruction: Instruction) -> Result<Signature, BlogError> {
        self.with_timeout(
            "submit_instruction",
            self.client.submit_instruction(instruction, &self.wallet),
        )
        .await
    }
}
