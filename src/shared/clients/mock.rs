use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;
use anchor_lang::AnchorDeserialize;
use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
};
use super::AccountClient;
use crate::domains::blog::models::{
    instruction_discriminator, CreatePostArgs, InitUserArgs, PostAccount, ProgramAccount,
    UserAccount, DISCRIMINATOR_LEN,
};
use crate::domains::blog::program::{
    derive_post_address, derive_user_address, CREATE_POST_IX, INIT_USER_IX,
};
use crate::shared::errors::BlogError;

/// Mock 계정 클라이언트 (메모리 기반 블로그 프로그램)
/// In-memory stand-in for the RPC node and the blog program
///
/// init_user / create_post 명령을 실제 프로그램과 같은 규칙으로 실행합니다.
/// 테스트에서는 실패 주입(fail_*)과 전송 지연을 설정할 수 있습니다.
pub struct MockAccountClient {
    program_id: Pubkey,
    /// 계정 저장소 (삽입 순서 유지)
    accounts: RwLock<Vec<(Pubkey, Vec<u8>)>>,
    fail_submissions: AtomicBool,
    fail_fetches: AtomicBool,
    submit_delay: Mutex<Option<Duration>>,
    submissions: AtomicU64,
}

impl MockAccountClient {
    pub fn new(program_id: Pubkey) -> Self {
        Self {
            program_id,
            accounts: RwLock::new(Vec::new()),
            fail_submissions: AtomicBool::new(false),
            fail_fetches: AtomicBool::new(false),
            submit_delay: Mutex::new(None),
            submissions: AtomicU64::new(0),
        }
    }

    /// 계정 직접 삽입 (기존 계정은 덮어씀)
    /// Insert or overwrite an account
    pub fn insert_account<A: ProgramAccount>(&self, address: Pubkey, account: &A) -> Result<(), BlogError> {
        let data = account.encode()?;
        self.insert_raw(address, data);
        Ok(())
    }

    pub fn insert_raw(&self, address: Pubkey, data: Vec<u8>) {
        let mut accounts = self.accounts.write();
        match accounts.iter_mut().find(|(key, _)| *key == address) {
            Some(entry) => entry.1 = data,
            None => accounts.push((address, data)),
        }
    }

    pub fn remove_account(&self, address: &Pubkey) {
        self.accounts.write().retain(|(key, _)| key != address);
    }

    /// 이후 모든 트랜잭션 전송 실패
    pub fn set_fail_submissions(&self, fail: bool) {
        self.fail_submissions.store(fail, Ordering::SeqCst);
    }

    /// 이후 모든 계정 조회 실패
    pub fn set_fail_fetches(&self, fail: bool) {
        self.fail_fetches.store(fail, Ordering::SeqCst);
    }

    /// 트랜잭션 확인까지 걸리는 시간 (동시성 테스트용)
    pub fn set_submit_delay(&self, delay: Option<Duration>) {
        *self.submit_delay.lock() = delay;
    }

    /// 성공한 트랜잭션 수
    pub fn submission_count(&self) -> u64 {
        self.submissions.load(Ordering::SeqCst)
    }

    fn read_data(&self, address: &Pubkey) -> Option<Vec<u8>> {
        self.accounts
            .read()
            .iter()
            .find(|(key, _)| key == address)
            .map(|(_, data)| data.clone())
    }

    fn check_fetch(&self) -> Result<(), BlogError> {
        if self.fail_fetches.load(Ordering::SeqCst) {
            return Err(BlogError::Rpc("mock: fetch failure injected".to_string()));
        }
        Ok(())
    }

    /// 명령 실행 (블로그 프로그램 규칙)
    fn execute(&self, instruction: &Instruction, payer: &Pubkey) -> Result<(), BlogError> {
        if instruction.program_id != self.program_id {
            return Err(BlogError::TransactionFailed(format!(
                "mock: unknown program {}",
                instruction.program_id
            )));
        }
        if instruction.data.len() < DISCRIMINATOR_LEN {
            return Err(BlogError::TransactionFailed("mock: instruction data too short".to_string()));
        }

        let authority = instruction
            .accounts
            .iter()
            .find(|meta| meta.is_signer)
            .map(|meta| meta.pubkey)
            .ok_or_else(|| BlogError::TransactionFailed("mock: missing signer".to_string()))?;
        if authority != *payer {
            return Err(BlogError::TransactionFailed(format!(
                "mock: signer {} does not match payer {}",
                authority, payer
            )));
        }

        let (disc, mut args) = instruction.data.split_at(DISCRIMINATOR_LEN);
        if disc == instruction_discriminator(INIT_USER_IX) {
            let args = InitUserArgs::deserialize(&mut args)
                .map_err(|e| BlogError::TransactionFailed(format!("mock: bad init_user args: {}", e)))?;
            self.init_user(instruction, &authority, args)
        } else if disc == instruction_discriminator(CREATE_POST_IX) {
            let args = CreatePostArgs::deserialize(&mut args)
                .map_err(|e| BlogError::TransactionFailed(format!("mock: bad create_post args: {}", e)))?;
            self.create_post(instruction, &authority, args)
        } else {
            Err(BlogError::TransactionFailed("mock: unknown instruction".to_string()))
        }
    }

    fn init_user(&self, instruction: &Instruction, authority: &Pubkey, args: InitUserArgs) -> Result<(), BlogError> {
        let (expected, _) = derive_user_address(&self.program_id, authority);
        let target = instruction.accounts.first().map(|meta| meta.pubkey);
        if target != Some(expected) {
            return Err(BlogError::TransactionFailed("mock: seeds constraint violated (user)".to_string()));
        }
        if self.read_data(&expected).is_some() {
            return Err(BlogError::TransactionFailed(format!("mock: account {} already in use", expected)));
        }

        let user = UserAccount {
            name: args.name,
            avatar: args.avatar,
            authority: *authority,
            last_post_id: 0,
            post_count: 0,
        };
        self.insert_account(expected, &user)
    }

    fn create_post(&self, instruction: &Instruction, authority: &Pubkey, args: CreatePostArgs) -> Result<(), BlogError> {
        let (user_address, _) = derive_user_address(&self.program_id, authority);
        let data = self
            .read_data(&user_address)
            .ok_or_else(|| BlogError::TransactionFailed("mock: user account not initialized".to_string()))?;
        let mut user = UserAccount::try_decode(&user_address, &data)?;

        let (post_address, _) = derive_post_address(&self.program_id, authority, user.last_post_id);
        let target = instruction.accounts.first().map(|meta| meta.pubkey);
        if target != Some(post_address) {
            return Err(BlogError::TransactionFailed("mock: seeds constraint violated (post)".to_string()));
        }
        if self.read_data(&post_address).is_some() {
            return Err(BlogError::TransactionFailed(format!("mock: account {} already in use", post_address)));
        }

        let post = PostAccount {
            id: user.last_post_id,
            title: args.title,
            content: args.content,
            user: user_address,
            authority: *authority,
        };

        user.last_post_id = user
            .last_post_id
            .checked_add(1)
            .ok_or_else(|| BlogError::TransactionFailed("mock: post sequence overflow".to_string()))?;
        user.post_count = user.post_count.saturating_add(1);

        self.insert_account(post_address, &post)?;
        self.insert_account(user_address, &user)
    }
}

#[async_trait]
impl AccountClient for MockAccountClient {
    async fn get_account_data(&self, address: &Pubkey) -> Result<Option<Vec<u8>>, BlogError> {
        self.check_fetch()?;
        Ok(self.read_data(address))
    }

    async fn get_program_accounts(
        &self,
        program_id: &Pubkey,
        discriminator: [u8; 8],
    ) -> Result<Vec<(Pubkey, Vec<u8>)>, BlogError> {
        self.check_fetch()?;
        if *program_id != self.program_id {
            return Ok(Vec::new());
        }

        Ok(self
            .accounts
            .read()
            .iter()
            .filter(|(_, data)| data.len() >= DISCRIMINATOR_LEN && data[..DISCRIMINATOR_LEN] == discriminator)
            .cloned()
            .collect())
    }

    async fn submit_instruction(
        &self,
        instruction: Instruction,
        payer: &Keypair,
    ) -> Result<Signature, BlogError> {
        let delay = *self.submit_delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail_submissions.load(Ordering::SeqCst) {
            return Err(BlogError::TransactionFailed("mock: submission failure injected".to_string()));
        }

        self.execute(&instruction, &payer.pubkey())?;
        self.submissions.fetch_add(1, Ordering::SeqCst);
        Ok(Signature::new_unique())
    }

    fn endpoint(&self) -> String {
        "mock://in-memory".to_string()
    }
}
