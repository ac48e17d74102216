// =====================================================
// 온체인 계정 레이아웃 (블로그 프로그램)
// On-chain account layouts of the blog program
// =====================================================
// Anchor 규칙:
// - 계정 데이터 = sha256("account:<타입명>")[..8] + Borsh 필드
// - 명령 데이터 = sha256("global:<명령명>")[..8] + Borsh 인자
// =====================================================

use anchor_lang::prelude::*;
use sha2::{Digest, Sha256};
use crate::shared::errors::BlogError;

/// Anchor discriminator 길이
pub const DISCRIMINATOR_LEN: usize = 8;

fn sighash(namespace: &str, name: &str) -> [u8; DISCRIMINATOR_LEN] {
    let digest = Sha256::digest(format!("{}:{}", namespace, name).as_bytes());
    let mut out = [0u8; DISCRIMINATOR_LEN];
    out.copy_from_slice(&digest[..DISCRIMINATOR_LEN]);
    out
}

/// 계정 discriminator 계산
/// Account discriminator: sha256("account:<name>")[..8]
pub fn account_discriminator(type_name: &str) -> [u8; DISCRIMINATOR_LEN] {
    sighash("account", type_name)
}

/// 명령 discriminator 계산
/// Instruction discriminator: sha256("global:<name>")[..8]
pub fn instruction_discriminator(ix_name: &str) -> [u8; DISCRIMINATOR_LEN] {
    sighash("global", ix_name)
}

/// 프로그램 소유 계정 (디코딩/인코딩 공통 인터페이스)
/// Account type owned by the blog program
pub trait ProgramAccount: AnchorSerialize + AnchorDeserialize + Sized {
    /// Anchor 계정 타입 이름
    const TYPE_NAME: &'static str;

    fn discriminator() -> [u8; DISCRIMINATOR_LEN] {
        account_discriminator(Self::TYPE_NAME)
    }

    /// 계정 데이터 디코딩 (discriminator 검증 포함)
    /// Decode raw account data, checking the discriminator first.
    /// Trailing bytes (unused allocated space) are ignored.
    fn try_decode(address: &Pubkey, data: &[u8]) -> std::result::Result<Self, BlogError> {
        if data.len() < DISCRIMINATOR_LEN {
            return Err(BlogError::AccountDecode {
                address: address.to_string(),
                reason: format!("data too short ({} bytes)", data.len()),
            });
        }

        let (disc, mut body) = data.split_at(DISCRIMINATOR_LEN);
        if disc != Self::discriminator() {
            return Err(BlogError::AccountDecode {
                address: address.to_string(),
                reason: format!("discriminator mismatch for {}", Self::TYPE_NAME),
            });
        }

        <Self as AnchorDeserialize>::deserialize(&mut body).map_err(|e| BlogError::AccountDecode {
            address: address.to_string(),
            reason: e.to_string(),
        })
    }

    /// 계정 데이터 인코딩 (discriminator + Borsh)
    fn encode(&self) -> std::result::Result<Vec<u8>, BlogError> {
        let mut data = Self::discriminator().to_vec();
        AnchorSerialize::serialize(self, &mut data)
            .map_err(|e| BlogError::Internal(format!("Failed to encode {}: {}", Self::TYPE_NAME, e)))?;
        Ok(data)
    }
}

/// 사용자 프로필 계정
/// User profile account, stored at the "user" PDA of its authority
#[derive(Debug, Clone, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub struct UserAccount {
    /// 표시 이름
    pub name: String,
    /// 아바타 URL
    pub avatar: String,
    /// 지갑 주소
    pub authority: Pubkey,
    /// 다음 게시글이 사용할 시퀀스 번호
    /// Sequence number the next post will be created with
    pub last_post_id: u8,
    pub post_count: u8,
}

impl ProgramAccount for UserAccount {
    const TYPE_NAME: &'static str = "UserAccount";
}

/// 게시글 계정
/// Post account, stored at the "post" PDA of (authority, id)
#[derive(Debug, Clone, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub struct PostAccount {
    pub id: u8,
    pub title: String,
    pub content: String,
    /// 작성자 프로필 계정 주소
    pub user: Pubkey,
    /// 작성자 지갑 주소
    pub authority: Pubkey,
}

impl ProgramAccount for PostAccount {
    const TYPE_NAME: &'static str = "PostAccount";
}

/// init_user 명령 인자
#[derive(Debug, Clone, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub struct InitUserArgs {
    pub name: String,
    pub avatar: String,
}

/// create_post 명령 인자
#[derive(Debug, Clone, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub struct CreatePostArgs {
    pub title: String,
    pub content: String,
}
