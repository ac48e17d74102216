// =====================================================
// 블로그 프로그램 주소 파생 & 명령 생성
// Blog program address derivation & instruction builders
// =====================================================
// PDA 규칙:
// - 사용자: ["user", 지갑 공개키]
// - 게시글: ["post", 지갑 공개키, [시퀀스 번호 1바이트]]
//
// 주소 해싱은 Pubkey::find_program_address에 맡긴다 (직접 구현하지 않음).
// 게시글 주소는 작성자의 last_post_id가 필요하므로
// 반드시 프로필 조회 → 주소 파생 → 트랜잭션 전송 순서를 지켜야 한다.
// =====================================================

use anchor_lang::AnchorSerialize;
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_program,
};
use crate::domains::blog::models::{instruction_discriminator, CreatePostArgs, InitUserArgs};
use crate::shared::errors::BlogError;

/// 사용자 PDA seed
pub const USER_SEED: &[u8] = b"user";
/// 게시글 PDA seed
pub const POST_SEED: &[u8] = b"post";

pub const INIT_USER_IX: &str = "init_user";
pub const CREATE_POST_IX: &str = "create_post";

/// 사용자 프로필 주소 파생
/// Derive the user profile address of a wallet
pub fn derive_user_address(program_id: &Pubkey, wallet: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[USER_SEED, wallet.as_ref()], program_id)
}

/// 게시글 주소 파생
/// Derive the address of the post a wallet created with `sequence`
pub fn derive_post_address(program_id: &Pubkey, wallet: &Pubkey, sequence: u8) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[POST_SEED, wallet.as_ref(), &[sequence]], program_id)
}

fn instruction_data<A: AnchorSerialize>(ix_name: &str, args: &A) -> Result<Vec<u8>, BlogError> {
    let mut data = instruction_discriminator(ix_name).to_vec();
    args.serialize(&mut data)
        .map_err(|e| BlogError::Internal(format!("Failed to encode {} args: {}", ix_name, e)))?;
    Ok(data)
}

/// init_user 명령 생성
/// Build the `init_user` instruction
///
/// 계정 순서: user_account, authority (signer), system_program
pub fn init_user_instruction(
    program_id: &Pubkey,
    authority: &Pubkey,
    name: &str,
    avatar: &str,
) -> Result<Instruction, BlogError> {
    let (user_address, _) = derive_user_address(program_id, authority);
    let args = InitUserArgs {
        name: name.to_string(),
        avatar: avatar.to_string(),
    };

    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(user_address, false),
            AccountMeta::new(*authority, true),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
        data: instruction_data(INIT_USER_IX, &args)?,
    })
}

/// create_post 명령 생성
/// Build the `create_post` instruction for the post at `sequence`
///
/// 계정 순서: post_account, user_account, authority (signer), system_program
pub fn create_post_instruction(
    program_id: &Pubkey,
    authority: &Pubkey,
    sequence: u8,
    title: &str,
    content: &str,
) -> Result<Instruction, BlogError> {
    let (user_address, _) = derive_user_address(program_id, authority);
    let (post_address, _) = derive_post_address(program_id, authority, sequence);
    let args = CreatePostArgs {
        title: title.to_string(),
        content: content.to_string(),
    };

    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(post_address, false),
            AccountMeta::new(user_address, false),
            AccountMeta::new(*authority, true),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
        data: instruction_data(CREATE_POST_IX, &args)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_address_is_deterministic() {
        let program_id = Pubkey::new_unique();
        let wallet = Pubkey::new_unique();

        let first = derive_user_address(&program_id, &wallet);
        let second = derive_user_address(&program_id, &wallet);
        assert_eq!(first, second);

        let other = derive_user_address(&program_id, &Pubkey::new_unique());
        assert_ne!(first.0, other.0);
    }

    #[test]
    fn test_post_addresses_differ_per_sequence() {
        let program_id = Pubkey::new_unique();
        let wallet = Pubkey::new_unique();

        let addresses: Vec<Pubkey> = (0..=u8::MAX)
            .map(|seq| derive_post_address(&program_id, &wallet, seq).0)
            .collect();
        let unique: std::collections::HashSet<_> = addresses.iter().collect();
        assert_eq!(unique.len(), addresses.len());

        // user/post 네임스페이스는 겹치지 않음
        let (user, _) = derive_user_address(&program_id, &wallet);
        assert!(!addresses.contains(&user));
    }

    #[test]
    fn test_create_post_instruction_layout() {
        let program_id = Pubkey::new_unique();
        let wallet = Pubkey::new_unique();

        let ix = create_post_instruction(&program_id, &wallet, 7, "Hello", "World").unwrap();
        assert_eq!(ix.program_id, program_id);
        assert_eq!(ix.accounts[0].pubkey, derive_post_address(&program_id, &wallet, 7).0);
        assert_eq!(ix.accounts[1].pubkey, derive_user_address(&program_id, &wallet).0);
        assert!(ix.accounts[2].is_signer);
        assert_eq!(ix.accounts[3].pubkey, system_program::id());
        assert_eq!(&ix.data[..8], &instruction_discriminator(CREATE_POST_IX));
    }
}
