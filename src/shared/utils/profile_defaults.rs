//! 기본 프로필 생성기
//! Default profile generator
//!
//! 역할:
//! - 지갑 공개키로부터 표시 이름을 결정적으로 생성 (형용사-동물)
//! - 지갑 공개키를 seed로 아바타 URL 생성
//!
//! 같은 지갑은 항상 같은 이름을 얻는다. 서로 다른 지갑이 같은 이름을
//! 얻을 수 있으며 (충돌), 등록 전 중복 검사는 하지 않는다.

use sha2::{Digest, Sha256};
use solana_sdk::pubkey::Pubkey;

const ADJECTIVES: &[&str] = &[
    "brave", "calm", "clever", "curious", "eager", "fancy", "gentle", "happy",
    "jolly", "kind", "lively", "lucky", "mighty", "nimble", "proud", "quiet",
    "rapid", "silly", "sunny", "swift", "tidy", "witty", "zany", "bold",
];

const ANIMALS: &[&str] = &[
    "otter", "falcon", "panda", "lynx", "koala", "heron", "badger", "dolphin",
    "fox", "gecko", "ibis", "jaguar", "lemur", "marmot", "newt", "owl",
    "puffin", "quokka", "raven", "seal", "tapir", "walrus", "yak", "zebra",
];

/// 기본 아바타 URL 베이스
pub const DEFAULT_AVATAR_BASE_URL: &str = "https://api.dicebear.com/7.x/identicon/svg";

/// 지갑 기반 표시 이름 생성
/// Display name derived from the wallet, e.g. "calm-otter"
pub fn display_name_for(wallet: &Pubkey) -> String {
    let digest = Sha256::digest(wallet.as_ref());
    let adjective = ADJECTIVES[digest[0] as usize % ADJECTIVES.len()];
    let animal = ANIMALS[digest[1] as usize % ANIMALS.len()];
    format!("{}-{}", adjective, animal)
}

/// 지갑 기반 아바타 URL 생성
/// Avatar URL seeded with the wallet's base58 key
pub fn avatar_url_for(base_url: &str, wallet: &Pubkey) -> String {
    format!("{}?seed={}", base_url.trim_end_matches('/'), wallet)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_is_deterministic() {
        let wallet = Pubkey::new_unique();
        let name = display_name_for(&wallet);
        assert_eq!(name, display_name_for(&wallet));
        assert!(name.contains('-'));
        assert!(!name.is_empty());
    }

    #[test]
    fn test_avatar_url() {
        let wallet = Pubkey::new_unique();
        let url = avatar_url_for("https://avatars.example.com/svg/", &wallet);
        assert_eq!(url, format!("https://avatars.example.com/svg?seed={}", wallet));
    }
}
