use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use parking_lot::{Mutex, RwLock};
use solana_sdk::pubkey::Pubkey;
use tracing::{debug, warn};
use crate::domains::blog::models::{LoadState, PostAccount};
use crate::domains::blog::program::derive_post_address;
use crate::domains::blog::services::provider::Provider;
use crate::shared::errors::BlogError;

/// 게시글 식별자
/// Post identifier: an account address, or the sequence number of one of
/// the connected wallet's own posts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostId {
    Address(Pubkey),
    Sequence(u8),
}

impl PostId {
    /// 조회할 계정 주소 결정
    pub fn resolve(&self, provider: &Provider) -> Pubkey {
        match self {
            PostId::Address(address) => *address,
            PostId::Sequence(sequence) => {
                derive_post_address(&provider.program_id(), &provider.wallet(), *sequence).0
            }
        }
    }
}

impl FromStr for PostId {
    type Err = BlogError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
            return trimmed
                .parse::<u8>()
                .map(PostId::Sequence)
                .map_err(|_| BlogError::InvalidPostId { post_id: value.to_string() });
        }

        Pubkey::from_str(trimmed)
            .map(PostId::Address)
            .map_err(|_| BlogError::InvalidPostId { post_id: value.to_string() })
    }
}

/// 게시글 상세 로더
/// Post detail loader
///
/// Provider가 생기면 로드하고, Provider가 바뀌면 다시 로드한다.
/// 실패는 `LoadState::Failed`로 노출된다 (삼키지 않음).
pub struct PostLoader {
    post_id: PostId,
    state: RwLock<LoadState<Option<PostAccount>>>,
    address: RwLock<Option<Pubkey>>,
    bound: Mutex<Option<Arc<Provider>>>,
    /// 마지막으로 시작한 로드 번호
    latest: AtomicU64,
}

impl PostLoader {
    pub fn new(post_id: PostId) -> Self {
        Self {
            post_id,
            state: RwLock::new(LoadState::Idle),
            address: RwLock::new(None),
            bound: Mutex::new(None),
            latest: AtomicU64::new(0),
        }
    }

    pub fn post_id(&self) -> PostId {
        self.post_id
    }

    pub fn state(&self) -> LoadState<Option<PostAccount>> {
        self.state.read().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().is_loading()
    }

    /// 마지막으로 조회한 계정 주소
    pub fn address(&self) -> Option<Pubkey> {
        *self.address.read()
    }

    /// Provider 연결/변경 알림
    /// Notify the loader of the current provider.
    ///
    /// `None` 이면 아무것도 하지 않는다 (cold start는 Provider를 기다림).
    /// 같은 Provider면 재로드하지 않는다.
    pub async fn bind_provider(&self, provider: Option<Arc<Provider>>) -> LoadState<Option<PostAccount>> {
        let Some(provider) = provider else {
            return self.state();
        };

        let changed = {
            let mut bound = self.bound.lock();
            match bound.as_ref() {
                Some(current) if Arc::ptr_eq(current, &provider) => false,
                _ => {
                    *bound = Some(provider.clone());
                    true
                }
            }
        };

        if !changed {
            return self.state();
        }
        self.load(&provider).await
    }

    /// 게시글 1개 로드
    /// Load the post through `provider`
    pub async fn load(&self, provider: &Provider) -> LoadState<Option<PostAccount>> {
        let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let address = self.post_id.resolve(provider);
        *self.address.write() = Some(address);
        *self.state.write() = LoadState::Loading;
        debug!(%address, ticket, "loading post");

        let next = match provider.fetch_account::<PostAccount>(&address).await {
            Ok(post) => LoadState::Ready(post),
            Err(e) => {
                warn!(%address, error = %e, "post load failed");
                LoadState::Failed(e.to_string())
            }
        };

        // 더 최근 로드가 시작됐으면 그 결과를 기다린다
        if self.latest.load(Ordering::SeqCst) == ticket {
            *self.state.write() = next.clone();
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_id_parsing() {
        assert_eq!("5".parse::<PostId>().unwrap(), PostId::Sequence(5));
        assert_eq!(" 255 ".parse::<PostId>().unwrap(), PostId::Sequence(255));

        let address = Pubkey::new_unique();
        assert_eq!(address.to_string().parse::<PostId>().unwrap(), PostId::Address(address));

        assert!(matches!("256".parse::<PostId>(), Err(BlogError::InvalidPostId { .. })));
        assert!(matches!("".parse::<PostId>(), Err(BlogError::InvalidPostId { .. })));
        assert!(matches!("hello".parse::<PostId>(), Err(BlogError::InvalidPostId { .. })));
    }
}
