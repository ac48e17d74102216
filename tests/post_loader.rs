// =====================================================
// 게시글 상세 로더 통합 테스트
// =====================================================

mod common;
use common::*;
use std::sync::Arc;
use solana_sdk::signature::Keypair;
use solana_blog::domains::blog::models::LoadState;
use solana_blog::domains::blog::services::{PostId, PostLoader};

/// 테스트: id "5" + 해당 주소에 {Hello, World} → loading=false, post 설정
#[tokio::test]
async fn test_load_post_by_sequence() {
    let ctx = setup_test();
    ctx.seed_post(5, "Hello", "World");

    let loader = PostLoader::new("5".parse::<PostId>().unwrap());
    let state = loader.bind_provider(Some(ctx.provider())).await;

    assert!(!loader.is_loading());
    let post = state.ready().cloned().flatten().expect("post loaded");
    assert_eq!(post.title, "Hello");
    assert_eq!(post.content, "World");
    assert_eq!(loader.address(), Some(ctx.post_address(5)));
    assert_eq!(loader.state(), state);
}

/// 테스트: 계정 주소로도 조회 가능
#[tokio::test]
async fn test_load_post_by_address() {
    let ctx = setup_test();
    ctx.seed_post(2, "by", "address");
    let address = ctx.post_address(2);

    let loader = PostLoader::new(address.to_string().parse::<PostId>().unwrap());
    let state = loader.bind_provider(Some(ctx.provider())).await;

    assert_eq!(state.ready().cloned().flatten().unwrap().title, "by");
    assert_eq!(loader.address(), Some(address));
}

/// 테스트: Provider가 없으면 로드하지 않고 대기
#[tokio::test]
async fn test_waits_for_provider() {
    let ctx = setup_test();
    ctx.seed_post(5, "Hello", "World");

    let loader = PostLoader::new(PostId::Sequence(5));
    let state = loader.bind_provider(None).await;

    assert_eq!(state, LoadState::Idle);
    assert!(!loader.is_loading());
    assert!(loader.address().is_none());

    let state = loader.bind_provider(Some(ctx.provider())).await;
    assert!(matches!(state, LoadState::Ready(Some(_))));
}

/// 테스트: 계정이 없으면 Ready(None) (에러 아님)
#[tokio::test]
async fn test_missing_post_is_not_found() {
    let ctx = setup_test();

    let loader = PostLoader::new(PostId::Sequence(7));
    let state = loader.bind_provider(Some(ctx.provider())).await;

    assert_eq!(state, LoadState::Ready(None));
    assert!(!loader.is_loading());
}

/// 테스트: 조회 실패는 Failed로 노출
#[tokio::test]
async fn test_fetch_failure_is_surfaced() {
    let ctx = setup_test();
    ctx.seed_post(1, "unreachable", "post");
    ctx.chain.set_fail_fetches(true);

    let loader = PostLoader::new(PostId::Sequence(1));
    let state = loader.bind_provider(Some(ctx.provider())).await;

    assert!(matches!(state, LoadState::Failed(ref reason) if !reason.is_empty()));
    assert!(!loader.is_loading());
}

/// 테스트: 다른 타입 계정은 디코딩 실패로 처리
#[tokio::test]
async fn test_wrong_account_type_fails() {
    let ctx = setup_test();
    ctx.seed_user("alice", 0);

    let loader = PostLoader::new(PostId::Address(ctx.user_address()));
    let state = loader.bind_provider(Some(ctx.provider())).await;

    assert!(matches!(state, LoadState::Failed(_)));
}

/// 테스트: 같은 Provider면 재로드하지 않고, 바뀌면 재로드
#[tokio::test]
async fn test_reloads_only_when_provider_changes() {
    let ctx = setup_test();
    ctx.seed_post(0, "original", "post");
    let provider = ctx.provider();

    let loader = PostLoader::new(PostId::Sequence(0));
    loader.bind_provider(Some(provider.clone())).await;

    // 체인 값이 바뀌어도 같은 Provider면 이전 결과 유지
    ctx.seed_post(0, "edited", "post");
    let state = loader.bind_provider(Some(provider.clone())).await;
    assert_eq!(state.ready().cloned().flatten().unwrap().title, "original");

    // 새 Provider (재연결) → 재로드
    let state = loader.bind_provider(Some(ctx.provider())).await;
    assert_eq!(state.ready().cloned().flatten().unwrap().title, "edited");
}

/// 테스트: 지갑이 바뀌면 시퀀스 번호가 다른 주소로 해석됨
#[tokio::test]
async fn test_sequence_follows_provider_wallet() {
    let ctx = setup_test();
    ctx.seed_post(0, "mine", "post");

    let loader = PostLoader::new(PostId::Sequence(0));
    let state = loader.bind_provider(Some(ctx.provider())).await;
    assert!(matches!(state, LoadState::Ready(Some(_))));

    let other = Arc::new(Keypair::new());
    let state = loader.bind_provider(Some(ctx.provider_for(other))).await;
    assert_eq!(state, LoadState::Ready(None));
    assert_ne!(loader.address(), Some(ctx.post_address(0)));
}
