/// Blog 모듈
/// Blog Module
///
/// 역할:
/// - 지갑 연결 → 프로필 조회 → 게시글 목록 로드 (세션)
/// - 프로필 등록, 게시글 작성 트랜잭션 전송
/// - 게시글 상세 로드
///
/// 구조:
/// - `program.rs`: PDA 파생, 명령(instruction) 생성
/// - `models/`: 온체인 계정 레이아웃, 세션 상태, API DTO
/// - `services/session.rs`: 세션 상태 머신과 액션
/// - `services/post_loader.rs`: 게시글 상세 로더
/// - `handlers/`, `routes.rs`: HTTP 뷰 계층
pub mod handlers;
pub mod models;
pub mod program;
pub mod routes;
pub mod services;
