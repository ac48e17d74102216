/// 공유 유틸리티 모듈
/// Shared Utilities Module
///
/// 역할:
/// - 기본 프로필 생성 (표시 이름, 아바타 URL)
pub mod profile_defaults;

pub use profile_defaults::*;
