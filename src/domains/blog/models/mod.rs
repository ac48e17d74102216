// Blog domain models
// 블로그 도메인 모델
pub mod accounts;
pub mod dto;
pub mod session;

pub use accounts::*;
pub use dto::*;
pub use session::*;
