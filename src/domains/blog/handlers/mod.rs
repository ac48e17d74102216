// Blog domain handlers
// 블로그 도메인 핸들러 (뷰 계층)
pub mod post_handler;
pub mod session_handler;
