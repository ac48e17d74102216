// Blog domain services
// 블로그 도메인 서비스
pub mod pending;
pub mod post_loader;
pub mod provider;
pub mod session;
pub mod state;

pub use pending::{ActionGuard, PendingActions};
pub use post_loader::{PostId, PostLoader};
pub use provider::Provider;
pub use session::{BlogSession, CreatePostOutcome, RegisterOutcome};
pub use state::BlogState;
