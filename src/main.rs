use anyhow::Context;
use axum::Router;
use axum::http::{HeaderValue, Method};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use solana_blog::routes::create_router;
use solana_blog::shared::config::AppConfig;
use solana_blog::shared::services::AppState;

// Import models for OpenAPI schema
use solana_blog::domains::blog::models::*;

// OpenAPI 스키마 정의: Swagger 문서 자동 생성
#[derive(OpenApi)]
#[openapi(
    paths(
        solana_blog::domains::blog::handlers::session_handler::get_session,
        solana_blog::domains::blog::handlers::session_handler::connect,
        solana_blog::domains::blog::handlers::session_handler::disconnect,
        solana_blog::domains::blog::handlers::session_handler::register,
        solana_blog::domains::blog::handlers::session_handler::set_modal,
        solana_blog::domains::blog::handlers::post_handler::list_posts,
        solana_blog::domains::blog::handlers::post_handler::refresh_posts,
        solana_blog::domains::blog::handlers::post_handler::create_post,
        solana_blog::domains::blog::handlers::post_handler::get_post
    ),
    components(schemas(
        SessionStatus,
        ActionKind,
        UserProfileView,
        PostView,
        SessionResponse,
        PostsResponse,
        CreatePostRequest,
        CreatePostResponse,
        RegisterResponse,
        ModalRequest,
        PostDetailResponse
    )),
    tags(
        (name = "Session", description = "Wallet session, profile registration and modal state"),
        (name = "Posts", description = "Post list, creation and detail")
    ),
    info(
        title = "Solana Blog API",
        description = "Session store and post loader for the on-chain blog program",
        version = "1.0.0"
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 로깅 초기화 (RUST_LOG 우선)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("solana_blog=info,tower_http=info")),
        )
        .init();

    // 설정 로드
    let config = AppConfig::from_env().context("Failed to load configuration")?;

    // AppState 생성 (클라이언트, 지갑, 세션)
    let app_state = AppState::new(config).context("Failed to initialize AppState")?;
    let config = app_state.config.clone();

    if config.auto_connect {
        let provider = app_state.blog_state.new_provider();
        match app_state.blog_state.session.connect(provider).await {
            Ok(status) => info!(?status, "session connected at startup"),
            Err(e) => warn!(error = %e, "startup connect failed"),
        }
    }

    // CORS 설정
    let cors = CorsLayer::new()
        .allow_origin(
            config
                .cors_origin
                .parse::<HeaderValue>()
                .with_context(|| format!("Invalid CORS_ORIGIN: {}", config.cors_origin))?,
        )
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
        .allow_credentials(true);

    // Router 생성
    let app = Router::new()
        .merge(create_router())
        .merge(
            SwaggerUi::new("/api")
                .url("/api-docs/openapi.json", ApiDoc::openapi())
        )
        .layer(cors)
        .with_state(app_state);

    let listener = TcpListener::bind(&config.server_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.server_addr))?;

    info!("Server running on http://{}", config.server_addr);
    info!("Swagger UI available at http://{}/api", config.server_addr);

    // 서버 실행
    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
