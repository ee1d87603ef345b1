//! Server Implementation
//!
//! HTTP 服务器的路由组装与启动

use axum::{Router, middleware};
use tower_http::cors::CorsLayer;

use crate::core::tasks::{self, BackgroundTasks};
use crate::core::{Config, ServerState};
use crate::middleware::{api_logger_middleware, logging_middleware};

/// 组装完整应用: 业务路由 + 审计 + 请求日志 + CORS
///
/// 测试里直接对这个 Router 发请求, 不需要真的监听端口
pub fn build_router(state: ServerState) -> Router {
    crate::api::router()
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api_logger_middleware,
        ))
        .layer(middleware::from_fn(logging_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// 用现成的状态启动 (测试或自定义初始化)
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config).await?,
        };

        let mut background = BackgroundTasks::new();
        tasks::spawn_log_cleanup(&mut background, state.clone());

        let app = build_router(state);

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("i18n server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        background.shutdown().await;
        tracing::info!("Server stopped");

        Ok(())
    }
}
