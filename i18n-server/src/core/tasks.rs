//! 后台任务
//!
//! 目前只有一个定时任务: 按保留天数清理审计日志

use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::core::ServerState;
use crate::db::repository::api_log;

/// 日志清理的执行间隔
const CLEANUP_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// 后台任务管理器
///
/// 注册的任务统一挂在一个 CancellationToken 下, 关停时一起取消
pub struct BackgroundTasks {
    tasks: Vec<(&'static str, JoinHandle<()>)>,
    shutdown: CancellationToken,
}

impl BackgroundTasks {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// 注册并启动一个任务; panic 被捕获并记录, 不拖垮进程
    pub fn spawn<F>(&mut self, name: &'static str, future: F)
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            if let Err(panic) = AssertUnwindSafe(future).catch_unwind().await {
                let msg = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".into());
                tracing::error!(task = %name, panic = %msg, "Background task panicked");
            }
        });
        self.tasks.push((name, handle));
        tracing::info!(task = %name, "Background task started");
    }

    /// 取消令牌并等待所有任务退出
    pub async fn shutdown(self) {
        self.shutdown.cancel();
        for (name, handle) in self.tasks {
            if let Err(e) = handle.await
                && !e.is_cancelled()
            {
                tracing::warn!(task = %name, error = %e, "Background task join failed");
            }
        }
    }
}

impl Default for BackgroundTasks {
    fn default() -> Self {
        Self::new()
    }
}

/// 启动审计日志的定时清理任务
pub fn spawn_log_cleanup(tasks: &mut BackgroundTasks, state: ServerState) {
    let token = tasks.shutdown_token();
    tasks.spawn("api_log_cleanup", async move {
        let mut interval = tokio::time::interval(CLEANUP_INTERVAL);
        loop {
            tokio::select! {
                _ = token.cancelled() => {
                    tracing::info!("api_log_cleanup task stopping");
                    break;
                }
                _ = interval.tick() => {
                    match api_log::clean_old(&state.db.pool, state.config.log_retention_days).await {
                        Ok(deleted) if deleted > 0 => {
                            tracing::info!(deleted, "scheduled api log cleanup done");
                        }
                        Ok(_) => {}
                        Err(e) => {
                            tracing::warn!(error = %e, "scheduled api log cleanup failed");
                        }
                    }
                }
            }
        }
    });
}
