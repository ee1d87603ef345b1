//! i18n Server - 多语言翻译管理服务
//!
//! # 架构概述
//!
//! - **认证** (`auth`): JWT + Argon2 注册登录体系
//! - **数据库** (`db`): SQLite 连接池、迁移与仓储层
//! - **HTTP API** (`api`): 标签 / 翻译 / 审计日志的 RESTful 接口
//! - **中间件** (`middleware`): 请求日志与 API 审计入库
//!
//! # 模块结构
//!
//! ```text
//! i18n-server/src/
//! ├── core/          # 配置、状态、服务器、后台任务
//! ├── auth/          # JWT、密码哈希、当前用户提取
//! ├── api/           # HTTP 路由和处理器
//! ├── middleware/    # 请求日志、审计
//! ├── db/            # 连接池与仓储
//! └── utils/         # 错误信封、校验提取器、日志初始化
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod middleware;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState, build_router};
pub use utils::{ApiResponse, AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 按配置初始化日志; LOG_DIR 设置了就同时写滚动文件
pub fn setup_environment(config: &Config) {
    init_logger_with_file(None, config.log_dir.as_deref());
}
