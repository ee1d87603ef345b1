//! 服务器状态

use std::sync::Arc;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;

/// 服务器状态 - 各服务的共享引用
///
/// 整个结构体 Clone 成本很低: 连接池和 JWT 服务都是 Arc 化的
#[derive(Clone)]
pub struct ServerState {
    /// 服务配置
    pub config: Config,
    /// SQLite 数据库服务
    pub db: DbService,
    /// JWT 认证服务
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    /// 按配置初始化: 打开数据库并跑迁移, 建好 JWT 服务
    pub async fn initialize(config: &Config) -> anyhow::Result<Self> {
        let db = DbService::new(&config.database_url).await?;
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        Ok(Self {
            config: config.clone(),
            db,
            jwt_service,
        })
    }

    /// 内存数据库状态, 测试用
    pub async fn initialize_in_memory(config: &Config) -> anyhow::Result<Self> {
        let db = DbService::new_in_memory().await?;
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        Ok(Self {
            config: config.clone(),
            db,
            jwt_service,
        })
    }
}
