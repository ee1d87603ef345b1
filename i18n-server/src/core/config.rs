use crate::auth::JwtConfig;

/// 服务配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | DATABASE_URL | sqlite://i18n.db | SQLite 连接串 |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_RETENTION_DAYS | 30 | 审计日志保留天数 |
/// | AUDIT_EXCLUDED_PATHS | (内置) | 逗号分隔的审计排除路径 |
/// | LOG_DIR | (无) | 设置后日志同时写滚动文件 |
///
/// # 示例
///
/// ```ignore
/// DATABASE_URL=sqlite:///data/i18n.db HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite 连接串
    pub database_url: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 审计日志保留天数 (定时清理和 /clean 接口的默认值)
    pub log_retention_days: i64,
    /// 不写审计日志的路径
    pub audit_excluded_paths: Vec<String>,
    /// 滚动日志文件目录, 为空只输出到 stdout
    pub log_dir: Option<String>,
}

/// 默认不审计的路径: 登录带密码, 日志接口自查询会产生回声
fn default_excluded_paths() -> Vec<String> {
    ["/", "/api/auth/login", "/api/api-logs", "/docs", "/openapi.json"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Config {
    /// 从环境变量加载配置, 未设置的项用默认值
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://i18n.db".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_retention_days: std::env::var("LOG_RETENTION_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            audit_excluded_paths: std::env::var("AUDIT_EXCLUDED_PATHS")
                .ok()
                .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or_else(default_excluded_paths),
            log_dir: std::env::var("LOG_DIR").ok(),
        }
    }

    /// 数据库连接串的脱敏版本, 用于健康检查展示
    ///
    /// 去掉 userinfo; 连 scheme 都解析不出来时整串打码
    pub fn masked_database_url(&self) -> String {
        match self.database_url.split_once("://") {
            Some((scheme, rest)) => {
                let host = rest.rsplit_once('@').map(|(_, h)| h).unwrap_or(rest);
                format!("{scheme}://{host}")
            }
            None => "***".to_string(),
        }
    }

    /// 路径是否排除在审计之外; 排除项同时覆盖其子路径
    /// (排除 /api/api-logs 也就排除了 /api/api-logs/clean 等)
    pub fn is_audit_excluded(&self, path: &str) -> bool {
        self.audit_excluded_paths.iter().any(|p| {
            path == p || (p.len() > 1 && path.starts_with(p) && path.as_bytes()[p.len()] == b'/')
        })
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
