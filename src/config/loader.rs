//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `BOOKSTORE_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `BOOKSTORE_SERVER__PORT=8080`
/// - `BOOKSTORE_DATABASE__PATH=/data/bookstore.db`
/// - `BOOKSTORE_PAGINATION__MAX_LIMIT=50`
/// - `BOOKSTORE_CACHE__ENABLED=false`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8000)?
        .set_default("database.path", "data/bookstore.db")?
        .set_default("database.max_connections", 5)?
        .set_default("pagination.default_limit", 1)?
        .set_default("pagination.max_limit", 100)?
        .set_default("cache.enabled", true)?
        .set_default("cache.ttl_secs", 3600)?
        .set_default("cache.max_entries", 1024)?
        .set_default("catalog.top_books", 3)?
        .set_default("log.level", "info")?;

    // 2. 配置文件
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: BOOKSTORE_SERVER__PORT=8080
    builder = builder.add_source(
        Environment::with_prefix("BOOKSTORE")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.database.path.is_empty() {
        return Err(ConfigError::ValidationError(
            "Database path cannot be empty".to_string(),
        ));
    }

    if config.pagination.default_limit < 1 {
        return Err(ConfigError::ValidationError(
            "Default page limit must be at least 1".to_string(),
        ));
    }

    if config.pagination.max_limit < config.pagination.default_limit {
        return Err(ConfigError::ValidationError(
            "Max page limit cannot be smaller than the default limit".to_string(),
        ));
    }

    if config.cache.enabled && config.cache.ttl_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Cache TTL cannot be 0 when cache is enabled".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!(
        host = %config.server.host,
        port = config.server.port,
        "server"
    );
    tracing::info!(
        path = %config.database.path,
        max_connections = config.database.max_connections,
        "database"
    );
    tracing::info!(
        default_limit = config.pagination.default_limit,
        max_limit = config.pagination.max_limit,
        top_books = config.catalog.top_books,
        "catalog"
    );
    if config.cache.enabled {
        tracing::info!(
            ttl_secs = config.cache.ttl_secs,
            max_entries = config.cache.max_entries,
            "response cache enabled"
        );
    } else {
        tracing::info!("response cache disabled");
    }
    tracing::info!(level = %config.log.level, "log");
}
