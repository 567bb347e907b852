//! Bookstore - 在线书籍目录后端
//!
//! - Domain: pagination, catalog
//! - Application: catalog service, commands, queries, ports
//! - Infrastructure: http, memory, persistence

use std::sync::Arc;

use bookstore::config::{load_config, print_config};
use bookstore::infrastructure::http::{AppState, HttpServer};
use bookstore::infrastructure::persistence::sqlite::{
    create_pool, run_migrations, DatabaseConfig, SqliteAuthorRepository, SqliteBookRepository,
    SqliteContentRepository, SqliteGenreRepository, SqliteInfoRepository,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},bookstore={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("Bookstore catalog backend");
    print_config(&config);

    // 确保数据目录存在
    if let Some(parent) = std::path::Path::new(&config.database.path).parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    // 初始化数据库
    let db_config = DatabaseConfig {
        database_url: config.database.database_url(),
        max_connections: config.database.max_connections,
    };
    let pool = create_pool(&db_config).await?;
    run_migrations(&pool).await?;

    // 创建 Repository 适配器
    let book_repo = Arc::new(SqliteBookRepository::new(pool.clone()));
    let author_repo = Arc::new(SqliteAuthorRepository::new(pool.clone()));
    let genre_repo = Arc::new(SqliteGenreRepository::new(pool.clone()));
    let content_repo = Arc::new(SqliteContentRepository::new(pool.clone()));
    let info_repo = Arc::new(SqliteInfoRepository::new(pool));

    let state = AppState::new(
        book_repo,
        author_repo,
        genre_repo,
        content_repo,
        info_repo,
        &config,
    );

    let server = HttpServer::new(config.server.clone(), state);

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
