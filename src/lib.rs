//! Bookstore - 在线书籍目录后端
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Pagination: 基于页索引的分页计算
//! - Catalog Context: 评分聚合、内容树组装、值对象
//!
//! 应用层 (application/):
//! - Ports: 端口定义（Repositories, RecordSource）
//! - Catalog: CatalogService（分页列表、评分、内容树）
//! - Commands: CQRS 命令处理器
//! - Queries: CQRS 查询处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API
//! - Memory: 响应缓存
//! - Persistence: SQLite 存储

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
