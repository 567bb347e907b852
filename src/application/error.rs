//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::domain::catalog::CatalogError;
use crate::domain::PaginationError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到
    #[error("{resource_type} not found: {id}")]
    NotFound { resource_type: &'static str, id: i64 },

    /// 集合中没有任何可返回的资源
    #[error("No {0} available")]
    NoneAvailable(&'static str),

    /// 请求的页没有任何条目
    #[error("This page is empty")]
    EmptyPage,

    /// 验证错误（包括非法的分页参数）
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 读取底层记录源失败，不做重试，直接上报
    #[error("Record source fault: {0}")]
    SourceFault(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: i64) -> Self {
        Self::NotFound { resource_type, id }
    }

    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }
}

impl From<crate::application::ports::RepositoryError> for ApplicationError {
    fn from(err: crate::application::ports::RepositoryError) -> Self {
        Self::SourceFault(err.to_string())
    }
}

impl From<PaginationError> for ApplicationError {
    fn from(err: PaginationError) -> Self {
        match err {
            PaginationError::EmptyPage => Self::EmptyPage,
            PaginationError::InvalidPageRequest(msg) => Self::ValidationError(msg),
        }
    }
}

impl From<CatalogError> for ApplicationError {
    fn from(err: CatalogError) -> Self {
        Self::ValidationError(err.to_string())
    }
}
