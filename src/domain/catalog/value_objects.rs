//! Catalog Context - Value Objects

use serde::{Deserialize, Serialize};

use super::CatalogError;

/// 书籍发布状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookStatus {
    /// 草稿
    Draft,
    /// 待审核
    Pending,
    /// 已发布（仅此状态对目录可见）
    Released,
}

impl BookStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Draft => "d",
            BookStatus::Pending => "p",
            BookStatus::Released => "r",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CatalogError> {
        match s {
            "d" => Ok(BookStatus::Draft),
            "p" => Ok(BookStatus::Pending),
            "r" => Ok(BookStatus::Released),
            other => Err(CatalogError::InvalidStatus(other.to_string())),
        }
    }

    pub fn is_released(&self) -> bool {
        matches!(self, BookStatus::Released)
    }
}

/// 联系人邮箱
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactEmail(String);

impl ContactEmail {
    pub fn new(email: impl Into<String>) -> Result<Self, CatalogError> {
        let email = email.into().trim().to_string();
        let valid = match email.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
            }
            None => false,
        };
        if !valid {
            return Err(CatalogError::InvalidEmail(email));
        }
        Ok(Self(email))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContactEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
