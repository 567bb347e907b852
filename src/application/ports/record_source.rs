//! Record Source Port
//!
//! 已过滤、已排序、可计数的记录集合。分页只依赖 `count` 和 `slice` 两个操作，
//! 同一次请求内两次调用必须看到一致的数量和顺序（由存储层保证）。

use async_trait::async_trait;

use super::RepositoryError;

#[async_trait]
pub trait RecordSource: Send + Sync {
    type Item: Send;

    /// 集合总数
    async fn count(&self) -> Result<usize, RepositoryError>;

    /// 获取 `[start, end)` 范围内的记录
    async fn slice(&self, start: usize, end: usize) -> Result<Vec<Self::Item>, RepositoryError>;
}

/// 内存中的有序集合
#[derive(Debug, Clone)]
pub struct VecSource<T> {
    items: Vec<T>,
}

impl<T> VecSource<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> From<Vec<T>> for VecSource<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

#[async_trait]
impl<T> RecordSource for VecSource<T>
where
    T: Clone + Send + Sync,
{
    type Item = T;

    async fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.items.len())
    }

    async fn slice(&self, start: usize, end: usize) -> Result<Vec<T>, RepositoryError> {
        let end = end.min(self.items.len());
        let start = start.min(end);
        Ok(self.items[start..end].to_vec())
    }
}
