//! Pagination - 分页计算
//!
//! 本系统中 `offset` 表示页索引而非跳过的条目数：
//! 实际跳过的条目数 = `offset * limit`，切片窗口为 `[offset*limit, offset*limit+limit)`。

use serde::Serialize;
use thiserror::Error;

/// 分页错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginationError {
    #[error("Invalid page request: {0}")]
    InvalidPageRequest(String),

    #[error("This page is empty")]
    EmptyPage,
}

/// 分页请求
///
/// 不变量:
/// - limit >= 1
/// - offset >= 0
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    limit: usize,
    offset: usize,
}

impl PageRequest {
    /// 从外部传入的有符号参数构造（查询字符串可能携带负数）
    pub fn new(limit: i64, offset: i64) -> Result<Self, PaginationError> {
        if limit < 1 {
            return Err(PaginationError::InvalidPageRequest(format!(
                "limit must be at least 1, got {}",
                limit
            )));
        }
        if offset < 0 {
            return Err(PaginationError::InvalidPageRequest(format!(
                "offset must not be negative, got {}",
                offset
            )));
        }
        Ok(Self {
            limit: limit as usize,
            offset: offset as usize,
        })
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// 第一条记录的位置
    pub fn start(&self) -> usize {
        self.offset.saturating_mul(self.limit)
    }
}

/// 分页计算结果（切片窗口 + 前后页索引）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub start: usize,
    pub end: usize,
    pub effective_limit: usize,
    pub next_page: Option<usize>,
    pub prev_page: Option<usize>,
}

impl PageWindow {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn is_last(&self) -> bool {
        self.next_page.is_none()
    }
}

/// 计算分页窗口
///
/// 规则:
/// 1. `start >= total_count` 时返回 `EmptyPage`
/// 2. 恰好到达末尾（满页）时没有下一页
/// 3. 末尾不足一页时没有下一页，且 `effective_limit = total_count % limit`
/// 4. 其余情况下一页为 `offset + 1`
/// 5. `offset == 0` 时没有上一页，否则为 `offset - 1`
pub fn paginate(total_count: usize, request: &PageRequest) -> Result<PageWindow, PaginationError> {
    let limit = request.limit();
    let offset = request.offset();
    let start = request.start();

    if start >= total_count {
        return Err(PaginationError::EmptyPage);
    }

    let page_end = start.saturating_add(limit);
    let (effective_limit, next_page) = if total_count == page_end {
        (limit, None)
    } else if total_count < page_end {
        // start < total_count < start + limit，余数必然落在 (0, limit) 内
        (total_count % limit, None)
    } else {
        (limit, Some(offset + 1))
    };

    let prev_page = if offset == 0 { None } else { Some(offset - 1) };

    Ok(PageWindow {
        start,
        end: start + effective_limit,
        effective_limit,
        next_page,
        prev_page,
    })
}

/// 一页结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub effective_limit: usize,
    pub next_page: Option<usize>,
    pub prev_page: Option<usize>,
}

impl<T> PageResult<T> {
    pub fn new(items: Vec<T>, window: &PageWindow) -> Self {
        Self {
            items,
            effective_limit: window.effective_limit,
            next_page: window.next_page,
            prev_page: window.prev_page,
        }
    }

    pub fn map<U, F>(self, f: F) -> PageResult<U>
    where
        F: FnMut(T) -> U,
    {
        PageResult {
            items: self.items.into_iter().map(f).collect(),
            effective_limit: self.effective_limit,
            next_page: self.next_page,
            prev_page: self.prev_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(limit: i64, offset: i64) -> PageRequest {
        PageRequest::new(limit, offset).unwrap()
    }

    #[test]
    fn test_first_page_of_many() {
        let window = paginate(10, &request(3, 0)).unwrap();
        assert_eq!(window.start, 0);
        assert_eq!(window.end, 3);
        assert_eq!(window.effective_limit, 3);
        assert_eq!(window.next_page, Some(1));
        assert_eq!(window.prev_page, None);
    }

    #[test]
    fn test_partial_last_page_shrinks_limit() {
        let window = paginate(10, &request(3, 3)).unwrap();
        assert_eq!(window.start, 9);
        assert_eq!(window.end, 10);
        assert_eq!(window.effective_limit, 1);
        assert_eq!(window.next_page, None);
        assert_eq!(window.prev_page, Some(2));
    }

    #[test]
    fn test_page_past_end_is_empty() {
        assert_eq!(paginate(9, &request(3, 4)), Err(PaginationError::EmptyPage));
        assert_eq!(paginate(9, &request(3, 3)), Err(PaginationError::EmptyPage));
    }

    #[test]
    fn test_empty_collection_has_no_pages() {
        assert_eq!(paginate(0, &request(1, 0)), Err(PaginationError::EmptyPage));
    }

    #[test]
    fn test_exact_last_full_page() {
        let window = paginate(9, &request(3, 2)).unwrap();
        assert_eq!(window.start, 6);
        assert_eq!(window.end, 9);
        assert_eq!(window.effective_limit, 3);
        assert!(window.is_last());
        assert_eq!(window.prev_page, Some(1));
    }

    #[test]
    fn test_single_page_smaller_than_limit() {
        let window = paginate(2, &request(5, 0)).unwrap();
        assert_eq!((window.start, window.end), (0, 2));
        assert_eq!(window.next_page, None);
        assert_eq!(window.prev_page, None);
    }

    #[test]
    fn test_invalid_requests_rejected() {
        assert!(matches!(
            PageRequest::new(0, 0),
            Err(PaginationError::InvalidPageRequest(_))
        ));
        assert!(matches!(
            PageRequest::new(3, -1),
            Err(PaginationError::InvalidPageRequest(_))
        ));
    }

    #[test]
    fn test_window_properties_hold_for_small_inputs() {
        for total in 0..30usize {
            for limit in 1..8i64 {
                for offset in 0..12i64 {
                    let req = request(limit, offset);
                    match paginate(total, &req) {
                        Err(PaginationError::EmptyPage) => {
                            assert!(req.start() >= total);
                        }
                        Err(other) => panic!("unexpected error: {other}"),
                        Ok(window) => {
                            assert!(window.effective_limit >= 1);
                            assert!(window.effective_limit <= req.limit());
                            assert_eq!(window.len(), window.effective_limit);
                            assert!(window.end <= total);
                            assert_eq!(window.prev_page.is_none(), offset == 0);
                            if let Some(prev) = window.prev_page {
                                assert_eq!(prev as i64, offset - 1);
                            }
                            assert_eq!(window.next_page.is_none(), window.end == total);
                            if let Some(next) = window.next_page {
                                assert_eq!(next as i64, offset + 1);
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_page_result_map_keeps_metadata() {
        let window = paginate(10, &request(3, 1)).unwrap();
        let page = PageResult::new(vec![4, 5, 6], &window).map(|n| n * 10);
        assert_eq!(page.items, vec![40, 50, 60]);
        assert_eq!(page.next_page, Some(2));
        assert_eq!(page.prev_page, Some(0));
        assert_eq!(page.effective_limit, 3);
    }
}
