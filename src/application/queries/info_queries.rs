//! Info Queries

/// 获取最新公告
#[derive(Debug, Clone)]
pub struct GetLatestAnnouncement;
