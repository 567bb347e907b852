//! Info Commands

/// 提交"联系我们"留言
#[derive(Debug, Clone)]
pub struct SubmitContactMessage {
    pub email: String,
    pub message: String,
}
