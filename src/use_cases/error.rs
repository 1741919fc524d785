// ==========================================
// 牲畜称重管理系统 - 用例层错误类型
// ==========================================
// 职责: 统一用例层错误, 透传仓储错误
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {entity} with id={id}")]
    NotFound { entity: String, id: String },

    #[error("配置错误: {0}")]
    Config(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl AnalyticsError {
    pub fn not_found(entity: &str, id: impl ToString) -> Self {
        AnalyticsError::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }
}

/// 用例层 Result 类型别名
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;
