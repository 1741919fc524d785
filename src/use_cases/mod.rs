// ==========================================
// 牲畜称重管理系统 - 分析用例模块
// ==========================================
// 职责: 从称重历史取数 -> 交给引擎 -> 以统一响应返回
// 用例: 增重 / 健康预警 / 饲料对比 / 出栏评估 / 批次汇总
// ==========================================

pub mod batch_summary;
pub mod error;
pub mod feed_comparison;
pub mod growth_report;
pub mod health_alerts;
pub mod ready_to_sell;

// 用例实现
pub mod impls;

// 重导出用例接口
pub use batch_summary::BatchSummaryUseCase;
pub use error::{AnalyticsError, AnalyticsResult};
pub use feed_comparison::FeedComparisonUseCase;
pub use growth_report::GrowthReportUseCase;
pub use health_alerts::HealthAlertUseCase;
pub use ready_to_sell::ReadyToSellUseCase;

// ==========================================
// 通用类型定义
// ==========================================

use serde::{Deserialize, Serialize};

/// 分析用例响应基础结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsResponse<T> {
    /// 报告 ID (UUID v4)
    pub report_id: String,
    /// 租户 ID
    pub tenant_id: String,
    /// 快照时间 (RFC 3339)
    pub as_of: String,
    /// 数据项
    pub items: Vec<T>,
}

impl<T> AnalyticsResponse<T> {
    /// 创建新的分析响应
    pub fn new(tenant_id: &str, items: Vec<T>) -> Self {
        Self {
            report_id: uuid::Uuid::new_v4().to_string(),
            tenant_id: tenant_id.to_string(),
            as_of: chrono::Utc::now().to_rfc3339(),
            items,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
