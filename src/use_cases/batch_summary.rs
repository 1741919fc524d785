// ==========================================
// 牲畜称重管理系统 - 批次汇总用例
// ==========================================

use crate::domain::metrics::BatchSummary;
use crate::use_cases::error::AnalyticsResult;

/// 批次汇总用例
pub trait BatchSummaryUseCase {
    /// 单个称重批次的汇总 (批次不存在时返回 NotFound)
    fn get_batch_summary(&self, batch_id: i64) -> AnalyticsResult<BatchSummary>;
}
