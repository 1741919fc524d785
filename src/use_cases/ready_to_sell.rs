// ==========================================
// 牲畜称重管理系统 - 出栏评估用例
// ==========================================

use crate::domain::metrics::ReadyToSellResult;
use crate::use_cases::error::AnalyticsResult;
use crate::use_cases::AnalyticsResponse;

/// 出栏评估用例
///
/// 输出: ReadyToSellResult 按 progress_percent 降序, 同值按 animal.id 升序
pub trait ReadyToSellUseCase {
    /// 设置了目标体重且有称重的在栏动物
    fn evaluate_herd(&self, tenant_id: &str) -> AnalyticsResult<AnalyticsResponse<ReadyToSellResult>>;

    /// 达到出栏阈值的动物
    fn get_ready_animals(&self, tenant_id: &str) -> AnalyticsResult<AnalyticsResponse<ReadyToSellResult>>;

    /// 达到临近阈值但未达出栏阈值的动物
    fn get_approaching_animals(
        &self,
        tenant_id: &str,
    ) -> AnalyticsResult<AnalyticsResponse<ReadyToSellResult>>;
}
