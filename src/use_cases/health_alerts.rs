// ==========================================
// 牲畜称重管理系统 - 健康预警用例
// ==========================================
// 职责: 掉重预警明细与按动物汇总
// ==========================================

use crate::domain::date_range::DateRange;
use crate::domain::metrics::{HealthFlag, HealthSummary};
use crate::use_cases::error::AnalyticsResult;
use crate::use_cases::AnalyticsResponse;

/// 健康预警用例
pub trait HealthAlertUseCase {
    /// 单只动物的掉重预警 (时间升序)
    fn get_animal_alerts(&self, animal_id: i64) -> AnalyticsResult<Vec<HealthFlag>>;

    /// 租户内有预警的动物汇总
    ///
    /// 输出: 需升级的排前, 其余按 animal_id 升序
    fn get_herd_health(
        &self,
        tenant_id: &str,
        date_range: Option<&DateRange>,
    ) -> AnalyticsResult<AnalyticsResponse<HealthSummary>>;
}
