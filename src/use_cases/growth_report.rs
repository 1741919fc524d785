// ==========================================
// 牲畜称重管理系统 - 增重报告用例
// ==========================================
// 职责: 单只动物 / 全群的增重指标
// ==========================================

use crate::domain::date_range::DateRange;
use crate::domain::metrics::AnimalGrowth;
use crate::use_cases::error::AnalyticsResult;
use crate::use_cases::AnalyticsResponse;

/// 增重报告用例
///
/// 输出: AnimalGrowth 按 animal_id 升序
pub trait GrowthReportUseCase {
    /// 单只动物的增重指标 (动物不存在时返回 NotFound)
    fn get_animal_growth(&self, animal_id: i64) -> AnalyticsResult<AnimalGrowth>;

    /// 租户全群增重 (可按日期闭区间过滤称重)
    fn get_herd_growth(
        &self,
        tenant_id: &str,
        date_range: Option<&DateRange>,
    ) -> AnalyticsResult<AnalyticsResponse<AnimalGrowth>>;
}
