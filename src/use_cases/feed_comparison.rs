// ==========================================
// 牲畜称重管理系统 - 饲料对比用例
// ==========================================

use crate::domain::date_range::DateRange;
use crate::domain::metrics::FeedPerformanceMetric;
use crate::use_cases::error::AnalyticsResult;
use crate::use_cases::AnalyticsResponse;

/// 饲料对比用例
///
/// 输出: FeedPerformanceMetric 按 performance_rank 升序
pub trait FeedComparisonUseCase {
    /// 对比范围内出现过的全部饲料类型
    fn compare_all_feeds(
        &self,
        tenant_id: &str,
        date_range: Option<&DateRange>,
    ) -> AnalyticsResult<AnalyticsResponse<FeedPerformanceMetric>>;

    /// 只对比指定的饲料类型 (无匹配动物的类型不出现在结果中)
    fn compare_feed_types(
        &self,
        tenant_id: &str,
        feed_types: &[String],
        date_range: Option<&DateRange>,
    ) -> AnalyticsResult<AnalyticsResponse<FeedPerformanceMetric>>;
}
