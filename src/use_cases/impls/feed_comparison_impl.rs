// ==========================================
// 牲畜称重管理系统 - 饲料对比用例实现
// ==========================================

use crate::domain::date_range::DateRange;
use crate::domain::metrics::FeedPerformanceMetric;
use crate::domain::weighing::FeedTagKeys;
use crate::engine::FeedPerformanceAggregator;
use crate::perf::PerfGuard;
use crate::repository::history::WeighingHistory;
use crate::use_cases::error::{AnalyticsError, AnalyticsResult};
use crate::use_cases::feed_comparison::FeedComparisonUseCase;
use crate::use_cases::AnalyticsResponse;
use std::collections::BTreeSet;
use std::sync::Arc;

/// 饲料对比用例实现
pub struct FeedComparisonUseCaseImpl {
    weighings: Arc<dyn WeighingHistory>,
    aggregator: FeedPerformanceAggregator,
}

impl FeedComparisonUseCaseImpl {
    /// # 参数
    /// - `feed_keys`: 须与仓储按饲料类型取数时使用的字段键一致
    pub fn new(weighings: Arc<dyn WeighingHistory>, feed_keys: FeedTagKeys) -> Self {
        Self {
            weighings,
            aggregator: FeedPerformanceAggregator::new(feed_keys),
        }
    }
}

impl FeedComparisonUseCase for FeedComparisonUseCaseImpl {
    fn compare_all_feeds(
        &self,
        tenant_id: &str,
        date_range: Option<&DateRange>,
    ) -> AnalyticsResult<AnalyticsResponse<FeedPerformanceMetric>> {
        let _perf = PerfGuard::new("compare_all_feeds").tenant(tenant_id);

        let records = self.weighings.get_weighings_for_tenant(tenant_id, date_range)?;
        let comparison = self.aggregator.compare(&records, date_range);

        tracing::info!(
            tenant_id,
            weighing_count = records.len(),
            feed_type_count = comparison.len(),
            best_feed = comparison.best().map(|m| m.feed_type.as_str()).unwrap_or("-"),
            "饲料对比完成"
        );
        Ok(AnalyticsResponse::new(tenant_id, comparison.metrics))
    }

    fn compare_feed_types(
        &self,
        tenant_id: &str,
        feed_types: &[String],
        date_range: Option<&DateRange>,
    ) -> AnalyticsResult<AnalyticsResponse<FeedPerformanceMetric>> {
        let _perf = PerfGuard::new("compare_feed_types").tenant(tenant_id);

        // 去重, 忽略空白
        let requested: BTreeSet<&str> = feed_types
            .iter()
            .map(|f| f.trim())
            .filter(|f| !f.is_empty())
            .collect();
        if requested.is_empty() && !feed_types.is_empty() {
            return Err(AnalyticsError::InvalidInput(
                "饲料类型列表只包含空白项".to_string(),
            ));
        }

        let mut metrics = Vec::with_capacity(requested.len());
        for &feed_type in &requested {
            let by_animal =
                self.weighings
                    .get_weighings_for_feed_type(tenant_id, feed_type, date_range)?;
            match self.aggregator.aggregate(feed_type, &by_animal, date_range) {
                Some(metric) => metrics.push(metric),
                None => tracing::debug!(tenant_id, feed_type, "饲料类型无匹配动物"),
            }
        }

        let comparison = FeedPerformanceAggregator::rank(metrics);
        tracing::info!(
            tenant_id,
            requested = requested.len(),
            ranked = comparison.len(),
            "指定饲料对比完成"
        );
        Ok(AnalyticsResponse::new(tenant_id, comparison.metrics))
    }
}
