// ==========================================
// 牲畜称重管理系统 - 批次汇总用例实现
// ==========================================

use crate::domain::metrics::BatchSummary;
use crate::engine::BatchSummaryEngine;
use crate::perf::PerfGuard;
use crate::repository::history::{BatchDirectory, WeighingHistory};
use crate::use_cases::batch_summary::BatchSummaryUseCase;
use crate::use_cases::error::{AnalyticsError, AnalyticsResult};
use std::sync::Arc;

/// 批次汇总用例实现
pub struct BatchSummaryUseCaseImpl {
    weighings: Arc<dyn WeighingHistory>,
    batches: Arc<dyn BatchDirectory>,
    engine: BatchSummaryEngine,
}

impl BatchSummaryUseCaseImpl {
    pub fn new(weighings: Arc<dyn WeighingHistory>, batches: Arc<dyn BatchDirectory>) -> Self {
        Self {
            weighings,
            batches,
            engine: BatchSummaryEngine::new(),
        }
    }
}

impl BatchSummaryUseCase for BatchSummaryUseCaseImpl {
    fn get_batch_summary(&self, batch_id: i64) -> AnalyticsResult<BatchSummary> {
        let _perf = PerfGuard::new("get_batch_summary");

        let batch = self
            .batches
            .find_batch(batch_id)?
            .ok_or_else(|| AnalyticsError::not_found("Batch", batch_id))?;

        let records = self.weighings.get_weighings_for_batch(batch.id)?;
        let summary = self.engine.summarize(batch.id, &records);

        tracing::info!(
            batch_id,
            batch_name = %batch.name,
            weighing_count = summary.weighing_count,
            "批次汇总完成"
        );
        Ok(summary)
    }
}
