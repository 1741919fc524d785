// ==========================================
// 牲畜称重管理系统 - 称重批次汇总引擎
// ==========================================
// 职责: 单个称重批次 (一次称重作业) 的统计
// ==========================================

use crate::domain::metrics::BatchSummary;
use crate::domain::weighing::WeighingRecord;
use crate::engine::chronology::bounds;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default)]
pub struct BatchSummaryEngine {
    // 无状态引擎
}

impl BatchSummaryEngine {
    pub fn new() -> Self {
        Self {}
    }

    /// 汇总批次称重
    ///
    /// # 参数
    /// - `batch_id`: 批次ID, 其他批次的记录被忽略
    /// - `records`: 称重记录
    pub fn summarize(&self, batch_id: i64, records: &[WeighingRecord]) -> BatchSummary {
        let in_batch: Vec<&WeighingRecord> =
            records.iter().filter(|r| r.batch_id == batch_id).collect();

        let Some((first, last)) = bounds(in_batch.iter().copied()) else {
            return BatchSummary::empty(batch_id);
        };

        let animals: BTreeSet<i64> = in_batch.iter().map(|r| r.animal_id).collect();
        let total_weight_kg: f64 = in_batch.iter().map(|r| r.weight_kg).sum();
        let min_weight_kg = in_batch
            .iter()
            .map(|r| r.weight_kg)
            .fold(f64::INFINITY, f64::min);
        let max_weight_kg = in_batch
            .iter()
            .map(|r| r.weight_kg)
            .fold(f64::NEG_INFINITY, f64::max);

        BatchSummary {
            batch_id,
            weighing_count: in_batch.len(),
            animal_count: animals.len(),
            total_weight_kg,
            avg_weight_kg: total_weight_kg / in_batch.len() as f64,
            min_weight_kg,
            max_weight_kg,
            first_weighed_at: Some(first.timestamp),
            last_weighed_at: Some(last.timestamp),
        }
    }
}
