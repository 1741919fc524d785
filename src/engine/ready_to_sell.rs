// ==========================================
// 牲畜称重管理系统 - 出栏评估引擎
// ==========================================
// 职责: 最近体重 vs 目标体重 -> 进度/剩余
// 红线: 进度不截断 (>100 表示超目标); "是否出栏"由调用方按阈值过滤
// ==========================================

use crate::domain::animal::Animal;
use crate::domain::metrics::ReadyToSellResult;
use crate::domain::weighing::WeighingRecord;
use crate::engine::chronology::latest;

/// 出栏候选: 动物 + 最近一次称重
#[derive(Debug, Clone, PartialEq)]
pub struct SaleCandidate {
    pub animal: Animal,
    pub latest_weighing: Option<WeighingRecord>,
}

// ==========================================
// ReadyToSellEvaluator - 出栏评估引擎
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ReadyToSellEvaluator {
    // 无状态引擎
}

impl ReadyToSellEvaluator {
    pub fn new() -> Self {
        Self {}
    }

    /// 评估单只动物
    ///
    /// # 返回
    /// - None: 未设置目标体重 (不以 0 冒充真实数据)
    pub fn evaluate_one(
        &self,
        animal: &Animal,
        latest_weighing: &WeighingRecord,
    ) -> Option<ReadyToSellResult> {
        let target = animal.effective_target_kg()?;
        let current = latest_weighing.weight_kg;

        Some(ReadyToSellResult {
            animal: animal.clone(),
            current_weight_kg: current,
            target_weight_kg: target,
            last_weighed_at: latest_weighing.timestamp,
            // 先乘后除
            progress_percent: current * 100.0 / target,
            remaining_kg: (target - current).max(0.0),
        })
    }

    /// 以完整称重历史评估单只动物 (自行取最近一次称重)
    pub fn evaluate_history(
        &self,
        animal: &Animal,
        history: &[WeighingRecord],
    ) -> Option<ReadyToSellResult> {
        let latest_weighing = latest(history)?;
        self.evaluate_one(animal, latest_weighing)
    }

    /// 批量评估; 无称重或无目标的候选不产生结果
    pub fn evaluate(&self, candidates: &[SaleCandidate]) -> Vec<ReadyToSellResult> {
        candidates
            .iter()
            .filter_map(|c| {
                c.latest_weighing
                    .as_ref()
                    .and_then(|w| self.evaluate_one(&c.animal, w))
            })
            .collect()
    }

    /// 进度不低于阈值的结果 (100 即"可出栏", 如 90 可用于"临近出栏")
    pub fn approaching(
        results: &[ReadyToSellResult],
        min_progress_percent: f64,
    ) -> Vec<&ReadyToSellResult> {
        results
            .iter()
            .filter(|r| r.progress_percent >= min_progress_percent)
            .collect()
    }
}
