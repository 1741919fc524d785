// ==========================================
// 牲畜称重管理系统 - 出栏评估用例实现
// ==========================================

use crate::domain::metrics::ReadyToSellResult;
use crate::engine::{ReadyToSellEvaluator, SaleCandidate};
use crate::perf::PerfGuard;
use crate::repository::history::{AnimalDirectory, WeighingHistory};
use crate::use_cases::error::{AnalyticsError, AnalyticsResult};
use crate::use_cases::ready_to_sell::ReadyToSellUseCase;
use crate::use_cases::AnalyticsResponse;
use std::sync::Arc;

/// 出栏评估用例实现
pub struct ReadyToSellUseCaseImpl {
    weighings: Arc<dyn WeighingHistory>,
    animals: Arc<dyn AnimalDirectory>,
    evaluator: ReadyToSellEvaluator,
    ready_threshold_pct: f64,
    approaching_threshold_pct: f64,
}

impl ReadyToSellUseCaseImpl {
    /// # 参数
    /// - `ready_threshold_pct`: 可出栏进度阈值 (通常 100)
    /// - `approaching_threshold_pct`: 临近出栏进度阈值 (不高于可出栏阈值)
    pub fn new(
        weighings: Arc<dyn WeighingHistory>,
        animals: Arc<dyn AnimalDirectory>,
        ready_threshold_pct: f64,
        approaching_threshold_pct: f64,
    ) -> AnalyticsResult<Self> {
        if !(ready_threshold_pct > 0.0)
            || !(approaching_threshold_pct > 0.0)
            || approaching_threshold_pct > ready_threshold_pct
        {
            return Err(AnalyticsError::Config(format!(
                "出栏阈值不合法: ready={}, approaching={}",
                ready_threshold_pct, approaching_threshold_pct
            )));
        }

        Ok(Self {
            weighings,
            animals,
            evaluator: ReadyToSellEvaluator::new(),
            ready_threshold_pct,
            approaching_threshold_pct,
        })
    }

    fn evaluate_all(&self, tenant_id: &str) -> AnalyticsResult<Vec<ReadyToSellResult>> {
        let mut candidates = Vec::new();
        for animal in self.animals.get_animals_with_target_weight(tenant_id)? {
            let latest_weighing = self.weighings.get_latest_weighing(animal.id)?;
            if latest_weighing.is_none() {
                tracing::debug!(tenant_id, animal_id = animal.id, "动物尚无称重, 跳过出栏评估");
            }
            candidates.push(SaleCandidate {
                animal,
                latest_weighing,
            });
        }

        let mut results = self.evaluator.evaluate(&candidates);
        results.sort_by(|a, b| {
            b.progress_percent
                .total_cmp(&a.progress_percent)
                .then_with(|| a.animal.id.cmp(&b.animal.id))
        });

        tracing::info!(
            tenant_id,
            candidate_count = candidates.len(),
            evaluated_count = results.len(),
            "出栏评估完成"
        );
        Ok(results)
    }
}

impl ReadyToSellUseCase for ReadyToSellUseCaseImpl {
    fn evaluate_herd(&self, tenant_id: &str) -> AnalyticsResult<AnalyticsResponse<ReadyToSellResult>> {
        let _perf = PerfGuard::new("evaluate_herd").tenant(tenant_id);
        let results = self.evaluate_all(tenant_id)?;
        Ok(AnalyticsResponse::new(tenant_id, results))
    }

    fn get_ready_animals(&self, tenant_id: &str) -> AnalyticsResult<AnalyticsResponse<ReadyToSellResult>> {
        let _perf = PerfGuard::new("get_ready_animals").tenant(tenant_id);
        let results = self.evaluate_all(tenant_id)?;
        let ready = ReadyToSellEvaluator::approaching(&results, self.ready_threshold_pct)
            .into_iter()
            .cloned()
            .collect();
        Ok(AnalyticsResponse::new(tenant_id, ready))
    }

    fn get_approaching_animals(
        &self,
        tenant_id: &str,
    ) -> AnalyticsResult<AnalyticsResponse<ReadyToSellResult>> {
        let _perf = PerfGuard::new("get_approaching_animals").tenant(tenant_id);
        let results = self.evaluate_all(tenant_id)?;
        let approaching = ReadyToSellEvaluator::approaching(&results, self.approaching_threshold_pct)
            .into_iter()
            .filter(|r| r.progress_percent < self.ready_threshold_pct)
            .cloned()
            .collect();
        Ok(AnalyticsResponse::new(tenant_id, approaching))
    }
}
