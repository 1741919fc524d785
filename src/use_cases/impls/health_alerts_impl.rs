// ==========================================
// 牲畜称重管理系统 - 健康预警用例实现
// ==========================================

use crate::domain::date_range::DateRange;
use crate::domain::metrics::{HealthFlag, HealthSummary};
use crate::engine::{HealthEngine, HealthThresholds};
use crate::perf::PerfGuard;
use crate::repository::history::{AnimalDirectory, WeighingHistory, WeighingsByAnimal};
use crate::use_cases::error::{AnalyticsError, AnalyticsResult};
use crate::use_cases::health_alerts::HealthAlertUseCase;
use crate::use_cases::AnalyticsResponse;
use std::sync::Arc;

/// 健康预警用例实现
pub struct HealthAlertUseCaseImpl {
    weighings: Arc<dyn WeighingHistory>,
    animals: Arc<dyn AnimalDirectory>,
    engine: HealthEngine,
    escalation_consecutive_losses: u32,
}

impl HealthAlertUseCaseImpl {
    /// # 参数
    /// - `thresholds`: 掉重分级阈值
    /// - `escalation_consecutive_losses`: 连续掉重升级阈值
    pub fn new(
        weighings: Arc<dyn WeighingHistory>,
        animals: Arc<dyn AnimalDirectory>,
        thresholds: HealthThresholds,
        escalation_consecutive_losses: u32,
    ) -> AnalyticsResult<Self> {
        thresholds.validate().map_err(AnalyticsError::Config)?;

        Ok(Self {
            weighings,
            animals,
            engine: HealthEngine::new(thresholds),
            escalation_consecutive_losses,
        })
    }
}

impl HealthAlertUseCase for HealthAlertUseCaseImpl {
    fn get_animal_alerts(&self, animal_id: i64) -> AnalyticsResult<Vec<HealthFlag>> {
        let _perf = PerfGuard::new("get_animal_alerts");

        if self.animals.find_animal(animal_id)?.is_none() {
            return Err(AnalyticsError::not_found("Animal", animal_id));
        }

        let records = self.weighings.get_weighings_for_animal(animal_id)?;
        Ok(self.engine.detect(&records).collect())
    }

    fn get_herd_health(
        &self,
        tenant_id: &str,
        date_range: Option<&DateRange>,
    ) -> AnalyticsResult<AnalyticsResponse<HealthSummary>> {
        let _perf = PerfGuard::new("get_herd_health").tenant(tenant_id);

        let mut by_animal = WeighingsByAnimal::new();
        for record in self.weighings.get_weighings_for_tenant(tenant_id, date_range)? {
            by_animal.entry(record.animal_id).or_default().push(record);
        }

        let mut items: Vec<HealthSummary> = by_animal
            .iter()
            .map(|(animal_id, records)| {
                self.engine.summarize(
                    *animal_id,
                    self.engine.detect(records),
                    self.escalation_consecutive_losses,
                )
            })
            .filter(HealthSummary::is_flagged)
            .collect();

        // 需升级的排前; 同组内 animal_id 升序 (稳定排序)
        items.sort_by_key(|s| !s.needs_escalation);

        let escalated = items.iter().filter(|s| s.needs_escalation).count();
        if escalated > 0 {
            tracing::warn!(tenant_id, escalated, "存在需升级处理的掉重预警");
        }
        tracing::info!(
            tenant_id,
            animal_count = by_animal.len(),
            flagged_count = items.len(),
            "全群健康预警汇总完成"
        );

        Ok(AnalyticsResponse::new(tenant_id, items))
    }
}
