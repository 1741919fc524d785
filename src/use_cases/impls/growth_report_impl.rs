// ==========================================
// 牲畜称重管理系统 - 增重报告用例实现
// ==========================================

use crate::domain::date_range::DateRange;
use crate::domain::metrics::AnimalGrowth;
use crate::engine::GrowthEngine;
use crate::perf::PerfGuard;
use crate::repository::history::{AnimalDirectory, WeighingHistory};
use crate::use_cases::error::{AnalyticsError, AnalyticsResult};
use crate::use_cases::growth_report::GrowthReportUseCase;
use crate::use_cases::AnalyticsResponse;
use std::sync::Arc;

/// 增重报告用例实现
pub struct GrowthReportUseCaseImpl {
    weighings: Arc<dyn WeighingHistory>,
    animals: Arc<dyn AnimalDirectory>,
    engine: GrowthEngine,
}

impl GrowthReportUseCaseImpl {
    pub fn new(weighings: Arc<dyn WeighingHistory>, animals: Arc<dyn AnimalDirectory>) -> Self {
        Self {
            weighings,
            animals,
            engine: GrowthEngine::new(),
        }
    }
}

impl GrowthReportUseCase for GrowthReportUseCaseImpl {
    fn get_animal_growth(&self, animal_id: i64) -> AnalyticsResult<AnimalGrowth> {
        let _perf = PerfGuard::new("get_animal_growth");

        if self.animals.find_animal(animal_id)?.is_none() {
            return Err(AnalyticsError::not_found("Animal", animal_id));
        }

        let records = self.weighings.get_weighings_for_animal(animal_id)?;
        Ok(AnimalGrowth {
            animal_id,
            metrics: self.engine.calculate(&records),
        })
    }

    fn get_herd_growth(
        &self,
        tenant_id: &str,
        date_range: Option<&DateRange>,
    ) -> AnalyticsResult<AnalyticsResponse<AnimalGrowth>> {
        let _perf = PerfGuard::new("get_herd_growth").tenant(tenant_id);

        let records = self.weighings.get_weighings_for_tenant(tenant_id, date_range)?;
        let items = self.engine.calculate_many(&records);

        tracing::info!(
            tenant_id,
            weighing_count = records.len(),
            animal_count = items.len(),
            "全群增重计算完成"
        );
        Ok(AnalyticsResponse::new(tenant_id, items))
    }
}
