// ==========================================
// 牲畜称重管理系统 - 增重计算引擎
// ==========================================
// 职责: 单只动物称重序列 -> 增重指标
// 输入: 称重记录 (顺序不限)
// 输出: GrowthMetrics
// 红线: 空序列/单条记录返回零值结果,不报错
// ==========================================

use crate::domain::metrics::{AnimalGrowth, GrowthMetrics};
use crate::domain::weighing::WeighingRecord;
use crate::engine::chronology::{average_daily_gain, bounds, whole_days_between};
use std::collections::BTreeMap;

// ==========================================
// GrowthEngine - 增重计算引擎
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct GrowthEngine {
    // 无状态引擎
}

impl GrowthEngine {
    pub fn new() -> Self {
        Self {}
    }

    /// 计算单只动物的增重指标
    ///
    /// # 参数
    /// - `records`: 该动物的称重记录,无需预先排序
    ///
    /// # 返回
    /// - 0 条: 全零结果
    /// - 1 条: first == latest, 增重/天数/日增重均为 0
    /// - 多条: 首末按时间显式求得
    pub fn calculate(&self, records: &[WeighingRecord]) -> GrowthMetrics {
        self.calculate_iter(records)
    }

    /// 对任意称重引用序列计算增重指标（饲料子集复用）
    pub fn calculate_iter<'a, I>(&self, records: I) -> GrowthMetrics
    where
        I: IntoIterator<Item = &'a WeighingRecord>,
        I::IntoIter: Clone,
    {
        let iter = records.into_iter();
        let weighing_count = iter.clone().count();

        let Some((earliest, latest)) = bounds(iter) else {
            return GrowthMetrics::empty();
        };

        let total_gain_kg = latest.weight_kg - earliest.weight_kg;
        let total_days = whole_days_between(earliest.timestamp, latest.timestamp);

        GrowthMetrics {
            first_weight_kg: earliest.weight_kg,
            latest_weight_kg: latest.weight_kg,
            total_gain_kg,
            total_days,
            avg_daily_gain_kg: average_daily_gain(total_gain_kg, total_days),
            weighing_count,
            first_weighed_at: Some(earliest.timestamp),
            latest_weighed_at: Some(latest.timestamp),
        }
    }

    /// 按动物分组计算增重指标
    ///
    /// # 返回
    /// 按 animal_id 升序的增重列表
    pub fn calculate_many(&self, records: &[WeighingRecord]) -> Vec<AnimalGrowth> {
        let mut by_animal: BTreeMap<i64, Vec<&WeighingRecord>> = BTreeMap::new();
        for record in records {
            by_animal.entry(record.animal_id).or_default().push(record);
        }

        by_animal
            .into_iter()
            .map(|(animal_id, animal_records)| AnimalGrowth {
                animal_id,
                metrics: self.calculate_iter(animal_records.iter().copied()),
            })
            .collect()
    }
}
