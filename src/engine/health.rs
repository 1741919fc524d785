// ==========================================
// 牲畜称重管理系统 - 健康预警引擎
// ==========================================
// 职责: 相邻两次称重掉重检测 + 严重度分级 + 连续掉重计数
// 输入: 单只动物称重记录 (顺序不限)
// 输出: HealthFlag 惰性序列 (按后一次称重的时间顺序)
// 红线: 引擎不回写存储, 预警确认状态由外部维护
// ==========================================

use crate::domain::metrics::{HealthFlag, HealthSummary};
use crate::domain::types::HealthSeverity;
use crate::domain::weighing::WeighingRecord;
use crate::engine::chronology::chronological;
use serde::{Deserialize, Serialize};

/// 中度掉重阈值默认值 (%)
pub const DEFAULT_MODERATE_LOSS_PCT: f64 = 3.0;

/// 严重掉重阈值默认值 (%)
pub const DEFAULT_SEVERE_LOSS_PCT: f64 = 7.0;

/// 连续掉重升级阈值默认值 (次)
pub const DEFAULT_ESCALATION_CONSECUTIVE_LOSSES: u32 = 3;

// ==========================================
// HealthThresholds - 严重度阈值
// ==========================================
// 分级 (掉重占前次体重百分比):
// - MINOR:    < moderate_loss_pct
// - MODERATE: [moderate_loss_pct, severe_loss_pct)
// - SEVERE:   >= severe_loss_pct
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthThresholds {
    pub moderate_loss_pct: f64,
    pub severe_loss_pct: f64,
}

impl Default for HealthThresholds {
    fn default() -> Self {
        Self {
            moderate_loss_pct: DEFAULT_MODERATE_LOSS_PCT,
            severe_loss_pct: DEFAULT_SEVERE_LOSS_PCT,
        }
    }
}

impl HealthThresholds {
    /// 校验阈值: 0 < moderate < severe
    pub fn validate(&self) -> Result<(), String> {
        if !(self.moderate_loss_pct > 0.0) {
            return Err(format!(
                "中度掉重阈值必须为正数: {}",
                self.moderate_loss_pct
            ));
        }
        if !(self.severe_loss_pct > self.moderate_loss_pct) {
            return Err(format!(
                "严重掉重阈值({})必须大于中度掉重阈值({})",
                self.severe_loss_pct, self.moderate_loss_pct
            ));
        }
        Ok(())
    }

    /// 按掉重量分级
    ///
    /// 比较在 kg×100 与 kg×pct 上进行,避免先除后乘带来的边界误差
    /// (100kg -> 97kg 恰好 3% 必须判为 MODERATE)。
    pub fn classify(&self, loss_kg: f64, previous_kg: f64) -> HealthSeverity {
        if previous_kg <= 0.0 {
            return HealthSeverity::Severe;
        }

        let scaled_loss = loss_kg * 100.0;
        if scaled_loss >= previous_kg * self.severe_loss_pct {
            HealthSeverity::Severe
        } else if scaled_loss >= previous_kg * self.moderate_loss_pct {
            HealthSeverity::Moderate
        } else {
            HealthSeverity::Minor
        }
    }
}

// ==========================================
// HealthEngine - 健康预警引擎
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct HealthEngine {
    thresholds: HealthThresholds,
}

impl HealthEngine {
    pub fn new(thresholds: HealthThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &HealthThresholds {
        &self.thresholds
    }

    /// 检测掉重预警
    ///
    /// # 参数
    /// - `records`: 单只动物的称重记录
    ///
    /// # 返回
    /// 单遍惰性迭代器; 首条记录无前值, 不产生预警
    pub fn detect<'a>(&self, records: &'a [WeighingRecord]) -> HealthFlagIter<'a> {
        HealthFlagIter {
            ordered: chronological(records).into_iter(),
            previous: None,
            loss_run: 0,
            thresholds: self.thresholds,
        }
    }

    /// 汇总单只动物的预警
    ///
    /// # 参数
    /// - `animal_id`: 动物ID
    /// - `flags`: detect 产出的预警
    /// - `escalation_threshold`: 连续掉重升级阈值 (0 表示不按连续次数升级)
    pub fn summarize<I>(&self, animal_id: i64, flags: I, escalation_threshold: u32) -> HealthSummary
    where
        I: IntoIterator<Item = HealthFlag>,
    {
        let mut summary = HealthSummary::new(animal_id);

        for flag in flags {
            summary.flag_count += 1;
            match flag.severity {
                HealthSeverity::Minor => summary.minor_count += 1,
                HealthSeverity::Moderate => summary.moderate_count += 1,
                HealthSeverity::Severe => summary.severe_count += 1,
            }
            summary.max_consecutive_losses =
                summary.max_consecutive_losses.max(flag.consecutive_loss_count);
            if flag.needs_escalation(escalation_threshold) {
                summary.needs_escalation = true;
            }
        }

        summary
    }
}

// ==========================================
// HealthFlagIter - 掉重预警惰性序列
// ==========================================
pub struct HealthFlagIter<'a> {
    ordered: std::vec::IntoIter<&'a WeighingRecord>,
    previous: Option<&'a WeighingRecord>,
    loss_run: u32,
    thresholds: HealthThresholds,
}

impl<'a> Iterator for HealthFlagIter<'a> {
    type Item = HealthFlag;

    fn next(&mut self) -> Option<HealthFlag> {
        loop {
            let current = self.ordered.next()?;
            let Some(previous) = self.previous.replace(current) else {
                continue;
            };

            let delta = current.weight_kg - previous.weight_kg;
            if delta >= 0.0 {
                // 增重或持平都会中断连续掉重
                self.loss_run = 0;
                continue;
            }

            self.loss_run += 1;
            let loss_kg = -delta;
            let loss_percent = if previous.weight_kg > 0.0 {
                loss_kg / previous.weight_kg * 100.0
            } else {
                100.0
            };

            return Some(HealthFlag {
                animal_id: current.animal_id,
                weighing_id: current.id,
                timestamp: current.timestamp,
                weight_change_kg: delta,
                loss_percent,
                severity: self.thresholds.classify(loss_kg, previous.weight_kg),
                consecutive_loss_count: self.loss_run,
            });
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.ordered.len()))
    }
}

impl std::iter::FusedIterator for HealthFlagIter<'_> {}
