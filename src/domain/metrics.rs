// ==========================================
// 牲畜称重管理系统 - 派生指标
// ==========================================
// 职责: 引擎输出的只读指标记录
// 红线: 派生指标按需重算,核心层不落库
// ==========================================

use crate::domain::animal::Animal;
use crate::domain::types::HealthSeverity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// GrowthMetrics - 增重指标
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthMetrics {
    pub first_weight_kg: f64,
    pub latest_weight_kg: f64,
    pub total_gain_kg: f64,    // 可为负 (掉重)
    pub total_days: i64,       // 首末称重间隔整天数 (向下取整)
    pub avg_daily_gain_kg: f64, // total_days == 0 时为 0
    pub weighing_count: usize,
    pub first_weighed_at: Option<DateTime<Utc>>,
    pub latest_weighed_at: Option<DateTime<Utc>>,
}

impl GrowthMetrics {
    /// 空序列的退化结果（全部为 0）
    pub fn empty() -> Self {
        Self {
            first_weight_kg: 0.0,
            latest_weight_kg: 0.0,
            total_gain_kg: 0.0,
            total_days: 0,
            avg_daily_gain_kg: 0.0,
            weighing_count: 0,
            first_weighed_at: None,
            latest_weighed_at: None,
        }
    }

    /// 是否可计算增重（至少两次称重）
    pub fn has_gain(&self) -> bool {
        self.weighing_count >= 2
    }
}

/// 单只动物的增重指标
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimalGrowth {
    pub animal_id: i64,
    pub metrics: GrowthMetrics,
}

// ==========================================
// HealthFlag - 掉重预警
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthFlag {
    pub animal_id: i64,
    pub weighing_id: i64,          // 触发预警的 (后一次) 称重
    pub timestamp: DateTime<Utc>,
    pub weight_change_kg: f64,     // 负数
    pub loss_percent: f64,         // 掉重幅度占前次体重百分比 (正数)
    pub severity: HealthSeverity,
    pub consecutive_loss_count: u32,
}

impl HealthFlag {
    /// 连续掉重次数达到阈值时需升级关注
    pub fn needs_escalation(&self, consecutive_threshold: u32) -> bool {
        self.severity == HealthSeverity::Severe
            || (consecutive_threshold > 0 && self.consecutive_loss_count >= consecutive_threshold)
    }
}

/// 单只动物的健康汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthSummary {
    pub animal_id: i64,
    pub flag_count: usize,
    pub minor_count: usize,
    pub moderate_count: usize,
    pub severe_count: usize,
    pub max_consecutive_losses: u32,
    pub needs_escalation: bool,
}

impl HealthSummary {
    pub fn new(animal_id: i64) -> Self {
        Self {
            animal_id,
            flag_count: 0,
            minor_count: 0,
            moderate_count: 0,
            severe_count: 0,
            max_consecutive_losses: 0,
            needs_escalation: false,
        }
    }

    /// 是否存在任何预警
    pub fn is_flagged(&self) -> bool {
        self.flag_count > 0
    }
}

// ==========================================
// FeedPerformanceMetric - 饲料表现
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedPerformanceMetric {
    pub feed_type: String,
    pub feed_brand: Option<String>,
    pub animal_count: usize,
    pub avg_adg_kg_per_day: f64,
    pub avg_total_gain_kg: f64,
    pub avg_days_on_feed: f64,
    pub performance_rank: usize, // 1 为最优; 未排名前为 0
}

/// 饲料对比结果 (已排名, 按 performance_rank 升序)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedComparisonResult {
    pub metrics: Vec<FeedPerformanceMetric>,
}

impl FeedComparisonResult {
    /// 表现最优的饲料
    pub fn best(&self) -> Option<&FeedPerformanceMetric> {
        self.metrics.first()
    }

    /// 按饲料类型查询
    pub fn get(&self, feed_type: &str) -> Option<&FeedPerformanceMetric> {
        self.metrics.iter().find(|m| m.feed_type == feed_type)
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}

// ==========================================
// ReadyToSellResult - 出栏评估
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadyToSellResult {
    pub animal: Animal,
    pub current_weight_kg: f64,
    pub target_weight_kg: f64,
    pub last_weighed_at: DateTime<Utc>,
    pub progress_percent: f64, // 不截断, >100 表示已超目标
    pub remaining_kg: f64,     // max(0, target - current)
}

impl ReadyToSellResult {
    /// 是否达到出栏目标
    pub fn is_ready(&self) -> bool {
        self.progress_percent >= 100.0
    }
}

// ==========================================
// BatchSummary - 批次汇总
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub batch_id: i64,
    pub weighing_count: usize,
    pub animal_count: usize,
    pub total_weight_kg: f64,
    pub avg_weight_kg: f64,
    pub min_weight_kg: f64,
    pub max_weight_kg: f64,
    pub first_weighed_at: Option<DateTime<Utc>>,
    pub last_weighed_at: Option<DateTime<Utc>>,
}

impl BatchSummary {
    pub fn empty(batch_id: i64) -> Self {
        Self {
            batch_id,
            weighing_count: 0,
            animal_count: 0,
            total_weight_kg: 0.0,
            avg_weight_kg: 0.0,
            min_weight_kg: 0.0,
            max_weight_kg: 0.0,
            first_weighed_at: None,
            last_weighed_at: None,
        }
    }
}
