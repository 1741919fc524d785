// ==========================================
// 牲畜称重管理系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、派生指标
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod animal;
pub mod date_range;
pub mod metrics;
pub mod types;
pub mod weighing;

// 重导出核心类型
pub use animal::{Animal, Batch};
pub use date_range::DateRange;
pub use metrics::{
    AnimalGrowth, BatchSummary, FeedComparisonResult, FeedPerformanceMetric, GrowthMetrics,
    HealthFlag, HealthSummary, ReadyToSellResult,
};
pub use types::{AnimalStatus, HealthSeverity};
pub use weighing::{extract_feed_tag, CustomFields, FeedTag, FeedTagKeys, WeighingRecord};
