// ==========================================
// 牲畜称重管理系统 - 引擎层
// ==========================================
// 职责: 称重序列 -> 派生指标 (增重/健康/饲料/出栏/批次)
// 红线: Engine 不拼 SQL, 不做 I/O, 纯函数且无共享可变状态
// ==========================================

pub mod batch_summary;
pub mod chronology;
pub mod feed_performance;
pub mod growth;
pub mod health;
pub mod ready_to_sell;

// 重导出核心引擎
pub use batch_summary::BatchSummaryEngine;
pub use feed_performance::FeedPerformanceAggregator;
pub use growth::GrowthEngine;
pub use health::{HealthEngine, HealthFlagIter, HealthThresholds};
pub use ready_to_sell::{ReadyToSellEvaluator, SaleCandidate};
