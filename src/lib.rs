// ==========================================
// 牲畜称重管理系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 称重历史 -> 增重/健康/饲料/出栏分析
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与派生指标
pub mod domain;

// 引擎层 - 纯计算
pub mod engine;

// 数据仓储层 - 数据访问
pub mod repository;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一/建表）
pub mod db;

// 日志系统
pub mod logging;

// 性能统计
pub mod perf;

// 用例层 - 分析用例
pub mod use_cases;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{AnimalStatus, HealthSeverity};

// 领域实体
pub use domain::{
    Animal, AnimalGrowth, Batch, BatchSummary, DateRange, FeedComparisonResult,
    FeedPerformanceMetric, FeedTag, FeedTagKeys, GrowthMetrics, HealthFlag, HealthSummary,
    ReadyToSellResult, WeighingRecord,
};

// 引擎
pub use engine::{
    BatchSummaryEngine, FeedPerformanceAggregator, GrowthEngine, HealthEngine, HealthThresholds,
    ReadyToSellEvaluator,
};

// 配置
pub use config::{AnalyticsConfig, ConfigManager};

// 用例
pub use use_cases::{AnalyticsError, AnalyticsResponse, AnalyticsResult};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "牲畜称重管理系统";
