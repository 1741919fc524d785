// ==========================================
// 牲畜称重管理系统 - 配置层
// ==========================================
// 职责: 系统配置管理,支持租户级覆写
// 存储: config_kv 表
// ==========================================

pub mod analytics_config;
pub mod config_manager;

// 重导出核心配置管理器
pub use analytics_config::AnalyticsConfig;
pub use config_manager::{config_keys, ConfigManager, ConfigScope, GLOBAL_SCOPE};
