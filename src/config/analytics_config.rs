// ==========================================
// 牲畜称重管理系统 - 分析参数
// ==========================================
// 职责: 四个分析引擎的可调参数 (健康阈值/饲料字段键/出栏阈值)
// 来源: ConfigManager::load_analytics_config 或 JSON
// ==========================================

use crate::domain::weighing::FeedTagKeys;
use crate::engine::health::{HealthThresholds, DEFAULT_ESCALATION_CONSECUTIVE_LOSSES};
use serde::{Deserialize, Serialize};

/// 默认"可出栏"进度阈值 (%)
pub const DEFAULT_READY_THRESHOLD_PCT: f64 = 100.0;

/// 默认"临近出栏"进度阈值 (%)
pub const DEFAULT_APPROACHING_THRESHOLD_PCT: f64 = 90.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub health: HealthThresholds,
    /// 连续掉重次数达到该值即升级 (0 表示只按严重预警升级)
    pub escalation_consecutive_losses: u32,
    pub feed_keys: FeedTagKeys,
    pub ready_threshold_pct: f64,
    pub approaching_threshold_pct: f64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            health: HealthThresholds::default(),
            escalation_consecutive_losses: DEFAULT_ESCALATION_CONSECUTIVE_LOSSES,
            feed_keys: FeedTagKeys::default(),
            ready_threshold_pct: DEFAULT_READY_THRESHOLD_PCT,
            approaching_threshold_pct: DEFAULT_APPROACHING_THRESHOLD_PCT,
        }
    }
}

impl AnalyticsConfig {
    /// 校验参数组合
    ///
    /// # 返回
    /// - Err(String): 第一条不合法的参数说明
    pub fn validate(&self) -> Result<(), String> {
        self.health.validate()?;

        if self.feed_keys.feed_type_key.trim().is_empty() {
            return Err("饲料类型字段键不能为空".to_string());
        }
        if self.feed_keys.feed_brand_key.trim().is_empty() {
            return Err("饲料品牌字段键不能为空".to_string());
        }
        if self.feed_keys.feed_type_key == self.feed_keys.feed_brand_key {
            return Err(format!(
                "饲料类型与品牌不能使用同一字段键: {}",
                self.feed_keys.feed_type_key
            ));
        }

        if !(self.ready_threshold_pct > 0.0) {
            return Err(format!("出栏阈值必须为正数: {}", self.ready_threshold_pct));
        }
        if !(self.approaching_threshold_pct > 0.0)
            || self.approaching_threshold_pct > self.ready_threshold_pct
        {
            return Err(format!(
                "临近出栏阈值({})必须为正数且不高于出栏阈值({})",
                self.approaching_threshold_pct, self.ready_threshold_pct
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = AnalyticsConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.health.moderate_loss_pct, 3.0);
        assert_eq!(config.health.severe_loss_pct, 7.0);
        assert_eq!(config.ready_threshold_pct, 100.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AnalyticsConfig =
            serde_json::from_str(r#"{"approaching_threshold_pct": 85.0}"#).unwrap();
        assert_eq!(config.approaching_threshold_pct, 85.0);
        assert_eq!(config.feed_keys, FeedTagKeys::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_inverted_health_thresholds() {
        let mut config = AnalyticsConfig::default();
        config.health.severe_loss_pct = 2.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_shared_feed_key() {
        let mut config = AnalyticsConfig::default();
        config.feed_keys.feed_brand_key = config.feed_keys.feed_type_key.clone();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_approaching_above_ready() {
        let mut config = AnalyticsConfig::default();
        config.approaching_threshold_pct = 120.0;
        assert!(config.validate().is_err());
    }
}
