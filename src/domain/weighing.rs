// ==========================================
// 牲畜称重管理系统 - 称重记录领域模型
// ==========================================
// 职责: 称重记录 + 自定义字段 + 饲料标签提取
// 红线: 称重记录入库后不可变,引擎只读不写
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 称重自定义字段 (field_key -> value)
pub type CustomFields = BTreeMap<String, String>;

/// 饲料类型保留字段键
pub const FEED_TYPE_FIELD_KEY: &str = "feed_type";

/// 饲料品牌保留字段键
pub const FEED_BRAND_FIELD_KEY: &str = "feed_brand";

// ==========================================
// WeighingRecord - 称重记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeighingRecord {
    pub id: i64,                    // 称重ID (自增, 与录入顺序一致)
    pub tenant_id: String,          // 租户
    pub animal_id: i64,             // 动物ID
    pub batch_id: i64,              // 称重批次ID
    pub weight_kg: f64,             // 体重 (kg)
    pub timestamp: DateTime<Utc>,   // 称重时间
    pub custom_fields: CustomFields, // 自定义字段
}

impl WeighingRecord {
    /// 时间序排序键: 同一时刻按 id (录入顺序) 决胜
    pub fn chrono_key(&self) -> (DateTime<Utc>, i64) {
        (self.timestamp, self.id)
    }

    /// 提取本次称重的饲料标签（保留键默认配置）
    pub fn feed_tag(&self) -> Option<FeedTag> {
        extract_feed_tag(&self.custom_fields)
    }
}

// ==========================================
// FeedTag - 饲料标签
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeedTag {
    pub feed_type: String,
    pub feed_brand: Option<String>,
}

/// 饲料标签所在的自定义字段键
///
/// 全系统唯一依赖保留键约定的地方; 键名可由配置覆写。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedTagKeys {
    pub feed_type_key: String,
    pub feed_brand_key: String,
}

impl Default for FeedTagKeys {
    fn default() -> Self {
        Self {
            feed_type_key: FEED_TYPE_FIELD_KEY.to_string(),
            feed_brand_key: FEED_BRAND_FIELD_KEY.to_string(),
        }
    }
}

impl FeedTagKeys {
    /// 从自定义字段中提取饲料标签
    ///
    /// # 返回
    /// - None: 无饲料类型, 或饲料类型为空白
    /// - Some(FeedTag): 品牌为空白时视为缺省 (None)
    pub fn extract(&self, fields: &CustomFields) -> Option<FeedTag> {
        let feed_type = non_blank(fields.get(&self.feed_type_key))?;
        let feed_brand = non_blank(fields.get(&self.feed_brand_key));

        Some(FeedTag {
            feed_type,
            feed_brand,
        })
    }

    /// 判断自定义字段是否标记为指定饲料类型
    pub fn matches(&self, fields: &CustomFields, feed_type: &str) -> bool {
        self.extract(fields)
            .map(|tag| tag.feed_type == feed_type.trim())
            .unwrap_or(false)
    }
}

/// 使用默认保留键提取饲料标签
pub fn extract_feed_tag(fields: &CustomFields) -> Option<FeedTag> {
    FeedTagKeys::default().extract(fields)
}

fn non_blank(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> CustomFields {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_extract_feed_tag_with_brand() {
        let tag = extract_feed_tag(&fields(&[("feed_type", "Starter"), ("feed_brand", "AgriMax")]))
            .unwrap();
        assert_eq!(tag.feed_type, "Starter");
        assert_eq!(tag.feed_brand.as_deref(), Some("AgriMax"));
    }

    #[test]
    fn test_extract_feed_tag_blank_values() {
        assert!(extract_feed_tag(&fields(&[("feed_type", "   ")])).is_none());
        assert!(extract_feed_tag(&fields(&[("pen", "A3")])).is_none());

        let tag = extract_feed_tag(&fields(&[("feed_type", " Grower "), ("feed_brand", "")]))
            .unwrap();
        assert_eq!(tag.feed_type, "Grower");
        assert!(tag.feed_brand.is_none());
    }

    #[test]
    fn test_custom_keys() {
        let keys = FeedTagKeys {
            feed_type_key: "ration".to_string(),
            feed_brand_key: "supplier".to_string(),
        };
        let f = fields(&[("ration", "Finisher"), ("feed_type", "Starter")]);

        assert!(keys.matches(&f, "Finisher"));
        assert!(!keys.matches(&f, "Starter"));
        assert_eq!(keys.extract(&f).unwrap().feed_brand, None);
    }
}
