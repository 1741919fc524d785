// ==========================================
// 牲畜称重管理系统 - 领域类型定义
// ==========================================
// 职责: 动物状态、健康预警等级等枚举
// 序列化格式: SCREAMING_SNAKE_CASE (与数据库一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 动物状态 (Animal Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnimalStatus {
    Active,   // 在栏
    Sold,     // 已出售
    Deceased, // 死亡
    Archived, // 归档
}

impl fmt::Display for AnimalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}

impl AnimalStatus {
    /// 从数据库字符串解析状态（未知值返回 None）
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "ACTIVE" => Some(AnimalStatus::Active),
            "SOLD" => Some(AnimalStatus::Sold),
            "DECEASED" => Some(AnimalStatus::Deceased),
            "ARCHIVED" => Some(AnimalStatus::Archived),
            _ => None,
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            AnimalStatus::Active => "ACTIVE",
            AnimalStatus::Sold => "SOLD",
            AnimalStatus::Deceased => "DECEASED",
            AnimalStatus::Archived => "ARCHIVED",
        }
    }
}

// ==========================================
// 掉重严重度 (Health Severity)
// ==========================================
// 顺序: Minor < Moderate < Severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthSeverity {
    Minor,    // 轻微
    Moderate, // 中度
    Severe,   // 严重
}

impl fmt::Display for HealthSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthSeverity::Minor => write!(f, "MINOR"),
            HealthSeverity::Moderate => write!(f, "MODERATE"),
            HealthSeverity::Severe => write!(f, "SEVERE"),
        }
    }
}
