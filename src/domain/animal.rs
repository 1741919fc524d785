// ==========================================
// 牲畜称重管理系统 - 动物与称重批次
// ==========================================

use crate::domain::types::AnimalStatus;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// Animal - 动物档案
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animal {
    pub id: i64,
    pub tenant_id: String,
    pub tag: String,                       // 耳标/识别号
    pub name: Option<String>,
    pub status: AnimalStatus,
    pub target_weight_kg: Option<f64>,     // 出栏目标体重
    pub created_at: DateTime<Utc>,
}

impl Animal {
    /// 是否在栏
    pub fn is_active(&self) -> bool {
        self.status == AnimalStatus::Active
    }

    /// 有效目标体重（未设置或非正数视为无目标）
    pub fn effective_target_kg(&self) -> Option<f64> {
        self.target_weight_kg.filter(|t| *t > 0.0)
    }
}

// ==========================================
// Batch - 称重批次 (一次称重作业)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    pub id: i64,
    pub tenant_id: String,
    pub name: String,
    pub session_date: NaiveDate,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animal(target: Option<f64>, status: AnimalStatus) -> Animal {
        Animal {
            id: 1,
            tenant_id: "farm-a".to_string(),
            tag: "A-001".to_string(),
            name: None,
            status,
            target_weight_kg: target,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_effective_target() {
        assert_eq!(animal(Some(500.0), AnimalStatus::Active).effective_target_kg(), Some(500.0));
        assert_eq!(animal(Some(0.0), AnimalStatus::Active).effective_target_kg(), None);
        assert_eq!(animal(None, AnimalStatus::Active).effective_target_kg(), None);
    }

    #[test]
    fn test_is_active() {
        assert!(animal(None, AnimalStatus::Active).is_active());
        assert!(!animal(None, AnimalStatus::Sold).is_active());
    }
}
