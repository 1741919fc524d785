// ==========================================
// 牲畜称重管理系统 - 日期范围
// ==========================================
// 口径: 闭区间 [start, end], 按称重时间的 UTC 日期比较
// ==========================================

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// 创建日期范围
    ///
    /// # 返回
    /// - Err: start 晚于 end
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, String> {
        if start > end {
            return Err(format!("日期范围无效: start={} 晚于 end={}", start, end));
        }
        Ok(Self { start, end })
    }

    /// 判断时间点是否落在范围内（含两端）
    pub fn contains(&self, at: &DateTime<Utc>) -> bool {
        let day = at.date_naive();
        day >= self.start && day <= self.end
    }

    /// 可选范围判断: None 表示不限
    pub fn admits(range: Option<&DateRange>, at: &DateTime<Utc>) -> bool {
        range.map(|r| r.contains(at)).unwrap_or(true)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}
