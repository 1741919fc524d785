// ==========================================
// 牲畜称重管理系统 - 称重时间序工具
// ==========================================
// 职责: 统一称重记录的时间排序与整天数口径
// 红线: 不信任调用方顺序,一律按 (timestamp, id) 显式求序
// ==========================================

use crate::domain::weighing::WeighingRecord;
use chrono::{DateTime, Utc};

/// 按时间升序排列（同一时刻按 id 决胜）
pub fn chronological<'a, I>(records: I) -> Vec<&'a WeighingRecord>
where
    I: IntoIterator<Item = &'a WeighingRecord>,
{
    let mut ordered: Vec<&WeighingRecord> = records.into_iter().collect();
    ordered.sort_by_key(|r| r.chrono_key());
    ordered
}

/// 求最早与最晚的称重记录（单次遍历）
///
/// # 返回
/// - None: 空序列
/// - Some((earliest, latest)): 仅一条记录时两者相同
pub fn bounds<'a, I>(records: I) -> Option<(&'a WeighingRecord, &'a WeighingRecord)>
where
    I: IntoIterator<Item = &'a WeighingRecord>,
{
    let mut iter = records.into_iter();
    let first = iter.next()?;

    Some(iter.fold((first, first), |(earliest, latest), r| {
        let earliest = if r.chrono_key() < earliest.chrono_key() {
            r
        } else {
            earliest
        };
        let latest = if r.chrono_key() > latest.chrono_key() {
            r
        } else {
            latest
        };
        (earliest, latest)
    }))
}

/// 最近一次称重
pub fn latest<'a, I>(records: I) -> Option<&'a WeighingRecord>
where
    I: IntoIterator<Item = &'a WeighingRecord>,
{
    records.into_iter().max_by_key(|r| r.chrono_key())
}

/// 两个时间点之间的整天数（按经过时长截断,不按日历日计数）
pub fn whole_days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_days().max(0)
}

/// 日均增重: days 为 0 时返回 0
pub fn average_daily_gain(total_gain_kg: f64, days: i64) -> f64 {
    if days > 0 {
        total_gain_kg / days as f64
    } else {
        0.0
    }
}
