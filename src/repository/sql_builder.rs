// ==========================================
// 牲畜称重管理系统 - SQL 构建与行编解码工具
// ==========================================
// 职责: 动态 WHERE 拼装 + 时间列 (UTC 毫秒) 编解码
// 约束: 过滤值一律走参数绑定, 只拼列名与占位符
// ==========================================

use crate::domain::date_range::DateRange;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, Utc};

/// 构建带可选过滤条件的 SQL 语句
///
/// # 参数
/// - `base_query`: 基础 SELECT 语句（已含 WHERE, 不含 ORDER BY）
/// - `additional_filter`: 可选的额外过滤条件（例如: "w.weighed_at_ms >= ?2"）
/// - `order_by_clause`: ORDER BY 子句
pub fn build_optional_filter_sql(
    base_query: &str,
    additional_filter: Option<&str>,
    order_by_clause: &str,
) -> String {
    if let Some(filter) = additional_filter {
        format!("{} AND {} ORDER BY {}", base_query, filter, order_by_clause)
    } else {
        format!("{} ORDER BY {}", base_query, order_by_clause)
    }
}

/// 日期闭区间过滤片段: column >= ?start AND column < ?end_exclusive
///
/// # 参数
/// - `column`: 毫秒时间列名
/// - `first_param`: 起始占位符序号
pub fn build_millis_range_filter(column: &str, first_param: usize) -> String {
    format!(
        "{col} >= ?{a} AND {col} < ?{b}",
        col = column,
        a = first_param,
        b = first_param + 1
    )
}

/// 日期闭区间 -> [start_ms, end_exclusive_ms)
pub fn range_to_millis(range: &DateRange) -> RepositoryResult<(i64, i64)> {
    let start = range
        .start
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp_millis());
    let end_exclusive = range
        .end
        .succ_opt()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis());

    match (start, end_exclusive) {
        (Some(s), Some(e)) => Ok((s, e)),
        _ => Err(RepositoryError::ValidationError(format!(
            "日期范围超出可表示区间: {}",
            range
        ))),
    }
}

/// UTC 时间 -> 毫秒
pub fn utc_to_millis(at: &DateTime<Utc>) -> i64 {
    at.timestamp_millis()
}

/// 毫秒 -> UTC 时间
pub fn millis_to_utc(field: &str, ms: i64) -> RepositoryResult<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(ms).ok_or_else(|| RepositoryError::FieldValueError {
        field: field.to_string(),
        message: format!("无效的毫秒时间戳: {}", ms),
    })
}
