// ==========================================
// 牲畜称重管理系统 - 称重记录数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 约束: 所有查询使用参数化
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::date_range::DateRange;
use crate::domain::weighing::{CustomFields, FeedTagKeys, WeighingRecord};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::history::{WeighingHistory, WeighingsByAnimal};
use crate::repository::sql_builder::{
    build_millis_range_filter, build_optional_filter_sql, millis_to_utc, range_to_millis,
    utc_to_millis,
};
use chrono::{DateTime, Utc};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

const SELECT_WEIGHING_WITH_FIELDS: &str = r#"
    SELECT
        w.id, w.tenant_id, w.animal_id, w.batch_id, w.weight_kg, w.weighed_at_ms,
        f.field_key, f.field_value
    FROM weighing w
    LEFT JOIN weighing_custom_field f ON f.weighing_id = w.id
"#;

const ORDER_CHRONOLOGICAL: &str = "w.weighed_at_ms, w.id, f.field_key";

/// 新称重记录 (仅用于录入/测试数据准备)
#[derive(Debug, Clone)]
pub struct NewWeighing {
    pub tenant_id: String,
    pub animal_id: i64,
    pub batch_id: i64,
    pub weight_kg: f64,
    pub timestamp: DateTime<Utc>,
    pub custom_fields: CustomFields,
}

/// 查询结果行 (称重 + 至多一个自定义字段)
struct WeighingRow {
    id: i64,
    tenant_id: String,
    animal_id: i64,
    batch_id: i64,
    weight_kg: f64,
    weighed_at_ms: i64,
    field_key: Option<String>,
    field_value: Option<String>,
}

// ==========================================
// WeighingRepository - 称重记录仓储
// ==========================================
pub struct WeighingRepository {
    conn: Arc<Mutex<Connection>>,
    feed_keys: FeedTagKeys,
}

impl WeighingRepository {
    /// 创建新的 WeighingRepository 实例
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self::from_connection(Arc::new(Mutex::new(conn))))
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self {
            conn,
            feed_keys: FeedTagKeys::default(),
        }
    }

    /// 使用自定义的饲料标签字段键
    pub fn with_feed_keys(mut self, feed_keys: FeedTagKeys) -> Self {
        self.feed_keys = feed_keys;
        self
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 录入称重 (含自定义字段, 单事务)
    ///
    /// # 返回
    /// - Ok(i64): 新称重ID
    pub fn insert(&self, weighing: &NewWeighing) -> RepositoryResult<i64> {
        if !(weighing.weight_kg > 0.0) {
            return Err(RepositoryError::FieldValueError {
                field: "weight_kg".to_string(),
                message: format!("体重必须为正数: {}", weighing.weight_kg),
            });
        }

        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        tx.execute(
            r#"
            INSERT INTO weighing (tenant_id, animal_id, batch_id, weight_kg, weighed_at_ms)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                weighing.tenant_id,
                weighing.animal_id,
                weighing.batch_id,
                weighing.weight_kg,
                utc_to_millis(&weighing.timestamp),
            ],
        )?;
        let weighing_id = tx.last_insert_rowid();

        for (key, value) in &weighing.custom_fields {
            tx.execute(
                "INSERT INTO weighing_custom_field (weighing_id, field_key, field_value) VALUES (?1, ?2, ?3)",
                params![weighing_id, key, value],
            )?;
        }

        tx.commit()?;
        Ok(weighing_id)
    }

    /// 执行查询并把 (称重 × 字段) 行折叠为称重记录
    fn query_weighings(
        &self,
        where_clause: &str,
        extra_filter: Option<&str>,
        params: Vec<Value>,
    ) -> RepositoryResult<Vec<WeighingRecord>> {
        let sql = build_optional_filter_sql(
            &format!("{} WHERE {}", SELECT_WEIGHING_WITH_FIELDS, where_clause),
            extra_filter,
            ORDER_CHRONOLOGICAL,
        );

        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(params), |row| {
            Ok(WeighingRow {
                id: row.get(0)?,
                tenant_id: row.get(1)?,
                animal_id: row.get(2)?,
                batch_id: row.get(3)?,
                weight_kg: row.get(4)?,
                weighed_at_ms: row.get(5)?,
                field_key: row.get(6)?,
                field_value: row.get(7)?,
            })
        })?;

        let mut records: Vec<WeighingRecord> = Vec::new();
        for row in rows {
            let row = row?;
            let same_as_last = records.last().map(|r| r.id == row.id).unwrap_or(false);
            if !same_as_last {
                records.push(WeighingRecord {
                    id: row.id,
                    tenant_id: row.tenant_id,
                    animal_id: row.animal_id,
                    batch_id: row.batch_id,
                    weight_kg: row.weight_kg,
                    timestamp: millis_to_utc("weighed_at_ms", row.weighed_at_ms)?,
                    custom_fields: CustomFields::new(),
                });
            }

            if let (Some(key), Some(value), Some(record)) =
                (row.field_key, row.field_value, records.last_mut())
            {
                record.custom_fields.insert(key, value);
            }
        }

        Ok(records)
    }

    /// 可选日期范围 -> (过滤片段, 追加参数)
    fn range_filter(
        range: Option<&DateRange>,
        first_param: usize,
    ) -> RepositoryResult<(Option<String>, Vec<Value>)> {
        match range {
            Some(r) => {
                let (start_ms, end_ms) = range_to_millis(r)?;
                Ok((
                    Some(build_millis_range_filter("w.weighed_at_ms", first_param)),
                    vec![Value::Integer(start_ms), Value::Integer(end_ms)],
                ))
            }
            None => Ok((None, Vec::new())),
        }
    }
}

impl WeighingHistory for WeighingRepository {
    fn get_weighings_for_animal(&self, animal_id: i64) -> RepositoryResult<Vec<WeighingRecord>> {
        self.query_weighings("w.animal_id = ?1", None, vec![Value::Integer(animal_id)])
    }

    fn get_weighings_for_feed_type(
        &self,
        tenant_id: &str,
        feed_type: &str,
        date_range: Option<&DateRange>,
    ) -> RepositoryResult<WeighingsByAnimal> {
        // SQL 只按字段键预筛; 值的空白归一与匹配统一交给 FeedTagKeys
        let where_clause = r#"
            w.tenant_id = ?1
            AND EXISTS (
                SELECT 1 FROM weighing_custom_field ff
                WHERE ff.weighing_id = w.id AND ff.field_key = ?2
            )
        "#;
        let (filter, range_params) = Self::range_filter(date_range, 3)?;

        let mut params = vec![
            Value::Text(tenant_id.to_string()),
            Value::Text(self.feed_keys.feed_type_key.clone()),
        ];
        params.extend(range_params);

        let records = self.query_weighings(where_clause, filter.as_deref(), params)?;

        let mut grouped = WeighingsByAnimal::new();
        for record in records
            .into_iter()
            .filter(|r| self.feed_keys.matches(&r.custom_fields, feed_type))
        {
            grouped.entry(record.animal_id).or_default().push(record);
        }
        Ok(grouped)
    }

    fn get_weighings_for_tenant(
        &self,
        tenant_id: &str,
        date_range: Option<&DateRange>,
    ) -> RepositoryResult<Vec<WeighingRecord>> {
        let (filter, range_params) = Self::range_filter(date_range, 2)?;
        let mut params = vec![Value::Text(tenant_id.to_string())];
        params.extend(range_params);

        self.query_weighings("w.tenant_id = ?1", filter.as_deref(), params)
    }

    fn get_weighings_for_batch(&self, batch_id: i64) -> RepositoryResult<Vec<WeighingRecord>> {
        self.query_weighings("w.batch_id = ?1", None, vec![Value::Integer(batch_id)])
    }

    fn get_latest_weighing(&self, animal_id: i64) -> RepositoryResult<Option<WeighingRecord>> {
        let latest_id: Option<i64> = self
            .get_conn()?
            .query_row(
                r#"
                SELECT id FROM weighing
                WHERE animal_id = ?1
                ORDER BY weighed_at_ms DESC, id DESC
                LIMIT 1
                "#,
                params![animal_id],
                |row| row.get(0),
            )
            .optional()?;

        match latest_id {
            Some(id) => Ok(self
                .query_weighings("w.id = ?1", None, vec![Value::Integer(id)])?
                .into_iter()
                .next()),
            None => Ok(None),
        }
    }
}
