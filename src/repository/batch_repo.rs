// ==========================================
// 牲畜称重管理系统 - 称重批次数据仓储
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::animal::Batch;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::history::BatchDirectory;
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

pub struct BatchRepository {
    conn: Arc<Mutex<Connection>>,
}

impl BatchRepository {
    /// 创建新的 BatchRepository 实例
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 新建称重批次
    pub fn insert(
        &self,
        tenant_id: &str,
        name: &str,
        session_date: NaiveDate,
        notes: Option<&str>,
    ) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO batch (tenant_id, name, session_date, notes) VALUES (?1, ?2, ?3, ?4)",
            params![tenant_id, name, session_date.to_string(), notes],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// 租户内全部批次 (按作业日期升序)
    pub fn list_for_tenant(&self, tenant_id: &str) -> RepositoryResult<Vec<Batch>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, tenant_id, name, session_date, notes
            FROM batch
            WHERE tenant_id = ?1
            ORDER BY session_date, id
            "#,
        )?;
        let rows = stmt.query_map(params![tenant_id], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, Option<String>>(4)?,
            ))
        })?;

        let mut batches = Vec::new();
        for row in rows {
            let (id, tenant_id, name, session_date, notes) = row?;
            batches.push(Batch {
                id,
                tenant_id,
                name,
                session_date: parse_session_date(&session_date)?,
                notes,
            });
        }
        Ok(batches)
    }
}

impl BatchDirectory for BatchRepository {
    fn find_batch(&self, batch_id: i64) -> RepositoryResult<Option<Batch>> {
        let row = {
            let conn = self.get_conn()?;
            conn.query_row(
                "SELECT id, tenant_id, name, session_date, notes FROM batch WHERE id = ?1",
                params![batch_id],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, Option<String>>(4)?,
                    ))
                },
            )
            .optional()?
        };

        match row {
            Some((id, tenant_id, name, session_date, notes)) => Ok(Some(Batch {
                id,
                tenant_id,
                name,
                session_date: parse_session_date(&session_date)?,
                notes,
            })),
            None => Ok(None),
        }
    }
}

fn parse_session_date(raw: &str) -> RepositoryResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| RepositoryError::FieldValueError {
        field: "session_date".to_string(),
        message: format!("{} ({})", e, raw),
    })
}
