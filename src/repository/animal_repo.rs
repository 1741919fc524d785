// ==========================================
// 牲畜称重管理系统 - 动物档案数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::animal::Animal;
use crate::domain::types::AnimalStatus;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::history::AnimalDirectory;
use crate::repository::sql_builder::{millis_to_utc, utc_to_millis};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex};

const SELECT_ANIMAL: &str = r#"
    SELECT id, tenant_id, tag, name, status, target_weight_kg, created_at_ms
    FROM animal
"#;

/// 新动物档案 (仅用于录入/测试数据准备)
#[derive(Debug, Clone)]
pub struct NewAnimal {
    pub tenant_id: String,
    pub tag: String,
    pub name: Option<String>,
    pub status: AnimalStatus,
    pub target_weight_kg: Option<f64>,
    pub created_at: DateTime<Utc>,
}

/// 原始行 (状态/时间待解析)
struct AnimalRow {
    id: i64,
    tenant_id: String,
    tag: String,
    name: Option<String>,
    status: String,
    target_weight_kg: Option<f64>,
    created_at_ms: i64,
}

impl AnimalRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            tenant_id: row.get(1)?,
            tag: row.get(2)?,
            name: row.get(3)?,
            status: row.get(4)?,
            target_weight_kg: row.get(5)?,
            created_at_ms: row.get(6)?,
        })
    }

    fn into_animal(self) -> RepositoryResult<Animal> {
        let status =
            AnimalStatus::from_db_str(&self.status).ok_or_else(|| RepositoryError::FieldValueError {
                field: "status".to_string(),
                message: format!("未知的动物状态: {}", self.status),
            })?;

        Ok(Animal {
            id: self.id,
            tenant_id: self.tenant_id,
            tag: self.tag,
            name: self.name,
            status,
            target_weight_kg: self.target_weight_kg,
            created_at: millis_to_utc("created_at_ms", self.created_at_ms)?,
        })
    }
}

// ==========================================
// AnimalRepository - 动物档案仓储
// ==========================================
pub struct AnimalRepository {
    conn: Arc<Mutex<Connection>>,
}

impl AnimalRepository {
    /// 创建新的 AnimalRepository 实例
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

    /// 录入动物档案
    pub fn insert(&self, animal: &NewAnimal) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO animal (tenant_id, tag, name, status, target_weight_kg, created_at_ms)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                animal.tenant_id,
                animal.tag,
                animal.name,
                animal.status.to_db_str(),
                animal.target_weight_kg,
                utc_to_millis(&animal.created_at),
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// 更新动物状态
    pub fn update_status(&self, animal_id: i64, status: AnimalStatus) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "UPDATE animal SET status = ?1 WHERE id = ?2",
            params![status.to_db_str(), animal_id],
        )?;
        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Animal".to_string(),
                id: animal_id.to_string(),
            });
        }
        Ok(())
    }

    fn query_animals(&self, sql: &str, tenant_id: &str) -> RepositoryResult<Vec<Animal>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map(params![tenant_id], AnimalRow::from_row)?;

        let mut animals = Vec::new();
        for row in rows {
            animals.push(row?.into_animal()?);
        }
        Ok(animals)
    }
}

impl AnimalDirectory for AnimalRepository {
    fn get_animals_with_target_weight(&self, tenant_id: &str) -> RepositoryResult<Vec<Animal>> {
        let sql = format!(
            "{} WHERE tenant_id = ?1 AND status = 'ACTIVE' AND target_weight_kg IS NOT NULL AND target_weight_kg > 0 ORDER BY id",
            SELECT_ANIMAL
        );
        self.query_animals(&sql, tenant_id)
    }

    fn get_active_animals(&self, tenant_id: &str) -> RepositoryResult<Vec<Animal>> {
        let sql = format!(
            "{} WHERE tenant_id = ?1 AND status = 'ACTIVE' ORDER BY id",
            SELECT_ANIMAL
        );
        self.query_animals(&sql, tenant_id)
    }

    fn find_animal(&self, animal_id: i64) -> RepositoryResult<Option<Animal>> {
        let row = {
            let conn = self.get_conn()?;
            conn.query_row(
                &format!("{} WHERE id = ?1", SELECT_ANIMAL),
                params![animal_id],
                AnimalRow::from_row,
            )
            .optional()?
        };

        row.map(AnimalRow::into_animal).transpose()
    }
}
