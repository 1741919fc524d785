// ==========================================
// 牲畜称重管理系统 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为 (外键/busy_timeout)
// - 提供开发与测试用的最小建表 (非迁移系统)
// ==========================================

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 当前代码所期望的 schema_version
pub const CURRENT_SCHEMA_VERSION: i64 = 1;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要“每个连接”单独开启
/// - busy_timeout 需要“每个连接”单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 创建仓储层使用的表 (幂等)
///
/// 时间统一存为 UTC 毫秒整数, 保证按列排序即为时间序。
pub fn ensure_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS config_kv (
            scope_id TEXT NOT NULL,
            key TEXT NOT NULL,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (scope_id, key)
        );

        CREATE TABLE IF NOT EXISTS animal (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            tenant_id TEXT NOT NULL,
            tag TEXT NOT NULL,
            name TEXT,
            status TEXT NOT NULL DEFAULT 'ACTIVE',
            target_weight_kg REAL,
            created_at_ms INTEGER NOT NULL,
            UNIQUE (tenant_id, tag)
        );

        CREATE TABLE IF NOT EXISTS batch (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            tenant_id TEXT NOT NULL,
            name TEXT NOT NULL,
            session_date TEXT NOT NULL,
            notes TEXT
        );

        CREATE TABLE IF NOT EXISTS weighing (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            tenant_id TEXT NOT NULL,
            animal_id INTEGER NOT NULL REFERENCES animal(id),
            batch_id INTEGER NOT NULL REFERENCES batch(id),
            weight_kg REAL NOT NULL CHECK (weight_kg > 0),
            weighed_at_ms INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_weighing_animal_time
            ON weighing (animal_id, weighed_at_ms, id);
        CREATE INDEX IF NOT EXISTS idx_weighing_tenant_time
            ON weighing (tenant_id, weighed_at_ms, id);

        CREATE TABLE IF NOT EXISTS weighing_custom_field (
            weighing_id INTEGER NOT NULL REFERENCES weighing(id) ON DELETE CASCADE,
            field_key TEXT NOT NULL,
            field_value TEXT NOT NULL,
            PRIMARY KEY (weighing_id, field_key)
        );
        "#,
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [CURRENT_SCHEMA_VERSION],
    )?;
    Ok(())
}

/// 读取 schema_version（若表不存在则返回 None）
pub fn read_schema_version(conn: &Connection) -> rusqlite::Result<Option<i64>> {
    let has_table: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version' LIMIT 1",
            [],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);

    if !has_table {
        return Ok(None);
    }

    let v: Option<i64> = conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(v)
}
