// ==========================================
// 牲畜称重管理系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// 查找顺序: 租户 scope -> global -> 内置默认值
// ==========================================

use crate::config::analytics_config::AnalyticsConfig;
use crate::db::open_sqlite_connection;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::error::Error;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

/// 全局作用域 ID
pub const GLOBAL_SCOPE: &str = "global";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：为保证连接行为一致，会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// 读取单个作用域下的配置值
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    fn get_scoped_value(&self, scope: &ConfigScope, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = ?1 AND key = ?2",
                params![scope.scope_id(), key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;

        Ok(value)
    }

    /// 读取配置值: 租户覆写优先, 其次 global
    pub fn get_config_value(&self, tenant_id: &str, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let tenant_scope = ConfigScope::Tenant {
            tenant_id: tenant_id.to_string(),
        };
        if let Some(value) = self.get_scoped_value(&tenant_scope, key)? {
            return Ok(Some(value));
        }
        self.get_scoped_value(&ConfigScope::Global, key)
    }

    /// 读取 global scope 的配置值
    pub fn get_global_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        self.get_scoped_value(&ConfigScope::Global, key)
    }

    /// 写入配置值 (UPSERT)
    pub fn set_config_value(
        &self,
        scope: &ConfigScope,
        key: &str,
        value: &str,
    ) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES (?1, ?2, ?3)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?3, updated_at = datetime('now')",
            params![scope.scope_id(), key, value],
        )?;
        Ok(())
    }

    /// 租户生效配置的快照 (key -> value, 租户覆写已合并)
    pub fn get_config_snapshot(&self, tenant_id: &str) -> Result<String, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let mut stmt = conn.prepare(
            "SELECT scope_id, key, value FROM config_kv WHERE scope_id IN (?1, ?2) ORDER BY key",
        )?;
        let tenant_scope_id = ConfigScope::Tenant {
            tenant_id: tenant_id.to_string(),
        }
        .scope_id();
        let rows = stmt.query_map(params![GLOBAL_SCOPE, tenant_scope_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        let mut global: BTreeMap<String, String> = BTreeMap::new();
        let mut tenant: BTreeMap<String, String> = BTreeMap::new();
        for row in rows {
            let (scope_id, key, value) = row?;
            if scope_id == GLOBAL_SCOPE {
                global.insert(key, value);
            } else {
                tenant.insert(key, value);
            }
        }
        global.extend(tenant);

        Ok(serde_json::to_string(&global)?)
    }

    /// 读取并解析配置值; 格式错误时告警并回退默认值
    fn get_parsed_or_default<T>(&self, tenant_id: &str, key: &str, default: T) -> Result<T, Box<dyn Error>>
    where
        T: FromStr + Copy + std::fmt::Display,
    {
        let raw = match self.get_config_value(tenant_id, key)? {
            Some(v) => v,
            None => return Ok(default),
        };

        match raw.trim().parse::<T>() {
            Ok(v) => Ok(v),
            Err(_) => {
                tracing::warn!(
                    config_key = key,
                    raw_value = %raw,
                    default = %default,
                    "配置值格式错误，使用默认值"
                );
                Ok(default)
            }
        }
    }

    fn get_string_or_default(&self, tenant_id: &str, key: &str, default: &str) -> Result<String, Box<dyn Error>> {
        match self.get_config_value(tenant_id, key)? {
            Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
            Some(v) => {
                tracing::warn!(config_key = key, raw_value = %v, "配置值为空，使用默认值");
                Ok(default.to_string())
            }
            None => Ok(default.to_string()),
        }
    }

    // ===== 分析参数 =====

    /// 加载租户生效的分析参数
    ///
    /// # 返回
    /// - Ok(AnalyticsConfig): 已校验的参数
    /// - Err: 数据库错误, 或参数组合不合法
    pub fn load_analytics_config(&self, tenant_id: &str) -> Result<AnalyticsConfig, Box<dyn Error>> {
        let defaults = AnalyticsConfig::default();
        let mut config = defaults.clone();

        config.health.moderate_loss_pct = self.get_parsed_or_default(
            tenant_id,
            config_keys::HEALTH_MODERATE_LOSS_PCT,
            defaults.health.moderate_loss_pct,
        )?;
        config.health.severe_loss_pct = self.get_parsed_or_default(
            tenant_id,
            config_keys::HEALTH_SEVERE_LOSS_PCT,
            defaults.health.severe_loss_pct,
        )?;
        config.escalation_consecutive_losses = self.get_parsed_or_default(
            tenant_id,
            config_keys::HEALTH_ESCALATION_CONSECUTIVE_LOSSES,
            defaults.escalation_consecutive_losses,
        )?;
        config.feed_keys.feed_type_key = self.get_string_or_default(
            tenant_id,
            config_keys::FEED_TYPE_FIELD_KEY,
            &defaults.feed_keys.feed_type_key,
        )?;
        config.feed_keys.feed_brand_key = self.get_string_or_default(
            tenant_id,
            config_keys::FEED_BRAND_FIELD_KEY,
            &defaults.feed_keys.feed_brand_key,
        )?;
        config.ready_threshold_pct = self.get_parsed_or_default(
            tenant_id,
            config_keys::READY_THRESHOLD_PCT,
            defaults.ready_threshold_pct,
        )?;
        config.approaching_threshold_pct = self.get_parsed_or_default(
            tenant_id,
            config_keys::APPROACHING_THRESHOLD_PCT,
            defaults.approaching_threshold_pct,
        )?;

        config.validate()?;
        Ok(config)
    }
}

// ==========================================
// ConfigScope - 配置作用域
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigScope {
    Global,                       // 全局
    Tenant { tenant_id: String }, // 租户覆写
}

impl ConfigScope {
    /// config_kv.scope_id 取值
    pub fn scope_id(&self) -> String {
        match self {
            ConfigScope::Global => GLOBAL_SCOPE.to_string(),
            ConfigScope::Tenant { tenant_id } => format!("tenant/{}", tenant_id),
        }
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 健康预警
    pub const HEALTH_MODERATE_LOSS_PCT: &str = "health_moderate_loss_pct";
    pub const HEALTH_SEVERE_LOSS_PCT: &str = "health_severe_loss_pct";
    pub const HEALTH_ESCALATION_CONSECUTIVE_LOSSES: &str = "health_escalation_consecutive_losses";

    // 饲料标签 (称重自定义字段键)
    pub const FEED_TYPE_FIELD_KEY: &str = "feed_type_field_key";
    pub const FEED_BRAND_FIELD_KEY: &str = "feed_brand_field_key";

    // 出栏
    pub const READY_THRESHOLD_PCT: &str = "ready_threshold_pct";
    pub const APPROACHING_THRESHOLD_PCT: &str = "approaching_threshold_pct";
}
