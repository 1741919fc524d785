// 用例实现单元测试共用的内存库与录入工具

use crate::db::ensure_schema;
use crate::domain::types::AnimalStatus;
use crate::domain::weighing::CustomFields;
use crate::repository::{
    AnimalRepository, BatchRepository, NewAnimal, NewWeighing, WeighingRepository,
};
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

pub const TENANT: &str = "farm-a";

pub struct Fixture {
    pub weighings: Arc<WeighingRepository>,
    pub animals: Arc<AnimalRepository>,
    pub batches: Arc<BatchRepository>,
    pub batch_id: i64,
}

pub fn day(offset: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap() + Duration::days(offset)
}

impl Fixture {
    pub fn new() -> Self {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::configure_sqlite_connection(&conn).unwrap();
        ensure_schema(&conn).unwrap();
        let conn = Arc::new(Mutex::new(conn));

        let batches = Arc::new(BatchRepository::from_connection(conn.clone()));
        let batch_id = batches
            .insert(TENANT, "三月称重", NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(), None)
            .unwrap();

        Self {
            weighings: Arc::new(WeighingRepository::from_connection(conn.clone())),
            animals: Arc::new(AnimalRepository::from_connection(conn)),
            batches,
            batch_id,
        }
    }

    pub fn animal(&self, tag: &str, target: Option<f64>) -> i64 {
        self.animals
            .insert(&NewAnimal {
                tenant_id: TENANT.to_string(),
                tag: tag.to_string(),
                name: None,
                status: AnimalStatus::Active,
                target_weight_kg: target,
                created_at: day(-30),
            })
            .unwrap()
    }

    pub fn weigh(&self, animal_id: i64, weight_kg: f64, offset: i64, feed: Option<&str>) -> i64 {
        let mut custom_fields = CustomFields::new();
        if let Some(feed) = feed {
            custom_fields.insert("feed_type".to_string(), feed.to_string());
        }
        self.weighings
            .insert(&NewWeighing {
                tenant_id: TENANT.to_string(),
                animal_id,
                batch_id: self.batch_id,
                weight_kg,
                timestamp: day(offset),
                custom_fields,
            })
            .unwrap()
    }
}
