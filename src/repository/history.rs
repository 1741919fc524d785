// ==========================================
// 牲畜称重管理系统 - 称重历史读取接口
// ==========================================
// 职责: 定义用例层消费的只读数据能力 (不含实现)
// 实现者: WeighingRepository / AnimalRepository / BatchRepository (SQLite)
// 红线: 只读, 租户与日期范围一律显式传入
// ==========================================

use crate::domain::animal::{Animal, Batch};
use crate::domain::date_range::DateRange;
use crate::domain::weighing::WeighingRecord;
use crate::repository::error::RepositoryResult;
use std::collections::BTreeMap;

/// 按动物分组的称重记录 (animal_id -> 称重列表)
pub type WeighingsByAnimal = BTreeMap<i64, Vec<WeighingRecord>>;

// ==========================================
// WeighingHistory - 称重历史
// ==========================================
pub trait WeighingHistory: Send + Sync {
    /// 单只动物的全部称重 (按时间升序)
    fn get_weighings_for_animal(&self, animal_id: i64) -> RepositoryResult<Vec<WeighingRecord>>;

    /// 租户内标记为指定饲料类型的称重, 按动物分组
    fn get_weighings_for_feed_type(
        &self,
        tenant_id: &str,
        feed_type: &str,
        date_range: Option<&DateRange>,
    ) -> RepositoryResult<WeighingsByAnimal>;

    /// 租户内全部称重 (可按日期闭区间过滤)
    fn get_weighings_for_tenant(
        &self,
        tenant_id: &str,
        date_range: Option<&DateRange>,
    ) -> RepositoryResult<Vec<WeighingRecord>>;

    /// 单个称重批次的全部称重
    fn get_weighings_for_batch(&self, batch_id: i64) -> RepositoryResult<Vec<WeighingRecord>>;

    /// 单只动物最近一次称重
    fn get_latest_weighing(&self, animal_id: i64) -> RepositoryResult<Option<WeighingRecord>>;
}

// ==========================================
// AnimalDirectory - 动物档案
// ==========================================
pub trait AnimalDirectory: Send + Sync {
    /// 租户内在栏且设置了目标体重的动物
    fn get_animals_with_target_weight(&self, tenant_id: &str) -> RepositoryResult<Vec<Animal>>;

    /// 租户内在栏动物
    fn get_active_animals(&self, tenant_id: &str) -> RepositoryResult<Vec<Animal>>;

    /// 按ID查询动物
    fn find_animal(&self, animal_id: i64) -> RepositoryResult<Option<Animal>>;
}

// ==========================================
// BatchDirectory - 称重批次
// ==========================================
pub trait BatchDirectory: Send + Sync {
    /// 按ID查询称重批次
    fn find_batch(&self, batch_id: i64) -> RepositoryResult<Option<Batch>>;
}
