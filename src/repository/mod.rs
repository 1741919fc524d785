// ==========================================
// 牲畜称重管理系统 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 提供数据访问接口,屏蔽数据库细节
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod animal_repo;
pub mod batch_repo;
pub mod error;
pub mod history;
pub mod sql_builder;
pub mod weighing_repo;

// 重导出核心仓储
pub use animal_repo::{AnimalRepository, NewAnimal};
pub use batch_repo::BatchRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use history::{AnimalDirectory, BatchDirectory, WeighingHistory, WeighingsByAnimal};
pub use weighing_repo::{NewWeighing, WeighingRepository};
