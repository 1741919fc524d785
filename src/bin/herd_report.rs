// ==========================================
// 牲畜称重管理系统 - 全群分析报告 (开发工具)
// ==========================================
// 用法: herd_report <db_path> <tenant_id>
// 输出: JSON 报告 (stdout); 日志写 stderr
// ==========================================

use anyhow::{anyhow, Context, Result};
use livestock_weigh::config::ConfigManager;
use livestock_weigh::db::{ensure_schema, open_sqlite_connection, read_schema_version};
use livestock_weigh::domain::{AnimalGrowth, FeedPerformanceMetric, HealthSummary, ReadyToSellResult};
use livestock_weigh::repository::{AnimalRepository, WeighingRepository};
use livestock_weigh::use_cases::impls::{
    FeedComparisonUseCaseImpl, GrowthReportUseCaseImpl, HealthAlertUseCaseImpl,
    ReadyToSellUseCaseImpl,
};
use livestock_weigh::use_cases::{
    FeedComparisonUseCase, GrowthReportUseCase, HealthAlertUseCase, ReadyToSellUseCase,
};
use livestock_weigh::{logging, perf};
use serde::Serialize;
use std::sync::{Arc, Mutex};

#[derive(Debug, Serialize)]
struct HerdReport {
    tenant_id: String,
    generated_at: String,
    growth: Vec<AnimalGrowth>,
    health: Vec<HealthSummary>,
    feed_comparison: Vec<FeedPerformanceMetric>,
    ready_to_sell: Vec<ReadyToSellResult>,
    approaching: Vec<ReadyToSellResult>,
}

fn main() -> Result<()> {
    logging::init();

    let mut args = std::env::args().skip(1);
    let (db_path, tenant_id) = match (args.next(), args.next()) {
        (Some(db_path), Some(tenant_id)) => (db_path, tenant_id),
        _ => {
            eprintln!("用法: herd_report <db_path> <tenant_id>");
            std::process::exit(2);
        }
    };

    let mut conn = open_sqlite_connection(&db_path)
        .with_context(|| format!("打开数据库失败: {}", db_path))?;
    ensure_schema(&conn).context("初始化表结构失败")?;
    perf::install_sqlite_tracing(&mut conn);
    let schema_version = read_schema_version(&conn)?;
    tracing::info!(db_path = %db_path, schema_version = ?schema_version, "数据库已就绪");

    let conn = Arc::new(Mutex::new(conn));
    let config = ConfigManager::from_connection(conn.clone())
        .and_then(|m| m.load_analytics_config(&tenant_id))
        .map_err(|e| anyhow!("加载分析参数失败: {}", e))?;

    let weighings = Arc::new(
        WeighingRepository::from_connection(conn.clone()).with_feed_keys(config.feed_keys.clone()),
    );
    let animals = Arc::new(AnimalRepository::from_connection(conn));

    let growth = GrowthReportUseCaseImpl::new(weighings.clone(), animals.clone());
    let health = HealthAlertUseCaseImpl::new(
        weighings.clone(),
        animals.clone(),
        config.health,
        config.escalation_consecutive_losses,
    )?;
    let feed = FeedComparisonUseCaseImpl::new(weighings.clone(), config.feed_keys.clone());
    let sale = ReadyToSellUseCaseImpl::new(
        weighings,
        animals,
        config.ready_threshold_pct,
        config.approaching_threshold_pct,
    )?;

    let report = HerdReport {
        tenant_id: tenant_id.clone(),
        generated_at: chrono::Utc::now().to_rfc3339(),
        growth: growth.get_herd_growth(&tenant_id, None)?.items,
        health: health.get_herd_health(&tenant_id, None)?.items,
        feed_comparison: feed.compare_all_feeds(&tenant_id, None)?.items,
        ready_to_sell: sale.get_ready_animals(&tenant_id)?.items,
        approaching: sale.get_approaching_animals(&tenant_id)?.items,
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
