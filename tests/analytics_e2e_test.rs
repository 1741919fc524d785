// ==========================================
// 分析用例端到端测试
// ==========================================
// 测试目标: 配置 -> 仓储 -> 引擎 -> 用例响应 全链路
// ==========================================


use livestock_weigh::config::{config_keys, ConfigManager, ConfigScope};
use livestock_weigh::domain::{DateRange, HealthSeverity};
use livestock_weigh::logging;
use livestock_weigh::repository::WeighingRepository;
use livestock_weigh::use_cases::impls::{
    BatchSummaryUseCaseImpl, FeedComparisonUseCaseImpl, GrowthReportUseCaseImpl,
    HealthAlertUseCaseImpl, ReadyToSellUseCaseImpl,
};
use livestock_weigh::use_cases::{
    AnalyticsError, BatchSummaryUseCase, FeedComparisonUseCase, GrowthReportUseCase,
    HealthAlertUseCase, ReadyToSellUseCase,
};
use std::sync::Arc;
use test_helpers::{date, day, TestFarm};

const TENANT: &str = "farm-a";

/// 三头牛, 两种饲料, 一次掉重
struct Herd {
    farm: TestFarm,
    batch: i64,
    steer: i64,
    heifer: i64,
    calf: i64,
}

fn seed_herd() -> Herd {
    let farm = TestFarm::new();
    let batch = farm.batch(TENANT, "三月称重");
    let steer = farm.animal(TENANT, "S-001", Some(500.0));
    let heifer = farm.animal(TENANT, "H-001", Some(500.0));
    let calf = farm.animal(TENANT, "C-001", None);

    let hay = [("feed_type", "Hay"), ("feed_brand", "GreenField")];
    let grain = [("feed_type", "Grain"), ("feed_brand", "Acme")];

    farm.weigh(TENANT, steer, batch, 500.0, day(0), &grain);
    farm.weigh(TENANT, steer, batch, 530.0, day(10), &grain);
    farm.weigh(TENANT, steer, batch, 550.0, day(20), &grain);

    farm.weigh(TENANT, heifer, batch, 440.0, day(0), &hay);
    farm.weigh(TENANT, heifer, batch, 455.0, day(10), &hay);
    farm.weigh(TENANT, heifer, batch, 450.0, day(20), &hay);

    farm.weigh(TENANT, calf, batch, 100.0, day(0), &hay);
    farm.weigh(TENANT, calf, batch, 97.0, day(10), &hay);
    farm.weigh(TENANT, calf, batch, 90.0, day(20), &hay);
    farm.weigh(TENANT, calf, batch, 95.0, day(30), &hay);

    Herd {
        farm,
        batch,
        steer,
        heifer,
        calf,
    }
}

#[test]
fn test_growth_end_to_end() {
    logging::init_test();
    let herd = seed_herd();
    let use_case =
        GrowthReportUseCaseImpl::new(herd.farm.weighings.clone(), herd.farm.animals.clone());

    let response = use_case.get_herd_growth(TENANT, None).unwrap();
    assert_eq!(response.tenant_id, TENANT);
    assert_eq!(response.len(), 3);

    let steer = response.items.iter().find(|g| g.animal_id == herd.steer).unwrap();
    assert_eq!(steer.metrics.total_gain_kg, 50.0);
    assert_eq!(steer.metrics.total_days, 20);
    assert!((steer.metrics.avg_daily_gain_kg - 2.5).abs() < 1e-9);

    let calf = use_case.get_animal_growth(herd.calf).unwrap();
    assert_eq!(calf.metrics.total_gain_kg, -5.0);
    assert_eq!(calf.metrics.weighing_count, 4);
}

#[test]
fn test_health_end_to_end_with_tenant_thresholds() {
    let herd = seed_herd();
    let config = ConfigManager::from_connection(herd.farm.conn.clone()).unwrap();

    let defaults = config.load_analytics_config(TENANT).unwrap();
    let use_case = HealthAlertUseCaseImpl::new(
        herd.farm.weighings.clone(),
        herd.farm.animals.clone(),
        defaults.health,
        defaults.escalation_consecutive_losses,
    )
    .unwrap();

    let flags = use_case.get_animal_alerts(herd.calf).unwrap();
    let severities: Vec<HealthSeverity> = flags.iter().map(|f| f.severity).collect();
    assert_eq!(severities, vec![HealthSeverity::Moderate, HealthSeverity::Severe]);
    assert_eq!(flags[1].consecutive_loss_count, 2);

    let summaries = use_case.get_herd_health(TENANT, None).unwrap();
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries.items[0].animal_id, herd.calf);
    assert!(summaries.items[0].needs_escalation);
    assert_eq!(summaries.items[1].animal_id, herd.heifer);
    assert!(!summaries.items[1].needs_escalation);

    // 租户覆写: 中度 5%, 严重 10% -> 小牛 3% 降为轻度, 7.2% 降为中度
    config
        .set_config_value(
            &ConfigScope::Tenant {
                tenant_id: TENANT.to_string(),
            },
            config_keys::HEALTH_MODERATE_LOSS_PCT,
            "5",
        )
        .unwrap();
    config
        .set_config_value(
            &ConfigScope::Tenant {
                tenant_id: TENANT.to_string(),
            },
            config_keys::HEALTH_SEVERE_LOSS_PCT,
            "10",
        )
        .unwrap();
    let tuned = config.load_analytics_config(TENANT).unwrap();
    let use_case = HealthAlertUseCaseImpl::new(
        herd.farm.weighings.clone(),
        herd.farm.animals.clone(),
        tuned.health,
        tuned.escalation_consecutive_losses,
    )
    .unwrap();

    let severities: Vec<HealthSeverity> = use_case
        .get_animal_alerts(herd.calf)
        .unwrap()
        .iter()
        .map(|f| f.severity)
        .collect();
    assert_eq!(severities, vec![HealthSeverity::Minor, HealthSeverity::Moderate]);
}

#[test]
fn test_feed_comparison_end_to_end() {
    let herd = seed_herd();
    let use_case = FeedComparisonUseCaseImpl::new(
        herd.farm.weighings.clone(),
        Default::default(),
    );

    let response = use_case.compare_all_feeds(TENANT, None).unwrap();
    assert_eq!(response.len(), 2);

    let grain = &response.items[0];
    assert_eq!(grain.feed_type, "Grain");
    assert_eq!(grain.performance_rank, 1);
    assert_eq!(grain.feed_brand.as_deref(), Some("Acme"));

    let hay = &response.items[1];
    assert_eq!(hay.feed_type, "Hay");
    assert_eq!(hay.animal_count, 2);
    assert_eq!(hay.feed_brand.as_deref(), Some("GreenField"));
    // 小母牛 10/20=0.5, 小牛 -5/30; 均值
    let expected = (10.0 / 20.0 + (-5.0 / 30.0)) / 2.0;
    assert!((hay.avg_adg_kg_per_day - expected).abs() < 1e-9);

    // 只看前 10 天
    let first_days = DateRange::new(date(2026, 3, 1), date(2026, 3, 11)).unwrap();
    let requested = vec!["Hay".to_string(), "Grain".to_string()];
    let ranged = use_case
        .compare_feed_types(TENANT, &requested, Some(&first_days))
        .unwrap();
    assert_eq!(ranged.items[0].feed_type, "Grain");
    assert!((ranged.items[0].avg_adg_kg_per_day - 3.0).abs() < 1e-9);
    assert_eq!(ranged.items[0].avg_days_on_feed, 10.0);
}

#[test]
fn test_feed_comparison_with_configured_field_keys() {
    let farm = TestFarm::new();
    let batch = farm.batch(TENANT, "B1");
    let a = farm.animal(TENANT, "A-001", None);
    farm.weigh(TENANT, a, batch, 100.0, day(0), &[("ration", "Silage")]);
    farm.weigh(TENANT, a, batch, 110.0, day(5), &[("ration", "Silage")]);

    let config = ConfigManager::from_connection(farm.conn.clone()).unwrap();
    config
        .set_config_value(&ConfigScope::Global, config_keys::FEED_TYPE_FIELD_KEY, "ration")
        .unwrap();
    let analytics = config.load_analytics_config(TENANT).unwrap();

    let weighings = Arc::new(
        WeighingRepository::from_connection(farm.conn.clone())
            .with_feed_keys(analytics.feed_keys.clone()),
    );
    let use_case = FeedComparisonUseCaseImpl::new(weighings, analytics.feed_keys);

    let response = use_case
        .compare_feed_types(TENANT, &["Silage".to_string()], None)
        .unwrap();
    assert_eq!(response.len(), 1);
    assert!((response.items[0].avg_adg_kg_per_day - 2.0).abs() < 1e-9);
}

#[test]
fn test_ready_to_sell_end_to_end() {
    let herd = seed_herd();
    let use_case = ReadyToSellUseCaseImpl::new(
        herd.farm.weighings.clone(),
        herd.farm.animals.clone(),
        100.0,
        90.0,
    )
    .unwrap();

    let all = use_case.evaluate_herd(TENANT).unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all.items[0].animal.id, herd.steer);
    assert_eq!(all.items[0].progress_percent, 110.0);
    assert_eq!(all.items[0].remaining_kg, 0.0);
    assert_eq!(all.items[0].last_weighed_at, day(20));
    assert_eq!(all.items[1].animal.id, herd.heifer);
    assert_eq!(all.items[1].progress_percent, 90.0);
    assert_eq!(all.items[1].remaining_kg, 50.0);

    let ready = use_case.get_ready_animals(TENANT).unwrap();
    assert_eq!(ready.len(), 1);
    assert_eq!(ready.items[0].animal.id, herd.steer);

    let approaching = use_case.get_approaching_animals(TENANT).unwrap();
    assert_eq!(approaching.len(), 1);
    assert_eq!(approaching.items[0].animal.id, herd.heifer);

    assert!(use_case.evaluate_herd("farm-z").unwrap().is_empty());
}

#[test]
fn test_batch_summary_end_to_end() {
    let herd = seed_herd();
    let use_case =
        BatchSummaryUseCaseImpl::new(herd.farm.weighings.clone(), herd.farm.batches.clone());

    let summary = use_case.get_batch_summary(herd.batch).unwrap();
    assert_eq!(summary.weighing_count, 10);
    assert_eq!(summary.animal_count, 3);
    assert_eq!(summary.min_weight_kg, 90.0);
    assert_eq!(summary.max_weight_kg, 550.0);
    assert_eq!(summary.first_weighed_at, Some(day(0)));
    assert_eq!(summary.last_weighed_at, Some(day(30)));

    let err = use_case.get_batch_summary(herd.batch + 1).unwrap_err();
    assert!(matches!(err, AnalyticsError::NotFound { .. }));
}

#[test]
fn test_responses_serialize_to_json() {
    let herd = seed_herd();
    let use_case =
        GrowthReportUseCaseImpl::new(herd.farm.weighings.clone(), herd.farm.animals.clone());
    let response = use_case.get_herd_growth(TENANT, None).unwrap();

    let json: serde_json::Value = serde_json::to_value(&response).unwrap();
    assert_eq!(json["tenant_id"], TENANT);
    assert_eq!(json["items"].as_array().unwrap().len(), 3);
    assert!(json["report_id"].as_str().unwrap().len() >= 32);
}
