// ==========================================
// 引擎层性质测试
// ==========================================
// 测试目标: 增重/健康/饲料/出栏四个引擎的口径与边界
// ==========================================

use chrono::{DateTime, Duration, TimeZone, Utc};
use livestock_weigh::domain::{
    Animal, AnimalStatus, CustomFields, DateRange, FeedPerformanceMetric, HealthSeverity,
    WeighingRecord,
};
use livestock_weigh::engine::{
    FeedPerformanceAggregator, GrowthEngine, HealthEngine, HealthThresholds, ReadyToSellEvaluator,
    SaleCandidate,
};
use std::collections::BTreeMap;

fn at(days: i64, hours: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 1, 6, 0, 0).unwrap() + Duration::days(days) + Duration::hours(hours)
}

fn record(id: i64, animal_id: i64, weight_kg: f64, timestamp: DateTime<Utc>) -> WeighingRecord {
    WeighingRecord {
        id,
        tenant_id: "farm-a".to_string(),
        animal_id,
        batch_id: 1,
        weight_kg,
        timestamp,
        custom_fields: CustomFields::new(),
    }
}

fn fed(mut r: WeighingRecord, feed_type: &str) -> WeighingRecord {
    r.custom_fields
        .insert("feed_type".to_string(), feed_type.to_string());
    r
}

// ==========================================
// 增重
// ==========================================

#[test]
fn test_growth_is_independent_of_input_order() {
    let ordered = vec![
        record(1, 1, 200.0, at(0, 0)),
        record(2, 1, 215.0, at(10, 0)),
        record(3, 1, 232.0, at(20, 0)),
    ];
    let shuffled = vec![ordered[2].clone(), ordered[0].clone(), ordered[1].clone()];

    let engine = GrowthEngine::new();
    let a = engine.calculate(&ordered);
    let b = engine.calculate(&shuffled);
    assert_eq!(a, b);
    assert_eq!(a.total_gain_kg, 32.0);
    assert_eq!(a.total_days, 20);
    assert!((a.avg_daily_gain_kg - 1.6).abs() < 1e-9);
}

#[test]
fn test_growth_degenerate_inputs() {
    let engine = GrowthEngine::new();

    let empty = engine.calculate(&[]);
    assert_eq!(empty.total_gain_kg, 0.0);
    assert_eq!(empty.avg_daily_gain_kg, 0.0);
    assert_eq!(empty.weighing_count, 0);

    let single = engine.calculate(&[record(1, 1, 250.0, at(0, 0))]);
    assert_eq!(single.first_weight_kg, 250.0);
    assert_eq!(single.latest_weight_kg, 250.0);
    assert_eq!(single.total_days, 0);
    assert_eq!(single.avg_daily_gain_kg, 0.0);
}

#[test]
fn test_same_day_weighings_have_zero_adg() {
    let metrics = GrowthEngine::new().calculate(&[
        record(1, 1, 250.0, at(0, 0)),
        record(2, 1, 254.0, at(0, 9)),
    ]);
    assert_eq!(metrics.total_gain_kg, 4.0);
    assert_eq!(metrics.total_days, 0);
    assert_eq!(metrics.avg_daily_gain_kg, 0.0);
    assert!(metrics.avg_daily_gain_kg.is_finite());
}

#[test]
fn test_growth_does_not_mutate_input_and_is_idempotent() {
    let records = vec![record(2, 1, 230.0, at(5, 0)), record(1, 1, 220.0, at(0, 0))];
    let snapshot = records.clone();

    let engine = GrowthEngine::new();
    let first = engine.calculate(&records);
    let second = engine.calculate(&records);
    assert_eq!(first, second);
    assert_eq!(records, snapshot);
}

// ==========================================
// 健康预警
// ==========================================

#[test]
fn test_health_reference_sequence() {
    let records = vec![
        record(1, 1, 100.0, at(0, 0)),
        record(2, 1, 97.0, at(1, 0)),
        record(3, 1, 90.0, at(2, 0)),
        record(4, 1, 95.0, at(3, 0)),
    ];

    let flags: Vec<_> = HealthEngine::default().detect(&records).collect();
    assert_eq!(flags.len(), 2);

    assert_eq!(flags[0].weighing_id, 2);
    assert_eq!(flags[0].severity, HealthSeverity::Moderate);
    assert_eq!(flags[0].weight_change_kg, -3.0);
    assert_eq!(flags[0].consecutive_loss_count, 1);

    assert_eq!(flags[1].weighing_id, 3);
    assert_eq!(flags[1].severity, HealthSeverity::Severe);
    assert_eq!(flags[1].consecutive_loss_count, 2);
}

#[test]
fn test_health_flat_transition_resets_run() {
    let records = vec![
        record(1, 1, 100.0, at(0, 0)),
        record(2, 1, 99.0, at(1, 0)),
        record(3, 1, 99.0, at(2, 0)),
        record(4, 1, 98.0, at(3, 0)),
    ];

    let flags: Vec<_> = HealthEngine::default().detect(&records).collect();
    assert_eq!(flags.len(), 2);
    assert!(flags.iter().all(|f| f.consecutive_loss_count == 1));
    assert!(flags.iter().all(|f| f.severity == HealthSeverity::Minor));
}

#[test]
fn test_health_detection_is_idempotent() {
    let records = vec![
        record(3, 1, 90.0, at(2, 0)),
        record(1, 1, 100.0, at(0, 0)),
        record(2, 1, 97.0, at(1, 0)),
        record(4, 1, 88.0, at(3, 0)),
    ];
    let snapshot = records.clone();

    let engine = HealthEngine::default();
    let first: Vec<_> = engine.detect(&records).collect();
    let second: Vec<_> = engine.detect(&records).collect();
    assert_eq!(first.len(), 3);
    assert_eq!(first, second);
    assert_eq!(records, snapshot);
}

#[test]
fn test_health_custom_thresholds() {
    let engine = HealthEngine::new(HealthThresholds {
        moderate_loss_pct: 1.0,
        severe_loss_pct: 2.0,
    });
    let records = vec![record(1, 1, 100.0, at(0, 0)), record(2, 1, 98.5, at(1, 0))];

    let flags: Vec<_> = engine.detect(&records).collect();
    assert_eq!(flags[0].severity, HealthSeverity::Moderate);
}

#[test]
fn test_health_single_record_and_gains_yield_nothing() {
    let engine = HealthEngine::default();
    assert_eq!(engine.detect(&[record(1, 1, 100.0, at(0, 0))]).count(), 0);
    assert_eq!(
        engine
            .detect(&[record(1, 1, 100.0, at(0, 0)), record(2, 1, 110.0, at(1, 0))])
            .count(),
        0
    );
}

// ==========================================
// 饲料表现
// ==========================================

fn hay_and_grain() -> BTreeMap<i64, Vec<WeighingRecord>> {
    let mut by_animal = BTreeMap::new();
    by_animal.insert(
        1,
        vec![fed(record(1, 1, 100.0, at(0, 0)), "Hay"), fed(record(2, 1, 105.0, at(10, 0)), "Hay")],
    );
    by_animal.insert(
        2,
        vec![fed(record(3, 2, 200.0, at(0, 0)), "Hay"), fed(record(4, 2, 207.0, at(10, 0)), "Hay")],
    );
    by_animal
}

#[test]
fn test_feed_mean_adg() {
    let metric = FeedPerformanceAggregator::default()
        .aggregate("Hay", &hay_and_grain(), None)
        .unwrap();
    assert_eq!(metric.animal_count, 2);
    assert!((metric.avg_adg_kg_per_day - 0.6).abs() < 1e-9);
    assert!((metric.avg_total_gain_kg - 6.0).abs() < 1e-9);
    assert_eq!(metric.avg_days_on_feed, 10.0);
}

#[test]
fn test_feed_without_matching_animals_is_absent() {
    let aggregator = FeedPerformanceAggregator::default();
    assert!(aggregator.aggregate("Grain", &hay_and_grain(), None).is_none());

    let june = DateRange::new(
        chrono::NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
        chrono::NaiveDate::from_ymd_opt(2026, 6, 30).unwrap(),
    )
    .unwrap();
    assert!(aggregator.aggregate("Hay", &hay_and_grain(), Some(&june)).is_none());
}

#[test]
fn test_feed_comparison_is_idempotent() {
    let records = vec![
        fed(record(1, 1, 100.0, at(0, 0)), "Hay"),
        fed(record(2, 1, 106.0, at(10, 0)), "Hay"),
        fed(record(3, 2, 300.0, at(0, 0)), "Grain"),
        fed(record(4, 2, 312.0, at(10, 0)), "Grain"),
        fed(record(5, 3, 150.0, at(3, 0)), "Silage"),
    ];
    let snapshot = records.clone();

    let aggregator = FeedPerformanceAggregator::default();
    let first = aggregator.compare(&records, None);
    let second = aggregator.compare(&records, None);
    assert_eq!(first.len(), 3);
    assert_eq!(first, second);
    assert_eq!(records, snapshot);
}

fn metric(feed_type: &str, adg: f64) -> FeedPerformanceMetric {
    FeedPerformanceMetric {
        feed_type: feed_type.to_string(),
        feed_brand: None,
        animal_count: 1,
        avg_adg_kg_per_day: adg,
        avg_total_gain_kg: adg * 10.0,
        avg_days_on_feed: 10.0,
        performance_rank: 0,
    }
}

#[test]
fn test_feed_ranking_is_total_with_name_tie_break() {
    let ranked = FeedPerformanceAggregator::rank(vec![
        metric("Silage", 0.8),
        metric("Grain", 1.2),
        metric("Hay", 0.8),
    ]);

    let order: Vec<(&str, usize)> = ranked
        .metrics
        .iter()
        .map(|m| (m.feed_type.as_str(), m.performance_rank))
        .collect();
    assert_eq!(order, vec![("Grain", 1), ("Hay", 2), ("Silage", 3)]);
    assert_eq!(ranked.best().unwrap().feed_type, "Grain");
}

// ==========================================
// 出栏评估
// ==========================================

fn animal(target: Option<f64>) -> Animal {
    Animal {
        id: 7,
        tenant_id: "farm-a".to_string(),
        tag: "A-007".to_string(),
        name: Some("七号".to_string()),
        status: AnimalStatus::Active,
        target_weight_kg: target,
        created_at: at(-90, 0),
    }
}

#[test]
fn test_ready_to_sell_reference_values() {
    let evaluator = ReadyToSellEvaluator::new();

    let over = evaluator
        .evaluate_one(&animal(Some(500.0)), &record(1, 7, 550.0, at(0, 0)))
        .unwrap();
    assert_eq!(over.progress_percent, 110.0);
    assert_eq!(over.remaining_kg, 0.0);

    let under = evaluator
        .evaluate_one(&animal(Some(500.0)), &record(2, 7, 450.0, at(0, 0)))
        .unwrap();
    assert_eq!(under.progress_percent, 90.0);
    assert_eq!(under.remaining_kg, 50.0);

    assert!(evaluator
        .evaluate_one(&animal(None), &record(3, 7, 450.0, at(0, 0)))
        .is_none());
}

#[test]
fn test_ready_to_sell_evaluation_is_idempotent() {
    let candidates = vec![
        SaleCandidate {
            animal: animal(Some(500.0)),
            latest_weighing: Some(record(1, 7, 470.0, at(0, 0))),
        },
        SaleCandidate {
            animal: animal(None),
            latest_weighing: Some(record(2, 7, 480.0, at(0, 0))),
        },
        SaleCandidate {
            animal: animal(Some(400.0)),
            latest_weighing: None,
        },
    ];
    let snapshot = candidates.clone();

    let evaluator = ReadyToSellEvaluator::new();
    let first = evaluator.evaluate(&candidates);
    let second = evaluator.evaluate(&candidates);
    assert_eq!(first.len(), 1);
    assert_eq!(first, second);
    assert_eq!(candidates, snapshot);
}
