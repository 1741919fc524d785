// ==========================================
// 牲畜称重管理系统 - 饲料表现聚合引擎
// ==========================================
// 职责: 按饲料类型聚合多只动物的增重表现并排名
// 输入: 带饲料标签的称重记录 (可按日期闭区间过滤)
// 输出: FeedPerformanceMetric / FeedComparisonResult
// ==========================================
// 口径:
// - 每只动物只取匹配饲料+日期范围的子集的首末称重 (非全历史)
// - 子集内有任一称重的动物即计入 (单次称重: 增重 0, 天数 0, 日增重 0)
// - 排名: 平均日增重降序, 同值按饲料类型名升序
// - 无匹配动物的饲料类型不出现在结果中
// ==========================================

use crate::domain::date_range::DateRange;
use crate::domain::metrics::{FeedComparisonResult, FeedPerformanceMetric};
use crate::domain::weighing::{FeedTagKeys, WeighingRecord};
use crate::engine::growth::GrowthEngine;
use std::collections::BTreeMap;

// ==========================================
// FeedPerformanceAggregator - 饲料表现聚合引擎
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct FeedPerformanceAggregator {
    keys: FeedTagKeys,
    growth: GrowthEngine,
}

impl FeedPerformanceAggregator {
    pub fn new(keys: FeedTagKeys) -> Self {
        Self {
            keys,
            growth: GrowthEngine::new(),
        }
    }

    /// 聚合单一饲料类型的表现
    ///
    /// # 参数
    /// - `feed_type`: 饲料类型
    /// - `by_animal`: 按动物分组的称重记录 (可包含其他饲料的记录, 会被过滤)
    /// - `range`: 可选日期闭区间
    ///
    /// # 返回
    /// - None: 没有匹配的动物
    /// - Some(metric): performance_rank 为 0 (未排名)
    pub fn aggregate(
        &self,
        feed_type: &str,
        by_animal: &BTreeMap<i64, Vec<WeighingRecord>>,
        range: Option<&DateRange>,
    ) -> Option<FeedPerformanceMetric> {
        let feed_type = feed_type.trim();

        let subsets: Vec<Vec<&WeighingRecord>> = by_animal
            .values()
            .map(|records| {
                records
                    .iter()
                    .filter(|r| self.keys.matches(&r.custom_fields, feed_type))
                    .filter(|r| DateRange::admits(range, &r.timestamp))
                    .collect()
            })
            .collect();

        self.summarize_feed(feed_type, &subsets)
    }

    /// 对比范围内出现的全部饲料类型
    ///
    /// # 参数
    /// - `records`: 租户范围内的称重记录 (无饲料标签的记录被忽略)
    /// - `range`: 可选日期闭区间
    pub fn compare(
        &self,
        records: &[WeighingRecord],
        range: Option<&DateRange>,
    ) -> FeedComparisonResult {
        // feed_type -> animal_id -> 子集
        let mut by_feed: BTreeMap<String, BTreeMap<i64, Vec<&WeighingRecord>>> = BTreeMap::new();

        for record in records {
            if !DateRange::admits(range, &record.timestamp) {
                continue;
            }
            if let Some(tag) = self.keys.extract(&record.custom_fields) {
                by_feed
                    .entry(tag.feed_type)
                    .or_default()
                    .entry(record.animal_id)
                    .or_default()
                    .push(record);
            }
        }

        let metrics = by_feed
            .into_iter()
            .filter_map(|(feed_type, animals)| {
                let subsets: Vec<Vec<&WeighingRecord>> = animals.into_values().collect();
                self.summarize_feed(&feed_type, &subsets)
            })
            .collect();

        Self::rank(metrics)
    }

    /// 排名: 平均日增重降序, 同值按饲料类型名升序; rank 从 1 开始
    pub fn rank(mut metrics: Vec<FeedPerformanceMetric>) -> FeedComparisonResult {
        metrics.sort_by(|a, b| {
            b.avg_adg_kg_per_day
                .total_cmp(&a.avg_adg_kg_per_day)
                .then_with(|| a.feed_type.cmp(&b.feed_type))
        });

        for (idx, metric) in metrics.iter_mut().enumerate() {
            metric.performance_rank = idx + 1;
        }

        FeedComparisonResult { metrics }
    }

    /// 由每只动物的匹配子集计算饲料指标
    fn summarize_feed(
        &self,
        feed_type: &str,
        subsets: &[Vec<&WeighingRecord>],
    ) -> Option<FeedPerformanceMetric> {
        let subsets: Vec<&Vec<&WeighingRecord>> =
            subsets.iter().filter(|s| !s.is_empty()).collect();

        let mut animal_count = 0usize;
        let mut adg_sum = 0.0;
        let mut gain_sum = 0.0;
        let mut days_sum = 0.0;

        for subset in &subsets {
            let metrics = self.growth.calculate_iter(subset.iter().copied());
            animal_count += 1;
            adg_sum += metrics.avg_daily_gain_kg;
            gain_sum += metrics.total_gain_kg;
            days_sum += metrics.total_days as f64;
        }

        if animal_count == 0 {
            return None;
        }

        let n = animal_count as f64;
        Some(FeedPerformanceMetric {
            feed_type: feed_type.to_string(),
            feed_brand: self.dominant_brand(&subsets),
            animal_count,
            avg_adg_kg_per_day: adg_sum / n,
            avg_total_gain_kg: gain_sum / n,
            avg_days_on_feed: days_sum / n,
            performance_rank: 0,
        })
    }

    /// 出现次数最多的品牌 (同次数取字母序最小); 无品牌返回 None
    fn dominant_brand(&self, subsets: &[&Vec<&WeighingRecord>]) -> Option<String> {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for record in subsets.iter().copied().flatten() {
            if let Some(brand) = self
                .keys
                .extract(&record.custom_fields)
                .and_then(|tag| tag.feed_brand)
            {
                *counts.entry(brand).or_default() += 1;
            }
        }

        let mut best: Option<(String, usize)> = None;
        for (brand, count) in counts {
            let best_count = best.as_ref().map(|(_, c)| *c).unwrap_or(0);
            if count > best_count {
                best = Some((brand, count));
            }
        }
        best.map(|(brand, _)| brand)
    }
}
