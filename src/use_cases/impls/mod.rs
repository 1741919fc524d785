// ==========================================
// 牲畜称重管理系统 - 分析用例实现模块
// ==========================================
// 职责: 分析用例的具体实现 (仓储取数 + 引擎计算)
// ==========================================

pub mod batch_summary_impl;
pub mod feed_comparison_impl;
pub mod growth_report_impl;
pub mod health_alerts_impl;
pub mod ready_to_sell_impl;

#[cfg(test)]
pub(crate) mod test_support;

// 重导出用例实现
pub use batch_summary_impl::BatchSummaryUseCaseImpl;
pub use feed_comparison_impl::FeedComparisonUseCaseImpl;
pub use growth_report_impl::GrowthReportUseCaseImpl;
pub use health_alerts_impl::HealthAlertUseCaseImpl;
pub use ready_to_sell_impl::ReadyToSellUseCaseImpl;
