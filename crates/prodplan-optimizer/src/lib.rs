//! # Production Plan Optimizer
//!
//! 最佳生產組合搜尋（回溯 + 上界剪枝）與計劃入口

mod lease;
pub mod planner;
pub mod search;

// Re-export 主要類型
pub use planner::ProductionPlanner;
pub use search::{SearchEngine, SearchOutcome, SearchStats};

use chrono::{DateTime, Utc};
use prodplan_calc::{PlanWarning, WarningSeverity};
use prodplan_core::PlanResult;

/// 優化結果
#[derive(Debug, Clone)]
pub struct PlanOutcome {
    /// 建議生產計劃
    pub plan: PlanResult,

    /// 搜尋統計
    pub stats: SearchStats,

    /// 警告信息
    pub warnings: Vec<PlanWarning>,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u128>,

    /// 計算完成時間
    pub computed_at: DateTime<Utc>,
}

impl PlanOutcome {
    /// 創建結果（無警告）
    pub fn new(plan: PlanResult, stats: SearchStats) -> Self {
        Self {
            plan,
            stats,
            warnings: Vec::new(),
            calculation_time_ms: None,
            computed_at: Utc::now(),
        }
    }

    /// 添加警告
    pub fn add_warning(&mut self, warning: PlanWarning) {
        self.warnings.push(warning);
    }

    /// 是否為完整搜尋的結果
    pub fn is_exhaustive(&self) -> bool {
        self.stats.exhaustive
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// 指定嚴重度的警告
    pub fn warnings_with(&self, severity: WarningSeverity) -> impl Iterator<Item = &PlanWarning> {
        self.warnings
            .iter()
            .filter(move |warning| warning.severity == severity)
    }
}
