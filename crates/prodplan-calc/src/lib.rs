//! # Production Plan Calculation
//!
//! 可生產量計算、計劃報表與生產扣料

pub mod feasibility;
pub mod ledger;
pub mod production;

// Re-export 主要類型
pub use feasibility::FeasibilityCalculator;
pub use ledger::LedgerBuilder;
pub use production::{ProductionExecutor, StockMovement};

/// 計劃警告
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanWarning {
    /// 相關的產品或原物料代碼
    pub subject: String,
    pub message: String,
    pub severity: WarningSeverity,
}

impl PlanWarning {
    pub fn new(subject: String, message: String, severity: WarningSeverity) -> Self {
        Self {
            subject,
            message,
            severity,
        }
    }

    pub fn info(subject: String, message: String) -> Self {
        Self::new(subject, message, WarningSeverity::Info)
    }

    pub fn warning(subject: String, message: String) -> Self {
        Self::new(subject, message, WarningSeverity::Warning)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningSeverity {
    Info,
    Warning,
}
