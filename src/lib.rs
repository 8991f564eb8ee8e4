//! # Production Plan
//!
//! 依原物料庫存與產品組成，建議總銷售額最高的生產計劃

pub mod logging;

pub use prodplan_calc::{PlanWarning, ProductionExecutor, StockMovement, WarningSeverity};
pub use prodplan_core::{
    Catalog, CompositionItem, MaterialBalance, MaterialConsumption, PlanConfig, PlanError,
    PlanResult, Product, RawMaterial, Result, StockSnapshot, SuggestedItem, UnitOfMeasurement,
};
pub use prodplan_optimizer::{PlanOutcome, ProductionPlanner, SearchStats};
