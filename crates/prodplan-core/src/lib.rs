//! # Production Plan Core
//!
//! 核心資料模型與類型定義

pub mod catalog;
pub mod config;
pub mod material;
pub mod plan;
pub mod product;
pub mod stock;

// Re-export 主要類型
pub use catalog::Catalog;
pub use config::PlanConfig;
pub use material::{RawMaterial, UnitOfMeasurement};
pub use plan::{MaterialBalance, MaterialConsumption, PlanResult, SuggestedItem};
pub use product::{CompositionItem, Product};
pub use stock::StockSnapshot;

use rust_decimal::Decimal;

/// 生產計劃錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("生產數量必須大於零: {0}")]
    InvalidQuantity(i64),

    #[error("產品 {0} 沒有定義組成，無法生產")]
    EmptyComposition(String),

    #[error("找不到產品: {0}")]
    ProductNotFound(String),

    #[error("找不到原物料: {0}")]
    RawMaterialNotFound(uuid::Uuid),

    #[error("產品 {product} 的原物料 {raw_material_id} 用量無效")]
    InvalidRequirement {
        product: String,
        raw_material_id: uuid::Uuid,
    },

    #[error("原物料 '{name}' ({code}) 庫存不足：需要 {required}，可用 {available}")]
    InsufficientStock {
        code: String,
        name: String,
        required: Decimal,
        available: Decimal,
    },

    #[error("搜尋狀態不一致: {0}")]
    InvariantViolation(String),

    #[error("JSON 解析錯誤: {0}")]
    Json(#[from] serde_json::Error),

    #[error("無效的配置: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, PlanError>;
