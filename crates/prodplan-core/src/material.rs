//! 原物料模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 計量單位（僅供報表顯示）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnitOfMeasurement {
    /// 個
    Unit,
    /// 公斤
    Kilogram,
    /// 公克
    Gram,
    /// 公升
    Liter,
    /// 毫升
    Milliliter,
    /// 公尺
    Meter,
    /// 公分
    Centimeter,
}

/// 原物料
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMaterial {
    /// 原物料ID
    pub id: Uuid,

    /// 原物料代碼（唯一，作為排序鍵）
    pub code: String,

    /// 名稱
    pub name: String,

    /// 計量單位
    pub unit_of_measurement: UnitOfMeasurement,

    /// 現有庫存（缺少時視為零）
    #[serde(default)]
    pub stock_quantity: Option<Decimal>,
}

impl RawMaterial {
    /// 創建新的原物料
    pub fn new(
        code: String,
        name: String,
        unit_of_measurement: UnitOfMeasurement,
        stock_quantity: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            code,
            name,
            unit_of_measurement,
            stock_quantity: Some(stock_quantity),
        }
    }

    /// 建構器模式：設置ID
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// 建構器模式：清除庫存（模擬資料庫中的空值）
    pub fn without_stock(mut self) -> Self {
        self.stock_quantity = None;
        self
    }

    /// 可用庫存（空值視為零）
    pub fn available_stock(&self) -> Decimal {
        self.stock_quantity.unwrap_or(Decimal::ZERO)
    }
}
