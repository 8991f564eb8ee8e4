//! 生產計劃建議模型

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Product, RawMaterial, UnitOfMeasurement};

/// 報表金額預設小數位數
pub const DEFAULT_REPORT_SCALE: u32 = 2;

/// 四捨五入（half-up）到指定小數位，只在報表邊界使用
pub fn round_half_up(value: Decimal, scale: u32) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
    // 補足小數位（125 → 125.00）
    rounded.rescale(scale);
    rounded
}

/// 建議生產項目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedItem {
    pub product_id: Uuid,
    pub product_code: String,
    pub product_name: String,

    /// 建議生產數量
    pub quantity: u32,

    /// 單位售價
    pub unit_price: Decimal,

    /// 項目總額（單價 × 數量）
    pub total_value: Decimal,
}

impl SuggestedItem {
    /// 由產品與數量建立項目
    pub fn new(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id,
            product_code: product.code.clone(),
            product_name: product.name.clone(),
            quantity,
            unit_price: product.price,
            total_value: product.value_of(quantity),
        }
    }
}

/// 原物料消耗（僅列出消耗量大於零者）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialConsumption {
    pub raw_material_id: Uuid,
    pub raw_material_code: String,
    pub raw_material_name: String,
    pub unit_of_measurement: UnitOfMeasurement,
    pub consumed_quantity: Decimal,
}

impl MaterialConsumption {
    pub fn new(material: &RawMaterial, consumed_quantity: Decimal) -> Self {
        Self {
            raw_material_id: material.id,
            raw_material_code: material.code.clone(),
            raw_material_name: material.name.clone(),
            unit_of_measurement: material.unit_of_measurement,
            consumed_quantity,
        }
    }
}

/// 原物料結存（每個原物料一筆）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialBalance {
    pub raw_material_id: Uuid,
    pub raw_material_code: String,
    pub raw_material_name: String,
    pub unit_of_measurement: UnitOfMeasurement,

    /// 期初數量
    pub initial_quantity: Decimal,

    /// 消耗數量（不小於零）
    pub consumed_quantity: Decimal,

    /// 結存數量
    pub balance_quantity: Decimal,
}

impl MaterialBalance {
    /// 創建結存記錄，消耗量在此截斷為不小於零
    pub fn new(material: &RawMaterial, initial_quantity: Decimal, balance_quantity: Decimal) -> Self {
        Self {
            raw_material_id: material.id,
            raw_material_code: material.code.clone(),
            raw_material_name: material.name.clone(),
            unit_of_measurement: material.unit_of_measurement,
            initial_quantity,
            consumed_quantity: (initial_quantity - balance_quantity).max(Decimal::ZERO),
            balance_quantity,
        }
    }

    /// 未消耗的結存（結存 = 期初）
    pub fn untouched(material: &RawMaterial, initial_quantity: Decimal) -> Self {
        Self::new(material, initial_quantity, initial_quantity)
    }
}

/// 生產計劃建議（優化結果報表）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanResult {
    /// 總銷售額（報表邊界四捨五入）
    pub total_sales_value: Decimal,

    /// 總生產數量
    pub total_produced_quantity: u64,

    /// 建議生產項目（依產品排序：售價降冪、代碼升冪）
    pub suggested_items: Vec<SuggestedItem>,

    /// 原物料消耗（依原物料代碼升冪）
    pub consumptions: Vec<MaterialConsumption>,

    /// 原物料結存（依原物料代碼升冪）
    pub balances: Vec<MaterialBalance>,
}

impl PlanResult {
    /// 是否有任何建議生產項目
    pub fn is_empty(&self) -> bool {
        self.suggested_items.is_empty()
    }

    /// 查找某產品的建議數量
    pub fn quantity_of(&self, product_code: &str) -> u32 {
        self.suggested_items
            .iter()
            .find(|item| item.product_code == product_code)
            .map(|item| item.quantity)
            .unwrap_or(0)
    }

    /// 查找某原物料的結存
    pub fn balance_of(&self, raw_material_code: &str) -> Option<&MaterialBalance> {
        self.balances
            .iter()
            .find(|balance| balance.raw_material_code == raw_material_code)
    }

    /// 查找某原物料的消耗
    pub fn consumption_of(&self, raw_material_code: &str) -> Option<&MaterialConsumption> {
        self.consumptions
            .iter()
            .find(|consumption| consumption.raw_material_code == raw_material_code)
    }
}
