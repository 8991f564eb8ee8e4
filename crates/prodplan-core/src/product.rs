//! 產品與組成（BOM）模型

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// 組成項目：每生產一單位產品所需的原物料數量
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionItem {
    /// 原物料ID
    pub raw_material_id: Uuid,

    /// 單位用量（空值或非正數時，該產品不可生產）
    #[serde(default)]
    pub required_quantity: Option<Decimal>,
}

impl CompositionItem {
    /// 創建新的組成項目
    pub fn new(raw_material_id: Uuid, required_quantity: Decimal) -> Self {
        Self {
            raw_material_id,
            required_quantity: Some(required_quantity),
        }
    }

    /// 用量是否有效（大於零）
    pub fn has_valid_quantity(&self) -> bool {
        matches!(self.required_quantity, Some(qty) if qty > Decimal::ZERO)
    }

    /// 生產 `units` 單位所需的用量
    pub fn consumption_for(&self, units: u32) -> Decimal {
        self.required_quantity.unwrap_or(Decimal::ZERO) * Decimal::from(units)
    }
}

/// 產品
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// 產品ID
    pub id: Uuid,

    /// 產品代碼（唯一）
    pub code: String,

    /// 名稱
    pub name: String,

    /// 單位售價
    pub price: Decimal,

    /// 組成（同一原物料不重複出現）
    #[serde(default, deserialize_with = "null_as_empty")]
    pub composition: Vec<CompositionItem>,
}

impl Product {
    /// 創建新的產品（尚無組成）
    pub fn new(code: String, name: String, price: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            code,
            name,
            price,
            composition: Vec::new(),
        }
    }

    /// 建構器模式：設置ID
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// 建構器模式：添加組成項目
    ///
    /// 同一原物料重複加入時，以後加入的用量取代先前的
    pub fn with_item(mut self, raw_material_id: Uuid, required_quantity: Decimal) -> Self {
        self.add_item(CompositionItem::new(raw_material_id, required_quantity));
        self
    }

    /// 添加組成項目
    pub fn add_item(&mut self, item: CompositionItem) {
        match self
            .composition
            .iter_mut()
            .find(|existing| existing.raw_material_id == item.raw_material_id)
        {
            Some(existing) => *existing = item,
            None => self.composition.push(item),
        }
    }

    /// 是否可生產（有組成）
    pub fn is_producible(&self) -> bool {
        !self.composition.is_empty()
    }

    /// 是否有無效用量的組成項目
    pub fn has_invalid_requirement(&self) -> bool {
        self.composition.iter().any(|item| !item.has_valid_quantity())
    }

    /// 生產 `units` 單位的總售價
    pub fn value_of(&self, units: u32) -> Decimal {
        self.price * Decimal::from(units)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<CompositionItem>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<CompositionItem>>::deserialize(deserializer)?.unwrap_or_default())
}
