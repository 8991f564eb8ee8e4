//! 庫存快照模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::{Product, RawMaterial};

/// 庫存快照：原物料ID → 可用數量
///
/// 消耗與歸還是對稱操作，不做任何截斷（負值代表呼叫端的邏輯錯誤）。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockSnapshot {
    quantities: HashMap<Uuid, Decimal>,
}

impl StockSnapshot {
    /// 創建空的庫存快照
    pub fn new() -> Self {
        Self::default()
    }

    /// 從原物料列表建立快照（空值庫存視為零）
    pub fn from_materials(materials: &[RawMaterial]) -> Self {
        Self {
            quantities: materials
                .iter()
                .map(|material| (material.id, material.available_stock()))
                .collect(),
        }
    }

    /// 建構器模式：設置某原物料的數量
    pub fn with_quantity(mut self, raw_material_id: Uuid, quantity: Decimal) -> Self {
        self.set(raw_material_id, quantity);
        self
    }

    /// 設置某原物料的數量
    pub fn set(&mut self, raw_material_id: Uuid, quantity: Decimal) {
        self.quantities.insert(raw_material_id, quantity);
    }

    /// 可用數量（不存在時視為零）
    pub fn available(&self, raw_material_id: &Uuid) -> Decimal {
        self.quantities
            .get(raw_material_id)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// 是否包含某原物料
    pub fn contains(&self, raw_material_id: &Uuid) -> bool {
        self.quantities.contains_key(raw_material_id)
    }

    /// 扣除生產 `units` 單位產品所需的原物料
    ///
    /// 只異動快照中已有的原物料；不在快照內的原物料維持未記錄（讀取為零）
    pub fn consume(&mut self, product: &Product, units: u32) {
        for item in &product.composition {
            if let Some(quantity) = self.quantities.get_mut(&item.raw_material_id) {
                *quantity -= item.consumption_for(units);
            }
        }
    }

    /// 歸還生產 `units` 單位產品所扣除的原物料
    pub fn restore(&mut self, product: &Product, units: u32) {
        for item in &product.composition {
            if let Some(quantity) = self.quantities.get_mut(&item.raw_material_id) {
                *quantity += item.consumption_for(units);
            }
        }
    }

    /// 迭代所有原物料數量
    pub fn iter(&self) -> impl Iterator<Item = (&Uuid, &Decimal)> {
        self.quantities.iter()
    }

    /// 原物料數量
    pub fn len(&self) -> usize {
        self.quantities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }
}
