//! 生產扣料
//!
//! 先驗證全部原物料是否足夠，再一次扣除；任何驗證失敗都不會修改庫存。

use prodplan_core::{PlanError, PlanResult, Product, RawMaterial, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 庫存異動記錄
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockMovement {
    pub raw_material_id: Uuid,
    pub raw_material_code: String,

    /// 扣料前數量
    pub quantity_before: Decimal,

    /// 扣除數量
    pub consumed: Decimal,

    /// 扣料後數量
    pub quantity_after: Decimal,
}

/// 生產執行器
pub struct ProductionExecutor;

impl ProductionExecutor {
    /// 生產 `quantity` 單位產品，從 `raw_materials` 扣除對應庫存
    pub fn produce(
        product: &Product,
        quantity: i64,
        raw_materials: &mut [RawMaterial],
    ) -> Result<Vec<StockMovement>> {
        if quantity <= 0 {
            return Err(PlanError::InvalidQuantity(quantity));
        }

        if !product.is_producible() {
            return Err(PlanError::EmptyComposition(product.code.clone()));
        }

        let multiplier = Decimal::from(quantity);

        // 第一階段：驗證
        let mut deductions = Vec::with_capacity(product.composition.len());
        for item in &product.composition {
            let required_quantity = match item.required_quantity {
                Some(qty) if qty > Decimal::ZERO => qty,
                _ => {
                    return Err(PlanError::InvalidRequirement {
                        product: product.code.clone(),
                        raw_material_id: item.raw_material_id,
                    })
                }
            };

            let index = raw_materials
                .iter()
                .position(|material| material.id == item.raw_material_id)
                .ok_or(PlanError::RawMaterialNotFound(item.raw_material_id))?;

            let material = &raw_materials[index];
            let required = required_quantity * multiplier;
            let available = material.available_stock();

            if available < required {
                return Err(PlanError::InsufficientStock {
                    code: material.code.clone(),
                    name: material.name.clone(),
                    required,
                    available,
                });
            }

            deductions.push((index, required));
        }

        // 第二階段：扣料
        let movements: Vec<StockMovement> = deductions
            .into_iter()
            .map(|(index, required)| {
                let material = &mut raw_materials[index];
                let quantity_before = material.available_stock();
                let quantity_after = quantity_before - required;
                material.stock_quantity = Some(quantity_after);

                StockMovement {
                    raw_material_id: material.id,
                    raw_material_code: material.code.clone(),
                    quantity_before,
                    consumed: required,
                    quantity_after,
                }
            })
            .collect();

        tracing::info!(
            "生產完成：產品 {} 數量 {}，扣料 {} 項",
            product.code,
            quantity,
            movements.len()
        );

        Ok(movements)
    }

    /// 依計劃建議逐項生產
    ///
    /// 全部項目成功才寫回庫存；任一項目失敗時 `raw_materials` 保持不變
    pub fn apply_plan(
        plan: &PlanResult,
        products: &[Product],
        raw_materials: &mut [RawMaterial],
    ) -> Result<Vec<StockMovement>> {
        let mut working = raw_materials.to_vec();
        let mut movements = Vec::new();

        for item in &plan.suggested_items {
            let product = products
                .iter()
                .find(|product| product.id == item.product_id)
                .ok_or_else(|| PlanError::ProductNotFound(item.product_code.clone()))?;

            movements.extend(Self::produce(
                product,
                i64::from(item.quantity),
                &mut working,
            )?);
        }

        raw_materials.clone_from_slice(&working);
        Ok(movements)
    }
}
