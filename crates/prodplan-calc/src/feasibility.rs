//! 可生產量計算

use prodplan_core::{Product, StockSnapshot};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// 可生產量計算器
pub struct FeasibilityCalculator;

impl FeasibilityCalculator {
    /// 在不超過任一原物料庫存的前提下，產品最多可生產的整數單位
    ///
    /// - 任一用量為空值或非正數：回傳 0（無法合理界定上限）
    /// - 各原物料取 `floor(可用 / 用量)` 的最小值
    /// - 沒有組成：回傳 0，而不是「無上限」
    pub fn max_producible_units(product: &Product, stock: &StockSnapshot) -> u32 {
        Self::max_units(
            product
                .composition
                .iter()
                .map(|item| (stock.available(&item.raw_material_id), item.required_quantity)),
        )
    }

    /// 依 (可用數量, 單位用量) 序列計算最大可生產單位
    pub fn max_units<I>(requirements: I) -> u32
    where
        I: IntoIterator<Item = (Decimal, Option<Decimal>)>,
    {
        let mut maximum: Option<u32> = None;

        for (available, required) in requirements {
            let required = match required {
                Some(qty) if qty > Decimal::ZERO => qty,
                _ => return 0,
            };

            let units = Self::units_from(available, required);
            let current = maximum.map_or(units, |m| m.min(units));
            if current == 0 {
                return 0;
            }
            maximum = Some(current);
        }

        maximum.unwrap_or(0)
    }

    /// 單一原物料可支撐的單位數（向零截斷，scale 0）
    fn units_from(available: Decimal, required: Decimal) -> u32 {
        if available <= Decimal::ZERO {
            return 0;
        }

        match available.checked_div(required) {
            Some(ratio) => ratio.trunc().to_u32().unwrap_or(u32::MAX),
            // 商超出 Decimal 範圍
            None => u32::MAX,
        }
    }
}
