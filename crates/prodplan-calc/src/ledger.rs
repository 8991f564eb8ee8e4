//! 計劃報表（消耗與結存）

use prodplan_core::plan::{round_half_up, DEFAULT_REPORT_SCALE};
use prodplan_core::{
    MaterialBalance, MaterialConsumption, PlanResult, Product, RawMaterial, StockSnapshot,
    SuggestedItem,
};
use rust_decimal::Decimal;

/// 計劃報表建構器
#[derive(Debug, Clone, Copy)]
pub struct LedgerBuilder {
    /// 總銷售額的小數位數
    report_scale: u32,
}

impl LedgerBuilder {
    pub fn new(report_scale: u32) -> Self {
        Self { report_scale }
    }

    /// 依最佳數量向量建立報表
    ///
    /// `products` 與 `quantities` 按相同順序對應；`raw_materials` 的順序即報表順序。
    /// 期末結存由期初庫存的副本重新扣料得出，不修改傳入的快照。
    pub fn build_report(
        &self,
        products: &[Product],
        raw_materials: &[RawMaterial],
        initial_stock: &StockSnapshot,
        quantities: &[u32],
    ) -> PlanResult {
        let mut final_stock = initial_stock.clone();
        let mut suggested_items = Vec::new();
        let mut total_sales_value = Decimal::ZERO;
        let mut total_produced_quantity: u64 = 0;

        for (product, &quantity) in products.iter().zip(quantities) {
            if quantity == 0 {
                continue;
            }

            let item = SuggestedItem::new(product, quantity);
            total_sales_value += item.total_value;
            total_produced_quantity += u64::from(quantity);
            suggested_items.push(item);

            final_stock.consume(product, quantity);
        }

        let mut consumptions = Vec::new();
        let mut balances = Vec::with_capacity(raw_materials.len());

        for material in raw_materials {
            let initial_quantity = initial_stock.available(&material.id);
            let balance_quantity = final_stock.available(&material.id);
            let consumed_quantity = initial_quantity - balance_quantity;

            if consumed_quantity > Decimal::ZERO {
                consumptions.push(MaterialConsumption::new(material, consumed_quantity));
            }

            balances.push(MaterialBalance::new(material, initial_quantity, balance_quantity));
        }

        tracing::debug!(
            "計劃報表：項目 {} 筆，消耗 {} 筆，結存 {} 筆",
            suggested_items.len(),
            consumptions.len(),
            balances.len()
        );

        PlanResult {
            total_sales_value: round_half_up(total_sales_value, self.report_scale),
            total_produced_quantity,
            suggested_items,
            consumptions,
            balances,
        }
    }

    /// 無任何生產時的報表：結存等於期初
    pub fn empty_report(&self, raw_materials: &[RawMaterial], initial_stock: &StockSnapshot) -> PlanResult {
        PlanResult {
            total_sales_value: round_half_up(Decimal::ZERO, self.report_scale),
            total_produced_quantity: 0,
            suggested_items: Vec::new(),
            consumptions: Vec::new(),
            balances: raw_materials
                .iter()
                .map(|material| {
                    MaterialBalance::untouched(material, initial_stock.available(&material.id))
                })
                .collect(),
        }
    }
}

impl Default for LedgerBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_REPORT_SCALE)
    }
}
