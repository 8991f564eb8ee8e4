//! 搜尋中的庫存租借（扣料後離開作用域自動歸還）

use rust_decimal::Decimal;

/// 編譯後的組成需求：原物料槽位 + 單位用量
#[derive(Debug, Clone)]
pub(crate) struct Requirement {
    pub slot: usize,
    pub quantity: Option<Decimal>,
}

impl Requirement {
    fn consumption_for(&self, units: u32) -> Decimal {
        self.quantity.unwrap_or(Decimal::ZERO) * Decimal::from(units)
    }
}

/// 庫存租借
///
/// 建立時扣除 `units` 單位的用量，Drop 時原數歸還。
/// 所有離開分支的路徑（包含提前返回）都會經過 Drop。
pub(crate) struct StockLease<'s, 'r> {
    stock: &'s mut [Decimal],
    requirements: &'r [Requirement],
    units: u32,
}

impl<'s, 'r> StockLease<'s, 'r> {
    pub(crate) fn take(stock: &'s mut [Decimal], requirements: &'r [Requirement], units: u32) -> Self {
        if units > 0 {
            for requirement in requirements {
                stock[requirement.slot] -= requirement.consumption_for(units);
            }
        }

        Self {
            stock,
            requirements,
            units,
        }
    }

    /// 扣料後的庫存
    pub(crate) fn stock(&mut self) -> &mut [Decimal] {
        self.stock
    }
}

impl Drop for StockLease<'_, '_> {
    fn drop(&mut self) {
        if self.units > 0 {
            for requirement in self.requirements {
                self.stock[requirement.slot] += requirement.consumption_for(self.units);
            }
        }
    }
}
