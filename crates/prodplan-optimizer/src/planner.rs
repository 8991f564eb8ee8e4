//! 生產計劃入口

use prodplan_calc::{LedgerBuilder, PlanWarning};
use prodplan_core::{Catalog, PlanConfig, Result};
use rayon::prelude::*;

use crate::search::{SearchEngine, SearchStats};
use crate::PlanOutcome;

/// 生產計劃器
///
/// 不保存任何可變狀態，每次計算都使用目錄庫存的獨立副本，
/// 因此可在多執行緒間共用。
pub struct ProductionPlanner {
    config: PlanConfig,
}

impl ProductionPlanner {
    /// 創建計劃器（驗證配置）
    pub fn new(config: PlanConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PlanConfig {
        &self.config
    }

    /// 建議總銷售額最高的生產計劃
    pub fn suggest_optimal_plan(&self, catalog: &Catalog) -> Result<PlanOutcome> {
        tracing::info!(
            "開始生產計劃計算：產品 {} 項，原物料 {} 項",
            catalog.products.len(),
            catalog.raw_materials.len()
        );

        let start_time = std::time::Instant::now();
        let ledger = LedgerBuilder::new(self.config.report_scale);

        // Step 1: 篩選可生產產品並排序
        let products = catalog.producible_products();
        let raw_materials = catalog.sorted_raw_materials();
        let initial_stock = catalog.initial_stock();
        tracing::debug!("可生產產品: {} 項", products.len());

        let warnings = Self::catalog_warnings(catalog);

        // Step 2: 回溯搜尋
        let (plan, stats) = if products.is_empty() {
            tracing::debug!("沒有可生產的產品，略過搜尋");
            (ledger.empty_report(&raw_materials, &initial_stock), SearchStats::new())
        } else {
            let outcome = SearchEngine::new(&self.config).search(&products, &initial_stock)?;

            // Step 3: 建立報表
            let plan = ledger.build_report(
                &products,
                &raw_materials,
                &initial_stock,
                &outcome.best_quantities,
            );
            (plan, outcome.stats)
        };

        let mut result = PlanOutcome::new(plan, stats);
        for warning in warnings {
            result.add_warning(warning);
        }

        if !result.stats.exhaustive {
            tracing::warn!(
                "搜尋在 {} 個節點後中止，結果可能不是最佳解",
                result.stats.nodes_visited
            );
            result.add_warning(PlanWarning::warning(
                "search".to_string(),
                format!(
                    "搜尋超過上限（節點 {}），回傳目前找到的最佳計劃",
                    result.stats.nodes_visited
                ),
            ));
        }

        result.calculation_time_ms = Some(start_time.elapsed().as_millis());

        tracing::info!("生產計劃計算完成，耗時 {:?}", start_time.elapsed());
        tracing::info!(
            "建議生產 {} 項產品，共 {} 單位，總銷售額 {}",
            result.plan.suggested_items.len(),
            result.plan.total_produced_quantity,
            result.plan.total_sales_value
        );

        Ok(result)
    }

    /// 平行計算多個假設情境，結果順序與輸入相同
    pub fn suggest_scenarios(&self, catalogs: &[Catalog]) -> Vec<Result<PlanOutcome>> {
        tracing::info!("開始情境計算：{} 個情境", catalogs.len());

        catalogs
            .par_iter()
            .map(|catalog| self.suggest_optimal_plan(catalog))
            .collect()
    }

    /// 目錄資料問題（不阻止計算）
    fn catalog_warnings(catalog: &Catalog) -> Vec<PlanWarning> {
        let mut warnings = Vec::new();

        for product in &catalog.products {
            if product.is_producible() && product.has_invalid_requirement() {
                warnings.push(PlanWarning::info(
                    product.code.clone(),
                    "組成中有空值或非正數的用量，此產品不會被生產".to_string(),
                ));
            }
        }

        for (product_code, raw_material_id) in catalog.dangling_references() {
            tracing::debug!("產品 {} 引用不存在的原物料 {}", product_code, raw_material_id);
            warnings.push(PlanWarning::warning(
                product_code,
                format!("引用的原物料 {} 不在目錄中，視為庫存為零", raw_material_id),
            ));
        }

        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prodplan_calc::WarningSeverity;
    use prodplan_core::{Product, RawMaterial, UnitOfMeasurement};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    fn material(code: &str, stock: &str) -> RawMaterial {
        RawMaterial::new(
            code.to_string(),
            code.to_string(),
            UnitOfMeasurement::Kilogram,
            dec(stock),
        )
    }

    fn bakery() -> Catalog {
        let flour = material("MP-001", "10");
        let sugar = material("MP-002", "4");
        let cake = Product::new("P-001".to_string(), "Cake".to_string(), dec("50.00"))
            .with_item(flour.id, dec("5"))
            .with_item(sugar.id, dec("1"));
        let bread = Product::new("P-002".to_string(), "Bread".to_string(), dec("15.00"))
            .with_item(flour.id, dec("2"));

        Catalog::new(vec![bread, cake], vec![sugar, flour])
    }

    #[test]
    fn test_rejects_invalid_config() {
        assert!(ProductionPlanner::new(PlanConfig::new().with_report_scale(40)).is_err());
        assert!(ProductionPlanner::new(PlanConfig::new().with_max_nodes(Some(0))).is_err());
    }

    #[test]
    fn test_optimal_plan() {
        let planner = ProductionPlanner::new(PlanConfig::default()).unwrap();
        let outcome = planner.suggest_optimal_plan(&bakery()).unwrap();

        assert!(outcome.is_exhaustive());
        assert!(!outcome.has_warnings());
        assert!(outcome.calculation_time_ms.is_some());
        assert_eq!(outcome.plan.total_sales_value, dec("100.00"));
        assert_eq!(outcome.plan.quantity_of("P-001"), 2);
        assert_eq!(outcome.plan.quantity_of("P-002"), 0);

        // 結存依原物料代碼排序
        let codes: Vec<&str> = outcome
            .plan
            .balances
            .iter()
            .map(|balance| balance.raw_material_code.as_str())
            .collect();
        assert_eq!(codes, vec!["MP-001", "MP-002"]);
    }

    #[test]
    fn test_empty_catalog() {
        let planner = ProductionPlanner::new(PlanConfig::default()).unwrap();
        let outcome = planner.suggest_optimal_plan(&Catalog::default()).unwrap();

        assert!(outcome.plan.is_empty());
        assert_eq!(outcome.plan.total_sales_value.to_string(), "0.00");
        assert_eq!(outcome.stats.nodes_visited, 0);
    }

    #[test]
    fn test_catalog_warnings() {
        let flour = material("MP-001", "10");
        let mut broken = Product::new("P-009".to_string(), "Broken".to_string(), dec("9.00"))
            .with_item(flour.id, dec("1"));
        broken.composition[0].required_quantity = None;
        let ghost = Product::new("P-010".to_string(), "Ghost".to_string(), dec("3.00"))
            .with_item(Uuid::new_v4(), dec("1"));
        let catalog = Catalog::new(vec![broken, ghost], vec![flour]);

        let planner = ProductionPlanner::new(PlanConfig::default()).unwrap();
        let outcome = planner.suggest_optimal_plan(&catalog).unwrap();

        assert!(outcome.plan.is_empty());
        let info: Vec<_> = outcome.warnings_with(WarningSeverity::Info).collect();
        assert_eq!(info.len(), 1);
        assert_eq!(info[0].subject, "P-009");
        let warnings: Vec<_> = outcome.warnings_with(WarningSeverity::Warning).collect();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].subject, "P-010");
    }

    #[test]
    fn test_budget_exhaustion_warning() {
        let flour = material("MP-001", "30");
        let products = (0..5)
            .map(|i| {
                Product::new(format!("P-{i:03}"), format!("P-{i:03}"), dec("10.00"))
                    .with_item(flour.id, dec("1"))
            })
            .collect();
        let catalog = Catalog::new(products, vec![flour]);

        let planner = ProductionPlanner::new(
            PlanConfig::new()
                .with_max_nodes(Some(20))
                .with_bound_pruning(false),
        )
        .unwrap();
        let outcome = planner.suggest_optimal_plan(&catalog).unwrap();

        assert!(!outcome.is_exhaustive());
        assert_eq!(outcome.warnings_with(WarningSeverity::Warning).count(), 1);
        // 中止前已找到的計劃仍然可行
        assert!(outcome
            .plan
            .balances
            .iter()
            .all(|balance| balance.balance_quantity >= Decimal::ZERO));
        assert_eq!(outcome.plan.total_sales_value, dec("300.00"));
    }

    #[test]
    fn test_scenarios_keep_input_order() {
        let base = bakery();
        let mut richer = base.clone();
        for material in &mut richer.raw_materials {
            material.stock_quantity = Some(dec("100"));
        }

        let planner = ProductionPlanner::new(PlanConfig::default()).unwrap();
        let outcomes = planner.suggest_scenarios(&[base, richer, Catalog::default()]);

        assert_eq!(outcomes.len(), 3);
        let first = outcomes[0].as_ref().unwrap();
        let second = outcomes[1].as_ref().unwrap();
        let third = outcomes[2].as_ref().unwrap();

        assert_eq!(first.plan.total_sales_value, dec("100.00"));
        assert!(second.plan.total_sales_value > first.plan.total_sales_value);
        assert!(third.plan.is_empty());
    }
}
