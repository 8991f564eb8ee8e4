//! 烘焙坊生產計劃示例

use anyhow::Context;
use prodplan::{
    logging, Catalog, PlanConfig, Product, ProductionExecutor, ProductionPlanner, RawMaterial,
    UnitOfMeasurement,
};
use rust_decimal::Decimal;

fn main() -> anyhow::Result<()> {
    logging::init();

    println!("=== 烘焙坊生產計劃示例 ===\n");

    // 原物料
    let flour = RawMaterial::new(
        "MP-001".to_string(),
        "麵粉".to_string(),
        UnitOfMeasurement::Kilogram,
        Decimal::new(250, 1),
    );
    let sugar = RawMaterial::new(
        "MP-002".to_string(),
        "糖".to_string(),
        UnitOfMeasurement::Kilogram,
        Decimal::from(8),
    );
    let eggs = RawMaterial::new(
        "MP-003".to_string(),
        "雞蛋".to_string(),
        UnitOfMeasurement::Unit,
        Decimal::from(36),
    );

    // 產品
    let products = vec![
        Product::new("P-001".to_string(), "蛋糕".to_string(), Decimal::new(4500, 2))
            .with_item(flour.id, Decimal::from(3))
            .with_item(sugar.id, Decimal::new(15, 1))
            .with_item(eggs.id, Decimal::from(4)),
        Product::new("P-002".to_string(), "餅乾".to_string(), Decimal::new(350, 2))
            .with_item(flour.id, Decimal::new(4, 1))
            .with_item(sugar.id, Decimal::new(2, 1)),
        Product::new("P-003".to_string(), "麵包".to_string(), Decimal::new(1200, 2))
            .with_item(flour.id, Decimal::new(12, 1))
            .with_item(eggs.id, Decimal::from(1)),
    ];

    let mut catalog = Catalog::new(products, vec![flour, sugar, eggs]);

    let config = PlanConfig::new().with_time_limit_ms(Some(5_000));
    let planner = ProductionPlanner::new(config).context("配置無效")?;
    let outcome = planner
        .suggest_optimal_plan(&catalog)
        .context("生產計劃計算失敗")?;

    println!("建議生產:");
    for item in &outcome.plan.suggested_items {
        println!(
            "  - {} {}: {} 單位 × {} = {}",
            item.product_code, item.product_name, item.quantity, item.unit_price, item.total_value
        );
    }
    println!(
        "總銷售額: {}（共 {} 單位）\n",
        outcome.plan.total_sales_value, outcome.plan.total_produced_quantity
    );

    println!("原物料結存:");
    for balance in &outcome.plan.balances {
        println!(
            "  - {} {}: 期初 {}，消耗 {}，結存 {}",
            balance.raw_material_code,
            balance.raw_material_name,
            balance.initial_quantity,
            balance.consumed_quantity,
            balance.balance_quantity
        );
    }

    println!(
        "\n搜尋節點 {}，剪枝 {}，耗時 {:?} ms",
        outcome.stats.nodes_visited, outcome.stats.pruned_branches, outcome.calculation_time_ms
    );
    for warning in &outcome.warnings {
        println!("  [{:?}] {}: {}", warning.severity, warning.subject, warning.message);
    }

    // 依建議實際扣料
    let movements = ProductionExecutor::apply_plan(
        &outcome.plan,
        &catalog.products,
        &mut catalog.raw_materials,
    )
    .context("套用生產計劃失敗")?;
    println!("\n已扣料 {} 筆", movements.len());

    println!("\n計劃 JSON:");
    println!("{}", serde_json::to_string_pretty(&outcome.plan)?);

    Ok(())
}
