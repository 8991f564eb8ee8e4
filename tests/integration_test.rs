//! 集成測試

use prodplan::{
    logging, Catalog, PlanConfig, PlanError, Product, ProductionExecutor, ProductionPlanner,
    RawMaterial, UnitOfMeasurement, WarningSeverity,
};
use rstest::{fixture, rstest};
use rust_decimal::Decimal;

fn dec(value: &str) -> Decimal {
    value.parse().unwrap()
}

fn material(code: &str, name: &str, stock: &str) -> RawMaterial {
    RawMaterial::new(
        code.to_string(),
        name.to_string(),
        UnitOfMeasurement::Kilogram,
        dec(stock),
    )
}

#[fixture]
fn planner() -> ProductionPlanner {
    logging::init_test();
    ProductionPlanner::new(PlanConfig::default()).unwrap()
}

#[rstest]
fn test_single_product_uses_all_stock(planner: ProductionPlanner) {
    // 場景：1 種產品，麵粉 10，每單位 2，售價 25.00
    let flour = material("MP-001", "Flour", "10");
    let cake = Product::new("P-001".to_string(), "Cake".to_string(), dec("25.00"))
        .with_item(flour.id, dec("2"));
    let catalog = Catalog::new(vec![cake], vec![flour]);

    let outcome = planner.suggest_optimal_plan(&catalog).unwrap();
    let plan = &outcome.plan;

    assert_eq!(plan.quantity_of("P-001"), 5);
    assert_eq!(plan.total_sales_value, dec("125.00"));
    assert_eq!(plan.total_sales_value.to_string(), "125.00");
    assert_eq!(plan.total_produced_quantity, 5);

    let consumption = plan.consumption_of("MP-001").unwrap();
    assert_eq!(consumption.consumed_quantity, dec("10"));

    let balance = plan.balance_of("MP-001").unwrap();
    assert_eq!(balance.initial_quantity, dec("10"));
    assert_eq!(balance.balance_quantity, Decimal::ZERO);
}

#[rstest]
fn test_bottleneck_material(planner: ProductionPlanner) {
    // 場景：麵粉 20（每單位 2），糖 3（每單位 1）→ 糖是瓶頸
    let flour = material("MP-001", "Flour", "20");
    let sugar = material("MP-002", "Sugar", "3");
    let cookie = Product::new("P-001".to_string(), "Cookie".to_string(), dec("10.00"))
        .with_item(flour.id, dec("2"))
        .with_item(sugar.id, dec("1"));
    let catalog = Catalog::new(vec![cookie], vec![flour, sugar]);

    let outcome = planner.suggest_optimal_plan(&catalog).unwrap();

    assert_eq!(outcome.plan.quantity_of("P-001"), 3);
    assert_eq!(outcome.plan.total_sales_value, dec("30.00"));
    assert_eq!(outcome.plan.balance_of("MP-001").unwrap().balance_quantity, dec("14"));
    assert_eq!(outcome.plan.balance_of("MP-002").unwrap().balance_quantity, Decimal::ZERO);
}

#[rstest]
#[case::value_wins("15.00", 2, 0, 2)]
#[case::tie_prefers_more_units("20.00", 0, 5, 5)]
fn test_competing_products(
    planner: ProductionPlanner,
    #[case] bread_price: &str,
    #[case] cakes: u32,
    #[case] breads: u32,
    #[case] total_units: u64,
) {
    // 蛋糕：50.00，每單位麵粉 5；麵包：每單位麵粉 2；麵粉 10
    let flour = material("MP-001", "Flour", "10");
    let cake = Product::new("P-001".to_string(), "Cake".to_string(), dec("50.00"))
        .with_item(flour.id, dec("5"));
    let bread = Product::new("P-002".to_string(), "Bread".to_string(), dec(bread_price))
        .with_item(flour.id, dec("2"));
    let catalog = Catalog::new(vec![bread, cake], vec![flour]);

    let outcome = planner.suggest_optimal_plan(&catalog).unwrap();

    assert_eq!(outcome.plan.total_sales_value, dec("100.00"));
    assert_eq!(outcome.plan.quantity_of("P-001"), cakes);
    assert_eq!(outcome.plan.quantity_of("P-002"), breads);
    assert_eq!(outcome.plan.total_produced_quantity, total_units);
}

#[rstest]
fn test_zero_stock_material_blocks_product(planner: ProductionPlanner) {
    let flour = material("MP-001", "Flour", "10");
    let yeast = material("MP-002", "Yeast", "0");
    let untracked = material("MP-003", "Salt", "0").without_stock();
    let bread = Product::new("P-001".to_string(), "Bread".to_string(), dec("15.00"))
        .with_item(flour.id, dec("2"))
        .with_item(yeast.id, dec("0.1"));
    let pretzel = Product::new("P-002".to_string(), "Pretzel".to_string(), dec("4.00"))
        .with_item(untracked.id, dec("0.5"));
    let catalog = Catalog::new(vec![bread, pretzel], vec![flour, yeast, untracked]);

    let outcome = planner.suggest_optimal_plan(&catalog).unwrap();

    assert!(outcome.plan.is_empty());
    assert!(outcome.plan.consumptions.is_empty());
    assert_eq!(outcome.plan.total_sales_value.to_string(), "0.00");

    // 每個原物料都出現在結存中，且維持期初數量
    assert_eq!(outcome.plan.balances.len(), 3);
    assert_eq!(outcome.plan.balance_of("MP-001").unwrap().balance_quantity, dec("10"));
    assert_eq!(outcome.plan.balance_of("MP-002").unwrap().balance_quantity, Decimal::ZERO);
    assert_eq!(outcome.plan.balance_of("MP-003").unwrap().initial_quantity, Decimal::ZERO);
}

#[rstest]
fn test_catalog_without_producible_products(planner: ProductionPlanner) {
    let flour = material("MP-001", "Flour", "10");
    let gift_card = Product::new("P-001".to_string(), "Gift Card".to_string(), dec("100.00"));
    let catalog = Catalog::new(vec![gift_card], vec![flour]);

    let outcome = planner.suggest_optimal_plan(&catalog).unwrap();

    assert!(outcome.plan.is_empty());
    assert!(outcome.is_exhaustive());
    assert_eq!(outcome.stats.nodes_visited, 0);
    assert_eq!(outcome.plan.balances.len(), 1);
}

#[rstest]
fn test_repeated_calls_are_idempotent(planner: ProductionPlanner) {
    let flour = material("MP-001", "Flour", "17.5");
    let sugar = material("MP-002", "Sugar", "6");
    let butter = material("MP-003", "Butter", "4.25");
    let products = vec![
        Product::new("P-001".to_string(), "Cake".to_string(), dec("42.50"))
            .with_item(flour.id, dec("3"))
            .with_item(sugar.id, dec("1.5"))
            .with_item(butter.id, dec("0.75")),
        Product::new("P-002".to_string(), "Cookie".to_string(), dec("3.35"))
            .with_item(flour.id, dec("0.4"))
            .with_item(sugar.id, dec("0.2")),
        Product::new("P-003".to_string(), "Croissant".to_string(), dec("7.90"))
            .with_item(flour.id, dec("0.8"))
            .with_item(butter.id, dec("0.5")),
    ];
    let catalog = Catalog::new(products, vec![flour, sugar, butter]);
    let before = catalog.clone();

    let first = planner.suggest_optimal_plan(&catalog).unwrap();
    let second = planner.suggest_optimal_plan(&catalog).unwrap();

    assert_eq!(first.plan, second.plan);
    assert_eq!(first.stats, second.stats);
    assert_eq!(catalog, before);

    // 結存不可為負
    assert!(first
        .plan
        .balances
        .iter()
        .all(|balance| balance.balance_quantity >= Decimal::ZERO));
}

#[rstest]
fn test_pruning_matches_exhaustive_search() {
    logging::init_test();

    let flour = material("MP-001", "Flour", "23");
    let sugar = material("MP-002", "Sugar", "11");
    let products = vec![
        Product::new("P-001".to_string(), "Cake".to_string(), dec("38.00"))
            .with_item(flour.id, dec("4"))
            .with_item(sugar.id, dec("2")),
        Product::new("P-002".to_string(), "Tart".to_string(), dec("21.00"))
            .with_item(flour.id, dec("2"))
            .with_item(sugar.id, dec("1.5")),
        Product::new("P-003".to_string(), "Bun".to_string(), dec("9.50"))
            .with_item(flour.id, dec("1")),
        Product::new("P-004".to_string(), "Candy".to_string(), dec("4.00"))
            .with_item(sugar.id, dec("0.5")),
    ];
    let catalog = Catalog::new(products, vec![flour, sugar]);

    let pruned = ProductionPlanner::new(PlanConfig::exhaustive())
        .unwrap()
        .suggest_optimal_plan(&catalog)
        .unwrap();
    let full = ProductionPlanner::new(PlanConfig::exhaustive().with_bound_pruning(false))
        .unwrap()
        .suggest_optimal_plan(&catalog)
        .unwrap();

    assert_eq!(pruned.plan, full.plan);
    assert!(pruned.stats.nodes_visited <= full.stats.nodes_visited);
    assert_eq!(full.stats.pruned_branches, 0);
}

#[rstest]
fn test_plan_from_json_catalog(planner: ProductionPlanner) {
    let json = r#"{
        "raw_materials": [
            {
                "id": "6f1d2a10-0000-4000-8000-000000000001",
                "code": "MP-001",
                "name": "Flour",
                "unit_of_measurement": "KILOGRAM",
                "stock_quantity": "10"
            },
            {
                "id": "6f1d2a10-0000-4000-8000-000000000002",
                "code": "MP-002",
                "name": "Milk",
                "unit_of_measurement": "LITER",
                "stock_quantity": null
            }
        ],
        "products": [
            {
                "id": "6f1d2a10-0000-4000-8000-0000000000a1",
                "code": "P-001",
                "name": "Cake",
                "price": "25.00",
                "composition": [
                    { "raw_material_id": "6f1d2a10-0000-4000-8000-000000000001", "required_quantity": "2" }
                ]
            },
            {
                "id": "6f1d2a10-0000-4000-8000-0000000000a2",
                "code": "P-002",
                "name": "Pudding",
                "price": "30.00",
                "composition": [
                    { "raw_material_id": "6f1d2a10-0000-4000-8000-000000000002", "required_quantity": "0.5" }
                ]
            },
            {
                "id": "6f1d2a10-0000-4000-8000-0000000000a3",
                "code": "P-003",
                "name": "Voucher",
                "price": "5.00",
                "composition": null
            }
        ]
    }"#;

    let catalog = Catalog::from_json_str(json).unwrap();
    let outcome = planner.suggest_optimal_plan(&catalog).unwrap();

    assert_eq!(outcome.plan.quantity_of("P-001"), 5);
    assert_eq!(outcome.plan.quantity_of("P-002"), 0);
    assert_eq!(outcome.plan.total_sales_value, dec("125.00"));

    let serialized = serde_json::to_value(&outcome.plan).unwrap();
    assert_eq!(serialized["total_produced_quantity"], 5);
    assert_eq!(serialized["suggested_items"][0]["product_code"], "P-001");
}

#[rstest]
fn test_malformed_catalog_json() {
    assert!(matches!(
        Catalog::from_json_str("{ \"products\": 42 }"),
        Err(PlanError::Json(_))
    ));
}

#[rstest]
fn test_dangling_reference_warning(planner: ProductionPlanner) {
    let flour = material("MP-001", "Flour", "10");
    let missing = material("MP-999", "Missing", "100");
    let cake = Product::new("P-001".to_string(), "Cake".to_string(), dec("25.00"))
        .with_item(flour.id, dec("2"))
        .with_item(missing.id, dec("1"));
    let catalog = Catalog::new(vec![cake], vec![flour]);

    let outcome = planner.suggest_optimal_plan(&catalog).unwrap();

    // 不存在的原物料視為庫存為零
    assert!(outcome.plan.is_empty());
    assert_eq!(outcome.warnings_with(WarningSeverity::Warning).count(), 1);
}

#[rstest]
fn test_apply_suggested_plan(planner: ProductionPlanner) {
    let flour = material("MP-001", "Flour", "20");
    let sugar = material("MP-002", "Sugar", "7");
    let cake = Product::new("P-001".to_string(), "Cake".to_string(), dec("30.00"))
        .with_item(flour.id, dec("4"))
        .with_item(sugar.id, dec("2"));
    let cookie = Product::new("P-002".to_string(), "Cookie".to_string(), dec("2.50"))
        .with_item(flour.id, dec("0.5"))
        .with_item(sugar.id, dec("0.25"));
    let mut catalog = Catalog::new(vec![cake, cookie], vec![flour, sugar]);

    let outcome = planner.suggest_optimal_plan(&catalog).unwrap();
    ProductionExecutor::apply_plan(&outcome.plan, &catalog.products, &mut catalog.raw_materials)
        .unwrap();

    // 實際扣料後的庫存與報表結存一致
    for material in &catalog.raw_materials {
        let balance = outcome.plan.balance_of(&material.code).unwrap();
        assert_eq!(material.available_stock(), balance.balance_quantity);
    }

    // 重新計劃時只能用剩下的庫存
    let replanned = planner.suggest_optimal_plan(&catalog).unwrap();
    assert!(replanned.plan.total_sales_value < outcome.plan.total_sales_value);
}

#[rstest]
fn test_scenarios(planner: ProductionPlanner) {
    let scenarios: Vec<Catalog> = ["4", "10", "25"]
        .iter()
        .map(|stock| {
            let flour = material("MP-001", "Flour", stock);
            let cake = Product::new("P-001".to_string(), "Cake".to_string(), dec("25.00"))
                .with_item(flour.id, dec("2"));
            Catalog::new(vec![cake], vec![flour])
        })
        .collect();

    let totals: Vec<Decimal> = planner
        .suggest_scenarios(&scenarios)
        .into_iter()
        .map(|outcome| outcome.unwrap().plan.total_sales_value)
        .collect();

    assert_eq!(totals, vec![dec("50.00"), dec("125.00"), dec("300.00")]);
}
