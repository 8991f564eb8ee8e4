//! 回溯搜尋引擎
//!
//! 深度優先列舉每個產品的生產數量（由高到低），在葉節點比較總銷售額，
//! 平手時以總生產數量較大者為優。

use prodplan_calc::FeasibilityCalculator;
use prodplan_core::{PlanConfig, PlanError, Product, Result, StockSnapshot};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use uuid::Uuid;

use crate::lease::{Requirement, StockLease};

/// 每隔多少節點檢查一次時間上限
const CLOCK_CHECK_INTERVAL: u64 = 1024;

/// 搜尋統計
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// 拜訪的節點數
    pub nodes_visited: u64,

    /// 評估的完整組合數
    pub leaves_evaluated: u64,

    /// 被上界剪掉的分支數
    pub pruned_branches: u64,

    /// 是否完整搜尋（未因節點或時間上限中止）
    pub exhaustive: bool,
}

impl SearchStats {
    pub fn new() -> Self {
        Self {
            nodes_visited: 0,
            leaves_evaluated: 0,
            pruned_branches: 0,
            exhaustive: true,
        }
    }
}

impl Default for SearchStats {
    fn default() -> Self {
        Self::new()
    }
}

/// 搜尋結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// 最佳數量向量（與輸入產品順序對應）
    pub best_quantities: Vec<u32>,

    /// 最佳總銷售額（未四捨五入）
    pub best_value: Decimal,

    /// 最佳總生產數量
    pub best_total_units: u64,

    pub stats: SearchStats,
}

/// 編譯後的產品：原物料以槽位索引
struct CompiledProduct {
    price: Decimal,
    requirements: Vec<Requirement>,
}

impl CompiledProduct {
    fn max_units(&self, stock: &[Decimal]) -> u32 {
        FeasibilityCalculator::max_units(
            self.requirements
                .iter()
                .map(|requirement| (stock[requirement.slot], requirement.quantity)),
        )
    }
}

/// 搜尋過程的可變狀態
struct SearchState {
    current: Vec<u32>,
    best: Vec<u32>,
    best_value: Decimal,
    best_units: u64,
    stats: SearchStats,
    max_nodes: Option<u64>,
    deadline: Option<Instant>,
}

impl SearchState {
    fn new(product_count: usize, config: &PlanConfig) -> Self {
        Self {
            current: vec![0; product_count],
            best: vec![0; product_count],
            best_value: Decimal::ZERO,
            best_units: 0,
            stats: SearchStats::new(),
            max_nodes: config.max_nodes,
            deadline: config
                .time_limit_ms
                .map(|ms| Instant::now() + Duration::from_millis(ms)),
        }
    }

    /// 是否已中止
    fn halted(&self) -> bool {
        !self.stats.exhaustive
    }

    /// 記錄一個節點；超過上限時中止搜尋
    fn enter_node(&mut self) -> bool {
        if let Some(max_nodes) = self.max_nodes {
            if self.stats.nodes_visited >= max_nodes {
                self.stats.exhaustive = false;
                return false;
            }
        }

        if let Some(deadline) = self.deadline {
            if self.stats.nodes_visited % CLOCK_CHECK_INTERVAL == 0 && Instant::now() >= deadline {
                self.stats.exhaustive = false;
                return false;
            }
        }

        self.stats.nodes_visited += 1;
        true
    }

    /// 評估完整組合
    fn evaluate(&mut self, value: Decimal, units: u64) {
        self.stats.leaves_evaluated += 1;

        let replace = match value.cmp(&self.best_value) {
            Ordering::Greater => true,
            Ordering::Equal => units > self.best_units,
            Ordering::Less => false,
        };

        if replace {
            self.best_value = value;
            self.best_units = units;
            self.best.clone_from(&self.current);
        }
    }
}

/// 回溯搜尋引擎
pub struct SearchEngine {
    config: PlanConfig,
}

impl SearchEngine {
    pub fn new(config: &PlanConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// 搜尋最佳生產組合
    ///
    /// `products` 應已過濾為可生產產品並依售價降冪、代碼升冪排序；
    /// 傳入的快照不會被修改。
    pub fn search(&self, products: &[Product], initial_stock: &StockSnapshot) -> Result<SearchOutcome> {
        let (compiled, mut stock) = Self::compile(products, initial_stock);
        let initial = stock.clone();
        let mut state = SearchState::new(compiled.len(), &self.config);

        tracing::debug!(
            "開始回溯搜尋：產品 {} 項，原物料槽位 {} 個",
            compiled.len(),
            stock.len()
        );

        if !compiled.is_empty() {
            self.explore(&compiled, 0, &mut stock, Decimal::ZERO, 0, &mut state);
        }

        if stock != initial {
            return Err(PlanError::InvariantViolation(
                "搜尋結束後庫存未還原".to_string(),
            ));
        }

        tracing::debug!(
            "搜尋結束：節點 {}，葉節點 {}，剪枝 {}，完整 {}",
            state.stats.nodes_visited,
            state.stats.leaves_evaluated,
            state.stats.pruned_branches,
            state.stats.exhaustive
        );

        Ok(SearchOutcome {
            best_quantities: state.best,
            best_value: state.best_value,
            best_total_units: state.best_units,
            stats: state.stats,
        })
    }

    /// 將產品組成轉成以槽位索引的需求，並建立對應的庫存陣列
    fn compile(products: &[Product], initial_stock: &StockSnapshot) -> (Vec<CompiledProduct>, Vec<Decimal>) {
        let mut slots: HashMap<Uuid, usize> = HashMap::new();
        let mut stock = Vec::new();

        let compiled = products
            .iter()
            .map(|product| CompiledProduct {
                price: product.price,
                requirements: product
                    .composition
                    .iter()
                    .map(|item| {
                        let slot = *slots.entry(item.raw_material_id).or_insert_with(|| {
                            stock.push(initial_stock.available(&item.raw_material_id));
                            stock.len() - 1
                        });

                        Requirement {
                            slot,
                            quantity: item.required_quantity,
                        }
                    })
                    .collect(),
            })
            .collect();

        (compiled, stock)
    }

    fn explore(
        &self,
        products: &[CompiledProduct],
        depth: usize,
        stock: &mut [Decimal],
        value: Decimal,
        units: u64,
        state: &mut SearchState,
    ) {
        if !state.enter_node() {
            return;
        }

        if depth == products.len() {
            state.evaluate(value, units);
            return;
        }

        if self.config.bound_pruning {
            // 嚴格小於才剪枝：可能平手的分支仍需探索以套用數量平手規則
            let bound = Self::optimistic_bound(&products[depth..], stock);
            if value + bound < state.best_value {
                state.stats.pruned_branches += 1;
                return;
            }
        }

        let product = &products[depth];
        let max_units = product.max_units(stock);

        for quantity in (0..=max_units).rev() {
            state.current[depth] = quantity;

            let mut lease = StockLease::take(stock, &product.requirements, quantity);
            self.explore(
                products,
                depth + 1,
                lease.stock(),
                value + product.price * Decimal::from(quantity),
                units + u64::from(quantity),
                state,
            );
            drop(lease);

            if state.halted() {
                break;
            }
        }

        state.current[depth] = 0;
    }

    /// 剩餘產品各自做到上限時的總額（忽略彼此搶料），作為可達總額的上界
    ///
    /// 非正售價的產品以 0 計：不生產永遠可行，貢獻不會低於 0
    fn optimistic_bound(remaining: &[CompiledProduct], stock: &[Decimal]) -> Decimal {
        remaining
            .iter()
            .map(|product| {
                product.price.max(Decimal::ZERO) * Decimal::from(product.max_units(stock))
            })
            .sum()
    }
}
