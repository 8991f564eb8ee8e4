//! 產品目錄（產品 + 原物料）載入與排序

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

use crate::{Product, RawMaterial, Result, StockSnapshot};

/// 產品目錄
///
/// 由外部持久層提供的產品與原物料清單，優化器只讀取不修改
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub products: Vec<Product>,

    #[serde(default)]
    pub raw_materials: Vec<RawMaterial>,
}

impl Catalog {
    /// 創建新的目錄
    pub fn new(products: Vec<Product>, raw_materials: Vec<RawMaterial>) -> Self {
        Self {
            products,
            raw_materials,
        }
    }

    /// 從 JSON 字串載入目錄
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// 可生產的產品（有組成），依售價降冪、代碼升冪排序
    ///
    /// 排序是剪枝啟發式，不影響最佳值；但平手時的結果依此順序決定
    pub fn producible_products(&self) -> Vec<Product> {
        let mut products: Vec<Product> = self
            .products
            .iter()
            .filter(|product| product.is_producible())
            .cloned()
            .collect();

        products.sort_by(|a, b| b.price.cmp(&a.price).then_with(|| a.code.cmp(&b.code)));
        products
    }

    /// 原物料依代碼升冪排序（報表順序）
    pub fn sorted_raw_materials(&self) -> Vec<RawMaterial> {
        let mut materials = self.raw_materials.clone();
        materials.sort_by(|a, b| a.code.cmp(&b.code));
        materials
    }

    /// 期初庫存快照
    pub fn initial_stock(&self) -> StockSnapshot {
        StockSnapshot::from_materials(&self.raw_materials)
    }

    /// 依ID查找原物料
    pub fn raw_material(&self, id: &Uuid) -> Option<&RawMaterial> {
        self.raw_materials.iter().find(|material| material.id == *id)
    }

    /// 依代碼查找產品
    pub fn product_by_code(&self, code: &str) -> Option<&Product> {
        self.products.iter().find(|product| product.code == code)
    }

    /// 組成中引用、但不在目錄內的原物料ID（依產品代碼分組）
    pub fn dangling_references(&self) -> Vec<(String, Uuid)> {
        let known: HashSet<Uuid> = self.raw_materials.iter().map(|m| m.id).collect();

        self.products
            .iter()
            .flat_map(|product| {
                product
                    .composition
                    .iter()
                    .filter(|item| !known.contains(&item.raw_material_id))
                    .map(|item| (product.code.clone(), item.raw_material_id))
            })
            .collect()
    }
}
