//! 生產計劃優化配置

use serde::{Deserialize, Serialize};

use crate::plan::DEFAULT_REPORT_SCALE;
use crate::{PlanError, Result};

/// 預設搜尋節點上限
pub const DEFAULT_MAX_NODES: u64 = 10_000_000;

/// Decimal 支援的最大小數位數
const MAX_DECIMAL_SCALE: u32 = 28;

/// 優化器配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanConfig {
    /// 搜尋節點上限（None 表示不限制）
    ///
    /// 超過上限時停止搜尋，回傳目前找到的最佳解，並標記為非窮舉結果
    pub max_nodes: Option<u64>,

    /// 搜尋時間上限（毫秒，None 表示不限制）
    pub time_limit_ms: Option<u64>,

    /// 是否啟用上界剪枝
    ///
    /// 只剪掉「即使全部剩餘產品都做到上限，總額仍嚴格小於目前最佳」的分支，
    /// 因此結果與完整窮舉相同
    pub bound_pruning: bool,

    /// 報表金額小數位數
    pub report_scale: u32,
}

impl PlanConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self {
            max_nodes: Some(DEFAULT_MAX_NODES),
            time_limit_ms: None,
            bound_pruning: true,
            report_scale: DEFAULT_REPORT_SCALE,
        }
    }

    /// 完整窮舉配置：無節點與時間上限
    pub fn exhaustive() -> Self {
        Self::new().with_max_nodes(None)
    }

    /// 建構器模式：設置節點上限
    pub fn with_max_nodes(mut self, max_nodes: Option<u64>) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    /// 建構器模式：設置時間上限（毫秒）
    pub fn with_time_limit_ms(mut self, time_limit_ms: Option<u64>) -> Self {
        self.time_limit_ms = time_limit_ms;
        self
    }

    /// 建構器模式：設置是否啟用上界剪枝
    pub fn with_bound_pruning(mut self, enabled: bool) -> Self {
        self.bound_pruning = enabled;
        self
    }

    /// 建構器模式：設置報表小數位數
    pub fn with_report_scale(mut self, scale: u32) -> Self {
        self.report_scale = scale;
        self
    }

    /// 從 JSON 字串載入配置（缺少的欄位使用預設值）
    ///
    /// # 範例
    /// ```
    /// use prodplan_core::PlanConfig;
    ///
    /// let config = PlanConfig::from_json_str(r#"{ "max_nodes": 5000, "bound_pruning": false }"#).unwrap();
    /// assert_eq!(config.max_nodes, Some(5000));
    /// assert!(!config.bound_pruning);
    /// assert_eq!(config.report_scale, 2);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// 驗證配置
    pub fn validate(&self) -> Result<()> {
        if self.max_nodes == Some(0) {
            return Err(PlanError::InvalidConfig(
                "max_nodes 必須大於零".to_string(),
            ));
        }

        if self.report_scale > MAX_DECIMAL_SCALE {
            return Err(PlanError::InvalidConfig(format!(
                "report_scale 不可超過 {}：{}",
                MAX_DECIMAL_SCALE, self.report_scale
            )));
        }

        Ok(())
    }
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self::new()
    }
}
