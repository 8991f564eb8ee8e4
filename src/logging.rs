//! 日誌初始化
//!
//! 使用 tracing-subscriber，日誌級別由 `RUST_LOG` 控制。

use tracing_subscriber::{fmt, EnvFilter};

/// 初始化日誌
///
/// # 環境變數
/// - RUST_LOG：日誌級別過濾（預設 info），
///   例如 `RUST_LOG=prodplan_optimizer=debug`
///
/// # 範例
/// ```no_run
/// prodplan::logging::init();
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .init();
}

/// 測試用日誌（debug 級別，輸出到測試擷取；重複呼叫不會失敗）
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
