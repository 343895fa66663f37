/// 日志工具模块
///
/// 提供日志初始化和输出的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化 tracing（`RUST_LOG` 优先，默认 info，verbose 时为 debug）
///
/// 重复调用是安全的，第二次起直接忽略。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `source`: 数据来源描述（后端地址或快照文件）
pub fn log_startup(source: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 考试目录浏览");
    info!("📡 数据来源: {}", source);
    info!("{}", "=".repeat(60));
}

/// 记录数据加载信息
pub fn log_records_loaded(total: usize, items_per_view: usize) {
    info!("✓ 加载到 {} 条考试记录", total);
    info!("📋 每屏展示 {} 条", items_per_view);
}

/// 打印最终统计信息
///
/// # 参数
/// - `matched`: 筛选后数量
/// - `total`: 总数
/// - `window`: 当前可见区间描述
pub fn print_final_stats(matched: usize, total: usize, window: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 筛选完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 匹配: {}/{}", matched, total);
    info!("🪟 当前窗口: {}", window);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
