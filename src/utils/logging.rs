/// 日志工具模块
///
/// 提供日志初始化和格式化输出的辅助函数
use std::path::Path;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::models::ApplicationResult;
use crate::orchestrator::JobStats;

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，否则按 `verbose` 选择 debug 或 info
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - {:?} 模式", config.options.mode);
    info!("🌐 环境: {:?} ({})", config.environment, config.base_url);
    info!(
        "🔍 搜索: {} @ {}，最多 {} 个职位",
        config.keyword, config.location, config.max_applies
    );
    if config.options.live_apply {
        info!("⚡ LIVE_APPLY=true，将真正提交申请");
    } else {
        info!("🛡️ Dry-run 模式，不会提交任何申请");
    }
    info!("{}", "=".repeat(60));
}

/// 记录阶段开始
pub fn log_phase(name: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📦 {}", name);
    info!("{}", "=".repeat(60));
}

/// 逐条输出本次运行的结果
pub fn log_run_summary(results: &[ApplicationResult]) {
    info!("📋 运行结果 ({} 条):", results.len());
    for (i, result) in results.iter().enumerate() {
        info!("{}. {}", i + 1, truncate_text(&result.to_string(), 200));
    }
}

/// 打印最终统计信息
pub fn print_final_stats(results: &[ApplicationResult], saved_to: Option<&Path>, config: &Config) {
    let stats = JobStats::from_results(results);
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 已投递: {}/{}", stats.applied, stats.total());
    info!("🛡️ Dry-run: {}", stats.dry_run);
    info!("⏭️ 跳过: {}", stats.skipped);
    info!("❌ 失败: {}", stats.failed);
    info!("{}", "=".repeat(60));
    match saved_to {
        Some(path) => info!("\n结果已保存至: {}", path.display()),
        None => info!("\n结果未能保存到 {}", config.results_dir.display()),
    }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        assert_eq!(truncate_text("职位申请结果", 4), "职位申请...");
        assert_eq!(truncate_text("short", 10), "short");
    }
}
