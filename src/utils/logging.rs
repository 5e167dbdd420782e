//! 日志工具模块
//!
//! 初始化 tracing 订阅者，并提供批量运行过程中的横幅输出

use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化全局日志
///
/// 优先使用 `RUST_LOG`，否则默认 `info`（`verbose` 时为 `debug`）。
/// 重复调用是安全的，只有第一次生效。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `base_url`: 评测站地址
/// - `members`: 用户数量
/// - `problems`: 题目数量
pub fn log_startup(base_url: &str, members: usize, problems: usize) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 Run started at {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("🌐 Judge: {}", base_url);
    info!(
        "📊 {} users x {} problems = {} jobs",
        members,
        problems,
        members.saturating_mul(problems)
    );
    info!("{}", "=".repeat(60));
}

/// 记录单个任务开始
pub fn log_job_start(job_num: usize, total_jobs: usize, username: &str, problem_id: &str) {
    info!("\n{}", "─".repeat(60));
    info!(
        "📦 Job {}/{}: user {} problem {}",
        job_num, total_jobs, username, problem_id
    );
}

/// 打印最终统计信息
pub fn print_final_stats(stats: &crate::orchestrator::RunStats, grid_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 Run finished");
    info!(
        "Finished at {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ Passed: {}/{}", stats.passed, stats.jobs);
    info!("❌ Not passed: {}", stats.failed);
    info!("📥 Submissions fetched: {}", stats.submissions);
    if stats.transport_errors > 0 {
        info!("⚠️ Jobs cut short by request errors: {}", stats.transport_errors);
    }
    if stats.report_failures > 0 {
        info!("⚠️ Submission files not written: {}", stats.report_failures);
    }
    info!("{}", "=".repeat(60));
    info!("\nGrid saved to {}", grid_path);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_startup_huge_counts() {
        log_startup("https://judge.example", usize::MAX, 3);
    }
}
