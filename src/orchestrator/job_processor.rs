//! 职位队列处理器 - 编排层
//!
//! ## 职责
//!
//! 1. **遍历职位**：按收集顺序逐个处理 `Vec<JobLink>`
//! 2. **流程调度**：创建并复用 `ApplyFlow`
//! 3. **节奏控制**：每个职位之后随机停顿
//! 4. **统计输出**：按状态汇总本次处理结果
//!
//! 职位之间严格串行，一个职位失败不会影响后续职位

use tracing::info;

use crate::config::Config;
use crate::infrastructure::BrowserSession;
use crate::models::{ApplicationResult, ApplyStatus, Credentials, JobLink};
use crate::workflow::{ApplyFlow, JobCtx};

/// 职位处理统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct JobStats {
    pub applied: usize,
    pub dry_run: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl JobStats {
    pub fn from_results(results: &[ApplicationResult]) -> Self {
        let mut stats = Self::default();
        for result in results {
            match result.status() {
                ApplyStatus::Applied => stats.applied += 1,
                ApplyStatus::DryRun => stats.dry_run += 1,
                ApplyStatus::Skipped => stats.skipped += 1,
                ApplyStatus::Error => stats.failed += 1,
            }
        }
        stats
    }

    pub fn total(&self) -> usize {
        self.applied + self.dry_run + self.skipped + self.failed
    }
}

/// 处理所有职位，每个链接恰好产生一个结果，顺序与输入一致
pub async fn process_jobs<S: BrowserSession>(
    session: &S,
    config: &Config,
    credentials: &Credentials,
    links: Vec<JobLink>,
) -> Vec<ApplicationResult> {
    let total = links.len();
    if total == 0 {
        info!("没有需要处理的职位");
        return Vec::new();
    }

    // 创建流程对象（只创建一次，复用）
    let flow = ApplyFlow::new(config, credentials);
    let mut results = Vec::with_capacity(total);

    for (index, link) in links.into_iter().enumerate() {
        let ctx = JobCtx::new(link, index + 1, total);
        results.push(flow.run(session, &ctx).await);
        config.job_pacing.pause().await;
    }

    log_jobs_complete(&JobStats::from_results(&results));
    results
}

fn log_jobs_complete(stats: &JobStats) {
    info!("\n{}", "─".repeat(60));
    info!(
        "✓ 职位处理完成: 已投递 {} / dry-run {} / 跳过 {} / 失败 {} (共 {})",
        stats.applied,
        stats.dry_run,
        stats.skipped,
        stats.failed,
        stats.total()
    );
    info!("{}", "─".repeat(60));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_count_every_status() {
        let results = vec![
            ApplicationResult::applied("https://a.example/1", "confirmed"),
            ApplicationResult::dry_run("https://a.example/2", "would-submit"),
            ApplicationResult::dry_run("https://a.example/3", "would-submit"),
            ApplicationResult::skipped("https://a.example/4", "no apply button"),
            ApplicationResult::error("https://a.example/5", "boom"),
        ];
        let stats = JobStats::from_results(&results);
        assert_eq!(
            stats,
            JobStats {
                applied: 1,
                dry_run: 2,
                skipped: 1,
                failed: 1
            }
        );
        assert_eq!(stats.total(), results.len());
    }
}
