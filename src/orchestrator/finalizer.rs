//! 运行收尾 - 编排层
//!
//! 退出登录、输出汇总、保存结果文件。这里的任何失败都只记录日志

use std::path::PathBuf;

use tracing::warn;

use crate::config::Config;
use crate::infrastructure::PageDriver;
use crate::models::ApplicationResult;
use crate::services::session::log_probe;
use crate::services::{ResultsWriter, SessionService};
use crate::utils::logging::{log_phase, log_run_summary};

/// 一次投递运行的最终报告
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// 按处理顺序排列的结果
    pub results: Vec<ApplicationResult>,
    /// 结果文件路径；保存失败时为 None
    pub saved_to: Option<PathBuf>,
}

/// 收尾：尝试退出登录，然后保存结果
pub async fn finalize(page: &dyn PageDriver, config: &Config, results: Vec<ApplicationResult>) -> RunReport {
    log_phase("收尾");
    log_probe("退出登录", SessionService::new(config).logout(page).await);

    log_run_summary(&results);

    let saved_to = match ResultsWriter::new(&config.results_dir).write(&results).await {
        Ok(path) => Some(path),
        Err(e) => {
            warn!("⚠️ {}", e);
            None
        }
    };

    RunReport { results, saved_to }
}
