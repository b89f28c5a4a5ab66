//! 结果写入服务 - 业务能力层
//!
//! 只负责把本次运行的结果落盘，不关心流程

use std::path::PathBuf;

use tokio::fs;
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::models::ApplicationResult;

/// 结果写入服务
pub struct ResultsWriter {
    results_dir: PathBuf,
}

impl ResultsWriter {
    pub fn new(results_dir: impl Into<PathBuf>) -> Self {
        Self {
            results_dir: results_dir.into(),
        }
    }

    /// 本次运行的结果文件路径
    pub fn output_path(&self, timestamp_millis: i64) -> PathBuf {
        self.results_dir
            .join(format!("naukri-apply-results-{}.json", timestamp_millis))
    }

    /// 按处理顺序写出 JSON 数组，目录不存在时自动创建
    pub async fn write(&self, results: &[ApplicationResult]) -> AppResult<PathBuf> {
        let out = self.output_path(chrono::Utc::now().timestamp_millis());
        debug!("写入 {} 条结果到 {}", results.len(), out.display());

        fs::create_dir_all(&self.results_dir)
            .await
            .map_err(|e| AppError::persistence(&self.results_dir, e))?;
        let json = serde_json::to_string_pretty(results).map_err(|e| AppError::persistence(&out, e))?;
        fs::write(&out, json)
            .await
            .map_err(|e| AppError::persistence(&out, e))?;

        info!("✓ 结果已保存至 {}", out.display());
        Ok(out)
    }
}
