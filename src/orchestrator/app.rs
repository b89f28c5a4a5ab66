//! 应用入口 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：加载凭据、启动或连接浏览器
//! 2. **模式分发**：按 `RunMode` 选择运行流程
//! 3. **资源管理**：唯一持有 `ChromeSession` 的模块，运行结束后关闭浏览器

use anyhow::Result;
use tracing::info;

use crate::browser::ChromeSession;
use crate::config::{Config, RunMode};
use crate::models::{load_credentials, Credentials};
use crate::orchestrator::finalizer::RunReport;
use crate::orchestrator::pipeline::{run_apply_pipeline, run_debug_capture, run_profile_refresh};
use crate::services::{CaptureArtifacts, StepReport};
use crate::utils::logging::{log_startup, print_final_stats};

/// 一次运行的结果
#[derive(Debug)]
pub enum RunOutcome {
    Applied(RunReport),
    ProfileRefreshed(Vec<StepReport>),
    Captured(CaptureArtifacts),
}

/// 应用主结构
pub struct App {
    config: Config,
    credentials: Credentials,
    session: ChromeSession,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let credentials =
            load_credentials(&config.credentials_file, |key| std::env::var(key).ok()).await?;
        info!("✓ 已加载账号 {}", credentials.email());

        let session = ChromeSession::start(&config).await?;
        info!("✓ 浏览器已就绪");

        Ok(Self {
            config,
            credentials,
            session,
        })
    }

    /// 运行应用主逻辑，结束后关闭浏览器
    pub async fn run(self) -> Result<RunOutcome> {
        let outcome = self.dispatch().await;
        self.session.shutdown().await;
        outcome
    }

    async fn dispatch(&self) -> Result<RunOutcome> {
        let config = &self.config;
        let outcome = match config.options.mode {
            RunMode::Apply => {
                let report = run_apply_pipeline(&self.session, config, &self.credentials).await?;
                print_final_stats(&report.results, report.saved_to.as_deref(), config);
                RunOutcome::Applied(report)
            }
            RunMode::ProfileRefresh => RunOutcome::ProfileRefreshed(
                run_profile_refresh(&self.session, config, &self.credentials).await?,
            ),
            RunMode::DebugCapture => RunOutcome::Captured(
                run_debug_capture(&self.session, config, &self.credentials).await?,
            ),
        };
        Ok(outcome)
    }
}
