//! 职位申请流程 - 流程层
//!
//! 核心职责：定义"一个职位"的完整处理流程
//!
//! 流程顺序：
//! 1. Opened   在新标签页打开职位（失败则复用主页面）
//! 2. Detected 查找申请按钮，没有则 skipped
//! 3. Filled   点击申请，填写可选字段，上传简历
//! 4. Decided  dry-run 或真正提交
//! 5. Closed   关闭自己打开的标签页
//!
//! 无论发生什么，每个职位都恰好产生一个 `ApplicationResult`

use std::fmt;

use anyhow::Result;
use regex::Regex;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::error::AppError;
use crate::infrastructure::{BrowserSession, PageDriver};
use crate::models::{ApplicationResult, Credentials};
use crate::pages::job::CONFIRMATION_PATTERN;
use crate::pages::JobPage;
use crate::services::{ApplicantProfile, FormFiller};
use crate::workflow::JobCtx;

pub const NOTE_NO_APPLY_BUTTON: &str = "no apply button";
pub const NOTE_WOULD_SUBMIT: &str = "would-submit";
pub const NOTE_NO_SUBMIT_BUTTON: &str = "no submit button";
pub const NOTE_CONFIRMED: &str = "confirmed";
pub const NOTE_UNCONFIRMED: &str = "submitted (no confirmation found)";

/// 单个职位的处理阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStage {
    Opened,
    Detected,
    Filled,
    Decided,
    Closed,
}

impl fmt::Display for JobStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JobStage::Opened => "opened",
            JobStage::Detected => "detected",
            JobStage::Filled => "filled",
            JobStage::Decided => "decided",
            JobStage::Closed => "closed",
        };
        f.write_str(s)
    }
}

/// 处理职位用的标签页
enum JobTab<'s, P> {
    /// 为该职位新开的标签页，处理完需要关闭
    Own(P),
    /// 复用的主页面，不能关闭
    Shared(&'s P),
}

impl<'s, P: PageDriver> JobTab<'s, P> {
    fn page(&self) -> &P {
        match self {
            JobTab::Own(page) => page,
            JobTab::Shared(page) => page,
        }
    }
}

/// 职位申请流程
///
/// - 不持有任何资源（page）
/// - 只依赖页面能力和业务能力
pub struct ApplyFlow<'a> {
    config: &'a Config,
    applicant: ApplicantProfile,
    job_page: JobPage,
    filler: FormFiller,
}

impl<'a> ApplyFlow<'a> {
    pub fn new(config: &'a Config, credentials: &Credentials) -> Self {
        Self {
            config,
            applicant: ApplicantProfile {
                name: credentials.display_name().to_string(),
                email: credentials.email().to_string(),
                phone: config.phone.clone(),
            },
            job_page: JobPage::new(),
            filler: FormFiller::new(&config.resume_path, config.options.upload_enabled),
        }
    }

    /// 处理一个职位，错误在内部转换为 error 结果
    pub async fn run<S: BrowserSession>(&self, session: &S, ctx: &JobCtx) -> ApplicationResult {
        info!("{} 🔗 {}", ctx, ctx.url());

        let tab = match self.open(session, ctx).await {
            Ok(tab) => tab,
            Err(e) => {
                error!("{} ❌ {}", ctx, e);
                return ApplicationResult::error(ctx.url(), e.to_string());
            }
        };
        self.enter(ctx, JobStage::Opened);

        let result = match self.process(tab.page(), ctx).await {
            Ok(result) => result,
            Err(e) => {
                let message = format!("{:#}", e);
                error!("{} ❌ {}", ctx, AppError::job_processing(ctx.url(), e));
                ApplicationResult::error(ctx.url(), message)
            }
        };

        if let JobTab::Own(page) = tab {
            if let Err(e) = page.close().await {
                debug!("{} 关闭标签页失败: {}", ctx, e);
            }
        }
        self.enter(ctx, JobStage::Closed);

        info!("{} {}", ctx, result);
        result
    }

    /// 打开职位页；新标签页不可用时退回主页面
    async fn open<'s, S: BrowserSession>(
        &self,
        session: &'s S,
        ctx: &JobCtx,
    ) -> Result<JobTab<'s, S::Page>, AppError> {
        match session.open_page().await {
            Ok(page) => {
                let loaded = self.load(&page, ctx.url()).await;
                match loaded {
                    Ok(()) => return Ok(JobTab::Own(page)),
                    Err(e) => {
                        warn!("{} ⚠️ 新标签页打开职位失败: {}，改用主页面", ctx, e);
                        if let Err(e) = page.close().await {
                            debug!("{} 关闭标签页失败: {}", ctx, e);
                        }
                    }
                }
            }
            Err(e) => warn!("{} ⚠️ 无法打开新标签页: {}，改用主页面", ctx, e),
        }

        let primary = session.primary();
        self.load(primary, ctx.url())
            .await
            .map_err(|e| AppError::job_processing(ctx.url(), e))?;
        Ok(JobTab::Shared(primary))
    }

    async fn load(&self, page: &dyn PageDriver, url: &str) -> Result<()> {
        page.goto(url, self.config.timeouts.navigation).await?;
        page.wait_for_load(self.config.timeouts.load_state).await
    }

    async fn process(&self, page: &dyn PageDriver, ctx: &JobCtx) -> Result<ApplicationResult> {
        let timeouts = &self.config.timeouts;

        let Some(apply) = self.job_page.apply_button.locate(page).await? else {
            info!("{} 未找到申请按钮，跳过", ctx);
            return Ok(ApplicationResult::skipped(ctx.url(), NOTE_NO_APPLY_BUTTON));
        };
        self.enter(ctx, JobStage::Detected);

        apply.click().await?;
        match self.job_page.apply_form.wait_for(page, timeouts.apply_form).await {
            Ok(Some(_)) => {}
            Ok(None) | Err(_) => sleep(timeouts.apply_settle).await,
        }

        let filled = self.filler.fill_contact_fields(page, &self.applicant).await;
        let upload = self.filler.attach_resume(page).await;
        debug!("{} 填写了 {} 个字段，简历: {:?}", ctx, filled, upload);
        self.enter(ctx, JobStage::Filled);

        let result = self.decide(page, ctx).await?;
        self.enter(ctx, JobStage::Decided);
        Ok(result)
    }

    /// 提交闸门：只有 live_apply 为 true 时才会点击最终提交
    async fn decide(&self, page: &dyn PageDriver, ctx: &JobCtx) -> Result<ApplicationResult> {
        if !self.config.options.live_apply {
            info!("{} Dry-run: 不会真正提交 (LIVE_APPLY=false)", ctx);
            return Ok(ApplicationResult::dry_run(ctx.url(), NOTE_WOULD_SUBMIT));
        }

        let Some(submit) = self.job_page.submit_button.locate(page).await? else {
            warn!("{} ⚠️ 未找到最终提交按钮", ctx);
            return Ok(ApplicationResult::error(ctx.url(), NOTE_NO_SUBMIT_BUTTON));
        };
        submit.click().await?;
        if let Err(e) = page.wait_for_load(self.config.timeouts.load_state).await {
            warn!("{} ⚠️ 等待提交后页面加载失败: {}", ctx, e);
        }

        if confirmation_found(page).await? {
            info!("{} ✅ 已投递 (LIVE)", ctx);
            Ok(ApplicationResult::applied(ctx.url(), NOTE_CONFIRMED))
        } else {
            warn!("{} ⚠️ 已提交 (LIVE)，但未找到成功提示", ctx);
            Ok(ApplicationResult::applied(ctx.url(), NOTE_UNCONFIRMED))
        }
    }

    fn enter(&self, ctx: &JobCtx, stage: JobStage) {
        debug!("{} → {}", ctx, stage);
    }
}

async fn confirmation_found(page: &dyn PageDriver) -> Result<bool> {
    let pattern = Regex::new(CONFIRMATION_PATTERN)?;
    let text = page.body_text().await?;
    Ok(pattern.is_match(&text))
}
