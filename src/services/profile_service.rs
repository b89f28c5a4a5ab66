//! 个人资料刷新 - 业务能力层
//!
//! 重新保存简历标题（让资料显示为最近更新），可选上传简历

use std::fmt;
use std::path::PathBuf;

use regex::Regex;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{Probe, ProbeResult, Warning};
use crate::infrastructure::PageDriver;
use crate::pages::profile::RESUME_UPLOADED_PATTERN;
use crate::pages::ProfilePage;

/// 单个步骤的执行情况
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    Done,
    Skipped(String),
    Failed(String),
}

/// 步骤报告
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub step: &'static str,
    pub status: StepStatus,
}

impl StepReport {
    fn from_probe(step: &'static str, result: ProbeResult, absent_reason: &str) -> Self {
        let status = match result {
            Ok(Probe::Done(())) => StepStatus::Done,
            Ok(Probe::Absent) => StepStatus::Skipped(absent_reason.to_string()),
            Err(w) => StepStatus::Failed(w.message),
        };
        Self { step, status }
    }
}

impl fmt::Display for StepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.status {
            StepStatus::Done => write!(f, "✅ {}", self.step),
            StepStatus::Skipped(reason) => write!(f, "⏭️ {} ({})", self.step, reason),
            StepStatus::Failed(reason) => write!(f, "❌ {} ({})", self.step, reason),
        }
    }
}

/// 个人资料服务
pub struct ProfileService<'a> {
    config: &'a Config,
    profile_page: ProfilePage,
}

impl<'a> ProfileService<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            profile_page: ProfilePage::new(),
        }
    }

    /// 编辑并保存简历标题，然后按配置上传简历
    pub async fn refresh(&self, page: &dyn PageDriver) -> Vec<StepReport> {
        let mut reports = vec![StepReport::from_probe(
            "保存简历标题",
            self.save_headline(page).await,
            "未找到简历标题编辑入口",
        )];

        let upload = if self.config.options.upload_enabled {
            StepReport::from_probe("上传简历", self.upload_resume(page).await, "未找到上传框或简历文件")
        } else {
            StepReport {
                step: "上传简历",
                status: StepStatus::Skipped("上传已关闭".to_string()),
            }
        };
        reports.push(upload);
        reports
    }

    async fn save_headline(&self, page: &dyn PageDriver) -> ProbeResult {
        let step = "保存简历标题";
        let edit = match self.profile_page.headline_edit.locate(page).await {
            Ok(Some(edit)) => edit,
            Ok(None) => return Ok(Probe::Absent),
            Err(e) => return Err(Warning::new(step, e)),
        };
        edit.click().await.map_err(|e| Warning::new(step, e))?;

        let textbox = self
            .profile_page
            .headline_textbox
            .wait_for(page, self.config.timeouts.apply_form)
            .await
            .map_err(|e| Warning::new(step, e))?;
        if let Some(textbox) = textbox {
            textbox.click().await.map_err(|e| Warning::new(step, e))?;
        }

        let save = self
            .profile_page
            .save_button
            .wait_for(page, self.config.timeouts.apply_form)
            .await
            .map_err(|e| Warning::new(step, e))?
            .ok_or_else(|| Warning::new(step, "未找到保存按钮"))?;
        save.click().await.map_err(|e| Warning::new(step, e))?;
        info!("✓ 简历标题已保存");
        Ok(Probe::Done(()))
    }

    async fn upload_resume(&self, page: &dyn PageDriver) -> ProbeResult {
        let step = "上传简历";
        let resume: &PathBuf = &self.config.resume_path;
        if !resume.is_file() {
            warn!("⚠️ 简历文件不存在: {}", resume.display());
            return Ok(Probe::Absent);
        }
        let input = match self.profile_page.resume_input.locate(page).await {
            Ok(Some(input)) => input,
            Ok(None) => return Ok(Probe::Absent),
            Err(e) => return Err(Warning::new(step, e)),
        };
        input
            .set_input_files(resume)
            .await
            .map_err(|e| Warning::new(step, e))?;

        let confirm = Regex::new(RESUME_UPLOADED_PATTERN).map_err(|e| Warning::new(step, e))?;
        let text = page.body_text().await.unwrap_or_default();
        if confirm.is_match(&text) {
            info!("✓ 简历上传成功");
        } else {
            warn!("⚠️ 简历已提交上传，但未看到成功提示");
        }
        Ok(Probe::Done(()))
    }
}
