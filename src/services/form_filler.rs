//! 申请表单填写 - 业务能力层
//!
//! 所有字段都是可选的：找不到就跳过，已有内容就不覆盖

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{AppError, Probe, ProbeResult, Warning};
use crate::infrastructure::{PageDriver, ResilientLocator};
use crate::pages::JobPage;

/// 申请人信息
#[derive(Debug, Clone)]
pub struct ApplicantProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// 简历上传结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// 已上传
    Attached,
    /// 页面没有文件输入框
    NoInput,
    /// 简历文件不存在
    MissingFile,
    /// 配置关闭了上传
    Disabled,
    /// 上传失败（不影响后续步骤）
    Failed(String),
}

/// 表单填写服务
pub struct FormFiller {
    job_page: JobPage,
    resume_path: PathBuf,
    upload_enabled: bool,
}

impl FormFiller {
    pub fn new(resume_path: impl Into<PathBuf>, upload_enabled: bool) -> Self {
        Self {
            job_page: JobPage::new(),
            resume_path: resume_path.into(),
            upload_enabled,
        }
    }

    /// 填写姓名、邮箱、手机号，返回实际填写的字段数
    pub async fn fill_contact_fields(&self, page: &dyn PageDriver, profile: &ApplicantProfile) -> usize {
        let fields: [(&ResilientLocator, &str); 3] = [
            (&self.job_page.name_input, &profile.name),
            (&self.job_page.email_input, &profile.email),
            (&self.job_page.phone_input, &profile.phone),
        ];

        let mut filled = 0;
        for (locator, value) in fields {
            match fill_if_empty(page, locator, value).await {
                Ok(Probe::Done(())) => {
                    debug!("已填写{}", locator.name());
                    filled += 1;
                }
                Ok(Probe::Absent) => {}
                Err(w) => warn!("⚠️ {}", w),
            }
        }
        filled
    }

    /// 存在文件输入框且简历文件存在时上传简历
    pub async fn attach_resume(&self, page: &dyn PageDriver) -> UploadOutcome {
        if !self.upload_enabled {
            return UploadOutcome::Disabled;
        }
        let input = match self.job_page.file_input.locate(page).await {
            Ok(Some(input)) => input,
            Ok(None) => {
                info!("申请表单中没有简历上传框");
                return UploadOutcome::NoInput;
            }
            Err(e) => {
                warn!("⚠️ 查找简历上传框失败: {}", e);
                return UploadOutcome::Failed(e.to_string());
            }
        };

        if !resume_exists(&self.resume_path).await {
            warn!(
                "⚠️ 发现上传框但简历文件不存在: {}，跳过上传",
                self.resume_path.display()
            );
            return UploadOutcome::MissingFile;
        }

        match input.set_input_files(&self.resume_path).await {
            Ok(()) => {
                info!("✓ 已上传简历 {}", self.resume_path.display());
                UploadOutcome::Attached
            }
            Err(e) => {
                let err = AppError::upload(&self.resume_path, e);
                warn!("⚠️ {}", err);
                UploadOutcome::Failed(err.to_string())
            }
        }
    }
}

/// 字段存在且为空时填写；值为空时不填写
async fn fill_if_empty(page: &dyn PageDriver, locator: &ResilientLocator, value: &str) -> ProbeResult {
    if value.is_empty() {
        return Ok(Probe::Absent);
    }
    let field = match locator.locate(page).await {
        Ok(Some(field)) => field,
        Ok(None) => return Ok(Probe::Absent),
        Err(e) => return Err(Warning::new(locator.name(), e)),
    };
    let current = field.value().await.unwrap_or_default();
    if !current.trim().is_empty() {
        debug!("{}已有内容，跳过", locator.name());
        return Ok(Probe::Absent);
    }
    field
        .fill(value)
        .await
        .map_err(|e| Warning::new(locator.name(), e))?;
    Ok(Probe::Done(()))
}

async fn resume_exists(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}
