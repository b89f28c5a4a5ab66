//! 会话服务 - 业务能力层
//!
//! 负责登录、进入个人主页和退出登录

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult, Probe, ProbeResult, Warning};
use crate::infrastructure::{PageDriver, ResilientLocator};
use crate::models::Credentials;
use crate::pages::{LoginPage, ProfilePage};
use crate::services::navigator::Navigator;
use crate::services::overlay::dismiss_overlays;

/// 登录结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginOutcome {
    /// 登录后是否看到了个人主页链接
    pub profile_confirmed: bool,
}

/// 会话服务
pub struct SessionService<'a> {
    config: &'a Config,
    navigator: Navigator,
    login_page: LoginPage,
    profile_page: ProfilePage,
}

impl<'a> SessionService<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            navigator: Navigator::new(config.navigation.clone()),
            login_page: LoginPage::new(),
            profile_page: ProfilePage::new(),
        }
    }

    /// 打开登录页并登录
    ///
    /// 登录后未检测到个人主页链接只记录警告，后续步骤会各自检查状态
    pub async fn bootstrap(&self, page: &dyn PageDriver, credentials: &Credentials) -> AppResult<LoginOutcome> {
        let timeouts = &self.config.timeouts;
        self.navigator
            .goto(page, &self.config.base_url, timeouts.navigation)
            .await?;
        log_probe("关闭遮挡层", dismiss_overlays(page).await);
        info!("已打开登录页 {}", self.config.base_url);

        let username = require(&self.login_page.username_input, page).await?;
        username
            .fill(credentials.email())
            .await
            .map_err(|e| AppError::Authentication(format!("填写用户名失败: {}", e)))?;

        let password = require(&self.login_page.password_input, page).await?;
        password
            .fill(credentials.password())
            .await
            .map_err(|e| AppError::Authentication(format!("填写密码失败: {}", e)))?;

        let button = self
            .login_page
            .login_button
            .wait_for(page, timeouts.login_button)
            .await
            .map_err(|e| AppError::Authentication(e.to_string()))?
            .ok_or_else(|| AppError::Authentication("未找到登录按钮".to_string()))?;
        let visible = button
            .is_visible()
            .await
            .map_err(|e| AppError::Authentication(e.to_string()))?;
        if !visible {
            return Err(AppError::Authentication("登录按钮不可见".to_string()));
        }
        let enabled = button
            .is_enabled()
            .await
            .map_err(|e| AppError::Authentication(e.to_string()))?;
        if !enabled {
            return Err(AppError::Authentication("登录按钮不可用".to_string()));
        }
        button
            .click()
            .await
            .map_err(|e| AppError::Authentication(format!("点击登录按钮失败: {}", e)))?;

        if let Err(e) = page.wait_for_load(timeouts.load_state).await {
            warn!("⚠️ 等待登录后页面加载失败: {}", e);
        }
        log_probe("关闭遮挡层", dismiss_overlays(page).await);
        info!("已提交登录表单");

        let profile_confirmed = matches!(self.login_page.profile_link.locate(page).await, Ok(Some(_)));
        if profile_confirmed {
            info!("✓ 登录成功（检测到个人主页链接）");
        } else {
            warn!("⚠️ 未检测到个人主页链接，继续执行但结果可能不稳定");
        }
        Ok(LoginOutcome { profile_confirmed })
    }

    /// 进入个人主页
    pub async fn open_profile(&self, page: &dyn PageDriver) -> ProbeResult {
        let link = match self.profile_page.profile_link.locate(page).await {
            Ok(Some(link)) => link,
            Ok(None) => return Ok(Probe::Absent),
            Err(e) => return Err(Warning::new("进入个人主页", e)),
        };
        link.click().await.map_err(|e| Warning::new("进入个人主页", e))?;
        if let Err(e) = page.wait_for_load(self.config.timeouts.load_state).await {
            warn!("⚠️ 等待个人主页加载失败: {}", e);
        }
        Ok(Probe::Done(()))
    }

    /// 退出登录
    ///
    /// 只有找到头像时才尝试；找不到不算错误
    pub async fn logout(&self, page: &dyn PageDriver) -> ProbeResult {
        let avatar = match self.profile_page.avatar.locate(page).await {
            Ok(Some(avatar)) => avatar,
            Ok(None) => return Ok(Probe::Absent),
            Err(e) => return Err(Warning::new("退出登录", e)),
        };
        avatar.click().await.map_err(|e| Warning::new("退出登录", e))?;

        let menu_wait = Duration::from_secs(2).min(self.config.timeouts.load_state);
        match self.profile_page.logout_link.wait_for(page, menu_wait).await {
            Ok(Some(logout)) => {
                logout.click().await.map_err(|e| Warning::new("退出登录", e))?;
                Ok(Probe::Done(()))
            }
            Ok(None) => Ok(Probe::Absent),
            Err(e) => Err(Warning::new("退出登录", e)),
        }
    }
}

/// 必须存在的元素，缺失即登录失败
async fn require<'p>(
    locator: &ResilientLocator,
    page: &'p dyn PageDriver,
) -> AppResult<crate::infrastructure::Located<'p>> {
    locator
        .locate(page)
        .await
        .map_err(|e| AppError::Authentication(format!("{}: {}", locator.name(), e)))?
        .ok_or_else(|| AppError::Authentication(format!("未找到{}", locator.name())))
}

/// 记录可选步骤的结果
pub(crate) fn log_probe<T: std::fmt::Debug>(step: &str, result: ProbeResult<T>) {
    match result {
        Ok(Probe::Done(v)) => debug!("{}: 完成 ({:?})", step, v),
        Ok(Probe::Absent) => debug!("{}: 未找到目标，跳过", step),
        Err(w) => warn!("⚠️ {}", w),
    }
}
